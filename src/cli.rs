use std::env;
use std::path::PathBuf;

use crate::reference::{Catalog, ReferenceData};
use crate::sheets::validate::{validate_sheets, ValidationSeverity};
use crate::sheets::{SheetStore, DEFAULT_SHEETS_DIR};

const USAGE: &str = "usage: refdata <worlds|world|world-id|job|place|content|content-id|high-end|catalog|items|validate> [args]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Worlds,
    World,
    WorldId,
    Job,
    Place,
    Content,
    ContentId,
    HighEnd,
    Catalog,
    Items,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("worlds") => Some(Command::Worlds),
        Some("world") => Some(Command::World),
        Some("world-id") => Some(Command::WorldId),
        Some("job") => Some(Command::Job),
        Some("place") => Some(Command::Place),
        Some("content") => Some(Command::Content),
        Some("content-id") => Some(Command::ContentId),
        Some("high-end") => Some(Command::HighEnd),
        Some("catalog") => Some(Command::Catalog),
        Some("items") => Some(Command::Items),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

/// Sheet directory from `REFDATA_SHEETS_DIR`, else [`DEFAULT_SHEETS_DIR`].
pub fn sheets_dir() -> PathBuf {
    env::var_os("REFDATA_SHEETS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SHEETS_DIR))
}

pub fn run_with_args(args: &[String]) -> i32 {
    let Some(command) = parse_command(args) else {
        eprintln!("{USAGE}");
        return 2;
    };

    let dir = sheets_dir();
    let store = match SheetStore::open(&dir) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("failed to load sheets from {}: {err}", dir.display());
            return 1;
        }
    };

    let data = ReferenceData::new(store);
    match command {
        Command::Worlds => with_id(args, "data-center-id", |id| {
            for name in data.world_names(id).iter() {
                println!("{name}");
            }
            0
        }),
        Command::World => with_id(args, "world-id", |id| print_line(data.world_name(id))),
        Command::WorldId => handle_world_id(&data, args),
        Command::Job => with_id(args, "class-job-id", |id| {
            print_line(data.job_abbreviation(id))
        }),
        Command::Place => with_id(args, "territory-id", |id| print_line(data.place_name(id))),
        Command::Content => with_id(args, "content-id", |id| print_line(data.content_name(id))),
        Command::ContentId => with_id(args, "territory-id", |id| {
            print_line(data.content_id(id).to_string())
        }),
        Command::HighEnd => with_id(args, "content-id", |id| {
            print_line(data.is_high_end_duty(id).to_string())
        }),
        Command::Catalog => handle_catalog(&data, args),
        Command::Items => with_id(args, "category-id", |id| match data.item_list(id) {
            Some(list) => print_catalog(list, wants_table(args)),
            None => {
                eprintln!("unknown item category {id}");
                1
            }
        }),
        Command::Validate => handle_validate(data.sheets()),
    }
}

fn handle_world_id(data: &ReferenceData<SheetStore>, args: &[String]) -> i32 {
    let Some(name) = args.get(2) else {
        eprintln!("usage: refdata world-id <name>");
        return 2;
    };
    match data.world_id(name) {
        Some(id) => print_line(id.to_string()),
        None => 1,
    }
}

fn handle_catalog(data: &ReferenceData<SheetStore>, args: &[String]) -> i32 {
    let catalog = match args.get(2).map(String::as_str) {
        Some("content") => data.content(),
        Some("items") => data.items(),
        Some("categories") => data.item_categories(),
        _ => {
            eprintln!("usage: refdata catalog <content|items|categories> [--table]");
            return 2;
        }
    };
    print_catalog(catalog, wants_table(args))
}

fn handle_validate(store: &SheetStore) -> i32 {
    let report = validate_sheets(store);
    for diag in &report.diagnostics {
        if diag.severity == ValidationSeverity::Info {
            println!("{diag}");
        } else {
            eprintln!("{diag}");
        }
    }
    if report.has_errors() {
        1
    } else {
        0
    }
}

fn print_catalog(catalog: &Catalog, as_table: bool) -> i32 {
    if as_table {
        for (id, name) in catalog.iter() {
            println!("{id}\t{name}");
        }
        return 0;
    }
    match serde_json::to_string_pretty(catalog) {
        Ok(payload) => print_line(payload),
        Err(err) => {
            eprintln!("failed to serialize catalog: {err}");
            1
        }
    }
}

fn print_line(value: String) -> i32 {
    println!("{value}");
    0
}

fn wants_table(args: &[String]) -> bool {
    args.iter().any(|arg| arg == "--table")
}

/// Parse the id argument at position 2 and hand it to `run`; bad or missing ids are usage errors.
fn with_id(args: &[String], name: &str, run: impl FnOnce(u32) -> i32) -> i32 {
    match args.get(2).map(|raw| raw.parse::<u32>()) {
        Some(Ok(id)) => run(id),
        Some(Err(_)) => {
            eprintln!("invalid {name} '{}'", args[2]);
            2
        }
        None => {
            eprintln!("usage: refdata {} <{name}>", args[1]);
            2
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn parses_known_commands() {
        assert_eq!(parse_command(&args(&["refdata", "worlds"])), Some(Command::Worlds));
        assert_eq!(
            parse_command(&args(&["refdata", "content-id", "1036"])),
            Some(Command::ContentId)
        );
        assert_eq!(parse_command(&args(&["refdata", "teleport"])), None);
        assert_eq!(parse_command(&args(&["refdata"])), None);
    }

    #[test]
    fn bad_id_is_a_usage_error() {
        let code = with_id(&args(&["refdata", "job", "nineteen"]), "class-job-id", |_| 0);
        assert_eq!(code, 2);
        let code = with_id(&args(&["refdata", "job"]), "class-job-id", |_| 0);
        assert_eq!(code, 2);
        let code = with_id(&args(&["refdata", "job", "19"]), "class-job-id", |id| {
            assert_eq!(id, 19);
            0
        });
        assert_eq!(code, 0);
    }
}
