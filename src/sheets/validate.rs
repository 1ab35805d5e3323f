use std::collections::HashSet;
use std::fmt;

use super::{
    ClassJob, ContentFinderCondition, Item, ItemUiCategory, PlaceName, SheetError, SheetProvider,
    SheetRow, TerritoryType, World, REQUIRED_SHEETS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn count(&self, severity: ValidationSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    }
}

/// Check that every sheet the cache needs is readable and that the
/// cross-sheet references it follows land on existing rows.
/// Unreadable sheets are errors; dangling references are warnings since the
/// cache degrades to its fallbacks for them.
pub fn validate_sheets<P: SheetProvider>(sheets: &P) -> ValidationReport {
    let mut report = ValidationReport::default();

    let worlds = load::<World, _>(sheets, &mut report);
    let _ = load::<ClassJob, _>(sheets, &mut report);
    let contents = load::<ContentFinderCondition, _>(sheets, &mut report);
    let territories = load::<TerritoryType, _>(sheets, &mut report);
    let places = load::<PlaceName, _>(sheets, &mut report);
    let items = load::<Item, _>(sheets, &mut report);
    let categories = load::<ItemUiCategory, _>(sheets, &mut report);

    if let Some(worlds) = &worlds {
        if !worlds.iter().any(|world| world.is_public) {
            report.push(
                ValidationSeverity::Warning,
                World::SHEET,
                "no public worlds; every region listing will be empty",
            );
        }
    }

    if let (Some(territories), Some(places)) = (&territories, &places) {
        let place_ids = ids(places);
        for territory in territories {
            check_reference(
                &mut report,
                TerritoryType::SHEET,
                territory.row_id,
                "PlaceName",
                PlaceName::SHEET,
                territory.place_name,
                &place_ids,
            );
        }
    }

    if let (Some(contents), Some(territories)) = (&contents, &territories) {
        let territory_ids = ids(territories);
        for content in contents {
            check_reference(
                &mut report,
                ContentFinderCondition::SHEET,
                content.row_id,
                "TerritoryType",
                TerritoryType::SHEET,
                content.territory_type,
                &territory_ids,
            );
        }
    }

    if let (Some(items), Some(categories)) = (&items, &categories) {
        let category_ids = ids(categories);
        for item in items.iter().filter(|item| !item.name.is_empty()) {
            check_reference(
                &mut report,
                Item::SHEET,
                item.row_id,
                "ItemUICategory",
                ItemUiCategory::SHEET,
                item.item_ui_category,
                &category_ids,
            );
        }
    }

    report.push(
        ValidationSeverity::Info,
        "sheets",
        format!(
            "checked {} sheet(s), {} error(s), {} warning(s)",
            REQUIRED_SHEETS.len(),
            report.count(ValidationSeverity::Error),
            report.count(ValidationSeverity::Warning)
        ),
    );
    report
}

fn load<T: SheetRow, P: SheetProvider>(
    sheets: &P,
    report: &mut ValidationReport,
) -> Option<Vec<T>> {
    match sheets.rows::<T>() {
        Ok(rows) => Some(rows),
        Err(err) => {
            report.push(ValidationSeverity::Error, T::SHEET, describe(&err));
            None
        }
    }
}

fn describe(err: &SheetError) -> String {
    match err {
        SheetError::Unavailable { .. } => "sheet is missing".to_string(),
        other => other.to_string(),
    }
}

fn ids<T: SheetRow>(rows: &[T]) -> HashSet<u32> {
    rows.iter().map(SheetRow::row_id).collect()
}

fn check_reference(
    report: &mut ValidationReport,
    sheet: &str,
    row_id: u32,
    column: &str,
    target: &str,
    target_id: u32,
    known: &HashSet<u32>,
) {
    if target_id != 0 && !known.contains(&target_id) {
        report.push(
            ValidationSeverity::Warning,
            format!("{sheet}#{row_id}.{column}"),
            format!("references missing {target}#{target_id}"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::SheetStore;

    fn complete_store() -> SheetStore {
        SheetStore::default()
            .with_csv("World", "#,Name,IsPublic,DataCenter\n21,Ravana,True,7\n")
            .and_then(|s| s.with_csv("ClassJob", "#,Name,Abbreviation\n19,paladin,PLD\n"))
            .and_then(|s| {
                s.with_csv(
                    "ContentFinderCondition",
                    "#,Name,ContentType,TerritoryType,HighEndDuty\n1,Sastasha,2,1036,False\n",
                )
            })
            .and_then(|s| s.with_csv("TerritoryType", "#,Name,PlaceName\n1036,s1d1,1\n"))
            .and_then(|s| s.with_csv("PlaceName", "#,Name\n1,Sastasha\n"))
            .and_then(|s| s.with_csv("Item", "#,Name,ItemUICategory\n2,Fire Shard,59\n"))
            .and_then(|s| s.with_csv("ItemUICategory", "#,Name\n59,Crystal\n"))
            .unwrap()
    }

    #[test]
    fn complete_sheets_have_no_errors_or_warnings() {
        let report = validate_sheets(&complete_store());
        assert!(!report.has_errors());
        assert_eq!(report.count(ValidationSeverity::Warning), 0);
        assert_eq!(report.count(ValidationSeverity::Info), 1);
    }

    #[test]
    fn missing_sheet_is_an_error() {
        let store = SheetStore::default()
            .with_csv("World", "#,Name,IsPublic,DataCenter\n21,Ravana,True,7\n")
            .unwrap();
        let report = validate_sheets(&store);
        assert!(report.has_errors());
        assert!(report
            .diagnostics
            .iter()
            .any(|diag| diag.context == "ItemUICategory" && diag.message == "sheet is missing"));
    }

    #[test]
    fn dangling_place_name_is_a_warning() {
        let store = complete_store()
            .with_csv("TerritoryType", "#,Name,PlaceName\n1036,s1d1,1\n1037,s1d2,404\n")
            .unwrap();
        let report = validate_sheets(&store);
        assert!(!report.has_errors());
        let warning = report
            .diagnostics
            .iter()
            .find(|diag| diag.severity == ValidationSeverity::Warning)
            .expect("warning for dangling reference");
        assert_eq!(warning.context, "TerritoryType#1037.PlaceName");
        assert_eq!(warning.message, "references missing PlaceName#404");
    }
}
