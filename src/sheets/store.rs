//! CSV-backed sheet store. One `<Sheet>.csv` export per sheet, header row first,
//! row id in the `#` column. Loaded once; rows are deserialized per request.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use csv::StringRecord;

use super::{SheetError, SheetProvider, SheetRow};

pub const DEFAULT_SHEETS_DIR: &str = "data/sheets";

const ROW_ID_COLUMN: &str = "#";

#[derive(Debug, Clone)]
struct RawSheet {
    headers: StringRecord,
    records: Vec<StringRecord>,
    by_id: HashMap<u32, usize>,
}

impl RawSheet {
    fn parse(sheet: &str, text: &str) -> Result<Self, SheetError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());
        let headers = reader
            .headers()
            .map_err(|source| SheetError::Csv {
                sheet: sheet.to_string(),
                source,
            })?
            .clone();
        let id_column = headers
            .iter()
            .position(|name| name == ROW_ID_COLUMN)
            .ok_or_else(|| SheetError::Schema {
                sheet: sheet.to_string(),
                reason: format!("missing '{ROW_ID_COLUMN}' column"),
            })?;

        let mut records = Vec::new();
        let mut by_id = HashMap::new();
        for record in reader.records() {
            let record = record.map_err(|source| SheetError::Csv {
                sheet: sheet.to_string(),
                source,
            })?;
            let raw_id = record.get(id_column).unwrap_or_default();
            let row_id = raw_id.parse::<u32>().map_err(|_| SheetError::Schema {
                sheet: sheet.to_string(),
                reason: format!("row id '{raw_id}' is not an unsigned integer"),
            })?;
            if by_id.insert(row_id, records.len()).is_some() {
                return Err(SheetError::Schema {
                    sheet: sheet.to_string(),
                    reason: format!("duplicate row id {row_id}"),
                });
            }
            records.push(record);
        }

        Ok(RawSheet {
            headers,
            records,
            by_id,
        })
    }

    fn decode<T: SheetRow>(&self, record: &StringRecord) -> Result<T, SheetError> {
        record.deserialize(Some(&self.headers)).map_err(|source| {
            let row_id = record
                .get(self.id_column())
                .and_then(|raw| raw.parse().ok())
                .unwrap_or_default();
            SheetError::Malformed {
                sheet: T::SHEET.to_string(),
                row_id,
                source,
            }
        })
    }

    fn id_column(&self) -> usize {
        self.headers
            .iter()
            .position(|name| name == ROW_ID_COLUMN)
            .unwrap_or_default()
    }
}

/// In-memory snapshot of a set of sheets.
#[derive(Debug, Clone, Default)]
pub struct SheetStore {
    sheets: HashMap<String, RawSheet>,
}

impl SheetStore {
    /// Load every `*.csv` file in `dir`; the file stem is the sheet name.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, SheetError> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|source| SheetError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut store = SheetStore::default();
        for entry in entries {
            let entry = entry.map_err(|source| SheetError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("csv") {
                continue;
            }
            let Some(sheet) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let text = fs::read_to_string(&path).map_err(|source| SheetError::Io {
                path: path.clone(),
                source,
            })?;
            store.insert_csv(sheet, &text)?;
        }

        log::debug!(
            "loaded {} sheet(s) from {}",
            store.sheets.len(),
            dir.display()
        );
        Ok(store)
    }

    /// Add (or replace) a sheet from CSV text.
    pub fn with_csv(mut self, sheet: &str, text: &str) -> Result<Self, SheetError> {
        self.insert_csv(sheet, text)?;
        Ok(self)
    }

    pub fn insert_csv(&mut self, sheet: &str, text: &str) -> Result<(), SheetError> {
        let raw = RawSheet::parse(sheet, text)?;
        self.sheets.insert(sheet.to_string(), raw);
        Ok(())
    }

    pub fn contains(&self, sheet: &str) -> bool {
        self.sheets.contains_key(sheet)
    }

    /// Sheet names currently loaded, sorted.
    pub fn sheet_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sheets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn row_count(&self, sheet: &str) -> Option<usize> {
        self.sheets.get(sheet).map(|raw| raw.records.len())
    }

    fn sheet<T: SheetRow>(&self) -> Result<&RawSheet, SheetError> {
        self.sheets
            .get(T::SHEET)
            .ok_or_else(|| SheetError::unavailable(T::SHEET))
    }
}

impl SheetProvider for SheetStore {
    fn rows<T: SheetRow>(&self) -> Result<Vec<T>, SheetError> {
        let raw = self.sheet::<T>()?;
        raw.records.iter().map(|record| raw.decode(record)).collect()
    }

    fn row<T: SheetRow>(&self, row_id: u32) -> Result<T, SheetError> {
        let raw = self.sheet::<T>()?;
        let index = raw
            .by_id
            .get(&row_id)
            .copied()
            .ok_or_else(|| SheetError::row_not_found(T::SHEET, row_id))?;
        raw.decode(&raw.records[index])
    }
}
