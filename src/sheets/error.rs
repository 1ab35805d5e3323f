use std::path::PathBuf;

/// Failure category for a sheet access. Point lookups collapse all three into
/// their fallback value, but callers of the `try_*` forms can tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetErrorKind {
    TableUnavailable,
    RowNotFound,
    MalformedReference,
}

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("sheet '{sheet}' is not available")]
    Unavailable { sheet: String },

    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sheet '{sheet}': {source}")]
    Csv {
        sheet: String,
        #[source]
        source: csv::Error,
    },

    #[error("sheet '{sheet}' has an invalid layout: {reason}")]
    Schema { sheet: String, reason: String },

    #[error("row {row_id} of sheet '{sheet}' does not match its schema: {source}")]
    Malformed {
        sheet: String,
        row_id: u32,
        #[source]
        source: csv::Error,
    },

    #[error("row {row_id} not found in sheet '{sheet}'")]
    RowNotFound { sheet: String, row_id: u32 },

    #[error("{sheet}#{row_id}.{column} points at missing {target}#{target_id}")]
    BrokenReference {
        sheet: String,
        row_id: u32,
        column: &'static str,
        target: String,
        target_id: u32,
    },
}

impl SheetError {
    pub fn unavailable(sheet: impl Into<String>) -> Self {
        SheetError::Unavailable {
            sheet: sheet.into(),
        }
    }

    pub fn row_not_found(sheet: impl Into<String>, row_id: u32) -> Self {
        SheetError::RowNotFound {
            sheet: sheet.into(),
            row_id,
        }
    }

    pub fn kind(&self) -> SheetErrorKind {
        match self {
            SheetError::Unavailable { .. }
            | SheetError::Io { .. }
            | SheetError::Csv { .. }
            | SheetError::Schema { .. }
            | SheetError::Malformed { .. } => SheetErrorKind::TableUnavailable,
            SheetError::RowNotFound { .. } => SheetErrorKind::RowNotFound,
            SheetError::BrokenReference { .. } => SheetErrorKind::MalformedReference,
        }
    }

    /// Re-tag a missing target row as a dangling reference from `sheet#row_id.column`.
    pub(crate) fn into_reference(self, sheet: &str, row_id: u32, column: &'static str) -> Self {
        match self {
            SheetError::RowNotFound {
                sheet: target,
                row_id: target_id,
            } => SheetError::BrokenReference {
                sheet: sheet.to_string(),
                row_id,
                column,
                target,
                target_id,
            },
            other => other,
        }
    }
}
