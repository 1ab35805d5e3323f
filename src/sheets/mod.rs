//! Sheet access: the read-only table provider the reference cache is built on.
//! A sheet is a table of rows keyed by an unsigned row id; rows are deserialized
//! into the typed structs in [`rows`] on demand.

use std::sync::Arc;

use serde::de::DeserializeOwned;

pub mod error;
pub mod rows;
pub mod store;
pub mod validate;

pub use error::{SheetError, SheetErrorKind};
pub use rows::{
    ClassJob, ContentFinderCondition, Item, ItemUiCategory, PlaceName, TerritoryType, World,
    REQUIRED_SHEETS,
};
pub use store::{SheetStore, DEFAULT_SHEETS_DIR};

/// A row type bound to the sheet it is read from.
pub trait SheetRow: DeserializeOwned {
    const SHEET: &'static str;

    fn row_id(&self) -> u32;
}

/// Read-only table provider.
pub trait SheetProvider {
    /// Every row of `T`'s sheet, in sheet order.
    fn rows<T: SheetRow>(&self) -> Result<Vec<T>, SheetError>;

    /// Single row by id. Absent ids are [`SheetError::RowNotFound`].
    fn row<T: SheetRow>(&self, row_id: u32) -> Result<T, SheetError>;

    /// First row in sheet order matching `predicate`.
    fn find<T, F>(&self, predicate: F) -> Result<Option<T>, SheetError>
    where
        T: SheetRow,
        F: FnMut(&T) -> bool,
    {
        Ok(self.rows::<T>()?.into_iter().find(predicate))
    }
}

impl<P: SheetProvider + ?Sized> SheetProvider for &P {
    fn rows<T: SheetRow>(&self) -> Result<Vec<T>, SheetError> {
        (**self).rows()
    }

    fn row<T: SheetRow>(&self, row_id: u32) -> Result<T, SheetError> {
        (**self).row(row_id)
    }

    fn find<T, F>(&self, predicate: F) -> Result<Option<T>, SheetError>
    where
        T: SheetRow,
        F: FnMut(&T) -> bool,
    {
        (**self).find(predicate)
    }
}

impl<P: SheetProvider + ?Sized> SheetProvider for Arc<P> {
    fn rows<T: SheetRow>(&self) -> Result<Vec<T>, SheetError> {
        (**self).rows()
    }

    fn row<T: SheetRow>(&self, row_id: u32) -> Result<T, SheetError> {
        (**self).row(row_id)
    }

    fn find<T, F>(&self, predicate: F) -> Result<Option<T>, SheetError>
    where
        T: SheetRow,
        F: FnMut(&T) -> bool,
    {
        (**self).find(predicate)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    /// Answers `find` without scanning and counts full scans.
    struct Indexed {
        scans: Cell<usize>,
    }

    impl SheetProvider for Indexed {
        fn rows<T: SheetRow>(&self) -> Result<Vec<T>, SheetError> {
            self.scans.set(self.scans.get() + 1);
            Ok(Vec::new())
        }

        fn row<T: SheetRow>(&self, row_id: u32) -> Result<T, SheetError> {
            Err(SheetError::row_not_found(T::SHEET, row_id))
        }

        fn find<T, F>(&self, _predicate: F) -> Result<Option<T>, SheetError>
        where
            T: SheetRow,
            F: FnMut(&T) -> bool,
        {
            Ok(None)
        }
    }

    #[test]
    fn wrappers_keep_the_providers_own_find() {
        let shared = Arc::new(Indexed {
            scans: Cell::new(0),
        });
        let by_ref: &Indexed = &shared;
        let found = <&Indexed as SheetProvider>::find::<World, _>(&by_ref, |_| true).unwrap();
        assert!(found.is_none());
        let found = <Arc<Indexed> as SheetProvider>::find::<World, _>(&shared, |_| true).unwrap();
        assert!(found.is_none());
        assert_eq!(shared.scans.get(), 0);
    }
}
