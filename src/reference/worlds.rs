use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Memoized public-world listings, one slot per data center.
/// Only successful scans are stored; a failed scan is retried on the next call.
#[derive(Debug, Default)]
pub struct WorldNameCache {
    slots: RwLock<HashMap<u32, Arc<[String]>>>,
}

impl WorldNameCache {
    pub fn get(&self, data_center: u32) -> Option<Arc<[String]>> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&data_center)
            .cloned()
    }

    /// Cached listing for `data_center`, or run `scan` and keep its result.
    /// The scan runs outside the lock; when two callers race on a cold slot the
    /// first stored listing wins and both return it.
    pub fn get_or_try_insert<E>(
        &self,
        data_center: u32,
        scan: impl FnOnce() -> Result<Vec<String>, E>,
    ) -> Result<Arc<[String]>, E> {
        if let Some(cached) = self.get(data_center) {
            return Ok(cached);
        }
        let fresh: Arc<[String]> = scan()?.into();
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        Ok(slots.entry(data_center).or_insert(fresh).clone())
    }

    pub fn len(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
