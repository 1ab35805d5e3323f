//! Reference-data cache: catalogs built once at construction, a memoized
//! world listing per data center, and point lookups that hit the sheets on
//! every call. Share it behind an `Arc`; nothing here reloads.

use std::sync::Arc;

use crate::sanitize::{SeStringSanitizer, Sanitizer};
use crate::sheets::{
    ClassJob, ContentFinderCondition, PlaceName, SheetError, SheetProvider, SheetRow,
    TerritoryType, World,
};

pub mod builders;
pub mod catalog;
pub mod worlds;

pub use builders::{
    build_content_catalog, build_item_catalogs, ItemCatalogs, DUTY_CONTENT_TYPES,
    EXCLUDED_CONTENT,
};
pub use catalog::{Catalog, ItemLists};
pub use worlds::WorldNameCache;

#[derive(Debug)]
pub struct ReferenceData<P, S = SeStringSanitizer> {
    sheets: P,
    sanitizer: S,
    content: Catalog,
    items: ItemCatalogs,
    world_names: WorldNameCache,
}

impl<P: SheetProvider> ReferenceData<P> {
    pub fn new(sheets: P) -> Self {
        Self::with_sanitizer(sheets, SeStringSanitizer)
    }
}

impl<P: SheetProvider, S: Sanitizer> ReferenceData<P, S> {
    /// Build every catalog up front. A sheet that cannot be read leaves its
    /// catalogs empty; construction itself never fails.
    pub fn with_sanitizer(sheets: P, sanitizer: S) -> Self {
        let content = build_content_catalog(&sheets, &sanitizer).unwrap_or_else(|err| {
            log::info!("Failed to initialize content list: {err}");
            Catalog::default()
        });
        let items = build_item_catalogs(&sheets, &sanitizer).unwrap_or_else(|err| {
            log::info!("Failed to initialize item lists: {err}");
            ItemCatalogs::default()
        });
        log::debug!(
            "reference data ready: {} duties, {} items, {} item categories",
            content.len(),
            items.items.len(),
            items.categories.len()
        );

        ReferenceData {
            sheets,
            sanitizer,
            content,
            items,
            world_names: WorldNameCache::default(),
        }
    }

    pub fn sheets(&self) -> &P {
        &self.sheets
    }

    /// Duty catalog, sorted by name.
    pub fn content(&self) -> &Catalog {
        &self.content
    }

    pub fn content_ids(&self) -> &[u32] {
        self.content.ids()
    }

    pub fn content_names(&self) -> &[String] {
        self.content.names()
    }

    /// All named items in sheet order (not sorted).
    pub fn items(&self) -> &Catalog {
        &self.items.items
    }

    pub fn item_ids(&self) -> &[u32] {
        self.items.items.ids()
    }

    pub fn item_names(&self) -> &[String] {
        self.items.items.names()
    }

    /// Item UI categories, sorted by name.
    pub fn item_categories(&self) -> &Catalog {
        &self.items.categories
    }

    pub fn item_category_ids(&self) -> &[u32] {
        self.items.categories.ids()
    }

    pub fn item_category_names(&self) -> &[String] {
        self.items.categories.names()
    }

    pub fn item_lists(&self) -> &ItemLists {
        &self.items.by_category
    }

    pub fn item_list(&self, category_id: u32) -> Option<&Catalog> {
        self.items.by_category.get(&category_id)
    }

    /// Public worlds of `data_center`, sorted. Empty when the sheet is unreadable.
    pub fn world_names(&self, data_center: u32) -> Arc<[String]> {
        self.try_world_names(data_center).unwrap_or_else(|err| {
            log::info!("WorldNames are not available: {err}");
            Arc::from(Vec::new())
        })
    }

    pub fn try_world_names(&self, data_center: u32) -> Result<Arc<[String]>, SheetError> {
        self.world_names.get_or_try_insert(data_center, || {
            let mut names: Vec<String> = self
                .sheets
                .rows::<World>()?
                .into_iter()
                .filter(|world| world.is_public && world.data_center == data_center)
                .map(|world| world.name)
                .collect();
            names.sort();
            Ok(names)
        })
    }

    /// Raw world name; not sanitized.
    pub fn world_name(&self, world_id: u32) -> String {
        self.try_world_name(world_id).unwrap_or_else(|err| {
            log::info!("WorldName is not available: {err}");
            String::new()
        })
    }

    pub fn try_world_name(&self, world_id: u32) -> Result<String, SheetError> {
        Ok(self.sheets.row::<World>(world_id)?.name)
    }

    /// First world whose raw name equals `name` exactly.
    pub fn world_id(&self, name: &str) -> Option<u32> {
        self.try_world_id(name).unwrap_or_else(|err| {
            log::info!("WorldId is not available: {err}");
            None
        })
    }

    pub fn try_world_id(&self, name: &str) -> Result<Option<u32>, SheetError> {
        Ok(self
            .sheets
            .find::<World, _>(|world| world.name == name)?
            .map(|world| world.row_id))
    }

    pub fn job_abbreviation(&self, class_job_id: u32) -> String {
        self.try_job_abbreviation(class_job_id)
            .unwrap_or_else(|err| {
                log::info!("JobCode is not available: {err}");
                String::new()
            })
    }

    pub fn try_job_abbreviation(&self, class_job_id: u32) -> Result<String, SheetError> {
        Ok(self.sheets.row::<ClassJob>(class_job_id)?.abbreviation)
    }

    /// Sanitized place name of a territory.
    pub fn place_name(&self, territory_id: u32) -> String {
        self.try_place_name(territory_id).unwrap_or_else(|err| {
            log::info!("PlaceName is not available: {err}");
            String::new()
        })
    }

    pub fn try_place_name(&self, territory_id: u32) -> Result<String, SheetError> {
        let territory = self.sheets.row::<TerritoryType>(territory_id)?;
        let place = self
            .sheets
            .row::<PlaceName>(territory.place_name)
            .map_err(|err| err.into_reference(TerritoryType::SHEET, territory_id, "PlaceName"))?;
        Ok(self.sanitizer.sanitize(&place.name))
    }

    /// Sanitized duty name. Id 0 is "no duty" and yields an empty name.
    pub fn content_name(&self, content_id: u32) -> String {
        self.try_content_name(content_id).unwrap_or_else(|err| {
            log::info!("ContentName is not available: {err}");
            String::new()
        })
    }

    pub fn try_content_name(&self, content_id: u32) -> Result<String, SheetError> {
        if content_id == 0 {
            return Ok(String::new());
        }
        let content = self.sheets.row::<ContentFinderCondition>(content_id)?;
        Ok(self.sanitizer.sanitize(&content.name))
    }

    /// First duty played in `territory_id`, or 0.
    pub fn content_id(&self, territory_id: u32) -> u32 {
        self.try_content_id(territory_id)
            .unwrap_or_else(|err| {
                log::info!("ContentId is not available: {err}");
                None
            })
            .unwrap_or(0)
    }

    pub fn try_content_id(&self, territory_id: u32) -> Result<Option<u32>, SheetError> {
        Ok(self
            .sheets
            .find::<ContentFinderCondition, _>(|content| content.territory_type == territory_id)?
            .map(|content| content.row_id))
    }

    pub fn is_high_end_duty(&self, content_id: u32) -> bool {
        self.try_is_high_end_duty(content_id).unwrap_or_else(|err| {
            log::info!("Content HighEndDuty is not available: {err}");
            false
        })
    }

    pub fn try_is_high_end_duty(&self, content_id: u32) -> Result<bool, SheetError> {
        Ok(self
            .sheets
            .row::<ContentFinderCondition>(content_id)?
            .high_end_duty)
    }
}
