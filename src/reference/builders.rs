//! One-shot catalog builds run when a [`ReferenceData`](super::ReferenceData) is created.

use std::collections::HashMap;

use crate::sanitize::Sanitizer;
use crate::sheets::{ContentFinderCondition, Item, ItemUiCategory, SheetError, SheetProvider};

use super::catalog::{Catalog, ItemLists};

/// Content types listed in the duty catalog.
pub const DUTY_CONTENT_TYPES: [u32; 7] = [2, 4, 5, 6, 26, 28, 29];

/// Duty rows that match a listed content type but are never offered.
pub const EXCLUDED_CONTENT: [u32; 3] = [69, 70, 71];

/// ItemUICategory row 0 is the "no category" sentinel.
const NO_CATEGORY: u32 = 0;

pub fn build_content_catalog<P, S>(sheets: &P, sanitizer: &S) -> Result<Catalog, SheetError>
where
    P: SheetProvider,
    S: Sanitizer,
{
    let (ids, raw_names): (Vec<u32>, Vec<String>) = sheets
        .rows::<ContentFinderCondition>()?
        .into_iter()
        .filter(|content| {
            DUTY_CONTENT_TYPES.contains(&content.content_type)
                && !EXCLUDED_CONTENT.contains(&content.row_id)
        })
        .map(|content| (content.row_id, content.name))
        .unzip();

    Ok(Catalog::sorted(ids, sanitizer.sanitize_all(raw_names)))
}

/// Item, item-category and per-category catalogs, built together.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalogs {
    /// Every named item, in sheet order.
    pub items: Catalog,
    /// Categories other than the sentinel, sorted by name.
    pub categories: Catalog,
    pub by_category: ItemLists,
}

pub fn build_item_catalogs<P, S>(sheets: &P, sanitizer: &S) -> Result<ItemCatalogs, SheetError>
where
    P: SheetProvider,
    S: Sanitizer,
{
    let named_items: Vec<Item> = sheets
        .rows::<Item>()?
        .into_iter()
        .filter(|item| !item.name.is_empty())
        .collect();
    let items = Catalog::unsorted(
        named_items.iter().map(|item| item.row_id).collect(),
        sanitizer.sanitize_all(named_items.iter().map(|item| item.name.as_str())),
    );

    let (category_ids, category_names): (Vec<u32>, Vec<String>) = sheets
        .rows::<ItemUiCategory>()?
        .into_iter()
        .filter(|category| category.row_id != NO_CATEGORY)
        .map(|category| (category.row_id, category.name))
        .unzip();
    let categories = Catalog::sorted(category_ids, sanitizer.sanitize_all(category_names));

    let mut grouped: HashMap<u32, Vec<&Item>> = HashMap::new();
    for item in &named_items {
        grouped.entry(item.item_ui_category).or_default().push(item);
    }

    let by_category = categories
        .ids()
        .iter()
        .map(|&category_id| {
            let members = grouped.remove(&category_id).unwrap_or_default();
            let list = Catalog::sorted(
                members.iter().map(|item| item.row_id).collect(),
                sanitizer.sanitize_all(members.iter().map(|item| item.name.as_str())),
            );
            (category_id, list)
        })
        .collect();

    Ok(ItemCatalogs {
        items,
        categories,
        by_category,
    })
}
