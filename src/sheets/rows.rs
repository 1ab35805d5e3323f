//! Typed rows for the sheets the reference cache reads.
//! Column names follow the game's exported headers; `#` is the row id and
//! cross-sheet references are bare row ids where 0 means "none".

use serde::de::{self, Deserializer};
use serde::Deserialize;

use super::SheetRow;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct World {
    #[serde(rename = "#")]
    pub row_id: u32,
    pub name: String,
    #[serde(deserialize_with = "flag")]
    pub is_public: bool,
    /// Data center (region group) the world belongs to.
    pub data_center: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContentFinderCondition {
    #[serde(rename = "#")]
    pub row_id: u32,
    pub name: String,
    pub content_type: u32,
    pub territory_type: u32,
    #[serde(deserialize_with = "flag")]
    pub high_end_duty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClassJob {
    #[serde(rename = "#")]
    pub row_id: u32,
    pub name: String,
    pub abbreviation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TerritoryType {
    #[serde(rename = "#")]
    pub row_id: u32,
    pub name: String,
    pub place_name: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlaceName {
    #[serde(rename = "#")]
    pub row_id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Item {
    #[serde(rename = "#")]
    pub row_id: u32,
    pub name: String,
    #[serde(rename = "ItemUICategory")]
    pub item_ui_category: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemUiCategory {
    #[serde(rename = "#")]
    pub row_id: u32,
    pub name: String,
}

macro_rules! sheet_row {
    ($($ty:ty => $sheet:literal),* $(,)?) => {
        $(
            impl SheetRow for $ty {
                const SHEET: &'static str = $sheet;

                fn row_id(&self) -> u32 {
                    self.row_id
                }
            }
        )*
    };
}

sheet_row! {
    World => "World",
    ContentFinderCondition => "ContentFinderCondition",
    ClassJob => "ClassJob",
    TerritoryType => "TerritoryType",
    PlaceName => "PlaceName",
    Item => "Item",
    ItemUiCategory => "ItemUICategory",
}

/// Every sheet the reference cache touches.
pub const REQUIRED_SHEETS: &[&str] = &[
    World::SHEET,
    ContentFinderCondition::SHEET,
    ClassJob::SHEET,
    TerritoryType::SHEET,
    PlaceName::SHEET,
    Item::SHEET,
    ItemUiCategory::SHEET,
];

/// Exports write booleans as `True`/`False`; hand-made fixtures tend to use `true` or `1`.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "True" | "true" | "TRUE" | "1" => Ok(true),
        "False" | "false" | "FALSE" | "0" | "" => Ok(false),
        other => Err(de::Error::invalid_value(
            de::Unexpected::Str(other),
            &"a boolean (True/False/1/0)",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse<T: SheetRow>(csv_text: &str) -> T {
        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
        let headers = reader.headers().expect("headers").clone();
        let record = reader.records().next().expect("one row").expect("valid row");
        record.deserialize(Some(&headers)).expect("row matches type")
    }

    #[test]
    fn world_accepts_export_style_booleans() {
        let world: World = parse("#,Name,IsPublic,DataCenter\n73,Adamantoise,True,4\n");
        assert_eq!(world.row_id, 73);
        assert!(world.is_public);
        assert_eq!(world.data_center, 4);

        let world: World = parse("#,Name,IsPublic,DataCenter\n3,Ifrit,0,0\n");
        assert!(!world.is_public);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let item: Item = parse("#,Singular,Name,Level,ItemUICategory\n2,shard,Fire Shard,1,59\n");
        assert_eq!(item.name, "Fire Shard");
        assert_eq!(item.item_ui_category, 59);
    }

    #[test]
    fn garbage_boolean_is_rejected() {
        let mut reader = csv::Reader::from_reader(
            "#,Name,ContentType,TerritoryType,HighEndDuty\n1,X,2,0,maybe\n".as_bytes(),
        );
        let headers = reader.headers().unwrap().clone();
        let record = reader.records().next().unwrap().unwrap();
        let parsed: Result<ContentFinderCondition, _> = record.deserialize(Some(&headers));
        assert!(parsed.is_err());
    }
}
