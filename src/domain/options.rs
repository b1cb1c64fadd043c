use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

pub const CROP_COLUMN: &str = "Crop";
pub const DISTRICT_COLUMN: &str = "District";
pub const SOIL_COLUMN: &str = "Soil";

/// Separators that join several soil names inside one cell.
pub const SOIL_SEPARATORS: [char; 3] = ['&', '|', '/'];

/// Dropdown choices extracted from the reference dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionCatalog {
    pub crops: Vec<String>,
    pub districts: Vec<String>,
    pub soils: Vec<String>,
}

/// Compare the way a browser's default collation does for plain text:
/// case-folded first, lowercase ahead of uppercase on ties.
pub fn locale_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Turn a de-duplicated set into a sorted list.
pub fn sorted_options(set: HashSet<String>) -> Vec<String> {
    let mut values: Vec<String> = set.into_iter().collect();
    values.sort_by(|a, b| locale_order(a, b));
    values
}
