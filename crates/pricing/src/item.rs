use serde::{Deserialize, Serialize};
use takeoff_catalog::Product;

/// Tags carried on a resolved row for downstream rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LineItemMeta {
    /// Row category: `end_cap`, `strip_miter`, `bay_miter`, `custom_miter`,
    /// `elbow`, or `offset`.
    pub kind: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Elbow letter for downspout elbow rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter: Option<char>,

    /// Offset length for downspout offset rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inches: Option<u32>,

    /// Corner angle for miter rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degrees: Option<i32>,
}

/// One priced output row.
///
/// Rows are created once per aggregation group per compute pass and never
/// mutated afterwards; the whole output array is regenerated on every
/// recompute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedLineItem {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    pub product: Product,
    pub meta: LineItemMeta,
}
