use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::size::{normalize_size, SizeToken};

/// A flat catalog record as delivered by the product store.
///
/// Catalog data is noisy by contract: `profile` and `size` are frequently
/// absent or wrong, in which case the display name is the higher-trust
/// signal. Unknown fields are ignored on decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Backend record id.
    #[serde(rename = "_id", default)]
    pub id: Option<String>,

    /// Free-text display name; sole source of truth when structured
    /// fields are absent or wrong.
    #[serde(default)]
    pub name: String,

    /// Category tag; accessory matching requires "accessory"
    /// (case-insensitive).
    #[serde(rename = "type", default)]
    pub kind_tag: String,

    /// Catalog-side profile encoding. Half-round rows are stored as
    /// "round"; see [`crate::Profile::catalog_field`].
    #[serde(default)]
    pub profile: String,

    /// Free-text size field, often empty.
    #[serde(default)]
    pub size: String,

    /// Unit price; missing or non-numeric values decode as 0.
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
}

impl Product {
    #[must_use]
    pub fn is_accessory(&self) -> bool {
        self.kind_tag.eq_ignore_ascii_case("accessory")
    }

    /// Normalized size token from the structured field, if any.
    #[must_use]
    pub fn size_token(&self) -> Option<SizeToken> {
        normalize_size(&self.size)
    }

    /// Lowercased catalog profile field, empty when absent.
    #[must_use]
    pub fn profile_field(&self) -> String {
        self.profile.trim().to_lowercase()
    }
}

/// Accepts a JSON number, a numeric string, null, or a missing field.
/// Anything non-numeric coerces to 0 rather than failing the record.
fn lenient_price<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Decode a catalog snapshot from the backend's flat JSON array.
pub fn products_from_json(json: &str) -> Result<Vec<Product>> {
    let products: Vec<Product> = serde_json::from_str(json)?;
    log::debug!("decoded {} catalog products", products.len());
    Ok(products)
}
