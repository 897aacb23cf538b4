//! # Takeoff Catalog
//!
//! Canonical types and normalizers over the noisy product catalog.
//!
//! Catalog rows come from the backend as flat JSON records whose structured
//! `profile`/`size` fields are frequently absent or wrong; the free-text
//! display name is the higher-trust signal. This crate owns:
//! - profile/size canonicalization ([`Profile`], [`normalize_size`])
//! - name/token matching ([`AccessoryKind`], [`find_by_name_parts`])
//! - the typed descriptor extracted from display names ([`NameDescriptor`])
//!
//! It is consumed by `takeoff-pricing`, which layers scoring and
//! aggregation on top.

mod error;
mod name;
mod product;
mod profile;
mod size;

pub use error::{CatalogError, Result};
pub use name::{find_by_name_parts, name_contains_all, AccessoryKind, NameDescriptor};
pub use product::{products_from_json, Product};
pub use profile::Profile;
pub use size::{normalize_size, size_from_name, SizeToken};
