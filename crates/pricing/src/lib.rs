//! # Takeoff Pricing
//!
//! The product/price resolution engine: turns diagram geometry plus a noisy
//! catalog snapshot into a priced bill of accessory materials.
//!
//! Entry point: [`compute_accessories_from_lines`]. It tallies gutter end
//! caps and corner angles per (profile, size) bucket, resolves downspout
//! elbow/offset sequences, and materializes one priced row per aggregation
//! group via the accessory scorer.
//!
//! The whole computation is a deterministic pure function over its inputs:
//! no I/O, no shared state, and every failure path degrades (fewer rows)
//! instead of erroring. A single missing catalog row must never block
//! pricing the rest of the diagram.

mod accessory;
mod aggregate;
mod downspout;
mod error;
mod item;
mod line;
mod score;

pub use accessory::{
    find_bay_miter, find_custom_miter, find_end_cap, find_strip_miter, resolve_accessory,
};
pub use aggregate::{angle_bucket, compute_accessories_from_lines, AngleBucket, BucketKey};
pub use downspout::{
    find_elbow_product, find_offset_product, fittings_from_downspout_line, parse_elbow_sequence,
    DownspoutProfile, DownspoutStyle, ElbowLetter, ElbowSequence, ElbowTally,
};
pub use error::{PricingError, Result};
pub use item::{LineItemMeta, ResolvedLineItem};
pub use line::{lines_from_json, DiagramLine, EndCaps, Topology};
pub use score::{score_accessory, AccessoryWant, Disqualification, ScoreBreakdown};
