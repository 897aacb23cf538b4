use takeoff_catalog::{AccessoryKind, Product, Profile, SizeToken};

use crate::accessory::resolve_accessory;
use crate::downspout::fittings_from_downspout_line;
use crate::item::{LineItemMeta, ResolvedLineItem};
use crate::line::DiagramLine;
use crate::score::AccessoryWant;

/// Classified corner angle. Strip covers squared corners, bay covers the
/// two bay-window bands, everything else is custom and keyed by its own
/// rounded degree value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleBucket {
    Strip { degrees: i32 },
    Bay { degrees: i32 },
    Custom { degrees: Option<i32> },
}

/// Bucket a corner angle in degrees.
///
/// 88–92 rounds to a 90° strip miter; 123–127 and 133–137 are bay miters
/// keeping their rounded input degrees; anything else, NaN included, is
/// custom.
#[must_use]
pub fn angle_bucket(degrees: f64) -> AngleBucket {
    if degrees.is_nan() {
        return AngleBucket::Custom { degrees: None };
    }
    let rounded = degrees.round() as i32;
    match rounded {
        88..=92 => AngleBucket::Strip { degrees: 90 },
        123..=127 | 133..=137 => AngleBucket::Bay { degrees: rounded },
        _ => AngleBucket::Custom {
            degrees: Some(rounded),
        },
    }
}

/// Aggregation key: one gutter profile at one size. A struct key rather
/// than a concatenated string, so separator characters in values can never
/// collide two buckets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketKey {
    pub profile: Profile,
    pub size: Option<SizeToken>,
}

impl BucketKey {
    fn for_line(line: &DiagramLine) -> Self {
        Self {
            profile: line.gutter_profile(),
            size: line.gutter_size(),
        }
    }

    fn meta(&self, kind: &str) -> LineItemMeta {
        LineItemMeta {
            kind: kind.to_string(),
            profile: Some(self.profile.key().to_string()),
            size: self.size.as_ref().map(|s| s.as_str().to_string()),
            letter: None,
            inches: None,
            degrees: None,
        }
    }
}

/// Insertion-ordered tally so materialized rows come out in
/// first-encountered-line order.
struct Tally<K: PartialEq>(Vec<(K, u32)>);

impl<K: PartialEq> Tally<K> {
    fn new() -> Self {
        Self(Vec::new())
    }

    fn bump(&mut self, key: K, by: u32) {
        if let Some(entry) = self.0.iter_mut().find(|(k, _)| *k == key) {
            entry.1 += by;
        } else {
            self.0.push((key, by));
        }
    }
}

/// Walk all diagram lines and materialize the priced bill of accessory
/// materials. Downspout fittings come out in line-encounter order, followed
/// by end caps, strip miters, bay miters, and custom miters in
/// first-encountered-bucket order.
///
/// Pure over its inputs: no mutation, no shared state, and identical inputs
/// always produce identical output.
#[must_use]
pub fn compute_accessories_from_lines(
    lines: &[DiagramLine],
    products: &[Product],
) -> Vec<ResolvedLineItem> {
    let mut fittings = Vec::new();
    let mut end_caps: Tally<BucketKey> = Tally::new();
    let mut strips: Tally<BucketKey> = Tally::new();
    let mut bays: Tally<BucketKey> = Tally::new();
    // Custom angles need one priced row per distinct degree per bucket.
    let mut customs: Vec<(BucketKey, Tally<Option<i32>>)> = Vec::new();

    for line in lines {
        if line.is_downspout {
            fittings.extend(fittings_from_downspout_line(line, products));
            continue;
        }
        if !line.is_gutter_line() {
            continue;
        }

        let key = BucketKey::for_line(line);

        if let Some(caps) = line.end_caps() {
            // Presence only; a line contributes at most two caps no matter
            // how large the left/right quantities are.
            let count = u32::from(caps.left > 0.0) + u32::from(caps.right > 0.0);
            if count > 0 {
                end_caps.bump(key.clone(), count);
            }
        }

        for &angle in line.corners() {
            match angle_bucket(angle) {
                AngleBucket::Strip { .. } => strips.bump(key.clone(), 1),
                AngleBucket::Bay { degrees } => {
                    if (123..=127).contains(&degrees) {
                        // Bay rows are labeled 135 below even for the 125
                        // band; flagged for product review.
                        log::debug!("bay corner at {degrees}° will be labeled 135°");
                    }
                    bays.bump(key.clone(), 1);
                }
                AngleBucket::Custom { degrees } => {
                    if let Some((_, tally)) =
                        customs.iter_mut().find(|(k, _)| *k == key)
                    {
                        tally.bump(degrees, 1);
                    } else {
                        let mut tally = Tally::new();
                        tally.bump(degrees, 1);
                        customs.push((key.clone(), tally));
                    }
                }
            }
        }
    }

    let mut items = Vec::new();

    for (key, quantity) in &end_caps.0 {
        if let Some(product) = resolve_for(products, key, AccessoryKind::EndCap) {
            items.push(ResolvedLineItem {
                name: product.name.clone(),
                quantity: *quantity,
                price: product.price,
                product: product.clone(),
                meta: key.meta("end_cap"),
            });
        }
    }

    for (key, quantity) in &strips.0 {
        if let Some(product) = resolve_for(products, key, AccessoryKind::StripMiter) {
            let mut meta = key.meta("strip_miter");
            meta.degrees = Some(90);
            items.push(ResolvedLineItem {
                name: product.name.clone(),
                quantity: *quantity,
                price: product.price,
                product: product.clone(),
                meta,
            });
        }
    }

    for (key, quantity) in &bays.0 {
        if let Some(product) = resolve_for(products, key, AccessoryKind::BayMiter) {
            let mut meta = key.meta("bay_miter");
            // Long-standing labeling quirk: bay rows always say 135.
            meta.degrees = Some(135);
            items.push(ResolvedLineItem {
                name: product.name.clone(),
                quantity: *quantity,
                price: product.price,
                product: product.clone(),
                meta,
            });
        }
    }

    for (key, degrees_tally) in &customs {
        // One template per bucket covers every custom angle in it.
        let Some(product) = resolve_for(products, key, AccessoryKind::CustomMiter) else {
            continue;
        };
        for (degrees, quantity) in &degrees_tally.0 {
            let name = match degrees {
                Some(d) => format!("Custom Miter ({d}°)"),
                None => "Custom Miter".to_string(),
            };
            let mut meta = key.meta("custom_miter");
            meta.degrees = *degrees;
            items.push(ResolvedLineItem {
                name,
                quantity: *quantity,
                price: product.price,
                product: product.clone(),
                meta,
            });
        }
    }

    fittings.extend(items);
    fittings
}

fn resolve_for<'a>(
    products: &'a [Product],
    key: &BucketKey,
    kind: AccessoryKind,
) -> Option<&'a Product> {
    let want = AccessoryWant::new(key.profile.clone(), key.size.clone(), kind);
    let found = resolve_accessory(products, &want);
    if found.is_none() {
        log::debug!(
            "no catalog match for {} {} {}; row skipped",
            key.profile,
            key.size.as_ref().map_or("(no size)", |s| s.as_str()),
            kind.as_str()
        );
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn buckets_strip_angles() {
        assert_eq!(angle_bucket(90.0), AngleBucket::Strip { degrees: 90 });
        assert_eq!(angle_bucket(91.0), AngleBucket::Strip { degrees: 90 });
        assert_eq!(angle_bucket(88.4), AngleBucket::Strip { degrees: 90 });
    }

    #[test]
    fn buckets_bay_angles_without_normalizing() {
        assert_eq!(angle_bucket(125.0), AngleBucket::Bay { degrees: 125 });
        assert_eq!(angle_bucket(135.0), AngleBucket::Bay { degrees: 135 });
        assert_eq!(angle_bucket(123.4), AngleBucket::Bay { degrees: 123 });
    }

    #[test]
    fn everything_else_is_custom() {
        assert_eq!(
            angle_bucket(110.0),
            AngleBucket::Custom {
                degrees: Some(110)
            }
        );
        assert_eq!(
            angle_bucket(128.0),
            AngleBucket::Custom {
                degrees: Some(128)
            }
        );
        assert_eq!(angle_bucket(f64::NAN), AngleBucket::Custom { degrees: None });
    }
}
