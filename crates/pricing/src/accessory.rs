use takeoff_catalog::{AccessoryKind, Product, Profile, SizeToken};

use crate::score::{score_accessory, AccessoryWant};

/// Resolve the single best catalog product for a want.
///
/// Attempts run in a fixed order: the exact want first, then the same want
/// with size relaxed. Profile and kind are never relaxed, so a missing
/// profile match always resolves to nothing rather than a cross-profile row.
#[must_use]
pub fn resolve_accessory<'a>(
    products: &'a [Product],
    want: &AccessoryWant,
) -> Option<&'a Product> {
    if want.profile == Profile::Custom {
        return resolve_custom(products, want);
    }

    let attempts = [want.clone(), want.relaxed()];
    for (pass, attempt) in attempts.iter().enumerate() {
        if pass > 0 && want.size.is_none() {
            // Already relaxed; the second pass would repeat the first.
            break;
        }
        if let Some((product, total)) = best_scoring(products, attempt) {
            if pass > 0 {
                log::debug!(
                    "accessory {:?} {} resolved via size-relaxed pass (score {total})",
                    attempt.kind,
                    attempt.profile
                );
            }
            return Some(product);
        }
    }
    None
}

/// Highest strictly-positive scorer, ties broken by input order.
fn best_scoring<'a>(
    products: &'a [Product],
    want: &AccessoryWant,
) -> Option<(&'a Product, i32)> {
    let mut best: Option<(&Product, i32)> = None;
    for product in products {
        let Some(total) = score_accessory(product, want).total() else {
            continue;
        };
        if total <= 0 {
            continue;
        }
        if best.is_none_or(|(_, top)| total > top) {
            best = Some((product, total));
        }
    }
    best
}

/// Custom-profile wants skip the scored search: pick the best row among
/// `{type: accessory, profile: custom}` records, falling back to the first
/// accessory whose name mentions "custom".
fn resolve_custom<'a>(products: &'a [Product], want: &AccessoryWant) -> Option<&'a Product> {
    let mut best: Option<(&Product, i32)> = None;
    for product in products {
        if !product.is_accessory() || product.profile_field() != "custom" {
            continue;
        }
        let total = score_accessory(product, want).total().unwrap_or(i32::MIN);
        if best.is_none_or(|(_, top)| total > top) {
            best = Some((product, total));
        }
    }
    if let Some((product, _)) = best {
        return Some(product);
    }

    products
        .iter()
        .find(|p| p.is_accessory() && p.name.to_lowercase().contains("custom"))
}

#[must_use]
pub fn find_strip_miter<'a>(
    products: &'a [Product],
    profile: &Profile,
    size: Option<SizeToken>,
) -> Option<&'a Product> {
    resolve_accessory(
        products,
        &AccessoryWant::new(profile.clone(), size, AccessoryKind::StripMiter),
    )
}

#[must_use]
pub fn find_bay_miter<'a>(
    products: &'a [Product],
    profile: &Profile,
    size: Option<SizeToken>,
) -> Option<&'a Product> {
    resolve_accessory(
        products,
        &AccessoryWant::new(profile.clone(), size, AccessoryKind::BayMiter),
    )
}

#[must_use]
pub fn find_custom_miter<'a>(
    products: &'a [Product],
    profile: &Profile,
    size: Option<SizeToken>,
) -> Option<&'a Product> {
    resolve_accessory(
        products,
        &AccessoryWant::new(profile.clone(), size, AccessoryKind::CustomMiter),
    )
}

#[must_use]
pub fn find_end_cap<'a>(
    products: &'a [Product],
    profile: &Profile,
    size: Option<SizeToken>,
) -> Option<&'a Product> {
    resolve_accessory(
        products,
        &AccessoryWant::new(profile.clone(), size, AccessoryKind::EndCap),
    )
}
