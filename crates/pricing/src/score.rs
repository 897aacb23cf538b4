use takeoff_catalog::{
    name_contains_all, AccessoryKind, NameDescriptor, Product, Profile, SizeToken,
};

/// The query tuple driving accessory resolution. Size may be `None`, which
/// loosens size scoring instead of failing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessoryWant {
    pub profile: Profile,
    pub size: Option<SizeToken>,
    pub kind: AccessoryKind,
}

impl AccessoryWant {
    #[must_use]
    pub fn new(profile: Profile, size: Option<SizeToken>, kind: AccessoryKind) -> Self {
        Self {
            profile,
            size,
            kind,
        }
    }

    /// The same query with size dropped. Profile and kind are never relaxed.
    #[must_use]
    pub fn relaxed(&self) -> Self {
        Self {
            profile: self.profile.clone(),
            size: None,
            kind: self.kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disqualification {
    /// `type` field is not "accessory".
    NotAccessory,
    /// Display name is missing at least one required kind token.
    MissingKindToken,
    /// Name text names a profile that contradicts the wanted one. An
    /// explicit contradicting name beats a matching profile field.
    ProfileContradiction,
}

/// Per-criterion score components, kept separate until summation so tests
/// and debug logs can see why a candidate won or lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub profile: i32,
    pub size: i32,
    pub name_bonus: i32,
    pub disqualified: Option<Disqualification>,
}

impl ScoreBreakdown {
    fn disqualified(reason: Disqualification) -> Self {
        Self {
            profile: 0,
            size: 0,
            name_bonus: 0,
            disqualified: Some(reason),
        }
    }

    /// Summed score, or `None` when the candidate is disqualified.
    #[must_use]
    pub fn total(&self) -> Option<i32> {
        if self.disqualified.is_some() {
            return None;
        }
        Some(self.profile + self.size + self.name_bonus)
    }
}

/// Score one catalog candidate against a want. Higher is better; a
/// disqualified breakdown can never be chosen regardless of components.
#[must_use]
pub fn score_accessory(product: &Product, want: &AccessoryWant) -> ScoreBreakdown {
    if !product.is_accessory() {
        return ScoreBreakdown::disqualified(Disqualification::NotAccessory);
    }
    if !name_contains_all(&product.name, want.kind.tokens()) {
        return ScoreBreakdown::disqualified(Disqualification::MissingKindToken);
    }

    let descriptor = NameDescriptor::parse(&product.name);
    if let Some(inferred) = &descriptor.profile {
        if *inferred != want.profile {
            return ScoreBreakdown::disqualified(Disqualification::ProfileContradiction);
        }
    }

    let profile = if product.profile_field() == want.profile.catalog_field() {
        5
    } else if descriptor.profile.as_ref() == Some(&want.profile) {
        // Field is wrong or missing but the name spells the profile out.
        4
    } else {
        0
    };

    let size = size_score(product, &descriptor, want);

    let name_bonus = if product
        .name
        .to_lowercase()
        .contains(&want.profile.display_words())
    {
        1
    } else {
        0
    };

    ScoreBreakdown {
        profile,
        size,
        name_bonus,
        disqualified: None,
    }
}

fn size_score(product: &Product, descriptor: &NameDescriptor, want: &AccessoryWant) -> i32 {
    let product_size = product.size_token();
    match (&want.size, &product_size) {
        (Some(wanted), Some(found)) => {
            if wanted == found {
                3
            } else {
                // Penalty, not disqualification: an off-size row can still
                // win when nothing better exists.
                -1
            }
        }
        (_, None) => match (&want.size, &descriptor.size) {
            (Some(wanted), Some(from_name)) => {
                if wanted == from_name {
                    2
                } else {
                    -1
                }
            }
            // Nothing to compare on one side or the other.
            _ => 1,
        },
        (None, Some(_)) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn accessory(name: &str, profile: &str, size: &str) -> Product {
        Product {
            id: None,
            name: name.to_string(),
            kind_tag: "accessory".to_string(),
            profile: profile.to_string(),
            size: size.to_string(),
            price: 10.0,
        }
    }

    fn want(profile: Profile, size: Option<&str>, kind: AccessoryKind) -> AccessoryWant {
        AccessoryWant::new(
            profile,
            size.and_then(takeoff_catalog::normalize_size),
            kind,
        )
    }

    #[test]
    fn non_accessory_is_disqualified() {
        let mut product = accessory("5\" K-Style Strip Miter", "k-style", "5");
        product.kind_tag = "gutter".to_string();
        let breakdown = score_accessory(
            &product,
            &want(Profile::KStyle, Some("5"), AccessoryKind::StripMiter),
        );
        assert_eq!(
            breakdown.disqualified,
            Some(Disqualification::NotAccessory)
        );
        assert_eq!(breakdown.total(), None);
    }

    #[test]
    fn missing_kind_token_is_disqualified() {
        let product = accessory("5\" K-Style Bay Miter", "k-style", "5");
        let breakdown = score_accessory(
            &product,
            &want(Profile::KStyle, Some("5"), AccessoryKind::StripMiter),
        );
        assert_eq!(
            breakdown.disqualified,
            Some(Disqualification::MissingKindToken)
        );
    }

    #[test]
    fn contradicting_name_beats_matching_field() {
        // Field says k-style, name says half round. The explicit name wins
        // and the row is disqualified for a k-style want.
        let product = accessory("5\" Half Round End Cap", "k-style", "5");
        let breakdown = score_accessory(
            &product,
            &want(Profile::KStyle, Some("5"), AccessoryKind::EndCap),
        );
        assert_eq!(
            breakdown.disqualified,
            Some(Disqualification::ProfileContradiction)
        );
    }

    #[test]
    fn field_match_scores_five_plus_size_and_bonus() {
        let product = accessory("5\" K-Style End Cap", "k-style", "5");
        let breakdown = score_accessory(
            &product,
            &want(Profile::KStyle, Some("5"), AccessoryKind::EndCap),
        );
        assert_eq!(breakdown.profile, 5);
        assert_eq!(breakdown.size, 3);
        assert_eq!(breakdown.name_bonus, 1);
        assert_eq!(breakdown.total(), Some(9));
    }

    #[test]
    fn name_inferred_profile_scores_four_when_field_is_wrong() {
        let product = accessory("5\" K-Style End Cap", "", "5");
        let breakdown = score_accessory(
            &product,
            &want(Profile::KStyle, Some("5"), AccessoryKind::EndCap),
        );
        assert_eq!(breakdown.profile, 4);
    }

    #[test]
    fn half_round_want_matches_round_catalog_field() {
        let product = accessory("5\" Half Round End Cap", "round", "5");
        let breakdown = score_accessory(
            &product,
            &want(Profile::HalfRound, Some("5"), AccessoryKind::EndCap),
        );
        assert_eq!(breakdown.profile, 5);
        assert_eq!(breakdown.name_bonus, 1);
    }

    #[test]
    fn sizeless_product_falls_back_to_name_size() {
        let product = accessory("5\" K-Style End Cap", "k-style", "");
        let breakdown = score_accessory(
            &product,
            &want(Profile::KStyle, Some("5"), AccessoryKind::EndCap),
        );
        assert_eq!(breakdown.size, 2);

        let breakdown = score_accessory(
            &product,
            &want(Profile::KStyle, Some("6"), AccessoryKind::EndCap),
        );
        assert_eq!(breakdown.size, -1);
    }

    #[test]
    fn incomparable_sizes_score_one() {
        // No size anywhere.
        let product = accessory("Box End Cap", "box", "");
        let breakdown = score_accessory(
            &product,
            &want(Profile::Box, Some("5"), AccessoryKind::EndCap),
        );
        assert_eq!(breakdown.size, 1);

        // Relaxed want against a sized product.
        let product = accessory("5\" K-Style End Cap", "k-style", "5");
        let breakdown = score_accessory(
            &product,
            &want(Profile::KStyle, None, AccessoryKind::EndCap),
        );
        assert_eq!(breakdown.size, 1);
    }

    #[test]
    fn size_mismatch_penalizes_without_disqualifying() {
        let product = accessory("6\" K-Style End Cap", "k-style", "6");
        let breakdown = score_accessory(
            &product,
            &want(Profile::KStyle, Some("5"), AccessoryKind::EndCap),
        );
        assert_eq!(breakdown.size, -1);
        assert!(breakdown.total().is_some_and(|t| t > 0));
    }
}
