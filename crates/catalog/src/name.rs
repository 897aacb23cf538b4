use crate::product::Product;
use crate::profile::Profile;
use crate::size::{size_from_name, SizeToken};

/// Accessory category being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessoryKind {
    StripMiter,
    BayMiter,
    CustomMiter,
    EndCap,
}

impl AccessoryKind {
    /// Name substrings that must ALL appear (case-insensitive) in a
    /// candidate's display name. This is a hard filter, never a scored
    /// criterion.
    #[must_use]
    pub fn tokens(self) -> &'static [&'static str] {
        match self {
            Self::StripMiter => &["strip miter", "strip", "miter"],
            Self::BayMiter => &["bay miter", "bay"],
            Self::CustomMiter => &["custom miter", "custom"],
            Self::EndCap => &["end cap", "endcap", "cap"],
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StripMiter => "strip_miter",
            Self::BayMiter => "bay_miter",
            Self::CustomMiter => "custom_miter",
            Self::EndCap => "end_cap",
        }
    }

    /// Human label used in resolved row names.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::StripMiter => "Strip Miter",
            Self::BayMiter => "Bay Miter",
            Self::CustomMiter => "Custom Miter",
            Self::EndCap => "End Cap",
        }
    }
}

/// Case-insensitive substring AND over all tokens.
///
/// Whitespace is normalized out of both sides before comparing, so spelling
/// variants of the same token ("end cap" vs "endcap") agree instead of
/// disqualifying each other. Tokens for distinct kinds stay conjunctive: a
/// bay miter name still lacks "strip" with or without spaces.
#[must_use]
pub fn name_contains_all(name: &str, tokens: &[&str]) -> bool {
    let haystack = squash(name);
    tokens.iter().all(|t| haystack.contains(&squash(t)))
}

fn squash(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// First product (list order is priority) whose lowercased name contains
/// every non-empty part.
#[must_use]
pub fn find_by_name_parts<'a>(products: &'a [Product], parts: &[String]) -> Option<&'a Product> {
    let wanted: Vec<String> = parts
        .iter()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect();
    products.iter().find(|product| {
        let haystack = product.name.to_lowercase();
        wanted.iter().all(|part| haystack.contains(part))
    })
}

/// Typed descriptor extracted from a display name.
///
/// Catalog `profile`/`size` fields are unreliable; this is the structured
/// form of the name-text fallback signals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameDescriptor {
    pub profile: Option<Profile>,
    pub size: Option<SizeToken>,
}

impl NameDescriptor {
    #[must_use]
    pub fn parse(name: &str) -> Self {
        Self {
            profile: Profile::from_name(name),
            size: size_from_name(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn product(name: &str) -> Product {
        Product {
            id: None,
            name: name.to_string(),
            kind_tag: "accessory".to_string(),
            profile: String::new(),
            size: String::new(),
            price: 0.0,
        }
    }

    #[test]
    fn token_filter_is_case_insensitive_and_total() {
        assert!(name_contains_all(
            "5\" K-Style STRIP Miter",
            AccessoryKind::StripMiter.tokens()
        ));
        assert!(!name_contains_all(
            "5\" K-Style Bay Miter",
            AccessoryKind::StripMiter.tokens()
        ));
        assert!(name_contains_all(
            "Box End Cap",
            AccessoryKind::EndCap.tokens()
        ));
    }

    #[test]
    fn end_cap_spelling_variants_all_qualify() {
        // "end cap" and "endcap" are the same token once whitespace is
        // normalized out; neither spelling may disqualify the other.
        assert!(name_contains_all(
            "5\" K-Style End Cap",
            AccessoryKind::EndCap.tokens()
        ));
        assert!(name_contains_all(
            "5\" K-Style Endcap",
            AccessoryKind::EndCap.tokens()
        ));
        // A bare "cap" without the end-cap word still fails the filter.
        assert!(!name_contains_all(
            "5\" Gutter Cap Flashing",
            AccessoryKind::EndCap.tokens()
        ));
    }

    #[test]
    fn name_parts_match_in_list_order() {
        let products = vec![
            product("3x4 Corrugated B Elbow"),
            product("3x4 Corrugated A Elbow"),
            product("2x3 Corrugated A Elbow"),
        ];
        let parts = vec!["3x4".to_string(), "a elbow".to_string()];
        let found = find_by_name_parts(&products, &parts).expect("match");
        assert_eq!(found.name, "3x4 Corrugated A Elbow");
    }

    #[test]
    fn empty_parts_are_skipped() {
        let products = vec![product("4\" Round Offset")];
        let parts = vec![String::new(), "offset".to_string(), "  ".to_string()];
        assert!(find_by_name_parts(&products, &parts).is_some());
    }

    #[test]
    fn parses_name_descriptor() {
        let desc = NameDescriptor::parse("5\" K-Style Strip Miter");
        assert_eq!(desc.profile, Some(Profile::KStyle));
        assert_eq!(desc.size.unwrap().as_str(), "5\"");

        let desc = NameDescriptor::parse("Box End Cap");
        assert_eq!(desc.profile, Some(Profile::Box));
        assert_eq!(desc.size, None);
    }
}
