use once_cell::sync::Lazy;
use regex::Regex;
use takeoff_catalog::{find_by_name_parts, Product};

use crate::item::{LineItemMeta, ResolvedLineItem};
use crate::line::DiagramLine;

static RECT_SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*[x×]\s*(\d+)").expect("rect size regex"));

static ROUND_SIZE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(\d+)\s*""#).expect("round size regex"));

/// Downspout elbow bend type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElbowLetter {
    A,
    B,
    C,
}

impl ElbowLetter {
    pub const ALL: [Self; 3] = [Self::A, Self::B, Self::C];

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
        }
    }
}

/// Elbow counts per letter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElbowTally {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl ElbowTally {
    #[must_use]
    pub fn count(&self, letter: ElbowLetter) -> u32 {
        match letter {
            ElbowLetter::A => self.a,
            ElbowLetter::B => self.b,
            ElbowLetter::C => self.c,
        }
    }
}

/// Parsed form of a compact elbow/offset code string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElbowSequence {
    pub elbows: ElbowTally,
    pub offsets: Vec<u32>,
}

/// Scan a compact code like `"aabba246"`: elbow letters a/b/c (any case,
/// repeatable) bump the matching counter, single decimal digits append an
/// offset inch value, and anything else is dropped.
///
/// The silent drop is long-standing tolerance in the estimate flow; a warn
/// log makes it observable without changing the output.
#[must_use]
pub fn parse_elbow_sequence(seq: &str) -> ElbowSequence {
    let mut parsed = ElbowSequence::default();
    let mut dropped = 0usize;
    for c in seq.trim().chars() {
        match c.to_ascii_lowercase() {
            'a' => parsed.elbows.a += 1,
            'b' => parsed.elbows.b += 1,
            'c' => parsed.elbows.c += 1,
            d if d.is_ascii_digit() => {
                parsed.offsets.push(d.to_digit(10).unwrap_or(0));
            }
            _ => dropped += 1,
        }
    }
    if dropped > 0 {
        log::warn!("elbow sequence {seq:?}: dropped {dropped} unrecognized character(s)");
    }
    parsed
}

/// Downspout material family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownspoutProfile {
    Corrugated,
    Smooth,
    Round,
    Box,
    Other(String),
}

impl DownspoutProfile {
    /// Human label, also the word catalog names carry.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Corrugated => "Corrugated",
            Self::Smooth => "Smooth",
            Self::Round => "Round",
            Self::Box => "Box",
            Self::Other(s) => s,
        }
    }

    fn from_text(text: &str) -> Self {
        let t = text.trim().to_lowercase();
        if t.contains("corrugated") {
            Self::Corrugated
        } else if t.contains("smooth") {
            Self::Smooth
        } else if t.contains("round") {
            Self::Round
        } else if t.contains("box") {
            Self::Box
        } else {
            Self::Other(text.trim().to_string())
        }
    }
}

/// Resolved downspout styling for one line: material family plus the size
/// label its catalog rows carry (`3x4`, `3"`, or none for box).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownspoutStyle {
    pub profile: DownspoutProfile,
    pub size_label: Option<String>,
}

impl DownspoutStyle {
    /// Derive the style from a line, preferring explicit fields and falling
    /// back to the attached product's display name. Rectangular sizes are
    /// `NxM` (x or ×), round sizes end in an inch mark, and a literal "box"
    /// anywhere in the combined text wins the profile.
    #[must_use]
    pub fn infer(line: &DiagramLine) -> Self {
        let size_text = first_non_empty(&[&line.downspout_size, &line.size]);
        let profile_text = first_non_empty(&[&line.downspout_profile, &line.profile]);
        let combined = format!("{} {}", line.display_name(), size_text).to_lowercase();

        // Explicit size fields outrank any size embedded in the attached
        // product's name; the name is parsed only when the fields yield
        // nothing.
        let detected = detect_size(size_text).or_else(|| detect_size(line.display_name()));
        let (size_label, round_size) = match detected {
            Some((label, round)) => (Some(label), round),
            None => (None, false),
        };

        let profile = if !profile_text.is_empty() {
            DownspoutProfile::from_text(profile_text)
        } else if combined.contains("box") {
            DownspoutProfile::Box
        } else if round_size {
            DownspoutProfile::Round
        } else {
            DownspoutProfile::Corrugated
        };

        Self {
            profile,
            size_label,
        }
    }

    /// Display string for the style, e.g. `2x3 Corrugated`, `3" Round`, or
    /// `Box`. Falls back to the literal `Downspout` when no size is known.
    #[must_use]
    pub fn label(&self) -> String {
        if self.profile == DownspoutProfile::Box {
            return "Box".to_string();
        }
        match &self.size_label {
            Some(size) => format!("{size} {}", self.profile.label()),
            None => "Downspout".to_string(),
        }
    }

    fn profile_part(&self) -> String {
        self.profile.label().to_lowercase()
    }
}

/// Locate the catalog elbow row for a style and letter. Round rows omit the
/// letter from their names; box rows omit the size.
#[must_use]
pub fn find_elbow_product<'a>(
    products: &'a [Product],
    style: &DownspoutStyle,
    letter: ElbowLetter,
) -> Option<&'a Product> {
    let letter_part = format!("{} elbow", letter.as_char().to_ascii_lowercase());
    let parts = match style.profile {
        DownspoutProfile::Round => vec![
            style.size_label.clone().unwrap_or_default(),
            "round".to_string(),
            "elbow".to_string(),
        ],
        DownspoutProfile::Box => vec!["box".to_string(), letter_part],
        _ => vec![
            style.size_label.clone().unwrap_or_default(),
            style.profile_part(),
            letter_part,
        ],
    };
    find_by_name_parts(products, &parts)
}

/// Locate the catalog offset row for a style and inch length.
#[must_use]
pub fn find_offset_product<'a>(
    products: &'a [Product],
    style: &DownspoutStyle,
    inches: u32,
) -> Option<&'a Product> {
    let offset_part = format!("{inches}\" offset");
    let parts = match style.profile {
        DownspoutProfile::Round => vec![
            style.size_label.clone().unwrap_or_default(),
            "round".to_string(),
            offset_part,
        ],
        DownspoutProfile::Box => vec!["box".to_string(), offset_part],
        _ => vec![
            style.size_label.clone().unwrap_or_default(),
            style.profile_part(),
            offset_part,
        ],
    };
    find_by_name_parts(products, &parts)
}

/// Resolve all elbow and offset rows for one downspout line.
///
/// At most one row per non-zero elbow letter (A, B, C order) and one per
/// distinct offset inch value. A fitting with no catalog coverage is skipped
/// rather than failing the computation; the estimate undercounts instead.
#[must_use]
pub fn fittings_from_downspout_line(
    line: &DiagramLine,
    products: &[Product],
) -> Vec<ResolvedLineItem> {
    if !line.is_downspout || line.elbow_sequence.trim().is_empty() {
        return Vec::new();
    }

    let parsed = parse_elbow_sequence(&line.elbow_sequence);
    let style = DownspoutStyle::infer(line);
    let mut items = Vec::new();

    for letter in ElbowLetter::ALL {
        let quantity = parsed.elbows.count(letter);
        if quantity == 0 {
            continue;
        }
        match find_elbow_product(products, &style, letter) {
            Some(product) => items.push(ResolvedLineItem {
                name: product.name.clone(),
                quantity,
                price: product.price,
                product: product.clone(),
                meta: LineItemMeta {
                    kind: "elbow".to_string(),
                    profile: Some(style.profile.label().to_string()),
                    size: style.size_label.clone(),
                    letter: Some(letter.as_char()),
                    inches: None,
                    degrees: None,
                },
            }),
            None => log::debug!(
                "no catalog row for {} {} elbow; skipping",
                style.label(),
                letter.as_char()
            ),
        }
    }

    // Offsets grouped by inch value, first-encounter order.
    let mut grouped: Vec<(u32, u32)> = Vec::new();
    for &inches in &parsed.offsets {
        if let Some(entry) = grouped.iter_mut().find(|(i, _)| *i == inches) {
            entry.1 += 1;
        } else {
            grouped.push((inches, 1));
        }
    }
    for (inches, quantity) in grouped {
        match find_offset_product(products, &style, inches) {
            Some(product) => items.push(ResolvedLineItem {
                name: product.name.clone(),
                quantity,
                price: product.price,
                product: product.clone(),
                meta: LineItemMeta {
                    kind: "offset".to_string(),
                    profile: Some(style.profile.label().to_string()),
                    size: style.size_label.clone(),
                    letter: None,
                    inches: Some(inches),
                    degrees: None,
                },
            }),
            None => log::debug!(
                "no catalog row for {} {inches}\" offset; skipping",
                style.label()
            ),
        }
    }

    items
}

/// Pull a size label out of one piece of text: `NxM` rectangular first,
/// then a round inch size. The flag reports the round form.
fn detect_size(text: &str) -> Option<(String, bool)> {
    let t = text.to_lowercase();
    if let Some(caps) = RECT_SIZE.captures(&t) {
        return Some((format!("{}x{}", &caps[1], &caps[2]), false));
    }
    if let Some(caps) = ROUND_SIZE.captures(&t) {
        return Some((format!("{}\"", &caps[1]), true));
    }
    None
}

fn first_non_empty<'a>(candidates: &[&'a str]) -> &'a str {
    candidates
        .iter()
        .map(|c| c.trim())
        .find(|c| !c.is_empty())
        .unwrap_or("")
}
