use std::fmt;

/// Canonical line-side gutter profile.
///
/// The catalog encodes half-round rows as `"round"`; that conversion is
/// one-directional and lives in [`Profile::catalog_field`]. Line-side keys
/// are never run through it twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Profile {
    KStyle,
    HalfRound,
    StraightFace,
    Box,
    Custom,
    /// Unrecognized profile text, kept lowercased so identical unknown
    /// profiles still compare equal.
    Other(String),
}

impl Profile {
    /// Canonicalize free-text profile input.
    ///
    /// Substring tests run in a fixed priority order; "half round" must be
    /// claimed before the bare "round" rule. The ordering is a contract for
    /// future profile names even where two rules currently agree.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let s = raw.trim().to_lowercase();
        if s.contains("half") {
            return Self::HalfRound;
        }
        if s.contains("straight") {
            return Self::StraightFace;
        }
        if s.contains("k-") || s.contains("k style") || s.contains("kstyle") {
            return Self::KStyle;
        }
        if s.contains("box") {
            return Self::Box;
        }
        if s.contains("round") {
            return Self::HalfRound;
        }
        if s.contains("custom") || s.is_empty() {
            return Self::Custom;
        }
        Self::Other(s)
    }

    /// The canonical line-side key.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::KStyle => "k-style",
            Self::HalfRound => "half-round",
            Self::StraightFace => "straight-face",
            Self::Box => "box",
            Self::Custom => "custom",
            Self::Other(s) => s,
        }
    }

    /// The value the catalog's `profile` field carries for this profile.
    ///
    /// Half-round maps to "round"; everything else is identity. Apply this
    /// only when comparing against a catalog field, never to another
    /// line-side key.
    #[must_use]
    pub fn catalog_field(&self) -> &str {
        match self {
            Self::HalfRound => "round",
            other => other.key(),
        }
    }

    /// Infer a profile from free display-name text.
    ///
    /// Name text outranks the structured `profile` field when it carries an
    /// explicit profile word, because catalog fields are unreliable. Bare
    /// "round" is treated as the half-round family.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let s = name.to_lowercase();
        if s.contains("straight face") {
            return Some(Self::StraightFace);
        }
        if s.contains("k-style") || s.contains("k style") {
            return Some(Self::KStyle);
        }
        if s.contains("half round") || s.contains("half-round") {
            return Some(Self::HalfRound);
        }
        if s.starts_with("box ") || s.contains(" box ") {
            return Some(Self::Box);
        }
        if s.contains("custom") {
            return Some(Self::Custom);
        }
        if s.contains("round") {
            return Some(Self::HalfRound);
        }
        None
    }

    /// Canonical profile words with hyphens as spaces, for literal
    /// name-substring bonuses and display labels.
    #[must_use]
    pub fn display_words(&self) -> String {
        self.key().replace('-', " ")
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
