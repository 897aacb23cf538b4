use serde::{Deserialize, Serialize};
use takeoff_catalog::{normalize_size, size_from_name, Product, Profile, SizeToken};

use crate::error::Result;

/// Terminal end-cap quantities for one gutter run. Only presence matters to
/// the tally; magnitudes beyond zero are not summed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EndCaps {
    pub left: f64,
    pub right: f64,
}

/// Geometry attached by the diagram editor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Topology {
    /// Ordered corner angles in degrees.
    pub corners: Vec<f64>,
    pub end_caps: Option<EndCaps>,
}

/// One heterogeneous diagram record: a gutter run, a downspout, or a
/// free-form mark. Legacy documents carry `endCaps`/`angles` at the top
/// level instead of under `topology`; both shapes are honored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagramLine {
    pub is_downspout: bool,
    pub is_gutter: bool,
    pub name: String,
    pub run_feet: f64,
    pub elbow_sequence: String,
    pub downspout_size: String,
    pub downspout_profile: String,
    pub size: String,
    pub profile: String,
    pub current_product: Option<Product>,
    pub topology: Option<Topology>,
    // Legacy field locations.
    pub end_caps: Option<EndCaps>,
    pub angles: Vec<f64>,
}

impl DiagramLine {
    /// Display name, preferring the attached product's name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match &self.current_product {
            Some(product) if !product.name.trim().is_empty() => &product.name,
            _ => &self.name,
        }
    }

    /// A line is a gutter run if flagged as one, named as one, or carrying
    /// measured footage.
    #[must_use]
    pub fn is_gutter_line(&self) -> bool {
        self.is_gutter
            || self.display_name().to_lowercase().contains("gutter")
            || self.run_feet > 0.0
    }

    /// Corner angles, `topology.corners` over the legacy `angles` field.
    #[must_use]
    pub fn corners(&self) -> &[f64] {
        if let Some(topology) = &self.topology {
            if !topology.corners.is_empty() {
                return &topology.corners;
            }
        }
        &self.angles
    }

    /// End caps, `topology.endCaps` over the legacy top-level field.
    #[must_use]
    pub fn end_caps(&self) -> Option<&EndCaps> {
        self.topology
            .as_ref()
            .and_then(|t| t.end_caps.as_ref())
            .or(self.end_caps.as_ref())
    }

    /// Canonical gutter profile. Explicit fields are preferred over name
    /// parsing, but a name-inferred profile always overrides the field; the
    /// name is the higher-trust signal.
    #[must_use]
    pub fn gutter_profile(&self) -> Profile {
        Profile::from_name(self.display_name())
            .unwrap_or_else(|| Profile::normalize(&self.profile))
    }

    /// Normalized gutter size, explicit field first, name text second.
    #[must_use]
    pub fn gutter_size(&self) -> Option<SizeToken> {
        normalize_size(&self.size).or_else(|| size_from_name(self.display_name()))
    }
}

/// Decode diagram lines from the editor's JSON array.
pub fn lines_from_json(json: &str) -> Result<Vec<DiagramLine>> {
    let lines: Vec<DiagramLine> = serde_json::from_str(json)?;
    log::debug!("decoded {} diagram lines", lines.len());
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn classifies_gutter_lines() {
        let flagged = DiagramLine {
            is_gutter: true,
            ..DiagramLine::default()
        };
        assert!(flagged.is_gutter_line());

        let named = DiagramLine {
            name: "5\" K-Style Gutter".to_string(),
            ..DiagramLine::default()
        };
        assert!(named.is_gutter_line());

        let measured = DiagramLine {
            run_feet: 24.0,
            ..DiagramLine::default()
        };
        assert!(measured.is_gutter_line());

        let note = DiagramLine {
            name: "replace fascia board".to_string(),
            ..DiagramLine::default()
        };
        assert!(!note.is_gutter_line());
    }

    #[test]
    fn legacy_geometry_fields_are_honored() {
        let json = r#"[{
            "isGutter": true,
            "endCaps": {"left": 1, "right": 0},
            "angles": [90.0, 135.0]
        }]"#;
        let lines = lines_from_json(json).expect("decode");
        let line = &lines[0];
        assert_eq!(line.corners(), &[90.0, 135.0]);
        assert_eq!(line.end_caps().unwrap().left, 1.0);
    }

    #[test]
    fn topology_wins_over_legacy_fields() {
        let line = DiagramLine {
            topology: Some(Topology {
                corners: vec![90.0],
                end_caps: Some(EndCaps {
                    left: 1.0,
                    right: 1.0,
                }),
            }),
            angles: vec![45.0],
            end_caps: Some(EndCaps {
                left: 0.0,
                right: 0.0,
            }),
            ..DiagramLine::default()
        };
        assert_eq!(line.corners(), &[90.0]);
        assert_eq!(line.end_caps().unwrap().right, 1.0);
    }

    #[test]
    fn name_inferred_profile_overrides_field() {
        let line = DiagramLine {
            name: "5\" Half Round Gutter".to_string(),
            profile: "k-style".to_string(),
            ..DiagramLine::default()
        };
        assert_eq!(line.gutter_profile(), Profile::HalfRound);
        assert_eq!(line.gutter_size().unwrap().as_str(), "5\"");
    }

    #[test]
    fn explicit_size_field_wins_over_name() {
        let line = DiagramLine {
            name: "5\" K-Style Gutter".to_string(),
            size: "6".to_string(),
            ..DiagramLine::default()
        };
        assert_eq!(line.gutter_size().unwrap().as_str(), "6\"");
    }
}
