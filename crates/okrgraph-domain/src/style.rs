//! Edge style mapping for relation graphs
//!
//! Pure lookup from relation type and weight to the visual encoding the
//! presentation layer draws an edge with. Never fails: unknown type names get
//! the neutral style.

use crate::RelationType;

/// Neutral gray used for unrecognized relation types
pub const NEUTRAL_GRAY: &str = "#9e9e9e";

/// Maximum edge thickness (weight 1.0)
pub const MAX_THICKNESS: u8 = 3;

/// Stroke pattern of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LineStyle {
    /// Continuous stroke
    Solid,
    /// Long dashes
    Dashed,
    /// Dots
    Dotted,
}

impl LineStyle {
    /// Get the style name
    pub fn as_str(&self) -> &'static str {
        match self {
            LineStyle::Solid => "solid",
            LineStyle::Dashed => "dashed",
            LineStyle::Dotted => "dotted",
        }
    }
}

/// Visual encoding of one edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EdgeStyle {
    /// Stroke color as a hex string
    pub color: &'static str,

    /// Stroke pattern
    pub line_style: LineStyle,

    /// Stroke width, 1..=3
    pub thickness: u8,
}

/// Style for a known relation type
///
/// # Examples
///
/// ```
/// use okrgraph_domain::{style_for, LineStyle, RelationType};
///
/// let style = style_for(RelationType::ContributesTo, 0.6);
/// assert_eq!(style.thickness, 2);
/// assert_eq!(style.line_style, LineStyle::Solid);
/// ```
pub fn style_for(relation_type: RelationType, weight: f64) -> EdgeStyle {
    let (color, line_style) = match relation_type {
        RelationType::ContributesTo => ("#2e7d32", LineStyle::Solid),
        RelationType::DependsOn => ("#ef6c00", LineStyle::Dashed),
        RelationType::AlignedWith => ("#1565c0", LineStyle::Solid),
        RelationType::Blocks => ("#c62828", LineStyle::Dashed),
        RelationType::Follows => ("#6a1b9a", LineStyle::Dotted),
    };

    EdgeStyle {
        color,
        line_style,
        thickness: thickness_for(weight),
    }
}

/// Style for a relation type given by name; unknown names get neutral gray
pub fn style_for_name(relation_type: &str, weight: f64) -> EdgeStyle {
    match RelationType::parse(relation_type) {
        Some(relation_type) => style_for(relation_type, weight),
        None => EdgeStyle {
            color: NEUTRAL_GRAY,
            line_style: LineStyle::Solid,
            thickness: thickness_for(weight),
        },
    }
}

/// `max(1, round(weight * 3))` with the weight clamped to [0, 1]
fn thickness_for(weight: f64) -> u8 {
    if weight.is_nan() {
        return 1;
    }
    let scaled = (weight.clamp(0.0, 1.0) * f64::from(MAX_THICKNESS)).round() as u8;
    scaled.max(1)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the mapping is deterministic
        #[test]
        fn test_style_deterministic(index in 0usize..5, weight in 0.0f64..=1.0) {
            let relation_type = RelationType::ALL[index];
            prop_assert_eq!(style_for(relation_type, weight), style_for(relation_type, weight));
        }

        /// Property: thickness is always a drawable width
        #[test]
        fn test_thickness_bounded(weight: f64) {
            let style = style_for_name("contribuye_a", weight);
            prop_assert!(style.thickness >= 1 && style.thickness <= MAX_THICKNESS);
        }
    }
}
