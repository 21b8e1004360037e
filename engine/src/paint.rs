use serde::Serialize;

use crate::scale::ColorStop;

/// Declarative paint-property value handed to the rendering engine.
///
/// Kept engine-agnostic: a thin adapter compiles these to the target
/// engine's expression language (e.g. MapLibre `case`/`in`/
/// `interpolate` arrays).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaintExpr {
    Color(String),
    Number(f64),
    /// Feature-membership branch: `matched` when the feature's
    /// `property` is one of `members`, `fallback` otherwise.
    Match {
        property: String,
        members: Vec<String>,
        matched: Box<PaintExpr>,
        fallback: Box<PaintExpr>,
    },
    /// Zero carve-out on a numeric property, independent of any
    /// interpolation table.
    IfZero {
        property: String,
        zero: Box<PaintExpr>,
        fallback: Box<PaintExpr>,
    },
    /// Piecewise-linear interpolation of a color over a numeric
    /// property, using the stop table as breakpoints.
    Interpolate {
        property: String,
        stops: Vec<ColorStop>,
    },
}

impl PaintExpr {
    pub fn color(value: impl Into<String>) -> Self {
        Self::Color(value.into())
    }

    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Pixel padding for a camera fit, one value per viewport edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgePadding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl EdgePadding {
    /// Uniform padding on all four edges.
    pub const fn uniform(px: f64) -> Self {
        Self {
            top: px,
            bottom: px,
            left: px,
            right: px,
        }
    }

    /// Uniform padding plus extra room at the bottom for an on-screen
    /// overlay of the given height.
    pub const fn with_overlay(px: f64, overlay_height: f64) -> Self {
        Self {
            top: px,
            bottom: px + overlay_height,
            left: px,
            right: px,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EdgePadding, PaintExpr};

    #[test]
    fn overlay_padding_only_grows_the_bottom_edge() {
        let padding = EdgePadding::with_overlay(50.0, 180.0);
        assert_eq!(padding.top, 50.0);
        assert_eq!(padding.left, 50.0);
        assert_eq!(padding.right, 50.0);
        assert_eq!(padding.bottom, 230.0);
    }

    #[test]
    fn expressions_serialize_under_their_variant_key() {
        let expr = PaintExpr::Match {
            property: "DIVISION_NUM".to_string(),
            members: vec!["0102".to_string()],
            matched: Box::new(PaintExpr::color("#ff474c")),
            fallback: Box::new(PaintExpr::color("#627bc1")),
        };
        let json = serde_json::to_value(&expr).expect("expression should serialize");
        assert_eq!(json["match"]["members"][0], "0102");
        assert_eq!(json["match"]["matched"]["color"], "#ff474c");
    }
}
