//! Layer ids and paint styling shared by the reset and highlight paths.

use crate::paint::PaintExpr;
use crate::scale::ColorStop;

pub const FILL_LAYER: &str = "divisions-fill";
pub const LINE_LAYER: &str = "divisions-line";
pub const LABEL_LAYER: &str = "divisions-labels";

/// Feature property carrying the compact division identifier.
pub const ID_PROPERTY: &str = "DIVISION_NUM";
/// Feature property carrying the per-division record count.
pub const COUNT_PROPERTY: &str = "count";

pub const DEFAULT_FILL_COLOR: &str = "#627bc1";
pub const DEFAULT_FILL_OPACITY: f64 = 0.2;
pub const DEFAULT_LINE_COLOR: &str = "#627bc1";
pub const DEFAULT_LINE_WIDTH: f64 = 1.5;
pub const DEFAULT_LABEL_COLOR: &str = "#ffffff";
pub const DEFAULT_LABEL_HALO_COLOR: &str = "#ff474c";
pub const DEFAULT_LABEL_HALO_WIDTH: f64 = 2.0;

/// Muted label styling for divisions with nothing to report.
pub const MUTED_LABEL_COLOR: &str = "#9a9a9a";
pub const MUTED_LABEL_HALO_COLOR: &str = "#f3f3f3";

pub const HIGHLIGHT_FILL_COLOR: &str = "#ff474c";
pub const HIGHLIGHT_FILL_OPACITY: f64 = 0.5;
pub const HIGHLIGHT_LINE_COLOR: &str = "#ff474c";
pub const HIGHLIGHT_LINE_WIDTH: f64 = 2.5;
pub const HIGHLIGHT_LABEL_COLOR: &str = "#333333";
pub const HIGHLIGHT_LABEL_HALO_COLOR: &str = "#ffffff";
pub const HIGHLIGHT_LABEL_HALO_WIDTH: f64 = 2.5;

/// Default fill color: the interpolation table once counts have
/// arrived, the flat base color before that.
pub fn default_fill_color(stops: &[ColorStop]) -> PaintExpr {
    if stops.is_empty() {
        PaintExpr::color(DEFAULT_FILL_COLOR)
    } else {
        PaintExpr::Interpolate {
            property: COUNT_PROPERTY.to_string(),
            stops: stops.to_vec(),
        }
    }
}

/// Default label text color: zero-count divisions get the muted style
/// regardless of the interpolation table.
pub fn default_label_color(stops: &[ColorStop]) -> PaintExpr {
    zero_aware(stops, MUTED_LABEL_COLOR, DEFAULT_LABEL_COLOR)
}

pub fn default_label_halo_color(stops: &[ColorStop]) -> PaintExpr {
    zero_aware(stops, MUTED_LABEL_HALO_COLOR, DEFAULT_LABEL_HALO_COLOR)
}

fn zero_aware(stops: &[ColorStop], muted: &str, normal: &str) -> PaintExpr {
    if stops.is_empty() {
        return PaintExpr::color(normal);
    }
    PaintExpr::IfZero {
        property: COUNT_PROPERTY.to_string(),
        zero: Box::new(PaintExpr::color(muted)),
        fallback: Box::new(PaintExpr::color(normal)),
    }
}
