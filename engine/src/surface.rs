use wardmap_shared::{Bounds, LngLat};

use crate::paint::{EdgePadding, PaintExpr};
use crate::registry::FeatureCollection;

/// Screen-space pixel position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// The narrow rendering-engine interface the core drives.
///
/// An adapter translates these calls (and the [`PaintExpr`] values) to
/// a concrete engine's API. Everything here is synchronous from the
/// core's perspective; style and tile readiness are the adapter's
/// concern.
pub trait MapSurface {
    /// Replace the division source data wholesale.
    fn set_division_data(&mut self, collection: &FeatureCollection);

    /// Set one paint property on one layer.
    fn set_paint_property(&mut self, layer: &str, property: &str, value: PaintExpr);

    /// Project a geographic coordinate into the current viewport.
    fn project(&self, point: LngLat) -> ScreenPoint;

    /// Compact identifiers of the division features rendered at a
    /// pixel, topmost first. Empty when nothing is rendered there
    /// (below the layer's minimum zoom, or outside every polygon).
    fn rendered_divisions_at(&self, point: ScreenPoint) -> Vec<String>;

    /// Move the camera to frame `bounds` with the given padding,
    /// zooming in no further than `max_zoom`.
    fn fit_bounds(&mut self, bounds: Bounds, padding: EdgePadding, max_zoom: f64);
}
