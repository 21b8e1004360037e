//! Point-to-division resolution.

use tracing::debug;
use wardmap_shared::{DivisionId, LngLat, point_in_ring};

use crate::registry::DivisionRegistry;
use crate::surface::MapSurface;

/// Exact geometric containment against the registry's rings.
///
/// Linear in divisions × vertices and independent of the current
/// viewport. Returns `None` for points enclosed by no division, e.g.
/// beyond the city limits.
pub fn locate(registry: &DivisionRegistry, point: LngLat) -> Option<DivisionId> {
    registry
        .iter()
        .find(|feature| point_in_ring(point, &feature.ring))
        .map(|feature| feature.id)
}

/// Viewport-dependent hit-test delegated to the rendering engine.
///
/// Projects the coordinate and asks the surface what it renders at
/// that pixel, so the answer varies with zoom and pan (nothing renders
/// below the fill layer's minimum zoom). Use [`locate`] when exact
/// containment is required regardless of camera state.
pub fn locate_rendered<S: MapSurface>(surface: &S, point: LngLat) -> Option<DivisionId> {
    let screen = surface.project(point);
    for raw in surface.rendered_divisions_at(screen) {
        match DivisionId::parse(&raw) {
            Ok(id) => return Some(id),
            Err(e) => debug!(error = %e, "ignoring unparseable rendered feature id"),
        }
    }
    None
}
