//! Multi-layer paint-state synchronization for search highlights.

use std::collections::BTreeSet;

use tracing::{debug, info};
use wardmap_shared::DivisionId;

use crate::config::{FIT_MAX_ZOOM, FIT_PADDING_PX};
use crate::paint::{EdgePadding, PaintExpr};
use crate::registry::DivisionRegistry;
use crate::scale::ColorStop;
use crate::surface::MapSurface;
use crate::theme::{
    DEFAULT_FILL_OPACITY, DEFAULT_LABEL_HALO_WIDTH, DEFAULT_LINE_COLOR, DEFAULT_LINE_WIDTH,
    FILL_LAYER, HIGHLIGHT_FILL_COLOR, HIGHLIGHT_FILL_OPACITY, HIGHLIGHT_LABEL_COLOR,
    HIGHLIGHT_LABEL_HALO_COLOR, HIGHLIGHT_LABEL_HALO_WIDTH, HIGHLIGHT_LINE_COLOR,
    HIGHLIGHT_LINE_WIDTH, ID_PROPERTY, LABEL_LAYER, LINE_LAYER, default_fill_color,
    default_label_color, default_label_halo_color,
};

/// Synchronizes fill, outline, and label paint state with the current
/// highlight set.
///
/// [`StyleSync::apply`] is a reset-then-apply sequence with no
/// suspension point, so on an event loop it behaves as one
/// transaction: a feature is either fully highlighted or fully
/// default, never halfway.
#[derive(Debug, Clone, Default)]
pub struct StyleSync {
    stops: Vec<ColorStop>,
}

impl StyleSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the stop table computed from freshly loaded counts.
    /// Until then, resets fall back to the static defaults.
    pub fn set_stops(&mut self, stops: Vec<ColorStop>) {
        self.stops = stops;
    }

    /// Restore every highlight-dependent paint property to its
    /// data-driven default.
    pub fn reset<S: MapSurface>(&self, surface: &mut S) {
        surface.set_paint_property(FILL_LAYER, "fill-color", default_fill_color(&self.stops));
        surface.set_paint_property(
            FILL_LAYER,
            "fill-opacity",
            PaintExpr::number(DEFAULT_FILL_OPACITY),
        );
        surface.set_paint_property(LINE_LAYER, "line-color", PaintExpr::color(DEFAULT_LINE_COLOR));
        surface.set_paint_property(
            LINE_LAYER,
            "line-width",
            PaintExpr::number(DEFAULT_LINE_WIDTH),
        );
        surface.set_paint_property(LABEL_LAYER, "text-color", default_label_color(&self.stops));
        surface.set_paint_property(
            LABEL_LAYER,
            "text-halo-color",
            default_label_halo_color(&self.stops),
        );
        surface.set_paint_property(
            LABEL_LAYER,
            "text-halo-width",
            PaintExpr::number(DEFAULT_LABEL_HALO_WIDTH),
        );
    }

    /// Apply a highlight set and return the compact identifiers that
    /// ended up in the membership filter. Applying the same set twice
    /// leaves the surface in the same state; an empty set is a plain
    /// reset and returns an empty list.
    pub fn apply<S: MapSurface>(&self, surface: &mut S, divisions: &[DivisionId]) -> Vec<String> {
        self.reset(surface);
        if divisions.is_empty() {
            return Vec::new();
        }

        let members: Vec<String> = divisions
            .iter()
            .map(DivisionId::compact)
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();
        info!(matched = members.len(), "highlighting divisions");

        // Every property branches on the same membership predicate so
        // a feature can never be highlighted on one layer and default
        // on another.
        let on_match = |matched: PaintExpr, fallback: PaintExpr| PaintExpr::Match {
            property: ID_PROPERTY.to_string(),
            members: members.clone(),
            matched: Box::new(matched),
            fallback: Box::new(fallback),
        };

        surface.set_paint_property(
            FILL_LAYER,
            "fill-color",
            on_match(
                PaintExpr::color(HIGHLIGHT_FILL_COLOR),
                default_fill_color(&self.stops),
            ),
        );
        surface.set_paint_property(
            FILL_LAYER,
            "fill-opacity",
            on_match(
                PaintExpr::number(HIGHLIGHT_FILL_OPACITY),
                PaintExpr::number(DEFAULT_FILL_OPACITY),
            ),
        );
        surface.set_paint_property(
            LINE_LAYER,
            "line-color",
            on_match(
                PaintExpr::color(HIGHLIGHT_LINE_COLOR),
                PaintExpr::color(DEFAULT_LINE_COLOR),
            ),
        );
        surface.set_paint_property(
            LINE_LAYER,
            "line-width",
            on_match(
                PaintExpr::number(HIGHLIGHT_LINE_WIDTH),
                PaintExpr::number(DEFAULT_LINE_WIDTH),
            ),
        );
        surface.set_paint_property(
            LABEL_LAYER,
            "text-color",
            on_match(
                PaintExpr::color(HIGHLIGHT_LABEL_COLOR),
                default_label_color(&self.stops),
            ),
        );
        surface.set_paint_property(
            LABEL_LAYER,
            "text-halo-color",
            on_match(
                PaintExpr::color(HIGHLIGHT_LABEL_HALO_COLOR),
                default_label_halo_color(&self.stops),
            ),
        );
        surface.set_paint_property(
            LABEL_LAYER,
            "text-halo-width",
            on_match(
                PaintExpr::number(HIGHLIGHT_LABEL_HALO_WIDTH),
                PaintExpr::number(DEFAULT_LABEL_HALO_WIDTH),
            ),
        );

        members
    }

    /// Frame the highlighted divisions, reserving room at the bottom
    /// of the screen for an overlay of `overlay_height` px so the
    /// geometry isn't hidden behind it. No-op when the set is empty or
    /// none of its divisions is registered.
    pub fn fit<S: MapSurface>(
        &self,
        surface: &mut S,
        registry: &DivisionRegistry,
        divisions: &[DivisionId],
        overlay_height: f64,
    ) {
        if divisions.is_empty() {
            return;
        }
        let Some(bounds) = registry.bounds_of(divisions) else {
            debug!("no registered features to fit");
            return;
        };
        surface.fit_bounds(
            bounds,
            EdgePadding::with_overlay(FIT_PADDING_PX, overlay_height),
            FIT_MAX_ZOOM,
        );
    }
}
