pub mod division;
pub mod geometry;
pub mod record;

pub use division::{DivisionId, MalformedDivision, compact_form, hyphenated_form};
pub use geometry::{Bounds, LngLat, point_in_ring};
pub use record::{BallotRecord, divisions_of};
