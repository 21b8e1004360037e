pub mod config;
pub mod debounce;
pub mod error;
pub mod highlight;
pub mod matcher;
pub mod paint;
pub mod registry;
pub mod scale;
pub mod store;
pub mod surface;
pub mod theme;

pub use debounce::Debouncer;
pub use error::EngineError;
pub use highlight::StyleSync;
pub use paint::{EdgePadding, PaintExpr};
pub use registry::{DivisionFeature, DivisionRegistry, FeatureCollection};
pub use scale::{ColorStop, count_color_stops};
pub use store::{DataSource, DataStore, Dataset};
pub use surface::{MapSurface, ScreenPoint};
