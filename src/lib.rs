pub mod display;
pub mod error;
pub mod qtable;
pub mod render;
pub mod tour;

pub use display::{OutputTarget, show_image};
pub use error::QvizError;
pub use qtable::{Grid, StateValue, build_grid, load_qtable, parse_state_key};
pub use render::{Colors, Renderer};
pub use tour::{Square, TourData, hq_output_path};
