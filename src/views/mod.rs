pub mod results_panel;
pub mod upload_surface;
pub mod wait_indicator;

pub use results_panel::results_panel;
pub use upload_surface::upload_surface;
pub use wait_indicator::{wait_indicator, DEFAULT_WAIT_MESSAGE};
