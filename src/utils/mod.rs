pub mod formatting;

pub use formatting::{capitalize, human_size, percent};
