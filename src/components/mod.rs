pub mod badge;
pub mod card;

pub use badge::{area_tag, severity_badge};
pub use card::{card, drop_zone_style, notice_banner};
