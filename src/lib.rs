pub mod app;
pub mod client;
pub mod components;
pub mod config;
pub mod controller;
pub mod error;
pub mod message;
pub mod model;
pub mod utils;
pub mod views;
