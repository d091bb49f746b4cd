pub mod config;
pub mod data;
pub mod errors;
pub mod map;
pub mod ui;
