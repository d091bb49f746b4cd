pub mod loader;
pub mod markers;
pub mod panel;
pub mod provider;
pub mod token;
