pub mod app;
pub mod header;
pub mod map;
pub mod plugins;
pub mod provider;
pub mod routes;
pub mod search;
pub mod tracking;
pub mod windows;
