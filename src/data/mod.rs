pub mod bus;
pub mod mock;
pub mod notifications;
pub mod routes;
pub mod searches;
