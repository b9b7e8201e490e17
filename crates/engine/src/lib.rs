pub mod catalog;
pub mod config;
pub mod driver;
pub mod error;
pub mod event_bus;
pub mod full_dump;
pub mod retry;
pub mod sink;
pub mod source;
