pub mod app;
pub mod backend;
pub mod config;
pub mod connectivity;
pub mod history;
pub mod message;
pub mod streaming;
pub mod theme_store;
