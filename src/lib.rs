pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod resolver;
pub mod search;
pub mod server;
pub mod state;
