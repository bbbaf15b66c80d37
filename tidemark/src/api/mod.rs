//! HTTP surface: query, health, and the streaming channel.

pub mod routes;
pub mod server;
pub mod stream;

pub use server::{ApiServer, AppState};
