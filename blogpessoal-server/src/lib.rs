//! blogpessoal-server: HTTP backend for a personal blog
//!
//! Exposes postagens and temas as JSON resources over HTTP, backed by
//! PostgreSQL through sqlx.

pub mod db;
pub mod http;
pub mod models;

pub use http::{run_server, ServerConfig};
