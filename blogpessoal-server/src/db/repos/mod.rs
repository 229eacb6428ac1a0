//! Repository implementations for database access
//!
//! Narrow, per-entity repositories: one struct per table, each method a
//! single statement except the tema cascade delete, which runs in a
//! transaction.

pub mod postagens;
pub mod temas;

pub use postagens::{Postagem, PostagemRepo, Usuario};
pub use temas::{Tema, TemaRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: i64 },
}
