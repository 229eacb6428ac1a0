//! Request payloads with validation at the edge
//!
//! All user input is validated before any store access. A failed
//! validation reports every violated field, not just the first.

pub mod postagem;
pub mod tema;
pub mod validation;

pub use postagem::{NovaPostagem, PostagemPayload};
pub use tema::TemaPayload;
pub use validation::Violation;
