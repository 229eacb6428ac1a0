//! Database layer - connection pool, migrations and repositories
//!
//! # Design Principles
//!
//! - Connection pool with bounded connections - no Arc<Mutex<Connection>>
//! - Reads return the full wire shape via JOINs - no N+1 queries
//! - Transactions for multi-step operations (tema cascade delete)

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::create_pool;
pub use repos::*;
