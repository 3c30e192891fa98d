/// Database layer for Fenice
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with a startup health check
/// - `migrations`: Embedded schema migrations
/// - `context`: Transaction-scoped authorization context for row-level policies
///
/// Models live in the `models` module at crate root level.

pub mod context;
pub mod migrations;
pub mod pool;
