/// Database models
///
/// Each model exposes static async methods generic over `PgExecutor`, so the
/// same query runs against the pool or inside a context transaction.

pub mod assignment;
pub mod contribution;
pub mod family;
pub mod resource;
