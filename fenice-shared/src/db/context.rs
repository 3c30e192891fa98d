/// Transaction-scoped authorization context
///
/// Row-level policies read the acting family's username from the
/// `app.current_family` setting. The setting is applied with
/// `set_config(..., true)`, which scopes it to the current transaction, so
/// every access-controlled operation opens its own transaction through
/// [`begin_as`] and the context can never outlive the call that set it.
///
/// # Example
///
/// ```no_run
/// use fenice_shared::auth::middleware::FamilyContext;
/// use fenice_shared::db::context::begin_as;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, ctx: FamilyContext) -> Result<(), fenice_shared::error::DomainError> {
/// let mut tx = begin_as(&pool, &ctx).await?;
/// sqlx::query("SELECT 1").execute(&mut *tx).await?;
/// tx.commit().await?;
/// # Ok(())
/// # }
/// ```

use sqlx::{PgPool, Postgres, Transaction};
use tracing::error;

use crate::auth::middleware::FamilyContext;
use crate::error::{DomainError, DomainResult};

/// Name of the session setting consumed by row-level policies
pub const CURRENT_FAMILY_SETTING: &str = "app.current_family";

/// Opens a transaction with the acting family's context applied
///
/// # Errors
///
/// - `DomainError::Store` if the transaction cannot be started
/// - `DomainError::ConfigurationFailure` if `set_config` fails
pub async fn begin_as<'p>(
    pool: &'p PgPool,
    ctx: &FamilyContext,
) -> DomainResult<Transaction<'p, Postgres>> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT set_config($1, $2, true)")
        .bind(CURRENT_FAMILY_SETTING)
        .bind(&ctx.username)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!(error = %e, family = %ctx.username, "Failed to apply authorization context");
            DomainError::ConfigurationFailure(e)
        })?;

    Ok(tx)
}
