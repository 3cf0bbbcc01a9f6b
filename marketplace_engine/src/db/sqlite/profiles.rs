use log::trace;
use mkt_common::Money;
use sqlx::SqliteConnection;

use crate::{db::sqlite::SqliteDatabaseError, db_types::Profile};

pub async fn fetch_profile(profile_id: i64, conn: &mut SqliteConnection) -> Result<Option<Profile>, SqliteDatabaseError> {
    let profile = sqlx::query_as("SELECT * FROM profiles WHERE id = $1").bind(profile_id).fetch_optional(conn).await?;
    Ok(profile)
}

/// Sums the prices of the unpaid jobs on every contract where `client_id` is the client. `None` means there are no
/// unpaid jobs.
pub async fn outstanding_total_for_client(
    client_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Money>, SqliteDatabaseError> {
    let total: Option<i64> = sqlx::query_scalar(
        r#"
        SELECT SUM(jobs.price)
        FROM jobs INNER JOIN contracts ON jobs.contract_id = contracts.id
        WHERE contracts.client_id = $1 AND (jobs.paid IS NULL OR jobs.paid = 0)
        "#,
    )
    .bind(client_id)
    .fetch_one(conn)
    .await?;
    trace!("🧑️ Outstanding total for client #{client_id}: {total:?}");
    Ok(total.map(Money::from_cents))
}

/// Adds `amount` to the balance of the given profile. Returns the updated profile, or `None` if it doesn't exist.
///
/// `UPDATE .. RETURNING` statements in this crate are read with `fetch_all`. `fetch_optional` would stop after the
/// first row and leave the statement pending, which holds back the commit.
pub async fn credit_balance(
    profile_id: i64,
    amount: Money,
    conn: &mut SqliteConnection,
) -> Result<Option<Profile>, SqliteDatabaseError> {
    let profile = sqlx::query_as::<_, Profile>(
        "UPDATE profiles SET balance = balance + $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 RETURNING *",
    )
    .bind(amount)
    .bind(profile_id)
    .fetch_all(conn)
    .await?
    .pop();
    trace!("🧑️ Credited {amount} to profile #{profile_id}");
    Ok(profile)
}

/// Removes `amount` from the balance of the given profile, but only if the balance can cover it.
///
/// Returns the updated profile. If the profile doesn't exist or has insufficient funds, the balance is left untouched
/// and [`SqliteDatabaseError::InsufficientFunds`] is returned.
pub async fn debit_balance(
    profile_id: i64,
    amount: Money,
    conn: &mut SqliteConnection,
) -> Result<Profile, SqliteDatabaseError> {
    let profile = sqlx::query_as::<_, Profile>(
        r#"
        UPDATE profiles SET balance = balance - $1, updated_at = CURRENT_TIMESTAMP
        WHERE id = $2 AND balance >= $1
        RETURNING *
        "#,
    )
    .bind(amount)
    .bind(profile_id)
    .fetch_all(conn)
    .await?
    .pop();
    trace!("🧑️ Debit of {amount} from profile #{profile_id}: {}", if profile.is_some() { "ok" } else { "refused" });
    profile.ok_or(SqliteDatabaseError::InsufficientFunds { profile_id, amount })
}
