//! Aggregate queries over paid jobs.
//!
//! Only jobs flagged as paid count towards a total, and their payment date must fall inside the requested period.
//! Dates are compared with `julianday()`, so that timestamps written in different (but valid) formats still compare
//! correctly. Ties on the total are broken in favour of the lowest profile id.
use log::trace;
use sqlx::SqliteConnection;

use crate::{db::sqlite::SqliteDatabaseError, ClientSpending, ContractorEarnings, DateRange};

pub async fn top_contractors(
    period: DateRange,
    limit: u32,
    conn: &mut SqliteConnection,
) -> Result<Vec<ContractorEarnings>, SqliteDatabaseError> {
    let rows: Vec<ContractorEarnings> = sqlx::query_as(
        r#"
        SELECT profiles.*, SUM(jobs.price) AS total_earned
        FROM jobs
            INNER JOIN contracts ON jobs.contract_id = contracts.id
            INNER JOIN profiles ON contracts.contractor_id = profiles.id
        WHERE jobs.paid = 1
          AND julianday(jobs.payment_date) BETWEEN julianday($1) AND julianday($2)
        GROUP BY profiles.id
        ORDER BY total_earned DESC, profiles.id ASC
        LIMIT $3
        "#,
    )
    .bind(period.start)
    .bind(period.end)
    .bind(i64::from(limit))
    .fetch_all(conn)
    .await?;
    trace!("📊️ {} contractors earned money in {period}", rows.len());
    Ok(rows)
}

pub async fn top_clients(
    period: DateRange,
    limit: u32,
    conn: &mut SqliteConnection,
) -> Result<Vec<ClientSpending>, SqliteDatabaseError> {
    let rows: Vec<ClientSpending> = sqlx::query_as(
        r#"
        SELECT profiles.*, SUM(jobs.price) AS total_paid
        FROM jobs
            INNER JOIN contracts ON jobs.contract_id = contracts.id
            INNER JOIN profiles ON contracts.client_id = profiles.id
        WHERE jobs.paid = 1
          AND julianday(jobs.payment_date) BETWEEN julianday($1) AND julianday($2)
        GROUP BY profiles.id
        ORDER BY total_paid DESC, profiles.id ASC
        LIMIT $3
        "#,
    )
    .bind(period.start)
    .bind(period.end)
    .bind(i64::from(limit))
    .fetch_all(conn)
    .await?;
    trace!("📊️ {} clients paid for jobs in {period}", rows.len());
    Ok(rows)
}
