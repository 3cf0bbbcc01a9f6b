use chrono::Utc;
use log::{debug, trace};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::{
    db::sqlite::{profiles, SqliteDatabaseError},
    db_types::Job,
    JobPayment,
    JobQueryFilter,
};

/// Fetches jobs according to the criteria in the `JobQueryFilter`. Jobs are joined with their contract, so that
/// contract-level criteria can be applied.
///
/// Resulting jobs are ordered by id, ascending.
pub async fn fetch_jobs(filter: JobQueryFilter, conn: &mut SqliteConnection) -> Result<Vec<Job>, SqliteDatabaseError> {
    let mut builder =
        QueryBuilder::<Sqlite>::new("SELECT jobs.* FROM jobs INNER JOIN contracts ON jobs.contract_id = contracts.id");
    if !filter.is_empty() {
        builder.push(" WHERE ");
    }
    let mut where_clause = builder.separated(" AND ");
    if let Some(id) = filter.id {
        where_clause.push("jobs.id = ");
        where_clause.push_bind_unseparated(id);
    }
    if let Some(party) = filter.party {
        where_clause.push("(contracts.client_id = ");
        where_clause.push_bind_unseparated(party);
        where_clause.push_unseparated(" OR contracts.contractor_id = ");
        where_clause.push_bind_unseparated(party);
        where_clause.push_unseparated(")");
    }
    if let Some(client_id) = filter.client_id {
        where_clause.push("contracts.client_id = ");
        where_clause.push_bind_unseparated(client_id);
    }
    if filter.unpaid_only {
        where_clause.push("(jobs.paid IS NULL OR jobs.paid = 0)");
    }
    builder.push(" ORDER BY jobs.id ASC");
    trace!("📝️ Executing query: {}", builder.sql());
    let jobs = builder.build_query_as::<Job>().fetch_all(conn).await?;
    trace!("📝️ Result of fetch_jobs: {} jobs", jobs.len());
    Ok(jobs)
}

/// Marks the job as paid, as of now. The update only applies to jobs that are not already paid, so of several
/// concurrent attempts to pay the same job, only the first one to get here will succeed.
pub async fn mark_job_paid(job_id: i64, conn: &mut SqliteConnection) -> Result<Job, SqliteDatabaseError> {
    let job = sqlx::query_as::<_, Job>(
        r#"
        UPDATE jobs SET paid = 1, payment_date = $1, updated_at = CURRENT_TIMESTAMP
        WHERE id = $2 AND (paid IS NULL OR paid = 0)
        RETURNING *
        "#,
    )
    .bind(Utc::now())
    .bind(job_id)
    .fetch_all(conn)
    .await?
    .pop();
    job.ok_or(SqliteDatabaseError::JobAlreadyPaid(job_id))
}

/// Runs the three steps of a job payment on the given connection. This is not atomic on its own: call it with a
/// transaction (`&mut *tx`) and only commit if it succeeds.
pub async fn pay_job(payment: &JobPayment, conn: &mut SqliteConnection) -> Result<Job, SqliteDatabaseError> {
    let JobPayment { job_id, client_id, contractor_id, amount } = *payment;
    let job = mark_job_paid(job_id, &mut *conn).await?;
    trace!("📝️ Job #{job_id} marked as paid");
    profiles::debit_balance(client_id, amount, &mut *conn).await?;
    trace!("📝️ Client #{client_id} debited {amount}");
    profiles::credit_balance(contractor_id, amount, &mut *conn)
        .await?
        .ok_or(SqliteDatabaseError::CreditFailed(contractor_id))?;
    debug!("📝️ Job #{job_id}: {amount} moved from client #{client_id} to contractor #{contractor_id}");
    Ok(job)
}
