use log::trace;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::{db::sqlite::SqliteDatabaseError, db_types::Contract, ContractQueryFilter};

/// Fetches contracts according to the criteria in the `ContractQueryFilter`.
///
/// Resulting contracts are ordered by id, ascending.
pub async fn fetch_contracts(
    filter: ContractQueryFilter,
    conn: &mut SqliteConnection,
) -> Result<Vec<Contract>, SqliteDatabaseError> {
    let mut builder = QueryBuilder::<Sqlite>::new("SELECT * FROM contracts");
    if !filter.is_empty() {
        builder.push(" WHERE ");
    }
    let mut where_clause = builder.separated(" AND ");
    if let Some(id) = filter.id {
        where_clause.push("id = ");
        where_clause.push_bind_unseparated(id);
    }
    if let Some(party) = filter.party {
        where_clause.push("(client_id = ");
        where_clause.push_bind_unseparated(party);
        where_clause.push_unseparated(" OR contractor_id = ");
        where_clause.push_bind_unseparated(party);
        where_clause.push_unseparated(")");
    }
    for status in filter.excluded_statuses {
        where_clause.push("status <> ");
        where_clause.push_bind_unseparated(status.to_string());
    }
    builder.push(" ORDER BY id ASC");
    trace!("📝️ Executing query: {}", builder.sql());
    let contracts = builder.build_query_as::<Contract>().fetch_all(conn).await?;
    trace!("📝️ Result of fetch_contracts: {} contracts", contracts.len());
    Ok(contracts)
}
