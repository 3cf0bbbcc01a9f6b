#![allow(dead_code)]
use chrono::{DateTime, Utc};
use log::*;
use marketplace_engine::{
    db_types::{ContractStatus, Money, ProfileType},
    SqliteDatabase,
};
use sqlx::{migrate::MigrateDatabase, Sqlite};

pub fn random_db_path() -> String {
    let dir = std::env::temp_dir();
    format!("sqlite://{}/mkt_test_store_{}.db", dir.display(), rand::random::<u64>())
}

/// Creates a fresh, migrated database at a random location.
pub async fn prepare_test_env() -> SqliteDatabase {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    let url = random_db_path();
    Sqlite::create_database(&url).await.expect("Error creating database");
    debug!("🚀️ Created Sqlite database {url}");
    let db = SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating connection to database");
    db.run_migrations().await.expect("Error running DB migrations");
    db
}

/// A second, independent handle on the same database file, with a single connection. Anything one handle has
/// reported as done must be visible through the other.
pub async fn second_handle(db: &SqliteDatabase) -> SqliteDatabase {
    SqliteDatabase::new_with_url(db.url(), 1).await.expect("Error opening a second handle on the test database")
}

pub async fn tear_down(db: SqliteDatabase) {
    db.close().await;
    if let Err(e) = Sqlite::drop_database(db.url()).await {
        warn!("🚀️ Could not drop test database {}: {e}", db.url());
    }
}

pub async fn seed_profile(
    db: &SqliteDatabase,
    name: (&str, &str),
    profession: &str,
    balance: Money,
    kind: ProfileType,
) -> i64 {
    sqlx::query(
        "INSERT INTO profiles (first_name, last_name, profession, balance, profile_type) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(name.0)
    .bind(name.1)
    .bind(profession)
    .bind(balance)
    .bind(kind)
    .execute(db.pool())
    .await
    .expect("Error inserting profile")
    .last_insert_rowid()
}

pub async fn seed_client(db: &SqliteDatabase, name: (&str, &str), balance: Money) -> i64 {
    seed_profile(db, name, "", balance, ProfileType::Client).await
}

pub async fn seed_contractor(db: &SqliteDatabase, name: (&str, &str), profession: &str) -> i64 {
    seed_profile(db, name, profession, Money::default(), ProfileType::Contractor).await
}

pub async fn seed_contract(db: &SqliteDatabase, client_id: i64, contractor_id: i64, status: ContractStatus) -> i64 {
    sqlx::query("INSERT INTO contracts (terms, status, client_id, contractor_id) VALUES ('bla bla bla', $1, $2, $3)")
        .bind(status)
        .bind(client_id)
        .bind(contractor_id)
        .execute(db.pool())
        .await
        .expect("Error inserting contract")
        .last_insert_rowid()
}

pub async fn seed_job(
    db: &SqliteDatabase,
    contract_id: i64,
    price: Money,
    paid: Option<bool>,
    payment_date: Option<DateTime<Utc>>,
) -> i64 {
    sqlx::query("INSERT INTO jobs (description, price, paid, payment_date, contract_id) VALUES ('work', $1, $2, $3, $4)")
        .bind(price)
        .bind(paid)
        .bind(payment_date)
        .bind(contract_id)
        .execute(db.pool())
        .await
        .expect("Error inserting job")
        .last_insert_rowid()
}

pub async fn seed_unpaid_job(db: &SqliteDatabase, contract_id: i64, price: Money) -> i64 {
    seed_job(db, contract_id, price, None, None).await
}
