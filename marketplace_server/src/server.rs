use std::time::Duration;

use actix_web::{
    dev::Server,
    error::{JsonPayloadError, PathError, QueryPayloadError},
    http::KeepAlive,
    middleware::{Logger, NormalizePath},
    web,
    web::ServiceConfig,
    App,
    HttpRequest,
    HttpServer,
};
use log::info;
use marketplace_engine::{AccountApi, ContractApi, JobApi, ReportApi, SqliteDatabase};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    routes::{
        health,
        BestClientsRoute,
        BestProfessionRoute,
        ContractByIdRoute,
        DepositRoute,
        MyContractsRoute,
        MyUnpaidJobsRoute,
        PayForJobRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = connect_database(&config).await?;
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

async fn connect_database(config: &ServerConfig) -> Result<SqliteDatabase, ServerError> {
    let url = config.database_url.as_str();
    let db = if config.run_migrations {
        let db = SqliteDatabase::create_with_url(url, config.max_connections)
            .await
            .map_err(|e| ServerError::InitializeError(e.to_string()))?;
        db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
        db
    } else {
        SqliteDatabase::new_with_url(url, config.max_connections)
            .await
            .map_err(|e| ServerError::InitializeError(e.to_string()))?
    };
    info!("🚀️ Connected to database at {url}");
    Ok(db)
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let accounts_api = AccountApi::new(db.clone());
        let contracts_api = ContractApi::new(db.clone());
        let jobs_api = JobApi::new(db.clone());
        let reports_api = ReportApi::new(db.clone());
        App::new()
            .wrap(NormalizePath::trim())
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("mkt::access_log"))
            .app_data(web::Data::new(accounts_api))
            .app_data(web::Data::new(contracts_api))
            .app_data(web::Data::new(jobs_api))
            .app_data(web::Data::new(reports_api))
            .configure(request_configs)
            .service(health)
            .service(ContractByIdRoute::<SqliteDatabase>::new())
            .service(MyContractsRoute::<SqliteDatabase>::new())
            .service(MyUnpaidJobsRoute::<SqliteDatabase>::new())
            .service(PayForJobRoute::<SqliteDatabase>::new())
            .service(DepositRoute::<SqliteDatabase>::new())
            .service(BestProfessionRoute::<SqliteDatabase>::new())
            .service(BestClientsRoute::<SqliteDatabase>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Extractor configuration shared by every route: malformed paths, query strings and bodies are all reported as
/// 400 Bad Request with an empty body.
pub fn request_configs(cfg: &mut ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(path_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::JsonConfig::default().error_handler(json_error));
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    ServerError::InvalidRequestPath(err.to_string()).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ServerError::InvalidQuery(err.to_string()).into()
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ServerError::InvalidRequestBody(err.to_string()).into()
}
