//! Request handler definitions
//!
//! Define each route and its handler here. Handlers stay thin: they unpack the request, call one engine API, and turn
//! the result into a response. The rules live in the engine.
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Every database call here is async for that reason.
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use marketplace_engine::{
    db_types::Profile,
    report_objects::DEFAULT_BEST_CLIENTS_LIMIT,
    traits::{ContractManagement, JobManagement, ProfileManagement, ReportManagement},
    AccountApi,
    ContractApi,
    DateRange,
    JobApi,
    ReportApi,
};

use crate::{
    data_objects::{DepositRequest, ReportQueryParams},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:path),+ where requires profile) => {
        paste::paste! { pub struct [<$name:camel Route>]<A>(core::marker::PhantomData<fn() -> A>);}
        paste::paste! { impl<A> [<$name:camel Route>]<A> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> A>)
            }
        }}
        paste::paste! { impl<A> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<A>
        where
            A: $($bounds +)+ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<A>)
                    .wrap($crate::middleware::ProfileResolverFactory::<A>::new());
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:path),+) => {
        paste::paste! { pub struct [<$name:camel Route>]<A>(core::marker::PhantomData<fn() -> A>);}
        paste::paste! { impl<A> [<$name:camel Route>]<A> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> A>)
            }
        }}
        paste::paste! { impl<A> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<A>
        where
            A: $($bounds +)+ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<A>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Contracts  ----------------------------------------------------
route!(contract_by_id => Get "/contracts/{id}" impl ContractManagement, ProfileManagement where requires profile);
/// Returns the contract with the given id, provided the caller is a party to it. Contracts belonging to other people
/// are indistinguishable from contracts that do not exist.
pub async fn contract_by_id<B: ContractManagement>(
    path: web::Path<i64>,
    caller: web::ReqData<Profile>,
    api: web::Data<ContractApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let contract_id = path.into_inner();
    debug!("💻️ GET contract #{contract_id} for profile #{}", caller.id);
    let contract = api
        .contract_for_profile(contract_id, caller.id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound(format!("No contract #{contract_id} for profile #{}", caller.id)))?;
    Ok(HttpResponse::Ok().json(contract))
}

route!(my_contracts => Get "/contracts" impl ContractManagement, ProfileManagement where requires profile);
/// Lists the caller's contracts that have not been terminated.
pub async fn my_contracts<B: ContractManagement>(
    caller: web::ReqData<Profile>,
    api: web::Data<ContractApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET contracts for profile #{}", caller.id);
    let contracts = api.active_contracts_for_profile(caller.id).await?;
    if contracts.is_empty() {
        return Err(ServerError::NoRecordFound(format!("Profile #{} has no active contracts", caller.id)));
    }
    Ok(HttpResponse::Ok().json(contracts))
}

//----------------------------------------------   Jobs  ----------------------------------------------------
route!(my_unpaid_jobs => Get "/jobs/unpaid" impl JobManagement, ContractManagement, ProfileManagement where requires profile);
/// Lists the jobs that have not been paid yet, across every contract the caller is a party to.
pub async fn my_unpaid_jobs<B: JobManagement + ContractManagement>(
    caller: web::ReqData<Profile>,
    api: web::Data<JobApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET unpaid jobs for profile #{}", caller.id);
    let jobs = api.unpaid_jobs_for_profile(caller.id).await?;
    if jobs.is_empty() {
        return Err(ServerError::NoRecordFound(format!("Profile #{} has no unpaid jobs", caller.id)));
    }
    Ok(HttpResponse::Ok().json(jobs))
}

route!(pay_for_job => Post "/jobs/{job_id}/pay" impl JobManagement, ContractManagement, ProfileManagement where requires profile);
/// Pays for a job from the caller's balance. Only the client on the job's contract can pay for it, and only once.
///
/// Success is an empty 200 response.
pub async fn pay_for_job<B: JobManagement + ContractManagement>(
    path: web::Path<i64>,
    caller: web::ReqData<Profile>,
    api: web::Data<JobApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let job_id = path.into_inner();
    debug!("💻️ POST pay for job #{job_id} by profile #{}", caller.id);
    let job = api.pay_for_job(&caller, job_id).await?;
    info!("💻️ Job #{} paid by client #{}", job.id, caller.id);
    Ok(HttpResponse::Ok().finish())
}

//----------------------------------------------   Balances  ----------------------------------------------------
route!(deposit => Post "/balances/deposit/{user_id}" impl ProfileManagement);
/// Deposits money into a client's balance. The amount may not exceed 125% of the total price of the client's unpaid
/// jobs. Returns the updated profile.
pub async fn deposit<B: ProfileManagement>(
    path: web::Path<i64>,
    body: web::Json<DepositRequest>,
    api: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let profile_id = path.into_inner();
    let amount = body.into_inner().amount_to_deposit;
    debug!("💻️ POST deposit of {amount} for profile #{profile_id}");
    let profile = api.deposit(profile_id, amount).await?;
    Ok(HttpResponse::Ok().json(profile))
}

//----------------------------------------------   Admin  ----------------------------------------------------
route!(best_profession => Get "/admin/best-profession" impl ReportManagement);
/// The contractor who earned the most from jobs paid between `start` and `end`, inclusive.
pub async fn best_profession<B: ReportManagement>(
    query: web::Query<ReportQueryParams>,
    api: web::Data<ReportApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let period = DateRange::parse(&query.start, &query.end)?;
    debug!("💻️ GET best profession for {period}");
    let best =
        api.best_profession(period).await?.ok_or_else(|| ServerError::NoRecordFound(format!("No paid jobs in {period}")))?;
    Ok(HttpResponse::Ok().json(best))
}

route!(best_clients => Get "/admin/best-clients" impl ReportManagement);
/// The clients who paid the most for jobs paid between `start` and `end`, inclusive. `limit` defaults to 2.
pub async fn best_clients<B: ReportManagement>(
    query: web::Query<ReportQueryParams>,
    api: web::Data<ReportApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let period = DateRange::parse(&query.start, &query.end)?;
    let limit = query.limit.unwrap_or(DEFAULT_BEST_CLIENTS_LIMIT);
    debug!("💻️ GET best {limit} clients for {period}");
    let clients = api.best_clients(period, limit).await?;
    if clients.is_empty() {
        return Err(ServerError::NoRecordFound(format!("No paid jobs in {period}")));
    }
    Ok(HttpResponse::Ok().json(clients))
}
