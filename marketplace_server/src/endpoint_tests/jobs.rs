use actix_web::{http::StatusCode, web, web::ServiceConfig};
use marketplace_engine::{
    db_types::{ContractStatus, Money},
    AccountApi,
    ContractQueryFilter,
    JobApi,
    JobPayment,
    JobQueryFilter,
    MarketplaceError,
};
use mockall::predicate::eq;

use super::{
    helpers::{get_as, post_as, send_request},
    mocks::{contract, job, profiles_backend, MockMarketplace, HARRY, LINUS},
};
use crate::routes::{MyUnpaidJobsRoute, PayForJobRoute};

#[actix_web::test]
async fn list_unpaid_jobs() {
    let mut backend = MockMarketplace::new();
    backend
        .expect_fetch_jobs()
        .with(eq(JobQueryFilter::default().with_party(HARRY).unpaid()))
        .times(1)
        .returning(|_| Ok(vec![job(1, Money::from_units(200), None), job(2, Money::from_units(201), Some(false))]));
    let (status, body) = send_request(get_as("1", "/jobs/unpaid"), configure(backend)).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let jobs = json.as_array().unwrap();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0]["price"], 200);
    assert_eq!(jobs[0]["paid"], serde_json::Value::Null);
    assert_eq!(jobs[1]["paid"], false);
    assert_eq!(jobs[1]["ContractId"], 1);
}

#[actix_web::test]
async fn no_unpaid_jobs() {
    let mut backend = MockMarketplace::new();
    backend.expect_fetch_jobs().returning(|_| Ok(vec![]));
    let (status, body) = send_request(get_as("6", "/jobs/unpaid"), configure(backend)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[actix_web::test]
async fn unpaid_jobs_needs_a_caller() {
    let req = actix_web::test::TestRequest::get().uri("/jobs/unpaid");
    let (status, _) = send_request(req, configure(MockMarketplace::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn pay_for_job() {
    let mut backend = payable_job(Money::from_units(100));
    let payment = JobPayment { job_id: 3, client_id: HARRY, contractor_id: LINUS, amount: Money::from_units(100) };
    backend
        .expect_pay_job()
        .with(eq(payment))
        .times(1)
        .returning(|_| Ok(job(3, Money::from_units(100), Some(true))));
    let (status, body) = send_request(post_as("1", "/jobs/3/pay"), configure(backend)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[actix_web::test]
async fn contractors_cannot_pay() {
    let mut backend = MockMarketplace::new();
    backend.expect_pay_job().never();
    let (status, body) = send_request(post_as("6", "/jobs/3/pay"), configure(backend)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.is_empty());
}

#[actix_web::test]
async fn pay_with_insufficient_funds() {
    // Harry has 1150.25
    let mut backend = payable_job(Money::from_cents(115_026));
    backend.expect_pay_job().never();
    let (status, _) = send_request(post_as("1", "/jobs/3/pay"), configure(backend)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn pay_with_exact_funds() {
    let mut backend = payable_job(Money::from_cents(115_025));
    backend.expect_pay_job().times(1).returning(|_| Ok(job(3, Money::from_cents(115_025), Some(true))));
    let (status, _) = send_request(post_as("1", "/jobs/3/pay"), configure(backend)).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn pay_for_paid_job() {
    let mut backend = MockMarketplace::new();
    backend.expect_fetch_jobs().returning(|_| Ok(vec![job(3, Money::from_units(100), Some(true))]));
    backend.expect_pay_job().never();
    let (status, _) = send_request(post_as("1", "/jobs/3/pay"), configure(backend)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn pay_for_unknown_job() {
    let mut backend = MockMarketplace::new();
    backend
        .expect_fetch_jobs()
        .with(eq(JobQueryFilter::default().with_id(42).with_client(HARRY)))
        .returning(|_| Ok(vec![]));
    backend.expect_pay_job().never();
    let (status, body) = send_request(post_as("1", "/jobs/42/pay"), configure(backend)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[actix_web::test]
async fn pay_loses_a_race() {
    let mut backend = payable_job(Money::from_units(100));
    backend.expect_pay_job().returning(|p| Err(MarketplaceError::JobAlreadyPaid(p.job_id)));
    let (status, _) = send_request(post_as("1", "/jobs/3/pay"), configure(backend)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn payment_transaction_fails() {
    let mut backend = payable_job(Money::from_units(100));
    backend.expect_pay_job().returning(|_| Err(MarketplaceError::PaymentAborted("credit failed".into())));
    let (status, body) = send_request(post_as("1", "/jobs/3/pay"), configure(backend)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.is_empty());
}

#[actix_web::test]
async fn pay_is_post_only() {
    let backend = MockMarketplace::new();
    let (status, _) = send_request(get_as("1", "/jobs/3/pay"), configure(backend)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Job #3, costing `price`, on contract #1 between Harry and Linus.
fn payable_job(price: Money) -> MockMarketplace {
    let mut backend = MockMarketplace::new();
    backend
        .expect_fetch_jobs()
        .with(eq(JobQueryFilter::default().with_id(3).with_client(HARRY)))
        .returning(move |_| Ok(vec![job(3, price, None)]));
    backend
        .expect_fetch_contracts()
        .with(eq(ContractQueryFilter::default().with_id(1)))
        .returning(|_| Ok(vec![contract(1, ContractStatus::InProgress)]));
    backend
}

fn configure(jobs_backend: MockMarketplace) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        cfg.service(MyUnpaidJobsRoute::<MockMarketplace>::new())
            .service(PayForJobRoute::<MockMarketplace>::new())
            .app_data(web::Data::new(AccountApi::new(profiles_backend())))
            .app_data(web::Data::new(JobApi::new(jobs_backend)));
    }
}
