use actix_web::{http::StatusCode, test::TestRequest, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use marketplace_engine::{db_types::Money, ClientSpending, ContractorEarnings, ReportApi};

use super::{
    helpers::send_request,
    mocks::{harry, linus, MockMarketplace, HARRY, JOHN, LINUS},
};
use crate::routes::{BestClientsRoute, BestProfessionRoute};

fn get(path: &str) -> TestRequest {
    TestRequest::get().uri(path)
}

#[actix_web::test]
async fn best_profession() {
    let mut backend = MockMarketplace::new();
    backend
        .expect_fetch_top_contractors()
        .withf(|period, limit| {
            *limit == 1 &&
                period.start == Utc.with_ymd_and_hms(2020, 8, 10, 0, 0, 0).unwrap() &&
                period.end == Utc.with_ymd_and_hms(2020, 8, 15, 23, 59, 59).unwrap() + chrono::Duration::milliseconds(999)
        })
        .times(1)
        .returning(|_, _| Ok(vec![ContractorEarnings { contractor: linus(), total_earned: Money::from_units(2020) }]));
    let (status, body) =
        send_request(get("/admin/best-profession?start=2020-08-10&end=2020-08-15"), configure(backend)).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["totalEarned"], 2020);
    assert_eq!(json["professional"]["id"], LINUS);
    assert_eq!(json["professional"]["profession"], "Programmer");
}

#[actix_web::test]
async fn best_profession_with_timestamps() {
    let mut backend = MockMarketplace::new();
    backend
        .expect_fetch_top_contractors()
        .withf(|period, _| period.start == Utc.with_ymd_and_hms(2020, 8, 10, 8, 0, 0).unwrap())
        .returning(|_, _| Ok(vec![ContractorEarnings { contractor: linus(), total_earned: Money::from_units(1) }]));
    let (status, _) = send_request(
        get("/admin/best-profession?start=2020-08-10T10:00:00%2B02:00&end=2020-08-15T00:00:00Z"),
        configure(backend),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn best_profession_no_matches() {
    let mut backend = MockMarketplace::new();
    backend.expect_fetch_top_contractors().returning(|_, _| Ok(vec![]));
    let (status, body) =
        send_request(get("/admin/best-profession?start=2019-01-01&end=2019-12-31"), configure(backend)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[actix_web::test]
async fn best_profession_bad_dates() {
    for query in ["", "?start=2020-08-10", "?start=yesterday&end=today", "?start=2020-08-16&end=2020-08-15"] {
        let mut backend = MockMarketplace::new();
        backend.expect_fetch_top_contractors().never();
        let (status, body) = send_request(get(&format!("/admin/best-profession{query}")), configure(backend)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "query: {query}");
        assert!(body.is_empty());
    }
}

#[actix_web::test]
async fn best_clients_default_limit() {
    let mut backend = MockMarketplace::new();
    backend.expect_fetch_top_clients().withf(|_, limit| *limit == 2).times(1).returning(|_, _| {
        let mut ash = harry();
        ash.id = JOHN;
        ash.first_name = "Ash".into();
        ash.last_name = "Kethcum".into();
        Ok(vec![
            ClientSpending { client: harry(), total_paid: Money::from_units(2020) },
            ClientSpending { client: ash, total_paid: Money::from_cents(44_250) },
        ])
    });
    let (status, body) =
        send_request(get("/admin/best-clients?start=2020-08-10&end=2020-08-15"), configure(backend)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        format!(r#"[{{"id":{HARRY},"paid":2020,"fullName":"Harry Potter"}},{{"id":{JOHN},"paid":442.5,"fullName":"Ash Kethcum"}}]"#)
    );
}

#[actix_web::test]
async fn best_clients_explicit_limit() {
    let mut backend = MockMarketplace::new();
    backend
        .expect_fetch_top_clients()
        .withf(|_, limit| *limit == 5)
        .returning(|_, _| Ok(vec![ClientSpending { client: harry(), total_paid: Money::from_units(10) }]));
    let (status, _) =
        send_request(get("/admin/best-clients?start=2020-08-10&end=2020-08-15&limit=5"), configure(backend)).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn best_clients_bad_limit() {
    for limit in ["0", "-1", "many"] {
        let mut backend = MockMarketplace::new();
        backend.expect_fetch_top_clients().never();
        let path = format!("/admin/best-clients?start=2020-08-10&end=2020-08-15&limit={limit}");
        let (status, _) = send_request(get(&path), configure(backend)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "limit: {limit}");
    }
}

#[actix_web::test]
async fn best_clients_no_matches() {
    let mut backend = MockMarketplace::new();
    backend.expect_fetch_top_clients().returning(|_, _| Ok(vec![]));
    let (status, _) =
        send_request(get("/admin/best-clients?start=2019-01-01&end=2019-12-31"), configure(backend)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

fn configure(backend: MockMarketplace) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        cfg.service(BestProfessionRoute::<MockMarketplace>::new())
            .service(BestClientsRoute::<MockMarketplace>::new())
            .app_data(web::Data::new(ReportApi::new(backend)));
    }
}
