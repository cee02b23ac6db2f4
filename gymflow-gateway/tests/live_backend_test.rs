//! Live backend integration tests.
//!
//! These run against a real gym-management backend and are ignored by
//! default:
//!
//! ```bash
//! GYMFLOW_API_BASE_URL=http://localhost:8000/api \
//!     cargo test -p gymflow-gateway --test live_backend_test -- --ignored --nocapture --test-threads=1
//! ```

use gymflow_gateway::{
    GatewayConfig, GatewayError, HttpVisitorGateway, VisitorGateway, VisitorStatus,
};

/// Skips the test when the backend URL is not configured.
macro_rules! skip_if_no_backend {
    () => {
        if std::env::var("GYMFLOW_API_BASE_URL").is_err() {
            eprintln!("skipping test: GYMFLOW_API_BASE_URL not set");
            return;
        }
    };
}

fn live_gateway() -> HttpVisitorGateway {
    let base_url =
        std::env::var("GYMFLOW_API_BASE_URL").expect("GYMFLOW_API_BASE_URL must be set");
    HttpVisitorGateway::new(&GatewayConfig::new(base_url))
}

#[tokio::test]
#[ignore]
async fn live_list_visitors() {
    skip_if_no_backend!();

    let gateway = live_gateway();
    let visitors = gateway.list_visitors().await.expect("list_visitors failed");

    for visitor in &visitors {
        assert!(!visitor.cin.is_empty(), "visitor without CIN");
    }
    println!("list_visitors ok, {} visitors", visitors.len());
}

#[tokio::test]
#[ignore]
async fn live_list_clubs() {
    skip_if_no_backend!();

    let gateway = live_gateway();
    let clubs = gateway.list_clubs().await.expect("list_clubs failed");

    for club in &clubs {
        assert!(!club.name.is_empty(), "club without name");
    }
    println!("list_clubs ok, {} clubs", clubs.len());
}

#[tokio::test]
#[ignore]
async fn live_get_unknown_visitor_is_not_found() {
    skip_if_no_backend!();

    let gateway = live_gateway();
    let result = gateway.get_visitor("ZZ-DOES-NOT-EXIST-99").await;

    assert!(
        matches!(result, Err(GatewayError::VisitorNotFound { .. })),
        "expected VisitorNotFound, got {result:?}"
    );
}

#[tokio::test]
#[ignore]
async fn live_status_round_trip() {
    skip_if_no_backend!();

    let gateway = live_gateway();
    let visitors = gateway.list_visitors().await.expect("list_visitors failed");
    let Some(target) = visitors
        .iter()
        .find(|v| v.status != VisitorStatus::Converted)
    else {
        eprintln!("skipping test: no non-converted visitor available");
        return;
    };

    gateway
        .update_status(&target.cin, target.status)
        .await
        .expect("update_status failed");

    let reloaded = gateway
        .get_visitor(&target.cin)
        .await
        .expect("get_visitor failed");
    assert_eq!(reloaded.status, target.status);
}
