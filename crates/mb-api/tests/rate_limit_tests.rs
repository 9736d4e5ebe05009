use axum::http::StatusCode;
use mb_api::{
    middleware::rate_limit::{AUTH_BURST_SIZE, GENERAL_BURST_SIZE},
    router,
};
use serde_json::json;

use crate::common::{TestClient, TestStateBuilder, TestUser, test_data::unique_email};

#[tokio::test]
async fn test_login_burst_is_limited() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    let client = TestClient::new(router::router().with_state(state)).with_client_ip("10.1.0.1");

    let body = json!({ "email": unique_email("limited"), "password": "password123" });

    let mut statuses = Vec::new();
    for _ in 0..AUTH_BURST_SIZE + 5 {
        statuses.push(client.post_json("/auth/login", &body).await.status);
    }

    assert!(
        statuses.contains(&StatusCode::TOO_MANY_REQUESTS),
        "Expected some requests to be rate limited, got {statuses:?}"
    );
    // The first request is always within the burst
    assert_eq!(statuses[0], StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_clients_are_limited_independently() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    let user = TestUser::create(&state, "limit_split").await;
    let app = router::router().with_state(state.clone());

    let noisy = TestClient::new(app.clone()).with_client_ip("10.2.0.1");
    let quiet = TestClient::new(app).with_client_ip("10.2.0.2");

    let mut limited = false;
    for _ in 0..GENERAL_BURST_SIZE * 2 {
        if noisy.get_with_auth("/topics", &user.token).await.status
            == StatusCode::TOO_MANY_REQUESTS
        {
            limited = true;
            break;
        }
    }
    assert!(limited, "Expected the noisy client to hit the limit");

    quiet
        .get_with_auth("/topics", &user.token)
        .await
        .assert_status(StatusCode::OK);

    user.cleanup(&state).await;
}
