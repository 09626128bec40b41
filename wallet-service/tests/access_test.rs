//! Access policy and wallet status behavior.

mod common;

use common::{data_of, spawn_app};
use uuid::Uuid;

#[tokio::test]
async fn roles_outside_route_filter_are_forbidden() {
    let Some(app) = spawn_app().await else { return };

    for role in [
        "Mentor",
        "Investor",
        "Funding Agency",
        "Policy Maker",
        "IPR Professional",
    ] {
        let user = Uuid::new_v4();
        let response = app.get_balance(user, role).await;
        assert_eq!(response.status(), 403, "role {role} must be filtered");

        let response = app.post_funds("add", user, role, 100, None).await;
        assert_eq!(response.status(), 403, "role {role} must be filtered");
    }
}

#[tokio::test]
async fn entrepreneur_passes_route_filter_but_fails_service_policy() {
    let Some(app) = spawn_app().await else { return };
    let user = Uuid::new_v4();

    // Route-level access admits Entrepreneurs; the service-level
    // policy is stricter and is the final authority.
    for response in [
        app.get_balance(user, "Entrepreneur").await,
        app.post_funds("add", user, "Entrepreneur", 100, None).await,
        app.post_funds("withdraw", user, "Entrepreneur", 100, None).await,
        app.get_transactions(user, "Entrepreneur").await,
        app.toggle_status(user, "Entrepreneur").await,
    ] {
        assert_eq!(response.status(), 403);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
    }
}

#[tokio::test]
async fn missing_or_invalid_identity_is_unauthorized() {
    let Some(app) = spawn_app().await else { return };

    // No headers at all.
    let response = app
        .client
        .get(format!("{}/wallet/balance", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    // Valid role, malformed user id.
    let response = app
        .client
        .get(format!("{}/wallet/balance", app.address))
        .header("X-User-ID", "not-a-uuid")
        .header("X-User-Role", "Researcher")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    // Unknown role label.
    let response = app
        .client
        .get(format!("{}/wallet/balance", app.address))
        .header("X-User-ID", Uuid::new_v4().to_string())
        .header("X-User-Role", "Admin")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn toggle_twice_restores_wallet_unchanged() {
    let Some(app) = spawn_app().await else { return };
    let user = Uuid::new_v4();

    data_of(app.add(user, 120).await).await;

    let data = data_of(app.toggle_status(user, "Researcher").await).await;
    assert_eq!(data["is_active"], false);

    let data = data_of(app.toggle_status(user, "Researcher").await).await;
    assert_eq!(data["is_active"], true);

    let data = data_of(app.get_balance(user, "Researcher").await).await;
    assert_eq!(data["balance"], 120);
    let txs = data_of(app.get_transactions(user, "Researcher").await).await;
    assert_eq!(txs["transactions"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn inactive_wallet_rejects_everything_but_toggle() {
    let Some(app) = spawn_app().await else { return };
    let user = Uuid::new_v4();

    data_of(app.add(user, 80).await).await;
    let data = data_of(app.toggle_status(user, "Researcher").await).await;
    assert_eq!(data["is_active"], false);

    assert_eq!(app.get_balance(user, "Researcher").await.status(), 403);
    assert_eq!(app.add(user, 10).await.status(), 403);
    assert_eq!(app.withdraw(user, 10).await.status(), 403);
    assert_eq!(
        app.get_transactions(user, "Researcher").await.status(),
        403
    );

    // Reactivation restores full function with state intact.
    let data = data_of(app.toggle_status(user, "Researcher").await).await;
    assert_eq!(data["is_active"], true);
    let data = data_of(app.get_balance(user, "Researcher").await).await;
    assert_eq!(data["balance"], 80);
}
