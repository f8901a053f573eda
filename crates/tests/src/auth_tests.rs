use crate::fixtures::test_app::TestApp;
use serde_json::Value;

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn token_from_jwt_opens_protected_routes() {
    let app = TestApp::spawn().await;
    let student = app.register_user("ann@hostel.test", "Ann").await;

    let resp = app
        .auth_get("/users/admin/ann@hostel.test", &student.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["admin"], false);
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn token_signed_with_other_secret_is_rejected() {
    let app = TestApp::spawn().await;

    let mut jwt = app.settings.jwt.clone();
    jwt.secret = "some-other-secret-that-is-long-enough-to-sign".to_string();
    let forged = hostelmate_services::AuthService::new(jwt)
        .issue_token("ann@hostel.test", None)
        .unwrap()
        .token;

    let resp = app
        .auth_get("/users/admin/ann@hostel.test", &forged)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 401);
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn valid_token_without_account_is_forbidden_on_admin_routes() {
    let app = TestApp::spawn().await;
    let token = app.issue_token("ghost@hostel.test", "Ghost").await;

    let resp = app.auth_get("/users", &token).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 403);
}
