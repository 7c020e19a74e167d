mod common;

use auth::Claims;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

// Fixture CPFs with correct check digits.
const CPF_MARIA: &str = "52998224725";
const CPF_JOAO: &str = "11144477735";
const CPF_ANA: &str = "39053344705";

async fn register(app: &TestApp, cpf: &str, email: &str) -> serde_json::Value {
    let response = app
        .post("/api/users")
        .json(&json!({
            "cpf": cpf,
            "name": "Maria Silva",
            "email": email,
            "telephone": "(11) 98765-4321",
            "password": "Secret123!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

async fn login(app: &TestApp, cpf: &str, password: &str) -> reqwest::Response {
    app.post("/api/auth/login")
        .json(&json!({ "cpf": cpf, "password": password }))
        .send()
        .await
        .expect("Failed to execute request")
}

#[tokio::test]
async fn test_register_user_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "cpf": "529.982.247-25",
            "name": "Maria Silva",
            "email": "maria@example.com",
            "telephone": "(11) 98765-4321",
            "password": "Secret123!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    // Stored and returned in normalized form
    assert_eq!(body["cpf"], CPF_MARIA);
    assert_eq!(body["telephone"], "11987654321");
    assert_eq!(body["email"], "maria@example.com");
    assert!(body["id"].is_string());
    assert!(body["created_at"].is_string());
    // The hash never leaves the server
    assert!(body.get("password_hash").is_none());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_register_collects_all_validation_failures_in_order() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "cpf": "",
            "name": "Maria Silva",
            "email": "bad",
            "telephone": "123",
            "password": "x"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let errors = body["errors"].as_array().expect("errors array");

    assert_eq!(errors.len(), 4);
    let attributes: Vec<&str> = errors
        .iter()
        .map(|e| e["attribute"].as_str().unwrap())
        .collect();
    assert_eq!(attributes, ["cpf", "email", "telephone", "password"]);
}

#[tokio::test]
async fn test_register_duplicate_cpf() {
    let app = TestApp::spawn().await;

    register(&app, CPF_MARIA, "maria@example.com").await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "cpf": CPF_MARIA,
            "name": "Other Maria",
            "email": "other@example.com",
            "telephone": "11987654321",
            "password": "Secret123!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"][0]["attribute"], "cpf");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    register(&app, CPF_MARIA, "maria@example.com").await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "cpf": CPF_JOAO,
            "name": "Joao Souza",
            "email": "maria@example.com",
            "telephone": "11987654321",
            "password": "Secret123!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"][0]["attribute"], "email");
}

#[tokio::test]
async fn test_login_success_returns_subject_and_token() {
    let app = TestApp::spawn().await;

    let created = register(&app, CPF_MARIA, "maria@example.com").await;

    let response = login(&app, "529.982.247-25", "Secret123!").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["subject"], created["id"]);

    let token = body["token"].as_str().expect("token string");
    let claims = app.token_handler.verify(token).expect("verifiable token");
    assert_eq!(claims.sub, created["id"].as_str().unwrap());
    assert_eq!(claims.exp - claims.iat, 8 * 60 * 60);
}

#[tokio::test]
async fn test_login_missing_fields_is_bad_request() {
    let app = TestApp::spawn().await;

    let response = login(&app, "", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_does_not_reveal_which_credential_failed() {
    let app = TestApp::spawn().await;

    register(&app, CPF_MARIA, "maria@example.com").await;

    // Unknown CPF
    let unknown = login(&app, CPF_JOAO, "Secret123!").await;
    let unknown_status = unknown.status();
    let unknown_body: serde_json::Value = unknown.json().await.expect("Failed to parse response");

    // Existing CPF, wrong password
    let wrong = login(&app, CPF_MARIA, "WrongPassword!").await;
    let wrong_status = wrong.status();
    let wrong_body: serde_json::Value = wrong.json().await.expect("Failed to parse response");

    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, wrong_status);
    assert_eq!(unknown_body, wrong_body);
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/users/profile")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_gets_generic_rejection() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/api/users/profile", "garbage")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    // Generic message, no parser detail leaked
    assert_eq!(body["errors"][0]["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_expired_token_gets_the_same_generic_rejection() {
    let app = TestApp::spawn().await;

    let created = register(&app, CPF_MARIA, "maria@example.com").await;
    let subject = created["id"].as_str().unwrap();

    // Forged with the server's secret but expired an hour ago.
    let expired = app
        .token_handler
        .encode(&Claims::new(subject, -1))
        .expect("Failed to encode token");

    let response = app
        .get_authenticated("/api/users/profile", &expired)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"][0]["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_valid_token_for_deleted_user_is_not_found() {
    let app = TestApp::spawn().await;

    register(&app, CPF_MARIA, "maria@example.com").await;

    let login_body: serde_json::Value = login(&app, CPF_MARIA, "Secret123!")
        .await
        .json()
        .await
        .expect("Failed to parse response");
    let token = login_body["token"].as_str().unwrap().to_string();

    // Soft-delete own account
    let delete_response = app
        .delete_authenticated("/api/users/profile", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(delete_response.status(), StatusCode::NO_CONTENT);

    // The token is structurally valid and unexpired, but the subject
    // is gone.
    let response = app
        .get_authenticated("/api/users/profile", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // And the account can no longer log in.
    let relogin = login(&app, CPF_MARIA, "Secret123!").await;
    assert_eq!(relogin.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_inactive_user_is_rejected_by_login_and_gate() {
    let app = TestApp::spawn().await;

    register(&app, CPF_MARIA, "maria@example.com").await;

    let login_body: serde_json::Value = login(&app, CPF_MARIA, "Secret123!")
        .await
        .json()
        .await
        .expect("Failed to parse response");
    let token = login_body["token"].as_str().unwrap().to_string();

    // Inactivate the account behind the service's back.
    sqlx::query("UPDATE users SET is_active = FALSE WHERE cpf = $1")
        .bind(CPF_MARIA)
        .execute(&app.db.pool)
        .await
        .expect("Failed to inactivate user");

    // Login fails with the same response an unknown CPF gets.
    let unknown_body: serde_json::Value = login(&app, CPF_ANA, "Secret123!")
        .await
        .json()
        .await
        .expect("Failed to parse response");
    let inactive = login(&app, CPF_MARIA, "Secret123!").await;
    assert_eq!(inactive.status(), StatusCode::UNAUTHORIZED);
    let inactive_body: serde_json::Value = inactive.json().await.expect("Failed to parse response");
    assert_eq!(inactive_body, unknown_body);

    // The gate rejects the previously issued token.
    let response = app
        .get_authenticated("/api/users/profile", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_users_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/users")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_users_excludes_deleted_accounts() {
    let app = TestApp::spawn().await;

    register(&app, CPF_MARIA, "maria@example.com").await;
    let joao = register(&app, CPF_JOAO, "joao@example.com").await;
    let joao_id = joao["id"].as_str().unwrap().to_string();

    let login_body: serde_json::Value = login(&app, CPF_MARIA, "Secret123!")
        .await
        .json()
        .await
        .expect("Failed to parse response");
    let token = login_body["token"].as_str().unwrap().to_string();

    let response = app
        .get_authenticated("/api/users", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let listed: serde_json::Value = response.json().await.expect("Failed to parse response");
    let users = listed.as_array().expect("users array");
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));

    // Soft-delete the second account and list again.
    let delete_response = app
        .delete_authenticated("/api/users/profile", &token)
        .json(&json!({ "user_id": joao_id }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(delete_response.status(), StatusCode::NO_CONTENT);

    let listed: serde_json::Value = app
        .get_authenticated("/api/users", &token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let users = listed.as_array().expect("users array");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["cpf"], CPF_MARIA);
}

#[tokio::test]
async fn test_full_account_workflow() {
    let app = TestApp::spawn().await;

    // 1. Register
    let created = register(&app, CPF_MARIA, "maria@example.com").await;
    let user_id = created["id"].as_str().unwrap().to_string();

    // 2. Login
    let login_response = login(&app, CPF_MARIA, "Secret123!").await;
    assert_eq!(login_response.status(), StatusCode::OK);
    let login_body: serde_json::Value = login_response
        .json()
        .await
        .expect("Failed to parse response");
    let token = login_body["token"].as_str().unwrap().to_string();

    // 3. Own profile
    let profile_response = app
        .get_authenticated("/api/users/profile", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(profile_response.status(), StatusCode::OK);
    let profile: serde_json::Value = profile_response
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(profile["id"], user_id.as_str());
    assert_eq!(profile["cpf"], CPF_MARIA);

    // 4. Fetch by id
    let by_id_response = app
        .get_authenticated(&format!("/api/users/{}", user_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(by_id_response.status(), StatusCode::OK);

    // 5. Update email and telephone (no user_id in body: defaults to caller)
    let update_response = app
        .patch_authenticated("/api/users/profile", &token)
        .json(&json!({
            "email": "nova@example.com",
            "telephone": "(21) 91234-5678"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(update_response.status(), StatusCode::OK);
    let updated: serde_json::Value = update_response
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(updated["email"], "nova@example.com");
    assert_eq!(updated["telephone"], "21912345678");

    // 6. Password update takes effect on the next login
    let password_update = app
        .patch_authenticated("/api/users/profile", &token)
        .json(&json!({ "password": "NewSecret456!" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(password_update.status(), StatusCode::OK);

    let old_password = login(&app, CPF_MARIA, "Secret123!").await;
    assert_eq!(old_password.status(), StatusCode::UNAUTHORIZED);

    let new_password = login(&app, CPF_MARIA, "NewSecret456!").await;
    assert_eq!(new_password.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_update_rejects_invalid_fields_together() {
    let app = TestApp::spawn().await;

    register(&app, CPF_MARIA, "maria@example.com").await;

    let login_body: serde_json::Value = login(&app, CPF_MARIA, "Secret123!")
        .await
        .json()
        .await
        .expect("Failed to parse response");
    let token = login_body["token"].as_str().unwrap().to_string();

    let response = app
        .patch_authenticated("/api/users/profile", &token)
        .json(&json!({
            "email": "not-an-email",
            "password": "short"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let attributes: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["attribute"].as_str().unwrap())
        .collect();
    assert_eq!(attributes, ["email", "password"]);
}

#[tokio::test]
async fn test_get_unknown_user_by_id_is_not_found() {
    let app = TestApp::spawn().await;

    register(&app, CPF_MARIA, "maria@example.com").await;

    let login_body: serde_json::Value = login(&app, CPF_MARIA, "Secret123!")
        .await
        .json()
        .await
        .expect("Failed to parse response");
    let token = login_body["token"].as_str().unwrap().to_string();

    let fake_uuid = uuid::Uuid::new_v4().to_string();
    let response = app
        .get_authenticated(&format!("/api/users/{}", fake_uuid), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"][0]["message"], "User not found");
}
