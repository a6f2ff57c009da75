//! End-to-end tests for the LinkedIn and IMAP provisioning flows.

use credflow::auth::providers::linkedin::{LinkedInAuth, LINKEDIN_SCOPES};
use credflow::auth::OAuthRequest;
use credflow::error::{CredflowError, ErrorCategory};
use credflow::flow::{ImapFlow, LinkedInFlow};
use credflow::n8n::{ImapCredential, N8nClient, ResponseBody};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn linkedin_flow(token_server: &MockServer, n8n_server: &MockServer) -> LinkedInFlow {
    let auth = LinkedInAuth::new(OAuthRequest {
        client_id: "cid".to_string(),
        client_secret: "csecret".to_string(),
        redirect_uri: "http://localhost:8501".to_string(),
        scopes: LINKEDIN_SCOPES.iter().map(|s| s.to_string()).collect(),
    })
    .with_token_url(format!("{}/oauth/v2/accessToken", token_server.uri()));

    LinkedInFlow::new(auth, N8nClient::new(n8n_server.uri(), "n8n-key"))
}

#[tokio::test]
async fn linkedin_flow_publishes_exchanged_token() {
    let token_server = MockServer::start().await;
    let n8n_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/v2/accessToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "abc123",
            "expires_in": 5_184_000
        })))
        .expect(1)
        .mount(&token_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/credentials"))
        .and(header("X-N8N-API-KEY", "n8n-key"))
        .and(body_json(json!({
            "name": "LinkedIn OAuth Credential",
            "type": "linkedinOAuth2Api",
            "data": {
                "clientId": "cid",
                "clientSecret": "csecret",
                "accessToken": "abc123",
                "refreshToken": ""
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "42"})))
        .expect(1)
        .mount(&n8n_server)
        .await;

    let flow = linkedin_flow(&token_server, &n8n_server);

    let provisioned = flow
        .provision("http://localhost:8501/?code=the-code", None)
        .await
        .expect("flow should succeed");

    assert_eq!(provisioned.token.access_token, "abc123");
    assert_eq!(provisioned.response.body, ResponseBody::Json(json!({"id": "42"})));
}

#[tokio::test]
async fn linkedin_flow_uses_custom_credential_name() {
    let token_server = MockServer::start().await;
    let n8n_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "t",
            "refresh_token": "r"
        })))
        .mount(&token_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/credentials"))
        .and(body_json(json!({
            "name": "Marketing LinkedIn",
            "type": "linkedinOAuth2Api",
            "data": {
                "clientId": "cid",
                "clientSecret": "csecret",
                "accessToken": "t",
                "refreshToken": "r"
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "1"})))
        .expect(1)
        .mount(&n8n_server)
        .await;

    let flow = linkedin_flow(&token_server, &n8n_server).with_credential_name("Marketing LinkedIn");

    let provisioned = flow.provision("the-code", None).await.expect("ok");

    assert_eq!(provisioned.response.status, 201);
}

#[tokio::test]
async fn failed_exchange_never_reaches_n8n() {
    let token_server = MockServer::start().await;
    let n8n_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"error":"invalid_client"}"#),
        )
        .expect(1)
        .mount(&token_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&n8n_server)
        .await;

    let flow = linkedin_flow(&token_server, &n8n_server);

    let err = flow
        .provision("code=bad", None)
        .await
        .expect_err("exchange fails");

    match err {
        CredflowError::Api { status, ref message } => {
            assert_eq!(status, 401);
            assert_eq!(message, r#"{"error":"invalid_client"}"#);
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn denied_consent_is_an_authentication_error() {
    let token_server = MockServer::start().await;
    let n8n_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&token_server)
        .await;

    let flow = linkedin_flow(&token_server, &n8n_server);

    let err = flow
        .provision(
            "http://localhost:8501/?error=user_cancelled_login&error_description=The+user+cancelled",
            None,
        )
        .await
        .expect_err("consent denied");

    assert_eq!(err.category(), ErrorCategory::Authentication);
    assert!(err.to_string().contains("user_cancelled_login"));
}

#[tokio::test]
async fn pending_callback_is_rejected_without_requests() {
    let token_server = MockServer::start().await;
    let n8n_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&token_server)
        .await;

    let flow = linkedin_flow(&token_server, &n8n_server);

    let err = flow
        .provision("http://localhost:8501/", None)
        .await
        .expect_err("no code yet");

    assert_eq!(err.category(), ErrorCategory::Authentication);
}

#[test]
fn hosted_connect_url_points_at_n8n() {
    let flow = LinkedInFlow::new(
        LinkedInAuth::new(OAuthRequest {
            client_id: "cid".to_string(),
            client_secret: "s".to_string(),
            redirect_uri: "http://localhost:8501".to_string(),
            scopes: Vec::new(),
        }),
        N8nClient::new("https://n8n.example.com/", "key"),
    );

    assert_eq!(
        flow.hosted_connect_url().expect("url"),
        "https://n8n.example.com/rest/oauth2-credential/linkedinOAuth2Api?apiKey=key"
    );
}

#[tokio::test]
async fn imap_create_requires_connection_settings() {
    let flow = ImapFlow::new(N8nClient::new("", "key"));
    let credential = ImapCredential::builder()
        .user("user@example.com")
        .password("pw")
        .build();

    let err = flow.create(&credential).await.expect_err("no base URL");

    assert!(matches!(err, CredflowError::Configuration(ref m) if m.contains("n8n base URL")));
}

#[tokio::test]
async fn imap_create_requires_user_and_password_before_any_request() {
    let n8n_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&n8n_server)
        .await;

    let flow = ImapFlow::new(N8nClient::new(n8n_server.uri(), "key"));
    let credential = ImapCredential::builder().user("user@example.com").password("").build();

    let err = flow.create(&credential).await.expect_err("password missing");

    assert!(matches!(err, CredflowError::InvalidArgument(_)));
    assert_eq!(err.category(), ErrorCategory::Configuration);
}

#[tokio::test]
async fn imap_create_publishes_payload() {
    let n8n_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/credentials"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&n8n_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/credentials"))
        .and(body_json(json!({
            "name": "Support inbox",
            "type": "imap",
            "typeVersion": 1,
            "data": {
                "user": "support@example.com",
                "password": "pw",
                "host": "mail.example.com",
                "port": 143,
                "secure": false,
                "allowUnauthorizedCerts": true
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 3})))
        .expect(1)
        .mount(&n8n_server)
        .await;

    let flow = ImapFlow::new(N8nClient::new(n8n_server.uri(), "key"));
    let credential = ImapCredential::builder()
        .name("Support inbox")
        .user("support@example.com")
        .password("pw")
        .host("mail.example.com")
        .port(143)
        .secure(false)
        .allow_unauthorized_certs(true)
        .build();

    let created = flow.create(&credential).await.expect("created");

    assert_eq!(
        created.endpoint,
        format!("{}/rest/credentials", n8n_server.uri())
    );
}

#[tokio::test]
async fn imap_schema_requires_connection_settings() {
    let flow = ImapFlow::new(N8nClient::new("http://localhost:5678", ""));

    let err = flow.fetch_schema().await.expect_err("no API key");

    assert_eq!(err.category(), ErrorCategory::Configuration);
}

#[cfg(feature = "imap")]
#[tokio::test]
async fn imap_login_check_requires_host() {
    let flow = ImapFlow::new(N8nClient::new("", ""));
    let credential = ImapCredential::builder()
        .user("u")
        .password("p")
        .host("")
        .build();

    let err = flow.probe(&credential).await.expect_err("host missing");

    assert!(matches!(err, CredflowError::InvalidArgument(ref m) if m.contains("host")));
}
