use std::sync::Arc;

use auth_login_gateway::{router, AppState, LoginConfig, ProviderSpec, CONFIG_KEYS};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
};
use mockito::{Matcher, Server, ServerGuard};
use tower::ServiceExt;

fn configured() -> LoginConfig {
    LoginConfig {
        discord_client_id: Some("1234".to_string()),
        discord_client_secret: Some("dsecret".to_string()),
        discord_redirect_url: Some("https://auth.example.com/discord".to_string()),
        discord_permissions: Some("8".to_string()),
        discord_scope: Some("identify".to_string()),
        discord_login_url: None,
        microsoft_client_id: Some("ms-client".to_string()),
        microsoft_client_secret: Some("msecret".to_string()),
        microsoft_scope: Some("openid".to_string()),
        microsoft_redirect_url: Some("https://auth.example.com/microsoft".to_string()),
    }
}

fn state_for(config: LoginConfig, server: &ServerGuard) -> Arc<AppState> {
    Arc::new(AppState::with_providers(
        config,
        ProviderSpec::discord().with_token_url(format!("{}/discord/token", server.url())),
        ProviderSpec::microsoft().with_token_url(format!("{}/microsoft/token", server.url())),
        reqwest::Client::new(),
    ))
}

async fn get(state: Arc<AppState>, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    router(state).oneshot(request).await.unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn assert_redirects_to_root(response: &Response) {
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.headers().get("location").unwrap(), "/");
}

#[tokio::test]
async fn test_callbacks_without_code_redirect() {
    let mut server = Server::new_async().await;
    let token_mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let state = state_for(configured(), &server);

    for uri in ["/discord", "/discord/callback", "/microsoft", "/microsoft?code=", "/discord?state=abc"] {
        let response = get(state.clone(), uri).await;
        assert_redirects_to_root(&response);
    }

    token_mock.assert_async().await;
}

#[tokio::test]
async fn test_discord_callback_renders_token_fields() {
    let mut server = Server::new_async().await;
    let token_mock = server
        .mock("POST", "/discord/token")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
            Matcher::UrlEncoded("code".into(), "X".into()),
            Matcher::UrlEncoded("client_id".into(), "1234".into()),
            Matcher::UrlEncoded("client_secret".into(), "dsecret".into()),
            Matcher::UrlEncoded("redirect_uri".into(), "https://auth.example.com/discord".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"token_type":"Bearer","access_token":"abc","expires_in":604800,"scope":"identify"}"#)
        .expect(1)
        .create_async()
        .await;
    let state = state_for(configured(), &server);

    let response = get(state, "/discord?code=X").await;

    token_mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("content-type").unwrap(), "text/html");

    let body = body_text(response).await;
    assert!(body.contains(
        "<p>token_type : Bearer <br/>access_token : abc <br/>expires_in : 604800 <br/>scope : identify <br/></p>"
    ));
    assert!(!body.contains("Debug Status"));
}

#[tokio::test]
async fn test_discord_sub_path_routes_to_discord() {
    let mut server = Server::new_async().await;
    let token_mock = server
        .mock("POST", "/discord/token")
        .with_status(200)
        .with_body(r#"{"access_token":"abc"}"#)
        .expect(1)
        .create_async()
        .await;
    let state = state_for(configured(), &server);

    let response = get(state, "/discord/callback?code=Y").await;

    token_mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("access_token : abc <br/>"));
}

#[tokio::test]
async fn test_discord_error_body_rendered() {
    let mut server = Server::new_async().await;
    let _token_mock = server
        .mock("POST", "/discord/token")
        .with_status(400)
        .with_body(r#"{"error":"invalid_grant","error_description":"Invalid \"code\" in request."}"#)
        .create_async()
        .await;
    let state = state_for(configured(), &server);

    let response = get(state, "/discord?code=used").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("error : invalid_grant <br/>"));
}

#[tokio::test]
async fn test_microsoft_failure_redirects() {
    let mut server = Server::new_async().await;
    let token_mock = server
        .mock("POST", "/microsoft/token")
        .match_body(Matcher::UrlEncoded("code".into(), "X".into()))
        .with_status(400)
        .with_body(r#"{"error":"invalid_grant"}"#)
        .expect(1)
        .create_async()
        .await;
    let state = state_for(configured(), &server);

    let response = get(state, "/microsoft?code=X").await;

    token_mock.assert_async().await;
    assert_redirects_to_root(&response);
}

#[tokio::test]
async fn test_microsoft_success_renders_headed_blocks() {
    let mut server = Server::new_async().await;
    let token_mock = server
        .mock("POST", "/microsoft/token")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
            Matcher::UrlEncoded("code".into(), "X".into()),
            Matcher::UrlEncoded("client_id".into(), "ms-client".into()),
            Matcher::UrlEncoded("client_secret".into(), "msecret".into()),
            Matcher::UrlEncoded("redirect_uri".into(), "https://auth.example.com/microsoft".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"a":1,"b":2}"#)
        .expect(1)
        .create_async()
        .await;
    let state = state_for(configured(), &server);

    let response = get(state, "/microsoft?code=X").await;

    token_mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("<h2>Client ID: ms-client</h2>"));
    assert!(body.contains("<h2>Redirect URL: https://auth.example.com/microsoft</h2>"));
    let a = body.find("<h2>a: 1</h2>").unwrap();
    let b = body.find("<h2>b: 2</h2>").unwrap();
    assert!(a < b);
}

#[tokio::test]
async fn test_unreadable_token_response_is_server_error() {
    let mut server = Server::new_async().await;
    let _token_mock = server
        .mock("POST", "/discord/token")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;
    let state = state_for(configured(), &server);

    let response = get(state, "/discord?code=X").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(response).await;
    assert!(body.contains("Token exchange failed"));
    assert!(!body.contains("Bad Gateway"));
}

#[tokio::test]
async fn test_unreachable_token_endpoint_is_server_error() {
    let state = Arc::new(AppState::with_providers(
        configured(),
        ProviderSpec::discord(),
        ProviderSpec::microsoft().with_token_url("http://127.0.0.1:1/token"),
        reqwest::Client::new(),
    ));

    let response = get(state, "/microsoft?code=X").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_chooser_lists_all_missing_keys() {
    let server = Server::new_async().await;
    let state = state_for(LoginConfig::default(), &server);

    let response = get(state, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Login With Discord"));
    assert!(body.contains("Login With Microsoft"));
    assert!(body.contains(r#"href="https://discord.com/api/oauth2/authorize?client_id=&permissions=&response_type=code&redirect_uri=&scope=bot""#));
    assert!(body.contains(&format!("<h5>Debug Status: {}</h5>", CONFIG_KEYS.join(", "))));
}

#[tokio::test]
async fn test_chooser_uses_login_url_override() {
    let server = Server::new_async().await;
    let config = LoginConfig {
        discord_login_url: Some("https://example.com/custom".to_string()),
        ..configured()
    };
    let state = state_for(config, &server);

    let response = get(state, "/").await;

    let body = body_text(response).await;
    assert!(body.contains(r#"href="https://example.com/custom" role="button">Login With Discord</a>"#));
    assert!(body.contains(
        r#"href="https://login.microsoftonline.com/common/oauth2/v2.0/authorize?client_id=ms-client&response_type=code&redirect_uri=https%3A%2F%2Fauth.example.com%2Fmicrosoft&scope=openid""#
    ));
    assert!(!body.contains("Debug Status"));
}

#[tokio::test]
async fn test_unmatched_paths_show_chooser() {
    let server = Server::new_async().await;
    let state = state_for(configured(), &server);

    for uri in ["/", "/index.html", "/Discord?code=X", "/login/microsoft"] {
        let response = get(state.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Login With Discord"));
    }
}
