use crate::controller::{api_controller, oauth_controller, page_controller};
use crate::AppState;
use axum::{routing::get, Router};

/// The five pages of the relying party. Paths match exactly: no prefixes, no
/// trailing slashes, no case folding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Callback,
    Api,
    Logout,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Callback => "/callback",
            Route::Api => "/api",
            Route::Logout => "/logout",
        }
    }
}

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .route(Route::Home.path(), get(page_controller::index))
        .route(Route::Login.path(), get(oauth_controller::login))
        .route(Route::Callback.path(), get(oauth_controller::callback))
        .route(Route::Api.path(), get(api_controller::call))
        .route(Route::Logout.path(), get(oauth_controller::logout))
        .fallback(page_controller::not_found)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::PageShell;
    use axum::{
        body::Body,
        http::{
            header::{COOKIE, LOCATION, SET_COOKIE},
            Method, Request, StatusCode,
        },
        response::Response,
    };
    use clap::Parser;
    use mockito::Server;
    use service::config::Config;
    use tower::ServiceExt;

    fn test_app(args: &[&str]) -> Router {
        let mut argv = vec!["oauth2_client_demo"];
        argv.extend_from_slice(args);
        let config = Config::parse_from(argv);
        let http_client = service::init_http_client(&config).unwrap();
        let app_state = AppState::new(
            service::AppState::new(config, http_client),
            PageShell::new("<main>[BODY]</main>".to_string()),
        );
        define_routes(app_state)
    }

    async fn send(app: Router, method: Method, uri: &str, cookie: Option<&str>) -> Response {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        app.oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn get_page(app: Router, uri: &str, cookie: Option<&str>) -> Response {
        send(app, Method::GET, uri, cookie).await
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn set_cookie(response: &Response) -> Option<String> {
        response
            .headers()
            .get(SET_COOKIE)
            .map(|value| value.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_router_serves_exactly_the_dispatcher_routes() {
        for route in [
            Route::Home,
            Route::Login,
            Route::Callback,
            Route::Api,
            Route::Logout,
        ] {
            let response = get_page(test_app(&[]), route.path(), None).await;
            assert_ne!(
                response.status(),
                StatusCode::NOT_FOUND,
                "{route:?} not served"
            );
        }

        for path in [
            "/login/",
            "/LOGIN",
            "/api/profile",
            "/callbacks",
            "/index.php",
            "/favicon.ico",
            "/logout/now",
        ] {
            let response = get_page(test_app(&[]), path, None).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path} was served");
        }
    }

    #[tokio::test]
    async fn test_query_string_does_not_affect_dispatch() {
        let response = get_page(test_app(&[]), "/?x=1", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get_page(test_app(&[]), "/nowhere?code=abc", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_path_is_plain_not_found() {
        let response = get_page(test_app(&[]), "/does-not-exist", None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, "Not found");
    }

    #[tokio::test]
    async fn test_routes_only_answer_get() {
        let response = send(test_app(&[]), Method::POST, "/login", None).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_home_without_token_renders_empty_shell() {
        let response = get_page(test_app(&[]), "/", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "<main></main>");
    }

    #[tokio::test]
    async fn test_home_with_token_shows_inspection() {
        // {"alg":"none"} . {"sub":"42"} .
        let cookie = "access_token=eyJhbGciOiJub25lIn0.eyJzdWIiOiI0MiJ9.";
        let response = get_page(test_app(&[]), "/", Some(cookie)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Test API Call"));
        assert!(body.contains("&quot;alg&quot;: &quot;none&quot;"));
        assert!(body.contains("&quot;sub&quot;: &quot;42&quot;"));
    }

    #[tokio::test]
    async fn test_login_redirects_to_authorization_server() {
        let response = get_page(
            test_app(&["--authorization-endpoint", "https://auth.example.com/authorize"]),
            "/login",
            None,
        )
        .await;

        assert_eq!(response.status(), StatusCode::FOUND);
        let location = response.headers()[LOCATION].to_str().unwrap();
        assert!(location.starts_with("https://auth.example.com/authorize?"));
        assert!(location.contains("response_type=code"));
        assert!(location.contains("client_id=demo"));
        assert!(location.contains("scope=profile"));
        assert!(set_cookie(&response).is_none());
    }

    #[tokio::test]
    async fn test_callback_without_code_renders_error() {
        let response = get_page(test_app(&[]), "/callback", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(set_cookie(&response).is_none());
        let body = body_string(response).await;
        assert!(body.contains("alert-danger"));
        assert!(body.contains("No code provided"));
        assert!(body.contains(r#"href="/""#));
    }

    #[tokio::test]
    async fn test_callback_without_code_shows_error_description() {
        let response = get_page(
            test_app(&[]),
            "/callback?error=access_denied&error_description=The%20user%20denied",
            None,
        )
        .await;

        assert!(set_cookie(&response).is_none());
        assert!(body_string(response)
            .await
            .contains("Error: The user denied"));
    }

    #[tokio::test]
    async fn test_callback_with_repeated_error_description_uses_last() {
        let response = get_page(
            test_app(&[]),
            "/callback?error_description=x&error_description=y",
            None,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(set_cookie(&response).is_none());
        let body = body_string(response).await;
        assert!(body.contains("No code provided"));
        assert!(body.contains("Error: y"));
        assert!(!body.contains("Error: x"));
    }

    #[tokio::test]
    async fn test_callback_with_repeated_code_exchanges_last() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/token")
            .match_body(mockito::Matcher::UrlEncoded("code".into(), "b".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"abc.def.ghi"}"#)
            .expect(1)
            .create_async()
            .await;

        let token_endpoint = format!("{}/token", server.url());
        let app = test_app(&["--token-endpoint", &token_endpoint]);
        let response = get_page(app, "/callback?code=a&code=b", None).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[LOCATION], "/");
        assert!(set_cookie(&response)
            .unwrap()
            .starts_with("access_token=abc.def.ghi;"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_callback_with_valid_code_sets_cookie_and_redirects() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/token")
            .match_body(mockito::Matcher::UrlEncoded(
                "code".into(),
                "VALID".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"abc.def.ghi"}"#)
            .expect(1)
            .create_async()
            .await;

        let token_endpoint = format!("{}/token", server.url());
        let app = test_app(&["--token-endpoint", &token_endpoint]);
        let response = get_page(app, "/callback?code=VALID", None).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[LOCATION], "/");
        let cookie = set_cookie(&response).unwrap();
        assert!(cookie.starts_with("access_token=abc.def.ghi;"));
        assert!(cookie.contains("Max-Age=3600"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_callback_with_bad_code_shows_hint_without_cookie() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/token")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error_description":"invalid_grant","hint":"code expired"}"#)
            .create_async()
            .await;

        let token_endpoint = format!("{}/token", server.url());
        let app = test_app(&["--token-endpoint", &token_endpoint]);
        let response = get_page(app, "/callback?code=BAD", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(set_cookie(&response).is_none());
        let body = body_string(response).await;
        assert!(body.contains("No access token provided"));
        assert!(body.contains("code expired"));
    }

    #[tokio::test]
    async fn test_callback_with_unreachable_token_endpoint_shows_failure() {
        let app = test_app(&["--token-endpoint", "http://127.0.0.1:9/token"]);
        let response = get_page(app, "/callback?code=VALID", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(set_cookie(&response).is_none());
        assert!(body_string(response)
            .await
            .contains("No access token provided"));
    }

    #[tokio::test]
    async fn test_callback_with_non_json_answer_shows_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/token")
            .with_status(500)
            .with_body("<html>Internal Server Error</html>")
            .create_async()
            .await;

        let token_endpoint = format!("{}/token", server.url());
        let app = test_app(&["--token-endpoint", &token_endpoint]);
        let response = get_page(app, "/callback?code=VALID", None).await;

        assert!(set_cookie(&response).is_none());
        assert!(body_string(response)
            .await
            .contains("No access token provided"));
    }

    #[tokio::test]
    async fn test_api_without_token_makes_no_outbound_call() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/profile")
            .expect(0)
            .create_async()
            .await;

        let api_endpoint = format!("{}/api/profile", server.url());
        let app = test_app(&["--api-endpoint", &api_endpoint]);
        let response = get_page(app, "/api", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response)
            .await
            .contains("No access token provided"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_api_with_token_shows_response() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/profile")
            .match_header("authorization", "Bearer abc.def.ghi")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name":"Ada"}"#)
            .expect(1)
            .create_async()
            .await;

        let api_endpoint = format!("{}/api/profile", server.url());
        let app = test_app(&["--api-endpoint", &api_endpoint]);
        let response = get_page(app, "/api", Some("access_token=abc.def.ghi")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains(&format!("Calling API on {api_endpoint}")));
        assert!(body.contains("abc.def.ghi"));
        assert!(body.contains("&quot;name&quot;: &quot;Ada&quot;"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_logout_clears_cookie_and_redirects() {
        let response = get_page(test_app(&[]), "/logout", Some("access_token=abc.def.ghi")).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[LOCATION], "/");
        let cookie = set_cookie(&response).unwrap();
        assert!(cookie.starts_with("access_token=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let first = get_page(test_app(&[]), "/logout", Some("access_token=abc.def.ghi")).await;
        let second = get_page(test_app(&[]), "/logout", None).await;

        assert_eq!(first.status(), second.status());
        assert_eq!(first.headers()[LOCATION], second.headers()[LOCATION]);
        assert_eq!(set_cookie(&first), set_cookie(&second));
    }
}
