//! webterm - HTTP shell
//!
//! - The browser page is a renderer; every interaction is posted here
//! - Rust owns all view state
//! - One `Console` per mounted page, dropped on unmount or when idle

pub mod commands;
mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use webterm_core::Config;

pub use state::AppState;

/// Create router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // View commands
        .route("/api/views", post(commands::views::mount_view))
        .route(
            "/api/views/:view",
            get(commands::views::get_view).delete(commands::views::unmount_view),
        )
        // Tree commands
        .route("/api/views/:view/search", post(commands::tree::set_search))
        .route("/api/views/:view/activate", post(commands::tree::activate_node))
        // Tab commands
        .route(
            "/api/views/:view/tabs/:session",
            get(commands::tabs::get_terminal).delete(commands::tabs::close_tab),
        )
        .route(
            "/api/views/:view/tabs/:session/select",
            post(commands::tabs::select_tab),
        )
        // File manager commands
        .route(
            "/api/views/:view/file-manager",
            post(commands::file_manager::open_file_manager)
                .delete(commands::file_manager::close_file_manager),
        )
        .with_state(state)
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    let bind_addr = config.bind_addr;
    let state = AppState::new(config);
    state.spawn_idle_sweeper();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!(addr = %bind_addr, "webterm server started");

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use serde_json::{json, Value};
    use std::collections::BTreeMap;
    use std::time::Duration;
    use tower::ServiceExt;
    use url::Url;
    use webterm_core::PermissionSet;

    async fn fake_host_api() -> Url {
        let app = Router::new().route(
            "/api/host/group/",
            get(|| async {
                axum::Json(json!({
                    "data": {"treeData": [
                        {"key": 1, "title": "prod", "children": [
                            {"id": 10, "key": "1_10", "title": "web-01", "isLeaf": true},
                            {"id": 11, "key": "1_11", "title": "db-01", "isLeaf": true}
                        ]}
                    ]},
                    "error": ""
                }))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Url::parse(&format!("http://{addr}/")).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> Value {
        let response = app.clone().oneshot(request).await.unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn request(method: Method, uri: &str, token: Option<&str>, body: Body) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("X-Token", token);
        }
        builder.body(body).unwrap()
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Value {
        let body = match body {
            Some(body) => Body::from(body.to_string()),
            None => Body::empty(),
        };
        send(app, request(method, uri, None, body)).await
    }

    async fn mount_with_token(app: &Router, token: Option<&str>, body: Value) -> Value {
        let mount = request(Method::POST, "/api/views", token, Body::from(body.to_string()));
        send(app, mount).await
    }

    async fn mounted_app(codes: &[&str]) -> (Router, String) {
        let config = Config {
            api_base: fake_host_api().await,
            token_grants: BTreeMap::from([(
                "tester".to_string(),
                PermissionSet::new(codes.iter().copied()),
            )]),
            ..Config::default()
        };
        let app = create_router(AppState::new(config));

        let mounted = mount_with_token(&app, Some("tester"), json!({})).await;
        assert_eq!(mounted["success"], true);
        let view_id = mounted["data"]["view_id"].as_str().unwrap().to_string();

        for _ in 0..100 {
            let view = call(&app, Method::GET, &format!("/api/views/{view_id}"), None).await;
            if view["data"]["fetching"] == false {
                return (app, view_id);
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("tree fetch did not finish");
    }

    #[tokio::test]
    async fn test_mount_denied_without_view_capability() {
        let app = create_router(AppState::new(Config::default()));
        let result = call(&app, Method::POST, "/api/views", Some(json!({}))).await;
        assert_eq!(result["success"], false);
        assert!(result["error"]
            .as_str()
            .unwrap()
            .contains("host.console.view"));
    }

    #[tokio::test]
    async fn test_mount_ignores_client_supplied_grants() {
        let app = create_router(AppState::new(Config::default()));

        for body in [
            json!({"permissions": {"is_supper": true}}),
            json!({"is_supper": true, "permissions": ["host.console.view"]}),
        ] {
            let result = mount_with_token(&app, None, body.clone()).await;
            assert_eq!(result["success"], false, "{body}");

            let result = mount_with_token(&app, Some("made-up"), body).await;
            assert_eq!(result["success"], false);
        }
    }

    #[tokio::test]
    async fn test_mount_with_granted_token() {
        let config = Config {
            api_base: fake_host_api().await,
            token_grants: BTreeMap::from([("root".to_string(), PermissionSet::superuser())]),
            ..Config::default()
        };
        let app = create_router(AppState::new(config));

        let result = mount_with_token(&app, Some("root"), json!({})).await;
        assert_eq!(result["success"], true);
        assert_eq!(result["data"]["view"]["file_manager_button"]["shown"], true);
    }

    #[tokio::test]
    async fn test_malformed_body_gets_envelope() {
        let (app, view) = mounted_app(&["host.console.view"]).await;

        for path in ["search", "activate"] {
            let uri = format!("/api/views/{view}/{path}");
            let malformed = request(Method::POST, &uri, None, Body::from("{not json"));
            let result = send(&app, malformed).await;
            assert_eq!(result["success"], false);
            assert!(result["error"].is_string());
            assert!(result["data"].is_null());
        }

        let missing_key = call(
            &app,
            Method::POST,
            &format!("/api/views/{view}/activate"),
            Some(json!({"clicks": 2})),
        )
        .await;
        assert_eq!(missing_key["success"], false);
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let (app, view) = mounted_app(&["host.console.view", "host.console.list"]).await;

        let loaded = call(&app, Method::GET, &format!("/api/views/{view}"), None).await;
        assert_eq!(loaded["data"]["tree"][0]["expanded"], true);
        assert!(loaded["data"]["banner"].is_string());

        let activate = format!("/api/views/{view}/activate");
        let single = call(&app, Method::POST, &activate, Some(json!({"key": "1_10"}))).await;
        assert!(single["data"]["opened"].is_null());

        let first = call(
            &app,
            Method::POST,
            &activate,
            Some(json!({"key": "1_10", "clicks": 2})),
        )
        .await;
        let first_id = first["data"]["opened"]["session_id"]
            .as_str()
            .unwrap()
            .to_string();

        let second = call(
            &app,
            Method::POST,
            &activate,
            Some(json!({"key": "1_11", "clicks": 2})),
        )
        .await;
        let second_id = second["data"]["opened"]["session_id"]
            .as_str()
            .unwrap()
            .to_string();
        assert_eq!(second["data"]["view"]["active_id"], second_id.as_str());

        let selected = call(
            &app,
            Method::POST,
            &format!("/api/views/{view}/tabs/{first_id}/select"),
            None,
        )
        .await;
        assert_eq!(selected["data"]["active_id"], first_id.as_str());

        let opened = call(
            &app,
            Method::POST,
            &format!("/api/views/{view}/file-manager"),
            None,
        )
        .await;
        assert_eq!(opened["data"]["file_manager"]["host_id"], "10");
        assert_eq!(opened["data"]["file_manager"]["visible"], true);

        let terminal = call(
            &app,
            Method::GET,
            &format!("/api/views/{view}/tabs/{first_id}"),
            None,
        )
        .await;
        assert_eq!(terminal["data"]["visible"], true);

        let closed = call(
            &app,
            Method::DELETE,
            &format!("/api/views/{view}/tabs/{first_id}"),
            None,
        )
        .await;
        assert_eq!(closed["data"]["active_id"], second_id.as_str());

        let again = call(
            &app,
            Method::DELETE,
            &format!("/api/views/{view}/tabs/{first_id}"),
            None,
        )
        .await;
        assert_eq!(again["success"], true);
        assert_eq!(again["data"]["tabs"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_flattens_tree() {
        let (app, view) = mounted_app(&["host.console.view"]).await;

        let result = call(
            &app,
            Method::POST,
            &format!("/api/views/{view}/search"),
            Some(json!({"value": "DB"})),
        )
        .await;
        let tree = result["data"]["tree"].as_array().unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0]["key"], "1_11");
        assert_eq!(tree[0]["icon"], "server");
        assert_eq!(tree[0]["is_leaf"], true);
    }

    #[tokio::test]
    async fn test_unmounted_view_reports_error() {
        let (app, view) = mounted_app(&["host.console.view"]).await;

        let unmounted = call(&app, Method::DELETE, &format!("/api/views/{view}"), None).await;
        assert_eq!(unmounted["success"], true);

        let gone = call(&app, Method::GET, &format!("/api/views/{view}"), None).await;
        assert_eq!(gone["success"], false);
    }
}
