#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tower::util::ServiceExt; // for `oneshot`
use web_extract::{api::routes::create_router, config::Config, AppState};

pub const PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head><title>Catalog</title></head>
  <body>
    <h1>Hello</h1>
    <ul>
      <li class="product">  Widget  </li>
      <li class="product"><span>Gadget</span> Pro</li>
      <li class="product">
        Gizmo
      </li>
    </ul>
  </body>
</html>"#;

/// Serves `router` on an ephemeral local port for the life of the test runtime.
pub async fn spawn_upstream(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.fetch.timeout = Duration::from_millis(500);
    config
}

pub fn app(config: Config) -> Router {
    create_router(AppState::new(config).expect("app state"))
}

pub fn scrape_uri(target: Option<&str>, selector: Option<&str>) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    if let Some(target) = target {
        query.append_pair("url", target);
    }
    if let Some(selector) = selector {
        query.append_pair("selector", selector);
    }
    format!("/api/scrape?{}", query.finish())
}

pub async fn get_raw(app: Router, uri: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, bytes.to_vec())
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, _, bytes) = get_raw(app, uri).await;
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
