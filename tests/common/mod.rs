// In-process mock of an API provider, served from a background thread.
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::routing::any;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<Value> {
    let get = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "user_agent": get(header::USER_AGENT),
        "authorization": get(header::AUTHORIZATION),
        "body": body,
    }))
}

async fn missing() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "parcel not found")
}

async fn empty_error() -> StatusCode {
    StatusCode::SERVICE_UNAVAILABLE
}

pub fn spawn_mock_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            let app = Router::new()
                .route("/v1/missing", any(missing))
                .route("/v1/unavailable", any(empty_error))
                .fallback(echo);
            axum::serve(listener, app).await
        })
        .unwrap();
    });

    addr
}
