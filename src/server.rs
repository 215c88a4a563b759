//! Server assembly and startup.
//!
//! # Examples
//!
//! Root greeting.
//!
//! ```rust
//! # use greeting_service::feature::hello::hello_api::Greeting;
//! # tokio_test::block_on(async {
//! # let url = greeting_service::server::spawn_app().await;
//! let response = reqwest::get(format!("{}/", url)).await.unwrap();
//! assert_eq!(200, response.status());
//! assert_eq!(Greeting::new("Hello World".to_string()), response.json::<Greeting>().await.unwrap());
//! # });
//! ```
//!
//! Personalized greeting.
//!
//! ```rust
//! # use greeting_service::feature::hello::hello_api::Greeting;
//! # tokio_test::block_on(async {
//! # let url = greeting_service::server::spawn_app().await;
//! let response = reqwest::get(format!("{}/hello/Foo", url)).await.unwrap();
//! assert_eq!(200, response.status());
//! assert_eq!(Greeting::new("Hello Foo".to_string()), response.json::<Greeting>().await.unwrap());
//! # });
//! ```

use crate::feature::hello::hello_api;
use crate::infra::{
    error::{ApiError, ClientError, InternalError, PanicHandler},
    middleware::MakeRequestIdSpan,
    openapi::ApiDoc,
    shutdown::shutdown,
};
use axum::{error_handling::HandleErrorLayer, response::IntoResponse, Router};
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

/// Constructs the full axum application including middleware.
pub fn app() -> Router {
    // Fallible middleware from tower, mapped to infallible response with [`HandleErrorLayer`].
    let tower_middleware = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(|e| async move {
            InternalError::Other(format!("Tower middleware failed: {e}")).into_response()
        }))
        .concurrency_limit(100);

    Router::new()
        // API specification and documentation UIs
        .merge(SwaggerUi::new("/swagger-ui").url("/api.json", ApiDoc::openapi()))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        // Our API
        .merge(hello_api::routes())
        .fallback(fallback)
        // Layers
        .layer(TimeoutLayer::new(Duration::from_secs(10)))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(MakeRequestIdSpan)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(()),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(tower_middleware)
        .layer(CatchPanicLayer::custom(PanicHandler))
}

/// Responds to requests for paths outside the API.
async fn fallback() -> ApiError {
    ApiError::ClientError(ClientError::NotFound)
}

/// Starts the axum server.
pub async fn run_app(listener: TcpListener) -> std::io::Result<()> {
    let app = app();

    tracing::info!("Starting axum on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown())
        .await
}

/// Spawn a server on a random port.
pub async fn spawn_app() -> String {
    let address = "127.0.0.1";
    let listener = TcpListener::bind(format!("{address}:0")).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(run_app(listener));
    format!("http://{address}:{port}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{feature::hello::hello_api::Greeting, infra::error::ErrorBody};
    use axum::body::Body;
    use http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn get(app: Router, uri: &str) -> http::Response<Body> {
        let req = Request::get(uri).body(Body::empty()).unwrap();
        app.oneshot(req).await.unwrap()
    }

    async fn body_bytes(res: http::Response<Body>) -> Vec<u8> {
        res.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    #[tokio::test]
    async fn root_returns_hello_world() {
        let res = get(app(), "/").await;
        assert_eq!(StatusCode::OK, res.status());
        assert_eq!("application/json", res.headers()["content-type"]);
        let body = body_bytes(res).await;
        assert_eq!(br#"{"message":"Hello World"}"#.to_vec(), body);
    }

    #[tokio::test]
    async fn hello_returns_personalized_greeting() {
        let res = get(app(), "/hello/World").await;
        assert_eq!(StatusCode::OK, res.status());
        let body = body_bytes(res).await;
        assert_eq!(br#"{"message":"Hello World"}"#.to_vec(), body);
    }

    #[tokio::test]
    async fn hello_decodes_percent_encoded_names() {
        let res = get(app(), "/hello/Ada%20Lovelace").await;
        assert_eq!(StatusCode::OK, res.status());
        let greeting: Greeting = serde_json::from_slice(&body_bytes(res).await).unwrap();
        assert_eq!("Hello Ada Lovelace", greeting.message());
    }

    #[tokio::test]
    async fn unknown_path_gives_404() {
        let res = get(app(), "/unknown").await;
        assert_eq!(StatusCode::NOT_FOUND, res.status());
        let body: ErrorBody = serde_json::from_slice(&body_bytes(res).await).unwrap();
        assert_eq!("not found", body.message());
    }

    #[tokio::test]
    async fn empty_name_segment_gives_404() {
        let res = get(app(), "/hello/").await;
        assert_eq!(StatusCode::NOT_FOUND, res.status());
    }

    #[tokio::test]
    async fn repeated_requests_give_identical_bodies() {
        let app = app();
        let first = body_bytes(get(app.clone(), "/hello/Repeat").await).await;
        let second = body_bytes(get(app, "/hello/Repeat").await).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn api_specification_is_served() {
        let res = get(app(), "/api.json").await;
        assert_eq!(StatusCode::OK, res.status());
        let spec: serde_json::Value = serde_json::from_slice(&body_bytes(res).await).unwrap();
        assert!(spec["paths"]["/hello/{name}"]["get"].is_object());
    }

    #[tokio::test]
    async fn greeting_over_http() {
        let url = spawn_app().await;
        let response = reqwest::get(format!("{url}/hello/Ferris")).await.unwrap();
        assert_eq!(200, response.status());
        let greeting: Greeting = response.json().await.unwrap();
        assert_eq!(Greeting::new("Hello Ferris".to_string()), greeting);
    }
}
