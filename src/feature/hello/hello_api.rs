//! Implementation of the greeting API. An API that returns a greeting based
//! on a path parameter.

use crate::{feature::hello::hello_service, infra::extract::Json};
use axum::Router;
use axum_extra::routing::{RouterExt, TypedPath};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

/// The greeting API endpoints.
pub fn routes() -> Router {
    Router::new()
        .typed_get(root_greeting)
        .typed_get(personalized_greeting)
}

/// The root endpoint path.
#[derive(TypedPath, Deserialize)]
#[typed_path("/")]
pub struct RootPath;

/// The personalized greeting path with its name segment.
#[derive(TypedPath, Deserialize)]
#[typed_path("/hello/:name")]
pub struct HelloPath {
    name: String,
}

/// This is a response to the greeting endpoints.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Greeting {
    /// A greeting message.
    message: String,
}

impl Greeting {
    /// Constructs a new greeting.
    pub fn new(message: String) -> Self {
        Self { message }
    }

    /// Returns the greeting message.
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }
}

/// A handler for requests to the root endpoint.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Success", body = Greeting),
    )
)]
#[instrument]
pub async fn root_greeting(_: RootPath) -> Json<Greeting> {
    Json(Greeting {
        message: hello_service::greet("World"),
    })
}

/// A handler for requests to the personalized greeting endpoint.
#[utoipa::path(
    get,
    path = "/hello/{name}",
    params(
        ("name" = String, Path, description = "Who to greet"),
    ),
    responses(
        (status = 200, description = "Success", body = Greeting),
    )
)]
#[instrument]
pub async fn personalized_greeting(HelloPath { name }: HelloPath) -> Json<Greeting> {
    Json(Greeting {
        message: hello_service::greet(&name),
    })
}
