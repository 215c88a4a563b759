//! OpenAPI configuration.

use crate::feature::hello::hello_api;
use utoipa::OpenApi;

/// OpenApi configuration.
#[derive(OpenApi)]
#[openapi(
    paths(hello_api::root_greeting, hello_api::personalized_greeting),
    components(schemas(hello_api::Greeting, crate::infra::error::ErrorBody))
)]
#[derive(Clone, Copy, Debug)]
pub struct ApiDoc;
