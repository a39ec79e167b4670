//! HTTP surface.
//!
//! Everything axum-facing lives here: the router, request handlers,
//! the bearer-token middleware, custom extractors and the OpenAPI
//! document. Handlers stay thin and delegate to the service layer.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
