//! HTTP surface for cityfare: routes, handlers, and error mapping.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::{ApiError, ErrorBody};
pub use handlers::AppState;
pub use routes::routes;
pub use server::serve;
