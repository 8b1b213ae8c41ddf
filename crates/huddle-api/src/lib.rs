pub mod auth;
pub mod error;
pub mod messages;
pub mod pages;
pub mod render;
pub mod routes;
pub mod session;

pub use auth::{AppState, AppStateInner};
pub use routes::router;
