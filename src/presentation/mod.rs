// Presentation layer - HTTP API for dashboard renderers
pub mod app_state;
pub mod handlers;
pub mod routes;
