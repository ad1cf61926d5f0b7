//! HTTP server implementation
//!
//! Routing, middleware and the shared state behind the search endpoint.

pub mod middleware;
pub mod routes;

pub mod server;
pub mod state;
mod utils;


pub use server::HttpServer;
pub use state::AppState;
