//! HTTP server utility methods

use crate::server::server::HttpServer;
use crate::utils::error::GatewayError;
use std::io::ErrorKind;

impl HttpServer {
    /// Turn a bind failure into an actionable message
    pub(crate) fn format_bind_error(
        error: std::io::Error,
        bind_addr: &str,
        port: u16,
    ) -> GatewayError {
        let message = match error.kind() {
            ErrorKind::AddrInUse => format!(
                "Port {} is already in use. Stop the other process or pick another port with --port {} or BDO_PORT={}",
                port,
                port.saturating_add(1),
                port.saturating_add(1)
            ),
            ErrorKind::PermissionDenied => format!(
                "Permission denied for port {}. Use a port >= 1024 or run with elevated privileges",
                port
            ),
            _ => format!("Failed to bind to {}: {}", bind_addr, error),
        };
        GatewayError::server(message)
    }
}
