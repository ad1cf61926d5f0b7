//! HTTP server core implementation

use crate::config::{Config, ServerConfig};
use crate::core::admission::TaskReceiver;
use crate::core::dispatcher::{HttpProfileFetcher, TaskDispatcher};
use crate::server::middleware::{RequestIdMiddleware, request_id_from};
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_cors::Cors;
use actix_web::error::InternalError;
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::{DefaultHeaders, Logger},
    web,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Interval between sweeps of expired in-flight tasks
const TASK_CLEANUP_INTERVAL: Duration = Duration::from_secs(30);

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
    receiver: Option<TaskReceiver>,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");
        config.validate()?;

        let (state, receiver) = AppState::new(config.clone());
        Ok(Self {
            config: config.gateway.server.clone(),
            state,
            receiver: Some(receiver),
        })
    }

    /// Build the actix application around shared state
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let server_config = state.config.server();
        let json_config = web::JsonConfig::default()
            .limit(server_config.max_body_size)
            .content_type(|_| true)
            .content_type_required(false)
            .error_handler(|err, req| {
                let response = GatewayError::bad_request("Invalid JSON body.")
                    .to_response_with_request_id(request_id_from(req));
                InternalError::from_response(err, response).into()
            });

        App::new()
            .app_data(state.clone())
            .app_data(json_config)
            .wrap(build_cors(server_config))
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("Server", "bdo-search-rs")))
            .wrap(RequestIdMiddleware)
            .configure(routes::configure_routes)
    }

    /// Start background services and serve until shutdown
    pub async fn start(mut self) -> Result<()> {
        self.start_background_services()?;

        let bind_addr = self.config.address();
        let port = self.config.port;
        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .workers(self.config.worker_count())
            .bind(&bind_addr)
            .map_err(|e| Self::format_bind_error(e, &bind_addr, port))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| GatewayError::server(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Spawn the registry sweeper and, when an upstream is configured, the
    /// task dispatcher
    fn start_background_services(&mut self) -> Result<()> {
        self.state
            .registry
            .clone()
            .start_cleanup_task(TASK_CLEANUP_INTERVAL);

        let Some(receiver) = self.receiver.take() else {
            return Ok(());
        };

        let scraper = self.state.config.scraper();
        match HttpProfileFetcher::from_config(scraper)? {
            Some(fetcher) => {
                let dispatcher = Arc::new(TaskDispatcher::new(
                    Arc::new(fetcher),
                    self.state.cache.clone(),
                    self.state.registry.clone(),
                    self.state.maintenance.clone(),
                    scraper.worker_concurrency,
                ));
                dispatcher.spawn(receiver);
                info!(
                    workers = scraper.worker_concurrency,
                    "Task dispatcher wired to upstream fetcher"
                );
            }
            None => {
                warn!("No upstream configured, admitted tasks will only expire");
                drop(receiver);
            }
        }
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

fn build_cors(config: &ServerConfig) -> Cors {
    let cors_config = &config.cors;
    if !cors_config.enabled {
        return Cors::default();
    }

    let mut cors = Cors::default();
    if cors_config.allows_all_origins() {
        cors = cors.allow_any_origin();
        cors_config.validate().unwrap_or_else(|e| {
            warn!(error = %e, "CORS Configuration Warning");
        });
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    let methods: Vec<actix_web::http::Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    if !methods.is_empty() {
        cors = cors.allowed_methods(methods);
    }

    let headers: Vec<actix_web::http::header::HeaderName> = cors_config
        .allowed_headers
        .iter()
        .filter_map(|h| h.parse().ok())
        .collect();
    if !headers.is_empty() {
        cors = cors.allowed_headers(headers);
    }

    cors.max_age(cors_config.max_age as usize)
}
