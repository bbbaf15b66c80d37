use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use tidemark_storage::PartitionLister;

use crate::api::{routes, stream};
use crate::config::CorsConfig;
use crate::Result;

#[derive(Clone)]
pub struct AppState {
    pub lister: Arc<dyn PartitionLister>,
}

pub struct ApiServer {
    lister: Arc<dyn PartitionLister>,
    cors_config: CorsConfig,
}

impl ApiServer {
    pub fn new(lister: Arc<dyn PartitionLister>) -> Self {
        Self::with_cors(lister, CorsConfig::default())
    }

    pub fn with_cors(lister: Arc<dyn PartitionLister>, cors_config: CorsConfig) -> Self {
        Self {
            lister,
            cors_config,
        }
    }

    /// Build CORS layer from configuration
    fn build_cors_layer(&self) -> CorsLayer {
        if !self.cors_config.enabled {
            return CorsLayer::new();
        }

        let origins: Vec<HeaderValue> = self
            .cors_config
            .origins
            .iter()
            .filter_map(|o| {
                if o == "*" {
                    // Wildcard handled separately
                    None
                } else {
                    o.parse().ok()
                }
            })
            .collect();

        let has_wildcard = self.cors_config.origins.iter().any(|o| o == "*");

        let cors = if has_wildcard {
            CorsLayer::new().allow_origin(tower_http::cors::Any)
        } else if origins.is_empty() {
            CorsLayer::new()
        } else {
            CorsLayer::new().allow_origin(origins)
        };

        cors.allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(tower_http::cors::Any)
    }

    pub fn router(&self) -> Router {
        let state = AppState {
            lister: self.lister.clone(),
        };

        Router::new()
            .route("/query", post(routes::query_data))
            .route("/health", get(routes::health))
            .route(
                "/stream/:path",
                get(stream::subscribe).post(stream::publish),
            )
            .with_state(state)
            .layer(self.build_cors_layer())
            .layer(TraceLayer::new_for_http())
    }

    pub async fn serve(self, addr: &str) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, self.router())
            .await
            .map_err(|e| crate::Error::Backend(e.to_string()))?;

        Ok(())
    }
}
