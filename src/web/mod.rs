pub mod extractors;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod ui;

use crate::{models::ModelManager, utils::error::ClassifierError, Config, Result};
use axum::{
    extract::{DefaultBodyLimit, FromRef, State},
    middleware::from_fn,
    response::Json,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::Key;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, services::ServeDir, timeout::TimeoutLayer,
};

/// 应用上下文：启动时构造一次，之后只读
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub models: ModelManager,
    cookie_key: Key,
}

impl AppState {
    pub fn new(config: Config, models: ModelManager) -> Self {
        let cookie_key = match config.secret_key {
            Some(ref secret) => Key::derive_from(secret.as_bytes()),
            None => Key::generate(),
        };

        Self {
            config: Arc::new(config),
            models,
            cookie_key,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

pub async fn serve(config: Config) -> Result<()> {
    config.ensure_upload_dir()?;

    // 初始化模型管理器
    let models = ModelManager::load(&config)?;

    // 解析绑定地址
    let addr: SocketAddr = config.bind_addr.parse().map_err(|e| {
        ClassifierError::Config(format!("Invalid bind address {}: {}", config.bind_addr, e))
    })?;

    let app = create_app(AppState::new(config, models));

    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /                  - Upload form");
    tracing::info!("  POST /predict           - Multipart image upload");
    tracing::info!("  GET  /uploads/{{file}}    - Saved uploads");
    tracing::info!("  GET  /health            - Health check");
    tracing::info!("  GET  /api/info          - Service information");

    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        ClassifierError::Internal(format!("Failed to bind to address {}: {}", addr, e))
    })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ClassifierError::Internal(format!("Server failed to start: {}", e)))?;

    Ok(())
}

pub fn create_app(state: AppState) -> Router {
    let max_request_size = state.config.server_config.max_request_size;
    let request_timeout = Duration::from_secs(state.config.server_config.request_timeout);
    let uploads = ServeDir::new(&state.config.upload_dir);

    // 开发模式使用宽松CORS
    let cors = if state.config.dev_mode {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/", get(handlers::index_handler))
        .route(
            "/predict",
            get(handlers::predict_redirect_handler).post(handlers::predict_handler),
        )
        .nest_service("/uploads", uploads)
        .route("/health", get(health_handler))
        .route("/api/info", get(info_handler))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_request_size))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors)
        .layer(from_fn(middleware::security_headers))
        .layer(from_fn(middleware::request_logging))
        .with_state(state)
}

/// 健康检查端点
async fn health_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "mode": state.models.mode(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// 服务信息端点
async fn info_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "service": "ONNX Image Classifier",
        "version": env!("CARGO_PKG_VERSION"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
        "model": state.models.get_stats(),
        "labels": crate::models::CLASS_NAMES,
        "limits": {
            "max_request_size": state.config.server_config.max_request_size,
            "allowed_extensions": crate::classify::intake::ALLOWED_EXTENSIONS,
        }
    }))
}
