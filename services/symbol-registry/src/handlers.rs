//! HTTP handlers for symbol lookups

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use crate::{
    error::RegistryError,
    models::{
        ApiResponse, ErrorResponse, ExistsResponse, HealthCheckResponse, STORAGE_UNAVAILABLE,
        SYMBOL_NOT_FOUND,
    },
    model::Symbol,
    server::AppState,
};

/// Handler failure rendered as an `ApiResponse` error body
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    fn not_found(ticker: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: ErrorResponse::new(SYMBOL_NOT_FOUND, format!("Symbol {ticker} not found"))
                .with_detail("ticker", ticker),
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        error!("Symbol lookup failed: {}", err);
        let (status, code) = if err.is_storage() {
            (StatusCode::SERVICE_UNAVAILABLE, STORAGE_UNAVAILABLE)
        } else {
            (StatusCode::BAD_REQUEST, "INVALID_REQUEST")
        };
        Self {
            status,
            body: ErrorResponse::new(code, err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::<()>::error(self.body))).into_response()
    }
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// `GET /health`
pub async fn health_check(State(state): State<AppState>) -> Response {
    let uptime_seconds = state.start_time.elapsed().as_secs();
    let version = env!("CARGO_PKG_VERSION").to_string();

    match state.repository.ping().await {
        Ok(()) => Json(ApiResponse::success(HealthCheckResponse {
            status: "healthy".to_string(),
            version,
            uptime_seconds,
        }))
        .into_response(),
        Err(e) => {
            error!("Health check failed: {}", e);
            let body = ApiResponse {
                success: false,
                data: Some(HealthCheckResponse {
                    status: "unhealthy".to_string(),
                    version,
                    uptime_seconds,
                }),
                error: Some(ErrorResponse::new(STORAGE_UNAVAILABLE, e.to_string())),
                timestamp: chrono::Utc::now().timestamp(),
            };
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
    }
}

/// `GET /api/v1/symbols`
pub async fn list_symbols(State(state): State<AppState>) -> ApiResult<Vec<Symbol>> {
    let symbols = state.repository.find_all().await?;
    debug!(count = symbols.len(), "Listed symbols");
    Ok(Json(ApiResponse::success(symbols)))
}

/// `GET /api/v1/symbols/:ticker`
pub async fn get_symbol(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> ApiResult<Symbol> {
    match state.repository.find_by_ticker(&ticker).await? {
        Some(symbol) => Ok(Json(ApiResponse::success(symbol))),
        None => Err(ApiError::not_found(&ticker)),
    }
}

/// `GET /api/v1/symbols/:ticker/exists`
pub async fn symbol_exists(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> ApiResult<ExistsResponse> {
    let exists = state.repository.exists_by_ticker(&ticker).await?;
    Ok(Json(ApiResponse::success(ExistsResponse { ticker, exists })))
}
