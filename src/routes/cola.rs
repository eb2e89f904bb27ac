//! Cola registry endpoints.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::cola::{ColaBrand, DEFAULT_BRAND};
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BrandQuery {
    brand: Option<String>,
}

/// Look up a brand, defaulting to Coca-Cola when none is named.
pub async fn get(
    State(state): State<AppState>,
    Query(query): Query<BrandQuery>,
) -> Result<Json<ColaBrand>, AppError> {
    let brand = query.brand.unwrap_or_else(|| DEFAULT_BRAND.to_string());
    tracing::info!(brand = %brand, "Fetching cola brand");

    state
        .colas
        .get(&brand)
        .map(Json)
        .ok_or(AppError::BrandNotFound(brand))
}

/// Register a brand from a JSON body, keyed by its name.
pub async fn register(
    State(state): State<AppState>,
    Json(details): Json<ColaBrand>,
) -> Result<String, AppError> {
    if details.name.trim().is_empty() {
        return Err(AppError::Validation(
            "brand name must not be empty".to_string(),
        ));
    }

    tracing::info!(name = %details.name, owner = %details.owner, "Registering cola brand");
    let name = details.name.clone();
    state.colas.register(details);

    Ok(format!("Cola brand {name} registered successfully."))
}
