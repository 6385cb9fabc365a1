//! JSON endpoints for print option configurations.
//!
//! The generic resource routes already serve `GET /api/print-options/{id}`;
//! these add replacing the attribute tree and pricing a selection.

use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};
use tracing::instrument;

use crate::{
    error::AppError,
    models::{PrintConfiguration, PrintOptionGroup, Quote},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/print-options/{id}/configuration",
            put(update_configuration),
        )
        .route("/api/print-options/{id}/quote", get(quote))
}

/// Replace a group's configuration after validating it.
#[instrument(skip(state, configuration))]
pub async fn update_configuration(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(configuration): Json<PrintConfiguration>,
) -> Result<Json<PrintOptionGroup>, AppError> {
    configuration
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let group = state
        .store()
        .print_options()
        .update(id, move |group| group.configuration = configuration)
        .await?;

    tracing::info!(
        id,
        attributes = group.configuration.attributes.len(),
        "Print configuration replaced"
    );
    Ok(Json(group))
}

/// Price a selection: `?quantity=250&Paper Size=A5&Finishing=Gloss`.
#[instrument(skip(state, params))]
pub async fn quote(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(mut params): Query<BTreeMap<String, String>>,
) -> Result<Json<Quote>, AppError> {
    let quantity = parse_quantity(params.remove("quantity"))?;
    let group = state.store().print_options().get(id).await?;

    let quote = group
        .configuration
        .quote(quantity, &params)
        .map_err(|e| AppError::Validation(e.to_string()))?;
    Ok(Json(quote))
}

fn parse_quantity(raw: Option<String>) -> Result<u32, AppError> {
    let raw = raw.ok_or_else(|| AppError::BadRequest("quantity is required".to_string()))?;
    raw.trim()
        .parse::<u32>()
        .map_err(|_| AppError::BadRequest(format!("'{raw}' is not a valid quantity")))
}
