//! Bank controller.

use crate::{
    responses::{ok, ApiResult},
    state::AppState,
};
use cachewise_core::ErrorResponse;
use cachewise_service::BankListing;
use axum::{extract::State, routing::get, Router};
use tracing::debug;

/// Creates the bank router.
pub fn router() -> Router<AppState> {
    Router::new().route("/list", get(list_banks))
}

/// List bank branches.
///
/// The response is cached whole for a few seconds, so `fetched_at` stays
/// constant across requests inside that window.
#[utoipa::path(
    get,
    path = "/bank/list",
    tag = "banks",
    responses(
        (status = 200, description = "Bank catalogue", body = BankListing),
        (status = 500, description = "Catalogue unavailable", body = ErrorResponse)
    )
)]
pub async fn list_banks(State(state): State<AppState>) -> ApiResult<BankListing> {
    debug!("List banks request");

    let listing = state.bank_service.list_banks().await?;
    ok(listing)
}
