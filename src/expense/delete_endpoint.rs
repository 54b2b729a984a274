//! Defines the endpoint for deleting an expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    expense::core::{ExpenseId, delete_expense},
    store::{JsonStore, Ledger},
};

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The ledger shared between request handlers.
    pub ledger: Arc<Mutex<Ledger>>,
    /// The store that persists the ledger.
    pub store: JsonStore,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            store: state.store.clone(),
        }
    }
}

/// The query parameters for the delete expense endpoint.
#[derive(Debug, Deserialize)]
pub struct QueryParams {
    /// The URL to redirect to after deleting the expense.
    redirect_url: Option<String>,
}

/// A route handler for deleting an expense, redirects back to the dashboard
/// view on success so the totals and charts are re-derived.
///
/// An unknown expense ID responds with a not-found alert suggesting a
/// refresh.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Path(expense_id): Path<ExpenseId>,
    Query(query_params): Query<QueryParams>,
) -> Response {
    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::LedgerLockError.into_alert_response();
        }
    };

    let previous_expenses = ledger.expenses.clone();

    if let Err(error) = delete_expense(expense_id, &mut ledger.expenses) {
        return error.into_alert_response();
    }

    if let Err(error) = state.store.save(&ledger) {
        tracing::error!("could not save ledger after deleting expense {expense_id}: {error}");
        // A failed save must leave the in-memory ledger unchanged.
        ledger.expenses = previous_expenses;
        return error.into_alert_response();
    }

    let redirect_url = query_params
        .redirect_url
        .unwrap_or(endpoints::DASHBOARD_VIEW.to_owned());

    (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response()
}
