//! Defines the endpoint for updating an existing expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    expense::{
        core::{ExpenseDraft, ExpenseId, update_expense},
        form::ExpenseForm,
    },
    store::{JsonStore, Ledger},
    timezone::today_in,
};

/// The state needed to update an expense.
#[derive(Debug, Clone)]
pub struct UpdateExpenseState {
    /// The ledger shared between request handlers.
    pub ledger: Arc<Mutex<Ledger>>,
    /// The store that persists the ledger.
    pub store: JsonStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for UpdateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters for the update expense endpoint.
#[derive(Debug, Deserialize)]
pub struct QueryParams {
    /// The URL to redirect to after updating the expense.
    redirect_url: Option<String>,
}

/// A route handler for updating an expense in place, redirects back to the
/// dashboard view on success.
///
/// The replacement fields are validated exactly like a new expense. An
/// unknown expense ID responds with a not-found alert.
pub async fn update_expense_endpoint(
    State(state): State<UpdateExpenseState>,
    Path(expense_id): Path<ExpenseId>,
    Query(query_params): Query<QueryParams>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    let Some(today) = today_in(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezoneError(state.local_timezone).into_alert_response();
    };

    let draft = match ExpenseDraft::new(
        form.amount,
        form.category.as_deref(),
        form.date,
        form.note.as_deref(),
        today,
    ) {
        Ok(draft) => draft,
        Err(error) => return error.into_alert_response(),
    };

    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::LedgerLockError.into_alert_response();
        }
    };

    let previous_expenses = ledger.expenses.clone();

    if let Err(error) = update_expense(expense_id, draft, &mut ledger.expenses) {
        return error.into_alert_response();
    }

    if let Err(error) = state.store.save(&ledger) {
        tracing::error!("could not save ledger after updating expense {expense_id}: {error}");
        // A failed save must leave the in-memory ledger unchanged.
        ledger.expenses = previous_expenses;
        return error.into_alert_response();
    }

    let redirect_url = query_params
        .redirect_url
        .unwrap_or(endpoints::DASHBOARD_VIEW.to_owned());

    (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response()
}
