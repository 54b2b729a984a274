//! Defines the page for editing an existing expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    response::{IntoResponse, Response},
};
use maud::html;
use serde::Deserialize;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint, with_redirect},
    expense::{
        core::{ExpenseId, get_expense},
        form::{ExpenseFormDefaults, expense_form_fields},
    },
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base,
        dollar_input_styles, loading_spinner,
    },
    navigation::NavBar,
    store::Ledger,
    timezone::today_in,
};

/// The state needed for the edit expense page.
#[derive(Debug, Clone)]
pub struct EditExpensePageState {
    /// The ledger shared between request handlers.
    pub ledger: Arc<Mutex<Ledger>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for EditExpensePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters for the edit expense page.
#[derive(Debug, Deserialize)]
pub struct QueryParams {
    /// The URL to return to after saving or cancelling.
    redirect_url: Option<String>,
}

/// Renders the page for editing an expense, pre-filled with its current
/// values.
///
/// An unknown expense ID renders the 404 page.
pub async fn get_edit_expense_page(
    State(state): State<EditExpensePageState>,
    Path(expense_id): Path<ExpenseId>,
    Query(query_params): Query<QueryParams>,
) -> Response {
    let Some(today) = today_in(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezoneError(state.local_timezone).into_response();
    };

    let (expense, theme) = {
        let ledger = match state.ledger.lock() {
            Ok(ledger) => ledger,
            Err(error) => {
                tracing::error!("could not acquire ledger lock: {error}");
                return Error::LedgerLockError.into_response();
            }
        };

        match get_expense(expense_id, &ledger.expenses) {
            Ok(expense) => (expense.clone(), ledger.theme),
            Err(error) => return error.into_response(),
        }
    };

    let redirect_url = query_params
        .redirect_url
        .unwrap_or(endpoints::DASHBOARD_VIEW.to_owned());
    let update_url = with_redirect(
        &format_endpoint(endpoints::PUT_EXPENSE, expense_id),
        &redirect_url,
    );

    let content = html! {
        (NavBar::new(endpoints::EDIT_EXPENSE_VIEW).into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class={ "max-w-md " (CARD_STYLE) }
            {
                h1 class="text-xl font-bold mb-4" { "Edit Expense" }

                form
                    hx-put=(update_url)
                    hx-indicator="#indicator"
                    hx-target-error="#alert-container"
                    class="space-y-4"
                {
                    (expense_form_fields(&ExpenseFormDefaults {
                        amount: Some(expense.amount),
                        category: Some(&expense.category),
                        date: expense.date,
                        note: Some(&expense.note),
                        max_date: today,
                    }))

                    button
                        type="submit" tabindex="0"
                        class=(BUTTON_PRIMARY_STYLE)
                    {
                        span class="inline htmx-indicator" id="indicator"
                        {
                            (loading_spinner())
                        }
                        "Save Changes"
                    }

                    p class="text-center"
                    {
                        a href=(redirect_url) class=(LINK_STYLE) { "Cancel" }
                    }
                }
            }
        }
    };

    base("Edit Expense", theme, &[dollar_input_styles()], &content).into_response()
}
