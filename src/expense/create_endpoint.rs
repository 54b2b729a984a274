//! Defines the endpoint for creating a new expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    AppState, Error, endpoints,
    expense::{
        core::{ExpenseDraft, create_expense},
        form::ExpenseForm,
    },
    store::{JsonStore, Ledger},
    timezone::today_in,
};

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The ledger shared between request handlers.
    pub ledger: Arc<Mutex<Ledger>>,
    /// The store that persists the ledger.
    pub store: JsonStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters for the create expense endpoint.
#[derive(Debug, Deserialize)]
pub struct QueryParams {
    /// The URL to redirect to after creating the expense.
    redirect_url: Option<String>,
}

/// A route handler for creating a new expense, redirects to the dashboard
/// view on success.
///
/// Validation failures respond with an alert naming the missing fields or the
/// violated date rule and leave the ledger untouched.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
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

    let expense = create_expense(draft, now_unix_millis(), &mut ledger.expenses);

    if let Err(error) = state.store.save(&ledger) {
        tracing::error!(
            "could not save ledger after creating expense {}: {error}",
            expense.id
        );
        // A failed save must leave the in-memory ledger unchanged.
        ledger.expenses.pop();
        return error.into_alert_response();
    }

    let redirect_url = query_params
        .redirect_url
        .unwrap_or(endpoints::DASHBOARD_VIEW.to_owned());

    (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response()
}

fn now_unix_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

#[cfg(test)]
mod create_expense_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use axum_extra::extract::Form;
    use tempfile::TempDir;
    use time::{Duration, OffsetDateTime};

    use crate::{
        endpoints,
        expense::form::ExpenseForm,
        store::JsonStore,
        test_utils::{assert_hx_redirect, parse_html_fragment},
    };

    use super::{CreateExpenseState, QueryParams, create_expense_endpoint};

    fn test_state(temp_dir: &TempDir) -> CreateExpenseState {
        CreateExpenseState {
            ledger: Arc::new(Mutex::new(Default::default())),
            store: JsonStore::new(temp_dir.path().join("outlay.json")),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn valid_form() -> ExpenseForm {
        ExpenseForm {
            amount: Some(12.3),
            category: Some("Food".to_owned()),
            date: Some(OffsetDateTime::now_utc().date()),
            note: Some("groceries".to_owned()),
        }
    }

    #[tokio::test]
    async fn can_create_expense() {
        let temp_dir = TempDir::new().unwrap();
        let state = test_state(&temp_dir);

        let response = create_expense_endpoint(
            State(state.clone()),
            Query(QueryParams {
                redirect_url: Some("/dashboard?month=1&year=2024".to_owned()),
            }),
            Form(valid_form()),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, "/dashboard?month=1&year=2024");

        let ledger = state.ledger.lock().unwrap();
        assert_eq!(ledger.expenses.len(), 1);
        assert_eq!(ledger.expenses[0].amount, 12.3);
        assert_eq!(ledger.expenses[0].note, "groceries");

        let saved = state.store.load().expect("ledger file should load");
        assert_eq!(saved.expenses, ledger.expenses);
    }

    #[tokio::test]
    async fn create_without_redirect_url_falls_back_to_dashboard() {
        let temp_dir = TempDir::new().unwrap();
        let state = test_state(&temp_dir);

        let response = create_expense_endpoint(
            State(state),
            Query(QueryParams { redirect_url: None }),
            Form(valid_form()),
        )
        .await
        .into_response();

        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);
    }

    #[tokio::test]
    async fn create_with_future_date_persists_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let state = test_state(&temp_dir);
        let form = ExpenseForm {
            date: Some(OffsetDateTime::now_utc().date() + Duration::days(1)),
            ..valid_form()
        };

        let response = create_expense_endpoint(
            State(state.clone()),
            Query(QueryParams { redirect_url: None }),
            Form(form),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.ledger.lock().unwrap().expenses.is_empty());
        assert!(
            state.store.load().unwrap().expenses.is_empty(),
            "a rejected expense must not reach the ledger file"
        );
    }

    #[tokio::test]
    async fn create_with_missing_fields_names_them() {
        let temp_dir = TempDir::new().unwrap();
        let state = test_state(&temp_dir);
        let form = ExpenseForm {
            amount: None,
            category: None,
            ..valid_form()
        };

        let response = create_expense_endpoint(
            State(state),
            Query(QueryParams { redirect_url: None }),
            Form(form),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("amount"), "alert text was: {text}");
        assert!(text.contains("category"), "alert text was: {text}");
    }
}
