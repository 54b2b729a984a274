//! The persisted dark/light theme preference and its toggle endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error, endpoints,
    store::{JsonStore, Ledger},
};

/// The UI theme to render pages with.
///
/// Tailwind's `dark:` variants key off a `dark` class on the document root,
/// so the theme maps directly to that class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark backgrounds with light text. The default.
    #[default]
    Dark,
    /// Light backgrounds with dark text.
    Light,
}

impl Theme {
    /// The opposite theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// The class to set on the `<html>` element.
    pub fn html_class(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "",
        }
    }

    /// The label for the toggle button, naming the theme a click switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Dark => "Switch to light mode",
            Theme::Light => "Switch to dark mode",
        }
    }
}

/// The state needed to toggle the theme.
#[derive(Debug, Clone)]
pub struct ThemeState {
    /// The in-memory ledger shared across handlers.
    pub ledger: Arc<Mutex<Ledger>>,
    /// The store used to persist ledger changes.
    pub store: JsonStore,
}

impl FromRef<AppState> for ThemeState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            store: state.store.clone(),
        }
    }
}

/// The query parameters for the theme toggle endpoint.
#[derive(Debug, Deserialize)]
pub struct ThemeQueryParams {
    /// The URL to redirect to after toggling.
    pub redirect_url: Option<String>,
}

/// A route handler that flips the persisted theme and redirects back.
pub async fn toggle_theme_endpoint(
    State(state): State<ThemeState>,
    Query(query_params): Query<ThemeQueryParams>,
) -> Response {
    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::LedgerLockError.into_alert_response();
        }
    };

    ledger.theme = ledger.theme.toggled();

    if let Err(error) = state.store.save(&ledger) {
        tracing::error!("could not save ledger: {error}");
        // A failed save must leave the in-memory ledger unchanged.
        ledger.theme = ledger.theme.toggled();
        return error.into_alert_response();
    }

    let redirect_url = query_params
        .redirect_url
        .unwrap_or(endpoints::DASHBOARD_VIEW.to_owned());

    (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response()
}
