//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use time::Date;

use crate::{alert::Alert, internal_server_error::InternalServerError, not_found::NotFoundError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One or more required form fields were left empty.
    ///
    /// Carries the names of the missing fields so the client can be told
    /// exactly what to fill in.
    #[error("required fields are missing: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// A zero or negative amount was used to create or update an expense.
    #[error("{0} is not a valid amount, amounts must be greater than zero")]
    NonPositiveAmount(f64),

    /// A date in the future was used to create or update an expense.
    ///
    /// Expenses record money that has already been spent, therefore future
    /// dates are not allowed.
    #[error("{0} is a date in the future, which is not allowed")]
    FutureDate(Date),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update an expense that does not exist
    #[error("tried to update an expense that is not in the ledger")]
    UpdateMissingExpense,

    /// Tried to delete an expense that does not exist
    #[error("tried to delete an expense that is not in the ledger")]
    DeleteMissingExpense,

    /// An error occurred while reading or writing the ledger file.
    #[error("could not access the ledger file: {0}")]
    LedgerIoError(String),

    /// The ledger file exists but could not be parsed.
    ///
    /// This is a startup error. Refusing to serve with a half-read ledger
    /// avoids clobbering the file with an empty one on the next save.
    #[error("could not parse the ledger file: {0}")]
    MalformedLedger(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the ledger lock
    #[error("could not acquire the ledger lock")]
    LedgerLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::LedgerIoError(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::LedgerLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Invalid Timezone Settings",
                    &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                ),
            ),
            Error::MissingFields(fields) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Missing required fields",
                    &format!("Please fill in: {}.", fields.join(", ")),
                ),
            ),
            Error::NonPositiveAmount(amount) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid amount",
                    &format!("{amount} is not a valid amount. Enter an amount greater than zero."),
                ),
            ),
            Error::FutureDate(date) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid expense date",
                    &format!(
                        "{date} is a date in the future, which is not allowed. \
                        Choose today or an earlier date."
                    ),
                ),
            ),
            Error::UpdateMissingExpense => (
                StatusCode::NOT_FOUND,
                Alert::error("Could not update expense", "The expense could not be found."),
            ),
            Error::DeleteMissingExpense => (
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not delete expense",
                    "The expense could not be found. \
                    Try refreshing the page to see if the expense has already been deleted.",
                ),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                ),
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}
