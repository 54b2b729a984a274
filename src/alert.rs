//! Alert fragments for reporting the outcome of form actions.
//!
//! Alerts land in the `#alert-container` element of the base layout because
//! failing responses are routed there by `hx-target-error`. Successful form
//! actions redirect instead, so alerts only ever report failures.

use axum::response::{IntoResponse, Response};
use maud::{Markup, PreEscaped, html};

/// A dismissible message reporting a failed form action.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    message: String,
    details: String,
}

impl Alert {
    /// Create an alert with a short `message` and explanatory `details`.
    ///
    /// `details` may be empty, in which case only the message line renders.
    pub fn error(message: &str, details: &str) -> Self {
        Self {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Render the alert as an out-of-band fragment for `#alert-container`.
    pub fn into_html(self) -> Markup {
        html! {
            div hx-swap-oob="innerHTML:#alert-container"
            {
                div
                    class="flex items-start p-4 rounded-lg shadow-sm
                        text-red-800 bg-red-50 dark:bg-gray-800 dark:text-red-400"
                    role="alert"
                    data-alert="error"
                {
                    div class="text-sm font-medium"
                    {
                        (self.message)

                        @if !self.details.is_empty() {
                            p class="font-normal mt-1" { (self.details) }
                        }
                    }

                    button
                        type="button"
                        class="ms-auto -mx-1.5 -my-1.5 rounded-lg p-1.5 inline-flex
                            items-center justify-center h-8 w-8
                            hover:bg-gray-200 dark:hover:bg-gray-700"
                        aria-label="Close"
                        onclick="document.getElementById('alert-container').classList.add('hidden')"
                    {
                        (PreEscaped("&times;"))
                    }
                }

                // The container ships hidden so empty swaps leave no visible box.
                script
                {
                    (PreEscaped(
                        "document.getElementById('alert-container').classList.remove('hidden');"
                    ))
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

#[cfg(test)]
mod alert_tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn renders_message_and_details() {
        let alert = Alert::error("Could not save", "Check the server logs.");

        let html = Html::parse_fragment(&alert.into_html().into_string());

        let selector = Selector::parse("div[role='alert'][data-alert='error']").unwrap();
        let text = html
            .select(&selector)
            .next()
            .expect("expected an error alert")
            .text()
            .collect::<String>();
        assert!(text.contains("Could not save"));
        assert!(text.contains("Check the server logs."));
    }

    #[test]
    fn omits_the_details_line_when_empty() {
        let alert = Alert::error("Could not save", "");

        let html = Html::parse_fragment(&alert.into_html().into_string());

        assert!(html.select(&Selector::parse("p").unwrap()).next().is_none());
    }

    #[test]
    fn targets_alert_container_out_of_band() {
        let alert = Alert::error("Could not save", "");

        let rendered = alert.into_html().into_string();

        assert!(rendered.contains("hx-swap-oob=\"innerHTML:#alert-container\""));
    }
}
