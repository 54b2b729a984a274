//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - HTML view functions assembling the cards, table, and charts
//! - The state and query types used by the handler

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    dashboard::{
        cards::{add_expense_card, comparison_card, period_selector_card, summary_card},
        charts::{
            DashboardChart, category_chart, charts_script, charts_view, comparison_chart,
            daily_chart,
        },
        report::MonthReport,
        tables::expense_table,
    },
    endpoints,
    html::{CARD_STYLE, HeadElement, PAGE_CONTAINER_STYLE, base, dollar_input_styles},
    navigation::NavBar,
    period::Period,
    store::Ledger,
    theme::Theme,
    timezone::today_in,
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The ledger shared between request handlers.
    pub ledger: Arc<Mutex<Ledger>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The selected period, taken from the URL query string.
///
/// Both fields arrive as raw strings so that requests with unparseable
/// values can be redirected to a canonical URL instead of rejected with a
/// client error.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    month: Option<String>,
    #[serde(default)]
    year: Option<String>,
}

/// The canonical dashboard URL for `period`.
pub(super) fn dashboard_url(period: Period) -> String {
    format!(
        "{}?month={}&year={}",
        endpoints::DASHBOARD_VIEW,
        period.month_number(),
        period.year
    )
}

/// Display the expense dashboard for the selected month.
///
/// Requests with missing, unparseable, or out-of-range `month`/`year`
/// parameters are redirected to the canonical URL for today's month so every
/// rendered page has a bookmarkable address.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let Some(today) = today_in(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezoneError(state.local_timezone.clone()).into_response();
    };

    let month: Option<u8> = query.month.as_deref().and_then(|raw| raw.parse().ok());
    let year: Option<i32> = query.year.as_deref().and_then(|raw| raw.parse().ok());
    let period = match (month, year) {
        (Some(month), Some(year)) => Period::from_numbers(year, month),
        _ => None,
    };

    let Some(period) = period else {
        return Redirect::to(&dashboard_url(Period::containing(today))).into_response();
    };

    let (report, theme, ledger_is_empty) = {
        let ledger = match state.ledger.lock() {
            Ok(ledger) => ledger,
            Err(error) => {
                tracing::error!("could not acquire ledger lock: {error}");
                return Error::LedgerLockError.into_response();
            }
        };

        (
            MonthReport::derive(&ledger.expenses, period, today),
            ledger.theme,
            ledger.expenses.is_empty(),
        )
    };

    if ledger_is_empty {
        return dashboard_empty_view(period, today, theme).into_response();
    }

    dashboard_view(&report, today, theme).into_response()
}

/// Builds the charts for `report`.
///
/// The daily and category charts are skipped when their series are empty;
/// the month over month chart always renders since the comparison is defined
/// even for two empty months.
fn build_dashboard_charts(report: &MonthReport) -> Vec<DashboardChart> {
    let mut charts = Vec::with_capacity(3);

    if !report.daily_totals.is_empty() {
        charts.push(DashboardChart {
            id: "daily-chart",
            options: daily_chart(&report.daily_totals, report.period).to_string(),
        });
    }

    if !report.category_totals.is_empty() {
        charts.push(DashboardChart {
            id: "category-chart",
            options: category_chart(&report.category_totals, report.period).to_string(),
        });
    }

    charts.push(DashboardChart {
        id: "comparison-chart",
        options: comparison_chart(&report.comparison, report.period).to_string(),
    });

    charts
}

/// Renders the dashboard page for one month of expenses.
fn dashboard_view(report: &MonthReport, today: Date, theme: Theme) -> Markup {
    let redirect_url = dashboard_url(report.period);
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).with_theme_toggle(theme, &redirect_url);
    let charts = build_dashboard_charts(report);

    let content = html!(
        (nav_bar.into_html())

        main class=(PAGE_CONTAINER_STYLE) {
            div class="w-full max-w-5xl" {
                h1 class="text-2xl font-bold mb-4" { "Dashboard" }

                (period_selector_card(report.period, today))
                (add_expense_card(report.period, today))
                (expense_table(&report.expenses, report.period, &redirect_url))

                div class="grid grid-cols-1 md:grid-cols-2 gap-4 mb-4" {
                    (summary_card(report))
                    (comparison_card(&report.comparison))
                }

                (charts_view(&charts))
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(&charts),
        dollar_input_styles(),
    ];

    base("Dashboard", theme, &scripts, &content)
}

/// Renders the dashboard when the ledger holds no expenses at all.
///
/// The period selector and entry form stay so the first expense can be added
/// from here; the table, summary, and charts are replaced with a prompt.
fn dashboard_empty_view(period: Period, today: Date, theme: Theme) -> Markup {
    let nav_bar =
        NavBar::new(endpoints::DASHBOARD_VIEW).with_theme_toggle(theme, &dashboard_url(period));

    let content = html!(
        (nav_bar.into_html())

        main class=(PAGE_CONTAINER_STYLE) {
            div class="w-full max-w-5xl" {
                h1 class="text-2xl font-bold mb-4" { "Dashboard" }

                (period_selector_card(period, today))
                (add_expense_card(period, today))

                section class={ "text-center " (CARD_STYLE) } {
                    h2 class="text-xl font-semibold mb-3" { "No expenses yet" }
                    p class="text-gray-700 dark:text-gray-300" {
                        "Add your first expense above and the table, summaries,
                        and charts will show up here."
                    }
                }
            }
        }
    );

    base("Dashboard", theme, &[dollar_input_styles()], &content)
}
