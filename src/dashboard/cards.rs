//! Card components for the dashboard.
//!
//! Provides the cards surrounding the expense table and charts:
//! - Period selector: month and year dropdowns with previous/next month links
//! - Add expense: the quick entry form for the selected month
//! - Summary: the month's total, categories used, and days without expenses
//! - Comparison: the selected month's spending next to the previous month's

use maud::{Markup, html};
use time::Date;

use crate::{
    dashboard::{
        handlers::dashboard_url,
        report::{Comparison, MissingDays, MonthReport},
    },
    endpoints::{self, with_redirect},
    expense::{ExpenseFormDefaults, expense_form_fields},
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, CATEGORY_BADGE_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        currency_rounded_with_tooltip, format_currency, loading_spinner,
    },
    period::{Period, month_from_number, month_name},
};

/// How many years either side of today's year the year dropdown offers.
const YEAR_RANGE: i32 = 5;

/// Renders the month and year selectors with previous/next month links.
///
/// The selects submit a plain GET so the whole page, charts included,
/// reloads for the new period.
pub(super) fn period_selector_card(period: Period, today: Date) -> Markup {
    let first_year = today.year() - YEAR_RANGE;
    let last_year = today.year() + YEAR_RANGE;

    html! {
        section class={ "mb-4 " (CARD_STYLE) } {
            div class="flex flex-wrap items-center justify-between gap-4" {
                a href=(dashboard_url(period.previous())) class=(LINK_STYLE) {
                    "← Previous"
                }

                form
                    method="get"
                    action=(endpoints::DASHBOARD_VIEW)
                    class="flex items-center gap-2"
                {
                    select
                        name="month"
                        aria-label="Month"
                        class=(FORM_TEXT_INPUT_STYLE)
                        onchange="this.form.submit()"
                    {
                        @for number in 1..=12u8 {
                            @if let Some(month) = month_from_number(number) {
                                option
                                    value=(number)
                                    selected[period.month_number() == number]
                                {
                                    (month_name(month))
                                }
                            }
                        }
                    }

                    select
                        name="year"
                        aria-label="Year"
                        class=(FORM_TEXT_INPUT_STYLE)
                        onchange="this.form.submit()"
                    {
                        @for year in first_year..=last_year {
                            option value=(year) selected[period.year == year] {
                                (year)
                            }
                        }
                        // Bookmarked URLs can select a year outside the
                        // usual range.
                        @if period.year < first_year || period.year > last_year {
                            option value=(period.year) selected {
                                (period.year)
                            }
                        }
                    }
                }

                a href=(dashboard_url(period.next())) class=(LINK_STYLE) {
                    "Next →"
                }
            }
        }
    }
}

/// Renders the quick entry form for the selected month.
///
/// On success the endpoint redirects back to this period's dashboard URL so
/// the new expense shows up in the page the user was looking at.
pub(super) fn add_expense_card(period: Period, today: Date) -> Markup {
    // Default the date into the selected month so entries land on the page
    // being viewed.
    let default_date = if period.contains(today) {
        today
    } else {
        period.first_day()
    };
    let defaults = ExpenseFormDefaults {
        amount: None,
        category: None,
        date: default_date,
        note: None,
        max_date: today,
    };
    let post_url = with_redirect(endpoints::POST_EXPENSE, &dashboard_url(period));

    html! {
        section class={ "mb-4 max-w-md " (CARD_STYLE) } {
            h2 class="text-xl font-semibold mb-4" { "Add Expense" }

            form
                hx-post=(post_url)
                hx-indicator="#indicator"
                hx-target-error="#alert-container"
                class="space-y-4"
            {
                (expense_form_fields(&defaults))

                button type="submit" class=(BUTTON_PRIMARY_STYLE) {
                    span class="inline htmx-indicator" id="indicator" {
                        (loading_spinner())
                    }
                    "Add Expense"
                }
            }
        }
    }
}

/// Renders the month total, the number of categories used, and the
/// missing-days block.
pub(super) fn summary_card(report: &MonthReport) -> Markup {
    html! {
        section class={ "mb-4 " (CARD_STYLE) } {
            h2 class="text-xl font-semibold mb-4" { "Summary" }

            div class="text-3xl font-bold mb-1" { (format_currency(report.total)) }
            div class="text-sm text-gray-600 dark:text-gray-400" {
                "spent in " (report.period.label()) " across "
                @if report.category_totals.len() == 1 {
                    "1 category"
                } @else {
                    (report.category_totals.len()) " categories"
                }
            }

            (missing_days_view(&report.missing_days))
        }
    }
}

/// Renders one of the three missing-days states: the period has not started,
/// every day is covered, or the list of uncovered days.
fn missing_days_view(missing_days: &MissingDays) -> Markup {
    html! {
        div class="mt-4 space-y-2" {
            @if missing_days.future_period {
                p class="text-sm text-gray-600 dark:text-gray-400" {
                    "This month has not started yet."
                }
            } @else if missing_days.days.is_empty() {
                p class="text-sm text-green-600 dark:text-green-400" {
                    "Every day so far has at least one expense."
                }
            } @else {
                p class="text-sm font-medium" {
                    @if missing_days.days.len() == 1 {
                        "1 day without expenses:"
                    } @else {
                        (missing_days.days.len()) " days without expenses:"
                    }
                }
                ul class="flex flex-wrap gap-2" {
                    @for day in &missing_days.days {
                        li class=(CATEGORY_BADGE_STYLE) { (day.day()) }
                    }
                }
            }
        }
    }
}

/// Renders the selected month's total next to the previous month's with a
/// rise/fall indicator.
pub(super) fn comparison_card(comparison: &Comparison) -> Markup {
    html! {
        section class={ "mb-4 " (CARD_STYLE) } {
            h2 class="text-xl font-semibold mb-4" { "Month over Month" }

            div class="flex gap-8" {
                div {
                    div class="text-sm text-gray-600 dark:text-gray-400" { "This month" }
                    div class="text-2xl font-bold" {
                        (currency_rounded_with_tooltip(comparison.current_total))
                    }
                }
                div {
                    div class="text-sm text-gray-600 dark:text-gray-400" { "Last month" }
                    div class="text-2xl font-bold" {
                        (currency_rounded_with_tooltip(comparison.previous_total))
                    }
                }
            }

            (comparison_trend(comparison))
        }
    }
}

fn comparison_trend(comparison: &Comparison) -> Markup {
    // A zero percentage with a nonzero difference means there was nothing
    // recorded last month, so no meaningful percentage exists.
    html! {
        div class="mt-3" {
            @if comparison.difference > 0.0 {
                p class="text-sm font-medium text-red-600 dark:text-red-400" {
                    "↑ " (format_currency(comparison.difference)) " more than last month"
                    @if comparison.percent_change != 0.0 {
                        " (+" (comparison.percent_change) "%)"
                    }
                }
            } @else if comparison.difference < 0.0 {
                p class="text-sm font-medium text-green-600 dark:text-green-400" {
                    "↓ " (format_currency(comparison.difference.abs())) " less than last month"
                    " (" (comparison.percent_change) "%)"
                }
            } @else {
                p class="text-sm text-gray-600 dark:text-gray-400" {
                    "→ Same as last month"
                }
            }
        }
    }
}
