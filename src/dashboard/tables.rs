//! The expense table for the dashboard.
//!
//! Lists the selected month's expenses in ledger order with edit and delete
//! actions on each row. Long notes are truncated on a grapheme boundary with
//! the full note available as a tooltip.

use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    endpoints::{self, format_endpoint, with_redirect},
    expense::Expense,
    html::{
        CATEGORY_BADGE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        edit_delete_action_links, format_currency,
    },
    period::Period,
};

/// The max number of graphemes to display in the note column before
/// truncating and displaying ellipses.
const MAX_NOTE_GRAPHEMES: usize = 32;

/// Renders the selected month's expenses as a table.
///
/// `redirect_url` is attached to the row actions so editing or deleting an
/// expense returns the client to the period it was viewing.
pub(super) fn expense_table(expenses: &[Expense], period: Period, redirect_url: &str) -> Markup {
    html! {
        section class="w-full mx-auto mb-4 relative overflow-x-auto shadow-md rounded-lg" {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400" {
                thead class=(TABLE_HEADER_STYLE) {
                    tr {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Note" }
                        th scope="col" class="px-6 py-3 text-right" { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody {
                    @if expenses.is_empty() {
                        tr class=(TABLE_ROW_STYLE) {
                            td class=(TABLE_CELL_STYLE) colspan="5" {
                                "No expenses recorded for " (period.label()) " yet."
                            }
                        }
                    }
                    @for expense in expenses {
                        (expense_row(expense, redirect_url))
                    }
                }
            }
        }
    }
}

fn expense_row(expense: &Expense, redirect_url: &str) -> Markup {
    let edit_url = with_redirect(
        &format_endpoint(endpoints::EDIT_EXPENSE_VIEW, expense.id),
        redirect_url,
    );
    let delete_url = with_redirect(
        &format_endpoint(endpoints::DELETE_EXPENSE, expense.id),
        redirect_url,
    );
    let (note, tooltip) = format_note(&expense.note);
    let confirm_message = format!(
        "Are you sure you want to delete the {} expense from {}? This cannot be undone.",
        format_currency(expense.amount),
        expense.date
    );

    html! {
        tr class=(TABLE_ROW_STYLE) {
            td class=(TABLE_CELL_STYLE) { time datetime=(expense.date) { (expense.date) } }
            td class=(TABLE_CELL_STYLE) {
                span class=(CATEGORY_BADGE_STYLE) { (expense.category) }
            }
            td class=(TABLE_CELL_STYLE) title=[tooltip] {
                @if note.is_empty() {
                    span class="text-gray-400 dark:text-gray-500" { "-" }
                } @else {
                    (note)
                }
            }
            td class="px-6 py-4 text-right" { (format_currency(expense.amount)) }
            td class=(TABLE_CELL_STYLE) {
                (edit_delete_action_links(&edit_url, &delete_url, &confirm_message))
            }
        }
    }
}

fn format_note(note: &str) -> (String, Option<&str>) {
    let note_length = note.graphemes(true).count();

    if note_length <= MAX_NOTE_GRAPHEMES {
        (note.to_owned(), None)
    } else {
        let truncated: String = note.graphemes(true).take(MAX_NOTE_GRAPHEMES - 3).collect();
        let truncated = truncated + "...";
        (truncated, Some(note))
    }
}

#[cfg(test)]
mod tables_tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{expense::Expense, period::Period, test_utils::assert_valid_html};

    use super::{expense_table, format_note};

    fn expense(id: i64, amount: f64, category: &str, note: &str) -> Expense {
        Expense {
            id,
            amount,
            category: category.to_owned(),
            date: date!(2024 - 01 - 05),
            note: note.to_owned(),
        }
    }

    fn january() -> Period {
        Period::from_numbers(2024, 1).expect("test period should be valid")
    }

    #[test]
    fn table_lists_expenses_with_row_actions() {
        let expenses = vec![
            expense(1, 12.3, "Food", "groceries"),
            expense(2, 800.0, "Rent", ""),
        ];

        let table = expense_table(&expenses, january(), "/dashboard?month=1&year=2024");

        let html = Html::parse_fragment(&table.into_string());
        assert_valid_html(&html);

        let rows: Vec<_> = html.select(&Selector::parse("tbody tr").unwrap()).collect();
        assert_eq!(rows.len(), 2);

        let edit_link = rows[0]
            .select(&Selector::parse("a").unwrap())
            .next()
            .expect("expected an edit link");
        assert_eq!(
            edit_link.value().attr("href"),
            Some("/expenses/1/edit?redirect_url=%2Fdashboard%3Fmonth%3D1%26year%3D2024")
        );

        let delete_button = rows[0]
            .select(&Selector::parse("button").unwrap())
            .next()
            .expect("expected a delete button");
        assert_eq!(
            delete_button.value().attr("hx-delete"),
            Some("/api/expenses/1?redirect_url=%2Fdashboard%3Fmonth%3D1%26year%3D2024")
        );

        let badge = rows[0]
            .select(&Selector::parse("span").unwrap())
            .next()
            .expect("expected a category badge");
        assert_eq!(badge.text().collect::<String>(), "Food");
    }

    #[test]
    fn table_shows_message_for_period_without_expenses() {
        let table = expense_table(&[], january(), "/dashboard?month=1&year=2024");

        let html = table.into_string();
        assert!(html.contains("No expenses recorded for January 2024"));
    }

    #[test]
    fn long_notes_truncate_with_a_tooltip() {
        let long_note = "weekly groceries from the corner store on main street";
        let expenses = vec![expense(1, 12.3, "Food", long_note)];

        let table = expense_table(&expenses, january(), "/dashboard?month=1&year=2024");

        let html = Html::parse_fragment(&table.into_string());
        let note_cell = html
            .select(&Selector::parse("td[title]").unwrap())
            .next()
            .expect("expected a truncated note cell");
        assert_eq!(note_cell.value().attr("title"), Some(long_note));
        assert!(note_cell.text().collect::<String>().ends_with("..."));
    }

    #[test]
    fn format_note_keeps_short_notes_intact() {
        let (note, tooltip) = format_note("groceries");

        assert_eq!(note, "groceries");
        assert_eq!(tooltip, None);
    }

    #[test]
    fn format_note_counts_graphemes_not_bytes() {
        // 32 four-byte emoji stay within the limit even though the string is
        // well over 32 bytes.
        let at_limit = "🙂".repeat(32);

        let (note, tooltip) = format_note(&at_limit);

        assert_eq!(note, at_limit);
        assert_eq!(tooltip, None);

        let over_limit = "🙂".repeat(33);

        let (note, tooltip) = format_note(&over_limit);

        assert_eq!(note, format!("{}...", "🙂".repeat(29)));
        assert_eq!(tooltip, Some(over_limit.as_str()));
    }
}
