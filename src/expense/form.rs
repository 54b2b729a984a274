//! The form fields shared by the create and edit expense forms.
use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    expense::core::CATEGORY_OPTIONS,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The form data for creating or updating an expense.
///
/// Every field is optional so that a submission with blank inputs reaches
/// [ExpenseDraft::new](crate::expense::core::ExpenseDraft::new), which
/// reports the missing fields by name instead of letting the extractor
/// reject the request.
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseForm {
    /// The amount of money spent in dollars.
    #[serde(default)]
    pub amount: Option<f64>,
    /// The category the money was spent on.
    #[serde(default)]
    pub category: Option<String>,
    /// When the money was spent.
    #[serde(default)]
    pub date: Option<Date>,
    /// A free-form note describing the expense.
    #[serde(default)]
    pub note: Option<String>,
}

/// The values to pre-fill the expense form with.
pub struct ExpenseFormDefaults<'a> {
    /// The pre-filled amount, or `None` for a blank input.
    pub amount: Option<f64>,
    /// The pre-selected category, or `None` for the placeholder option.
    pub category: Option<&'a str>,
    /// The pre-filled date.
    pub date: Date,
    /// The pre-filled note.
    pub note: Option<&'a str>,
    /// The latest date the date input accepts, i.e. today.
    pub max_date: Date,
}

/// Renders the amount, category, date, and note fields of the expense form.
///
/// The caller wraps these in a `form` element and supplies the submit button,
/// so the create and edit forms can share one set of fields.
pub fn expense_form_fields(defaults: &ExpenseFormDefaults<'_>) -> Markup {
    let amount_str = defaults.amount.map(|amount| format!("{amount:.2}"));
    // A hand-edited ledger may hold a category outside the usual options.
    // Keep it selectable so editing such an expense does not discard it.
    let extra_category = defaults
        .category
        .filter(|category| !CATEGORY_OPTIONS.contains(category));

    html! {
        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    placeholder="0.01"
                    min="0.01"
                    value=[amount_str.as_deref()]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            select
                name="category"
                id="category"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" { "Select a category" }

                @for option in CATEGORY_OPTIONS {
                    @if Some(option) == defaults.category {
                        option value=(option) selected { (option) }
                    } @else {
                        option value=(option) { (option) }
                    }
                }

                @if let Some(category) = extra_category {
                    option value=(category) selected { (category) }
                }
            }
        }

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                max=(defaults.max_date)
                value=(defaults.date)
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="note"
                class=(FORM_LABEL_STYLE)
            {
                "Note"
            }

            input
                name="note"
                id="note"
                type="text"
                placeholder="What was it for? (optional)"
                value=[defaults.note]
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}
