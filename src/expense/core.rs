//! Defines the core data model and ledger operations for expenses.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// The categories offered by the expense form.
///
/// The ledger tolerates any non-empty category text, e.g. from a hand-edited
/// ledger file, so this list constrains the form rather than the model.
pub const CATEGORY_OPTIONS: [&str; 4] = ["Food", "Rent", "Travel", "Other"];

/// Identifies an expense within the ledger.
pub type ExpenseId = i64;

/// A single expense, i.e. an event where money was spent on a given date.
///
/// To create a new `Expense`, validate the raw fields with
/// [ExpenseDraft::new] and pass the draft to [create_expense].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    ///
    /// Derived from the creation time in Unix milliseconds, bumped past the
    /// current maximum on collision so IDs are strictly increasing.
    pub id: ExpenseId,
    /// The amount of money spent. Always greater than zero.
    pub amount: f64,
    /// The category the money was spent on, e.g. "Food".
    pub category: String,
    /// When the money was spent.
    pub date: Date,
    /// A free-form note describing the expense. May be empty.
    #[serde(default)]
    pub note: String,
}

/// A validated candidate expense that has not been assigned an ID yet.
///
/// Drafts are the only path into the ledger for user input, so an expense
/// that reaches the ledger always has a positive amount, a non-empty
/// category, and a date no later than today.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    /// The amount of money spent.
    pub amount: f64,
    /// The category the money was spent on.
    pub category: String,
    /// When the money was spent.
    pub date: Date,
    /// A free-form note describing the expense.
    pub note: String,
}

impl ExpenseDraft {
    /// Validate raw form fields into a draft.
    ///
    /// `today` should be the current date in the server's local timezone.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingFields] naming each required field that is absent or
    ///   blank,
    /// - or [Error::NonPositiveAmount] if the amount is zero or negative,
    /// - or [Error::FutureDate] if the date is after `today`.
    pub fn new(
        amount: Option<f64>,
        category: Option<&str>,
        date: Option<Date>,
        note: Option<&str>,
        today: Date,
    ) -> Result<Self, Error> {
        let mut missing = Vec::new();

        if amount.is_none() {
            missing.push("amount".to_owned());
        }

        let category = category.map(str::trim).unwrap_or_default();
        if category.is_empty() {
            missing.push("category".to_owned());
        }

        if date.is_none() {
            missing.push("date".to_owned());
        }

        match (amount, date) {
            (Some(amount), Some(date)) if missing.is_empty() => {
                if amount <= 0.0 {
                    return Err(Error::NonPositiveAmount(amount));
                }

                if date > today {
                    return Err(Error::FutureDate(date));
                }

                Ok(Self {
                    amount,
                    category: category.to_owned(),
                    date,
                    note: note.unwrap_or_default().to_owned(),
                })
            }
            _ => Err(Error::MissingFields(missing)),
        }
    }
}

// ============================================================================
// LEDGER FUNCTIONS
// ============================================================================

/// Pick the ID for an expense created at `created_at_millis` (Unix time).
///
/// The timestamp itself is the ID unless the ledger already contains an equal
/// or larger ID, in which case the new ID is one past the current maximum.
/// Two expenses created within the same millisecond therefore still get
/// distinct, increasing IDs.
pub fn allocate_expense_id(expenses: &[Expense], created_at_millis: i64) -> ExpenseId {
    match expenses.iter().map(|expense| expense.id).max() {
        Some(max_id) => created_at_millis.max(max_id + 1),
        None => created_at_millis,
    }
}

/// Append a validated draft to the ledger as a new expense.
///
/// Returns the created expense, including its allocated ID.
pub fn create_expense(
    draft: ExpenseDraft,
    created_at_millis: i64,
    expenses: &mut Vec<Expense>,
) -> Expense {
    let expense = Expense {
        id: allocate_expense_id(expenses, created_at_millis),
        amount: draft.amount,
        category: draft.category,
        date: draft.date,
        note: draft.note,
    };

    expenses.push(expense.clone());

    expense
}

/// Retrieve an expense from the ledger by its `id`.
///
/// # Errors
/// This function will return a [Error::NotFound] if `id` does not refer to an
/// expense in the ledger.
pub fn get_expense(id: ExpenseId, expenses: &[Expense]) -> Result<&Expense, Error> {
    expenses
        .iter()
        .find(|expense| expense.id == id)
        .ok_or(Error::NotFound)
}

/// Replace the fields of the expense with `id`, keeping its ID and its place
/// in the ledger.
///
/// # Errors
/// This function will return a [Error::UpdateMissingExpense] if `id` does not
/// refer to an expense in the ledger.
pub fn update_expense(
    id: ExpenseId,
    draft: ExpenseDraft,
    expenses: &mut [Expense],
) -> Result<Expense, Error> {
    let expense = expenses
        .iter_mut()
        .find(|expense| expense.id == id)
        .ok_or(Error::UpdateMissingExpense)?;

    expense.amount = draft.amount;
    expense.category = draft.category;
    expense.date = draft.date;
    expense.note = draft.note;

    Ok(expense.clone())
}

/// Remove the expense with `id` from the ledger.
///
/// # Errors
/// This function will return a [Error::DeleteMissingExpense] if `id` does not
/// refer to an expense in the ledger.
pub fn delete_expense(id: ExpenseId, expenses: &mut Vec<Expense>) -> Result<(), Error> {
    let index = expenses
        .iter()
        .position(|expense| expense.id == id)
        .ok_or(Error::DeleteMissingExpense)?;

    expenses.remove(index);

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
