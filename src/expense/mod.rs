//! Expense management for the application.
//!
//! This module contains everything related to expenses:
//! - The [Expense] model, the validated [ExpenseDraft], and the ledger
//!   functions that create, look up, update, and delete expenses
//! - The form fields shared by the create and edit forms
//! - The endpoints for creating, updating, and deleting expenses, and the
//!   edit page

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod form;

pub use core::{
    CATEGORY_OPTIONS, Expense, ExpenseDraft, ExpenseId, create_expense, delete_expense,
    get_expense, update_expense,
};
pub use create_endpoint::{CreateExpenseState, create_expense_endpoint};
pub use delete_endpoint::{DeleteExpenseState, delete_expense_endpoint};
pub use edit_endpoint::{UpdateExpenseState, update_expense_endpoint};
pub use edit_page::{EditExpensePageState, get_edit_expense_page};
pub use form::{ExpenseForm, ExpenseFormDefaults, expense_form_fields};
