//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/expenses/{expense_id}/edit',
//! use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page showing the selected month's expenses.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for editing an existing expense.
pub const EDIT_EXPENSE_VIEW: &str = "/expenses/{expense_id}/edit";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create an expense.
pub const POST_EXPENSE: &str = "/api/expenses";
/// The route to update an expense. Shares its path with [EDIT_EXPENSE_VIEW]
/// so the edit form can submit to the page it was loaded from.
pub const PUT_EXPENSE: &str = "/expenses/{expense_id}/edit";
/// The route to delete an expense.
pub const DELETE_EXPENSE: &str = "/api/expenses/{expense_id}";
/// The route to toggle the colour theme.
pub const TOGGLE_THEME: &str = "/api/theme";

/// Append a `redirect_url` query parameter to `endpoint_path`.
///
/// Mutation endpoints redirect to this URL on success so the client returns
/// to the page, and the selected period, it came from.
pub fn with_redirect(endpoint_path: &str, redirect_url: &str) -> String {
    match serde_urlencoded::to_string([("redirect_url", redirect_url)]) {
        Ok(param) => format!("{endpoint_path}?{param}"),
        Err(error) => {
            tracing::error!("Could not encode redirect URL {redirect_url}: {error}");
            endpoint_path.to_owned()
        }
    }
}

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/users/{user_id}', '{user_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
