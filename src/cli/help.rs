//! Help text for CLI commands.

/// Get help text for CLI commands.
#[must_use]
pub fn help_text() -> &'static str {
    r#"Expense item commands:

  list [options]      List expenses with their items (default command)
    --expense, -e ID    Only items filed under expense ID
    --location, -l ID   Only items recorded at location ID

  ref REF [REF...]    Show items by reference code
                      A single REF must be numeric once hyphens are removed

  help                Show this help

Output is JSON on stdout. Logs go to stderr (LOG_LEVEL, default "info").
The database is read from DATABASE_PATH (default ./data/expenses.db).

Examples:
  wpos-expenses
  wpos-expenses list --expense 2 --location 1
  wpos-expenses ref 1460990400-1
  wpos-expenses ref 1001 1002 1003
"#
}
