//! CLI command definitions and parsing.

use super::errors::CommandParseError;
use crate::error::StorageError;
use crate::repository::{ExpenseItemRepository, RefSelector};
use crate::traits::DbAccess;

/// Expense item CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseCommands {
    /// List expenses joined with their items.
    List {
        /// Filter by parent expense.
        expense_id: Option<i64>,
        /// Filter by location.
        location_id: Option<i64>,
    },

    /// Look items up by reference code.
    Ref {
        /// One code, or several for a set lookup.
        refs: Vec<String>,
    },

    /// Show help.
    Help,
}

impl ExpenseCommands {
    /// Parse a command from string arguments.
    ///
    /// No arguments, or arguments starting with a flag, mean `list`.
    pub fn parse(args: &[String]) -> Result<Self, CommandParseError> {
        let Some(first) = args.first() else {
            return Ok(Self::List {
                expense_id: None,
                location_id: None,
            });
        };

        if first.starts_with('-') && !matches!(first.as_str(), "-h" | "--help") {
            return Self::parse_list(args);
        }

        match first.to_lowercase().as_str() {
            "list" | "ls" => Self::parse_list(&args[1..]),

            "ref" => {
                if args.len() < 2 {
                    return Err(CommandParseError::MissingValue("ref".into()));
                }
                Ok(Self::Ref {
                    refs: args[1..].to_vec(),
                })
            }

            "help" | "-h" | "--help" => Ok(Self::Help),

            _ => Err(CommandParseError::UnknownCommand(first.clone())),
        }
    }

    fn parse_list(args: &[String]) -> Result<Self, CommandParseError> {
        let mut expense_id = None;
        let mut location_id = None;

        let mut i = 0;
        while i < args.len() {
            let flag = match args[i].as_str() {
                "--expense" | "-e" => "--expense",
                "--location" | "-l" => "--location",
                other => return Err(CommandParseError::UnknownFlag(other.to_string())),
            };
            i += 1;
            let value = args
                .get(i)
                .ok_or_else(|| CommandParseError::MissingValue(flag.into()))?;
            let id = value
                .parse::<i64>()
                .map_err(|_| CommandParseError::InvalidValue {
                    flag: flag.into(),
                    value: value.clone(),
                })?;
            if flag == "--expense" {
                expense_id = Some(id);
            } else {
                location_id = Some(id);
            }
            i += 1;
        }

        Ok(Self::List {
            expense_id,
            location_id,
        })
    }

    /// Run the command and render its result as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the lookup fails or rejects its input.
    pub async fn execute<D: DbAccess>(
        &self,
        repo: &ExpenseItemRepository<D>,
    ) -> Result<String, StorageError> {
        let value = match self {
            Self::List {
                expense_id,
                location_id,
            } => serde_json::to_value(repo.get(*expense_id, *location_id).await?),
            Self::Ref { refs } => {
                let selector = match refs.as_slice() {
                    [single] => RefSelector::from(single.as_str()),
                    many => RefSelector::from(many.to_vec()),
                };
                serde_json::to_value(repo.get_by_ref(selector).await?)
            }
            Self::Help => return Ok(super::help_text().to_string()),
        };

        value
            .and_then(|v| serde_json::to_string_pretty(&v))
            .map_err(|e| StorageError::Internal {
                message: format!("Failed to render output: {e}"),
            })
    }
}
