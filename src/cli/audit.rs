//! Audit history command

use crate::error::ExpenseResult;

use super::expense::CliContext;

/// `expenses history`: print the most recent audit entries, oldest first
pub fn handle_history(ctx: &CliContext, limit: usize) -> ExpenseResult<()> {
    let Some(logger) = ctx.audit_logger() else {
        println!("Audit logging is disabled.");
        return Ok(());
    };

    let entries = logger.read_recent(limit)?;
    if entries.is_empty() {
        println!("No audit entries yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::handle_add;
    use crate::config::paths::ExpensePaths;
    use crate::config::settings::Settings;
    use crate::models::{FormInput, MonthKey};
    use tempfile::TempDir;

    #[test]
    fn test_history_after_add() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let ctx = CliContext::new(paths, Settings::default()).unwrap();

        handle_history(&ctx, 10).unwrap();

        let month = MonthKey::new(2024, 3).unwrap();
        handle_add(&ctx, month, FormInput::new("Tea", "1", "", "2")).unwrap();
        handle_history(&ctx, 10).unwrap();

        let entries = ctx.audit_logger().unwrap().read_recent(10).unwrap();
        assert_eq!(entries.len(), 1);
    }
}
