//! Expense CLI commands
//!
//! Non-interactive counterparts of the form: list, add, delete, export.
//! Add and delete go through the same controller as the TUI, so validation
//! and audit logging behave identically.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use crate::audit::AuditLogger;
use crate::config::paths::ExpensePaths;
use crate::config::settings::Settings;
use crate::controller::{dispatch, ActiveSession, Applied, ControllerState, UiEvent};
use crate::display::{format_expense_table, format_partition_list};
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{export_expenses_csv, export_expenses_json, ExportFormat};
use crate::models::{ExpenseId, FormInput, MonthKey};
use crate::storage::Store;

/// Everything a command needs
pub struct CliContext {
    pub paths: ExpensePaths,
    pub settings: Settings,
    pub store: Store,
}

impl CliContext {
    pub fn new(paths: ExpensePaths, settings: Settings) -> ExpenseResult<Self> {
        let store = Store::new(&paths, settings.storage_layout)?;
        Ok(Self {
            paths,
            settings,
            store,
        })
    }

    /// Audit logger, if auditing is enabled
    pub fn audit_logger(&self) -> Option<AuditLogger> {
        self.settings
            .audit_enabled
            .then(|| AuditLogger::new(self.paths.audit_log()))
    }

    /// Open `month`, build one controller event from its current rows and
    /// run the resulting commands
    fn run_event<F>(&self, month: MonthKey, make_event: F) -> ExpenseResult<Applied>
    where
        F: FnOnce(&[ExpenseId]) -> UiEvent,
    {
        let mut session = ActiveSession::open(&self.store, month)?;
        let visible = session.visible_ids();
        let event = make_event(&visible);
        let state = ControllerState::new(month, self.store.is_partitioned()).with_visible_ids(visible);

        let transition = dispatch(&state, &event);
        let mut applied = Applied::default();
        let result = session.apply(&self.store, &transition.commands, &mut applied);
        applied.record_audit(self.audit_logger().as_ref());
        result?;
        Ok(applied)
    }
}

/// `expenses list`
pub fn handle_list(ctx: &CliContext, month: MonthKey) -> ExpenseResult<()> {
    let expenses = ctx.store.list_expenses(month)?;
    print!("{}", format_expense_table(month, &expenses, &ctx.settings));
    Ok(())
}

/// `expenses add`
pub fn handle_add(ctx: &CliContext, month: MonthKey, input: FormInput) -> ExpenseResult<ExpenseId> {
    // Validate up front so the error keeps its type
    input.validate()?;

    let applied = ctx.run_event(month, |_| UiEvent::AddExpense(input))?;
    let expense = applied
        .inserted
        .first()
        .ok_or_else(|| ExpenseError::Database("Inserted expense could not be read back".into()))?;

    println!(
        "Added expense #{} \"{}\" ({}) to {}",
        expense.id,
        expense.item,
        ctx.settings.format_cost(expense.cost),
        month.label()
    );
    Ok(expense.id)
}

/// `expenses delete`
pub fn handle_delete(ctx: &CliContext, month: MonthKey, ids: &[ExpenseId]) -> ExpenseResult<usize> {
    // The controller works on row positions; map the requested ids onto them
    let applied = ctx.run_event(month, |visible| UiEvent::DeleteExpense {
        selected_rows: visible
            .iter()
            .enumerate()
            .filter(|(_, id)| ids.contains(id))
            .map(|(row, _)| row)
            .collect(),
    })?;
    let removed = applied.deleted;

    println!("Deleted {} of {} requested expense(s) from {}", removed, ids.len(), month.label());
    Ok(removed)
}

/// `expenses months`
pub fn handle_months(ctx: &CliContext) -> ExpenseResult<()> {
    let summaries = ctx.store.list_partitions()?;
    print!("{}", format_partition_list(&summaries, &ctx.settings));
    Ok(())
}

/// Where `export --save` writes: `exports/<partition file stem>.<ext>`
pub fn default_export_path(ctx: &CliContext, month: MonthKey, format: ExportFormat) -> PathBuf {
    let file_name = ctx.store.partition_for(month).file_name();
    let stem = file_name.strip_suffix(".db").unwrap_or(&file_name);
    ctx.paths
        .export_dir()
        .join(format!("{}.{}", stem, format.extension()))
}

/// `expenses export`
///
/// Writes to `output` when given, otherwise to stdout.
pub fn handle_export(
    ctx: &CliContext,
    month: MonthKey,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> ExpenseResult<()> {
    let expenses = ctx.store.list_expenses(month)?;
    let partition = ctx.store.partition_for(month);

    match output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                ExpenseError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            write_export(format, partition, &expenses, file)?;
            println!("Exported {} expense(s) to {}", expenses.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            write_export(format, partition, &expenses, stdout.lock())?;
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    format: ExportFormat,
    partition: crate::storage::Partition,
    expenses: &[crate::models::Expense],
    writer: W,
) -> ExpenseResult<()> {
    match format {
        ExportFormat::Csv => export_expenses_csv(expenses, writer),
        ExportFormat::Json => export_expenses_json(partition, expenses, writer),
    }
}
