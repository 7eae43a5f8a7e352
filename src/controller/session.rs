//! The active partition session
//!
//! An `ActiveSession` owns the one open partition connection together with
//! the rows of its last refresh. Switching months replaces the connection;
//! the old one is closed when it is dropped.

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::ExpenseResult;
use crate::models::{total_cost, Expense, ExpenseId, MonthKey};
use crate::storage::{Partition, PartitionDb, Store};

use super::StoreCommand;

/// What a batch of commands did
#[derive(Debug, Clone, Default)]
pub struct Applied {
    /// Rows created, as stored
    pub inserted: Vec<Expense>,
    /// Number of rows actually removed
    pub deleted: usize,
    /// Month switched to, if any
    pub switched_to: Option<MonthKey>,
    /// Whether the connection was closed
    pub closed: bool,
    /// One entry per insert and per requested delete
    pub audit: Vec<AuditEntry>,
}

impl Applied {
    /// Append this batch's audit entries
    ///
    /// A failing audit write is logged and otherwise ignored; the store
    /// changes it describes have already been committed.
    pub fn record_audit(&self, logger: Option<&AuditLogger>) {
        let Some(logger) = logger else {
            return;
        };
        if let Err(e) = logger.log_batch(&self.audit) {
            tracing::warn!(error = %e, "failed to write audit log");
        }
    }
}

/// The currently open month partition
pub struct ActiveSession {
    month: MonthKey,
    db: PartitionDb,
    rows: Vec<Expense>,
}

impl ActiveSession {
    /// Open `month`, creating its table if new, and load its rows
    pub fn open(store: &Store, month: MonthKey) -> ExpenseResult<Self> {
        let db = store.ensure_month_table(month)?;
        let rows = db.list_expenses()?;
        Ok(Self { month, db, rows })
    }

    pub fn month(&self) -> MonthKey {
        self.month
    }

    pub fn partition(&self) -> Partition {
        self.db.partition()
    }

    /// Rows of the last refresh, ascending by id
    pub fn rows(&self) -> &[Expense] {
        &self.rows
    }

    /// Ids of the last refresh in display order
    pub fn visible_ids(&self) -> Vec<ExpenseId> {
        self.rows.iter().map(|e| e.id).collect()
    }

    /// Sum of the costs currently shown
    pub fn total(&self) -> f64 {
        total_cost(&self.rows)
    }

    pub fn is_open(&self) -> bool {
        self.db.is_open()
    }

    /// Reload rows from the partition
    pub fn refresh(&mut self) -> ExpenseResult<()> {
        self.rows = self.db.list_expenses()?;
        Ok(())
    }

    /// Run store commands in order, recording what took effect in `applied`
    ///
    /// Each command commits on its own. The first failure stops the batch and
    /// is returned; earlier commands stay applied and stay in `applied`, so
    /// their audit entries can still be written.
    pub fn apply(
        &mut self,
        store: &Store,
        commands: &[StoreCommand],
        applied: &mut Applied,
    ) -> ExpenseResult<()> {
        for command in commands {
            match command {
                StoreCommand::Insert(draft) => {
                    let id = self.db.insert_expense(draft)?;
                    if let Some(expense) = self.db.get_expense(id)? {
                        applied.audit.push(AuditEntry::create(self.partition(), &expense));
                        applied.inserted.push(expense);
                    }
                }
                StoreCommand::Delete(ids) => {
                    let mut before = Vec::with_capacity(ids.len());
                    for &id in ids {
                        before.push((id, self.db.get_expense(id)?));
                    }
                    applied.deleted += self.db.delete_expenses(ids)?;
                    let partition = self.partition();
                    applied.audit.extend(
                        before
                            .iter()
                            .map(|(id, row)| AuditEntry::delete(partition, *id, row.as_ref())),
                    );
                }
                StoreCommand::SwitchMonth(month) => {
                    self.db = store.ensure_month_table(*month)?;
                    self.month = *month;
                    self.rows.clear();
                    applied.switched_to = Some(*month);
                    tracing::info!(month = %month, "switched month");
                }
                StoreCommand::Refresh => self.refresh()?,
                StoreCommand::Close => {
                    self.db.close();
                    applied.closed = true;
                }
            }
        }

        Ok(())
    }

    /// Run a batch into a fresh [`Applied`]
    #[cfg(test)]
    fn apply_all(&mut self, store: &Store, commands: &[StoreCommand]) -> ExpenseResult<Applied> {
        let mut applied = Applied::default();
        self.apply(store, commands, &mut applied)?;
        Ok(applied)
    }
}
