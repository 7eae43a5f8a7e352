//! Storage layer for the expense tracker
//!
//! Expenses live in SQLite files inside the data directory, one file per
//! calendar month (or a single legacy file). Files and tables are created
//! lazily the first time a month is touched and are never deleted.

pub mod partition;
pub mod schema;

pub use partition::{Partition, PartitionDb};

use std::path::{Path, PathBuf};

use crate::config::paths::ExpensePaths;
use crate::config::settings::StorageLayout;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{total_cost, Expense, ExpenseDraft, ExpenseId, MonthKey};

/// Row count and total for one partition file
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionSummary {
    pub partition: Partition,
    pub path: PathBuf,
    pub count: usize,
    pub total: f64,
}

/// Resolves months to partition files and opens them
#[derive(Debug, Clone)]
pub struct Store {
    data_dir: PathBuf,
    layout: StorageLayout,
}

impl Store {
    /// Create a store rooted at the configured data directory
    pub fn new(paths: &ExpensePaths, layout: StorageLayout) -> ExpenseResult<Self> {
        paths.ensure_directories()?;
        Ok(Self {
            data_dir: paths.data_dir(),
            layout,
        })
    }

    /// Create a store over an arbitrary directory (useful for testing)
    pub fn with_data_dir(data_dir: impl Into<PathBuf>, layout: StorageLayout) -> ExpenseResult<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)
            .map_err(|e| ExpenseError::Io(format!("Failed to create data directory: {}", e)))?;
        Ok(Self { data_dir, layout })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn layout(&self) -> StorageLayout {
        self.layout
    }

    /// Whether switching months selects a different file
    pub fn is_partitioned(&self) -> bool {
        self.layout == StorageLayout::Monthly
    }

    /// The partition holding expenses for `month`
    pub fn partition_for(&self, month: MonthKey) -> Partition {
        match self.layout {
            StorageLayout::Monthly => Partition::Month(month),
            StorageLayout::Single => Partition::Single,
        }
    }

    /// Full path of a partition file
    pub fn path_for(&self, partition: Partition) -> PathBuf {
        self.data_dir.join(partition.file_name())
    }

    /// Open the partition for `month`, creating the file and table if needed
    ///
    /// Calling this repeatedly is harmless: existing rows and schema are left
    /// untouched.
    pub fn ensure_month_table(&self, month: MonthKey) -> ExpenseResult<PartitionDb> {
        let partition = self.partition_for(month);
        PartitionDb::open(partition, &self.path_for(partition))
    }

    /// All expenses of `month`, ascending by id
    pub fn list_expenses(&self, month: MonthKey) -> ExpenseResult<Vec<Expense>> {
        self.ensure_month_table(month)?.list_expenses()
    }

    /// Insert one expense into `month` and return its id
    pub fn insert_expense(&self, month: MonthKey, draft: &ExpenseDraft) -> ExpenseResult<ExpenseId> {
        self.ensure_month_table(month)?.insert_expense(draft)
    }

    /// Delete ids from `month`; missing ids are ignored
    pub fn delete_expenses(&self, month: MonthKey, ids: &[ExpenseId]) -> ExpenseResult<usize> {
        self.ensure_month_table(month)?.delete_expenses(ids)
    }

    /// Every partition file present in the data directory, newest month first
    pub fn list_partitions(&self) -> ExpenseResult<Vec<PartitionSummary>> {
        let mut partitions = Vec::new();

        match self.layout {
            StorageLayout::Single => {
                let path = self.path_for(Partition::Single);
                if path.exists() {
                    partitions.push(Partition::Single);
                }
            }
            StorageLayout::Monthly => {
                let entries = std::fs::read_dir(&self.data_dir).map_err(|e| {
                    ExpenseError::Io(format!("Failed to read data directory: {}", e))
                })?;
                let mut months: Vec<MonthKey> = entries
                    .filter_map(|entry| entry.ok())
                    .filter_map(|entry| {
                        entry.file_name().to_str().and_then(MonthKey::from_file_name)
                    })
                    .collect();
                months.sort_by(|a, b| b.cmp(a));
                partitions.extend(months.into_iter().map(Partition::Month));
            }
        }

        let summaries = partitions
            .into_iter()
            .filter_map(|partition| {
                let path = self.path_for(partition);
                let rows = match PartitionDb::open_read_only(partition, &path)
                    .and_then(|db| db.list_expenses())
                {
                    Ok(rows) => rows,
                    Err(e) => {
                        tracing::warn!(
                            partition = %partition,
                            path = %path.display(),
                            error = %e,
                            "skipping unreadable partition"
                        );
                        return None;
                    }
                };
                Some(PartitionSummary {
                    partition,
                    path,
                    count: rows.len(),
                    total: total_cost(&rows),
                })
            })
            .collect();

        Ok(summaries)
    }
}
