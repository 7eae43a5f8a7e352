//! Month partition databases
//!
//! Each partition is a standalone SQLite file holding one `Expenses` table.
//! Every statement runs in autocommit mode, so each insert or delete is
//! durable as soon as the call returns.

use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use std::fmt;
use std::path::{Path, PathBuf};

use super::schema;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseDraft, ExpenseId, MonthKey};

/// Which storage file a set of expenses lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    /// `expenses_<YYYY>_<MM>.db`
    Month(MonthKey),
    /// The legacy `expenses.db`
    Single,
}

impl Partition {
    /// File name inside the data directory
    pub fn file_name(&self) -> String {
        match self {
            Self::Month(month) => month.file_name(),
            Self::Single => schema::SINGLE_FILE_NAME.to_string(),
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month(month) => write!(f, "{}", month),
            Self::Single => write!(f, "{}", schema::SINGLE_FILE_NAME),
        }
    }
}

/// An open connection to one partition file
pub struct PartitionDb {
    partition: Partition,
    path: PathBuf,
    conn: Option<Connection>,
}

impl PartitionDb {
    /// Open (creating if absent) the file at `path` and make sure the
    /// `Expenses` table exists
    pub fn open(partition: Partition, path: &Path) -> ExpenseResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            partition,
            path: path.to_path_buf(),
            conn: Some(conn),
        };
        db.ensure_schema()?;
        tracing::debug!(partition = %partition, path = %path.display(), "opened partition");
        Ok(db)
    }

    /// Open an existing file for reading only
    ///
    /// Nothing is created: a missing file is an error and the schema is left
    /// untouched.
    pub fn open_read_only(partition: Partition, path: &Path) -> ExpenseResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        tracing::debug!(partition = %partition, path = %path.display(), "opened partition read-only");
        Ok(Self {
            partition,
            path: path.to_path_buf(),
            conn: Some(conn),
        })
    }

    /// Create the `Expenses` table if it does not exist yet
    pub fn ensure_schema(&self) -> ExpenseResult<()> {
        self.connection()?.execute(schema::CREATE_EXPENSES_TABLE, [])?;
        Ok(())
    }

    fn connection(&self) -> ExpenseResult<&Connection> {
        self.conn
            .as_ref()
            .ok_or_else(|| ExpenseError::Database(format!("Partition {} is closed", self.partition)))
    }

    pub fn partition(&self) -> Partition {
        self.partition
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All rows ordered by ascending id
    pub fn list_expenses(&self) -> ExpenseResult<Vec<Expense>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(schema::SELECT_EXPENSES)?;
        let rows = stmt.query_map([], expense_from_row)?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Look up a single row
    pub fn get_expense(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        let expense = self
            .connection()?
            .query_row(
                "SELECT id, Item, NumberOfItems, Details, Cost FROM Expenses WHERE id = ?1",
                params![id],
                expense_from_row,
            )
            .optional()?;
        Ok(expense)
    }

    /// Append a row and return the id the database assigned to it
    pub fn insert_expense(&self, draft: &ExpenseDraft) -> ExpenseResult<ExpenseId> {
        let conn = self.connection()?;
        let quantity = i64::try_from(draft.quantity).map_err(|_| {
            ExpenseError::Database(format!("Item count {} does not fit the column", draft.quantity))
        })?;

        conn.execute(
            schema::INSERT_EXPENSE,
            params![draft.item, quantity, draft.details, draft.cost.value()],
        )?;

        let id = conn.last_insert_rowid();
        tracing::info!(partition = %self.partition, id, item = %draft.item, "inserted expense");
        Ok(id)
    }

    /// Delete every row whose id is in `ids`
    ///
    /// Ids that are not present are skipped. Returns how many rows were
    /// actually removed.
    pub fn delete_expenses(&self, ids: &[ExpenseId]) -> ExpenseResult<usize> {
        let conn = self.connection()?;
        let mut removed = 0;
        for id in ids {
            removed += conn.execute(schema::DELETE_EXPENSE, params![id])?;
        }
        tracing::info!(partition = %self.partition, requested = ids.len(), removed, "deleted expenses");
        Ok(removed)
    }

    /// Close the connection; later calls fail with a database error
    pub fn close(&mut self) {
        if self.conn.take().is_some() {
            tracing::debug!(partition = %self.partition, "closed partition");
        }
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }
}

impl Drop for PartitionDb {
    fn drop(&mut self) {
        self.close();
    }
}

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        item: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        number_of_items: row.get::<_, Option<i64>>(2)?.unwrap_or_default(),
        details: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        cost: row.get::<_, Option<f64>>(4)?.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validate_input;
    use tempfile::TempDir;

    fn open_test_db() -> (PartitionDb, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let month = MonthKey::new(2024, 3).unwrap();
        let path = temp_dir.path().join(month.file_name());
        let db = PartitionDb::open(Partition::Month(month), &path).unwrap();
        (db, temp_dir)
    }

    fn draft(item: &str, count: &str, details: &str, cost: &str) -> ExpenseDraft {
        validate_input(item, count, details, cost).unwrap()
    }

    #[test]
    fn test_open_creates_file() {
        let (db, _temp) = open_test_db();
        assert!(db.path().exists());
        assert!(db.list_expenses().unwrap().is_empty());
    }

    #[test]
    fn test_insert_and_list() {
        let (db, _temp) = open_test_db();
        let id = db.insert_expense(&draft("Coffee", "2", "morning", "4.50")).unwrap();

        let rows = db.list_expenses().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, id);
        assert_eq!(rows[0].item, "Coffee");
        assert_eq!(rows[0].number_of_items, 2);
        assert_eq!(rows[0].details, "morning");
        assert_eq!(rows[0].cost, 4.5);
    }

    #[test]
    fn test_ids_are_fresh() {
        let (db, _temp) = open_test_db();
        let first = db.insert_expense(&draft("A", "1", "", "1")).unwrap();
        let second = db.insert_expense(&draft("B", "1", "", "1")).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let (db, _temp) = open_test_db();
        db.insert_expense(&draft("A", "1", "", "1")).unwrap();
        let before = db.list_expenses().unwrap();

        assert_eq!(db.delete_expenses(&[9999]).unwrap(), 0);
        assert_eq!(db.list_expenses().unwrap(), before);
    }

    #[test]
    fn test_get_expense() {
        let (db, _temp) = open_test_db();
        let id = db.insert_expense(&draft("Tea", "1", "", "2")).unwrap();
        assert_eq!(db.get_expense(id).unwrap().unwrap().item, "Tea");
        assert!(db.get_expense(id + 100).unwrap().is_none());
    }

    #[test]
    fn test_closed_partition_errors() {
        let (mut db, _temp) = open_test_db();
        db.close();
        assert!(!db.is_open());
        assert!(db.list_expenses().unwrap_err().is_database());
    }

    #[test]
    fn test_reads_rows_written_by_other_tools() {
        let (db, _temp) = open_test_db();
        let conn = Connection::open(db.path()).unwrap();
        conn.execute(
            "INSERT INTO Expenses (Item, NumberOfItems, Details, Cost) VALUES (NULL, -3, NULL, 0)",
            [],
        )
        .unwrap();

        let rows = db.list_expenses().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].item, "");
        assert_eq!(rows[0].number_of_items, -3);
    }

    #[test]
    fn test_partition_names() {
        let month = MonthKey::new(2024, 3).unwrap();
        assert_eq!(Partition::Month(month).file_name(), "expenses_2024_03.db");
        assert_eq!(Partition::Single.file_name(), "expenses.db");
        assert_eq!(Partition::Month(month).to_string(), "2024-03");
    }
}
