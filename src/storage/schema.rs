//! Database schema definitions

/// SQL to create the expenses table
pub const CREATE_EXPENSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS Expenses (
    id              INTEGER PRIMARY KEY,
    Item            TEXT,
    NumberOfItems   INTEGER,
    Details         TEXT,
    Cost            REAL
)
"#;

/// Name of the file used by the single-file layout
pub const SINGLE_FILE_NAME: &str = "expenses.db";

pub const SELECT_EXPENSES: &str =
    "SELECT id, Item, NumberOfItems, Details, Cost FROM Expenses ORDER BY id ASC";

pub const INSERT_EXPENSE: &str =
    "INSERT INTO Expenses (Item, NumberOfItems, Details, Cost) VALUES (?1, ?2, ?3, ?4)";

pub const DELETE_EXPENSE: &str = "DELETE FROM Expenses WHERE id = ?1";
