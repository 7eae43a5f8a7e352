//! CSV Export functionality
//!
//! Writes one month's expenses using the same column names as the
//! `Expenses` table.

use std::io::Write;

use crate::error::ExpenseResult;
use crate::models::Expense;

/// Column header row
pub const CSV_HEADER: [&str; 5] = ["ID", "Item", "NumberOfItems", "Details", "Cost"];

/// Export expenses to CSV
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> ExpenseResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for expense in expenses {
        csv_writer.write_record([
            expense.id.to_string(),
            expense.item.clone(),
            expense.number_of_items.to_string(),
            expense.details.clone(),
            // Full precision; rounding is for display only
            expense.cost.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_with_quoting() {
        let expenses = vec![
            Expense {
                id: 1,
                item: "Coffee".into(),
                number_of_items: 2,
                details: "morning, large".into(),
                cost: 4.5,
            },
            Expense {
                id: 3,
                item: "Bread".into(),
                number_of_items: 1,
                details: String::new(),
                cost: 3.0,
            },
        ];

        let mut buf = Vec::new();
        export_expenses_csv(&expenses, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();

        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "ID,Item,NumberOfItems,Details,Cost");
        assert_eq!(lines[1], "1,Coffee,2,\"morning, large\",4.5");
        assert_eq!(lines[2], "3,Bread,1,,3");
    }

    #[test]
    fn test_export_keeps_sub_cent_costs() {
        let draft = crate::models::validate_input("Screw", "1", "", "0.001").unwrap();
        let expenses = vec![
            Expense {
                id: 1,
                item: draft.item,
                number_of_items: 1,
                details: draft.details,
                cost: draft.cost.value(),
            },
            Expense {
                id: 2,
                item: "Nut".into(),
                number_of_items: 1,
                details: String::new(),
                cost: 4.505,
            },
        ];

        let mut buf = Vec::new();
        export_expenses_csv(&expenses, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();

        assert!(!output.contains(",0.00"));
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[1], "1,Screw,1,,0.001");
        assert_eq!(lines[2], "2,Nut,1,,4.505");
    }

    #[test]
    fn test_export_empty_writes_header_only() {
        let mut buf = Vec::new();
        export_expenses_csv(&[], &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 1);
    }
}
