//! Expense display formatting
//!
//! Formats a month's expenses as a table for terminal output.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::config::settings::Settings;
use crate::models::{total_cost, Expense, MonthKey};
use crate::storage::PartitionSummary;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "No. Items")]
    number_of_items: i64,
    #[tabled(rename = "Note")]
    details: String,
    #[tabled(rename = "Cost")]
    cost: String,
}

#[derive(Tabled)]
struct PartitionRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Expenses")]
    count: usize,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "File")]
    file: String,
}

/// Format one month's expenses with a header and total line
pub fn format_expense_table(month: MonthKey, expenses: &[Expense], settings: &Settings) -> String {
    let mut output = format!("Expenses for {}\n", month.label());

    if expenses.is_empty() {
        output.push_str("No expenses recorded.\n");
        return output;
    }

    let rows: Vec<ExpenseRow> = expenses
        .iter()
        .map(|e| ExpenseRow {
            id: e.id,
            item: e.item.clone(),
            number_of_items: e.number_of_items,
            details: e.details.clone(),
            cost: settings.format_cost(e.cost),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::last()).with(Alignment::right()))
        .to_string();

    output.push_str(&table);
    output.push('\n');
    output.push_str(&format!(
        "{} expense(s), total {}\n",
        expenses.len(),
        settings.format_cost(total_cost(expenses))
    ));
    output
}

/// Format the list of month partitions on disk
pub fn format_partition_list(summaries: &[PartitionSummary], settings: &Settings) -> String {
    if summaries.is_empty() {
        return "No expense databases found.\n".to_string();
    }

    let rows: Vec<PartitionRow> = summaries
        .iter()
        .map(|s| PartitionRow {
            month: s.partition.to_string(),
            count: s.count,
            total: settings.format_cost(s.total),
            file: s
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        })
        .collect();

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coffee() -> Expense {
        Expense {
            id: 1,
            item: "Coffee".into(),
            number_of_items: 2,
            details: "morning".into(),
            cost: 4.5,
        }
    }

    #[test]
    fn test_empty_month() {
        let output = format_expense_table(
            MonthKey::new(2024, 3).unwrap(),
            &[],
            &Settings::default(),
        );
        assert!(output.contains("March 2024"));
        assert!(output.contains("No expenses recorded."));
    }

    #[test]
    fn test_table_contents() {
        let output = format_expense_table(
            MonthKey::new(2024, 3).unwrap(),
            &[coffee()],
            &Settings::default(),
        );
        assert!(output.contains("No. Items"));
        assert!(output.contains("Coffee"));
        assert!(output.contains("morning"));
        assert!(output.contains("$4.50"));
        assert!(output.contains("1 expense(s), total $4.50"));
    }

    #[test]
    fn test_empty_partition_list() {
        assert_eq!(
            format_partition_list(&[], &Settings::default()),
            "No expense databases found.\n"
        );
    }
}
