//! Form input parsing
//!
//! Raw text from the four form fields is turned into an [`ExpenseDraft`]
//! before anything touches the store. Checks run in field order and the
//! first failure wins.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Raw text of the expense form, exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub item: String,
    pub number_of_items: String,
    pub details: String,
    pub cost: String,
}

impl FormInput {
    pub fn new(
        item: impl Into<String>,
        number_of_items: impl Into<String>,
        details: impl Into<String>,
        cost: impl Into<String>,
    ) -> Self {
        Self {
            item: item.into(),
            number_of_items: number_of_items.into(),
            details: details.into(),
            cost: cost.into(),
        }
    }

    /// Validate this input into a draft
    pub fn validate(&self) -> Result<ExpenseDraft, ValidationError> {
        validate_input(&self.item, &self.number_of_items, &self.details, &self.cost)
    }
}

/// A strictly positive, finite cost
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Cost(f64);

impl Cost {
    /// Parse a cost from user text
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| ValidationError::CostNotANumber(s.to_string()))?;

        // "inf" and "NaN" parse as f64 but are not amounts
        if !value.is_finite() {
            return Err(ValidationError::CostNotANumber(s.to_string()));
        }

        Self::try_from(value).map_err(|_| ValidationError::CostNotPositive(s.to_string()))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Cost {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(format!("cost must be a positive amount, got {}", value))
        }
    }
}

impl From<Cost> for f64 {
    fn from(cost: Cost) -> Self {
        cost.0
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Validated input ready to be inserted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub item: String,
    pub quantity: u64,
    pub details: String,
    pub cost: Cost,
}

/// Validate the four form fields
///
/// 1. `item` must not be blank.
/// 2. `number_of_items` must be ASCII digits only (zero is accepted).
/// 3. `details` is free text and always passes.
/// 4. `cost` must parse as a number strictly greater than zero.
pub fn validate_input(
    item: &str,
    number_of_items: &str,
    details: &str,
    cost: &str,
) -> Result<ExpenseDraft, ValidationError> {
    let item = item.trim();
    if item.is_empty() {
        return Err(ValidationError::EmptyItem);
    }

    let count = number_of_items.trim();
    if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidItemCount(number_of_items.to_string()));
    }
    // The column is a signed 64-bit INTEGER
    let quantity: u64 = count
        .parse::<i64>()
        .map(|n| n as u64)
        .map_err(|_| ValidationError::InvalidItemCount(number_of_items.to_string()))?;

    let cost = Cost::parse(cost)?;

    Ok(ExpenseDraft {
        item: item.to_string(),
        quantity,
        details: details.to_string(),
        cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input() {
        let draft = validate_input("Coffee", "2", "morning", "4.50").unwrap();
        assert_eq!(draft.item, "Coffee");
        assert_eq!(draft.quantity, 2);
        assert_eq!(draft.details, "morning");
        assert_eq!(draft.cost.value(), 4.5);
    }

    #[test]
    fn test_empty_item_rejected() {
        assert_eq!(
            validate_input("", "2", "", "4.50"),
            Err(ValidationError::EmptyItem)
        );
        assert_eq!(
            validate_input("   ", "2", "", "4.50"),
            Err(ValidationError::EmptyItem)
        );
    }

    #[test]
    fn test_non_numeric_count_rejected() {
        assert!(matches!(
            validate_input("Coffee", "abc", "", "4.50"),
            Err(ValidationError::InvalidItemCount(_))
        ));
        assert!(matches!(
            validate_input("Coffee", "-1", "", "4.50"),
            Err(ValidationError::InvalidItemCount(_))
        ));
        assert!(matches!(
            validate_input("Coffee", "1.5", "", "4.50"),
            Err(ValidationError::InvalidItemCount(_))
        ));
        assert!(matches!(
            validate_input("Coffee", "", "", "4.50"),
            Err(ValidationError::InvalidItemCount(_))
        ));
    }

    #[test]
    fn test_count_beyond_column_range_rejected() {
        assert!(matches!(
            validate_input("Coffee", "99999999999999999999", "", "4.50"),
            Err(ValidationError::InvalidItemCount(_))
        ));
    }

    #[test]
    fn test_zero_count_accepted() {
        let draft = validate_input("Coffee", "0", "", "4.50").unwrap();
        assert_eq!(draft.quantity, 0);
    }

    #[test]
    fn test_cost_rejections() {
        assert_eq!(
            validate_input("Coffee", "2", "", "-5"),
            Err(ValidationError::CostNotPositive("-5".into()))
        );
        assert_eq!(
            validate_input("Coffee", "2", "", "0"),
            Err(ValidationError::CostNotPositive("0".into()))
        );
        assert_eq!(
            validate_input("Coffee", "2", "", "notanumber"),
            Err(ValidationError::CostNotANumber("notanumber".into()))
        );
        assert_eq!(
            validate_input("Coffee", "2", "", "inf"),
            Err(ValidationError::CostNotANumber("inf".into()))
        );
    }

    #[test]
    fn test_first_failure_wins() {
        // both the item and the cost are bad; the item is reported
        assert_eq!(
            validate_input("", "abc", "", "-5"),
            Err(ValidationError::EmptyItem)
        );
        assert!(matches!(
            validate_input("Coffee", "abc", "", "-5"),
            Err(ValidationError::InvalidItemCount(_))
        ));
    }

    #[test]
    fn test_details_unchecked() {
        let draft = validate_input("Coffee", "1", "  anything goes ✓ ", "1").unwrap();
        assert_eq!(draft.details, "  anything goes ✓ ");
    }

    #[test]
    fn test_form_input_validate() {
        let form = FormInput::new("Tea", "3", "", "2.25");
        assert_eq!(form.validate().unwrap().quantity, 3);
    }

    #[test]
    fn test_cost_display() {
        assert_eq!(Cost::parse("4.5").unwrap().to_string(), "4.50");
    }
}
