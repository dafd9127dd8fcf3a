//! Expense log.

use crate::auth::AuthUser;
use crate::error::{Result, ValidationError};
use crate::models::{Expense, NewExpense, RowId};
use crate::remote::{RowStore, Table};
use crate::util::normalize_required_text;

use super::ScopedMirror;

/// Parse user input as a price: finite and strictly positive.
pub fn parse_price(input: &str) -> std::result::Result<f64, ValidationError> {
    match input.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price > 0.0 => Ok(price),
        _ => Err(ValidationError::InvalidPrice),
    }
}

/// Two-decimal currency rendering used for prices and totals.
pub fn format_amount(amount: f64) -> String {
    format!("${amount:.2}")
}

pub struct ExpenseLedger<R> {
    mirror: ScopedMirror<R, Expense>,
}

impl<R: RowStore> ExpenseLedger<R> {
    pub fn new(store: R, user: &AuthUser) -> Self {
        Self {
            mirror: ScopedMirror::new(store, Table::Expenses, user.id.clone()),
        }
    }

    pub fn expenses(&self) -> &[Expense] {
        self.mirror.rows()
    }

    pub async fn fetch(&mut self) -> Result<&[Expense]> {
        let query = self.mirror.scoped_query().order_desc("created_at");
        self.mirror.fetch(&query).await
    }

    /// Validate both fields locally, then insert.
    pub async fn add(&mut self, item_name: &str, price: &str) -> Result<&Expense> {
        let item_name =
            normalize_required_text(item_name).ok_or(ValidationError::EmptyText("Item name"))?;
        let price = parse_price(price)?;
        let owner = self.mirror.owner().to_owned();
        self.mirror
            .create(&NewExpense {
                user_id: &owner,
                item_name: &item_name,
                price,
            })
            .await
    }

    pub async fn delete(&mut self, id: RowId) -> Result<()> {
        self.mirror.remove(id).await
    }

    pub fn total(&self) -> f64 {
        self.expenses().iter().map(|expense| expense.price).sum()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::remote::{MemoryRowStore, Operation};
    use crate::Error;

    fn user() -> AuthUser {
        AuthUser {
            id: "user-1".to_string(),
            email: None,
            created_at: None,
        }
    }

    #[test]
    fn parse_price_accepts_only_positive_finite_numbers() {
        assert_eq!(parse_price(" 45.50 "), Ok(45.5));
        for input in ["", "abc", "0", "-3", "NaN", "inf", "12abc"] {
            assert_eq!(parse_price(input), Err(ValidationError::InvalidPrice), "{input}");
        }
    }

    #[test]
    fn amounts_render_with_two_decimals() {
        assert_eq!(format_amount(47.5), "$47.50");
        assert_eq!(format_amount(0.0), "$0.00");
    }

    #[tokio::test]
    async fn total_sums_added_expenses() {
        let mut ledger = ExpenseLedger::new(MemoryRowStore::new(), &user());
        ledger.add("Lunch", "45.50").await.unwrap();
        ledger.add("Coffee", "2.00").await.unwrap();

        assert!((ledger.total() - 47.5).abs() < f64::EPSILON);
        assert_eq!(format_amount(ledger.total()), "$47.50");
        assert_eq!(ledger.expenses()[0].item_name, "Coffee");
    }

    #[tokio::test]
    async fn invalid_price_never_reaches_the_store() {
        let store = MemoryRowStore::new();
        let mut ledger = ExpenseLedger::new(store.clone(), &user());

        for price in ["abc", "0", "-1"] {
            let error = ledger.add("Lunch", price).await.unwrap_err();
            assert!(matches!(error, Error::Validation(ValidationError::InvalidPrice)));
        }
        assert_eq!(store.call_count(Operation::Insert, Table::Expenses), 0);
        assert!(ledger.expenses().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_from_total() {
        let mut ledger = ExpenseLedger::new(MemoryRowStore::new(), &user());
        let id = ledger.add("Books", "30").await.unwrap().id;
        ledger.add("Bus", "2.5").await.unwrap();

        ledger.delete(id).await.unwrap();
        assert!((ledger.total() - 2.5).abs() < f64::EPSILON);
    }
}
