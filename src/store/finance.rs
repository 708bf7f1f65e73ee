use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{Transaction, TransactionCategory, TransactionKind};
use crate::error::{AtriumError, Result};

/// Typed update payload for a transaction.
#[derive(Debug, Default)]
pub struct TransactionPatch {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<TransactionCategory>,
    pub account: Option<String>,
    pub recurring: Option<bool>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct FinanceStore {
    transactions: Vec<Transaction>,
    balance: f64,
    monthly_budget: f64,
}

impl FinanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_all(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    /// Prepend, newest first.
    pub fn add(&mut self, tx: Transaction) -> Result<()> {
        if self.transactions.iter().any(|t| t.id == tx.id) {
            return Err(AtriumError::DuplicateId(tx.id.to_string()));
        }
        tracing::debug!(id = %tx.id, amount = tx.amount, kind = %tx.kind, "transaction added");
        self.transactions.insert(0, tx);
        Ok(())
    }

    pub fn update(&mut self, id: &Uuid, patch: TransactionPatch) -> Result<()> {
        let tx = self
            .transactions
            .iter_mut()
            .find(|t| t.id == *id)
            .ok_or_else(|| AtriumError::NotFound(id.to_string()))?;

        if let Some(description) = patch.description {
            tx.description = description;
        }
        if let Some(amount) = patch.amount {
            tx.amount = amount.abs();
        }
        if let Some(category) = patch.category {
            tx.category = category;
        }
        if let Some(account) = patch.account {
            tx.account = account;
        }
        if let Some(recurring) = patch.recurring {
            tx.recurring = recurring;
        }
        Ok(())
    }

    pub fn remove(&mut self, id: &Uuid) -> Result<Transaction> {
        let pos = self
            .transactions
            .iter()
            .position(|t| t.id == *id)
            .ok_or_else(|| AtriumError::NotFound(id.to_string()))?;
        Ok(self.transactions.remove(pos))
    }

    pub fn get(&self, id: &Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == *id)
    }

    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn set_balance(&mut self, balance: f64) {
        self.balance = balance;
    }

    pub fn monthly_budget(&self) -> f64 {
        self.monthly_budget
    }

    pub fn set_monthly_budget(&mut self, budget: f64) {
        self.monthly_budget = budget;
    }

    /// Sum of expense amounts dated in the same calendar month and year as
    /// `now`. Income and other-month expenses are excluded.
    pub fn monthly_spent(&self, now: DateTime<Utc>) -> f64 {
        self.transactions
            .iter()
            .filter(|t| {
                t.kind == TransactionKind::Expense
                    && t.date.year() == now.year()
                    && t.date.month() == now.month()
            })
            .map(|t| t.amount)
            .sum()
    }

    pub fn budget_remaining(&self, now: DateTime<Utc>) -> f64 {
        self.monthly_budget - self.monthly_spent(now)
    }

    /// Number of transactions dated on the same calendar day as `now`.
    pub fn today_count(&self, now: DateTime<Utc>) -> usize {
        self.transactions
            .iter()
            .filter(|t| t.date.date_naive() == now.date_naive())
            .count()
    }

    pub fn income_total(&self) -> f64 {
        self.sum_by_kind(TransactionKind::Income)
    }

    pub fn expense_total(&self) -> f64 {
        self.sum_by_kind(TransactionKind::Expense)
    }

    fn sum_by_kind(&self, kind: TransactionKind) -> f64 {
        self.transactions
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_spent_excludes_income_and_other_months() {
        let now = Utc::now();
        let last_month = now - chrono::Duration::days(40);
        let mut store = FinanceStore::new();

        store
            .add(Transaction::new("Groceries", 50.0, TransactionKind::Expense, now))
            .unwrap();
        store
            .add(Transaction::new("Dinner", 30.0, TransactionKind::Expense, now))
            .unwrap();
        store
            .add(Transaction::new("Salary", 4000.0, TransactionKind::Income, now))
            .unwrap();
        store
            .add(Transaction::new(
                "Old rent",
                900.0,
                TransactionKind::Expense,
                last_month,
            ))
            .unwrap();

        assert_eq!(store.monthly_spent(now), 80.0);
    }

    #[test]
    fn test_today_count() {
        let now = Utc::now();
        let mut store = FinanceStore::new();
        store
            .add(Transaction::new("Coffee", 4.0, TransactionKind::Expense, now))
            .unwrap();
        store
            .add(Transaction::new(
                "Yesterday",
                9.0,
                TransactionKind::Expense,
                now - chrono::Duration::days(1),
            ))
            .unwrap();
        assert_eq!(store.today_count(now), 1);
    }

    #[test]
    fn test_budget_remaining() {
        let now = Utc::now();
        let mut store = FinanceStore::new();
        store.set_monthly_budget(100.0);
        store
            .add(Transaction::new("Books", 25.0, TransactionKind::Expense, now))
            .unwrap();
        assert_eq!(store.budget_remaining(now), 75.0);
    }

    #[test]
    fn test_update_touches_only_named_fields() {
        let now = Utc::now();
        let mut store = FinanceStore::new();
        store
            .add(Transaction::new("Groceries", 50.0, TransactionKind::Expense, now))
            .unwrap();
        store
            .add(Transaction::new("Dinner", 30.0, TransactionKind::Expense, now))
            .unwrap();
        let before = store.all()[0].clone();
        let before_other = store.all()[1].clone();

        store
            .update(
                &before.id,
                TransactionPatch {
                    category: Some(TransactionCategory::Food),
                    ..Default::default()
                },
            )
            .unwrap();

        let after = store.get(&before.id).unwrap();
        assert_eq!(after.category, TransactionCategory::Food);
        assert_eq!(after.description, before.description);
        assert_eq!(after.amount, before.amount);
        assert_eq!(after.account, before.account);
        assert_eq!(after.recurring, before.recurring);

        let other = store.get(&before_other.id).unwrap();
        assert_eq!(
            serde_json::to_string(other).unwrap(),
            serde_json::to_string(&before_other).unwrap()
        );
    }

    #[test]
    fn test_update_normalizes_amount() {
        let now = Utc::now();
        let mut store = FinanceStore::new();
        store
            .add(Transaction::new("Refund", 10.0, TransactionKind::Expense, now))
            .unwrap();
        let id = store.all()[0].id;

        store
            .update(
                &id,
                TransactionPatch {
                    amount: Some(-25.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(store.get(&id).unwrap().amount, 25.0);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let mut store = FinanceStore::new();
        assert!(matches!(
            store.update(&Uuid::new_v4(), TransactionPatch::default()),
            Err(AtriumError::NotFound(_))
        ));
    }
}
