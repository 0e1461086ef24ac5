//! Finance domain models.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::number_utils::finite_or_zero;
use crate::utils::serde_utils::null_as_default;

/// Colours picked from when an account is created without one.
pub const ACCOUNT_COLOR_PALETTE: [&str; 6] = [
    "#1e40af", "#047857", "#b91c1c", "#7c3aed", "#000000", "#374151",
];

/// Placeholder for accounts created without an account number.
pub const DEFAULT_ACCOUNT_LAST4: &str = "0000";

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

/// A single income or expense entry. `date` is a day or an RFC 3339 timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub date: String,
}

impl Transaction {
    /// Replaces a non-finite amount with 0.
    pub fn normalized(mut self) -> Self {
        self.amount = finite_or_zero(self.amount);
        self
    }

    /// Amount with sign applied: income positive, expense negative.
    pub fn signed_amount(&self) -> f64 {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BankAccountType {
    #[default]
    Checking,
    Savings,
    Credit,
    Investment,
    Cash,
}

impl BankAccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BankAccountType::Checking => "CHECKING",
            BankAccountType::Savings => "SAVINGS",
            BankAccountType::Credit => "CREDIT",
            BankAccountType::Investment => "INVESTMENT",
            BankAccountType::Cash => "CASH",
        }
    }

    /// Credit balances are debt rather than assets.
    pub fn is_liability(&self) -> bool {
        matches!(self, BankAccountType::Credit)
    }
}

impl fmt::Display for BankAccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bank account or card. `balance` is a manually entered snapshot and is
/// never derived from transactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub id: String,
    pub bank_name: String,
    #[serde(default)]
    pub account_name: String,
    #[serde(rename = "type")]
    pub account_type: BankAccountType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number_last4: Option<String>,
    #[serde(default)]
    pub color_theme: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_excluded: bool,
}

impl BankAccount {
    /// Replaces a non-finite balance with 0.
    pub fn normalized(mut self) -> Self {
        self.balance = finite_or_zero(self.balance);
        self
    }
}
