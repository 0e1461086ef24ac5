//! Finance module - transactions and bank accounts.

mod finance_model;

pub use finance_model::{
    BankAccount, BankAccountType, Transaction, TransactionType, ACCOUNT_COLOR_PALETTE,
    DEFAULT_ACCOUNT_LAST4,
};
