use async_trait::async_trait;
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::{json, Value};

use secondbrain_core::constants::DEFAULT_CURRENCY;
use secondbrain_core::finance::{
    BankAccount, BankAccountType, Transaction, TransactionType, ACCOUNT_COLOR_PALETTE,
    DEFAULT_ACCOUNT_LAST4,
};
use secondbrain_core::utils::new_id;
use secondbrain_core::Action;

use super::constants::{ADD_BANK_ACCOUNT, ADD_TRANSACTION};
use super::{non_blank, parse_args, require_finite, require_text, Tool, ToolContext};
use crate::error::AiError;

// ----------------------------------------------------------------------------
// AddTransactionTool
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct AddTransactionArgs {
    amount: f64,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    category: String,
    #[serde(default)]
    description: Option<String>,
}

pub struct AddTransactionTool;

#[async_trait]
impl Tool for AddTransactionTool {
    fn name(&self) -> &str {
        ADD_TRANSACTION
    }

    fn description(&self) -> &str {
        "Record an expense or income."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "amount": { "type": "number" },
                "type": { "type": "string", "enum": ["INCOME", "EXPENSE"] },
                "category": { "type": "string" },
                "description": { "type": "string" }
            },
            "required": ["amount", "type", "category"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<String, AiError> {
        let args: AddTransactionArgs = parse_args(args)?;
        let transaction = Transaction {
            id: new_id(),
            amount: require_finite("amount", args.amount)?,
            transaction_type: args.transaction_type,
            category: require_text("category", &args.category)?,
            description: args.description.unwrap_or_default(),
            date: ctx.timestamp(),
        };
        ctx.store.dispatch(Action::AddTransaction(transaction));
        Ok("Transaction recorded.".to_string())
    }
}

// ----------------------------------------------------------------------------
// AddBankAccountTool
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddBankAccountArgs {
    bank_name: String,
    #[serde(default)]
    account_name: Option<String>,
    #[serde(rename = "type")]
    account_type: BankAccountType,
    balance: f64,
    #[serde(default)]
    last4: Option<String>,
}

pub struct AddBankAccountTool;

#[async_trait]
impl Tool for AddBankAccountTool {
    fn name(&self) -> &str {
        ADD_BANK_ACCOUNT
    }

    fn description(&self) -> &str {
        "Add a new bank account or credit card to the wallet."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "bankName": { "type": "string", "description": "Bank name e.g. Chase, Amex" },
                "accountName": { "type": "string", "description": "Nickname e.g. Sapphire Reserve" },
                "type": { "type": "string", "enum": ["CHECKING", "SAVINGS", "CREDIT", "INVESTMENT", "CASH"] },
                "balance": { "type": "number" },
                "last4": { "type": "string", "description": "Last 4 digits of account number" }
            },
            "required": ["bankName", "type", "balance"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<String, AiError> {
        let args: AddBankAccountArgs = parse_args(args)?;
        let bank_name = require_text("bankName", &args.bank_name)?;
        let balance = require_finite("balance", args.balance)?;

        let currency = match ctx.store.snapshot().settings.currency.trim() {
            "" => DEFAULT_CURRENCY.to_string(),
            symbol => symbol.to_string(),
        };
        let color_theme = ACCOUNT_COLOR_PALETTE
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(ACCOUNT_COLOR_PALETTE[0])
            .to_string();

        let account = BankAccount {
            id: new_id(),
            account_name: non_blank(args.account_name).unwrap_or_else(|| bank_name.clone()),
            bank_name: bank_name.clone(),
            account_type: args.account_type,
            balance,
            account_number_last4: Some(
                non_blank(args.last4).unwrap_or_else(|| DEFAULT_ACCOUNT_LAST4.to_string()),
            ),
            color_theme,
            currency,
            is_excluded: false,
        };
        ctx.store.dispatch(Action::AddBankAccount(account));
        Ok(format!("Added {} account.", bank_name))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::context;
    use super::*;
    use secondbrain_core::settings::SettingsUpdate;

    #[tokio::test]
    async fn test_add_transaction_stamps_now() {
        let ctx = context();
        let result = AddTransactionTool
            .execute(
                json!({"amount": 42.5, "type": "EXPENSE", "category": "Food", "description": "Lunch"}),
                &ctx,
            )
            .await
            .unwrap();
        assert_eq!(result, "Transaction recorded.");

        let state = ctx.store.snapshot();
        let tx = &state.transactions[0];
        assert_eq!(tx.amount, 42.5);
        assert_eq!(tx.transaction_type, TransactionType::Expense);
        assert_eq!(tx.date, "2024-05-01T09:30:00.000Z");
    }

    #[tokio::test]
    async fn test_add_transaction_rejects_unknown_type() {
        let ctx = context();
        let err = AddTransactionTool
            .execute(json!({"amount": 1, "type": "REFUND", "category": "Misc"}), &ctx)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_add_bank_account_defaults() {
        let ctx = context();
        ctx.store.dispatch(Action::UpdateSettings(SettingsUpdate {
            currency: Some("€".to_string()),
            ..Default::default()
        }));

        let result = AddBankAccountTool
            .execute(json!({"bankName": "Chase", "type": "CREDIT", "balance": 300}), &ctx)
            .await
            .unwrap();
        assert_eq!(result, "Added Chase account.");

        let state = ctx.store.snapshot();
        let account = &state.bank_accounts[0];
        assert_eq!(account.account_name, "Chase");
        assert_eq!(account.account_number_last4.as_deref(), Some("0000"));
        assert_eq!(account.currency, "€");
        assert!(ACCOUNT_COLOR_PALETTE.contains(&account.color_theme.as_str()));
        assert!(!account.is_excluded);
    }
}
