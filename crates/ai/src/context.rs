//! Context digests and the system prompt sent with every request.

use chrono::NaiveDate;
use secondbrain_core::files::FileItem;
use secondbrain_core::state::AppState;
use secondbrain_core::utils::time_utils::{day_string, parse_instant};

use crate::types::ChatConfig;

const FALLBACK_USER_NAME: &str = "User";

/// Most recently updated files with content, each quoted up to
/// `config.file_context_chars` characters.
pub fn file_context(state: &AppState, config: &ChatConfig) -> String {
    let mut files: Vec<&FileItem> = state
        .files
        .iter()
        .filter(|f| !f.is_folder() && f.content.as_deref().is_some_and(|c| !c.is_empty()))
        .collect();
    files.sort_by(|a, b| parse_instant(&b.updated_at).cmp(&parse_instant(&a.updated_at)));

    files
        .into_iter()
        .take(config.file_context_limit)
        .map(|f| {
            let excerpt: String = f
                .content
                .as_deref()
                .unwrap_or_default()
                .chars()
                .take(config.file_context_chars)
                .collect();
            format!("[File: {}]\n{}", f.name, excerpt)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// One line per bank account.
pub fn bank_context(state: &AppState) -> String {
    state
        .bank_accounts
        .iter()
        .map(|b| {
            format!(
                "- {} ({}) [{}]: {}{}",
                b.bank_name, b.account_name, b.account_type, b.currency, b.balance
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fixed instructions plus the user's name, currency, today's date and the
/// file and bank digests.
pub fn build_system_prompt(state: &AppState, config: &ChatConfig, today: NaiveDate) -> String {
    let base_preamble = include_str!("system_prompt.txt").trim();

    let user_name = match state.user_profile.name.trim() {
        "" => FALLBACK_USER_NAME,
        name => name,
    };
    let currency = if state.settings.currency.is_empty() {
        secondbrain_core::constants::DEFAULT_CURRENCY
    } else {
        state.settings.currency.as_str()
    };

    let mut prompt = format!(
        "{}\n\n## Current Context\n\
        - User: {}\n\
        - Preferred currency: {}\n\
        - Current date: {}",
        base_preamble,
        user_name,
        currency,
        day_string(today)
    );

    let files = file_context(state, config);
    if !files.is_empty() {
        prompt.push_str("\n\nUSER FILES:\n");
        prompt.push_str(&files);
    }
    let banks = bank_context(state);
    if !banks.is_empty() {
        prompt.push_str("\n\nBANK ACCOUNTS:\n");
        prompt.push_str(&banks);
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use secondbrain_core::files::FileType;
    use secondbrain_core::finance::{BankAccount, BankAccountType};

    fn file(name: &str, updated_at: &str, content: Option<&str>, file_type: FileType) -> FileItem {
        FileItem {
            id: name.to_string(),
            parent_id: None,
            name: name.to_string(),
            file_type,
            content: content.map(str::to_string),
            created_at: updated_at.to_string(),
            updated_at: updated_at.to_string(),
        }
    }

    #[test]
    fn test_file_context_newest_first_and_truncated() {
        let mut state = AppState::default();
        let long = "x".repeat(2000);
        state.files = vec![
            file("old.md", "2024-01-01T00:00:00.000Z", Some("old body"), FileType::File),
            file("new.md", "2024-03-01T00:00:00.000Z", Some(&long), FileType::File),
            file("empty.md", "2024-04-01T00:00:00.000Z", Some(""), FileType::File),
            file("Folder", "2024-05-01T00:00:00.000Z", None, FileType::Folder),
        ];
        let config = ChatConfig::default();
        let context = file_context(&state, &config);

        assert!(context.starts_with("[File: new.md]\n"));
        assert!(context.contains(&format!("{}\n\n[File: old.md]\nold body", "x".repeat(1500))));
        assert!(!context.contains("empty.md"));
        assert!(!context.contains("Folder"));
    }

    #[test]
    fn test_file_context_limit() {
        let mut state = AppState::default();
        state.files = (0..8)
            .map(|i| {
                file(
                    &format!("f{i}.md"),
                    &format!("2024-01-0{}T00:00:00.000Z", i + 1),
                    Some("body"),
                    FileType::File,
                )
            })
            .collect();
        let context = file_context(&state, &ChatConfig::default());
        assert_eq!(context.matches("[File:").count(), 5);
        assert!(context.starts_with("[File: f7.md]"));
    }

    #[test]
    fn test_bank_context_line_format() {
        let mut state = AppState::default();
        state.bank_accounts = vec![BankAccount {
            id: "b1".into(),
            bank_name: "Chase".into(),
            account_name: "Sapphire".into(),
            account_type: BankAccountType::Credit,
            balance: 1250.5,
            currency: "$".into(),
            ..Default::default()
        }];
        assert_eq!(bank_context(&state), "- Chase (Sapphire) [CREDIT]: $1250.5");
    }

    #[test]
    fn test_system_prompt_includes_context() {
        let mut state = AppState::default();
        state.settings.currency = "€".into();
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let prompt = build_system_prompt(&state, &ChatConfig::default(), today);

        assert!(prompt.starts_with("You are 2ndBrain"));
        assert!(prompt.contains("- User: User"));
        assert!(prompt.contains("- Preferred currency: €"));
        assert!(prompt.contains("- Current date: 2024-05-01"));
        assert!(!prompt.contains("BANK ACCOUNTS"));
    }
}
