use chrono::Utc;
use secondbrain_core::constants::STORAGE_KEY;
use secondbrain_core::insights::{crm_summary, dashboard_summary, wallet_summary};
use secondbrain_core::state::AppState;
use secondbrain_core::Action;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

use crate::main_lib::App;

const HELP: &str = "Commands:
  /stats    show a summary of your data
  /clear    clear the conversation
  /logout   log out (data is kept)
  /login    log in again
  /reset    erase all data
  /help     show this help
  /quit     exit
Anything else is sent to the assistant.";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Stats,
    Clear,
    Logout,
    Login,
    Reset,
    Help,
    Quit,
    Unknown(String),
    Chat(String),
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let Some(name) = line.strip_prefix('/') else {
        return Some(Command::Chat(line.to_string()));
    };
    Some(match name.split_whitespace().next().unwrap_or_default() {
        "stats" => Command::Stats,
        "clear" => Command::Clear,
        "logout" => Command::Logout,
        "login" => Command::Login,
        "reset" => Command::Reset,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    })
}

fn render_stats(state: &AppState) -> String {
    let today = Utc::now().date_naive();
    let dashboard = dashboard_summary(state, today);
    let wallet = wallet_summary(state);
    let crm = crm_summary(state);
    let c = &wallet.currency;

    let mut out = format!(
        "Notes: {}  Events: {}  Tasks: {} ({} pending)\n\
         Net worth: {c}{:.2}  Assets: {c}{:.2}  Liabilities: {c}{:.2}\n\
         Cash flow: {c}{:.2}  Active projects: {}  Contacts: {}",
        dashboard.note_count,
        dashboard.event_count,
        dashboard.task_count,
        dashboard.pending_tasks,
        wallet.net_worth,
        wallet.total_assets,
        wallet.total_liabilities,
        wallet.net_cash_flow,
        crm.active_projects,
        crm.contacts,
    );
    if !dashboard.upcoming_events.is_empty() {
        out.push_str("\nUpcoming:");
        for event in &dashboard.upcoming_events {
            out.push_str(&format!("\n  {} {} {}", event.date, event.start_time, event.title));
        }
    }
    if !dashboard.recent_notes.is_empty() {
        out.push_str("\nRecent notes:");
        for note in &dashboard.recent_notes {
            out.push_str(&format!("\n  {}", note.title));
        }
    }
    out
}

async fn prompt(lines: &mut Lines<BufReader<Stdin>>, label: &str) -> anyhow::Result<Option<String>> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(label.as_bytes()).await?;
    stdout.flush().await?;
    Ok(lines.next_line().await?)
}

/// Asks for a name until one is given. Returns false on end of input.
async fn login(app: &App, lines: &mut Lines<BufReader<Stdin>>) -> anyhow::Result<bool> {
    loop {
        let Some(name) = prompt(lines, "Name: ").await? else {
            return Ok(false);
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let email = prompt(lines, "Email (optional): ")
            .await?
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        app.store.dispatch(Action::Login {
            name: name.to_string(),
            email,
        });
        return Ok(true);
    }
}

fn print_history(state: &AppState) {
    for message in &state.chat_history {
        println!("{}", message.text);
    }
}

pub async fn run(app: App) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if !app.store.snapshot().user_profile.is_logged_in && !login(&app, &mut lines).await? {
        return Ok(());
    }
    print_history(&app.store.snapshot());
    if !app.chat.is_ready() {
        println!("(assistant offline: set GEMINI_API_KEY to chat)");
    }

    while let Some(line) = prompt(&mut lines, "> ").await? {
        let Some(command) = parse_command(&line) else {
            continue;
        };
        match command {
            Command::Chat(text) => {
                if let Some(reply) = app.chat.send_message(&text).await {
                    println!("{}", reply.text);
                }
            }
            Command::Stats => {
                println!("{}", render_stats(&app.store.snapshot()));
                match app.documents.updated_at(STORAGE_KEY) {
                    Ok(Some(saved)) => println!("Last saved: {}", saved),
                    Ok(None) => println!("Not saved yet."),
                    Err(e) => tracing::warn!("Could not read save time: {}", e),
                }
            }
            Command::Clear => {
                app.store.dispatch(Action::ClearChat);
                print_history(&app.store.snapshot());
            }
            Command::Logout => {
                app.store.dispatch(Action::Logout);
                println!("Logged out.");
                if !login(&app, &mut lines).await? {
                    break;
                }
                print_history(&app.store.snapshot());
            }
            Command::Login => {
                if app.store.snapshot().user_profile.is_logged_in {
                    println!("Already logged in.");
                } else if !login(&app, &mut lines).await? {
                    break;
                }
            }
            Command::Reset => {
                let confirm = prompt(&mut lines, "Erase all data? Type RESET to confirm: ").await?;
                if confirm.as_deref().map(str::trim) == Some("RESET") {
                    app.store.reset();
                    tracing::warn!("Document reset by user");
                    println!("All data erased.");
                    if !login(&app, &mut lines).await? {
                        break;
                    }
                    print_history(&app.store.snapshot());
                } else {
                    println!("Reset cancelled.");
                }
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
            Command::Unknown(name) => println!("Unknown command /{}. Try /help.", name),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secondbrain_core::notes::Note;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("/stats"), Some(Command::Stats));
        assert_eq!(parse_command(" /quit now"), Some(Command::Quit));
        assert_eq!(
            parse_command("/launch"),
            Some(Command::Unknown("launch".to_string()))
        );
        assert_eq!(
            parse_command("add a note"),
            Some(Command::Chat("add a note".to_string()))
        );
    }

    #[test]
    fn test_render_stats() {
        let mut state = AppState::default();
        state.notes.push(Note {
            id: "n1".into(),
            title: "Ideas".into(),
            ..Default::default()
        });
        let out = render_stats(&state);
        assert!(out.starts_with("Notes: 1  Events: 0"));
        assert!(out.contains("Recent notes:\n  Ideas"));
    }
}
