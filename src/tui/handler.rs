//! Key handling for the TUI
//!
//! Routes key presses to the open dialog if there is one, otherwise to
//! global keys and then to the active tab.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{ActiveDialog, App, Tab};
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick | Event::Resize(_, _) => Ok(()),
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Ok(());
    }

    if app.has_dialog() {
        return handle_dialog_key(app, key);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('?') => app.open_dialog(ActiveDialog::Help),
        KeyCode::Char('1') => app.switch_tab(Tab::Dashboard),
        KeyCode::Char('2') => app.switch_tab(Tab::Transactions),
        KeyCode::Char('3') => app.switch_tab(Tab::Budgets),
        KeyCode::Tab => {
            let next = app.active_tab.next();
            app.switch_tab(next);
        }
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('r') => {
            app.refresh()?;
            app.set_status("Reloaded");
        }
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('[') | KeyCode::Char('h') if app.active_tab == Tab::Budgets => {
            app.previous_month()?
        }
        KeyCode::Char(']') | KeyCode::Char('l') if app.active_tab == Tab::Budgets => {
            app.next_month()?
        }
        _ => {}
    }

    Ok(())
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match &app.active_dialog {
        ActiveDialog::Help => app.close_dialog(),
        ActiveDialog::Confirm(_) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                if let Err(e) = app.confirm_delete() {
                    app.set_status(format!("Delete failed: {}", e));
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.close_dialog(),
            _ => {}
        },
        ActiveDialog::None => {}
    }
    Ok(())
}
