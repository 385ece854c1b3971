//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{
    App, AppState, Focus, LoginFocus, LoginMode, Tab, MAX_EMAIL_LENGTH, MAX_PASSWORD_LENGTH,
    PAGE_SCROLL_SIZE,
};

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle login overlay
    if matches!(app.state, AppState::LoggingIn) {
        return handle_login_input(app, key).await;
    }

    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                if app.saving {
                    app.notify_error("Cannot quit while saving. Please wait...".to_string());
                    app.state = AppState::Normal;
                    return Ok(false);
                }
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // Handle date entry
    if matches!(app.state, AppState::EditingDate) {
        handle_date_input(app, key);
        return Ok(false);
    }

    // Handle search mode
    if matches!(app.state, AppState::Searching) {
        handle_search_input(app, key);
        return Ok(false);
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            if app.saving {
                app.notify_error("Cannot quit while saving. Please wait...".to_string());
                return Ok(false);
            }
            app.state = AppState::ConfirmingQuit;
            return Ok(false);
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
            return Ok(false);
        }
        KeyCode::Char('1') => {
            app.tab = Tab::Attendance;
        }
        KeyCode::Char('2') => {
            app.tab = Tab::Athletes;
        }
        KeyCode::Char('L') => {
            app.logout();
            return Ok(false);
        }
        KeyCode::Left => {
            if app.tab == Tab::Attendance && app.focus == Focus::Roster {
                app.focus = Focus::Schedules;
            } else {
                app.tab = app.tab.prev();
            }
        }
        KeyCode::Right => {
            if app.tab == Tab::Attendance && app.focus == Focus::Schedules {
                app.focus = Focus::Roster;
            } else {
                app.tab = app.tab.next();
            }
        }
        KeyCode::Tab => {
            app.focus = match app.focus {
                Focus::Schedules => Focus::Roster,
                Focus::Roster => Focus::Schedules,
            };
        }
        KeyCode::Esc => {
            app.search_query.clear();
            app.focus = Focus::Schedules;
        }
        _ => {
            match app.tab {
                Tab::Attendance => handle_attendance_input(app, key),
                Tab::Athletes => handle_athletes_input(app, key),
            }
        }
    }

    Ok(false)
}

fn handle_attendance_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('d') => {
            app.date_input = app.selected_date.format("%Y-%m-%d").to_string();
            app.state = AppState::EditingDate;
        }
        KeyCode::Char(' ') => {
            app.toggle_selected();
        }
        KeyCode::Char('a') => {
            app.toggle_all();
        }
        KeyCode::Char('s') => {
            app.save_attendance();
        }
        KeyCode::Char('r') => {
            app.load_roster();
        }
        KeyCode::Enter => {
            if app.focus == Focus::Schedules {
                app.select_schedule(app.schedule_cursor);
            } else {
                app.toggle_selected();
            }
        }
        KeyCode::Char('j') | KeyCode::Down => match app.focus {
            Focus::Schedules => {
                let max = app.schedules.len().saturating_sub(1);
                app.schedule_cursor = (app.schedule_cursor + 1).min(max);
            }
            Focus::Roster => {
                let max = app.roster.len().saturating_sub(1);
                app.roster_selection = (app.roster_selection + 1).min(max);
            }
        },
        KeyCode::Char('k') | KeyCode::Up => match app.focus {
            Focus::Schedules => {
                app.schedule_cursor = app.schedule_cursor.saturating_sub(1);
            }
            Focus::Roster => {
                app.roster_selection = app.roster_selection.saturating_sub(1);
            }
        },
        KeyCode::Home => match app.focus {
            Focus::Schedules => app.schedule_cursor = 0,
            Focus::Roster => app.roster_selection = 0,
        },
        KeyCode::End => match app.focus {
            Focus::Schedules => {
                app.schedule_cursor = app.schedules.len().saturating_sub(1);
            }
            Focus::Roster => {
                app.roster_selection = app.roster.len().saturating_sub(1);
            }
        },
        KeyCode::PageDown => {
            if app.focus == Focus::Roster {
                let max = app.roster.len().saturating_sub(1);
                app.roster_selection = (app.roster_selection + PAGE_SCROLL_SIZE).min(max);
            }
        }
        KeyCode::PageUp => {
            if app.focus == Focus::Roster {
                app.roster_selection = app.roster_selection.saturating_sub(PAGE_SCROLL_SIZE);
            }
        }
        _ => {}
    }
}

fn handle_athletes_input(app: &mut App, key: KeyEvent) {
    let max_index = app.filtered_stats().len().saturating_sub(1);

    match key.code {
        KeyCode::Char('/') => {
            app.state = AppState::Searching;
        }
        KeyCode::Char('g') => {
            app.cycle_group_filter();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.stats_selection = (app.stats_selection + 1).min(max_index);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.stats_selection = app.stats_selection.saturating_sub(1);
        }
        KeyCode::Home => {
            app.stats_selection = 0;
        }
        KeyCode::End => {
            app.stats_selection = max_index;
        }
        KeyCode::PageDown => {
            app.stats_selection = (app.stats_selection + PAGE_SCROLL_SIZE).min(max_index);
        }
        KeyCode::PageUp => {
            app.stats_selection = app.stats_selection.saturating_sub(PAGE_SCROLL_SIZE);
        }
        _ => {}
    }
}

fn handle_date_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Normal;
            app.date_input.clear();
        }
        KeyCode::Enter => {
            match NaiveDate::parse_from_str(app.date_input.trim(), "%Y-%m-%d") {
                Ok(date) => {
                    app.state = AppState::Normal;
                    app.date_input.clear();
                    app.set_date(date);
                }
                Err(_) => {
                    app.notify_error("Invalid date, expected YYYY-MM-DD".to_string());
                }
            }
        }
        KeyCode::Backspace => {
            app.date_input.pop();
        }
        KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
            if app.date_input.len() < 10 {
                app.date_input.push(c);
            }
        }
        _ => {}
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Normal;
            app.search_query.clear();
        }
        KeyCode::Enter => {
            app.state = AppState::Normal;
            // Keep search query active
        }
        KeyCode::Backspace => {
            app.search_query.pop();
            app.stats_selection = 0;
        }
        KeyCode::Char(c) => {
            app.search_query.push(c);
            app.stats_selection = 0;
        }
        _ => {}
    }
}

async fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            // Quit if on login screen
            app.state = AppState::Quitting;
            return Ok(true);
        }
        KeyCode::F(2) => {
            app.login_mode = match app.login_mode {
                LoginMode::SignIn => LoginMode::SignUp,
                LoginMode::SignUp => LoginMode::SignIn,
            };
            app.login_error = None;
        }
        KeyCode::Down | KeyCode::Tab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Email => LoginFocus::Password,
                LoginFocus::Password => LoginFocus::Button,
                LoginFocus::Button => LoginFocus::Email,
            };
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Email => LoginFocus::Button,
                LoginFocus::Password => LoginFocus::Email,
                LoginFocus::Button => LoginFocus::Password,
            };
        }
        KeyCode::Enter => match app.login_focus {
            LoginFocus::Email => {
                app.login_focus = LoginFocus::Password;
            }
            LoginFocus::Password => {
                app.login_focus = LoginFocus::Button;
            }
            LoginFocus::Button => {
                // On success the state flips to Normal and the data
                // loads kick off inside attempt_login
                let _ = app.attempt_login().await;
            }
        },
        KeyCode::Backspace => match app.login_focus {
            LoginFocus::Email => {
                app.login_email.pop();
            }
            LoginFocus::Password => {
                app.login_password.pop();
            }
            LoginFocus::Button => {}
        },
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::Email => {
                if app.login_email.len() < MAX_EMAIL_LENGTH && !c.is_whitespace() {
                    app.login_email.push(c);
                }
            }
            LoginFocus::Password => {
                if app.login_password.len() < MAX_PASSWORD_LENGTH {
                    app.login_password.push(c);
                }
            }
            LoginFocus::Button => {}
        },
        _ => {}
    }
    Ok(false)
}
