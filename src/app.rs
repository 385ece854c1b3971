//! Application state management.
//!
//! This module contains the core `App` struct that owns the session, the
//! API client, the current date/schedule selection, the attendance roster,
//! and the background task coordination. Remote calls run in spawned tasks
//! and report back over an MPSC channel; results for schedule and roster
//! fetches carry a generation token so a slow, superseded fetch can never
//! overwrite newer state.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{Local, NaiveDate};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::api::{ApiError, Client};
use crate::auth::{AuthEvent, CredentialStore, Session, SessionData, TeacherBinding};
use crate::config::Config;
use crate::models::{Group, Schedule};
use crate::roster::{self, RosterEntry};
use crate::stats::{self, AthleteStats};
use crate::utils::weekday_name_es;

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
/// A refresh involves at most a handful of requests; 32 leaves headroom.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// How long a transient notification stays on screen before auto-dismissing
const NOTIFICATION_TTL_SECS: u64 = 5;

/// Maximum length for email input
pub const MAX_EMAIL_LENGTH: usize = 60;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Number of items to scroll on page up/down
pub const PAGE_SCROLL_SIZE: usize = 10;

// ============================================================================
// UI State Types
// ============================================================================

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Attendance,
    Athletes,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Attendance => "Attendance",
            Tab::Athletes => "Athletes",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Attendance => Tab::Athletes,
            Tab::Athletes => Tab::Attendance,
        }
    }

    pub fn prev(&self) -> Self {
        // Two tabs, so prev == next
        self.next()
    }
}

/// Current focus area inside the Attendance tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Schedules,
    Roster,
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    EditingDate,
    Searching,
    LoggingIn,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Email,
    Password,
    Button,
}

/// Whether the login form signs in or registers a new account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMode {
    SignIn,
    SignUp,
}

/// Transient status notification, auto-dismissed after a fixed delay
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
    shown_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl Notification {
    fn new(kind: NotificationKind, text: String) -> Self {
        Self {
            kind,
            text,
            shown_at: Instant::now(),
        }
    }

    fn expired(&self) -> bool {
        self.shown_at.elapsed() > Duration::from_secs(NOTIFICATION_TTL_SECS)
    }
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Result types sent back from spawned fetch tasks.
///
/// Schedule and roster results carry the generation they were started under;
/// the handler drops anything whose generation is no longer current.
enum FetchResult {
    /// Schedules for the selected date's weekday
    Schedules {
        generation: u64,
        schedules: Vec<Schedule>,
    },
    ScheduleError {
        generation: u64,
        message: String,
    },
    /// Reconciled roster for the selected date + schedule
    Roster {
        generation: u64,
        entries: Vec<RosterEntry>,
    },
    RosterError {
        generation: u64,
        message: String,
    },
    /// Teacher profile lookup outcome for an auth account
    TeacherResolved {
        user_id: String,
        teacher: Option<crate::models::Teacher>,
    },
    TeacherError {
        user_id: String,
        message: String,
    },
    /// Attendance batch accepted; count of present entries
    Saved {
        present: usize,
    },
    SaveError {
        message: String,
    },
    /// Reference data + per-athlete statistics for the Athletes tab
    Stats {
        groups: Vec<Group>,
        stats: Vec<AthleteStats>,
    },
    StatsError {
        message: String,
    },
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    // Core services
    pub config: Config,
    pub session: Session,
    pub api: Client,

    // Identity
    pub binding: TeacherBinding,

    // UI state
    pub state: AppState,
    pub tab: Tab,
    pub focus: Focus,

    // Date + schedule selection
    pub selected_date: NaiveDate,
    pub date_input: String,
    pub schedules: Vec<Schedule>,
    pub schedule_cursor: usize,
    pub selected_schedule: Option<usize>,
    pub schedule_loading: bool,
    schedule_generation: u64,
    initial_schedule_load: bool,

    // Roster
    pub roster: Vec<RosterEntry>,
    pub roster_selection: usize,
    pub roster_loading: bool,
    pub saving: bool,
    roster_generation: u64,

    // Athletes tab
    pub groups: Vec<Group>,
    pub stats: Vec<AthleteStats>,
    pub stats_loading: bool,
    pub group_filter: Option<usize>,
    pub search_query: String,
    pub stats_selection: usize,

    // Login form state
    pub login_email: String,
    pub login_password: String,
    pub login_focus: LoginFocus,
    pub login_mode: LoginMode,
    pub login_error: Option<String>,

    // Status notification
    pub notification: Option<Notification>,

    // Background task channel
    rx: mpsc::Receiver<FetchResult>,
    tx: mpsc::Sender<FetchResult>,
}

impl App {
    /// Create a new application instance
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let api = Client::new(config.backend_url()?, config.anon_key()?)?;

        let cache_dir = config
            .cache_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("./cache"));
        let mut session = Session::new(cache_dir);
        if let Err(e) = session.load() {
            warn!(error = %e, "Failed to load saved session");
        }

        let mut api = api;
        if let Some(token) = session.token() {
            api.set_token(Arc::new(token.to_string()));
        }

        let login_email = std::env::var("ASISTENCIA_EMAIL")
            .ok()
            .or_else(|| config.last_email.clone())
            .unwrap_or_default();

        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Ok(Self {
            config,
            session,
            api,

            binding: TeacherBinding::Anonymous,

            state: AppState::Normal,
            tab: Tab::Attendance,
            focus: Focus::Schedules,

            selected_date: Local::now().date_naive(),
            date_input: String::new(),
            schedules: Vec::new(),
            schedule_cursor: 0,
            selected_schedule: None,
            schedule_loading: false,
            schedule_generation: 0,
            initial_schedule_load: true,

            roster: Vec::new(),
            roster_selection: 0,
            roster_loading: false,
            saving: false,
            roster_generation: 0,

            groups: Vec::new(),
            stats: Vec::new(),
            stats_loading: false,
            group_filter: None,
            search_query: String::new(),
            stats_selection: 0,

            login_email,
            login_password: String::new(),
            login_focus: LoginFocus::Email,
            login_mode: LoginMode::SignIn,
            login_error: None,

            notification: None,

            rx,
            tx,
        })
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    pub fn is_authenticated(&self) -> bool {
        self.session.is_valid()
    }

    /// Startup path: refresh a near-expiry session if we can, then either
    /// bind the teacher and load data, or fall to the login overlay.
    pub async fn bootstrap(&mut self) {
        if let Some(data) = self.session.data.clone() {
            if data.needs_refresh() {
                match self.api.refresh_session(&data.refresh_token).await {
                    Ok(fresh) => {
                        info!("Session refreshed on startup");
                        self.install_session(fresh);
                    }
                    Err(e) => {
                        warn!(error = %e, "Session refresh failed");
                        if data.is_expired() {
                            let _ = self.session.clear();
                        }
                    }
                }
            }
        }

        if self.is_authenticated() {
            let user_id = self.session.user_id().unwrap_or_default().to_string();
            self.handle_auth_event(AuthEvent::SignedIn { user_id });
            self.load_schedules();
            self.load_stats();
        } else {
            self.start_login();
        }
    }

    fn install_session(&mut self, data: SessionData) {
        self.api.set_token(Arc::new(data.access_token.clone()));
        self.session.update(data);
        if let Err(e) = self.session.save() {
            warn!(error = %e, "Failed to save session");
        }
    }

    /// Apply an identity event to the teacher binding and kick off the
    /// profile resolution it calls for.
    pub fn handle_auth_event(&mut self, event: AuthEvent) {
        self.binding = self.binding.apply(&event);
        if let TeacherBinding::Resolving { user_id } = &self.binding {
            self.spawn_teacher_resolution(user_id.clone());
        }
    }

    fn spawn_teacher_resolution(&self, user_id: String) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = match api.fetch_teacher_by_user(&user_id).await {
                Ok(teacher) => FetchResult::TeacherResolved { user_id, teacher },
                Err(e) => FetchResult::TeacherError {
                    user_id,
                    message: e.to_string(),
                },
            };
            send_result(&tx, result).await;
        });
    }

    /// Attempt login (or registration) with the credentials from the form
    pub async fn attempt_login(&mut self) -> Result<()> {
        let email = self.login_email.trim().to_string();
        let password = self.login_password.clone();

        if email.is_empty() || password.is_empty() {
            self.login_error = Some("Email and password required".to_string());
            return Err(anyhow::anyhow!("Email and password required"));
        }

        self.login_error = None;

        let outcome = match self.login_mode {
            LoginMode::SignIn => self.api.sign_in(&email, &password).await.map(Some),
            LoginMode::SignUp => self.api.sign_up(&email, &password).await,
        };

        match outcome {
            Ok(Some(session_data)) => {
                if let Err(e) = CredentialStore::store(&email, &password) {
                    warn!(error = %e, "Failed to store credentials");
                }

                self.config.last_email = Some(email);
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }

                let user_id = session_data.user_id.clone();
                self.install_session(session_data);
                self.login_password.clear();
                self.state = AppState::Normal;
                info!("Login successful");

                self.handle_auth_event(AuthEvent::SignedIn { user_id });
                self.load_schedules();
                self.load_stats();
                Ok(())
            }
            Ok(None) => {
                // Registration accepted but needs email confirmation
                self.login_mode = LoginMode::SignIn;
                self.login_error =
                    Some("Account created - confirm your email, then sign in".to_string());
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Login failed");
                self.login_error = Some(login_error_message(&e));
                Err(e)
            }
        }
    }

    /// Show the login overlay
    pub fn start_login(&mut self) {
        self.state = AppState::LoggingIn;
        self.login_focus = if self.login_email.is_empty() {
            LoginFocus::Email
        } else {
            LoginFocus::Password
        };
        self.login_error = None;
    }

    /// Sign out: fire the server-side revocation, drop all per-identity
    /// state, and return to the login overlay.
    pub fn logout(&mut self) {
        let api = self.api.clone();
        tokio::spawn(async move {
            if let Err(e) = api.sign_out().await {
                debug!(error = %e, "Server-side sign-out failed");
            }
        });

        if let Err(e) = self.session.clear() {
            warn!(error = %e, "Failed to clear session file");
        }
        self.api.clear_token();
        self.handle_auth_event(AuthEvent::SignedOut);

        self.schedules.clear();
        self.selected_schedule = None;
        self.roster.clear();
        self.stats.clear();
        self.initial_schedule_load = true;

        info!("Signed out");
        self.start_login();
    }

    /// Interactive login for the `--login` CLI path (no TUI)
    pub async fn login_interactive(&mut self) -> Result<()> {
        println!("\n=== Asistencia Login ===\n");

        print!(
            "Email{}: ",
            self.config
                .last_email
                .as_deref()
                .map(|e| format!(" [{}]", e))
                .unwrap_or_default()
        );
        use std::io::Write;
        std::io::stdout().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        let email = {
            let trimmed = input.trim();
            if trimmed.is_empty() {
                self.config
                    .last_email
                    .clone()
                    .ok_or_else(|| anyhow::anyhow!("Email required"))?
            } else {
                trimmed.to_string()
            }
        };

        let password = if CredentialStore::has_credentials(&email) {
            print!("Use stored password? [Y/n]: ");
            std::io::stdout().flush()?;
            let mut answer = String::new();
            std::io::stdin().read_line(&mut answer)?;
            if answer.trim().to_lowercase() != "n" {
                CredentialStore::get_password(&email)?
            } else {
                rpassword::prompt_password("Password: ")?
            }
        } else {
            rpassword::prompt_password("Password: ")?
        };

        println!("\nAuthenticating...");
        let session_data = self.api.sign_in(&email, &password).await?;

        CredentialStore::store(&email, &password)?;
        self.config.last_email = Some(email);
        self.config.save()?;
        self.install_session(session_data);

        println!("Login successful!\n");
        Ok(())
    }

    // =========================================================================
    // Schedule loading
    // =========================================================================

    /// Change the selected date and reload the day's schedules
    pub fn set_date(&mut self, date: NaiveDate) {
        if date == self.selected_date {
            return;
        }
        self.selected_date = date;
        self.load_schedules();
    }

    /// Fetch the schedules for the selected date's weekday in the background
    pub fn load_schedules(&mut self) {
        if !self.is_authenticated() {
            return;
        }

        self.schedule_generation += 1;
        let generation = self.schedule_generation;
        self.schedule_loading = true;

        let dia = weekday_name_es(self.selected_date).to_string();
        let api = self.api.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = match api.fetch_schedules_for_day(&dia).await {
                Ok(schedules) => FetchResult::Schedules {
                    generation,
                    schedules,
                },
                Err(e) => FetchResult::ScheduleError {
                    generation,
                    message: e.to_string(),
                },
            };
            send_result(&tx, result).await;
        });
    }

    /// Select a schedule from the day's list and reconcile its roster
    pub fn select_schedule(&mut self, index: usize) {
        if index >= self.schedules.len() {
            return;
        }
        self.selected_schedule = Some(index);
        self.load_roster();
    }

    pub fn current_schedule(&self) -> Option<&Schedule> {
        self.selected_schedule.and_then(|i| self.schedules.get(i))
    }

    // =========================================================================
    // Roster reconciliation
    // =========================================================================

    /// Fetch the selected schedule's athletes and any saved attendance for
    /// (date, schedule, teacher), then merge them into a fresh roster.
    pub fn load_roster(&mut self) {
        let Some((group_ids, horario_id)) = self
            .current_schedule()
            .map(|s| (s.group_ids(), s.id))
        else {
            return;
        };
        let Some(profesor_id) = self.binding.teacher().map(|t| t.id) else {
            if let Some(label) = self.binding.status_label() {
                self.notify_error(label.to_string());
            }
            return;
        };

        self.roster_generation += 1;
        let generation = self.roster_generation;
        self.roster_loading = true;

        let fecha = self.selected_date;
        let api = self.api.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let (athletes, flags) = futures::join!(
                api.fetch_athletes_by_groups(&group_ids),
                api.fetch_attendance(fecha, horario_id, profesor_id),
            );

            let result = match (athletes, flags) {
                (Ok(athletes), Ok(flags)) => FetchResult::Roster {
                    generation,
                    entries: roster::reconcile(athletes, &flags),
                },
                (Err(e), _) | (_, Err(e)) => FetchResult::RosterError {
                    generation,
                    message: e.to_string(),
                },
            };
            send_result(&tx, result).await;
        });
    }

    // =========================================================================
    // Attendance editing + persistence
    // =========================================================================

    /// Flip the presence flag of the entry under the cursor
    pub fn toggle_selected(&mut self) {
        if let Some(entry) = self.roster.get(self.roster_selection) {
            let id = entry.id;
            roster::toggle(&mut self.roster, id);
        }
    }

    /// Bulk toggle with uniform-target semantics (see `roster::toggle_all`)
    pub fn toggle_all(&mut self) {
        roster::toggle_all(&mut self.roster);
    }

    pub fn present_count(&self) -> usize {
        roster::present_count(&self.roster)
    }

    /// Persist the current roster as one upsert batch. Preconditions are
    /// validated locally; an unassigned teacher never reaches the network.
    pub fn save_attendance(&mut self) {
        if self.saving {
            return;
        }
        let Some(schedule) = self.current_schedule() else {
            self.notify_error("Select a schedule first".to_string());
            return;
        };
        let Some(teacher) = self.binding.teacher() else {
            self.notify_error("No teacher profile for this account".to_string());
            return;
        };

        let batch =
            match roster::prepare_save(&self.roster, schedule, self.selected_date, teacher.id) {
                Ok(batch) => batch,
                Err(e) => {
                    self.notify_error(e.to_string());
                    return;
                }
            };

        self.saving = true;
        let present = batch.iter().filter(|r| r.presente).count();
        let api = self.api.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = match api.upsert_attendance(&batch).await {
                Ok(()) => FetchResult::Saved { present },
                Err(e) => FetchResult::SaveError {
                    message: save_error_message(&e),
                },
            };
            send_result(&tx, result).await;
        });
    }

    // =========================================================================
    // Athletes tab
    // =========================================================================

    /// Fetch groups, athletes, and the full attendance history for the
    /// statistics view
    pub fn load_stats(&mut self) {
        if !self.is_authenticated() {
            return;
        }
        self.stats_loading = true;

        let api = self.api.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let (groups, athletes, rows) = futures::join!(
                api.fetch_groups(),
                api.fetch_all_athletes(),
                api.fetch_all_attendance(),
            );

            let result = match (groups, athletes, rows) {
                (Ok(groups), Ok(athletes), Ok(rows)) => FetchResult::Stats {
                    groups,
                    stats: stats::compute_stats(athletes, &rows),
                },
                (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => FetchResult::StatsError {
                    message: e.to_string(),
                },
            };
            send_result(&tx, result).await;
        });
    }

    /// Stats rows matching the current group filter and search query
    pub fn filtered_stats(&self) -> Vec<&AthleteStats> {
        let group = self.group_filter.and_then(|i| self.groups.get(i));
        stats::filter_stats(&self.stats, group, &self.search_query)
    }

    /// Cycle the group filter: all -> first group -> ... -> last -> all
    pub fn cycle_group_filter(&mut self) {
        self.group_filter = match self.group_filter {
            None if !self.groups.is_empty() => Some(0),
            Some(i) if i + 1 < self.groups.len() => Some(i + 1),
            _ => None,
        };
        self.stats_selection = 0;
    }

    // =========================================================================
    // Background task handling
    // =========================================================================

    /// Drain completed background tasks and fold them into app state
    pub fn check_background_tasks(&mut self) {
        while let Ok(result) = self.rx.try_recv() {
            self.apply_result(result);
        }
    }

    fn apply_result(&mut self, result: FetchResult) {
        match result {
            FetchResult::Schedules {
                generation,
                schedules,
            } => {
                if generation != self.schedule_generation {
                    debug!(generation, "Dropping stale schedule result");
                    return;
                }
                self.schedule_loading = false;
                self.schedules = schedules;
                self.schedule_cursor = self
                    .schedule_cursor
                    .min(self.schedules.len().saturating_sub(1));

                // The very first load keeps whatever was selected; every
                // later date change resets the selection and the roster.
                if self.initial_schedule_load {
                    self.initial_schedule_load = false;
                } else {
                    self.selected_schedule = None;
                    self.roster.clear();
                    self.roster_selection = 0;
                }
            }
            FetchResult::ScheduleError {
                generation,
                message,
            } => {
                if generation != self.schedule_generation {
                    return;
                }
                // Keep the stale list so the user can retry by re-picking
                self.schedule_loading = false;
                self.notify_error(format!("Failed to load schedules: {}", message));
            }
            FetchResult::Roster {
                generation,
                entries,
            } => {
                if generation != self.roster_generation {
                    debug!(generation, "Dropping stale roster result");
                    return;
                }
                self.roster_loading = false;
                self.roster = entries;
                self.roster_selection = 0;
                self.focus = Focus::Roster;
            }
            FetchResult::RosterError {
                generation,
                message,
            } => {
                if generation != self.roster_generation {
                    return;
                }
                // Prior roster stays untouched
                self.roster_loading = false;
                self.notify_error(format!("Failed to load athletes: {}", message));
            }
            FetchResult::TeacherResolved { user_id, teacher } => {
                let found = teacher.is_some();
                self.binding = self.binding.resolved(&user_id, teacher);
                if !found {
                    self.notify_error("No teacher profile for this account".to_string());
                } else if self.selected_schedule.is_some() {
                    // A schedule picked while resolving can now load
                    self.load_roster();
                }
            }
            FetchResult::TeacherError { user_id, message } => {
                self.binding = self.binding.resolved(&user_id, None);
                self.notify_error(format!("Could not resolve teacher profile: {}", message));
            }
            FetchResult::Saved { present } => {
                self.saving = false;
                self.notify_success(format!("Attendance saved: {} present", present));
            }
            FetchResult::SaveError { message } => {
                self.saving = false;
                self.notify_error(message);
            }
            FetchResult::Stats { groups, stats } => {
                self.stats_loading = false;
                self.groups = groups;
                self.stats = stats;
                self.stats_selection = 0;
            }
            FetchResult::StatsError { message } => {
                self.stats_loading = false;
                self.notify_error(format!("Failed to load statistics: {}", message));
            }
        }
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    pub fn notify_success(&mut self, text: String) {
        self.notification = Some(Notification::new(NotificationKind::Success, text));
    }

    pub fn notify_error(&mut self, text: String) {
        self.notification = Some(Notification::new(NotificationKind::Error, text));
    }

    /// Periodic housekeeping from the main loop
    pub fn tick(&mut self) {
        if self
            .notification
            .as_ref()
            .map(Notification::expired)
            .unwrap_or(false)
        {
            self.notification = None;
        }
    }
}

/// Helper to send fetch results, logging when the channel is gone
async fn send_result(tx: &mpsc::Sender<FetchResult>, result: FetchResult) {
    if tx.send(result).await.is_err() {
        error!("Failed to send fetch result - channel closed");
    }
}

/// User-facing message for a failed save. Row-level-security rejections get
/// a specific permissions message; everything else surfaces what the server
/// said, or a generic fallback.
fn save_error_message(e: &anyhow::Error) -> String {
    match e.downcast_ref::<ApiError>() {
        Some(ApiError::AccessDenied(_)) | Some(ApiError::Unauthorized) => {
            "Permission error: you do not have access to modify this attendance".to_string()
        }
        Some(api_err) => format!("Failed to save attendance: {}", api_err),
        None => {
            let message = e.to_string();
            if message.is_empty() {
                "Failed to save attendance".to_string()
            } else {
                format!("Failed to save attendance: {}", message)
            }
        }
    }
}

/// User-facing message for a failed login attempt
fn login_error_message(e: &anyhow::Error) -> String {
    match e.downcast_ref::<ApiError>() {
        Some(ApiError::InvalidCredentials) => {
            "Invalid credentials. Check your email and password.".to_string()
        }
        Some(ApiError::Network(_)) => {
            "Unable to connect to the server. Check your internet connection.".to_string()
        }
        Some(api_err) => format!("Login failed: {}", api_err),
        None => format!("Login failed: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Attendance.next(), Tab::Athletes);
        assert_eq!(Tab::Athletes.next(), Tab::Attendance);
        assert_eq!(Tab::Attendance.prev(), Tab::Athletes);
    }

    #[test]
    fn test_notification_not_expired_immediately() {
        let n = Notification::new(NotificationKind::Success, "saved".to_string());
        assert!(!n.expired());
    }

    #[test]
    fn test_save_error_message_for_rls() {
        let err: anyhow::Error = ApiError::AccessDenied("rls".to_string()).into();
        assert!(save_error_message(&err).starts_with("Permission error"));
    }

    #[test]
    fn test_save_error_message_generic() {
        let err = anyhow::anyhow!("duplicate key value");
        assert_eq!(
            save_error_message(&err),
            "Failed to save attendance: duplicate key value"
        );
    }

    #[test]
    fn test_login_error_message_invalid_credentials() {
        let err: anyhow::Error = ApiError::InvalidCredentials.into();
        assert_eq!(
            login_error_message(&err),
            "Invalid credentials. Check your email and password."
        );
    }
}
