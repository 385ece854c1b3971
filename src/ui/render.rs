use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, LoginFocus, LoginMode, NotificationKind, Tab};

use super::styles;
use super::tabs::{athletes, attendance};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame, app);
    }

    if matches!(app.state, AppState::LoggingIn) {
        render_login_overlay(frame, app);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Asistencia";
    let help_hint = "[?] Help";

    let teacher_label = app
        .binding
        .teacher()
        .map(|t| format!("  {}", t.display_name()))
        .unwrap_or_default();

    let title_len = title.len() + teacher_label.chars().count();

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::styled(teacher_label, styles::muted_style()),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(title_len as u16 + help_hint.len() as u16 + 4)
                as usize,
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let tabs = [Tab::Attendance, Tab::Athletes];

    let mut spans = vec![Span::raw(" ")];
    for (i, tab) in tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        let label = format!("[{}] {}", i + 1, tab.title());
        if app.tab == *tab {
            spans.push(Span::styled(label, styles::tab_style(true)));
        } else {
            spans.push(Span::styled(label, styles::muted_style()));
        }
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.tab {
        Tab::Attendance => attendance::render(frame, app, area),
        Tab::Athletes => athletes::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.tab {
        Tab::Attendance => "[space] toggle | [a] all | [s] save | [q]uit",
        Tab::Athletes => "[/] search | [g] group | [q]uit",
    };

    // Notification wins, then the binding state, then the signed-in email
    let (left_text, left_style) = if let Some(ref notification) = app.notification {
        let style = match notification.kind {
            NotificationKind::Success => styles::success_style(),
            NotificationKind::Error => styles::error_style(),
        };
        (format!(" {} ", notification.text), style)
    } else if let Some(label) = app.binding.status_label() {
        (format!(" {} ", label), styles::highlight_style())
    } else if app.binding.is_anonymous() {
        (" not signed in ".to_string(), styles::muted_style())
    } else {
        let email = app
            .session
            .data
            .as_ref()
            .map(|d| d.email.as_str())
            .unwrap_or("");
        (format!(" {} ", email), styles::muted_style())
    };

    let right_text = format!(" {} ", shortcuts);
    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());

    let status_line = Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame, _app: &App) {
    let area = centered_rect_fixed(52, 24, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled(
            "                 Asistencia",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            format!("               version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        Line::from(vec![
            Span::styled("  1-2       ", styles::help_key_style()),
            Span::styled("Switch tabs", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  ←/→, Tab  ", styles::help_key_style()),
            Span::styled("Switch focus (schedules ↔ roster)", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  ↑/↓       ", styles::help_key_style()),
            Span::styled("Navigate list", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  Enter     ", styles::help_key_style()),
            Span::styled("Select schedule", styles::help_desc_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(" Attendance", styles::highlight_style())),
        Line::from(vec![
            Span::styled("  d         ", styles::help_key_style()),
            Span::styled("Change date (YYYY-MM-DD)", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  Space     ", styles::help_key_style()),
            Span::styled("Toggle athlete present/absent", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  a         ", styles::help_key_style()),
            Span::styled("Toggle everyone", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  s         ", styles::help_key_style()),
            Span::styled("Save attendance", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  r         ", styles::help_key_style()),
            Span::styled("Reload roster", styles::help_desc_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(" Session", styles::highlight_style())),
        Line::from(vec![
            Span::styled("  L         ", styles::help_key_style()),
            Span::styled("Log out", styles::help_desc_style()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn render_login_overlay(frame: &mut Frame, app: &App) {
    let height = if app.login_error.is_some() { 13 } else { 11 };
    let area = centered_rect_fixed(54, height, frame.area());
    frame.render_widget(Clear, area);

    let heading = match app.login_mode {
        LoginMode::SignIn => "Sign in",
        LoginMode::SignUp => "Create account",
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("              Asistencia - {}", heading),
            styles::title_style(),
        )),
        Line::from(""),
    ];

    // Email field
    let email_focused = app.login_focus == LoginFocus::Email;
    let email_style = if email_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let cursor = if email_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled("Email:    [", styles::muted_style()),
        Span::styled(
            format!("{:<30}{}", app.login_email, cursor),
            email_style,
        ),
        Span::styled("]", styles::muted_style()),
    ]));

    // Password field
    let password_focused = app.login_focus == LoginFocus::Password;
    let password_style = if password_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let masked: String = "*".repeat(app.login_password.len().min(30));
    let cursor = if password_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled("Password: [", styles::muted_style()),
        Span::styled(format!("{:<30}{}", masked, cursor), password_style),
        Span::styled("]", styles::muted_style()),
    ]));

    // Submit button
    let button_focused = app.login_focus == LoginFocus::Button;
    let button_style = if button_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let label = match app.login_mode {
        LoginMode::SignIn => "Sign in",
        LoginMode::SignUp => "Sign up",
    };
    lines.push(Line::from(""));
    if button_focused {
        lines.push(Line::from(vec![
            Span::raw("               ["),
            Span::styled(format!(" ▶ {} ◀ ", label), button_style),
            Span::raw("]"),
        ]));
    } else {
        lines.push(Line::from(vec![
            Span::raw("               ["),
            Span::styled(format!("   {}   ", label), button_style),
            Span::raw("]"),
        ]));
    }

    lines.push(Line::from(""));
    let switch_hint = match app.login_mode {
        LoginMode::SignIn => "   [F2] create a new account",
        LoginMode::SignUp => "   [F2] back to sign in",
    };
    lines.push(Line::from(Span::styled(switch_hint, styles::muted_style())));

    if let Some(ref error) = app.login_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            styles::error_style(),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 8, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            "               Asistencia",
            styles::title_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
