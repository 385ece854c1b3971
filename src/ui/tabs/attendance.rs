//! The Attendance tab: date + schedule picker on the left, editable
//! roster on the right.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::{App, AppState, Focus};
use crate::ui::styles;
use crate::utils::weekday_name_es;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(chunks[0]);

    render_date(frame, app, left[0]);
    render_schedule_list(frame, app, left[1]);
    render_roster(frame, app, chunks[1]);
}

fn render_date(frame: &mut Frame, app: &App, area: Rect) {
    let editing = matches!(app.state, AppState::EditingDate);

    let line = if editing {
        Line::from(vec![
            Span::styled("Date: ", styles::muted_style()),
            Span::styled(
                format!("{}▌", app.date_input),
                styles::selected_style(),
            ),
            Span::styled("  (YYYY-MM-DD, Enter to apply)", styles::muted_style()),
        ])
    } else {
        Line::from(vec![
            Span::styled("Date: ", styles::muted_style()),
            Span::styled(
                app.selected_date.format("%Y-%m-%d").to_string(),
                styles::highlight_style(),
            ),
            Span::raw(format!("  {}", weekday_name_es(app.selected_date))),
            Span::styled("  [d] change", styles::muted_style()),
        ])
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(editing));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_schedule_list(frame: &mut Frame, app: &App, area: Rect) {
    let focused = matches!(app.focus, Focus::Schedules);

    let items: Vec<ListItem> = app
        .schedules
        .iter()
        .enumerate()
        .map(|(i, schedule)| {
            let marker = if app.selected_schedule == Some(i) {
                "● "
            } else {
                "  "
            };
            let line = Line::from(vec![
                Span::raw(marker),
                Span::styled(schedule.time_range(), styles::list_item_style()),
                Span::raw("  "),
                Span::styled(schedule.group_summary(), styles::muted_style()),
            ]);
            ListItem::new(line)
        })
        .collect();

    let title = if app.schedule_loading {
        " Schedules (loading...) ".to_string()
    } else if app.schedules.is_empty() {
        " Schedules (none for this day) ".to_string()
    } else {
        format!(" Schedules ({}) ", app.schedules.len())
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(focused)),
        )
        .highlight_style(styles::selected_style());

    let mut state = ListState::default();
    if !app.schedules.is_empty() {
        state.select(Some(app.schedule_cursor.min(app.schedules.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_roster(frame: &mut Frame, app: &App, area: Rect) {
    let focused = matches!(app.focus, Focus::Roster);

    let title = if app.roster_loading {
        " Roster (loading...) ".to_string()
    } else if app.selected_schedule.is_none() {
        " Roster - select a schedule ".to_string()
    } else if app.saving {
        " Roster (saving...) ".to_string()
    } else {
        format!(
            " Roster - {} of {} present ",
            app.present_count(),
            app.roster.len()
        )
    };

    let header = Row::new([Cell::from(""), Cell::from("Name")])
        .style(styles::title_style())
        .height(1);

    let rows: Vec<Row> = app
        .roster
        .iter()
        .map(|entry| {
            let mark = if entry.presente { "[x]" } else { "[ ]" };
            let mark_style = if entry.presente {
                styles::success_style()
            } else {
                styles::muted_style()
            };
            Row::new(vec![
                Cell::from(Span::styled(mark, mark_style)),
                Cell::from(entry.full_name()),
            ])
        })
        .collect();

    let widths = [Constraint::Length(4), Constraint::Fill(1)];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(focused)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !app.roster.is_empty() {
        state.select(Some(app.roster_selection.min(app.roster.len() - 1)));
    }
    frame.render_stateful_widget(table, area, &mut state);
}
