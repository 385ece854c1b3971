//! The Athletes tab: attendance statistics per athlete, filterable by
//! group and name.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::{App, AppState};
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    render_filters(frame, app, chunks[0]);
    render_stats_table(frame, app, chunks[1]);
}

fn render_filters(frame: &mut Frame, app: &App, area: Rect) {
    let searching = matches!(app.state, AppState::Searching);

    let group_label = app
        .group_filter
        .and_then(|i| app.groups.get(i))
        .map(|g| g.label())
        .unwrap_or_else(|| "All groups".to_string());

    let search_display = if searching {
        format!("{}▌", app.search_query)
    } else if app.search_query.is_empty() {
        "-".to_string()
    } else {
        app.search_query.clone()
    };

    let line = Line::from(vec![
        Span::styled("Search [/]: ", styles::muted_style()),
        Span::styled(search_display, styles::search_style()),
        Span::styled("   Group [g]: ", styles::muted_style()),
        Span::styled(group_label, styles::highlight_style()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(searching));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_stats_table(frame: &mut Frame, app: &App, area: Rect) {
    let filtered = app.filtered_stats();

    let group_name = |grupo_id: i64| -> String {
        app.groups
            .iter()
            .find(|g| g.id == grupo_id)
            .map(|g| g.nombre.clone())
            .unwrap_or_else(|| "-".to_string())
    };

    let header = Row::new([
        Cell::from("Name"),
        Cell::from("Group"),
        Cell::from("Attended"),
        Cell::from("Classes"),
        Cell::from("%"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = filtered
        .iter()
        .map(|s| {
            let pct = s.percentage();
            let pct_cell = if s.total == 0 {
                Cell::from(Span::styled("-", styles::muted_style()))
            } else {
                Cell::from(Span::styled(
                    format!("{:>3}%", pct),
                    styles::attendance_style(pct),
                ))
            };
            Row::new(vec![
                Cell::from(s.athlete.full_name()),
                Cell::from(group_name(s.athlete.grupo_id)),
                Cell::from(format!("{:>4}", s.attended)),
                Cell::from(format!("{:>4}", s.total)),
                pct_cell,
            ])
        })
        .collect();

    let widths = [
        Constraint::Percentage(40),
        Constraint::Fill(1),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(5),
    ];

    let title = if app.stats_loading {
        " Athletes (loading...) ".to_string()
    } else {
        format!(" Athletes ({}) ", filtered.len())
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !filtered.is_empty() {
        state.select(Some(app.stats_selection.min(filtered.len() - 1)));
    }
    frame.render_stateful_widget(table, area, &mut state);
}
