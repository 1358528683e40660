use leavetrack_core::{most_used_leave_type, LeaveRepository, LeaveStatus};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};

use crate::text::truncate;
use crate::tui::app::{App, Tab};

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    active: Color,
    cancelled: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    active: Color::Green,
    cancelled: Color::Red,
};

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
}

pub fn draw<R: LeaveRepository>(f: &mut Frame, app: &mut App<R>) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Footer/Help
        ])
        .split(f.area());

    let titles: Vec<&str> = Tab::ALL.iter().map(|t| t.title()).collect();
    let selected = Tab::ALL.iter().position(|t| *t == app.tab).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .block(panel(" LEAVETRACK "))
        .select(selected)
        .style(Style::default().fg(THEME.muted))
        .highlight_style(Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, main_chunks[0]);

    if app.records.is_empty() {
        f.render_widget(
            Paragraph::new("No leave records yet. Add some with `leavetrack add`.")
                .alignment(Alignment::Center)
                .block(panel("")),
            main_chunks[1],
        );
    } else {
        match app.tab {
            Tab::Records => draw_records(f, app, main_chunks[1]),
            Tab::Monthly => draw_monthly(f, app, main_chunks[1]),
            Tab::Overall => draw_overall(f, app, main_chunks[1]),
            Tab::Employees => draw_employees(f, app, main_chunks[1]),
        }
    }

    let footer_text = match &app.message {
        Some(msg) => msg.clone(),
        None => "Tab/←/→: Switch | j/k: Navigate | c: Cancel | d: Delete | D: Delete month | r: Reload | q: Quit".to_string(),
    };
    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(THEME.muted))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[2]);
}

fn status_style(status: &LeaveStatus) -> Style {
    if status.is_active() {
        Style::default().fg(THEME.active)
    } else {
        Style::default().fg(THEME.cancelled)
    }
}

fn draw_records<R: LeaveRepository>(f: &mut Frame, app: &mut App<R>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let rows: Vec<Row> = app
        .records
        .iter()
        .map(|r| {
            Row::new(vec![
                Span::raw(r.leave_date.format("%Y-%m-%d").to_string()),
                Span::styled(truncate(&r.employee_name, 20), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(truncate(r.effective_leave_type(), 20)),
                Span::styled(r.status.to_string(), status_style(&r.status)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10), // Date
            Constraint::Min(12),    // Employee
            Constraint::Length(20), // Type
            Constraint::Length(10), // Status
        ],
    )
    .header(Row::new(vec!["Date", "Employee", "Type", "Status"]).style(Style::default().fg(Color::Yellow)))
    .block(panel(" Leave Records "))
    .row_highlight_style(Style::default().bg(THEME.muted).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, chunks[0], &mut app.state);

    let detail = match app.selected() {
        Some(r) => vec![
            Line::from(Span::styled(r.employee_name.as_str(), Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
            detail_line("ID", &r.id),
            detail_line("Date", &r.leave_date.format("%A, %B %-d %Y").to_string()),
            detail_line("Type", r.effective_leave_type()),
            detail_line("Status", r.status.as_str()),
            detail_line("Comment", r.comment.as_deref().unwrap_or("-")),
        ],
        None => Vec::new(),
    };
    f.render_widget(
        Paragraph::new(detail).block(panel(" Detail ")).wrap(Wrap { trim: true }),
        chunks[1],
    );
}

fn detail_line<'a>(label: &'a str, value: &str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Color::Blue)),
        Span::styled(value.to_string(), Style::default().fg(THEME.text)),
    ])
}

fn draw_monthly<R: LeaveRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(75), // Chart Area
            Constraint::Length(1),      // Gutter
            Constraint::Percentage(25), // Info Panel
        ])
        .split(area);

    let bars: Vec<Bar> = app
        .analytics
        .monthly
        .iter()
        .map(|bucket| {
            let label = format!("{:02}/{:02}", bucket.month, bucket.year % 100);
            Bar::default()
                .label(label)
                .value(bucket.total_leaves as u64)
                .style(Style::default().fg(THEME.primary))
        })
        .collect();

    let chart = BarChart::default()
        .block(panel(" Leaves per Month "))
        .bar_width(5)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));
    f.render_widget(chart, chunks[0]);

    let mut info = vec![
        Line::from(Span::styled("Highlights", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
    ];
    if let Some(h) = &app.analytics.highlights {
        info.push(detail_line("Months", &h.months_tracked.to_string()));
        info.push(detail_line("Avg/month", &format!("{:.1}", h.avg_leaves_per_month)));
        info.push(detail_line("Peak", &h.peak_month));
        info.push(detail_line("Latest", &h.latest_month_total.to_string()));
    }
    f.render_widget(
        Paragraph::new(info).block(panel(" Summary ")).wrap(Wrap { trim: true }),
        chunks[2],
    );
}

fn draw_overall<R: LeaveRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let overall = &app.analytics.overall;
    let rows: Vec<Row> = overall
        .leave_types
        .iter()
        .map(|share| {
            Row::new(vec![
                truncate(&share.leave_type, 24),
                share.count.to_string(),
                format!("{:.1}%", share.percentage),
            ])
        })
        .collect();
    let types = Table::new(rows, [Constraint::Min(12), Constraint::Length(6), Constraint::Length(7)])
        .header(Row::new(vec!["Type", "Count", "Share"]).style(Style::default().fg(Color::Yellow)))
        .block(panel(" Leave Types "));
    f.render_widget(types, chunks[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(9)])
        .split(chunks[1]);

    let rows: Vec<Row> = overall
        .status_distribution
        .iter()
        .map(|share| {
            Row::new(vec![
                share.status.clone(),
                share.count.to_string(),
                format!("{:.1}%", share.percentage),
            ])
        })
        .collect();
    let statuses = Table::new(rows, [Constraint::Min(10), Constraint::Length(6), Constraint::Length(7)])
        .header(Row::new(vec!["Status", "Count", "Share"]).style(Style::default().fg(Color::Yellow)))
        .block(panel(" Status "));
    f.render_widget(statuses, right[0]);

    let totals = &overall.total_stats;
    let mut info = vec![
        detail_line("Total", &totals.total_leaves.to_string()),
        detail_line("Active", &totals.active_leaves.to_string()),
        detail_line("Cancelled", &totals.cancelled_leaves.to_string()),
        detail_line("Employees", &totals.unique_employees.to_string()),
        detail_line("Avg/employee", &format!("{:.1}", totals.avg_leaves_per_employee)),
        detail_line("Most used", &totals.most_used_leave_type),
    ];
    if let Some(top) = app.analytics.top_employee() {
        info.push(detail_line("Top employee", &format!("{} ({})", top.employee_name, top.total_leaves)));
    }
    f.render_widget(Paragraph::new(info).block(panel(" Totals ")), right[1]);
}

fn draw_employees<R: LeaveRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let rows: Vec<Row> = app
        .analytics
        .employees
        .iter()
        .map(|e| {
            Row::new(vec![
                Span::styled(truncate(&e.employee_name, 24), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(e.total_leaves.to_string()),
                Span::styled(e.active_leaves.to_string(), Style::default().fg(THEME.active)),
                Span::styled(e.cancelled_leaves.to_string(), Style::default().fg(THEME.cancelled)),
                Span::raw(most_used_leave_type(e).to_string()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(12),
            Constraint::Length(6),
            Constraint::Length(7),
            Constraint::Length(10),
            Constraint::Length(20),
        ],
    )
    .header(
        Row::new(vec!["Employee", "Total", "Active", "Cancelled", "Most used"])
            .style(Style::default().fg(Color::Yellow)),
    )
    .block(panel(" Employees "));
    f.render_widget(table, area);
}
