use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph, Sparkline, Wrap};
use ratatui::Frame;

use creator_core::{Field, SubmissionState};

use crate::app::{App, Mode, SignInFocus};
use crate::util::{mask, thousands};

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let size = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(4),
        ])
        .split(size);

    render_header(frame, chunks[0], app);

    match app.mode {
        Mode::SignIn => render_sign_in(frame, chunks[1], app),
        Mode::Dashboard => render_dashboard(frame, chunks[1], app),
    }

    render_footer(frame, chunks[2], app);

    if app.show_help {
        render_help(frame, size);
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let title = match (&app.mode, &app.signed_in_as) {
        (Mode::Dashboard, Some(email)) => format!("CreatorAnalytics  dashboard  {}", email),
        (Mode::Dashboard, None) => "CreatorAnalytics  dashboard".to_string(),
        (Mode::SignIn, _) => "CreatorAnalytics  sign in".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title("creator");
    let paragraph = Paragraph::new(Line::from(title)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_sign_in(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let form_area = centered_rect(60, 70, area);
    let snapshot = app.snapshot();
    let submitting = snapshot.submission_state.is_submitting();

    let email = snapshot.values.get(Field::Email);
    let password = mask(snapshot.values.get(Field::Password));

    let mut lines = vec![
        Line::from(Span::styled(
            "Welcome back! Sign in to view your analytics.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        field_line("Email", email, app.focus == SignInFocus::Email),
    ];
    push_field_error(&mut lines, snapshot.field_errors.get(&Field::Email));
    lines.push(field_line(
        "Password",
        &password,
        app.focus == SignInFocus::Password,
    ));
    push_field_error(&mut lines, snapshot.field_errors.get(&Field::Password));
    lines.push(Line::from(""));
    lines.push(submit_line(app.focus == SignInFocus::Submit, submitting));

    if snapshot.submission_state == SubmissionState::Succeeded {
        lines.push(Line::from(Span::styled(
            "Signed in, redirecting...",
            Style::default().fg(Color::Green),
        )));
    }

    frame.render_widget(Clear, form_area);
    let block = Block::default().borders(Borders::ALL).title("Sign in");
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, form_area);
}

fn push_field_error(lines: &mut Vec<Line<'static>>, message: Option<&String>) {
    if let Some(message) = message {
        lines.push(Line::from(Span::styled(
            format!("  {}", message),
            Style::default().fg(Color::Red),
        )));
    }
}

fn submit_line(focused: bool, submitting: bool) -> Line<'static> {
    if submitting {
        return Line::from(Span::styled(
            "[Signing in…]",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
        ));
    }
    let style = if focused {
        Style::default().fg(Color::Black).bg(Color::LightGreen)
    } else {
        Style::default().fg(Color::Green)
    };
    Line::from(Span::styled("[Sign in]", style))
}

fn render_dashboard(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(8),
            Constraint::Length(7),
        ])
        .split(area);

    render_overview(frame, chunks[0], app);
    render_revenue(frame, chunks[1], app);
    render_views(frame, chunks[2], app);
}

fn render_overview(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("Overview");
    let Some(overview) = &app.dashboard.overview else {
        let paragraph = Paragraph::new("Loading...").block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let lines = vec![
        stat_line("Total views", thousands(overview.total_views)),
        stat_line("Subscribers", thousands(overview.subscribers)),
        stat_line("Revenue", format!("${}", thousands(overview.revenue))),
        stat_line("Engagement", format!("{:.1}%", overview.engagement_rate)),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn stat_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<12} ", label),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
    ])
}

fn render_revenue(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let bars: Vec<Bar> = app
        .dashboard
        .revenue
        .iter()
        .map(|entry| {
            Bar::default()
                .value(entry.revenue)
                .label(Line::from(entry.kind.clone()))
                .text_value(format!("${}", thousands(entry.revenue)))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Revenue by source"),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    frame.render_widget(chart, area);
}

fn render_views(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let views = &app.dashboard.views;
    let title = match (views.first(), views.last()) {
        (Some(first), Some(last)) => format!("Daily views  {} to {}", first.date, last.date),
        _ => "Daily views".to_string(),
    };
    let sparkline = Sparkline::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .data(views.iter().map(|point| u64::from(point.views)))
        .style(Style::default().fg(Color::Magenta));
    frame.render_widget(sparkline, area);
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let hint = match app.mode {
        Mode::SignIn if app.is_submitting() => "signing in...  esc quit",
        Mode::SignIn => "tab next  shift+tab prev  enter submit  ctrl+u clear  ctrl+w word  F1 help  esc quit",
        Mode::Dashboard => "r refresh views  o sign out  ? help  q quit",
    };

    let mut lines = vec![Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    ))];

    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Green),
        )));
    }
    if let Some(err) = &app.error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_help(frame: &mut Frame<'_>, area: Rect) {
    let modal = centered_rect(70, 60, area);
    frame.render_widget(Clear, modal);

    let text = vec![
        Line::from("Global: Ctrl+C quit, F1 help"),
        Line::from("Sign in: tab/shift+tab move, enter next field or submit, Ctrl+U clear field, Ctrl+W delete word, esc quit"),
        Line::from("Dashboard: r refresh views, o sign out, q/esc quit, ? help"),
        Line::from(""),
        Line::from("Passwords need 8 to 64 characters with upper and lower case letters, a digit and a special character, and no spaces."),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, modal);
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::styled(
            format!("{:<9} ", format!("{}:", label)),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{}{}", value, cursor), style),
    ])
}

fn centered_rect(percent_x: u16, percent_y: u16, rect: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(rect);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
