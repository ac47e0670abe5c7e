use mockseed_generate::hashing_available;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Tabs, Wrap};

use crate::tui::state::{App, HashFocus, Tab};

pub const TABS_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 1;

pub fn draw_ui(frame: &mut ratatui::Frame, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TABS_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(frame.size());

    draw_tabs(frame, app, layout[0]);
    match app.tab {
        Tab::Options => draw_options(frame, app, layout[1]),
        Tab::Log => draw_log(frame, app, layout[1]),
        Tab::Hash => draw_hash(frame, app, layout[1]),
    }
    draw_footer(frame, app, layout[2]);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn draw_tabs(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let titles = Tab::ALL.iter().map(|tab| tab.title()).collect::<Vec<_>>();
    let tabs = Tabs::new(titles)
        .block(panel(" mockseed "))
        .select(app.tab.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn draw_options(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let label_width = app
        .fields
        .iter()
        .map(|field| field.label().chars().count())
        .max()
        .unwrap_or(0);

    let lines: Vec<Line> = app
        .fields
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let selected = idx == app.selected;
            let value = match (&app.editing, selected) {
                (Some(buffer), true) => format!("{buffer}_"),
                _ => app.field_value(*field),
            };
            let marker = if selected { " ► " } else { "   " };
            let style = if selected {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Green)),
                Span::styled(format!("{:<label_width$}  ", field.label()), style),
                Span::styled(value, style.fg(Color::Cyan)),
            ])
        })
        .collect();

    // Keep the selection visible on short terminals.
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = app.selected.saturating_sub(visible.saturating_sub(1));
    let paragraph = Paragraph::new(lines)
        .block(panel(" Options "))
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(paragraph, area);
}

fn log_style(line: &str) -> Style {
    if line.starts_with('❌') {
        Style::default().fg(Color::Red)
    } else if line.starts_with('✔') || line.starts_with("Linked") {
        Style::default().fg(Color::Green)
    } else if line.starts_with('╔') || line.starts_with('║') || line.starts_with('╚') {
        Style::default().fg(Color::Magenta)
    } else if line.starts_with('┣') {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn draw_log(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let height = area.height.saturating_sub(2) as usize;
    let total = app.log.len();
    let end = total.saturating_sub(app.scroll_offset as usize);
    let start = end.saturating_sub(height);

    let lines: Vec<Line> = app.log[start..end]
        .iter()
        .map(|line| Line::from(Span::styled(line.as_str(), log_style(line))))
        .collect();

    let title = if app.running {
        " Log (running) "
    } else {
        " Log "
    };
    frame.render_widget(Paragraph::new(lines).block(panel(title)), area);
}

fn draw_hash(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let hash = &app.hash;
    let focus_style = |focus: HashFocus| {
        if hash.focus == focus {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    };
    let cursor = |focus: HashFocus| if hash.focus == focus { "_" } else { "" };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Password: ", focus_style(HashFocus::Password)),
            Span::raw("*".repeat(hash.password.chars().count())),
            Span::raw(cursor(HashFocus::Password)),
        ]),
        Line::from(vec![
            Span::styled("Rounds:   ", focus_style(HashFocus::Rounds)),
            Span::raw(hash.rounds.as_str()),
            Span::raw(cursor(HashFocus::Rounds)),
        ]),
        Line::from(""),
    ];

    if !hashing_available() {
        lines.push(Line::from(Span::styled(
            "Password hashing is unavailable: this build has no bcrypt support.",
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::from(Span::styled(
            "Generate is disabled.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "[Enter] Generate hash   [Del] Clear",
            Style::default().fg(Color::Cyan),
        )));
    }

    if let Some(digest) = &hash.digest {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "bcrypt digest:",
            Style::default().fg(Color::Green),
        )));
        lines.push(Line::from(digest.as_str()));
    }
    if let Some(error) = &hash.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("❌ {error}"),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(panel(" Password hash "))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_footer(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let help = match app.tab {
        Tab::Hash => "Tab: switch  ↑/↓: field  Enter: hash  Del: clear  Esc: quit",
        _ if app.editing.is_some() => "Enter: apply  Esc: cancel",
        _ if app.running => "Tab: switch  ↑/↓: scroll  s: save  q: quit  (run in progress)",
        _ => "Tab: switch  ↑/↓: move  Enter/Space: edit  r: run  s: save  q: quit",
    };
    let line = match &app.status {
        Some(status) => Line::from(vec![
            Span::styled(status.as_str(), Style::default().fg(Color::Yellow)),
            Span::styled("  │  ", Style::default().fg(Color::DarkGray)),
            Span::styled(help, Style::default().fg(Color::DarkGray)),
        ]),
        None => Line::from(Span::styled(help, Style::default().fg(Color::DarkGray))),
    };
    frame.render_widget(Paragraph::new(line), area);
}
