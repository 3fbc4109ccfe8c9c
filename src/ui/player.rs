use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::playback::PlaybackState;
use crate::ui::colors::{Palette, LIVE_RED};

pub const NO_SIGNAL_TEXT: &str = "No Signal Detected";
pub const BUFFERING_TEXT: &str = "Buffering";

pub fn render_player(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(5),    // Video surface
            Constraint::Length(1), // Controls
        ])
        .split(area);

    render_title_bar(f, app, palette, chunks[0]);
    render_surface(f, app, chunks[1]);

    let state_label = if app.view.is_playing { "Pause" } else { "Play" };
    let controls = Paragraph::new(Line::from(vec![
        Span::styled(" Space ", Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)),
        Span::styled(format!("{}  ", state_label), Style::default().fg(palette.text)),
        Span::styled(" Esc ", Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)),
        Span::styled("Back", Style::default().fg(palette.text)),
    ]));
    f.render_widget(controls, chunks[2]);
}

fn render_title_bar(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let name = app
        .view
        .selected_channel
        .as_ref()
        .map(|c| c.name.as_str())
        .unwrap_or_default();

    // Pulse roughly once a second at the UI tick rate
    let pulse = (app.loading_tick / 5) % 2 == 0;
    let badge_style = if pulse {
        Style::default().bg(LIVE_RED).fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(LIVE_RED).add_modifier(Modifier::BOLD)
    };

    let title = Paragraph::new(Line::from(vec![
        Span::styled(" ‹ ", Style::default().fg(palette.text).add_modifier(Modifier::BOLD)),
        Span::styled(" LIVE ", badge_style),
        Span::raw(" "),
        Span::styled(name, Style::default().fg(palette.text).add_modifier(Modifier::BOLD)),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(palette.border))
            .style(Style::default().bg(palette.bg)),
    );
    f.render_widget(title, area);
}

fn render_surface(f: &mut Frame, app: &App, area: Rect) {
    let screen = Block::default().style(Style::default().bg(Color::Black));
    let inner = screen.inner(area);
    f.render_widget(screen, area);

    let state = app.surface.as_ref().map(|s| s.state()).unwrap_or(PlaybackState::NoSignal);
    let muted = Style::default().fg(Color::Gray);

    let lines = match state {
        PlaybackState::NoSignal => vec![
            Line::from(Span::styled("⚠", Style::default().fg(LIVE_RED))),
            Line::from(Span::styled(NO_SIGNAL_TEXT, muted.add_modifier(Modifier::BOLD))),
        ],
        PlaybackState::Loading => {
            let spinner = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
            let frame = spinner[(app.loading_tick % spinner.len() as u64) as usize];
            vec![Line::from(vec![
                Span::styled(format!("{} ", frame), Style::default().fg(Color::White)),
                Span::styled(BUFFERING_TEXT, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            ])]
        }
        PlaybackState::Playing if !app.view.is_playing => {
            vec![Line::from(Span::styled("❚❚ Paused", Style::default().fg(Color::White)))]
        }
        PlaybackState::Playing => vec![Line::from(Span::styled("▶ Playing in external window", muted))],
    };

    let top = inner.y + inner.height.saturating_sub(lines.len() as u16) / 2;
    let text_area = Rect::new(inner.x, top, inner.width, (lines.len() as u16).min(inner.height));
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), text_area);
}
