pub mod fishing_scene;

use castline::SessionOrchestrator;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::collections::VecDeque;

/// Main UI drawing function
pub fn draw_ui(frame: &mut Frame, orchestrator: &SessionOrchestrator, messages: &VecDeque<String>, pulling: bool) {
    let size = frame.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(size);

    fishing_scene::render_fishing_scene(frame, chunks[0], orchestrator, messages);
    draw_footer(frame, chunks[1], orchestrator, pulling);
}

fn draw_footer(frame: &mut Frame, area: ratatui::layout::Rect, orchestrator: &SessionOrchestrator, pulling: bool) {
    let reel = if pulling {
        Span::styled(" REELING ", Style::default().fg(Color::Black).bg(Color::Green))
    } else {
        Span::styled(" slack ", Style::default().fg(Color::DarkGray))
    };

    let next_fish = orchestrator
        .next_spawn_in()
        .map(|secs| format!("  next fish ~{:.0}s", secs.ceil()))
        .unwrap_or_default();

    let footer = Paragraph::new(Line::from(vec![
        reel,
        Span::styled(
            "  [Space] Hook  [Up/Enter] Reel  [R] Release  [Q] Quit",
            Style::default().fg(Color::Gray),
        ),
        Span::styled(next_fish, Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center);

    frame.render_widget(footer, area);
}
