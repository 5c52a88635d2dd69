//! Fishing scene UI rendering.
//!
//! Displays the water with the float or the hooked fish, the bite and fight
//! gauges, the angler's stats and a short message log.

use castline::encounter::{BiteSequence, PullEngine};
use castline::{FishingState, Player, SessionOrchestrator};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

/// Width of the water strip the hooked fish travels along.
const WATER_WIDTH: usize = 40;

/// Rings spreading out from the float while nothing bites.
const RIPPLE_FRAMES: [&str; 4] = ["  .  ", " (.) ", "((.))", " ( ) "];
const RIPPLE_FRAME_MS: u128 = 250;

/// Flavour text while waiting; advances every `IDLE_LINE_SECONDS` of session time.
const IDLE_LINES: [&str; 10] = [
    "The float drifts...",
    "Ripples spread slowly...",
    "A dragonfly lands nearby...",
    "Something stirs below...",
    "The reeds rustle...",
    "A shadow passes under the water...",
    "Patience...",
    "The line hangs slack...",
    "Bubbles rise near the float...",
    "The water is calm...",
];
const IDLE_LINE_SECONDS: f64 = 5.0;

/// Wall clock for animations, independent of the simulation clock.
fn wall_clock_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis())
}

fn ripple_frame(now_ms: u128) -> &'static str {
    RIPPLE_FRAMES[((now_ms / RIPPLE_FRAME_MS) % RIPPLE_FRAMES.len() as u128) as usize]
}

fn idle_line(session_time: f64) -> &'static str {
    let slot = (session_time.max(0.0) / IDLE_LINE_SECONDS) as usize;
    IDLE_LINES[slot % IDLE_LINES.len()]
}

/// Renders the fishing scene UI.
///
/// # Layout
/// ```text
/// +---------------------------------------+
/// |  CASTLINE - [Angler]                  |
/// +---------------------------------------+
/// |     ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~         |
/// |       ~~~~~~ O ~~~~~~                 |
/// |     ~ ~ ~ ~ ~|~ ~ ~ ~ ~ ~ ~           |
/// +---------------------------------------+
/// |  Status / bite timer                  |
/// |  Distance ████████░░  Tension ██░░░   |
/// +-------------------+-------------------+
/// |  Angler stats     |  Message log      |
/// +-------------------+-------------------+
/// ```
pub fn render_fishing_scene(
    frame: &mut Frame,
    area: Rect,
    orchestrator: &SessionOrchestrator,
    messages: &VecDeque<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Water
            Constraint::Length(4), // Status
            Constraint::Length(3), // Gauges
            Constraint::Length(8), // Stats + log
        ])
        .split(area);

    draw_header(frame, chunks[0], orchestrator.player());
    draw_water_scene(frame, chunks[1], orchestrator);
    draw_status(frame, chunks[2], orchestrator);
    draw_gauges(frame, chunks[3], orchestrator.fight());

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[4]);
    draw_player_panel(frame, bottom[0], orchestrator.player());
    draw_message_log(frame, bottom[1], messages);
}

fn draw_header(frame: &mut Frame, area: Rect, player: Option<&Player>) {
    let name = player.map_or("Nobody", |p| p.name.as_str());
    let header = Paragraph::new(Line::from(Span::styled(
        format!("Fishing with {}", name),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL).title(" CASTLINE "))
    .alignment(Alignment::Center);

    frame.render_widget(header, area);
}

fn calm_water(float_style: Style) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            "    ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~",
            Style::default().fg(Color::Blue),
        )),
        Line::from(vec![
            Span::styled("      ~~~~~~", Style::default().fg(Color::Blue)),
            Span::styled(" O ", float_style),
            Span::styled("~~~~~~", Style::default().fg(Color::Blue)),
        ]),
        Line::from(vec![
            Span::styled("    ~ ~ ~ ~ ~", Style::default().fg(Color::Blue)),
            Span::styled("|", Style::default().fg(Color::DarkGray)),
            Span::styled("~ ~ ~ ~ ~ ~ ~", Style::default().fg(Color::Blue)),
        ]),
    ]
}

fn bobbing_water(bite: Option<&BiteSequence>) -> Vec<Line<'static>> {
    // Faster biters make the float flicker faster.
    let speed = bite.map_or(1.0, BiteSequence::bite_speed).max(0.1);
    let period = (400.0 / speed) as u128;
    let dipped = (wall_clock_millis() / period.max(1)) % 2 == 0;

    if !dipped {
        return calm_water(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
    }
    vec![
        Line::from(Span::styled(
            "    ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~",
            Style::default().fg(Color::Blue),
        )),
        Line::from(vec![
            Span::styled("      ~~~", Style::default().fg(Color::Blue)),
            Span::styled("~", Style::default().fg(Color::LightBlue)),
            Span::styled("~", Style::default().fg(Color::Blue)),
            Span::styled(" o ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled("~", Style::default().fg(Color::Blue)),
            Span::styled("~", Style::default().fg(Color::LightBlue)),
            Span::styled("~~~", Style::default().fg(Color::Blue)),
        ]),
        Line::from(vec![
            Span::styled("    ~ ~ ~ ~", Style::default().fg(Color::Blue)),
            Span::styled(" |", Style::default().fg(Color::DarkGray)),
            Span::styled(" ~ ~ ~ ~ ~ ~", Style::default().fg(Color::Blue)),
        ]),
    ]
}

/// Taut line from the bank (left) to the fish, placed by remaining distance.
fn fight_water(engine: Option<&PullEngine>) -> Vec<Line<'static>> {
    let remaining = engine.map_or(1.0, |e| 1.0 - e.progress());
    let fish_at = ((WATER_WIDTH - 1) as f64 * remaining).round() as usize;
    let resisting = engine.is_some_and(PullEngine::is_resisting);

    let fish_style = if resisting {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    };

    vec![
        Line::from(Span::styled(
            "~ ".repeat(WATER_WIDTH / 2),
            Style::default().fg(Color::Blue),
        )),
        Line::from(vec![
            Span::styled("/", Style::default().fg(Color::Gray)),
            Span::styled("-".repeat(fish_at), Style::default().fg(Color::DarkGray)),
            Span::styled("><>", fish_style),
            Span::styled(
                "~".repeat(WATER_WIDTH.saturating_sub(fish_at)),
                Style::default().fg(Color::Blue),
            ),
        ]),
        Line::from(Span::styled(
            " ~".repeat(WATER_WIDTH / 2),
            Style::default().fg(Color::Blue),
        )),
    ]
}

fn draw_water_scene(frame: &mut Frame, area: Rect, orchestrator: &SessionOrchestrator) {
    let water_lines = match orchestrator.state() {
        FishingState::Biting => bobbing_water(orchestrator.bite()),
        FishingState::Hooked | FishingState::Fighting => fight_water(orchestrator.fight()),
        FishingState::Ready => Vec::new(),
        _ => calm_water(Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
    };

    let water_paragraph = Paragraph::new(water_lines)
        .block(Block::default().borders(Borders::LEFT | Borders::RIGHT))
        .alignment(Alignment::Center);

    frame.render_widget(water_paragraph, area);
}

fn draw_status(frame: &mut Frame, area: Rect, orchestrator: &SessionOrchestrator) {
    let state = orchestrator.state();

    let (phase_text, phase_color) = match state {
        FishingState::Ready => ("Not fishing".to_string(), Color::DarkGray),
        FishingState::Waiting => {
            let ripple = ripple_frame(wall_clock_millis());
            let line = idle_line(orchestrator.session().session_time());
            (format!("{} {}", ripple, line), Color::Cyan)
        }
        FishingState::Biting => ("Something is biting! [Space] to strike".to_string(), Color::Yellow),
        FishingState::Hooked => ("Hooked! [Up] to start reeling".to_string(), Color::Yellow),
        FishingState::Fighting => ("FISH ON! Keep reeling".to_string(), Color::LightRed),
        FishingState::Caught => ("Landed!".to_string(), Color::Green),
        FishingState::Escaped => ("It got away...".to_string(), Color::Red),
    };

    let detail = match state {
        FishingState::Biting => orchestrator
            .bite()
            .map(|b| format!("Window closes in {:.1}s", b.remaining())),
        FishingState::Waiting if orchestrator.awaiting_rebite() => {
            Some("It might come back...".to_string())
        }
        FishingState::Fighting | FishingState::Hooked => orchestrator
            .session()
            .current_fish()
            .map(|f| format!("{} on the line", f.species())),
        FishingState::Caught | FishingState::Escaped => orchestrator
            .last_outcome()
            .map(|o| o.result.message().to_string()),
        _ => None,
    };

    let mut lines = vec![Line::from(Span::styled(
        phase_text,
        Style::default()
            .fg(phase_color)
            .add_modifier(Modifier::BOLD),
    ))];
    if let Some(detail) = detail {
        lines.push(Line::from(Span::styled(
            detail,
            Style::default().fg(Color::Gray),
        )));
    }

    let status = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Status "))
        .alignment(Alignment::Center);
    frame.render_widget(status, area);
}

fn draw_gauges(frame: &mut Frame, area: Rect, engine: Option<&PullEngine>) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let (progress, tension, distance) = engine.map_or((0.0, 0.0, 0.0), |e| (e.progress(), e.tension(), e.distance()));

    let reel = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Reeled In "))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(progress.clamp(0.0, 1.0))
        .label(format!("{:.1}m out", distance));
    frame.render_widget(reel, halves[0]);

    let tension_color = if tension > 0.75 {
        Color::Red
    } else if tension > 0.4 {
        Color::Yellow
    } else {
        Color::Cyan
    };
    let strain = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Tension "))
        .gauge_style(Style::default().fg(tension_color))
        .ratio(tension.clamp(0.0, 1.0));
    frame.render_widget(strain, halves[1]);
}

fn draw_player_panel(frame: &mut Frame, area: Rect, player: Option<&Player>) {
    let lines = match player {
        Some(p) => {
            let gear = p.equipment();
            vec![
                Line::from(format!("Strength:  {:.2}", p.strength())),
                Line::from(format!("XP:        {}", p.experience())),
                Line::from(format!("Coins:     {}", p.coins())),
                Line::from(format!("Rod:       {:.0}%", gear.rod_durability())),
                Line::from(format!("Line:      {:.0}%", gear.line_durability())),
                Line::from(format!("Luck:      {:.2}", gear.fishing_luck())),
            ]
        }
        None => vec![Line::from("No angler")],
    };

    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Angler "));
    frame.render_widget(panel, area);
}

fn draw_message_log(frame: &mut Frame, area: Rect, messages: &VecDeque<String>) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = messages
        .iter()
        .rev()
        .take(visible)
        .rev()
        .map(|m| Line::from(m.as_str()))
        .collect();

    let log = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Log "));
    frame.render_widget(log, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_line_holds_for_five_seconds() {
        assert_eq!(idle_line(0.0), IDLE_LINES[0]);
        assert_eq!(idle_line(4.9), IDLE_LINES[0]);
        assert_eq!(idle_line(5.0), IDLE_LINES[1]);
        assert_eq!(idle_line(50.0), IDLE_LINES[0]);
        assert_eq!(idle_line(-3.0), IDLE_LINES[0]);
    }

    #[test]
    fn test_ripple_cycles_every_second() {
        assert_eq!(ripple_frame(0), RIPPLE_FRAMES[0]);
        assert_eq!(ripple_frame(260), RIPPLE_FRAMES[1]);
        assert_eq!(ripple_frame(1_000), RIPPLE_FRAMES[0]);
    }
}
