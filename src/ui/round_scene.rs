//! Round screen rendering.

use super::game_common::{centered_rect, create_game_layout, render_overlay, render_status_bar};
use numcrunch::core::game_state::Severity;
use numcrunch::core::snapshot::format_score;
use numcrunch::core::GameSnapshot;
use numcrunch::round::types::{NumberSlot, Resolution, RoundPhase, SlotState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

const CARD_WIDTH: u16 = 8;
const INFO_PANEL_WIDTH: u16 = 28;

/// Render the round screen.
pub fn render_round(frame: &mut Frame, area: Rect, snap: &GameSnapshot) {
    let layout = create_game_layout(
        frame,
        area,
        " numcrunch ",
        Color::Cyan,
        16,
        INFO_PANEL_WIDTH,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // stats
            Constraint::Length(3), // target
            Constraint::Length(3), // number cards
            Constraint::Length(3), // equation
            Constraint::Length(3), // timer
            Constraint::Length(1), // feedback
            Constraint::Min(0),
        ])
        .split(layout.content);

    render_stats(frame, rows[0], snap);
    render_target(frame, rows[1], snap);
    render_cards(frame, rows[2], &snap.numbers);
    render_equation(frame, rows[3], snap);
    render_timer(frame, rows[4], snap);
    render_feedback(frame, rows[5], snap);
    render_controls(frame, layout.status_bar, snap);
    render_info_panel(frame, layout.info_panel, snap);
}

fn render_stats(frame: &mut Frame, area: Rect, snap: &GameSnapshot) {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let line = Line::from(vec![
        Span::styled("Score ", label),
        Span::styled(format_score(snap.score), value),
        Span::styled("   Level ", label),
        Span::styled(snap.level.to_string(), value),
        Span::styled("   Streak ", label),
        Span::styled(
            snap.streak.to_string(),
            if snap.streak >= 3 {
                value.fg(Color::Yellow)
            } else {
                value
            },
        ),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_target(frame: &mut Frame, area: Rect, snap: &GameSnapshot) {
    let block = Block::default()
        .title(" Target ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    let text = Paragraph::new(Span::styled(
        snap.target.to_string(),
        Style::default()
            .fg(Color::LightMagenta)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(block);
    frame.render_widget(text, centered_rect(area, 20, area.height));
}

fn card_style(slot: &NumberSlot) -> (Style, Style) {
    match slot.state {
        SlotState::Available => (
            Style::default().fg(Color::Cyan),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        SlotState::Selected => (
            Style::default().fg(Color::Yellow),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        SlotState::Used => (
            Style::default().fg(Color::DarkGray),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
        ),
    }
}

fn render_cards(frame: &mut Frame, area: Rect, numbers: &[NumberSlot]) {
    if numbers.is_empty() {
        return;
    }
    let total = CARD_WIDTH * numbers.len() as u16;
    let strip = centered_rect(area, total, area.height);

    for (i, slot) in numbers.iter().enumerate() {
        let x = strip.x + i as u16 * CARD_WIDTH;
        if x + CARD_WIDTH > strip.x + strip.width {
            break;
        }
        let (border, value) = card_style(slot);
        let block = Block::default()
            .title(format!("{}", i + 1))
            .borders(Borders::ALL)
            .border_style(border);
        let card = Paragraph::new(Span::styled(slot.value.to_string(), value))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(card, Rect::new(x, strip.y, CARD_WIDTH, strip.height));
    }
}

fn render_equation(frame: &mut Frame, area: Rect, snap: &GameSnapshot) {
    let style = if snap.equation.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };
    let block = Block::default()
        .title(" Equation ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let text = Paragraph::new(Span::styled(snap.equation_display().to_string(), style))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(text, area);
}

fn timer_color(fraction: f64) -> Color {
    if fraction > 0.5 {
        Color::Green
    } else if fraction > 0.25 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn render_timer(frame: &mut Frame, area: Rect, snap: &GameSnapshot) {
    let gauge = Gauge::default()
        .block(Block::default().title(" Time ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(timer_color(snap.time_fraction)))
        .ratio(snap.time_fraction)
        .label(format!("{}s", snap.time_left));
    frame.render_widget(gauge, area);
}

fn render_feedback(frame: &mut Frame, area: Rect, snap: &GameSnapshot) {
    let Some(feedback) = &snap.feedback else {
        return;
    };
    let color = match feedback.severity {
        Severity::Info => Color::Cyan,
        Severity::Success => Color::Green,
        Severity::Error => Color::LightRed,
    };
    let text = Paragraph::new(Span::styled(
        feedback.message.clone(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(text, area);
}

fn render_controls(frame: &mut Frame, area: Rect, snap: &GameSnapshot) {
    let (status, color) = match snap.phase {
        RoundPhase::Active if snap.equation.is_empty() => ("Pick a number", Color::Yellow),
        RoundPhase::Active => ("Building...", Color::Green),
        RoundPhase::Resolved(Resolution::Correct) => ("Next level coming up", Color::Green),
        RoundPhase::Resolved(Resolution::Timeout) => ("New numbers coming up", Color::LightRed),
    };
    render_status_bar(
        frame,
        area,
        status,
        color,
        &[
            ("[1-6]", "Number"),
            ("[+-*/]", "Op"),
            ("[Enter]", "Submit"),
            ("[C]", "Clear"),
            ("[N]", "New"),
            ("[?]", "Help"),
            ("[Esc]", "Quit"),
        ],
    );
}

fn render_info_panel(frame: &mut Frame, area: Rect, snap: &GameSnapshot) {
    let block = Block::default()
        .title(" Leaderboard ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let name_width = (inner.width as usize).saturating_sub(14).max(4);
    let mut lines: Vec<Line> = snap
        .standings
        .iter()
        .map(|row| {
            let style = if row.is_player {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let name: String = row.name.chars().take(name_width).collect();
            Line::from(vec![
                Span::styled(
                    format!("{}. ", row.rank),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(format!("{:<width$}", name, width = name_width), style),
                Span::styled(format!("{:>7}", format_score(row.score)), style),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Solved: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{}/{}", snap.rounds_solved, snap.rounds_played),
            Style::default().fg(Color::White),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Best streak: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            snap.best_streak.to_string(),
            Style::default().fg(Color::White),
        ),
    ]));
    if snap.score > 0 {
        lines.push(Line::from(vec![
            Span::styled("Rank: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("#{}", snap.player_rank),
                Style::default().fg(Color::Green),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the key reference over the round screen.
pub fn render_help(frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let text = Style::default().fg(Color::DarkGray);
    let row = |k: &'static str, t: &'static str| {
        Line::from(vec![Span::styled(k, key), Span::styled(t, text)])
    };
    let lines = vec![
        Line::from(Span::styled(
            "How to play",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Hit the target using the cards.", text)),
        Line::from(Span::styled("Evaluated left to right:", text)),
        Line::from(Span::styled("2 + 3 * 4 = 20", key)),
        Line::from(""),
        row("1-6    ", " pick a card"),
        row("+ - * /", " pick an operator"),
        row("Enter  ", " submit"),
        row("C      ", " clear equation"),
        row("N      ", " deal new numbers"),
        row("Esc    ", " quit"),
        Line::from(""),
        Line::from(Span::styled("[Any key to close]", text)),
    ];
    render_overlay(frame, area, lines, 36, Color::Cyan);
}
