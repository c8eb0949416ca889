use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{App, Screen};
use crate::board::Zone;
use crate::card::{Card, CardId};
use crate::drag::{Pos, Source};
use crate::log::Level;

const HAND_CARD_HEIGHT: u16 = 5;
const ZONE_CARD_HEIGHT: u16 = 4;
const GHOST_WIDTH: u16 = 16;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CardHit {
    pub area: Rect,
    pub card: CardId,
    pub source: Source,
}

/// Screen regions from the last frame, used to resolve pointer positions.
#[derive(Clone, Debug, Default)]
pub struct HitMap {
    pub zones: Vec<(Rect, Zone)>,
    pub cards: Vec<CardHit>,
}

impl HitMap {
    pub fn zone_at(&self, pos: Pos) -> Option<Zone> {
        self.zones
            .iter()
            .find(|(area, _)| contains(*area, pos))
            .map(|(_, zone)| *zone)
    }

    pub fn card_at(&self, pos: Pos) -> Option<CardHit> {
        self.cards.iter().rev().find(|hit| contains(hit.area, pos)).copied()
    }
}

fn contains(area: Rect, (x, y): Pos) -> bool {
    x >= area.x && x < area.right() && y >= area.y && y < area.bottom()
}

pub fn ui(f: &mut Frame, app: &App) -> HitMap {
    let size = f.area();
    let mut hits = HitMap::default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(6), // Opponent
            Constraint::Length(1), // VS
            Constraint::Min(8),    // Player zones
            Constraint::Length(HAND_CARD_HEIGHT + 2),
            Constraint::Length(1), // Controls
            Constraint::Length(1), // Message
        ])
        .split(size);

    let title = Paragraph::new("⚔ DUELBOARD ⚔")
        .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(title, chunks[0]);

    render_opponent(f, app, chunks[1]);

    let divider = Paragraph::new("VS")
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(divider, chunks[2]);

    // Hover highlight follows the dragged card.
    let hovered = app
        .drag
        .dragging()
        .and_then(|(_, cursor)| app.hits.zone_at(cursor));
    let dragged = app.drag.dragging().map(|(card, _)| card);

    let zone_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(chunks[3]);
    for (area, zone) in zone_chunks
        .iter()
        .zip([Zone::Defense, Zone::Attack, Zone::Trap])
    {
        render_zone(f, app, *area, zone, hovered == Some(zone), &mut hits);
    }

    render_hand(f, app, chunks[4], hovered == Some(Zone::Hand), dragged, &mut hits);

    let controls_text = "Drag: place │ Click: details │ Tab/Arrows: select │ A/D/T: place │ Enter: details │ L: log │ ?: help │ Q: quit";
    let controls = Paragraph::new(controls_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(controls, chunks[5]);

    let msg = Paragraph::new(app.message.as_str())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    f.render_widget(msg, chunks[6]);

    if let Some((card, cursor)) = app.drag.dragging() {
        if let Some((_, card)) = app.board.find(card) {
            render_ghost(f, card, cursor);
        }
    }

    match app.screen {
        Screen::Help => render_help_modal(f),
        Screen::Log => render_log_modal(f, app),
        Screen::ConfirmQuit => render_quit_modal(f),
        Screen::Board => {}
    }
    if let Some(card) = app.detail.selected().filter(|_| app.detail.is_visible()) {
        render_detail_modal(f, card);
    }

    hits
}

fn counters(app: &App) -> String {
    format!(
        "❤ {}  📦 {}",
        app.settings.life_points, app.settings.deck_size
    )
}

fn render_opponent(f: &mut Frame, app: &App, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let hand = Block::default()
        .title(format!(" ✊ {} ", counters(app)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = hand.inner(parts[0]);
    f.render_widget(hand, parts[0]);
    // The opponent holds a single face-down card.
    if let Some(slot) = thumb_slots(inner, 1, 6, 8, ZONE_CARD_HEIGHT).first() {
        let back = Paragraph::new("▒▒▒▒\n▒▒▒▒")
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
        f.render_widget(back, *slot);
    }

    for (part, zone) in parts[1..].iter().zip([Zone::Trap, Zone::Attack, Zone::Defense]) {
        let block = Block::default()
            .title(format!(" {} {} ", zone.icon(), zone.label()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        f.render_widget(block, *part);
    }
}

fn zone_color(zone: Zone) -> Color {
    match zone {
        Zone::Hand => Color::White,
        Zone::Attack => Color::Red,
        Zone::Defense => Color::Blue,
        Zone::Trap => Color::Magenta,
    }
}

fn zone_block(title: String, color: Color, hovered: bool) -> Block<'static> {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color));
    if hovered {
        block.style(Style::default().bg(Color::LightBlue))
    } else {
        block
    }
}

fn render_zone(f: &mut Frame, app: &App, area: Rect, zone: Zone, hovered: bool, hits: &mut HitMap) {
    let cards = app.board.cards(zone);
    let slots = thumb_slots(area.inner(Margin::new(1, 1)), cards.len(), 10, 14, ZONE_CARD_HEIGHT);
    let hidden = cards.len() - slots.len();

    let mut title = format!(" {} {} ", zone.icon(), zone.label());
    if hidden > 0 {
        title.push_str(&format!("+{} ", hidden));
    }
    let block = zone_block(title, zone_color(zone), hovered);
    f.render_widget(block, area);
    hits.zones.push((area, zone));

    for (card, slot) in cards.iter().zip(slots) {
        let style = Style::default().fg(card.category.color());
        let thumb = Paragraph::new(format!(
            "{}\n{}",
            clip(&card.display(), slot.width.saturating_sub(2)),
            card.stats()
        ))
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
        f.render_widget(thumb, slot);
        hits.cards.push(CardHit {
            area: slot,
            card: card.id,
            source: Source::Zone,
        });
    }
}

fn render_hand(
    f: &mut Frame,
    app: &App,
    area: Rect,
    hovered: bool,
    dragged: Option<CardId>,
    hits: &mut HitMap,
) {
    let cards = app.board.hand();
    let slots = thumb_slots(area.inner(Margin::new(1, 1)), cards.len(), 8, 16, HAND_CARD_HEIGHT);
    let hidden = cards.len() - slots.len();

    let mut title = format!(" {} {} {} ", Zone::Hand.icon(), Zone::Hand.label(), counters(app));
    if hidden > 0 {
        title.push_str(&format!("+{} ", hidden));
    }
    f.render_widget(zone_block(title, Color::Green, hovered), area);
    hits.zones.push((area, Zone::Hand));

    for (idx, (card, slot)) in cards.iter().zip(slots).enumerate() {
        let is_selected = idx == app.selected_index;
        let (border_color, border_type) = if is_selected {
            (Color::Cyan, BorderType::Double)
        } else {
            (Color::White, BorderType::Rounded)
        };
        let style = if dragged == Some(card.id) {
            Style::default().fg(Color::DarkGray)
        } else if is_selected {
            Style::default().fg(card.category.color()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(card.category.color())
        };

        let width = slot.width.saturating_sub(2);
        let content = format!(
            "{}\n{}\n{}",
            clip(card.name, width),
            clip(card.category.label(), width),
            card.stats()
        );
        let thumb = Paragraph::new(content)
            .style(style)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(border_type)
                    .border_style(Style::default().fg(border_color)),
            );
        f.render_widget(thumb, slot);
        hits.cards.push(CardHit {
            area: slot,
            card: card.id,
            source: Source::Hand,
        });
    }
}

fn render_ghost(f: &mut Frame, card: &Card, (x, y): Pos) {
    let bounds = f.area();
    let width = GHOST_WIDTH.min(bounds.width);
    let height = 3.min(bounds.height);
    let area = Rect {
        x: x.min(bounds.right().saturating_sub(width)),
        y: y.min(bounds.bottom().saturating_sub(height)),
        width,
        height,
    };
    f.render_widget(Clear, area);
    let ghost = Paragraph::new(clip(&card.display(), width.saturating_sub(2)))
        .style(Style::default().fg(card.category.color()).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(ghost, area);
}

/// Lays out `count` thumbnails left to right, wrapping rows. Thumbnails that
/// do not fit are dropped from the end.
fn thumb_slots(inner: Rect, count: usize, min_width: u16, max_width: u16, height: u16) -> Vec<Rect> {
    if count == 0 || inner.width < min_width || inner.height < height {
        return Vec::new();
    }
    let width = (inner.width / count as u16).clamp(min_width, max_width);
    let per_row = (inner.width / width) as usize;
    let rows = (inner.height / height) as usize;

    (0..count.min(per_row * rows))
        .map(|i| Rect {
            x: inner.x + (i % per_row) as u16 * width,
            y: inner.y + (i / per_row) as u16 * height,
            width,
            height,
        })
        .collect()
}

fn clip(s: &str, width: u16) -> String {
    s.chars().take(width as usize).collect()
}

fn render_detail_modal(f: &mut Frame, card: &Card) {
    let area = centered_rect(50, 60, f.area());
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            card.name,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} {}", card.category.symbol(), card.category.label()),
            Style::default().fg(card.category.color()),
        )),
        Line::from(""),
        Line::from(format!("Elixir: {}", card.cost)),
        Line::from(Span::styled(
            format!("🖼 {}", card.image),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(format!("Attack: {}    Defense: {}", card.attack, card.defense)),
        Line::from(""),
        Line::from(card.description),
        Line::from(""),
        Line::from(Span::styled(
            "[Esc] Close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let detail = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Card Details ")
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(detail, area);
}

fn render_help_modal(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    f.render_widget(Clear, area);

    let help_text = r#"DUELBOARD

ZONES
  🗡 Attack     Any card
  🛡 Defense    Any card
  🎭 Trap       Trap cards only

Cards move from your hand into a zone and stay there.

MOUSE
  Drag a hand card onto a zone to place it
  Click a card to see its details
  Click anywhere to close the details

KEYBOARD
  Tab/Arrows    Select a hand card
  Enter/Space   Card details
  A / D / T     Place in attack / defense / trap
  N             New board
  L             View log
  ?             This help
  Q             Quit

Press any key to close"#;

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(help, area);
}

fn render_log_modal(f: &mut Frame, app: &App) {
    let area = centered_rect(70, 80, f.area());
    f.render_widget(Clear, area);

    let log_entries: Vec<Line> = app
        .log
        .entries()
        .rev()
        .take(20)
        .rev()
        .map(|e| {
            let style = match e.level {
                Level::Warn => Style::default().fg(Color::Yellow),
                Level::Debug => Style::default().fg(Color::DarkGray),
                Level::Info => Style::default(),
            };
            Line::from(Span::styled(e.line.as_str(), style))
        })
        .collect();

    let mut lines = vec![Line::from(Span::styled(
        "📜 BOARD LOG",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.push(Line::from(""));
    lines.extend(log_entries);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(Color::DarkGray),
    )));

    let log = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .title("Log")
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(log, area);
}

fn render_quit_modal(f: &mut Frame) {
    let area = centered_rect(40, 25, f.area());
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Quit?",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("The board will be lost."),
        Line::from(""),
        Line::from("[Y] Yes, quit"),
        Line::from("[N] No, keep playing"),
    ];

    let quit_modal = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Confirm ")
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(quit_modal, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
