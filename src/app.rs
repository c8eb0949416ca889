use std::time::Instant;

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use rand::thread_rng;

use crate::board::{Board, Placement, Zone};
use crate::board_log;
use crate::card::{CardId, catalog};
use crate::detail::DetailModal;
use crate::drag::{DragController, DragState, Gesture, Source};
use crate::log::EventLog;
use crate::settings::Settings;
use crate::ui::HitMap;

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Screen {
    Board,
    Help,
    Log,
    ConfirmQuit,
}

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub board: Board,
    pub drag: DragController,
    pub detail: DetailModal,
    pub log: EventLog,
    pub settings: Settings,
    pub screen: Screen,
    pub selected_index: usize,
    pub message: String,
    pub hits: HitMap,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let mut app = App {
            board: deal(&settings),
            drag: DragController::new(settings.drag_threshold, settings.drag_delay()),
            detail: DetailModal::default(),
            log: EventLog::new(settings.log_capacity),
            settings,
            screen: Screen::Board,
            selected_index: 0,
            message: String::new(),
            hits: HitMap::default(),
        };
        board_log!(app.log, INFO, "Board set up with {} cards in hand", app.board.hand().len());
        app
    }

    pub fn new_board(&mut self) {
        self.board = deal(&self.settings);
        self.drag.cancel();
        self.detail.close();
        self.selected_index = 0;
        self.message = "New board dealt".to_string();
        board_log!(self.log, INFO, "New board with {} cards in hand", self.board.hand().len());
    }

    pub fn place(&mut self, card: CardId, zone: Zone) {
        let name = match self.board.find(card) {
            Some((_, c)) => c.display(),
            None => return,
        };

        match self.board.place(card, zone) {
            Placement::Placed(zone) => {
                self.message = format!("{} moved to {}", name, zone.label());
                board_log!(self.log, INFO, "Placed {} in {} zone", name, zone.label());
            }
            Placement::RejectedNotTrap => {
                self.message = "Only trap cards can be set in the trap zone".to_string();
                board_log!(self.log, WARN, "Refused {} in trap zone", name);
            }
            Placement::NotInHand | Placement::StaysInHand => {
                board_log!(self.log, DEBUG, "Ignored drop of {} on {}", name, zone.label());
            }
        }

        let hand_len = self.board.hand().len();
        if self.selected_index >= hand_len && hand_len > 0 {
            self.selected_index = hand_len - 1;
        }
    }

    pub fn open_detail(&mut self, card: CardId) {
        if let Some((_, c)) = self.board.find(card) {
            board_log!(self.log, DEBUG, "Opened detail for {}", c.display());
            self.detail.open(c.clone());
        }
    }

    pub fn close_detail(&mut self) {
        self.detail.close();
    }

    pub fn selected_card(&self) -> Option<CardId> {
        self.board.hand().get(self.selected_index).map(|c| c.id)
    }

    /// Overlays own the pointer, so any gesture in progress is dropped.
    fn show(&mut self, screen: Screen) {
        self.drag.cancel();
        self.screen = screen;
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Flow {
        if self.detail.is_visible() {
            if matches!(
                code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('q')
            ) {
                self.close_detail();
            }
            return Flow::Continue;
        }

        match self.screen {
            Screen::Board => match code {
                KeyCode::Char('q') => self.show(Screen::ConfirmQuit),
                KeyCode::Char('?') => self.show(Screen::Help),
                KeyCode::Char('l') => self.show(Screen::Log),
                KeyCode::Char('n') => self.new_board(),
                KeyCode::Tab | KeyCode::Right => {
                    let len = self.board.hand().len();
                    if len > 0 {
                        self.selected_index = (self.selected_index + 1) % len;
                    }
                }
                KeyCode::BackTab | KeyCode::Left => {
                    let len = self.board.hand().len();
                    if len > 0 {
                        self.selected_index = if self.selected_index == 0 {
                            len - 1
                        } else {
                            self.selected_index - 1
                        };
                    }
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if let Some(card) = self.selected_card() {
                        self.open_detail(card);
                    }
                }
                KeyCode::Char(c @ ('a' | 'd' | 't')) => {
                    let zone = match c {
                        'a' => Zone::Attack,
                        'd' => Zone::Defense,
                        _ => Zone::Trap,
                    };
                    if let Some(card) = self.selected_card() {
                        self.place(card, zone);
                    }
                }
                _ => {}
            },
            Screen::Help | Screen::Log => {
                self.screen = Screen::Board;
            }
            Screen::ConfirmQuit => match code {
                KeyCode::Char('y') | KeyCode::Char('Y') => return Flow::Quit,
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.screen = Screen::Board;
                }
                _ => {}
            },
        }
        Flow::Continue
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let pos = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.detail.is_visible() {
                    self.close_detail();
                    return;
                }
                if self.screen != Screen::Board {
                    return;
                }
                if let Some(hit) = self.hits.card_at(pos) {
                    if hit.source == Source::Hand {
                        if let Some(i) = self.board.hand().iter().position(|c| c.id == hit.card) {
                            self.selected_index = i;
                        }
                    }
                    self.drag.press(hit.card, hit.source, pos, now);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                self.drag.motion(pos, now);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.screen != Screen::Board {
                    self.drag.cancel();
                    return;
                }
                let zone = self.hits.zone_at(pos);
                match self.drag.release(pos, zone, now) {
                    Gesture::Tap { card } => self.open_detail(card),
                    Gesture::Drop { card, zone: Some(zone) } => self.place(card, zone),
                    Gesture::Drop { card, zone: None } => {
                        board_log!(self.log, DEBUG, "Card {} dropped outside the zones", card);
                    }
                    Gesture::None => {}
                }
            }
            _ => {}
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.drag.tick(now);
    }

    pub fn focus_lost(&mut self) {
        if self.drag.state() != DragState::Idle {
            board_log!(self.log, DEBUG, "Pointer gesture cancelled");
        }
        self.drag.cancel();
    }
}

fn deal(settings: &Settings) -> Board {
    if settings.shuffle_hand {
        Board::shuffled(catalog(), &mut thread_rng())
    } else {
        Board::new(catalog())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::Level;
    use crate::ui::ui;
    use crossterm::event::KeyModifiers;
    use ratatui::{Terminal, backend::TestBackend, layout::Rect};
    use std::time::Duration;

    fn app() -> App {
        App::new(Settings::default())
    }

    fn render(app: &mut App) {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let mut hits = HitMap::default();
        terminal.draw(|f| hits = ui(f, app)).unwrap();
        app.hits = hits;
    }

    fn center(area: Rect) -> (u16, u16) {
        (area.x + area.width / 2, area.y + area.height / 2)
    }

    fn mouse(kind: MouseEventKind, (column, row): (u16, u16)) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn hand_card_pos(app: &App, id: CardId) -> (u16, u16) {
        let hit = app
            .hits
            .cards
            .iter()
            .find(|h| h.card == id && h.source == Source::Hand)
            .unwrap();
        center(hit.area)
    }

    fn zone_pos(app: &App, zone: Zone) -> (u16, u16) {
        let (area, _) = app.hits.zones.iter().find(|(_, z)| *z == zone).unwrap();
        center(*area)
    }

    fn drag_to(app: &mut App, id: CardId, zone: Zone) {
        let t0 = Instant::now();
        let from = hand_card_pos(app, id);
        let to = zone_pos(app, zone);
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), from), t0);
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), to), t0 + Duration::from_millis(20));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), to), t0 + Duration::from_millis(40));
    }

    #[test]
    fn dragging_a_card_onto_attack_places_it() {
        let mut app = app();
        render(&mut app);
        drag_to(&mut app, 2, Zone::Attack);

        assert_eq!(app.board.find(2).map(|(z, _)| z), Some(Zone::Attack));
        assert!(!app.detail.is_visible());
        assert_eq!(app.board.hand().len(), catalog().len() - 1);
    }

    #[test]
    fn dragging_a_creature_onto_trap_is_refused() {
        let mut app = app();
        render(&mut app);
        drag_to(&mut app, 1, Zone::Trap);

        assert_eq!(app.board.find(1).map(|(z, _)| z), Some(Zone::Hand));
        assert!(app.board.cards(Zone::Trap).is_empty());
        assert_eq!(app.message, "Only trap cards can be set in the trap zone");
        assert!(app.log.entries().any(|e| e.level == Level::Warn));
    }

    #[test]
    fn dragging_the_trap_card_onto_trap_places_it() {
        let mut app = app();
        render(&mut app);
        drag_to(&mut app, 8, Zone::Trap);
        assert_eq!(app.board.cards(Zone::Trap).iter().map(|c| c.id).collect::<Vec<_>>(), vec![8]);
    }

    #[test]
    fn tap_opens_detail_and_click_closes_it() {
        let mut app = app();
        render(&mut app);
        let t0 = Instant::now();
        let pos = hand_card_pos(&app, 3);
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), pos), t0);
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), pos), t0 + Duration::from_millis(30));

        assert!(app.detail.is_visible());
        assert_eq!(app.detail.selected().map(|c| c.id), Some(3));
        assert_eq!(app.board.find(3).map(|(z, _)| z), Some(Zone::Hand));

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), (0, 0)), t0 + Duration::from_secs(1));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), (0, 0)), t0 + Duration::from_secs(1));
        assert!(!app.detail.is_visible());
        assert!(app.detail.selected().is_none());
    }

    #[test]
    fn placed_card_opens_detail_on_click() {
        let mut app = app();
        render(&mut app);
        drag_to(&mut app, 6, Zone::Defense);
        render(&mut app);

        let hit = app.hits.cards.iter().find(|h| h.card == 6).unwrap();
        assert_eq!(hit.source, Source::Zone);
        let pos = center(hit.area);
        let t0 = Instant::now();
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), pos), t0);
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), pos), t0 + Duration::from_secs(1));
        assert_eq!(app.detail.selected().map(|c| c.id), Some(6));
    }

    #[test]
    fn drop_outside_zones_keeps_card_in_hand() {
        let mut app = app();
        render(&mut app);
        let t0 = Instant::now();
        let from = hand_card_pos(&app, 4);
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), from), t0);
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), (0, 0)), t0);
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), (0, 0)), t0);
        assert_eq!(app.board.find(4).map(|(z, _)| z), Some(Zone::Hand));
        assert!(!app.detail.is_visible());
    }

    #[test]
    fn keyboard_placement_uses_the_same_rule() {
        let mut app = app();
        assert_eq!(app.selected_card(), Some(1));
        app.handle_key(KeyCode::Char('t'));
        assert_eq!(app.board.find(1).map(|(z, _)| z), Some(Zone::Hand));

        app.handle_key(KeyCode::Char('a'));
        assert_eq!(app.board.find(1).map(|(z, _)| z), Some(Zone::Attack));
        assert_eq!(app.selected_card(), Some(2));

        app.handle_key(KeyCode::Left);
        assert_eq!(app.selected_card(), Some(9));
        app.handle_key(KeyCode::Char('d'));
        assert_eq!(app.board.find(9).map(|(z, _)| z), Some(Zone::Defense));
        assert_eq!(app.selected_card(), Some(8));
    }

    #[test]
    fn enter_opens_detail_and_escape_closes_it() {
        let mut app = app();
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.detail.selected().map(|c| c.id), Some(2));
        // Board keys are inert while the modal is up.
        app.handle_key(KeyCode::Char('a'));
        assert_eq!(app.board.find(2).map(|(z, _)| z), Some(Zone::Hand));
        app.handle_key(KeyCode::Esc);
        assert!(!app.detail.is_visible());
    }

    #[test]
    fn quit_needs_confirmation() {
        let mut app = app();
        assert_eq!(app.handle_key(KeyCode::Char('q')), Flow::Continue);
        assert_eq!(app.screen, Screen::ConfirmQuit);
        assert_eq!(app.handle_key(KeyCode::Char('n')), Flow::Continue);
        assert_eq!(app.screen, Screen::Board);
        app.handle_key(KeyCode::Char('q'));
        assert_eq!(app.handle_key(KeyCode::Char('y')), Flow::Quit);
    }

    #[test]
    fn new_board_restores_the_full_hand() {
        let mut app = app();
        app.handle_key(KeyCode::Char('a'));
        app.handle_key(KeyCode::Char('d'));
        app.handle_key(KeyCode::Char('n'));
        assert_eq!(app.board.hand().len(), catalog().len());
        assert!(app.board.cards(Zone::Attack).is_empty());
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn opening_an_overlay_mid_gesture_drops_the_gesture() {
        let mut app = app();
        render(&mut app);
        let t0 = Instant::now();
        let from = hand_card_pos(&app, 2);
        let to = zone_pos(&app, Zone::Attack);

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), from), t0);
        app.handle_key(KeyCode::Char('?'));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), from), t0);
        assert_eq!(app.screen, Screen::Help);
        assert!(!app.detail.is_visible());

        app.handle_key(KeyCode::Esc);
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), from), t0);
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), to), t0);
        app.handle_key(KeyCode::Char('l'));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), to), t0);
        assert_eq!(app.board.find(2).map(|(z, _)| z), Some(Zone::Hand));
        assert!(app.board.cards(Zone::Attack).is_empty());
    }

    #[test]
    fn focus_lost_cancels_a_drag() {
        let mut app = app();
        render(&mut app);
        let t0 = Instant::now();
        let from = hand_card_pos(&app, 5);
        let to = zone_pos(&app, Zone::Attack);
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), from), t0);
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), to), t0);
        assert!(app.drag.dragging().is_some());
        app.focus_lost();
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), to), t0);
        assert_eq!(app.board.find(5).map(|(z, _)| z), Some(Zone::Hand));
    }
}
