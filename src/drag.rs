use std::time::{Duration, Instant};

use crate::board::Zone;
use crate::card::CardId;

/// Where a pressed card lives. Only hand cards can be dragged.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Source {
    Hand,
    Zone,
}

/// Terminal cell position, `(column, row)`.
pub type Pos = (u16, u16);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DragState {
    Idle,
    PressPending {
        card: CardId,
        source: Source,
        origin: Pos,
        pressed_at: Instant,
    },
    Dragging {
        card: CardId,
        cursor: Pos,
    },
}

/// Result of a pointer release.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Gesture {
    None,
    Tap { card: CardId },
    Drop { card: CardId, zone: Option<Zone> },
}

#[derive(Debug)]
pub struct DragController {
    state: DragState,
    threshold: u16,
    delay: Duration,
}

impl DragController {
    pub fn new(threshold: u16, delay: Duration) -> Self {
        DragController {
            state: DragState::Idle,
            threshold: threshold.max(1),
            delay,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn dragging(&self) -> Option<(CardId, Pos)> {
        match self.state {
            DragState::Dragging { card, cursor } => Some((card, cursor)),
            _ => None,
        }
    }

    pub fn press(&mut self, card: CardId, source: Source, pos: Pos, now: Instant) {
        self.state = DragState::PressPending {
            card,
            source,
            origin: pos,
            pressed_at: now,
        };
    }

    pub fn motion(&mut self, pos: Pos, now: Instant) {
        match self.state {
            DragState::PressPending {
                card,
                source: Source::Hand,
                origin,
                pressed_at,
            } => {
                if distance(origin, pos) >= self.threshold || self.held(pressed_at, now) {
                    self.state = DragState::Dragging { card, cursor: pos };
                }
            }
            DragState::Dragging { card, .. } => {
                self.state = DragState::Dragging { card, cursor: pos };
            }
            _ => {}
        }
    }

    /// Promotes a held hand press to a drag once the delay has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if let DragState::PressPending {
            card,
            source: Source::Hand,
            origin,
            pressed_at,
        } = self.state
        {
            if self.held(pressed_at, now) {
                self.state = DragState::Dragging { card, cursor: origin };
            }
        }
    }

    pub fn release(&mut self, pos: Pos, zone: Option<Zone>, now: Instant) -> Gesture {
        self.motion(pos, now);
        let gesture = match self.state {
            DragState::Idle => Gesture::None,
            DragState::PressPending { card, .. } => Gesture::Tap { card },
            DragState::Dragging { card, .. } => Gesture::Drop { card, zone },
        };
        self.state = DragState::Idle;
        gesture
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    fn held(&self, pressed_at: Instant, now: Instant) -> bool {
        now.saturating_duration_since(pressed_at) >= self.delay
    }
}

fn distance(a: Pos, b: Pos) -> u16 {
    a.0.abs_diff(b.0).max(a.1.abs_diff(b.1))
}
