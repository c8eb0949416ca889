use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, CardId};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Zone {
    Hand,
    Attack,
    Defense,
    Trap,
}

impl Zone {
    pub fn label(&self) -> &str {
        match self {
            Zone::Hand => "Hand",
            Zone::Attack => "Attack",
            Zone::Defense => "Defense",
            Zone::Trap => "Trap",
        }
    }

    pub fn icon(&self) -> &str {
        match self {
            Zone::Hand => "✊",
            Zone::Attack => "🗡",
            Zone::Defense => "🛡",
            Zone::Trap => "🎭",
        }
    }
}

/// What happened to a placement attempt. Anything but `Placed` leaves the
/// board untouched.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Placement {
    Placed(Zone),
    RejectedNotTrap,
    NotInHand,
    /// The target was the hand itself.
    StaysInHand,
}

#[derive(Clone, Debug, Default)]
pub struct Board {
    hand: Vec<Card>,
    attack: Vec<Card>,
    defense: Vec<Card>,
    trap: Vec<Card>,
}

impl Board {
    pub fn new(hand: Vec<Card>) -> Self {
        Board {
            hand,
            ..Board::default()
        }
    }

    pub fn shuffled<R: Rng + ?Sized>(mut hand: Vec<Card>, rng: &mut R) -> Self {
        hand.shuffle(rng);
        Board::new(hand)
    }

    pub fn cards(&self, zone: Zone) -> &[Card] {
        match zone {
            Zone::Hand => &self.hand,
            Zone::Attack => &self.attack,
            Zone::Defense => &self.defense,
            Zone::Trap => &self.trap,
        }
    }

    fn cards_mut(&mut self, zone: Zone) -> &mut Vec<Card> {
        match zone {
            Zone::Hand => &mut self.hand,
            Zone::Attack => &mut self.attack,
            Zone::Defense => &mut self.defense,
            Zone::Trap => &mut self.trap,
        }
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn find(&self, id: CardId) -> Option<(Zone, &Card)> {
        [Zone::Hand, Zone::Attack, Zone::Defense, Zone::Trap]
            .into_iter()
            .find_map(|zone| self.cards(zone).iter().find(|c| c.id == id).map(|c| (zone, c)))
    }

    /// Moves a card from the hand to the end of `target`.
    ///
    /// Only hand cards move, and only trap cards may enter the trap zone.
    /// Anything else is a no-op reported through the returned outcome.
    pub fn place(&mut self, id: CardId, target: Zone) -> Placement {
        let Some(index) = self.hand.iter().position(|c| c.id == id) else {
            return Placement::NotInHand;
        };
        if target == Zone::Hand {
            return Placement::StaysInHand;
        }
        if target == Zone::Trap && !self.hand[index].is_trap() {
            return Placement::RejectedNotTrap;
        }

        let card = self.hand.remove(index);
        self.cards_mut(target).push(card);
        Placement::Placed(target)
    }
}
