use super::card::Card;
use crate::EXPOSED_CARDS;
use rand::seq::SliceRandom;

/// The undrawn pile plus the face-down reserve card.
///
/// The top of the pile is the end of the vector; draws pop from there.
/// One card is always set aside face-down at round start, and becomes
/// the single-use fallback draw once the pile runs out. In 2-player
/// rounds three more cards are exposed face-up before dealing.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    pile: Vec<Card>,
    reserve: Option<Card>,
    empty: bool,
}

impl Deck {
    /// A full 16-card deck in fixed catalog definition order, unshuffled.
    pub fn build() -> Self {
        let mut pile = Vec::with_capacity(crate::DECK_SIZE);
        for card in Card::ALL.iter().rev() {
            for _ in 0..card.copies() {
                pile.push(*card);
            }
        }
        Self {
            pile,
            reserve: None,
            empty: false,
        }
    }

    pub fn shuffle(&mut self) {
        self.pile.shuffle(&mut rand::rng());
    }

    /// Set one card aside face-down. Once per round, after shuffling,
    /// before anything is exposed or dealt.
    pub fn set_aside_reserve(&mut self) {
        assert!(self.reserve.is_none(), "reserve already set this round");
        self.reserve = Some(self.pile.pop().expect("fresh pile"));
    }

    /// 2-player rounds only: expose three cards face-up. The caller
    /// records them in the public discard.
    pub fn set_aside_exposed(&mut self) -> [Card; EXPOSED_CARDS] {
        let mut exposed = [Card::Guard; EXPOSED_CARDS];
        for slot in exposed.iter_mut() {
            *slot = self.pile.pop().expect("fresh pile");
        }
        exposed
    }

    /// Take the top card, falling back to the reserve once the pile is
    /// gone. Drawing with both exhausted is a broken turn loop: the
    /// round-end check must run before every turn.
    pub fn draw(&mut self) -> Card {
        if self.empty {
            self.reserve.take().expect("reserve gone: round should have ended")
        } else {
            let card = self.pile.pop().expect("non-empty pile");
            if self.pile.is_empty() {
                self.empty = true;
            }
            card
        }
    }

    /// True exactly when the draw pile is exhausted. The reserve may
    /// still be available as a fallback; the round winds down either way.
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Nothing left to draw at all, reserve included.
    pub fn is_exhausted(&self) -> bool {
        self.empty && self.reserve.is_none()
    }

    pub fn remaining(&self) -> usize {
        self.pile.len() + self.reserve.map_or(0, |_| 1)
    }
}
