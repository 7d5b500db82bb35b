use crate::Position;
use crate::cards::Card;

/// A fully specified card play, assembled by the room from the active
/// player's card command and any follow-up target / guess prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    pub card: Card,
    pub target: Option<Position>,
    pub guess: Option<Card>,
}

impl Play {
    pub fn simple(card: Card) -> Self {
        Self {
            card,
            target: None,
            guess: None,
        }
    }

    pub fn aimed(card: Card, target: Position) -> Self {
        Self {
            card,
            target: Some(target),
            guess: None,
        }
    }

    pub fn guessed(target: Position, guess: Card) -> Self {
        Self {
            card: Card::Guard,
            target: Some(target),
            guess: Some(guess),
        }
    }
}

impl std::fmt::Display for Play {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.card)?;
        if let Some(target) = self.target {
            write!(f, " @P{}", target)?;
        }
        if let Some(guess) = self.guess {
            write!(f, " ?{}", guess)?;
        }
        Ok(())
    }
}
