use crate::Position;
use crate::cards::Card;
use colored::Colorize;

/// One participant's standing at the table.
///
/// Hands obey a strict size invariant: exactly one card between turns,
/// exactly two from the second-card deal until the play resolves. The
/// resolver removes the played card first, so every effect operates on
/// "the one card not yet played".
#[derive(Debug, Clone)]
pub struct Seat {
    name: String,
    hand: Vec<Card>,
    points: u8,
    position: Position,
    active: bool,
    in_round: bool,
    shielded: bool,
    departed: bool,
    seed: i64,
}

impl Seat {
    pub fn new(name: String, position: Position, seed: i64) -> Self {
        Self {
            name,
            hand: Vec::with_capacity(2),
            points: 0,
            position,
            active: false,
            in_round: true,
            shielded: false,
            departed: false,
            seed,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn position(&self) -> Position {
        self.position
    }
    pub fn seed(&self) -> i64 {
        self.seed
    }
    pub fn points(&self) -> u8 {
        self.points
    }
    pub fn score_point(&mut self) {
        self.points += 1;
    }
    pub fn reset_points(&mut self) {
        self.points = 0;
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }
    pub fn holds(&self, card: Card) -> bool {
        self.hand.contains(&card)
    }
    /// The single card not yet played. Panics outside the 1-card window.
    pub fn held(&self) -> Card {
        assert!(self.hand.len() == 1, "seat holds {} cards", self.hand.len());
        self.hand[0]
    }
    pub fn gain(&mut self, card: Card) {
        assert!(self.hand.len() < 2, "hand overflow");
        self.hand.push(card);
    }
    /// Remove one copy of the named card from the hand.
    pub fn surrender(&mut self, card: Card) -> Card {
        let i = self
            .hand
            .iter()
            .position(|c| *c == card)
            .expect("card in hand");
        self.hand.remove(i)
    }
    pub fn clear_hand(&mut self) {
        self.hand.clear();
    }

    /// Countess rule: she binds the hand while King or Prince share it.
    pub fn must_play_countess(&self) -> bool {
        self.holds(Card::Countess) && (self.holds(Card::King) || self.holds(Card::Prince))
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
    pub fn activate(&mut self) {
        self.active = true;
    }
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn is_in_round(&self) -> bool {
        self.in_round
    }
    pub fn eliminate(&mut self) {
        self.in_round = false;
    }
    pub fn rejoin(&mut self) {
        self.in_round = true;
    }

    pub fn is_shielded(&self) -> bool {
        self.shielded
    }
    pub fn shield(&mut self) {
        self.shielded = true;
    }
    pub fn unshield(&mut self) {
        self.shielded = false;
    }

    pub fn has_departed(&self) -> bool {
        self.departed
    }
    /// Mark a mid-game disconnect. The seat sits out every later round.
    pub fn depart(&mut self) {
        self.departed = true;
        self.in_round = false;
        self.active = false;
        self.shielded = false;
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = if self.departed {
            "D".red()
        } else if !self.in_round {
            "X".red()
        } else if self.shielded {
            "H".cyan()
        } else if self.active {
            "A".green()
        } else {
            "_".normal()
        };
        write!(f, "{}{:<2}{:<26}{}p", status, self.position, self.name, self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countess_binds_king_and_prince() {
        let mut seat = Seat::new("Ana".into(), 0, 7);
        seat.gain(Card::Countess);
        seat.gain(Card::King);
        assert!(seat.must_play_countess());
        seat.surrender(Card::King);
        seat.gain(Card::Priest);
        assert!(!seat.must_play_countess());
    }

    #[test]
    fn surrender_removes_one_copy() {
        let mut seat = Seat::new("Bo".into(), 1, 3);
        seat.gain(Card::Guard);
        seat.gain(Card::Guard);
        seat.surrender(Card::Guard);
        assert!(seat.held() == Card::Guard);
    }

    #[test]
    fn departure_clears_round_state() {
        let mut seat = Seat::new("Cy".into(), 2, 1);
        seat.activate();
        seat.shield();
        seat.depart();
        assert!(!seat.is_active());
        assert!(!seat.is_in_round());
        assert!(!seat.is_shielded());
        assert!(seat.has_departed());
    }
}
