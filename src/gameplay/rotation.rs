use super::seat::Seat;
use crate::Position;

/// Turn scheduler: tracks the active position and rotates it clockwise,
/// skipping eliminated seats without consuming a turn. The controller
/// decides when rotation stops mattering (one survivor, empty deck);
/// this type only ever answers "who is next".
#[derive(Debug, Clone, Copy, Default)]
pub struct Rotation {
    ticker: Position,
}

impl Rotation {
    pub fn current(&self) -> Position {
        self.ticker
    }

    pub fn start_at(&mut self, position: Position) {
        self.ticker = position;
    }

    /// Advance to the next in-round seat after the current one.
    /// Returns None when no seat at all remains in the round.
    pub fn advance(&mut self, seats: &[Seat]) -> Option<Position> {
        let n = seats.len();
        assert!(n > 0);
        for step in 1..=n {
            let i = (self.ticker + step) % n;
            if seats[i].is_in_round() {
                self.ticker = i;
                return Some(i);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats(in_round: &[bool]) -> Vec<Seat> {
        in_round
            .iter()
            .enumerate()
            .map(|(i, ok)| {
                let mut seat = Seat::new(format!("P{}", i), i, i as i64);
                if !ok {
                    seat.eliminate();
                }
                seat
            })
            .collect()
    }

    #[test]
    fn skips_eliminated_seats() {
        // A(in) B(out) C(in), active at A: next must be C
        let seats = seats(&[true, false, true]);
        let mut rotation = Rotation::default();
        rotation.start_at(0);
        assert!(rotation.advance(&seats) == Some(2));
    }

    #[test]
    fn wraps_around_the_table() {
        let seats = seats(&[true, false, false, true]);
        let mut rotation = Rotation::default();
        rotation.start_at(3);
        assert!(rotation.advance(&seats) == Some(0));
        assert!(rotation.advance(&seats) == Some(3));
    }

    #[test]
    fn sole_survivor_keeps_the_seat() {
        let seats = seats(&[false, true, false]);
        let mut rotation = Rotation::default();
        rotation.start_at(1);
        assert!(rotation.advance(&seats) == Some(1));
    }

    #[test]
    fn nobody_left_yields_none() {
        let seats = seats(&[false, false]);
        let mut rotation = Rotation::default();
        assert!(rotation.advance(&seats) == None);
    }
}
