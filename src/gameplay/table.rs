use super::echo::Echo;
use super::error::TableError;
use super::play::Play;
use super::rotation::Rotation;
use super::seat::Seat;
use crate::Position;
use crate::Power;
use crate::cards::Card;
use crate::cards::Deck;

/// What the table reports after a completed turn (or a forfeit).
#[derive(Debug)]
pub enum Progress {
    /// The game goes on; the echoes open the next turn (and, at a round
    /// boundary, the next round).
    Continued(Vec<Echo>),
    /// Somebody reached the goal. The table is spent and should be dropped.
    Finished(Vec<Echo>),
}

/// Exclusive owner of all per-game mutable state: seats, deck, public
/// discard, and the rotation. Every mutation flows through one of the
/// methods below, called from the single room actor, so game state is
/// single-writer by construction.
///
/// State machine: start (round one dealt) -> resolve/forfeit + advance
/// per turn -> settle at round boundaries -> Finished at the goal.
#[derive(Debug)]
pub struct Table {
    seats: Vec<Seat>,
    deck: Deck,
    discard: Vec<Card>,
    rotation: Rotation,
    turn_count: usize,
    round_count: usize,
    goal: u8,
}

impl Table {
    /// Seat the roster, pick the first active player (smallest tiebreak
    /// seed), and deal round one. The goal scales down with the player
    /// count: 2 -> 5 points, 3 -> 4, 4 -> 3.
    pub fn start(roster: Vec<(String, i64)>) -> Result<(Self, Vec<Echo>), TableError> {
        if roster.len() < crate::MIN_PLAYERS {
            return Err(TableError::NotEnoughPlayers);
        }
        if roster.len() > crate::MAX_PLAYERS {
            return Err(TableError::TooManyPlayers);
        }
        let goal = match roster.len() {
            2 => 5,
            3 => 4,
            _ => 3,
        };
        let seats = roster
            .into_iter()
            .enumerate()
            .map(|(i, (name, seed))| Seat::new(name, i, seed))
            .collect::<Vec<Seat>>();
        let first = seats
            .iter()
            .min_by_key(|s| s.seed())
            .expect("roster checked non-empty")
            .position();
        let mut table = Self {
            seats,
            deck: Deck::default(),
            discard: Vec::new(),
            rotation: Rotation::default(),
            turn_count: 1,
            round_count: 1,
            goal,
        };
        table.rotation.start_at(first);
        let mut echoes = vec![Echo::all("Game started. Welcome to Love Letter!")];
        echoes.extend(table.begin_round());
        echoes.extend(table.begin_turn());
        log::info!("game started with {} seats, goal {}", table.seats.len(), table.goal);
        Ok((table, echoes))
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }
    pub fn seat(&self, position: Position) -> &Seat {
        &self.seats[position]
    }
    #[cfg(test)]
    pub fn seat_mut(&mut self, position: Position) -> &mut Seat {
        &mut self.seats[position]
    }
    pub fn find(&self, name: &str) -> Option<Position> {
        self.seats.iter().find(|s| s.name() == name).map(|s| s.position())
    }
    pub fn discard(&self) -> &[Card] {
        &self.discard
    }
    pub fn active_position(&self) -> Position {
        self.rotation.current()
    }
    pub fn survivors(&self) -> usize {
        self.seats.iter().filter(|s| s.is_in_round()).count()
    }
    fn name(&self, position: Position) -> String {
        self.seats[position].name().to_string()
    }

    /// Whether this seat may open a play of this card right now.
    /// Turn order, hand contents, and the Countess bind, in that order.
    pub fn vet(&self, position: Position, card: Card) -> Result<(), TableError> {
        let seat = &self.seats[position];
        if !seat.is_active() {
            return Err(TableError::NotYourTurn);
        }
        if !seat.holds(card) {
            return Err(TableError::NotInHand);
        }
        if matches!(card, Card::King | Card::Prince) && seat.must_play_countess() {
            return Err(TableError::MustPlayCountess);
        }
        Ok(())
    }

    /// Resolve a named target: the player must exist, must not be
    /// shielded by a Handmaid, and must still be in the round. Naming
    /// yourself is always allowed; it is the forced choice when every
    /// other survivor is shielded.
    pub fn vet_target(&self, actor: Position, name: &str) -> Result<Position, TableError> {
        let target = self.find(name).ok_or(TableError::UnknownTarget)?;
        let seat = &self.seats[target];
        if target != actor && seat.is_shielded() {
            return Err(TableError::TargetShielded);
        }
        if !seat.is_in_round() {
            return Err(TableError::TargetEliminated);
        }
        Ok(target)
    }

    /// Resolve a fully specified play. The envelope is fixed: validate
    /// everything, remove the played card from the hand (before any swap,
    /// so a traded-away card cannot be re-discarded), apply the effect,
    /// discard the card publicly, and end the actor's turn.
    pub fn resolve(&mut self, position: Position, play: Play) -> Result<Vec<Echo>, TableError> {
        self.vet(position, play.card)?;
        let target = match play.target {
            Some(t) => {
                let seat = self.seats.get(t).ok_or(TableError::UnknownTarget)?;
                if t != position && seat.is_shielded() {
                    return Err(TableError::TargetShielded);
                }
                if !seat.is_in_round() {
                    return Err(TableError::TargetEliminated);
                }
                Some(t)
            }
            None if play.card.targets() => return Err(TableError::UnknownTarget),
            None => None,
        };
        if play.card == Card::Guard {
            match play.guess {
                Some(Card::Guard) | None => return Err(TableError::GuessedGuard),
                Some(_) => {}
            }
        }

        let mut echoes = Vec::new();
        self.seats[position].surrender(play.card);
        match play.card {
            Card::Guard => self.guard(position, target.expect("vetted"), play.guess.expect("vetted"), &mut echoes),
            Card::Priest => self.priest(position, target.expect("vetted"), &mut echoes),
            Card::Baron => self.baron(position, target.expect("vetted"), &mut echoes),
            Card::Handmaid => self.handmaid(position, &mut echoes),
            Card::Prince => self.prince(position, target.expect("vetted"), &mut echoes),
            Card::King => self.king(position, target.expect("vetted"), &mut echoes),
            Card::Countess => self.countess(position, &mut echoes),
            Card::Princess => self.princess(position, &mut echoes),
        }
        self.discard.push(play.card);
        self.seats[position].deactivate();
        self.turn_count += 1;
        log::debug!("resolved {} by P{}\n{}", play, position, self);
        Ok(echoes)
    }

    fn guard(&mut self, actor: Position, target: Position, guess: Card, echoes: &mut Vec<Echo>) {
        if target == actor {
            echoes.push(Echo::all_except(
                actor,
                format!("{} played the Guard, but there was no target.", self.name(actor)),
            ));
        } else if self.seats[target].held() == guess {
            self.seats[target].eliminate();
            echoes.push(Echo::one(
                actor,
                format!("You guessed right! Sorry {}!", self.name(target)),
            ));
            echoes.push(Echo::all_except(
                actor,
                format!(
                    "{} played the Guard targeting {} and guessed right. Sorry {}!",
                    self.name(actor),
                    self.name(target),
                    self.name(target)
                ),
            ));
        } else {
            echoes.push(Echo::one(actor, "That was wrong."));
            echoes.push(Echo::all_except(
                actor,
                format!(
                    "{} played the Guard targeting {} and guessed wrong. Lucky you, {}!",
                    self.name(actor),
                    self.name(target),
                    self.name(target)
                ),
            ));
        }
    }

    fn priest(&mut self, actor: Position, target: Position, echoes: &mut Vec<Echo>) {
        echoes.push(Echo::all_except(
            actor,
            format!("{} played the Priest. Somebody's nosy.", self.name(actor)),
        ));
        if target != actor {
            echoes.push(Echo::one(
                actor,
                format!("{}'s card is: {}", self.name(target), self.seats[target].held()),
            ));
        }
    }

    fn baron(&mut self, actor: Position, target: Position, echoes: &mut Vec<Echo>) {
        if target == actor {
            echoes.push(Echo::all_except(
                actor,
                format!("{} played the Baron, but there was no target.", self.name(actor)),
            ));
            return;
        }
        let mine = self.seats[actor].held();
        let theirs = self.seats[target].held();
        if mine < theirs {
            self.seats[actor].eliminate();
            echoes.push(Echo::one(
                actor,
                format!("{} has the higher value card. You're out of the round :(", self.name(target)),
            ));
            echoes.push(Echo::all_except(
                actor,
                format!(
                    "{} played the Baron, but chose the wrong target and is kicked out of the round.",
                    self.name(actor)
                ),
            ));
        } else if mine > theirs {
            self.seats[target].eliminate();
            echoes.push(Echo::one(
                target,
                format!("{} has the higher value card. You're out of the round :(", self.name(actor)),
            ));
            echoes.push(Echo::all_except(
                target,
                format!(
                    "{} played the Baron and kicks {} out of the round.",
                    self.name(actor),
                    self.name(target)
                ),
            ));
        } else {
            // equal powers: no elimination either way
            echoes.push(Echo::one(actor, "Equal value cards. Nothing happens."));
            echoes.push(Echo::all_except(
                actor,
                format!("{} played the Baron. The comparison is a draw.", self.name(actor)),
            ));
        }
    }

    fn handmaid(&mut self, actor: Position, echoes: &mut Vec<Echo>) {
        self.seats[actor].shield();
        echoes.push(Echo::one(actor, "You are protected until your next turn."));
        echoes.push(Echo::all_except(
            actor,
            format!("{} played the Handmaid. Keep your hands away!", self.name(actor)),
        ));
    }

    fn prince(&mut self, actor: Position, target: Position, echoes: &mut Vec<Echo>) {
        if target == actor {
            echoes.push(Echo::all_except(
                actor,
                format!("{} played the Prince on themself.", self.name(actor)),
            ));
        } else {
            echoes.push(Echo::all_except(
                actor,
                format!(
                    "{} played the Prince targeting {}. Say goodbye to your card.",
                    self.name(actor),
                    self.name(target)
                ),
            ));
        }
        let discarded = self.seats[target].held();
        self.seats[target].surrender(discarded);
        self.discard.push(discarded);
        echoes.push(Echo::all(format!("{} discards the {}.", self.name(target), discarded)));
        if discarded == Card::Princess {
            // forced Princess discards count as playing her
            self.seats[target].eliminate();
            echoes.push(Echo::all(format!(
                "{} discarded the Princess and is out of the round!",
                self.name(target)
            )));
        } else if !self.deck.is_exhausted() {
            let card = self.deck.draw();
            self.seats[target].gain(card);
            echoes.push(Echo::one(target, format!("You drew the {}", card)));
        }
    }

    fn king(&mut self, actor: Position, target: Position, echoes: &mut Vec<Echo>) {
        if target == actor {
            echoes.push(Echo::all_except(
                actor,
                format!("{} played the King, but there was no target.", self.name(actor)),
            ));
            return;
        }
        echoes.push(Echo::all_except(
            actor,
            format!(
                "{} played the King and trades cards with {}.",
                self.name(actor),
                self.name(target)
            ),
        ));
        let mine = self.seats[actor].held();
        let theirs = self.seats[target].held();
        self.seats[actor].surrender(mine);
        self.seats[target].surrender(theirs);
        self.seats[actor].gain(theirs);
        self.seats[target].gain(mine);
        echoes.push(Echo::one(
            actor,
            format!("You got the {} from {}", theirs, self.name(target)),
        ));
        echoes.push(Echo::one(
            target,
            format!(
                "You and {} exchanged cards. You got the {} from {}.",
                self.name(actor),
                mine,
                self.name(actor)
            ),
        ));
    }

    fn countess(&mut self, actor: Position, echoes: &mut Vec<Echo>) {
        echoes.push(Echo::all_except(
            actor,
            format!("{} played the Countess. What could this mean?", self.name(actor)),
        ));
    }

    fn princess(&mut self, actor: Position, echoes: &mut Vec<Echo>) {
        self.seats[actor].eliminate();
        echoes.push(Echo::one(actor, "You're out of the round :("));
        echoes.push(Echo::all_except(
            actor,
            format!("{} played the Princess. Oops!", self.name(actor)),
        ));
    }

    /// Move the game along after a turn ends. Settles the round when the
    /// draw pile is gone or at most one seat survives; otherwise rotates
    /// to the next survivor and opens their turn.
    pub fn advance(&mut self) -> Progress {
        if self.survivors() <= 1 || self.deck.is_empty() {
            self.settle()
        } else {
            self.rotation.advance(&self.seats).expect("survivors remain");
            Progress::Continued(self.begin_turn())
        }
    }

    /// A seat disconnected mid-game: eliminated from the current round
    /// and every later one. Returns whether the pending turn was theirs
    /// (the room must then advance on their behalf).
    pub fn forfeit(&mut self, position: Position) -> (bool, Vec<Echo>) {
        let was_active = self.seats[position].is_active();
        self.seats[position].depart();
        let echoes = vec![Echo::all(format!(
            "{} forfeits and is out of the game.",
            self.name(position)
        ))];
        log::info!("P{} forfeited the game", position);
        (was_active, echoes)
    }

    /// Connected seats remaining; below two the game cannot continue.
    pub fn remaining_players(&self) -> usize {
        self.seats.iter().filter(|s| !s.has_departed()).count()
    }

    /// Fresh deck, fresh hands, everyone back in the round. The rotation
    /// already points at this round's starting player.
    fn begin_round(&mut self) -> Vec<Echo> {
        let mut echoes = Vec::new();
        self.discard.clear();
        self.turn_count = 1;
        self.deck = Deck::build();
        self.deck.shuffle();
        self.deck.set_aside_reserve();
        if self.seats.len() == 2 {
            for card in self.deck.set_aside_exposed() {
                self.discard.push(card);
            }
            echoes.push(Echo::all(format!(
                "Cards set aside for this round: {}, {} and {}.",
                self.discard[0], self.discard[1], self.discard[2]
            )));
        }
        for seat in self.seats.iter_mut() {
            seat.clear_hand();
            seat.unshield();
            seat.deactivate();
            if !seat.has_departed() {
                seat.rejoin();
            }
        }
        for i in 0..self.seats.len() {
            if !self.seats[i].has_departed() {
                let card = self.deck.draw();
                self.seats[i].gain(card);
                echoes.push(Echo::one(i, format!("You drew the {}", card)));
            }
        }
        echoes
    }

    /// Open the active seat's turn: stale Handmaid protection clears
    /// before the second card is dealt.
    fn begin_turn(&mut self) -> Vec<Echo> {
        let position = self.rotation.current();
        self.seats[position].unshield();
        self.seats[position].activate();
        let card = self.deck.draw();
        self.seats[position].gain(card);
        vec![
            Echo::all(format!(
                "Round {}, turn {}: {}",
                self.round_count,
                self.turn_count,
                self.name(position)
            )),
            Echo::one(
                position,
                "It's your turn! Play a card by writing '/' and the name of the card.",
            ),
            Echo::one(position, format!("You drew the {}", card)),
        ]
    }

    /// Round over: award the point, then either declare the game winner
    /// or deal the next round with the round winner starting.
    fn settle(&mut self) -> Progress {
        let mut echoes = Vec::new();
        // highest held power among survivors takes the round; the scan is
        // strictly-greater, so the earliest seat wins an unbroken tie
        let mut winner: Option<Position> = None;
        let mut best: Power = 0;
        for seat in self.seats.iter().filter(|s| s.is_in_round()) {
            if let Some(card) = seat.hand().first() {
                if card.power() > best {
                    best = card.power();
                    winner = Some(seat.position());
                }
            }
        }
        let winner = match winner {
            Some(w) => w,
            None => self
                .seats
                .iter()
                .find(|s| s.is_in_round())
                .expect("at least one survivor")
                .position(),
        };
        echoes.push(Echo::all(format!(
            "End of round {}. {} gets one point.",
            self.round_count,
            self.name(winner)
        )));
        self.seats[winner].score_point();
        for seat in self.seats.iter().filter(|s| !s.has_departed()) {
            echoes.push(Echo::one(
                seat.position(),
                format!("You have {} points.", seat.points()),
            ));
        }
        log::info!("round {} won by P{}", self.round_count, winner);
        if self.seats[winner].points() == self.goal {
            echoes.push(Echo::all(format!(
                "The game is over. The winner is: {}",
                self.name(winner)
            )));
            self.reset();
            Progress::Finished(echoes)
        } else {
            self.round_count += 1;
            self.rotation.start_at(winner);
            echoes.extend(self.begin_round());
            echoes.extend(self.begin_turn());
            Progress::Continued(echoes)
        }
    }

    /// Scrub all per-game state once a winner is declared.
    fn reset(&mut self) {
        for seat in self.seats.iter_mut() {
            seat.deactivate();
            seat.clear_hand();
            seat.unshield();
            seat.reset_points();
        }
        self.discard.clear();
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use colored::Colorize;
        writeln!(
            f,
            "{}",
            format!(
                "round {} turn {} deck {} discard {}",
                self.round_count,
                self.turn_count,
                self.deck.remaining(),
                self.discard.len()
            )
            .bright_green()
        )?;
        for seat in self.seats.iter() {
            writeln!(f, "{}", seat)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster3() -> Vec<(String, i64)> {
        vec![
            ("Ana".to_string(), 30),
            ("Bo".to_string(), 10),
            ("Cy".to_string(), 20),
        ]
    }

    fn table3() -> Table {
        Table::start(roster3()).unwrap().0
    }

    /// Overwrite the active seat's dealt hand with exactly these cards.
    fn rig(table: &mut Table, position: Position, cards: &[Card]) {
        table.seats[position].clear_hand();
        for card in cards {
            table.seats[position].gain(*card);
        }
    }

    fn conserved(table: &Table) -> usize {
        table.deck.remaining()
            + table.discard.len()
            + table.seats.iter().map(|s| s.hand().len()).sum::<usize>()
    }

    #[test]
    fn start_rejects_bad_counts() {
        assert!(Table::start(vec![("Solo".into(), 1)]).is_err());
        let five = (0..5).map(|i| (format!("P{}", i), i as i64)).collect();
        assert!(matches!(Table::start(five), Err(TableError::TooManyPlayers)));
    }

    #[test]
    fn goal_scales_with_player_count() {
        let two = vec![("A".into(), 1), ("B".into(), 2)];
        assert!(Table::start(two).unwrap().0.goal == 5);
        assert!(table3().goal == 4);
        let four = (0..4).map(|i| (format!("P{}", i), i as i64)).collect();
        assert!(Table::start(four).unwrap().0.goal == 3);
    }

    #[test]
    fn smallest_seed_opens_the_game() {
        let table = table3();
        assert!(table.active_position() == 1);
        assert!(table.seats[1].is_active());
        assert!(table.seats[1].hand().len() == 2);
    }

    #[test]
    fn two_player_round_exposes_three_cards() {
        let table = Table::start(vec![("A".into(), 1), ("B".into(), 2)])
            .unwrap()
            .0;
        assert!(table.discard.len() == crate::EXPOSED_CARDS);
        assert!(conserved(&table) == crate::DECK_SIZE);
    }

    #[test]
    fn cards_are_conserved_through_play() {
        let mut table = table3();
        assert!(conserved(&table) == crate::DECK_SIZE);
        rig(&mut table, 1, &[Card::Handmaid, Card::Guard]);
        table.resolve(1, Play::simple(Card::Handmaid)).unwrap();
        assert!(conserved(&table) == crate::DECK_SIZE);
        match table.advance() {
            Progress::Continued(_) => {}
            Progress::Finished(_) => panic!("round cannot be over"),
        }
        assert!(conserved(&table) == crate::DECK_SIZE);
    }

    #[test]
    fn guard_eliminates_on_a_right_guess() {
        let mut table = table3();
        rig(&mut table, 1, &[Card::Guard, Card::Baron]);
        rig(&mut table, 0, &[Card::Priest]);
        table.resolve(1, Play::guessed(0, Card::Priest)).unwrap();
        assert!(!table.seats[0].is_in_round());
    }

    #[test]
    fn guard_misses_on_a_wrong_guess() {
        let mut table = table3();
        rig(&mut table, 1, &[Card::Guard, Card::Baron]);
        rig(&mut table, 0, &[Card::Priest]);
        table.resolve(1, Play::guessed(0, Card::Baron)).unwrap();
        assert!(table.seats[0].is_in_round());
    }

    #[test]
    fn guard_cannot_guess_guard() {
        let mut table = table3();
        rig(&mut table, 1, &[Card::Guard, Card::Baron]);
        let play = Play {
            card: Card::Guard,
            target: Some(0),
            guess: Some(Card::Guard),
        };
        assert!(table.resolve(1, play) == Err(TableError::GuessedGuard));
        assert!(table.seats[1].hand().len() == 2);
    }

    #[test]
    fn countess_bind_rejects_king_until_played() {
        let mut table = table3();
        rig(&mut table, 1, &[Card::Countess, Card::King]);
        assert!(table.resolve(1, Play::aimed(Card::King, 0)) == Err(TableError::MustPlayCountess));
        assert!(table.resolve(1, Play::simple(Card::Countess)).is_ok());
        assert!(table.seats[1].held() == Card::King);
    }

    #[test]
    fn handmaid_shields_until_next_turn() {
        let mut table = table3();
        rig(&mut table, 1, &[Card::Handmaid, Card::Guard]);
        table.resolve(1, Play::simple(Card::Handmaid)).unwrap();
        assert!(table.seats[1].is_shielded());
        table.advance();
        // Cy is up; Bo cannot be targeted, Ana can
        assert!(table.active_position() == 2);
        assert!(table.vet_target(2, "Bo") == Err(TableError::TargetShielded));
        assert!(table.vet_target(2, "Ana") == Ok(0));
        // the shield clears as Bo's next turn begins
        rig(&mut table, 2, &[Card::Countess, Card::Priest]);
        table.resolve(2, Play::simple(Card::Countess)).unwrap();
        table.advance();
        assert!(table.active_position() == 0);
        rig(&mut table, 0, &[Card::Countess, Card::Priest]);
        table.resolve(0, Play::simple(Card::Countess)).unwrap();
        table.advance();
        assert!(table.active_position() == 1);
        assert!(!table.seats[1].is_shielded());
    }

    #[test]
    fn baron_kicks_the_lower_card_out() {
        let mut table = table3();
        rig(&mut table, 1, &[Card::Baron, Card::King]);
        rig(&mut table, 2, &[Card::Priest]);
        table.resolve(1, Play::aimed(Card::Baron, 2)).unwrap();
        assert!(!table.seats[2].is_in_round());
        assert!(table.seats[1].is_in_round());
    }

    #[test]
    fn baron_tie_eliminates_nobody() {
        let mut table = table3();
        rig(&mut table, 1, &[Card::Baron, Card::Guard]);
        rig(&mut table, 2, &[Card::Guard]);
        table.resolve(1, Play::aimed(Card::Baron, 2)).unwrap();
        assert!(table.seats[1].is_in_round());
        assert!(table.seats[2].is_in_round());
    }

    #[test]
    fn prince_forces_a_discard_and_redraw() {
        let mut table = table3();
        rig(&mut table, 1, &[Card::Prince, Card::Guard]);
        rig(&mut table, 0, &[Card::Priest]);
        let before = table.deck.remaining();
        table.resolve(1, Play::aimed(Card::Prince, 0)).unwrap();
        assert!(table.discard.contains(&Card::Priest));
        assert!(table.seats[0].hand().len() == 1);
        assert!(table.deck.remaining() == before - 1);
    }

    #[test]
    fn prince_on_self_still_redraws() {
        let mut table = table3();
        rig(&mut table, 1, &[Card::Prince, Card::Guard]);
        table.resolve(1, Play::aimed(Card::Prince, 1)).unwrap();
        assert!(table.discard.contains(&Card::Guard));
        assert!(table.seats[1].hand().len() == 1);
        assert!(table.seats[1].is_in_round());
    }

    #[test]
    fn prince_forcing_the_princess_out_eliminates() {
        let mut table = table3();
        rig(&mut table, 1, &[Card::Prince, Card::Guard]);
        rig(&mut table, 2, &[Card::Princess]);
        table.resolve(1, Play::aimed(Card::Prince, 2)).unwrap();
        assert!(!table.seats[2].is_in_round());
        assert!(table.seats[2].hand().is_empty());
        assert!(table.discard.contains(&Card::Princess));
    }

    #[test]
    fn king_swaps_held_cards() {
        let mut table = table3();
        rig(&mut table, 1, &[Card::King, Card::Guard]);
        rig(&mut table, 0, &[Card::Princess]);
        table.resolve(1, Play::aimed(Card::King, 0)).unwrap();
        assert!(table.seats[1].held() == Card::Princess);
        assert!(table.seats[0].held() == Card::Guard);
    }

    #[test]
    fn princess_eliminates_her_player() {
        let mut table = table3();
        rig(&mut table, 1, &[Card::Princess, Card::Guard]);
        table.resolve(1, Play::simple(Card::Princess)).unwrap();
        assert!(!table.seats[1].is_in_round());
    }

    #[test]
    fn shielded_targets_are_rejected_not_ignored() {
        let mut table = table3();
        rig(&mut table, 1, &[Card::Guard, Card::Baron]);
        table.seats[0].shield();
        assert!(table.resolve(1, Play::guessed(0, Card::Priest)) == Err(TableError::TargetShielded));
        assert!(table.seats[1].hand().len() == 2);
    }

    #[test]
    fn out_of_turn_plays_are_rejected() {
        let mut table = table3();
        rig(&mut table, 0, &[Card::Guard]);
        assert!(table.vet(0, Card::Guard) == Err(TableError::NotYourTurn));
    }

    #[test]
    fn highest_card_takes_an_exhausted_round() {
        let mut table = table3();
        rig(&mut table, 0, &[Card::Baron]);
        rig(&mut table, 1, &[Card::Priest]);
        rig(&mut table, 2, &[Card::King]);
        while !table.deck.is_empty() {
            table.deck.draw();
        }
        match table.advance() {
            Progress::Continued(_) => {}
            Progress::Finished(_) => panic!("nobody is near the goal"),
        }
        assert!(table.seats[2].points() == 1);
        assert!(table.seats[0].points() == 0);
        // the round winner opens the next round
        assert!(table.active_position() == 2);
    }

    #[test]
    fn sole_survivor_takes_the_round() {
        let mut table = table3();
        table.seats[0].eliminate();
        table.seats[2].eliminate();
        rig(&mut table, 1, &[Card::Guard]);
        table.advance();
        assert!(table.seats[1].points() == 1);
    }

    #[test]
    fn reaching_the_goal_finishes_and_resets() {
        let mut table = Table::start(vec![("A".into(), 1), ("B".into(), 2)])
            .unwrap()
            .0;
        for _ in 0..4 {
            table.seats[0].score_point();
        }
        table.seats[1].eliminate();
        rig(&mut table, 0, &[Card::Guard]);
        match table.advance() {
            Progress::Finished(echoes) => {
                let over = echoes.iter().any(|e| match e {
                    Echo::All(text) => text.contains("The game is over. The winner is: A"),
                    _ => false,
                });
                assert!(over);
            }
            Progress::Continued(_) => panic!("five points must end a 2-player game"),
        }
        assert!(table.seats.iter().all(|s| s.points() == 0));
        assert!(table.seats.iter().all(|s| s.hand().is_empty()));
    }

    #[test]
    fn active_forfeit_passes_the_turn() {
        let mut table = table3();
        let (was_active, _) = table.forfeit(1);
        assert!(was_active);
        assert!(table.survivors() == 2);
        match table.advance() {
            Progress::Continued(_) => {}
            Progress::Finished(_) => panic!("game goes on"),
        }
        assert!(table.active_position() == 2);
        assert!(table.remaining_players() == 2);
    }

    #[test]
    fn departed_seats_sit_out_later_rounds() {
        let mut table = table3();
        table.forfeit(0);
        table.seats[2].eliminate();
        // round settles with Bo the sole survivor, then redeals
        table.advance();
        assert!(!table.seats[0].is_in_round());
        assert!(table.seats[0].hand().is_empty());
        assert!(table.seats[1].is_in_round());
        assert!(table.seats[2].is_in_round());
    }
}
