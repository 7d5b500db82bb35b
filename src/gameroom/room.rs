use super::channel::Channel;
use super::event::Event;
use super::lobby::Admission;
use super::lobby::Lobby;
use crate::ClientId;
use crate::Position;
use crate::cards::Card;
use crate::gameplay::Echo;
use crate::gameplay::Play;
use crate::gameplay::Progress;
use crate::gameplay::Table;
use crate::gameplay::TableError;
use std::collections::BTreeMap;
use tokio::sync::mpsc::UnboundedSender;

const NOT_RUNNING: &str =
    "You can't use a game command right now because the game is not running at the moment!";

const GAME_COMMANDS: [&str; 6] = ["endGame", "points", "hand", "showHand", "allCards", "active"];

/// Follow-up question pending for the active player. While set, that
/// player's next line answers the question instead of entering the chat.
#[derive(Debug, Clone, Copy)]
enum Pending {
    /// A target player's name, for the card already vetted.
    Target { card: Card },
    /// The Guard's guess, with the target already locked in.
    Guess { target: Position },
}

/// Central coordinator for one chat session and the game inside it.
///
/// The room is the single writer: it owns the lobby, the seating map,
/// and the live table, and mutates them only while handling one event
/// at a time off its queue. Connection tasks never touch game state;
/// they push `(ClientId, Event)` in and drain text lines out.
///
/// Responsibilities:
/// - walk newcomers through the lobby reception
/// - route chat lines, whispers, and slash commands
/// - drive the table through plays, prompts, and round boundaries
/// - turn disconnects into forfeits, or abort the game entirely
#[derive(Debug, Default)]
pub struct Room {
    channel: Channel<(ClientId, Event)>,
    outboxes: BTreeMap<ClientId, UnboundedSender<String>>,
    lobby: Lobby,
    table: Option<Table>,
    seating: BTreeMap<ClientId, Position>,
    pending: Option<Pending>,
}

impl Room {
    pub fn tx(&mut self) -> UnboundedSender<(ClientId, Event)> {
        self.channel.tx().clone()
    }

    pub async fn run(mut self) {
        while let Some((id, event)) = self.channel.rx().recv().await {
            match event {
                Event::Joined(outbox) => self.welcome(id, outbox),
                Event::Line(line) => self.heed(id, line),
                Event::Left => self.farewell(id),
            }
        }
    }
}

impl Room {
    /// A fresh connection. Refused outright while a game runs or the
    /// chat is full; dropping the outbox hangs up on the caller.
    fn welcome(&mut self, id: ClientId, outbox: UnboundedSender<String>) {
        if self.table.is_some() {
            outbox
                .send("A game is already running. Please try again later.".to_string())
                .ok();
            return;
        }
        if self.lobby.count() >= crate::MAX_PLAYERS {
            outbox
                .send("The chat is full. Please try again later.".to_string())
                .ok();
            return;
        }
        let greeting = self.lobby.admit(id);
        self.outboxes.insert(id, outbox);
        self.unicast(id, &greeting);
        log::info!("client {} connected", id);
    }

    /// One line of input from a connected client.
    fn heed(&mut self, id: ClientId, line: String) {
        if !self.lobby.is_chatting(id) {
            match self.lobby.heed(id, &line, chrono::Local::now().date_naive()) {
                Admission::Pending(texts) => {
                    for text in texts {
                        self.unicast(id, &text);
                    }
                }
                Admission::Completed { texts, announce } => {
                    for text in texts {
                        self.unicast(id, &text);
                    }
                    self.broadcast_except(id, &announce);
                }
            }
            return;
        }
        if self.awaiting(id) {
            return self.answer(id, &line);
        }
        if line == "bye" {
            return self.goodbye(id);
        }
        if line.is_empty() {
            return self.unicast(id, "You can't send an empty message!");
        }
        match line.strip_prefix('/') {
            Some(command) if !command.starts_with(' ') && command.contains(' ') => {
                self.whisper(id, command)
            }
            Some(command) => self.command(id, command),
            None => {
                let text = format!("{}: {}", self.name(id), line);
                self.broadcast_except(id, &text);
            }
        }
    }

    /// The socket is gone. Mid-game this is a forfeit; the game aborts
    /// entirely if fewer than two connected players remain.
    fn farewell(&mut self, id: ClientId) {
        if self.outboxes.remove(&id).is_none() {
            return;
        }
        let name = self.lobby.name_of(id).map(|n| n.to_string());
        self.lobby.remove(id);
        if let Some(name) = &name {
            self.broadcast_except(id, &format!("{} has left the chat!", name));
        }
        log::warn!("client {} disconnected", id);
        if let Some(position) = self.seating.remove(&id) {
            if self.table.is_some() {
                let (was_active, echoes) = self.table.as_mut().expect("checked").forfeit(position);
                self.emit(&echoes);
                let table = self.table.as_ref().expect("checked");
                if table.remaining_players() < crate::MIN_PLAYERS {
                    self.broadcast("Not enough players remain. The game is over. No winner was decided.");
                    self.table = None;
                    self.seating.clear();
                    self.pending = None;
                } else if was_active || table.survivors() <= 1 {
                    self.pending = None;
                    self.progress();
                }
            }
        }
    }
}

impl Room {
    /// Clean departure via "bye". Blocked while a game runs.
    fn goodbye(&mut self, id: ClientId) {
        if self.table.is_some() {
            return self.unicast(
                id,
                "You can't leave while the game is running. Please finish the game first.",
            );
        }
        let name = self.name(id);
        self.broadcast_except(id, &format!("{} has left the chat!", name));
        self.outboxes.remove(&id);
        self.lobby.remove(id);
        log::info!("{} left the chat", name);
    }

    /// Private message: "/Name text" goes to that player alone.
    fn whisper(&mut self, id: ClientId, command: &str) {
        let (target, text) = command.split_once(' ').expect("whispers contain a space");
        match self.lobby.find(target) {
            Some(receiver) => {
                let text = format!("{} whispers: {}", self.name(id), text);
                self.unicast(receiver, &text);
            }
            None => self.unicast(id, "There is no player with that name."),
        }
    }

    fn command(&mut self, id: ClientId, command: &str) {
        let running = self.table.is_some();
        if let Ok(card) = Card::try_from(command) {
            if running {
                return self.open_play(id, card);
            }
            return self.unicast(id, NOT_RUNNING);
        }
        if !running && GAME_COMMANDS.contains(&command) {
            return self.unicast(id, NOT_RUNNING);
        }
        match command {
            "help" => self.help(id),
            "cards" => self.cards(id),
            "players" => {
                for name in self.lobby.names() {
                    self.unicast(id, &name);
                }
            }
            "start" | "play" => self.start_game(id),
            "endGame" => self.end_game(id),
            "points" => {
                let points = self.table().seat(self.position(id)).points();
                self.unicast(id, &format!("You have {} points.", points));
            }
            "hand" | "showHand" => {
                let hand = self.table().seat(self.position(id)).hand().to_vec();
                for card in hand {
                    self.unicast(id, &card.to_string());
                }
            }
            "allCards" => {
                self.unicast(id, "Here are all cards that got played in this round:");
                let played = self.table().discard().to_vec();
                for card in played {
                    self.unicast(id, &card.to_string());
                }
            }
            "active" => {
                let table = self.table();
                let text = match self.position(id) == table.active_position() {
                    true => "It's your turn!".to_string(),
                    false => format!("It's {}'s turn.", table.seat(table.active_position()).name()),
                };
                self.unicast(id, &text);
            }
            _ => self.unicast(id, "NOT A LEGAL COMMAND!"),
        }
    }

    fn help(&self, id: ClientId) {
        for line in [
            "Here are all the commands you can use:",
            "/help: show all commands including their description.",
            "/cards: show all cards with their respective values and effects.",
            "/players: show the name of all players in the chat/game.",
            "/start OR /play: start the game 'Love Letter'.",
            "The following commands can only be used while the game is running:",
            "/endGame: stop the game 'Love Letter' while playing. But you eventually have to explain yourself to your friends :)",
            "/points: show the number of your points.",
            "/hand OR /showHand: show the card(s) in your hand.",
            "/allCards: show all cards, that have been played until now. Use this information wisely ;)",
            "/active: show the active player.",
        ] {
            self.unicast(id, line);
        }
    }

    fn cards(&self, id: ClientId) {
        self.unicast(id, "Here are all the cards with their respective values and effects:");
        for card in Card::ALL.iter().rev() {
            self.unicast(id, card.rules());
        }
        self.unicast(
            id,
            "Essential for all targeting cards: if every other player is protected, you have to choose yourself.",
        );
    }
}

impl Room {
    fn start_game(&mut self, id: ClientId) {
        if self.table.is_some() {
            return self.unicast(id, &TableError::AlreadyRunning.to_string());
        }
        if !self.lobby.all_chatting() {
            return self.unicast(id, "Please wait until everyone is ready for the chat.");
        }
        let roster = self.lobby.roster();
        let seats = roster
            .iter()
            .map(|(_, name, seed)| (name.clone(), *seed))
            .collect();
        match Table::start(seats) {
            Err(e) => self.unicast(id, &e.to_string()),
            Ok((table, echoes)) => {
                self.seating = roster
                    .iter()
                    .enumerate()
                    .map(|(position, (id, _, _))| (*id, position))
                    .collect();
                self.table = Some(table);
                self.emit(&echoes);
            }
        }
    }

    fn end_game(&mut self, id: ClientId) {
        self.table = None;
        self.seating.clear();
        self.pending = None;
        self.unicast(id, "You ended the game before a winner could be decided!");
        let text = format!("{} stopped the game. No winner was decided.", self.name(id));
        self.broadcast_except(id, &text);
        log::info!("game ended early by client {}", id);
    }

    /// The active player named a card. Vet it, then either resolve it
    /// outright or open the target prompt.
    fn open_play(&mut self, id: ClientId, card: Card) {
        let position = self.position(id);
        let verdict = self.table().vet(position, card);
        match verdict {
            Err(TableError::NotInHand) => {
                self.unicast(
                    id,
                    "That card is not in your hand! Please choose another one. Your cards are:",
                );
                let hand = self.table().seat(position).hand().to_vec();
                for held in hand {
                    self.unicast(id, &held.to_string());
                }
            }
            Err(e) => self.unicast(id, &e.to_string()),
            Ok(()) if card.targets() => {
                self.pending = Some(Pending::Target { card });
                self.unicast(id, Self::target_prompt(card));
            }
            Ok(()) => self.commit(id, Play::simple(card)),
        }
    }

    /// The active player answered a pending prompt. Bad answers repeat
    /// the question; the prompt survives until a legal answer arrives.
    fn answer(&mut self, id: ClientId, line: &str) {
        let position = self.position(id);
        match self.pending.expect("awaiting checked") {
            Pending::Target { card } => match self.table().vet_target(position, line) {
                Err(e) => self.unicast(id, &e.to_string()),
                Ok(target) if card == Card::Guard => {
                    self.pending = Some(Pending::Guess { target });
                    self.unicast(id, "Choose a card other than the Guard.");
                }
                Ok(target) => {
                    self.pending = None;
                    self.commit(id, Play::aimed(card, target));
                }
            },
            Pending::Guess { target } => match Card::try_from(line) {
                Err(_) => self.unicast(id, "Please choose an existing card from the game!"),
                Ok(Card::Guard) => {
                    self.unicast(id, "You cannot choose the Guard. Please choose another card.")
                }
                Ok(guess) => {
                    self.pending = None;
                    self.commit(id, Play::guessed(target, guess));
                }
            },
        }
    }

    fn commit(&mut self, id: ClientId, play: Play) {
        let position = self.position(id);
        match self.table_mut().resolve(position, play) {
            Err(e) => self.unicast(id, &e.to_string()),
            Ok(echoes) => {
                self.emit(&echoes);
                self.progress();
            }
        }
    }

    /// Move the table past a finished turn and relay whatever happened.
    fn progress(&mut self) {
        match self.table_mut().advance() {
            Progress::Continued(echoes) => self.emit(&echoes),
            Progress::Finished(echoes) => {
                self.emit(&echoes);
                self.table = None;
                self.seating.clear();
                self.pending = None;
                log::info!("game finished, lobby reopened");
            }
        }
    }

    fn target_prompt(card: Card) -> &'static str {
        match card {
            Card::Guard => "Choose a player. If there is no legal target, the card has no effect.",
            Card::Priest => {
                "Choose a player to spy on. If there is no legal target, you have to choose yourself."
            }
            Card::Baron => "Choose a player to compare your hand with.",
            Card::Prince => {
                "Choose a player who has to discard his card and draw a new one. If there is no legal target, you have to choose yourself."
            }
            Card::King => {
                "Choose a player to trade your card with. If every other player is protected by the Handmaid, there is no effect."
            }
            _ => unreachable!("only targeting cards prompt"),
        }
    }
}

impl Room {
    fn awaiting(&self, id: ClientId) -> bool {
        self.pending.is_some()
            && self
                .table
                .as_ref()
                .map(|table| self.seating.get(&id) == Some(&table.active_position()))
                .unwrap_or(false)
    }

    fn name(&self, id: ClientId) -> String {
        self.lobby
            .name_of(id)
            .expect("chatting guests are named")
            .to_string()
    }

    fn position(&self, id: ClientId) -> Position {
        *self.seating.get(&id).expect("seated while a game runs")
    }

    fn client_at(&self, position: Position) -> Option<ClientId> {
        self.seating
            .iter()
            .find(|(_, p)| **p == position)
            .map(|(id, _)| *id)
    }

    fn table(&self) -> &Table {
        self.table.as_ref().expect("a game is running")
    }

    fn table_mut(&mut self) -> &mut Table {
        self.table.as_mut().expect("a game is running")
    }

    /// Fan table output out to the right sockets.
    fn emit(&self, echoes: &[Echo]) {
        for echo in echoes {
            match echo {
                Echo::One(position, text) => {
                    if let Some(id) = self.client_at(*position) {
                        self.unicast(id, text);
                    }
                }
                Echo::AllExcept(position, text) => match self.client_at(*position) {
                    Some(id) => self.broadcast_except(id, text),
                    None => self.broadcast(text),
                },
                Echo::All(text) => self.broadcast(text),
            }
        }
    }

    fn unicast(&self, id: ClientId, text: &str) {
        self.outboxes
            .get(&id)
            .map(|outbox| outbox.send(text.to_string()))
            .and_then(|res| res.err())
            .inspect(|e| log::warn!("failed unicast to client {}: {:?}", id, e));
    }

    fn broadcast(&self, text: &str) {
        for id in self.outboxes.keys() {
            self.unicast(*id, text);
        }
    }

    fn broadcast_except(&self, id: ClientId, text: &str) {
        for other in self.outboxes.keys().filter(|other| **other != id) {
            self.unicast(*other, text);
        }
    }
}
