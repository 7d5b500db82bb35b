use crate::ClientId;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Join-protocol stage of one connection. Everyone walks the same
/// two-question reception before they may chat or play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Naming,
    Dating,
    Chatting,
}

#[derive(Debug)]
pub struct Guest {
    stage: Stage,
    name: Option<String>,
    seed: Option<i64>,
}

/// Outcome of one protocol line.
#[derive(Debug, PartialEq, Eq)]
pub enum Admission {
    /// Mid-protocol or invalid input; texts go back to this client only.
    Pending(Vec<String>),
    /// The reception is complete; the rest of the chat learns about it.
    Completed { texts: Vec<String>, announce: String },
}

/// The reception desk: tracks who is connected, walks each newcomer
/// through name and date validation, and hands the room a seatable
/// roster once everyone has answered both questions.
///
/// The date answer doubles as the starting-player tiebreak: the seed is
/// the age of the date in days, and the smallest seed moves first.
#[derive(Debug, Default)]
pub struct Lobby {
    guests: BTreeMap<ClientId, Guest>,
}

impl Lobby {
    /// Register a fresh connection and return its greeting.
    pub fn admit(&mut self, id: ClientId) -> String {
        self.guests.insert(
            id,
            Guest {
                stage: Stage::Naming,
                name: None,
                seed: None,
            },
        );
        "Hello there! What's your name?".to_string()
    }

    pub fn remove(&mut self, id: ClientId) -> Option<Guest> {
        self.guests.remove(&id)
    }

    pub fn count(&self) -> usize {
        self.guests.len()
    }

    pub fn is_chatting(&self, id: ClientId) -> bool {
        self.guests
            .get(&id)
            .map(|g| g.stage == Stage::Chatting)
            .unwrap_or(false)
    }

    pub fn all_chatting(&self) -> bool {
        self.guests.values().all(|g| g.stage == Stage::Chatting)
    }

    pub fn name_of(&self, id: ClientId) -> Option<&str> {
        self.guests.get(&id).and_then(|g| g.name.as_deref())
    }

    pub fn find(&self, name: &str) -> Option<ClientId> {
        self.guests
            .iter()
            .find(|(_, g)| g.name.as_deref() == Some(name))
            .map(|(id, _)| *id)
    }

    pub fn names(&self) -> Vec<String> {
        self.guests
            .values()
            .filter_map(|g| g.name.clone())
            .collect()
    }

    /// The seatable roster in join order. Empty until everyone has
    /// finished the reception.
    pub fn roster(&self) -> Vec<(ClientId, String, i64)> {
        self.guests
            .iter()
            .filter_map(|(id, g)| match (&g.name, g.seed) {
                (Some(name), Some(seed)) => Some((*id, name.clone(), seed)),
                _ => None,
            })
            .collect()
    }

    /// Feed one line into the join protocol. `today` anchors the date
    /// tiebreak so the calendar stays out of the validation logic.
    pub fn heed(&mut self, id: ClientId, line: &str, today: NaiveDate) -> Admission {
        let stage = match self.guests.get(&id) {
            Some(guest) => guest.stage,
            None => return Admission::Pending(Vec::new()),
        };
        match stage {
            Stage::Naming => self.name(id, line),
            Stage::Dating => self.date(id, line, today),
            Stage::Chatting => Admission::Pending(Vec::new()),
        }
    }

    fn name(&mut self, id: ClientId, line: &str) -> Admission {
        if let Err(text) = self.vet_name(line) {
            return Admission::Pending(vec![text]);
        }
        let guest = self.guests.get_mut(&id).expect("stage checked");
        guest.name = Some(line.to_string());
        guest.stage = Stage::Dating;
        Admission::Pending(vec![
            format!("Welcome {}!", line),
            "To determine the starting player for the game 'Love Letter' please tell us the date \
             of your last romantic meeting. Please use the format YYYY-MM-DD!"
                .to_string(),
        ])
    }

    fn vet_name(&self, line: &str) -> Result<(), String> {
        if line.is_empty() {
            return Err("Name cannot be empty!".to_string());
        }
        if line.contains(' ') {
            return Err("Your name should only consist of one word!".to_string());
        }
        if self.guests.values().any(|g| g.name.as_deref() == Some(line)) {
            return Err("This name is already taken. Please choose another name!".to_string());
        }
        if !line.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err("Only characters from the English alphabet are allowed!".to_string());
        }
        if line.len() > 25 {
            return Err("No more than 25 characters are allowed!".to_string());
        }
        Ok(())
    }

    fn date(&mut self, id: ClientId, line: &str, today: NaiveDate) -> Admission {
        let date = match NaiveDate::parse_from_str(line, "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => {
                return Admission::Pending(vec!["Please use the format YYYY-MM-DD!".to_string()]);
            }
        };
        let days = (today - date).num_days();
        if !(0..=crate::OLDEST_DATE_DAYS).contains(&days) {
            return Admission::Pending(vec![
                "Are you a time traveller? Please choose a more realistic date.".to_string(),
            ]);
        }
        let guest = self.guests.get_mut(&id).expect("stage checked");
        guest.seed = Some(days);
        guest.stage = Stage::Chatting;
        let name = guest.name.clone().expect("named before dating");
        log::info!("{} completed the reception with seed {}", name, days);
        Admission::Completed {
            texts: vec![
                "Thanks for this personal information and welcome to Love Letter. Type '/help' \
                 to show all possible commands."
                    .to_string(),
            ],
            announce: format!("{} has joined.", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 26).unwrap()
    }

    fn pending(texts: &[&str]) -> Admission {
        Admission::Pending(texts.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn reception_walks_name_then_date() {
        let mut lobby = Lobby::default();
        lobby.admit(1);
        match lobby.heed(1, "Ana", today()) {
            Admission::Pending(texts) => assert!(texts[0] == "Welcome Ana!"),
            _ => panic!("naming is not the last step"),
        }
        match lobby.heed(1, "2026-08-20", today()) {
            Admission::Completed { announce, .. } => assert!(announce == "Ana has joined."),
            _ => panic!("a valid date completes the reception"),
        }
        assert!(lobby.is_chatting(1));
        assert!(lobby.roster() == vec![(1, "Ana".to_string(), 6)]);
    }

    #[test]
    fn bad_names_are_bounced_with_a_reason() {
        let mut lobby = Lobby::default();
        lobby.admit(1);
        assert!(lobby.heed(1, "", today()) == pending(&["Name cannot be empty!"]));
        assert!(
            lobby.heed(1, "Ana Banana", today())
                == pending(&["Your name should only consist of one word!"])
        );
        assert!(
            lobby.heed(1, "An4", today())
                == pending(&["Only characters from the English alphabet are allowed!"])
        );
        assert!(
            lobby.heed(1, "Anaaaaaaaaaaaaaaaaaaaaaaaaaaaa", today())
                == pending(&["No more than 25 characters are allowed!"])
        );
        assert!(!lobby.is_chatting(1));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut lobby = Lobby::default();
        lobby.admit(1);
        lobby.admit(2);
        lobby.heed(1, "Ana", today());
        assert!(
            lobby.heed(2, "Ana", today())
                == pending(&["This name is already taken. Please choose another name!"])
        );
    }

    #[test]
    fn dates_must_be_recent_history() {
        let mut lobby = Lobby::default();
        lobby.admit(1);
        lobby.heed(1, "Ana", today());
        assert!(
            lobby.heed(1, "yesterday", today())
                == pending(&["Please use the format YYYY-MM-DD!"])
        );
        assert!(
            lobby.heed(1, "2027-01-01", today())
                == pending(&["Are you a time traveller? Please choose a more realistic date."])
        );
        assert!(
            lobby.heed(1, "1899-01-01", today())
                == pending(&["Are you a time traveller? Please choose a more realistic date."])
        );
        match lobby.heed(1, "2026-08-26", today()) {
            Admission::Completed { .. } => {}
            _ => panic!("today itself is a legal answer"),
        }
        assert!(lobby.roster()[0].2 == 0);
    }

    #[test]
    fn roster_waits_for_everyone() {
        let mut lobby = Lobby::default();
        lobby.admit(1);
        lobby.admit(2);
        lobby.heed(1, "Ana", today());
        lobby.heed(1, "2026-08-01", today());
        lobby.heed(2, "Bo", today());
        assert!(!lobby.all_chatting());
        assert!(lobby.roster().len() == 1);
        lobby.heed(2, "2026-08-10", today());
        assert!(lobby.all_chatting());
        assert!(lobby.roster().len() == 2);
    }
}
