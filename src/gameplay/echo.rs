use crate::Position;

/// Outbound text produced by the rules engine, scoped to its audience.
/// The room maps positions onto client outboxes; the engine itself
/// never sees a socket or a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Echo {
    One(Position, String),
    AllExcept(Position, String),
    All(String),
}

impl Echo {
    pub fn one(position: Position, text: impl Into<String>) -> Self {
        Self::One(position, text.into())
    }
    pub fn all_except(position: Position, text: impl Into<String>) -> Self {
        Self::AllExcept(position, text.into())
    }
    pub fn all(text: impl Into<String>) -> Self {
        Self::All(text.into())
    }
}
