use thiserror::Error;

/// Rule violations reported back to the offending player only.
/// None of these mutate table state; the player simply retries.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    #[error("The game is already running.")]
    AlreadyRunning,

    #[error("There are not enough players to start the game!")]
    NotEnoughPlayers,

    #[error("There are too many players for one game!")]
    TooManyPlayers,

    #[error("It's not your turn!")]
    NotYourTurn,

    #[error("That card is not in your hand! Please choose another one.")]
    NotInHand,

    #[error("You have the Countess and either King or Prince: the Countess must be played!")]
    MustPlayCountess,

    #[error("Unknown player name.")]
    UnknownTarget,

    #[error("The player is protected by the Handmaid!")]
    TargetShielded,

    #[error("That player is already out of the round.")]
    TargetEliminated,

    #[error("You cannot choose the Guard. Please choose another card.")]
    GuessedGuard,
}
