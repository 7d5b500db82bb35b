pub mod channel;
pub use channel::*;

pub mod event;
pub use event::*;

pub mod lobby;
pub use lobby::*;

pub mod room;
pub use room::*;
