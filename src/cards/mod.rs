pub mod card;
pub use card::*;

pub mod deck;
pub use deck::*;
