pub mod echo;
pub use echo::*;

pub mod error;
pub use error::*;

pub mod play;
pub use play::*;

pub mod rotation;
pub use rotation::*;

pub mod seat;
pub use seat::*;

pub mod table;
pub use table::*;
