pub mod connection;
pub use connection::*;

pub mod server;
pub use server::*;
