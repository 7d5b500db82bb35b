use tokio::sync::mpsc::UnboundedSender;

/// Inbound traffic from connection tasks to the room actor. Every
/// client feeds the same queue, so the room consumes events in arrival
/// order and owns all game state without locks.
#[derive(Debug)]
pub enum Event {
    /// A socket connected; the sender is its outbox of text lines.
    /// Dropping the outbox closes the connection.
    Joined(UnboundedSender<String>),
    /// One line of text typed by the client.
    Line(String),
    /// The socket closed, cleanly or not.
    Left,
}
