use super::connection::Connection;
use crate::ClientId;
use crate::gameroom::Room;
use tokio::net::TcpListener;

pub struct Server;

impl Server {
    /// Bind the listener, spawn the one room actor, and feed it accepted
    /// sockets forever. Client ids are never reused, so a reconnecting
    /// player is a brand new guest.
    pub async fn run(addr: &str) -> anyhow::Result<()> {
        let mut room = Room::default();
        let inbox = room.tx();
        tokio::spawn(room.run());
        let listener = TcpListener::bind(addr).await?;
        log::info!("listening on {}", addr);
        let mut next: ClientId = 0;
        loop {
            let (socket, peer) = listener.accept().await?;
            next += 1;
            log::info!("accepted {} as client {}", peer, next);
            Connection::spawn(next, socket, inbox.clone());
        }
    }
}
