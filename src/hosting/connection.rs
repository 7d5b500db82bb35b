use crate::ClientId;
use crate::gameroom::Event;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio::net::TcpStream;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

/// One accepted socket, split into a reader task and a writer task.
/// The pair is the only code that touches the socket; everything else
/// speaks lines of text over channels.
pub struct Connection;

impl Connection {
    /// Spawn the per-socket tasks. Incoming lines become `Event::Line`s
    /// on the room queue; text the room sends to the outbox is written
    /// back out newline-framed. EOF, a write error, or the room dropping
    /// the outbox tears the connection down.
    pub fn spawn(id: ClientId, socket: TcpStream, inbox: UnboundedSender<(ClientId, Event)>) {
        let (reader, mut writer) = socket.into_split();
        let (tx, mut rx) = unbounded_channel::<String>();
        inbox.send((id, Event::Joined(tx))).ok();
        tokio::spawn(async move {
            while let Some(text) = rx.recv().await {
                if writer.write_all(text.as_bytes()).await.is_err() {
                    break;
                }
                if writer.write_all(b"\n").await.is_err() {
                    break;
                }
            }
            writer.shutdown().await.ok();
            log::debug!("writer for client {} closed", id);
        });
        tokio::spawn(async move {
            let mut lines = BufReader::new(reader).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if inbox.send((id, Event::Line(line))).is_err() {
                    break;
                }
            }
            inbox.send((id, Event::Left)).ok();
            log::debug!("reader for client {} closed", id);
        });
    }
}
