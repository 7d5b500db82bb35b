//! Console client: connects to a running server, prints every line it
//! sends, and forwards each line typed on stdin. Exits when the server
//! hangs up or stdin closes.

use clap::Parser;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio::net::TcpStream;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Server address to connect to.
    #[arg(long, default_value = "127.0.0.1:8000")]
    addr: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let socket = TcpStream::connect(&args.addr).await?;
    let (reader, mut writer) = socket.into_split();
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            println!("{}", line);
        }
        // server closed the connection
        std::process::exit(0);
    });
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = stdin.next_line().await? {
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }
    Ok(())
}
