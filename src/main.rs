use clap::Parser;

/// Love Letter over plain TCP: connect with netcat, pick a name, and
/// play by typing commands into the shared chat.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:8000")]
    addr: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    loveletter::log();
    loveletter::kys();
    loveletter::hosting::Server::run(&args.addr).await
}
