//! Love Letter as a chat server.
//!
//! Players connect over plain TCP, pick a name, and play rounds of the
//! card game Love Letter by typing commands into the shared chat. The
//! crate splits into the pure rules (`cards`, `gameplay`), the session
//! actor that owns all mutable state (`gameroom`), and the line-framed
//! TCP boundary (`hosting`).

pub mod cards;
pub mod gameplay;
pub mod gameroom;
pub mod hosting;

/// Card strength, 1 (Guard) through 8 (Princess).
pub type Power = u8;
/// Seat index around the table.
pub type Position = usize;
/// Identifier handed to each accepted connection.
pub type ClientId = u64;

/// Fewest players a game can start with.
pub const MIN_PLAYERS: usize = 2;
/// Most players a session will seat.
pub const MAX_PLAYERS: usize = 4;
/// Total card copies in a fresh deck.
pub const DECK_SIZE: usize = 16;
/// Exposed cards set aside face-up in a 2-player game.
pub const EXPOSED_CARDS: usize = 3;
/// Oldest tiebreak date accepted at join, in days before today.
pub const OLDEST_DATE_DAYS: i64 = 37_000;

/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate termination.
pub fn kys() {
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.expect("install signal handler");
        println!();
        log::warn!("interrupt received, exiting immediately");
        std::process::exit(0);
    });
}
