use perllert::app::App;
use perllert::constants::LOOP_TIME;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// The main entry point of the application.
///
/// This function initializes logging, SDL, the window, the game state, and
/// then enters the main game loop. The loop runs until the game requests
/// exit, after which the music thread is joined before the process ends.
pub fn main() {
    // Allow RUST_LOG to override levels; default to info
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut app = App::new().expect("Could not create app");

    info!(loop_time = ?LOOP_TIME, "Starting game loop");
    loop {
        if !app.run() {
            break;
        }
    }

    app.shutdown();
}
