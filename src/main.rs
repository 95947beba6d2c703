use dotenvy::dotenv;
use gym_buddy::{
    config::{self, seed::apply_seed},
    core::{
        clock::{self, SystemClock},
        gym::Gym,
    },
    errors::Result,
    shell::Shell,
};
use std::io;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // 1. Load .env first so RUST_LOG and GYM_CONFIG can come from it
    dotenv().ok();

    // 2. Initialize tracing on stderr, keeping stdout for the shell
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    info!("Successfully processed application configuration.");

    // 4. Build the gym and apply seed data
    let mut gym = Gym::new(clock::shared(SystemClock), &app_config);
    let summary = apply_seed(&mut gym, &app_config.seed)
        .inspect_err(|e| error!("Failed to apply seed data: {}", e))?;
    info!(
        "Seeded {} users ({} skipped) and {} sessions",
        summary.users, summary.skipped_users, summary.sessions
    );

    // 5. Run the shell until quit or end of input
    let stdin = io::stdin();
    Shell::new(gym).run(stdin.lock(), io::stdout().lock())
}
