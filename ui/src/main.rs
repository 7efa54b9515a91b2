use clap::Parser;
use mailroom::app::application_lifecycle::ApplicationLifecycle;
use mailroom::config::ConfigOverrides;
use std::path::PathBuf;

/// Browse mailboxes in the terminal and watch new mail arrive.
#[derive(Parser, Debug)]
#[command(name = "mailroom", version, about)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Account whose mailboxes are shown
    #[arg(short, long)]
    account: Option<i64>,

    /// JSON file used to populate the mail store
    #[arg(short, long)]
    seed: Option<PathBuf>,
}

impl From<Cli> for ConfigOverrides {
    fn from(cli: Cli) -> Self {
        Self {
            config_path: cli.config,
            account_id: cli.account,
            seed_file: cli.seed,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let overrides = ConfigOverrides::from(Cli::parse());

    let mut model = ApplicationLifecycle::initialize(&overrides)?;
    ApplicationLifecycle::setup_terminal(&mut model)?;

    let result = ApplicationLifecycle::run_application_loop(&mut model);
    ApplicationLifecycle::shutdown_application(model)?;
    result
}
