use clap::Parser;
use storefront_harness::config::SuiteConfig;
use storefront_harness::error::Result;
use storefront_harness::logging;
use storefront_harness::session::StateStore;
use storefront_suite::Fixtures;
use storefront_suite::cli::{Cli, Command};
use tracing::info;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	if let Err(err) = run(cli).await {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

async fn run(cli: Cli) -> Result<()> {
	let config = SuiteConfig::from_env()?;
	let store = StateStore::new(&config.storage_state_path);

	match cli.command {
		Command::Auth { force } => auth(config, store, force).await,
		Command::Invalidate => {
			store.invalidate()?;
			println!("removed {}", store.path().display());
			Ok(())
		}
		Command::Check => {
			check(&config, &store);
			Ok(())
		}
	}
}

/// Global setup: authenticate once and persist the storage state so the
/// suite can skip the login UI on every run.
async fn auth(config: SuiteConfig, store: StateStore, force: bool) -> Result<()> {
	if store.exists() && !force {
		println!("state file already present: {} (use --force to refresh)", store.path().display());
		return Ok(());
	}
	if force {
		store.invalidate()?;
	}

	info!(username = %config.username, "authenticating baseline session");
	let fixtures = Fixtures::launch_with(config).await?;
	fixtures.login_fresh().await?;
	let state = fixtures.session().capture_storage_state().await?;
	store.save_if_absent(&state)?;
	fixtures.close().await?;

	println!("session state written to {}", store.path().display());
	Ok(())
}

fn check(config: &SuiteConfig, store: &StateStore) {
	println!("base url:        {}", config.base_url);
	println!("webdriver url:   {}", config.webdriver_url);
	println!("headless:        {}", config.headless);
	println!("ci:              {}", config.ci);
	println!("retries:         {}", config.retries());
	println!(
		"workers:         {}",
		config.workers().map_or_else(|| "runner default".to_string(), |w| w.to_string())
	);
	println!("state file:      {} (present: {})", store.path().display(), store.exists());
	println!("screenshots dir: {}", config.screenshots_dir.display());
	println!("api login url:   {}", config.api_login_url);
	println!("api key set:     {}", config.api_key.is_some());
}
