use clap::{ArgAction, Parser, Subcommand};

/// Bootstrap utility for the storefront e2e suite.
#[derive(Debug, Parser)]
#[command(name = "storefront-e2e", version, about = "Session bootstrap for the storefront e2e suite")]
pub struct Cli {
	/// Increase log verbosity (-v, -vv).
	#[arg(short, long, action = ArgAction::Count, global = true)]
	pub verbose: u8,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Log in once and persist the session storage state.
	Auth {
		/// Overwrite an existing state file.
		#[arg(long)]
		force: bool,
	},
	/// Delete the persisted storage state, forcing re-login.
	Invalidate,
	/// Print the resolved suite configuration.
	Check,
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	#[test]
	fn cli_definition_is_consistent() {
		Cli::command().debug_assert();
	}

	#[test]
	fn auth_accepts_force_flag() {
		let cli = Cli::parse_from(["storefront-e2e", "auth", "--force"]);
		assert!(matches!(cli.command, Command::Auth { force: true }));
	}

	#[test]
	fn verbosity_accumulates() {
		let cli = Cli::parse_from(["storefront-e2e", "-vv", "check"]);
		assert_eq!(cli.verbose, 2);
		assert!(matches!(cli.command, Command::Check));
	}
}
