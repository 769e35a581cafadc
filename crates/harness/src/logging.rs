use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

pub fn init_logging(verbosity: u8) {
	// 0 = errors only (suppress webdriver wire noise entirely)
	// 1 (-v) = info for the suite, warn for thirtyfour
	// 2+ (-vv) = debug/trace for everything
	let filter = match verbosity {
		0 => "error,thirtyfour=off,hyper=off",
		1 => "info,thirtyfour=warn,hyper=warn",
		_ => "debug",
	};

	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

	let stderr = std::io::stderr.with_max_level(tracing::Level::TRACE);

	// try_init: fixtures and individual tests may both initialize.
	let _ = tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(stderr)
		.with_target(true)
		.with_level(true)
		.compact()
		.try_init();
}
