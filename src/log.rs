use std::io;

use tracing_subscriber::{fmt, prelude::*, util::TryInitError, EnvFilter};


/// Install the global subscriber. Events go to stderr, filtered by `RUST_LOG`.
pub fn init() -> Result<(), TryInitError> {
	tracing_subscriber::registry()
		.with(fmt::layer().with_writer(io::stderr))
		.with(EnvFilter::from_default_env())
		.try_init()
}
