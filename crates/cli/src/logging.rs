use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const QUIET_FILTER: &str = "vidaio=warn,vidaio_core=warn,vidaio_analyzer=warn";
const VERBOSE_FILTER: &str = "vidaio=debug,vidaio_core=debug,vidaio_analyzer=debug";

/// Install the global subscriber. Diagnostics go to stderr so stdout only
/// carries the verdict. `RUST_LOG` overrides the `--verbose` default.
pub fn init(verbose: bool) {
    let default_filter = if verbose { VERBOSE_FILTER } else { QUIET_FILTER };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
