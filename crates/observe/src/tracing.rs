use {
    crate::{config::Config, panic_hook},
    time::macros::format_description,
    tracing::{Level, Subscriber},
    tracing_subscriber::{
        EnvFilter,
        Layer,
        fmt::{time::UtcTime, writer::MakeWriterExt as _},
        prelude::*,
        registry::LookupSpan,
        util::SubscriberInitExt,
    },
};

/// Initializes the tracing setup used by the binaries and installs a panic
/// hook that reports panics through `tracing`.
/// `env_filter` has similar syntax to env_logger. It is documented at
/// https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
pub fn initialize(config: &Config) {
    set_tracing_subscriber(config);
    panic_hook::install();
}

fn set_tracing_subscriber(config: &Config) {
    let env_filter = EnvFilter::new(&config.env_filter);
    let stderr_threshold = config.stderr_threshold.unwrap_or(Level::ERROR);

    tracing_subscriber::registry()
        .with(fmt_layer(config.use_json_format, stderr_threshold).with_filter(env_filter))
        .init();
    tracing::debug!(filter = %config.env_filter, "initialized tracing subscriber");
}

/// Events at or above `stderr_threshold` go to stderr, everything else to
/// stdout.
fn fmt_layer<S>(use_json_format: bool, stderr_threshold: Level) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let writer = std::io::stderr
        .with_max_level(stderr_threshold)
        .or_else(std::io::stdout);
    let timer = UtcTime::new(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    ));

    if use_json_format {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_timer(timer)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_timer(timer)
            .with_ansi(std::io::IsTerminal::is_terminal(&std::io::stdout()))
            .boxed()
    }
}
