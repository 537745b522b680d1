//! Logging setup for programs embedding the analyzer.
//!
//! The library only emits `tracing` events under the `cf_analyze` target.
//! Hosts that want them on stderr call [`init_logging`] once at startup:
//!
//! ```no_run
//! use cf_analyze::logging::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::from_env());
//! ```
//!
//! `CF_LOG` takes a level (`debug`) or full filter directives
//! (`cf_analyze::pipeline=trace`). `CF_LOG_FORMAT=json` switches to JSON lines.

use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "cf_analyze=warn";

/// How analyzer events are filtered and rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directives.
    pub directives: String,
    /// JSON lines instead of human-readable text.
    pub json: bool,
    /// Include timestamps in human output.
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            directives: DEFAULT_DIRECTIVES.to_string(),
            json: false,
            timestamps: true,
        }
    }
}

impl LogConfig {
    /// Events from this crate at `level` and above.
    pub fn with_level(level: LevelFilter) -> Self {
        Self {
            directives: format!("cf_analyze={}", level.to_string().to_lowercase()),
            ..Self::default()
        }
    }

    /// Read `CF_LOG` and `CF_LOG_FORMAT`. Unusable values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("CF_LOG").ok().as_deref(),
            std::env::var("CF_LOG_FORMAT").ok().as_deref(),
        )
    }

    fn from_values(log: Option<&str>, format: Option<&str>) -> Self {
        let mut config = match log.map(str::trim) {
            Some(value) => match value.parse::<LevelFilter>() {
                Ok(level) => Self::with_level(level),
                Err(_) if EnvFilter::try_new(value).is_ok() => Self {
                    directives: value.to_string(),
                    ..Self::default()
                },
                Err(_) => Self::default(),
            },
            None => Self::default(),
        };
        config.json = format.is_some_and(|f| {
            f.eq_ignore_ascii_case("json") || f.eq_ignore_ascii_case("jsonl")
        });
        config
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
    }

    /// Build a subscriber that writes events to `writer`.
    pub fn subscriber<W>(&self, writer: W) -> Box<dyn Subscriber + Send + Sync>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let registry = tracing_subscriber::registry().with(self.filter());

        if self.json {
            return Box::new(registry.with(fmt::layer().json().with_writer(writer)));
        }

        let layer = fmt::layer().with_writer(writer).with_target(false).with_ansi(false);
        if self.timestamps {
            return Box::new(registry.with(layer));
        }
        Box::new(registry.with(layer.without_time()))
    }
}

/// Install a global subscriber writing to stderr.
///
/// Returns false if a subscriber was already installed.
pub fn init_logging(config: &LogConfig) -> bool {
    tracing::subscriber::set_global_default(config.subscriber(std::io::stderr)).is_ok()
}
