use rand::Rng;
use tracing::Span;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub mod cloud;

pub use cloud::CloudLogLayer;

const DEFAULT_FILTER: &str = "info,actix_web=info,actix_server=warn";

/// How log events leave the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines for a terminal.
    Console,
    /// JSON lines on stderr for the cloud log collector.
    Cloud { project: String },
}

pub fn init_tracing(format: &LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    match format {
        LogFormat::Console => {
            let fmt_layer = fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact();
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .init();
        }
        LogFormat::Cloud { project } => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(CloudLogLayer::new(project.clone(), std::io::stderr))
                .init();
        }
    }
}

/// Span that ties together everything logged while the server starts.
pub fn startup_span() -> Span {
    let trace_id = format!("{:08X}", rand::rng().random_range(0..=0xFFFF_FFFF_u32));
    tracing::info_span!("startup", trace_id = %trace_id, span_id = %"0")
}
