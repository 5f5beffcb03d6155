use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::IndicatifLayer;
use tracing_indicatif::span_ext::IndicatifSpanExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::terminal::logging::{PRINT_TARGET, ReachrFormatter};

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Routes all output through tracing. Report lines always reach stdout;
/// diagnostics follow `RUST_LOG` and default to warnings.
pub fn init_logging() {
    let indicatif_layer = IndicatifLayer::new();
    let base = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    let filter = EnvFilter::try_new(format!("{base},{PRINT_TARGET}=info"))
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{PRINT_TARGET}=info")));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(ReachrFormatter)
                .with_writer(indicatif_layer.get_stdout_writer()),
        )
        .with(indicatif_layer)
        .try_init();
}

/// Span that shows a spinner with `message` while it is entered.
pub fn step(message: &str) -> Span {
    let span = info_span!(target: PRINT_TARGET, "step");
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        span.pb_set_style(&style.tick_strings(TICK_STRINGS));
    }
    span.pb_set_message(message);
    span
}
