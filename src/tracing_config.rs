//! Tracing configuration for debugging lineage construction and comparison.
//!
//! Supports three output formats controlled by `LINEAGE_LOG_FORMAT`:
//!
//! - `text` (default): standard `tracing-subscriber` flat output
//! - `tree`: hierarchical indented output via `tracing-tree`, one nesting
//!   level per `parse` span
//! - `json`: one JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Why did this argument turn into `?`
//! LINEAGE_LOG=lineage_solver::parser=debug LINEAGE_LOG_FORMAT=tree cargo test
//!
//! # Every node built and every positional comparison
//! LINEAGE_LOG=trace cargo test
//!
//! # Machine-readable
//! LINEAGE_LOG=debug LINEAGE_LOG_FORMAT=json cargo bench
//! ```
//!
//! The subscriber is only installed when `LINEAGE_LOG` (or `RUST_LOG`) is
//! set; the library crates themselves never install one.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_VAR: &str = "LINEAGE_LOG";
const FORMAT_VAR: &str = "LINEAGE_LOG_FORMAT";

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Standard flat text lines.
    #[default]
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a format name, ignoring case. Unknown names fall back to
    /// [`LogFormat::Text`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    /// Read `LINEAGE_LOG_FORMAT`.
    pub fn from_env() -> Self {
        std::env::var(FORMAT_VAR)
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }
}

/// Filter directives from `LINEAGE_LOG`, falling back to `RUST_LOG`.
///
/// `None` when neither is set.
fn filter_from_env() -> Option<EnvFilter> {
    match std::env::var(LOG_VAR) {
        Ok(directives) => Some(EnvFilter::builder().parse_lossy(directives)),
        Err(_) if std::env::var("RUST_LOG").is_ok() => Some(EnvFilter::from_default_env()),
        Err(_) => None,
    }
}

/// Install the global tracing subscriber.
///
/// Does nothing when neither `LINEAGE_LOG` nor `RUST_LOG` is set. Returns
/// `true` if a subscriber was installed by this call; `false` when logging
/// is not requested or another subscriber is already in place.
///
/// All output goes to stderr.
pub fn init_tracing() -> bool {
    let Some(filter) = filter_from_env() else {
        return false;
    };
    install(filter, LogFormat::from_env())
}

fn install(filter: EnvFilter, format: LogFormat) -> bool {
    match format {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_writer(std::io::stderr)
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).try_init().is_ok()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).try_init().is_ok()
        }
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok(),
    }
}
