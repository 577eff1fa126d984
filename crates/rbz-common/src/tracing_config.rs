//! Tracing configuration for debugging subtype checks.
//!
//! Supports three output formats controlled by `RBZ_LOG_FORMAT`:
//!
//! - `text` (default): Standard `tracing-subscriber` flat output
//! - `tree`: Hierarchical indented output via `tracing-tree`
//! - `json`: One JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Follow every constraint the checker visits
//! RBZ_LOG=rbz_solver=trace RBZ_LOG_FORMAT=tree cargo bench
//!
//! # Only failures and builder problems
//! RBZ_LOG=rbz_solver=debug cargo bench
//! ```
//!
//! ## What the solver emits
//!
//! | level   | target                | event                                      |
//! |---------|-----------------------|--------------------------------------------|
//! | `trace` | `rbz_solver::subtype` | memo cache hits, constraints assumed on the current path |
//! | `trace` | `rbz_solver::store`   | template registration, class/module declarations |
//! | `debug` | `rbz_solver::subtype` | failed constraints with their reason, depth ceiling hits |
//! | `warn`  | `rbz_solver::subtype` | a nominal name the interface builder cannot expand |
//!
//! Nothing is logged at `info` or above on the success path.
//!
//! The subscriber is only initialised when `RBZ_LOG` (or `RUST_LOG`) is set,
//! so there is zero overhead in normal builds.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a format name. Unknown names fall back to [`LogFormat::Text`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    /// Read the format from the `RBZ_LOG_FORMAT` environment variable.
    fn from_env() -> Self {
        Self::parse(&std::env::var("RBZ_LOG_FORMAT").unwrap_or_default())
    }
}

/// Build an `EnvFilter` from `RBZ_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("RBZ_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `RBZ_LOG` nor `RUST_LOG` is set. Calling it a
/// second time is harmless: the later installation attempt is ignored.
///
/// All output goes to stderr.
pub fn init_tracing() {
    let has_rbz_log = std::env::var("RBZ_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_rbz_log && !has_rust_log {
        return;
    }

    let filter = build_filter();

    // `try_init` so benches and tests may call this more than once.
    let _ = match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).try_init()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).try_init()
        }
        LogFormat::Text => {
            let text_layer = fmt::layer().with_writer(std::io::stderr);

            Registry::default().with(filter).with(text_layer).try_init()
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_formats() {
        assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" text "), LogFormat::Text);
    }

    #[test]
    fn test_parse_unknown_falls_back_to_text() {
        assert_eq!(LogFormat::parse(""), LogFormat::Text);
        assert_eq!(LogFormat::parse("yaml"), LogFormat::Text);
    }
}
