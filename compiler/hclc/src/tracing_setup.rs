//! Tracing subscriber setup.
//!
//! Logging is off unless `RUST_LOG` is set. Output is an indented tree on
//! stderr, one level per nested `compile` span, so an import chain reads
//! top to bottom:
//!
//! ```text
//! RUST_LOG=hclc=debug hclc main.hcl
//! ```

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber.
///
/// Call once at startup. Safe to call multiple times; only the first call
/// has any effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var_os("RUST_LOG").is_none() {
            return;
        }
        let tree = tracing_tree::HierarchicalLayer::new(2)
            .with_writer(std::io::stderr)
            .with_targets(true)
            .with_bracketed_fields(true);
        // Another subscriber may already be installed (embedding, tests).
        let _ = tracing_subscriber::registry()
            .with(tree)
            .with(EnvFilter::from_default_env())
            .try_init();
    });
}
