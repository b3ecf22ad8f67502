//! Log output for applications embedding the solver.

use std::sync::OnceLock;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_DIRECTIVE: &str = "rosterforge=info";

/// Installs a formatting subscriber filtered by `RUST_LOG`, falling back to
/// `rosterforge=info` for every RosterForge crate.
///
/// Safe to call multiple times; only the first call has effect, and an
/// already installed global subscriber is left in place.
pub fn init_tracing() {
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::registry()
            .with(filter())
            .with(fmt::layer().with_target(true))
            .try_init();
    });
}

fn filter() -> EnvFilter {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(crate_directives(DEFAULT_DIRECTIVE)),
    }
}

// Expands `rosterforge=<level>` to every crate of the workspace, since
// targets are per crate (`rosterforge_solver`, ...).
fn crate_directives(directive: &str) -> String {
    let Some(level) = directive.strip_prefix("rosterforge=") else {
        return directive.to_string();
    };
    ["rosterforge", "rosterforge_core", "rosterforge_scoring", "rosterforge_solver", "rosterforge_config"]
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}
