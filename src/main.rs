//! Binary entry point that glues the SQLite-backed catalog to the TUI. The
//! bootstrapping pipeline is the whole story here: open (and lazily create)
//! the database, make sure the three tables exist, then drive the Ratatui
//! event loop until the librarian exits.
use library_catalog_manager::{connect, ensure_schema, run_app, App, StoreConfig};

/// Initialize persistence and launch the Ratatui event loop.
///
/// Returning a `Result` bubbles up fatal initialization problems (an
/// unreachable data directory, failing DDL) to the terminal instead of
/// crashing silently. Per-operation failures after this point are surfaced
/// in the UI footer and never abort the process.
fn main() -> anyhow::Result<()> {
    let config = StoreConfig::default();
    let conn = connect(&config)?;
    ensure_schema(&conn)?;

    let mut app = App::new(conn);
    run_app(&mut app)
}
