//! Test/recording helpers for persisting HTTP fixtures.
//! Compiled only when the `test-mode` feature is enabled.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) fn fixture_dir() -> PathBuf {
    env::var("RAWG_FIXDIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

/// `games/3498/screenshots` is stored as `games_3498_screenshots.json`.
pub(crate) fn fixture_name(path: &str) -> String {
    format!("{}.json", path.trim_matches('/').replace('/', "_"))
}

pub(crate) fn record_fixture(path: &str, body: &str) -> Result<(), std::io::Error> {
    let dir = fixture_dir();
    fs::create_dir_all(&dir)?;
    let file = dir.join(fixture_name(path));
    fs::write(&file, body)?;
    tracing::debug!(file = %file.display(), "RAWG_RECORD: wrote fixture");
    Ok(())
}
