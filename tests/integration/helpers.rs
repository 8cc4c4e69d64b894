//! Shared helpers for integration tests.

use std::path::PathBuf;

/// Path to a fixture file shipped with the tests.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/integration/fixtures")
        .join(name)
}

/// Read a fixture file to a string.
pub fn fixture_contents(name: &str) -> String {
    std::fs::read_to_string(fixture(name)).expect("fixture should exist")
}
