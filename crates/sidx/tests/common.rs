use std::path::PathBuf;

/// The physics crate's index shipped with the `searchindex` tests.
pub fn fixture_index() -> String {
    manifest_dir()
        .join("../searchindex/tests/fixtures/search-index.js")
        .display()
        .to_string()
}

pub fn broken_index() -> String {
    manifest_dir()
        .join("tests/fixtures/broken-index.js")
        .display()
        .to_string()
}

fn manifest_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Run against the fixture index with colors off.
pub fn run_cli(args: &[&str]) -> (String, String, bool) {
    let index = fixture_index();
    let mut full = vec!["--color", "never", "--index", index.as_str()];
    full.extend_from_slice(args);
    run_cli_raw(&full)
}

pub fn run_cli_raw(args: &[&str]) -> (String, String, bool) {
    match sidx::run_cli(args) {
        Ok(stdout) => (normalize_output(&stdout), String::new(), true),
        Err(stderr) => (String::new(), normalize_output(&stderr), false),
    }
}

/// Replace machine-specific paths with placeholders
fn normalize_output(output: &str) -> String {
    let dir = manifest_dir().display().to_string();
    output.replace(&dir, "[SIDX]")
}
