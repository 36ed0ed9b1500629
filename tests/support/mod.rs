// ABOUTME: Test support utilities.
// ABOUTME: Provides stub engine scripts and tracing setup for integration tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Once;

// Each test binary only uses some of these helpers, so allow dead_code.
#[allow(dead_code)]
pub mod stub_engine;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env().add_directive("limani=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Digest the stub engine reports for every push.
#[allow(dead_code)]
pub const STUB_PUSH_DIGEST: &str =
    "sha256:cccccccccccccccccccccccccccccccccccccccccccccccccccccccccccccccc";

/// Writes an executable script into `dir` and returns its path.
#[allow(dead_code)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// Writes an executable fake engine script into `dir` and returns its
/// path. The script appends every invocation to `engine.log` next to
/// itself and answers `push` with a docker-style summary.
#[allow(dead_code)]
pub fn write_stub_engine(dir: &Path) -> PathBuf {
    write_stub_engine_failing(dir, "none")
}

/// Like [`write_stub_engine`], but the given subcommand exits 1 with a
/// message on stderr.
#[allow(dead_code)]
pub fn write_stub_engine_failing(dir: &Path, failing: &str) -> PathBuf {
    let script = format!(
        r#"#!/bin/sh
log="$(dirname "$0")/engine.log"
echo "$@" >> "$log"
if [ "$1" = "{failing}" ]; then
    echo "stub engine: {failing} failed" >&2
    exit 1
fi
case "$1" in
    version)
        echo "Docker version 27.0.0, build 0000000"
        ;;
    push)
        ref="$2"
        echo "The push refers to repository [${{ref%:*}}]"
        echo "abcdef012345: Pushed"
        echo "${{ref##*:}}: digest: {digest} size: 528"
        ;;
esac
exit 0
"#,
        failing = failing,
        digest = STUB_PUSH_DIGEST,
    );

    write_script(dir, "stub-engine", &script)
}

/// Invocations the stub engine recorded, one argv line per call.
#[allow(dead_code)]
pub fn engine_log(dir: &Path) -> Vec<String> {
    match fs::read_to_string(dir.join("engine.log")) {
        Ok(content) => content.lines().map(str::to_string).collect(),
        Err(_) => Vec::new(),
    }
}
