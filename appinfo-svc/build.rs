//! Build script for appinfo-svc
//!
//! Exposes to the crate, as rustc env vars:
//! - `GIT_HASH`: short commit hash, the default build identifier
//! - `BUILD_TIMESTAMP`: RFC 3339 UTC time this script last ran
//! - `BUILD_PROFILE`: cargo profile

use std::path::PathBuf;
use std::process::Command;

/// Run git and return trimmed stdout, None on any failure
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Resolve a path inside the git directory (handles worktrees and `GIT_DIR`)
///
/// Missing files are skipped: cargo treats a missing watched path as always changed.
fn git_path(name: &str) -> Option<PathBuf> {
    git(&["rev-parse", "--git-path", name])
        .map(PathBuf::from)
        .filter(|path| path.exists())
}

/// Ask cargo to rerun this script whenever HEAD moves
///
/// Without these directives cargo only reruns the script when a file of this
/// package changes, so a commit touching other crates would leave GIT_HASH stale.
fn watch_head() {
    if let Some(head) = git_path("HEAD") {
        println!("cargo:rerun-if-changed={}", head.display());
    }

    // On a branch, commits update the ref file rather than HEAD itself
    if let Some(reference) = git(&["symbolic-ref", "-q", "HEAD"]) {
        if let Some(ref_file) = git_path(&reference) {
            println!("cargo:rerun-if-changed={}", ref_file.display());
        }
    }

    // Refs may live only in packed-refs after `git gc`
    if let Some(packed) = git_path("packed-refs") {
        println!("cargo:rerun-if-changed={}", packed.display());
    }
}

fn main() {
    let git_hash = git(&["rev-parse", "--short=8", "HEAD"]).unwrap_or_else(|| "unknown".to_string());
    watch_head();
    println!("cargo:rerun-if-changed=build.rs");

    let build_timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", build_timestamp);
    println!("cargo:rustc-env=BUILD_PROFILE={}", profile);
}
