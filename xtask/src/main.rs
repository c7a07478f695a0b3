//! Custom cargo commands for the dalil crate.
//!
//! Usage:
//!   cargo xtask verify    - Run full verification suite
//!   cargo xtask test      - Run all tests under every feature set
//!   cargo xtask check     - Quick check (test + clippy, default features)
//!   cargo xtask bench     - Run benchmarks
//!   cargo xtask fuzz      - Run every fuzz target briefly (needs nightly)

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

/// Feature sets the crate must build and pass tests under.
const FEATURE_SETS: &[&[&str]] = &[
    &[],
    &["--no-default-features"],
    &["--features", "fold-diacritics"],
];

const FUZZ_TARGETS: &[&str] = &["search_queries", "catalog_parsing", "keystroke_scripts"];

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        Some("fuzz") => fuzz()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify    Run full verification suite (markers + tests + clippy + replay smoke test)
  test      Run all Rust tests under every feature set
  check     Quick check (cargo test + clippy, default features)
  bench     Run benchmarks
  fuzz      Run each fuzz target for 30 seconds
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("dalil Verification Suite");
    println!("==========================================\n");

    println!("[1/4] Checking invariant markers...");
    check_invariant_markers()?;
    println!("✓ Invariant markers present\n");

    println!("[2/4] Running Rust tests...");
    test()?;
    println!("✓ All Rust tests passed\n");

    println!("[3/4] Running clippy...");
    run_cargo(&["clippy", "--all-targets", "--quiet", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[4/4] Replaying fixture keystrokes...");
    run_cargo(&[
        "run",
        "--quiet",
        "--",
        "replay",
        "--input",
        "tests/fixtures/catalog.json",
        "--script",
        "tests/fixtures/keystrokes.txt",
    ])?;
    println!("✓ Replay ran\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");

    Ok(())
}

/// Run all tests under every feature set
fn test() -> Result<()> {
    for features in FEATURE_SETS {
        let mut args = vec!["test", "--quiet"];
        args.extend_from_slice(features);
        run_cargo(&args)?;
    }
    Ok(())
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/2] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[2/2] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

fn fuzz() -> Result<()> {
    let fuzz_dir = project_root()?.join("fuzz");
    for target in FUZZ_TARGETS {
        println!("fuzzing {}...", target);
        let status = Command::new("cargo")
            .args(["+nightly", "fuzz", "run", target, "--", "-max_total_time=30"])
            .current_dir(&fuzz_dir)
            .status()
            .context("Failed to run cargo fuzz")?;
        if !status.success() {
            bail!("fuzz target {} failed", target);
        }
    }
    Ok(())
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

/// The index and controller modules document their invariants; make sure nobody drops them.
fn check_invariant_markers() -> Result<()> {
    let root = project_root()?;
    let src_dir = root.join("src");

    let output = Command::new("grep")
        .args(["-rl", "INVARIANTS (DO NOT VIOLATE)", "--include=*.rs", "."])
        .current_dir(&src_dir)
        .output()
        .context("Failed to run grep")?;

    let files = String::from_utf8_lossy(&output.stdout);
    for required in ["inverted.rs", "debounce.rs"] {
        if !files.lines().any(|line| line.ends_with(required)) {
            bail!(
                "{} lost its INVARIANTS section. Someone may have removed safety comments!",
                required
            );
        }
    }

    Ok(())
}
