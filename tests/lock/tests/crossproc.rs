//! Cross-process determinism: spawns the `search_fixture` binary under
//! several environment variants and asserts identical output.

use std::path::Path;
use std::process::Command;

fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("search_fixture");
    path.to_string_lossy().to_string()
}

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn run_variant(work_dir: &str, args: &[&str], env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();

    let mut command = Command::new(&bin);
    command.current_dir(work_dir).args(args);

    command
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE")
        .env_remove("RUST_LOG");

    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });

    assert!(
        output.status.success(),
        "search_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_determinism_four_env_variants() {
    let root = workspace_root();
    let baseline = run_variant(&root, &[], &[]);

    assert!(baseline.contains("grid.outcome=solved"));
    assert!(baseline.contains("grid.cost=31"));
    assert!(baseline.contains("grid.path_len=32"));
    assert!(baseline.contains("cut.outcome=Exhausted"));
    assert!(baseline.contains("grid.trace_digest=sha256:"));
    assert!(baseline.contains("digraph.report_digest=sha256:"));

    let alt_cwd = if cfg!(target_os = "windows") {
        "C:\\"
    } else {
        "/tmp"
    };
    let variant_cwd = run_variant(alt_cwd, &[], &[]);
    assert_eq!(
        baseline, variant_cwd,
        "output differs when cwd changes from {root} to {alt_cwd}"
    );

    let variant_locale = run_variant(&root, &[], &[("LC_ALL", "C"), ("LANG", "C")]);
    assert_eq!(baseline, variant_locale, "output differs when LC_ALL=C LANG=C");

    // Verbose logging goes to stderr only.
    let variant_noise = run_variant(
        &root,
        &[],
        &[
            ("RUST_LOG", "trace"),
            ("TZ", "America/New_York"),
            ("HOME", "/nonexistent"),
        ],
    );
    assert_eq!(baseline, variant_noise, "output differs with spurious env vars");
}

#[test]
fn fixture_writes_verifiable_report_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out_dir = dir.path().join("grid_report");
    let out = out_dir.to_string_lossy().to_string();
    let stdout = run_variant(&workspace_root(), &[&out], &[]);
    assert!(stdout.contains("report_dir_written=true"));

    let stored = frontier_harness::report_dir::read_report_dir(&out_dir).expect("verifies");
    let digest_line = stdout
        .lines()
        .find_map(|l| l.strip_prefix("grid.trace_digest="))
        .expect("grid digest line");
    assert_eq!(stored.trace_digest, digest_line);
    assert_eq!(stored.report["outcome"]["cost"], 31);
}
