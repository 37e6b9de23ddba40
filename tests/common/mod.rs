/// Shared fixtures for the integration tests: hyperfine-shaped results
/// files and fake encryption artifacts in a temporary benchmark directory.
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub struct Run<'a> {
    pub command: &'a str,
    pub median: f64,
}

/// Serialize runs the way `hyperfine --export-json` lays them out.
pub fn results_json(runs: &[Run<'_>]) -> String {
    let results: Vec<serde_json::Value> = runs
        .iter()
        .map(|r| {
            serde_json::json!({
                "command": r.command,
                "mean": r.median,
                "stddev": 0.01,
                "median": r.median,
                "user": r.median * 0.8,
                "system": r.median * 0.2,
                "min": r.median,
                "max": r.median,
                "times": [r.median, r.median, r.median],
                "exit_codes": [0, 0, 0],
            })
        })
        .collect();
    serde_json::json!({ "results": results }).to_string()
}

pub const ENCRYPT_SLA: &str = r#"echo "123456789" | safelock-cli encrypt test test.sla --quiet"#;
pub const ENCRYPT_SHA256: &str =
    r#"echo "123456789" | safelock-cli encrypt test test_sha256.sla --quiet --sha256"#;
pub const ENCRYPT_GPG: &str =
    r#"gpgtar -e -o test.gpg -c --yes --batch --gpg-args "--passphrase 123456789" test"#;
pub const DECRYPT_SLA: &str =
    r#"echo "123456789" | safelock-cli decrypt test.sla safelock_dump --quiet"#;
pub const DECRYPT_SHA256: &str =
    r#"echo "123456789" | safelock-cli decrypt test_sha256.sla safelock_dump --quiet --sha256"#;
pub const DECRYPT_GPG: &str =
    r#"gpgtar -d --yes --batch --gpg-args "--passphrase 123456789" test.gpg"#;

/// Write `encryption.json`, `decryption.json` and the named artifacts.
pub fn bench_dir(artifacts: &[(&str, usize)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("encryption.json"),
        results_json(&[
            Run {
                command: ENCRYPT_SHA256,
                median: 1.2,
            },
            Run {
                command: ENCRYPT_GPG,
                median: 0.8,
            },
            Run {
                command: ENCRYPT_SLA,
                median: 1.0,
            },
        ]),
    )
    .unwrap();
    fs::write(
        dir.path().join("decryption.json"),
        results_json(&[
            Run {
                command: DECRYPT_GPG,
                median: 0.9,
            },
            Run {
                command: DECRYPT_SLA,
                median: 0.3,
            },
            Run {
                command: DECRYPT_SHA256,
                median: 0.4,
            },
        ]),
    )
    .unwrap();
    for (name, len) in artifacts {
        fs::write(dir.path().join(name), vec![7u8; *len]).unwrap();
    }
    dir
}

pub const ALL_ARTIFACTS: &[(&str, usize)] = &[
    ("test.sla", 2 * 1024 * 1024),
    ("test_sha256.sla", 3 * 1024 * 1024),
    ("test.gpg", 1024 * 1024),
];

/// Run the `lockbench` binary with `args`.
pub fn lockbench(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lockbench"))
        .args(args)
        .env("RUST_LOG", "lockbench=warn")
        .output()
        .expect("failed to run lockbench")
}

pub fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

pub fn svg_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "svg"))
        .collect();
    files.sort();
    files
}
