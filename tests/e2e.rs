/// End-to-end tests: run the `lockbench` binary against fixture results
/// files and check the charts, report and exit status it produces.
mod common;

use common::*;
use std::fs;

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn plot_only_writes_three_charts_and_report() {
    let dir = bench_dir(ALL_ARTIFACTS);
    let out = dir.path().join("charts");
    let output = lockbench(&[
        "--plot-only",
        "--work-dir",
        &path_arg(dir.path()),
        "--results-dir",
        &path_arg(dir.path()),
        "--out-dir",
        &path_arg(&out),
        "--seed",
        "5",
    ]);
    assert!(output.status.success(), "stderr={}", stderr(&output));

    let names: Vec<String> = svg_files(&out)
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        ["decryption-time.svg", "encryption-time.svg", "file-size.svg"]
    );

    let enc = fs::read_to_string(out.join("encryption-time.svg")).unwrap();
    assert!(enc.contains("gpgtar (0.800s)"));
    assert!(enc.contains("safelock --sha256 (1.200s)"));
    let size = fs::read_to_string(out.join("file-size.svg")).unwrap();
    assert!(size.contains("safelock --sha256 (3MB)"));
    assert!(size.contains("Megabytes"));

    let report = fs::read_to_string(out.join("results.md")).unwrap();
    assert!(report.contains("### Encryption Time"));
    assert!(report.contains("| 1 | **safelock** | **0.300s** | 1.00x |"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 4);
}

#[test]
fn explicit_results_files_are_used() {
    let dir = bench_dir(ALL_ARTIFACTS);
    let moved = dir.path().join("elsewhere");
    fs::create_dir(&moved).unwrap();
    fs::rename(
        dir.path().join("encryption.json"),
        moved.join("enc.json"),
    )
    .unwrap();
    let out = dir.path().join("charts");
    let output = lockbench(&[
        "--plot-only",
        "--work-dir",
        &path_arg(dir.path()),
        "--results-dir",
        &path_arg(dir.path()),
        "--encryption-json",
        &path_arg(&moved.join("enc.json")),
        "--out-dir",
        &path_arg(&out),
    ]);
    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert_eq!(svg_files(&out).len(), 3);
}

#[test]
fn missing_artifact_aborts_without_charts() {
    let dir = bench_dir(&[("test.sla", 100), ("test.gpg", 100)]);
    let out = dir.path().join("charts");
    let output = lockbench(&[
        "--plot-only",
        "--work-dir",
        &path_arg(dir.path()),
        "--results-dir",
        &path_arg(dir.path()),
        "--out-dir",
        &path_arg(&out),
    ]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("missing artifact for safelock --sha256"), "{err}");
    assert!(err.contains("test_sha256.sla"), "{err}");
    assert!(svg_files(&out).is_empty());
    assert!(!out.join("results.md").exists());
}

#[test]
fn unclassifiable_command_aborts() {
    let dir = bench_dir(ALL_ARTIFACTS);
    fs::write(
        dir.path().join("decryption.json"),
        results_json(&[Run {
            command: "unzip -P 123456789 test.zip",
            median: 0.5,
        }]),
    )
    .unwrap();
    let out = dir.path().join("charts");
    let output = lockbench(&[
        "--plot-only",
        "--work-dir",
        &path_arg(dir.path()),
        "--results-dir",
        &path_arg(dir.path()),
        "--out-dir",
        &path_arg(&out),
    ]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no tool identity matches"));
    assert!(svg_files(&out).is_empty());
}

#[test]
fn malformed_results_file_is_rejected() {
    let dir = bench_dir(ALL_ARTIFACTS);
    fs::write(dir.path().join("encryption.json"), r#"{"benchmarks": []}"#).unwrap();
    let output = lockbench(&[
        "--plot-only",
        "--work-dir",
        &path_arg(dir.path()),
        "--results-dir",
        &path_arg(dir.path()),
        "--out-dir",
        &path_arg(dir.path()),
    ]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("malformed results file"));
}

#[test]
fn dry_run_prints_the_matrix() {
    let output = lockbench(&["--dry-run", "--rest", "5s"]);
    assert!(output.status.success(), "stderr={}", stderr(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("# encryption"));
    assert!(stdout.contains("# prepare: sleep 5s"));
    assert!(stdout.contains(ENCRYPT_SHA256));
    assert!(stdout.contains("# prepare: rm -rf safelock_dump && mkdir safelock_dump && sleep 5s"));
    assert_eq!(stdout.lines().filter(|l| l.contains("gpgtar")).count(), 2);
}

#[test]
fn config_file_selects_tools() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("lockbench.toml");
    fs::write(
        &config,
        "[matrix]\ntools = [\"safelock\", \"7z\"]\npassphrase = \"hunter2\"\n",
    )
    .unwrap();
    let output = lockbench(&["--dry-run", "--config", &path_arg(&config)]);
    assert!(output.status.success(), "stderr={}", stderr(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("7z a -phunter2 -mhe=on -y test.7z test"));
    assert!(!stdout.contains("gpgtar"));
}

#[test]
fn passphrase_that_relabels_tools_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("lockbench.toml");
    fs::write(&config, "[matrix]\npassphrase = \"gpg-sha256\"\n").unwrap();
    let output = lockbench(&["--dry-run", "--config", &path_arg(&config)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let err = stderr(&output);
    assert!(err.contains("benchmarked as safelock but classifies as gpgtar"), "{err}");
}

#[cfg(unix)]
#[test]
fn harness_failure_exit_status_is_propagated() {
    use std::os::unix::fs::PermissionsExt;

    let dir = bench_dir(ALL_ARTIFACTS);
    let fake = dir.path().join("fake-hyperfine");
    fs::write(&fake, "#!/bin/sh\nexit 7\n").unwrap();
    fs::set_permissions(&fake, fs::Permissions::from_mode(0o755)).unwrap();

    let config = dir.path().join("lockbench.toml");
    fs::write(
        &config,
        format!("[harness]\nprogram = {:?}\n", path_arg(&fake)),
    )
    .unwrap();

    let out = dir.path().join("charts");
    let output = lockbench(&[
        "--config",
        &path_arg(&config),
        "--work-dir",
        &path_arg(dir.path()),
        "--results-dir",
        &path_arg(dir.path()),
        "--out-dir",
        &path_arg(&out),
    ]);
    assert_eq!(output.status.code(), Some(7), "stderr={}", stderr(&output));
    assert!(stderr(&output).contains("encryption benchmark failed with exit status 7"));
    assert!(svg_files(&out).is_empty());
}
