use std::fs;
use std::process::Command;

const EXE: &str = env!("CARGO_BIN_EXE_chainserve");

#[test]
fn test_cli_samples_creates_files() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("public");
    let status = Command::new(EXE)
        .arg("samples")
        .arg("--root")
        .arg(&root)
        .status()
        .expect("run cli");
    assert!(status.success());
    for name in ["index.html", "time.py", "info.py"] {
        assert!(root.join(name).is_file(), "{name} missing");
    }
}

#[test]
fn test_cli_samples_keeps_existing_index() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), "custom").unwrap();
    let status = Command::new(EXE)
        .args(["samples", "--root"])
        .arg(dir.path())
        .status()
        .expect("run cli");
    assert!(status.success());
    assert_eq!(fs::read_to_string(dir.path().join("index.html")).unwrap(), "custom");
}

#[test]
fn test_cli_serve_rejects_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(EXE)
        .args(["serve", "--port", "0", "--root"])
        .arg(dir.path().join("does-not-exist"))
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("document root"), "stderr: {stderr}");
}

#[test]
fn test_cli_serve_rejects_bad_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("chainserve.toml");
    fs::write(&config, "port = \"not a number\"\n").unwrap();
    let output = Command::new(EXE)
        .args(["serve", "--config"])
        .arg(&config)
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to parse config"), "stderr: {stderr}");
}
