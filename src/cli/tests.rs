//! Unit tests for CLI parsing and config layering

use crate::cli::{Cli, Commands, ServeArgs};
use clap::Parser;
use std::path::PathBuf;

fn serve_args(argv: &[&str]) -> ServeArgs {
    match Cli::try_parse_from(argv).unwrap().command {
        Commands::Serve(args) => args,
        _ => panic!("Expected Serve command"),
    }
}

#[test]
fn test_serve_defaults() {
    let config = serve_args(&["chainserve", "serve"]).into_config().unwrap();
    assert_eq!(config.bind_addr(), "localhost:8080");
    assert_eq!(config.document_root, PathBuf::from("."));
}

#[test]
fn test_serve_flags_override() {
    let args = serve_args(&[
        "chainserve",
        "serve",
        "--host",
        "0.0.0.0",
        "--port",
        "9000",
        "--root",
        "public",
        "--script-timeout",
        "5",
        "--no-interpreter",
        "--create-samples",
    ]);
    assert!(args.create_samples);
    let config = args.into_config().unwrap();
    assert_eq!(config.bind_addr(), "0.0.0.0:9000");
    assert_eq!(config.document_root, PathBuf::from("public"));
    assert_eq!(config.script_timeout_secs, 5);
    assert_eq!(config.interpreter(), None);
}

#[test]
fn test_flags_override_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chainserve.toml");
    std::fs::write(&path, "port = 7000\nhost = \"127.0.0.1\"\n").unwrap();
    let path_arg = path.to_string_lossy().into_owned();
    let config = serve_args(&["chainserve", "serve", "--config", &path_arg, "--port", "7001"])
        .into_config()
        .unwrap();
    assert_eq!(config.bind_addr(), "127.0.0.1:7001");
}

#[test]
fn test_samples_command() {
    let cli = Cli::try_parse_from(["chainserve", "samples", "--root", "www"]).unwrap();
    match cli.command {
        Commands::Samples { root } => assert_eq!(root, PathBuf::from("www")),
        _ => panic!("Expected Samples command"),
    }
}

#[test]
fn test_invalid_port_rejected() {
    assert!(Cli::try_parse_from(["chainserve", "serve", "--port", "70000"]).is_err());
}
