//! Cassette replay integration tests — zero network I/O.
//!
//! All tests set `REMOVEBG_REPLAY` to a cassette file so the binary never
//! contacts remove.bg and needs no API key.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use base64::Engine;
use predicates::prelude::*;

fn cmd(cassette: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("removebg");
    cmd.env("REMOVEBG_REPLAY", cassette)
        .env("REMOVEBG_CONFIG", "/nonexistent/removebg/config.toml")
        .env_remove("REMOVEBG_API_KEY")
        .env_remove("REMOVEBG_REC");
    cmd
}

/// A real 2×2 RGBA PNG, as remove.bg would return.
fn transparent_png() -> Vec<u8> {
    let img = image::DynamicImage::new_rgba8(2, 2);
    let mut buf = std::io::Cursor::new(Vec::<u8>::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn cassette_header() -> &'static str {
    "name: replay-test\nrecorded_at: \"2026-02-01T00:00:00Z\"\ncommit: test\ninteractions:\n  - seq: 0\n    port: background_remover\n    method: remove\n    input: {}\n    output:\n"
}

fn write_ok_cassette(dir: &Path, data: &[u8]) -> PathBuf {
    let b64 = base64::engine::general_purpose::STANDARD.encode(data);
    let path = dir.join("ok.cassette.yaml");
    let yaml = format!("{}      Ok:\n        data: {b64}\n", cassette_header());
    std::fs::write(&path, yaml).unwrap();
    path
}

fn write_err_cassette(dir: &Path, message: &str) -> PathBuf {
    let path = dir.join("err.cassette.yaml");
    std::fs::write(&path, format!("{}      Err: \"{message}\"\n", cassette_header())).unwrap();
    path
}

#[test]
fn default_output_is_transparent_sibling() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("boy2.png");
    std::fs::write(&input, b"original image").unwrap();
    let png = transparent_png();
    let cassette = write_ok_cassette(dir.path(), &png);

    cmd(&cassette)
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved:"))
        .stderr(predicate::str::contains("mv \""));

    let output = dir.path().join("boy2_transparent.png");
    assert_eq!(std::fs::read(&output).unwrap(), png);
    assert_eq!(std::fs::read(&input).unwrap(), b"original image");
}

#[test]
fn explicit_output_receives_bytes_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.jpg");
    std::fs::write(&input, b"jpeg").unwrap();
    let payload = [0u8, 1, 2, 254, 255];
    let cassette = write_ok_cassette(dir.path(), &payload);
    let output = dir.path().join("custom.png");

    cmd(&cassette).arg("--output").arg(&output).arg(&input).assert().success();

    assert_eq!(std::fs::read(&output).unwrap(), payload);
    assert!(!dir.path().join("in_transparent.png").exists());
}

#[test]
fn remote_rejection_exits_nonzero_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    std::fs::write(&input, b"png").unwrap();
    let cassette =
        write_err_cassette(dir.path(), "remove.bg rejected the request (403): invalid key");

    cmd(&cassette)
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("(403): invalid key"))
        .stderr(predicate::str::contains("Background removal failed"));

    assert!(!dir.path().join("in_transparent.png").exists());
}

#[test]
fn missing_input_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let cassette = write_ok_cassette(dir.path(), b"unused");

    cmd(&cassette)
        .arg(dir.path().join("missing.png"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn missing_cassette_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    std::fs::write(&input, b"png").unwrap();

    cmd(&dir.path().join("absent.cassette.yaml"))
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load cassette"));
}

#[test]
fn dot_slash_output_cannot_overwrite_input() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("boy2.png"), b"ORIGINAL").unwrap();
    let cassette = write_ok_cassette(dir.path(), b"PROCESSED");

    cmd(&cassette)
        .current_dir(dir.path())
        .args(["--output", "./boy2.png", "boy2.png"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("same file as input"))
        .stderr(predicate::str::contains("Saved:").not());

    assert_eq!(std::fs::read(dir.path().join("boy2.png")).unwrap(), b"ORIGINAL");
}

#[test]
fn absolute_output_cannot_overwrite_relative_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("boy2.png");
    std::fs::write(&input, b"ORIGINAL").unwrap();
    let cassette = write_ok_cassette(dir.path(), b"PROCESSED");
    let absolute = input.canonicalize().unwrap();

    cmd(&cassette)
        .current_dir(dir.path())
        .arg("--output")
        .arg(&absolute)
        .arg("boy2.png")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("same file as input"));

    assert_eq!(std::fs::read(&input).unwrap(), b"ORIGINAL");
}
