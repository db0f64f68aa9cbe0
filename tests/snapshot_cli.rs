//! Integration test: `--snapshot` lays out a feed file and prints it.

use std::path::PathBuf;
use std::process::{Command, Output};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/wall_feed.jsonl")
}

/// Run the binary with a throwaway config so logs stay out of the user's state dir.
fn run(name: &str, args: &[&str]) -> Output {
    let dir = std::env::temp_dir().join(format!("mediawall_cli_{name}"));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let config = dir.join("config.toml");
    std::fs::write(
        &config,
        format!("log_file_path = {:?}\n", dir.join("mediawall.log")),
    )
    .expect("write config");

    Command::new(env!("CARGO_BIN_EXE_mediawall"))
        .args(args)
        .env("MEDIAWALL_CONFIG", &config)
        .env_remove("MEDIAWALL_COLUMNS")
        .env_remove("MEDIAWALL_PICKER")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute binary")
}

#[test]
fn snapshot_prints_columns_and_footer() {
    let feed = fixture();
    let output = run(
        "columns",
        &[
            feed.to_str().unwrap(),
            "--snapshot",
            "--columns",
            "2",
            "--width",
            "60",
            "--height",
            "30",
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Media Wall");
    // c1, c3, c5 in the left column; c4 on the right after c2 was removed
    assert!(lines[1].starts_with("┌c1"), "{stdout}");
    assert!(lines[1].contains("┌c4"), "{stdout}");
    assert!(stdout.contains("[photo]"));
    assert!(!stdout.contains("c2"));
    assert!(lines.last().unwrap().starts_with("4 cards in 2 columns"), "{stdout}");
}

#[test]
fn snapshot_auto_fits_to_width() {
    let feed = fixture();
    // 80 cells * 8 px = 640 px → two 300 px columns
    let output = run(
        "auto_fit",
        &[feed.to_str().unwrap(), "--snapshot", "--width", "80", "--height", "40"],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("4 cards in 2 columns"), "{stdout}");
}

#[test]
fn missing_file_fails() {
    let output = run("missing", &["/nonexistent/feed.jsonl", "--snapshot"]);
    assert!(!output.status.success());
}
