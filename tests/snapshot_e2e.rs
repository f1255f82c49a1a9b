//! Stop-and-resume through the crawl binary

use similar_asserts::assert_eq;
use std::process::Command;

fn crawl(args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_crawl"))
        .args(args)
        .output()
        .expect("Failed to run crawl binary");
    assert!(
        output.status.success(),
        "crawl {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in stdout")
}

fn final_line(output: &str) -> String {
    output
        .lines()
        .rev()
        .find(|l| l.starts_with("=== "))
        .unwrap_or_default()
        .to_string()
}

#[test]
fn test_resume_matches_uninterrupted_run() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("mid.snapshot");
    let snapshot = snapshot.to_str().unwrap();

    let common = ["--class", "mage", "--controller", "random", "--seed", "31", "-v", "minimal"];

    let mut straight = vec!["play"];
    straight.extend_from_slice(&common);
    let uninterrupted = crawl(&straight);

    let mut first = vec!["play", "--stop-after", "25", "--snapshot-output", snapshot];
    first.extend_from_slice(&common);
    let stopped = crawl(&first);
    assert!(stopped.contains("Snapshot saved"));

    let mut second = vec!["play", "--start-from", snapshot];
    second.extend_from_slice(&common);
    let resumed = crawl(&second);

    assert_eq!(final_line(&uninterrupted), final_line(&resumed));
    assert!(resumed.contains("resumed on level"));
    assert!(!resumed.contains("(seed "));
}

#[test]
fn test_log_tail_prints_only_the_end() {
    let output = crawl(&[
        "play",
        "--class",
        "warrior",
        "--controller",
        "zero",
        "--seed",
        "3",
        "-v",
        "verbose",
        "--log-tail",
        "5",
    ]);

    let lines: Vec<&str> = output.lines().collect();
    assert!(lines[0].contains("LOG LINES ELIDED"));
    assert!(lines.len() <= 6, "got {} lines", lines.len());
    assert!(!final_line(&output).is_empty());
    assert!(!output.contains("Ember Crawl: Warrior on level"));
}

#[test]
fn test_cards_listing() {
    let all = crawl(&["cards"]);
    assert!(all.contains("Fireball"));
    assert!(all.contains("Strike"));

    let warrior = crawl(&["cards", "--class", "warrior"]);
    assert!(warrior.contains("starter deck (18 cards)"));
}
