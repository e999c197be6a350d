use clap::Parser;
use dupefind::cli::Cli;
use dupefind::duplicates::FinderError;
use dupefind::error::ExitCode;
use std::fs;
use tempfile::tempdir;

fn run(args: &[&str]) -> (anyhow::Result<ExitCode>, String) {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    let result = dupefind::run_with_output(cli, &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_report_lists_duplicates_then_done() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();
    fs::write(dir.path().join("b.txt"), "hello").unwrap();
    fs::write(dir.path().join("c.txt"), "world").unwrap();
    fs::write(dir.path().join("empty.txt"), "").unwrap();

    let root = dir.path().to_str().unwrap();
    let (result, stdout) = run(&["dupefind", "-q", root]);

    assert_eq!(result.unwrap(), ExitCode::Success);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("Duplicate files found for 5:"));
    assert!(lines[0].ends_with(':'));
    assert_eq!(lines[1], format!("  {}", dir.path().join("a.txt").display()));
    assert_eq!(lines[2], format!("  {}", dir.path().join("b.txt").display()));
    assert_eq!(lines[3], "");
    assert_eq!(lines[4], "Done.");
    assert!(!stdout.contains("c.txt"));
    assert!(!stdout.contains("empty.txt"));
}

#[test]
fn test_report_without_duplicates() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("only.txt"), "alone").unwrap();

    let root = dir.path().to_str().unwrap();
    let (result, stdout) = run(&["dupefind", "-q", root]);

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert_eq!(stdout, "\nDone.\n");
}

#[test]
fn test_groups_printed_in_completion_order() {
    let dir = tempdir().unwrap();
    // Sorted walk order: a1, b1, b2, c1 -> group "b" completes before "a"
    fs::write(dir.path().join("a1.txt"), "first group").unwrap();
    fs::write(dir.path().join("b1.txt"), "second").unwrap();
    fs::write(dir.path().join("b2.txt"), "second").unwrap();
    fs::write(dir.path().join("c1.txt"), "first group").unwrap();

    let root = dir.path().to_str().unwrap();
    let (_, stdout) = run(&["dupefind", "-q", "--progress-interval", "1", root]);

    let b_pos = stdout.find("b1.txt").unwrap();
    let a_pos = stdout.find("a1.txt").unwrap();
    assert!(b_pos < a_pos);
    assert_eq!(stdout.matches("Duplicate files found for").count(), 2);
}

#[test]
fn test_missing_root_is_fatal_and_prints_nothing() {
    let (result, stdout) = run(&["dupefind", "-q", "/non/existent/path/12345"]);

    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FinderError>(),
        Some(FinderError::Path(_))
    ));
    assert!(stdout.is_empty());
}
