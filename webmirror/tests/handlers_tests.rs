use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use webmirror::commands::{DEFAULT_OUTPUT_DIR, command_argument_builder};
use webmirror::handlers::*;
use webmirror_core::report::ReportFormat;
use webmirror_scanner::{LinkScan, VisitPolicy};

fn parse(args: &[&str]) -> clap::ArgMatches {
    command_argument_builder()
        .try_get_matches_from(std::iter::once("webmirror").chain(args.iter().copied()))
        .unwrap()
}

#[test]
fn test_resolve_output_dir_relative() {
    let dir = resolve_output_dir("mirror", Path::new("/work"));
    assert_eq!(dir, PathBuf::from("/work/mirror"));
}

#[test]
fn test_resolve_output_dir_absolute() {
    let dir = resolve_output_dir("/srv/out", Path::new("/work"));
    assert_eq!(dir, PathBuf::from("/srv/out"));
}

#[test]
fn test_resolve_output_dir_expands_tilde() {
    let dir = resolve_output_dir("~/mirror", Path::new("/work"));
    assert!(!dir.to_string_lossy().contains('~'));
    assert!(dir.ends_with("mirror"));
}

#[test]
fn test_prepare_output_dir_creates_directory() -> Result<(), Box<dyn std::error::Error>> {
    let cwd = TempDir::new()?;
    let dir = prepare_output_dir("nested/out", cwd.path())?;

    assert!(dir.is_dir());
    assert_eq!(dir, cwd.path().join("nested/out"));

    // Existing directories are reused
    let again = prepare_output_dir("nested/out", cwd.path())?;
    assert_eq!(again, dir);
    Ok(())
}

#[test]
fn test_prepare_output_dir_fails_on_file() {
    let cwd = TempDir::new().unwrap();
    std::fs::write(cwd.path().join("taken"), b"x").unwrap();

    let result = prepare_output_dir("taken", cwd.path());

    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("Failed to create output directory"));
}

#[test]
fn test_defaults() {
    let matches = parse(&["http://example.com/index"]);
    let options = build_mirror_options(&matches, PathBuf::from("/tmp/out")).unwrap();

    assert_eq!(options.url, "http://example.com/index");
    assert_eq!(options.max_depth, 0);
    assert_eq!(options.threads, 10);
    assert_eq!(options.visit_policy, VisitPolicy::Revisit);
    assert_eq!(options.link_scan, LinkScan::Raw);
    assert!(options.timeout.is_none());
    assert!(options.show_progress_bars);
    assert_eq!(
        matches.get_one::<String>("output").map(String::as_str),
        Some(DEFAULT_OUTPUT_DIR)
    );
    assert_eq!(report_format(&matches), ReportFormat::Text);
}

#[test]
fn test_all_flags() {
    let matches = parse(&[
        "-d", "3", "-t", "2", "--timeout", "5", "--dedupe", "--markup", "-q", "-f", "json",
        "-o", "site", "https://example.com/",
    ]);
    let options = build_mirror_options(&matches, PathBuf::from("/tmp/site")).unwrap();

    assert_eq!(options.max_depth, 3);
    assert_eq!(options.threads, 2);
    assert_eq!(options.timeout, Some(Duration::from_secs(5)));
    assert_eq!(options.visit_policy, VisitPolicy::SkipSeen);
    assert_eq!(options.link_scan, LinkScan::Markup);
    assert!(!options.show_progress_bars);
    assert_eq!(options.output_dir, PathBuf::from("/tmp/site"));
    assert_eq!(report_format(&matches), ReportFormat::Json);
}

#[test]
fn test_url_is_required() {
    let result = command_argument_builder().try_get_matches_from(["webmirror", "-d", "1"]);
    assert!(result.is_err());
}

#[test]
fn test_invalid_url_rejected() {
    let result = command_argument_builder().try_get_matches_from(["webmirror", "not a url"]);
    assert!(result.is_err());
}

#[test]
fn test_negative_depth_rejected() {
    let result =
        command_argument_builder().try_get_matches_from(["webmirror", "-d", "-1", "http://x.test/"]);
    assert!(result.is_err());
}

#[test]
fn test_zero_threads_rejected() {
    let result =
        command_argument_builder().try_get_matches_from(["webmirror", "-t", "0", "http://x.test/"]);
    assert!(result.is_err());
}

#[test]
fn test_unknown_format_rejected() {
    let result = command_argument_builder()
        .try_get_matches_from(["webmirror", "-f", "csv", "http://x.test/"]);
    assert!(result.is_err());
}
