use dirdupe::cli::ReportArgs;
use dirdupe::config::Config;
use dirdupe::error::ExitCode;
use dirdupe::run_report;
use dirdupe::scanner::ErrorPolicy;
use std::fs;
use tempfile::tempdir;

fn fixture() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("tree/sub")).unwrap();
    fs::write(dir.path().join("tree/one.txt"), b"dup").unwrap();
    fs::write(dir.path().join("tree/sub/second.txt"), b"dup").unwrap();
    dir
}

#[test]
fn test_report_defaults_to_tree_view() {
    let dir = fixture();
    let args = ReportArgs {
        path: dir.path().join("tree"),
        csv: None,
        depth: None,
    };

    let mut out = Vec::new();
    let code = run_report(&Config::default(), &args, &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(out.starts_with("Scanned tree: 2 files"));
    assert!(out.contains(" tree [6]\n== sub [3]\n"));
}

#[test]
fn test_report_csv_only() {
    let dir = fixture();
    let csv_path = dir.path().join("dups.csv");
    let args = ReportArgs {
        path: dir.path().join("tree"),
        csv: Some(csv_path.clone()),
        depth: None,
    };

    let mut out = Vec::new();
    run_report(&Config::default(), &args, &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(!out.contains("Directory Tree View"));
    assert_eq!(
        fs::read_to_string(&csv_path).unwrap(),
        "name,size,copies\none.txt,3,2\n"
    );
}

#[test]
fn test_report_missing_path_fails() {
    let dir = tempdir().unwrap();
    let args = ReportArgs {
        path: dir.path().join("absent"),
        csv: None,
        depth: Some(1),
    };

    let err = run_report(&Config::default(), &args, &mut Vec::new()).unwrap_err();
    assert!(format!("{err:#}").contains("Path not found"));
}

#[cfg(unix)]
#[test]
fn test_report_with_skipped_entries_is_partial_success() {
    let dir = fixture();
    std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("tree/dangling")).unwrap();
    let args = ReportArgs {
        path: dir.path().join("tree"),
        csv: None,
        depth: Some(0),
    };
    let config = Config {
        on_error: ErrorPolicy::Skip,
        ..Config::default()
    };

    let mut out = Vec::new();
    let code = run_report(&config, &args, &mut out).unwrap();

    assert_eq!(code, ExitCode::PartialSuccess);
    assert!(String::from_utf8(out).unwrap().contains("(1 entries skipped)"));
}
