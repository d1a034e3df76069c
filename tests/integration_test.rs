use std::cell::RefCell;
use std::fs;

use kuka_log_parser::parser::format_local_timestamp;
use kuka_log_parser::viewer::ConsoleViewer;
use kuka_log_parser::{notify::Notifier, ParserConfig, Pipeline, RunOutcome};
use tempfile::tempdir;

#[derive(Default)]
struct Recorder {
    titles: RefCell<Vec<String>>,
}

impl Notifier for Recorder {
    fn error(&self, title: &str, _message: &str) {
        self.titles.borrow_mut().push(title.to_string());
    }

    fn info(&self, title: &str, _message: &str) {
        self.titles.borrow_mut().push(title.to_string());
    }
}

#[test]
fn test_end_to_end_controller_log() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("SliderData_20240101_120000.csv");
    fs::write(&input, "TS_A_B\n1000_1_2\n2500_3,14_4\n").unwrap();

    let config = ParserConfig::default();
    let mut viewer = ConsoleViewer::new(Vec::new(), &config.viewer);
    let notifier = Recorder::default();

    let outcome = Pipeline::new(&config, &mut viewer, &notifier).run(&input, None);

    let output = dir.path().join("SliderData_20240101_120000_parsed.txt");
    assert!(matches!(outcome, RunOutcome::Saved(ref s) if s.path == output && s.rows_written == 2));
    assert_eq!(*notifier.titles.borrow(), vec!["Success".to_string()]);

    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Timestamp\tCumulative_Time_s\tA\tB");
    assert_eq!(
        lines[1],
        format!("{}\t0.000\t1\t2", format_local_timestamp(1000).unwrap())
    );
    assert_eq!(
        lines[2],
        format!("{}\t1.500\t3.14\t4", format_local_timestamp(2500).unwrap())
    );

    // The viewer saw the unnormalized values
    let shown = String::from_utf8(viewer.into_inner()).unwrap();
    assert!(shown.contains("3,14"));
    assert!(shown.contains("Cumulative Time s"));
    assert!(shown.ends_with("2 rows\n"));
}

#[test]
fn test_header_only_file_still_written() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("empty_run.txt");
    fs::write(&input, "TS_A_B\n").unwrap();

    let config = ParserConfig::default();
    let mut viewer = ConsoleViewer::new(Vec::new(), &config.viewer);
    let notifier = Recorder::default();

    let outcome = Pipeline::new(&config, &mut viewer, &notifier).run(&input, None);
    assert!(matches!(outcome, RunOutcome::Saved(ref s) if s.rows_written == 0));

    let written = fs::read_to_string(dir.path().join("empty_run_parsed.txt")).unwrap();
    assert_eq!(written, "Timestamp\tCumulative_Time_s\tA\tB\r\n");

    let shown = String::from_utf8(viewer.into_inner()).unwrap();
    assert!(shown.ends_with("0 rows\n"));
}

#[test]
fn test_invalid_timestamp_produces_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.csv");
    fs::write(&input, "TS_A_B\nabc_1_2\n").unwrap();

    let config = ParserConfig::default();
    let mut viewer = ConsoleViewer::new(Vec::new(), &config.viewer);
    let notifier = Recorder::default();

    let outcome = Pipeline::new(&config, &mut viewer, &notifier).run(&input, None);
    assert_eq!(outcome, RunOutcome::ParseFailed);
    assert_eq!(*notifier.titles.borrow(), vec!["File Error".to_string()]);
    assert!(viewer.into_inner().is_empty());
    assert!(!dir.path().join("broken_parsed.txt").exists());
}
