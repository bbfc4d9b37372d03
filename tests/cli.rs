use std::{io::Write, process::Command};

use tempfile::NamedTempFile;

fn fixture(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn run(file: &NamedTempFile, chunks: &str) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_weather-stats"))
        .arg(file.path())
        .arg(chunks)
        .output()
        .unwrap()
}

#[test]
fn prints_one_summary_line() {
    let file = fixture("Zurich;10.0\nAmman;30.0\nBosaso;20.0\nBosaso;-15.0\nBosaso;-1.0\n");
    for chunks in ["1", "3", "not-a-number"] {
        let output = run(&file, chunks);
        assert!(output.status.success(), "{chunks}");
        assert_eq!(
            String::from_utf8(output.stdout).unwrap(),
            "{Amman=30.0/30.0/30.0, Bosaso=-15.0/1.3/20.0, Zurich=10.0/10.0/10.0}\n"
        );
    }
}

#[test]
fn bad_line_exits_non_zero_with_empty_stdout() {
    let mut content = "Amman;30.0\n".repeat(500);
    content.push_str("Zurich 10.0\n");
    content.push_str(&"Kunming;19.8\n".repeat(500));
    let file = fixture(&content);
    for chunks in ["1", "2", "7", "64"] {
        let output = run(&file, chunks);
        assert!(!output.status.success(), "{chunks}");
        assert!(output.stdout.is_empty(), "{chunks}");
        assert!(!output.stderr.is_empty(), "{chunks}");
    }
}

#[test]
fn missing_file_exits_non_zero() {
    let output = Command::new(env!("CARGO_BIN_EXE_weather-stats"))
        .arg("/nonexistent/measurements.txt")
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn chunk_count_far_above_cpu_count() {
    let file = fixture("Kunming;19.8\n");
    let output = run(&file, "20000");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"{Kunming=19.8/19.8/19.8}\n");
}
