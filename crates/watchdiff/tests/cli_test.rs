use std::io::{BufRead, BufReader};
use std::process::{Child, ChildStdout, Command, Stdio};

struct WatchProcess {
    child: Child,
    stdout: BufReader<ChildStdout>,
}

impl WatchProcess {
    fn start(args: &[&str]) -> Self {
        let mut child = Command::new(env!("CARGO_BIN_EXE_watchdiff"))
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("Failed to start watchdiff");
        let stdout = BufReader::new(child.stdout.take().expect("stdout is piped"));
        Self { child, stdout }
    }

    fn next_line(&mut self) -> String {
        let mut line = String::new();
        let n = self
            .stdout
            .read_line(&mut line)
            .expect("Failed to read watchdiff output");
        assert!(n > 0, "watchdiff exited early");
        line.trim_end_matches('\n').to_string()
    }
}

impl Drop for WatchProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[test]
fn test_counter_reports_diff() {
    let dir = tempfile::tempdir().unwrap();
    let counter = dir.path().join("counter");
    let script = format!(
        "n=$(cat {path} 2>/dev/null || echo 0); n=$((n+5)); echo $n > {path}; echo value $n",
        path = counter.display()
    );

    let mut watch = WatchProcess::start(&["-n", "0.1", script.as_str()]);
    assert_eq!(watch.next_line(), "value 5");

    let second = watch.next_line();
    assert!(
        second.starts_with("value 10 (diff=5, diff/s="),
        "unexpected line: {second}"
    );
    assert!(second.ends_with(')'), "unexpected line: {second}");
}

#[test]
fn test_exec_mode_keeps_arguments_intact() {
    let mut watch = WatchProcess::start(&["-n", "0.1", "-x", "echo", "a  b", "7"]);
    assert_eq!(watch.next_line(), "a  b 7");
    assert_eq!(watch.next_line(), "a  b 7 (diff=0, diff/s=0.00)");
}

#[test]
fn test_shell_mode_word_splits() {
    let mut watch = WatchProcess::start(&["-n", "0.1", "echo", "a  b", "7"]);
    assert_eq!(watch.next_line(), "a b 7");
}

#[test]
fn test_text_output_passes_through() {
    let mut watch = WatchProcess::start(&["-n", "0.1", "echo no numbers here"]);
    assert_eq!(watch.next_line(), "no numbers here");
    assert_eq!(watch.next_line(), "no numbers here");
}

#[test]
fn test_failing_command_keeps_running() {
    let mut watch =
        WatchProcess::start(&["-n", "0.1", "-x", "definitely-not-a-real-program-4711"]);
    assert_eq!(watch.next_line(), "");
    assert_eq!(watch.next_line(), "");
}

#[test]
fn test_missing_command_exits_with_usage() {
    let output = Command::new(env!("CARGO_BIN_EXE_watchdiff"))
        .args(["-n", "1"])
        .output()
        .expect("Failed to run watchdiff");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr: {stderr}");
}

#[test]
fn test_non_finite_interval_exits() {
    let output = Command::new(env!("CARGO_BIN_EXE_watchdiff"))
        .args(["-n", "inf", "true"])
        .output()
        .expect("Failed to run watchdiff");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}
