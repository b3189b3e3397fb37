use std::process::{Command, Output};

fn encode_16mb(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_encode-16mb"))
        .args(args)
        .output()
        .expect("failed to run encode-16mb")
}

#[test]
fn missing_input_is_usage_error() {
    let output = encode_16mb(&["-t", "15"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("-i/--input"));
    assert!(stderr.contains("Usage:"));
}

#[test]
fn unknown_flag_fails() {
    let output = encode_16mb(&["-i", "clip.mov", "--bogus"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--bogus"));
    assert!(stderr.contains("Usage:"));
}

#[test]
fn help_exits_successfully() {
    for flag in ["-h", "--help"] {
        let output = encode_16mb(&[flag]);
        assert_eq!(output.status.code(), Some(0));
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("--target-mb"));
        assert!(stdout.contains("--keep-logs"));
    }
}

#[test]
fn keep_logs_has_no_short_form() {
    let output = encode_16mb(&["-i", "clip.mov", "-k"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage:"));
}

#[test]
fn nonexistent_input_fails() {
    let missing = std::env::temp_dir().join("encode-16mb-cli-does-not-exist.mov");
    let output = encode_16mb(&["-i", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}

#[test]
fn non_positive_target_is_usage_error() {
    let output = encode_16mb(&["-i", "clip.mov", "-t", "0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--target-mb"));
}
