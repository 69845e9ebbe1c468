use std::process::Command;

fn run_server(env: &[(&str, &str)]) -> std::process::Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_grocery_tree"));
    command.env_remove("RUST_LOG");
    for (key, value) in env {
        command.env(key, value);
    }
    command.output().expect("spawn server binary")
}

#[test]
fn invalid_port_is_reported_on_stderr() {
    let output = run_server(&[("APP_GENERAL__PORT", "notaport")]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load config"), "stderr was: {stderr}");
}

#[test]
fn failed_validation_is_reported_on_stderr() {
    let output = run_server(&[
        ("APP_DATABASE__URL", "postgres://localhost/groceries"),
        ("APP_DATABASE__MAX_CONNECTIONS", "1"),
        ("APP_DATABASE__MIN_IDLE", "9"),
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load config"), "stderr was: {stderr}");
    assert!(stderr.contains("min_idle"), "stderr was: {stderr}");
}
