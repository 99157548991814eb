use std::process::Command;

fn kubed() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_kubed"));
    cmd.env_remove("KUBED_HOME").env_remove("KUBED_FORCE_YES");
    cmd
}

#[test]
fn test_completions_path_without_shell_fails_on_stderr() {
    let out = kubed()
        .env_remove("SHELL")
        .arg("completions-path")
        .output()
        .expect("failed to run kubed completions-path");

    assert!(
        !out.status.success(),
        "completions-path succeeded without SHELL:\nstdout:\n{}",
        String::from_utf8_lossy(&out.stdout)
    );
    assert!(out.stdout.is_empty(), "nothing should be printed on stdout");
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(
        err.contains("Could not determine shell or completions directory"),
        "unexpected stderr:\n{}",
        err
    );
}

#[test]
fn test_completions_path_for_fish() {
    let home = tempfile::tempdir().unwrap();
    let out = kubed()
        .env("SHELL", "/usr/bin/fish")
        .env("HOME", home.path())
        .env("KUBED_HOME", home.path().join("kubed"))
        .arg("completions-path")
        .output()
        .expect("failed to run kubed completions-path");

    assert!(out.status.success(), "stderr:\n{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        String::from_utf8_lossy(&out.stdout).trim_end(),
        home.path().join("kubed/completions/fish").display().to_string()
    );
}

#[test]
fn test_aliases_path_prints_only_the_path() {
    let home = tempfile::tempdir().unwrap();
    let out = kubed()
        .env("HOME", home.path())
        .env("KUBED_HOME", home.path().join("kubed"))
        .args(["aliases-path", "--debug"])
        .output()
        .expect("failed to run kubed aliases-path");

    assert!(out.status.success(), "stderr:\n{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        format!("{}\n", home.path().join("kubed/aliases").display())
    );
}
