//! CLI tests for the `build-and-deploy` binary.
//!
//! Spawns the binary and verifies it refuses to run outside `engine/src`
//! before touching anything.

use std::process::Command;

use engine_deploy::exit_codes;

#[test]
fn wrong_directory_exits_with_dedicated_code() {
    let temp = tempfile::tempdir().expect("tempdir");
    let cwd = temp.path().join("engine");
    std::fs::create_dir_all(&cwd).expect("mkdir");

    let output = Command::new(env!("CARGO_BIN_EXE_build-and-deploy"))
        .current_dir(&cwd)
        .output()
        .expect("build-and-deploy");

    assert_eq!(output.status.code(), Some(exit_codes::WRONG_WORKING_DIRECTORY));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("engine/src"), "{stderr}");
    assert!(!cwd.join("deploy").exists());
}

#[test]
fn version_works_from_any_directory() {
    let temp = tempfile::tempdir().expect("tempdir");

    let status = Command::new(env!("CARGO_BIN_EXE_build-and-deploy"))
        .current_dir(temp.path())
        .arg("--version")
        .status()
        .expect("build-and-deploy --version");

    assert_eq!(status.code(), Some(exit_codes::OK));
}
