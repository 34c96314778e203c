//! Dry-run output.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
#[cfg(unix)]
fn plan_release_build_steps() {
  let env = TestEnv::empty();

  env
    .cmd()
    .args(["--luarocks-version", "3.9.2", "--dry-run"])
    .assert()
    .success()
    .stdout(predicate::str::contains("https://luarocks.org/releases/luarocks-3.9.2.tar.gz"))
    .stdout(predicate::str::contains("configure"))
    .stdout(predicate::str::contains("make install"))
    .stdout(predicate::str::contains("make build").not());
}

#[test]
#[cfg(unix)]
fn plan_legacy_release_adds_make_build() {
  let env = TestEnv::empty();

  env
    .cmd()
    .args(["--luarocks-version", "2.4.4", "--dry-run"])
    .assert()
    .success()
    .stdout(predicate::str::contains("make build"));
}

#[test]
#[cfg(unix)]
fn plan_bare_sigil_uses_default_branch() {
  let env = TestEnv::empty();

  env
    .cmd()
    .args(["--luarocks-version", "@", "--dry-run"])
    .assert()
    .success()
    .stdout(predicate::str::contains("https://github.com/luarocks/luarocks/archive/master.tar.gz"));
}

#[test]
#[cfg(windows)]
fn plan_windows_uses_release_zip() {
  let env = TestEnv::empty();

  env
    .cmd()
    .args(["--luarocks-version", "3.9.2", "--dry-run"])
    .assert()
    .success()
    .stdout(predicate::str::contains("luarocks-3.9.2-windows-64.zip"));
}

#[test]
fn plan_scratch_dir_under_runner_temp() {
  let env = TestEnv::empty();
  let build_dir = env.temp_root().join(".build-luarocks");

  env
    .cmd()
    .args(["--luarocks-version", "3.9.2", "--dry-run"])
    .assert()
    .success()
    .stdout(predicate::str::contains(build_dir.display().to_string()));

  assert!(!build_dir.exists(), "dry run must not create the build dir");
}

#[test]
fn plan_json_output() {
  let env = TestEnv::empty();

  let output = env
    .cmd()
    .args(["--luarocks-version", "3.9.2", "--dry-run", "--format", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(plan["version"]["kind"], "release");
  assert_eq!(plan["version"]["name"], "3.9.2");
  assert!(plan["steps"].as_array().is_some_and(|s| !s.is_empty()));
  assert!(plan["paths"]["install_prefix"]
    .as_str()
    .is_some_and(|p| p.ends_with(".luarocks")));
}
