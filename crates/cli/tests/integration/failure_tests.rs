//! Failure reporting.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn failure_is_annotated_in_pipeline() {
  let env = TestEnv::empty();

  env
    .cmd()
    .env("GITHUB_ACTIONS", "true")
    .arg("--dry-run")
    .assert()
    .failure()
    .code(1)
    .stdout(predicate::str::starts_with("::error::Input required and not supplied"));
}

#[test]
fn unreachable_release_fails_with_prefix() {
  let env = TestEnv::empty();

  env
    .cmd()
    .env("GITHUB_ACTIONS", "true")
    .env("GITHUB_PATH", env.path("path.txt"))
    .env("GITHUB_ENV", env.path("env.txt"))
    .args(["--luarocks-version", "0.0.0-does-not-exist"])
    .env("HTTPS_PROXY", "http://127.0.0.1:9")
    .env("https_proxy", "http://127.0.0.1:9")
    .assert()
    .failure()
    .code(1)
    .stdout(predicate::str::contains("::error::Failed to install LuaRocks:"));

  assert!(!env.path("path.txt").exists());
}
