//! Input handling: flags, pipeline inputs and their precedence.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn help_lists_inputs() {
  let env = TestEnv::empty();

  env
    .cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("--luarocks-version"))
    .stdout(predicate::str::contains("--with-lua-path"))
    .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn missing_version_fails() {
  let env = TestEnv::empty();

  env
    .cmd()
    .arg("--dry-run")
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("Input required and not supplied: luaRocksVersion"));
}

#[test]
fn blank_version_input_counts_as_missing() {
  let env = TestEnv::empty();

  env
    .cmd()
    .env("INPUT_LUAROCKSVERSION", "   ")
    .arg("--dry-run")
    .assert()
    .failure()
    .stderr(predicate::str::contains("luaRocksVersion"));
}

#[test]
fn version_read_from_pipeline_input() {
  let env = TestEnv::empty();

  env
    .cmd()
    .env("INPUT_LUAROCKSVERSION", "3.9.2")
    .arg("--dry-run")
    .assert()
    .success()
    .stdout(predicate::str::contains("LuaRocks 3.9.2"));
}

#[test]
fn flag_overrides_pipeline_input() {
  let env = TestEnv::empty();

  env
    .cmd()
    .env("INPUT_LUAROCKSVERSION", "3.8.0")
    .args(["--luarocks-version", "3.11.1", "--dry-run"])
    .assert()
    .success()
    .stdout(predicate::str::contains("LuaRocks 3.11.1"))
    .stdout(predicate::str::contains("3.8.0").not());
}

#[test]
fn lua_path_input_sets_lua_prefix() {
  let env = TestEnv::empty();
  let lua = env.path("opt/lua");

  env
    .cmd()
    .env("INPUT_WITHLUAPATH", &lua)
    .args(["--luarocks-version", "3.9.2", "--dry-run"])
    .assert()
    .success()
    .stdout(predicate::str::contains(lua.display().to_string()));
}

#[test]
#[cfg(unix)]
fn padded_sigil_is_a_ref() {
  let env = TestEnv::empty();

  env
    .cmd()
    .args(["--luarocks-version", "  @  ", "--dry-run"])
    .assert()
    .success()
    .stdout(predicate::str::contains("archive/master.tar.gz"));
}
