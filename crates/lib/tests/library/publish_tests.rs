//! Applying a run's environment patch to the pipeline files.

use serial_test::serial;
use setup_luarocks_lib::config::Toolchain;
use setup_luarocks_lib::env::{GithubEnvSink, ShellEnvSink};
use setup_luarocks_lib::platform::Os;
use setup_luarocks_lib::setup::run;
use setup_luarocks_lib::util::testutil::FakeHost;

use super::common::TestEnv;

fn host() -> FakeHost {
  FakeHost::new()
    .respond("luarocks path --lr-bin", "/home/runner/.luarocks/bin")
    .respond("luarocks path --lr-path", "/rocks/share/?.lua;/rocks/share/?/init.lua")
    .respond("luarocks path --lr-cpath", "/rocks/lib/?.so")
}

#[tokio::test]
async fn patch_reaches_github_files() {
  let env = TestEnv::new();
  let patch = run(&host(), &env.config("3.9.2", Os::Unix, Toolchain::MinGw))
    .await
    .unwrap();

  let mut sink = GithubEnvSink::new(env.temp.path().join("github_path"), env.temp.path().join("github_env"));
  patch.apply(&mut sink).unwrap();

  assert_eq!(
    env.read("github_path"),
    format!("{}\n/home/runner/.luarocks/bin\n", env.cwd().join(".luarocks").join("bin").display())
  );
  assert_eq!(
    env.read("github_env"),
    "LUA_CPATH=;;/rocks/lib/?.so\nLUA_PATH=;;/rocks/share/?.lua;/rocks/share/?/init.lua\n"
  );
}

#[tokio::test]
async fn patch_as_shell_exports() {
  let env = TestEnv::new();
  let patch = run(&host(), &env.config("3.9.2", Os::Unix, Toolchain::MinGw))
    .await
    .unwrap();

  let mut out = Vec::new();
  patch.apply(&mut ShellEnvSink::new(&mut out)).unwrap();
  let script = String::from_utf8(out).unwrap();

  assert!(script.contains("export PATH='/home/runner/.luarocks/bin':\"$PATH\"\n"));
  assert!(script.contains("export LUA_PATH=';;/rocks/share/?.lua;/rocks/share/?/init.lua'\n"));
}

#[test]
#[serial]
fn github_sink_from_pipeline_env() {
  let env = TestEnv::new();
  let path_file = env.temp.path().join("path");
  let env_file = env.temp.path().join("env");

  temp_env::with_vars(
    [
      ("GITHUB_PATH", Some(path_file.as_os_str())),
      ("GITHUB_ENV", Some(env_file.as_os_str())),
    ],
    || {
      use setup_luarocks_lib::env::EnvSink;

      let mut sink = GithubEnvSink::from_env().unwrap();
      sink.export_var("LUA_PATH", ";;x").unwrap();
    },
  );

  assert_eq!(env.read("env"), "LUA_PATH=;;x\n");
}
