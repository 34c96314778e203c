//! End-to-end runs of the prebuilt-binary install, against a scripted host.
//!
//! The Windows strategy is selected explicitly, so these run on any host.

use setup_luarocks_lib::config::Toolchain;
use setup_luarocks_lib::platform::Os;
use setup_luarocks_lib::setup::run;
use setup_luarocks_lib::util::testutil::FakeHost;

use super::common::TestEnv;

fn windows_host(version: &str) -> FakeHost {
  let dir = format!("luarocks-{}-windows-64", version);
  FakeHost::new()
    .with_archive(
      &format!("{}.zip", dir),
      &[&format!("{}/luarocks.exe", dir), &format!("{}/luarocks-admin.exe", dir)],
    )
    .respond("lua -e print(_VERSION)", "Lua 5.1")
    .respond("lua -e local pe", "MSVCRT")
    .respond("luarocks path --lr-path", "C:\\rocks\\?.lua")
    .respond("luarocks path --lr-cpath", "C:\\rocks\\?.dll")
}

#[tokio::test]
async fn mingw_install_configures_runtime() {
  let env = TestEnv::new();
  let host = windows_host("3.8.0");

  let patch = run(&host, &env.config("3.8.0", Os::Windows, Toolchain::MinGw))
    .await
    .unwrap();

  let lua_exe = env.cwd().join(".lua").join("bin").join("lua.exe");
  let commands = host.commands();
  assert_eq!(commands[0], "lua -e print(_VERSION)");
  assert_eq!(commands[1], "luarocks config lua_version 5.1");
  assert_eq!(
    commands[2],
    format!("luarocks config LUA_LIBDIR {}", env.cwd().join(".lua").join("lib").display())
  );
  assert_eq!(commands[3], "luarocks config variables.CC x86_64-w64-mingw32-gcc");
  assert_eq!(commands[4], "luarocks config variables.LD x86_64-w64-mingw32-gcc");
  assert!(commands[5].contains(&lua_exe.display().to_string()));
  assert_eq!(commands[6], "luarocks config variables.MSVCRT m");

  assert_eq!(
    host.downloads(),
    vec![
      "https://luarocks.org/releases/luarocks-3.8.0-windows-64.zip".to_string(),
      "https://github.com/Tieske/pe-parser/archive/refs/tags/version_0.6.tar.gz".to_string(),
    ]
  );

  assert!(patch.vars.values().all(|v| v.starts_with(";;")));
  assert_eq!(patch.vars["LUA_CPATH"], ";;C:\\rocks\\?.dll");
}

#[tokio::test]
async fn install_bin_holds_exactly_the_two_executables() {
  let env = TestEnv::new();
  let host = windows_host("3.9.2");

  run(&host, &env.config("3.9.2", Os::Windows, Toolchain::Msvc))
    .await
    .unwrap();

  let mut entries: Vec<String> = std::fs::read_dir(env.cwd().join(".luarocks").join("bin"))
    .unwrap()
    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
    .collect();
  entries.sort();
  assert_eq!(entries, ["luarocks-admin.exe", "luarocks.exe"]);
}

#[tokio::test]
async fn native_toolchain_skips_probe_for_any_version() {
  for version in ["3.8.0", "3.9.2", "3.11.1"] {
    let env = TestEnv::new();
    let host = windows_host(version);

    run(&host, &env.config(version, Os::Windows, Toolchain::Msvc))
      .await
      .unwrap();

    assert_eq!(host.downloads().len(), 1, "{}", version);
    assert!(
      host.commands().iter().all(|c| !c.contains("variables.") && !c.contains("pe.msvcrt")),
      "{}: {:?}",
      version,
      host.commands()
    );
  }
}

#[tokio::test]
async fn luarocks_runs_from_install_prefix() {
  let env = TestEnv::new();
  let host = windows_host("3.9.2");

  run(&host, &env.config("3.9.2", Os::Windows, Toolchain::Msvc))
    .await
    .unwrap();

  let exe = env.cwd().join(".luarocks").join("bin").join("luarocks.exe");
  let luarocks: Vec<_> = host
    .command_opts()
    .into_iter()
    .filter(|o| o.cmd.ends_with("luarocks.exe"))
    .collect();
  assert!(!luarocks.is_empty());
  for opts in luarocks {
    assert_eq!(opts.cmd, exe.to_string_lossy());
    assert_eq!(opts.path.first(), Some(&env.cwd().join(".luarocks").join("bin")));
  }
}

#[tokio::test]
async fn ref_form_is_a_literal_release_on_windows() {
  let env = TestEnv::new();
  let host = FakeHost::new().fail_download("luarocks-@main-windows-64.zip");

  let result = run(&host, &env.config("@main", Os::Windows, Toolchain::Msvc)).await;

  assert!(result.is_err());
  assert_eq!(
    host.downloads(),
    vec!["https://luarocks.org/releases/luarocks-@main-windows-64.zip".to_string()]
  );
}
