//! Binary-level tests: run `folio-motion` and inspect its output.

use std::process::{Command, Output};

use folio_motion::config::BehaviorConfig;

fn folio(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_folio-motion"))
        .args(args)
        .output()
        .expect("failed to run folio-motion")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn gen_config_prints_the_stock_defaults() {
    let out = folio(&["gen-config"]);
    assert!(out.status.success());
    let parsed: BehaviorConfig = toml::from_str(&stdout(&out)).unwrap();
    assert_eq!(parsed, BehaviorConfig::default());
}

#[test]
fn check_accepts_a_partial_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[parallax]\nenabled = true\n").unwrap();

    let out = folio(&["check", "--config", path.to_str().unwrap()]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("    parallax: on"));
    assert!(text.contains("==> Config is valid"));
}

#[test]
fn check_rejects_unknown_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[loader]\ncycle_msec = 10\n").unwrap();

    let out = folio(&["check", "--config", path.to_str().unwrap()]);
    assert!(!out.status.success());
}

#[test]
fn simulate_prints_a_time_grouped_trace() {
    let out = folio(&["simulate", "--scroll", "0,900", "--settle-ms", "2000"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("#loading-screen"));
    assert!(text.contains("removed"));
    let last = text.lines().last().unwrap();
    assert!(last.ends_with(" ms"), "unexpected summary line: {last}");
    assert!(last.contains("changes over"));
}

#[test]
fn simulate_json_is_a_list_of_entries() {
    let out = folio(&["simulate", "--scroll", "900", "--json"]);
    assert!(out.status.success());
    let entries: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    let entries = entries.as_array().unwrap();
    assert!(!entries.is_empty());
    assert!(entries.iter().all(|e| e.get("at").is_some()));
    assert!(
        entries
            .iter()
            .any(|e| e["mutation"]["kind"] == "removed" && e["target"] == "#loading-screen")
    );
}

#[test]
fn simulate_rejects_bad_scroll_list() {
    let out = folio(&["simulate", "--scroll", "0,up"]);
    assert!(!out.status.success());
}

#[test]
fn simulate_rejects_unknown_click_target() {
    let out = folio(&["simulate", "--click", "nowhere"]);
    assert!(!out.status.success());
}
