//! End-to-end runs of the `vitrine` binary against the fixtures.

use std::path::PathBuf;
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

fn vitrine(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vitrine"))
        .arg("--page")
        .arg(fixture("page.toml"))
        .args(args)
        .output()
        .unwrap()
}

fn stdout_of(out: &Output) -> String {
    assert!(
        out.status.success(),
        "vitrine failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn check_lists_the_fixture_inventory() {
    let stdout = stdout_of(&vitrine(&["check"]));
    assert!(stdout.contains("001 home (top 0, height 900)"));
    assert!(stdout.contains("Filters: all*, web, design, photo"));
    assert!(stdout.contains("==> Page is valid"));
}

#[test]
fn check_rejects_a_broken_page() {
    let tmp = tempfile::TempDir::new().unwrap();
    let page = tmp.path().join("page.toml");
    std::fs::write(
        &page,
        r#"
viewport_height = 800.0

[[blocks]]
id = "dup"
role = "plain"

[[blocks]]
id = "dup"
role = "plain"
"#,
    )
    .unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_vitrine"))
        .arg("--page")
        .arg(&page)
        .arg("check")
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("dup"));
}

#[test]
fn replay_prints_final_state() {
    let stdout = stdout_of(&vitrine(&[
        "replay",
        "--script",
        fixture("script.json").to_str().unwrap(),
    ]));
    assert!(stdout.contains("==> Replayed 14 events"));
    assert!(stdout.contains("Gallery: web"));
    assert!(stdout.contains("002 p2 [design] removed"));
    // Fixture config overrides the stock success message.
    assert!(stdout.contains("Status: success \"Message received.\""));
    assert!(stdout.contains("Menu: closed"));
}

#[test]
fn explicit_config_overrides_sibling() {
    let tmp = tempfile::TempDir::new().unwrap();
    let config = tmp.path().join("config.toml");
    std::fs::write(&config, "[contact]\nsuccess_message = \"Got it.\"\n").unwrap();

    let stdout = stdout_of(&vitrine(&[
        "--config",
        config.to_str().unwrap(),
        "replay",
        "--script",
        fixture("script.json").to_str().unwrap(),
    ]));
    assert!(stdout.contains("Status: success \"Got it.\""));
}

#[test]
fn invalid_config_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let config = tmp.path().join("config.toml");
    std::fs::write(&config, "[reveal]\nthreshold = 2.0\n").unwrap();

    let out = vitrine(&["--config", config.to_str().unwrap(), "check"]);
    assert!(!out.status.success());
}

#[test]
fn render_writes_reconciled_html() {
    let tmp = tempfile::TempDir::new().unwrap();
    let html_path = tmp.path().join("site/index.html");

    stdout_of(&vitrine(&[
        "render",
        "--script",
        fixture("script.json").to_str().unwrap(),
        "--output",
        html_path.to_str().unwrap(),
    ]));

    let html = std::fs::read_to_string(&html_path).unwrap();
    assert!(html.contains(r#"<nav class="navbar scrolled">"#));
    assert!(html.contains(r#"data-filter="web""#));
    assert!(html.contains("Message received."));
}

#[test]
fn gen_config_prints_stock_config() {
    let out = Command::new(env!("CARGO_BIN_EXE_vitrine"))
        .arg("gen-config")
        .output()
        .unwrap();
    let stdout = stdout_of(&out);
    assert!(stdout.contains("[gallery]"));
    assert!(stdout.contains("[konami]"));
}
