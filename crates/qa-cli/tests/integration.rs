use assert_cmd::Command;
use predicates::prelude::*;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use tempfile::TempDir;

fn qa_check(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("qa-check").unwrap();
    cmd.current_dir(dir.path()).arg("--no-color");
    cmd
}

fn add_page(root: &Path, name: &str, content: &str) {
    let dir = root.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), content).unwrap();
}

/// Minimal HTTP responder: answers every request with 200 and a small body.
/// The thread dies with the test process.
fn spawn_stub_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            let body = b"<html>ok</html>";
            let _ = write!(
                stream,
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(body);
        }
    });
    format!("http://{addr}/")
}

// Loopback port 1 is not listening; probes fail fast with a refused
// connection instead of waiting out the timeout.
const UNREACHABLE: &str = "http://127.0.0.1:1/";

// ---------------------------------------------------------------------------
// End-to-end scenarios
// ---------------------------------------------------------------------------

#[test]
fn drifted_tree_with_unreachable_site_exits_1() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("projects");
    add_page(&root, "test-1", "<html>ok</html>");
    add_page(&root, "test-2", "");
    std::fs::write(
        root.join("index.json"),
        r#"[{"file":"test-1/index.html","status":"PASS"}]"#,
    )
    .unwrap();

    qa_check(&dir)
        .args(["--base-url", UNREACHABLE])
        .arg("--root")
        .arg(&root)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("found 2 test directories"))
        .stdout(predicate::str::contains("test-2 (empty)"))
        .stdout(predicate::str::contains("file references resolve (1 checked)"))
        .stdout(predicate::str::contains("1 directories missing from the manifest"))
        .stdout(predicate::str::contains("HTTP 000"))
        .stdout(predicate::str::contains("CHECK(S) FAILED"));
}

#[test]
fn healthy_tree_with_reachable_site_exits_0() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("projects");
    add_page(&root, "test-1", "<html>one</html>");
    add_page(&root, "test-2", "<html>two</html>");
    std::fs::write(
        root.join("index.json"),
        r#"[
            {"name":"Test 1","file":"test-1/index.html","status":"PASS"},
            {"name":"Test 2","file":"test-2/index.html","status":"PENDING"}
        ]"#,
    )
    .unwrap();

    let base_url = spawn_stub_server();
    qa_check(&dir)
        .args(["--base-url", &base_url])
        .arg("--root")
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("ALL CHECKS PASSED"))
        .stdout(predicate::str::contains("status tally: 1 PASS, 0 FAIL, 1 PENDING"));
}

#[test]
fn missing_root_still_validates_manifest_independently() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.path().join("index.json");
    std::fs::write(&manifest, "[]").unwrap();

    qa_check(&dir)
        .args(["--base-url", UNREACHABLE])
        .arg("--root")
        .arg(dir.path().join("nope"))
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("projects directory not found"))
        .stdout(predicate::str::contains("valid JSON array with 0 entries"))
        .stdout(predicate::str::contains("spot checks skipped"));
}

#[test]
fn invalid_manifest_json_is_a_check_failure_not_a_crash() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("projects");
    add_page(&root, "test-1", "<html>ok</html>");
    std::fs::write(root.join("index.json"), "{broken").unwrap();

    qa_check(&dir)
        .args(["--base-url", UNREACHABLE])
        .arg("--root")
        .arg(&root)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("manifest is not valid JSON"))
        .stdout(predicate::str::contains("status tally: 0 PASS, 0 FAIL, 0 PENDING"));
}

// ---------------------------------------------------------------------------
// Output modes
// ---------------------------------------------------------------------------

#[test]
fn json_mode_emits_the_full_report() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("projects");
    add_page(&root, "test-1", "<html>ok</html>");
    std::fs::write(root.join("index.json"), r#"[{"file":"test-1/index.html"}]"#).unwrap();

    let output = qa_check(&dir)
        .args(["--base-url", UNREACHABLE, "--json"])
        .arg("--root")
        .arg(&root)
        .assert()
        .failure()
        .code(1)
        .get_output()
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(report["failed"].as_u64().unwrap() >= 4, "all probes fail");
    assert_eq!(
        report["total"].as_u64().unwrap(),
        report["checks"].as_array().unwrap().len() as u64
    );
    assert!(report["elapsed_ms"].is_u64());
}

#[test]
fn quiet_mode_hides_passing_checks() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("projects");
    add_page(&root, "test-1", "<html>ok</html>");
    std::fs::write(root.join("index.json"), r#"[{"file":"test-1/index.html"}]"#).unwrap();

    qa_check(&dir)
        .args(["--base-url", UNREACHABLE, "--quiet"])
        .arg("--root")
        .arg(&root)
        .assert()
        .failure()
        .stdout(predicate::str::contains("manifest parsed").not())
        .stdout(predicate::str::contains("HTTP 000"))
        .stdout(predicate::str::contains("Failed:"));
}

// ---------------------------------------------------------------------------
// Config handling
// ---------------------------------------------------------------------------

#[test]
fn config_file_supplies_defaults() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("projects");
    add_page(&root, "test-1", "<html>ok</html>");
    std::fs::write(root.join("index.json"), "[]").unwrap();

    let config = dir.path().join("site.yaml");
    std::fs::write(
        &config,
        format!(
            "base_url: {UNREACHABLE}\nartifacts_root: {}\n",
            root.display()
        ),
    )
    .unwrap();

    qa_check(&dir)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains(UNREACHABLE));
}

#[test]
fn schemeless_base_url_exits_2() {
    let dir = TempDir::new().unwrap();

    qa_check(&dir)
        .args(["--base-url", "web/site"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must start with"));
}

#[test]
fn missing_explicit_config_exits_2() {
    let dir = TempDir::new().unwrap();

    qa_check(&dir)
        .arg("--config")
        .arg(dir.path().join("nope.yaml"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("config"));
}
