use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TempDirGuard {
    path: PathBuf,
}

impl TempDirGuard {
    fn new(prefix: &str) -> Self {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "veriform-cli-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should be created");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_veriform<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = env!("CARGO_BIN_EXE_veriform");
    Command::new(bin)
        .args(args)
        .output()
        .expect("veriform command should execute")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "command failed with status {:?}\nstdout:\n{}\nstderr:\n{}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn assert_failure(output: &Output) {
    if output.status.success() {
        panic!(
            "command unexpectedly succeeded\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn parse_json_stdout(output: &Output) -> Value {
    serde_json::from_slice::<Value>(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout was not valid json: {e}\nstdout:\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

#[test]
fn checks_lists_the_full_catalog() {
    let output = run_veriform(["checks", "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    let checks = payload["checks"].as_array().expect("checks array");
    assert_eq!(checks.len(), 22);
    assert!(checks.iter().any(|c| c["id"] == "pan"));
}

#[test]
fn checks_filters_by_category_and_query() {
    let output = run_veriform(["checks", "--category", "vehicle", "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    let ids: Vec<&str> = payload["checks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["vehicle-rc", "driving-licence"]);

    let output = run_veriform(["checks", "--query", "pharmacy", "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["checks"].as_array().unwrap().len(), 1);

    let output = run_veriform(["checks", "--category", "payments"]);
    assert_failure(&output);
}

#[test]
fn fields_shows_the_consolidated_view() {
    let output = run_veriform(["fields", "pan", "aadhaar", "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    let fields = payload["fields"].as_array().expect("fields array");
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0]["displayLabel"], "Date of Birth");
    assert_eq!(
        fields[2]["requiredBy"],
        serde_json::json!(["PAN Verification", "Aadhaar Verification"])
    );
}

#[test]
fn config_check_accepts_valid_and_rejects_overlapping() {
    let tmp = TempDirGuard::new("config");

    let valid = tmp.path().join("valid.toml");
    fs::write(
        &valid,
        r#"
[groups]
full_name = ["name", "holder_name"]
contact = ["mobile_number"]
"#,
    )
    .unwrap();
    let output = run_veriform(["config-check", valid.to_str().unwrap(), "--json"]);
    assert_success(&output);
    assert_eq!(parse_json_stdout(&output)["result"], "accepted");

    let overlapping = tmp.path().join("overlapping.toml");
    fs::write(
        &overlapping,
        r#"
[groups]
full_name = ["name"]
organization_name = ["name"]
"#,
    )
    .unwrap();
    let output = run_veriform(["config-check", overlapping.to_str().unwrap(), "--json"]);
    assert_failure(&output);
    assert_eq!(parse_json_stdout(&output)["result"], "rejected");
}

#[test]
fn run_emits_ordered_results_from_a_script() {
    let tmp = TempDirGuard::new("run");
    let script = tmp.path().join("responses.json");
    fs::write(
        &script,
        r#"{
            "pan": {"success": true, "data": {"data": {"pan_status": "E"}}},
            "aadhaar": {"success": false, "error": "aadhaar not found"}
        }"#,
    )
    .unwrap();

    let output = run_veriform([
        "run",
        "pan",
        "aadhaar",
        "--value",
        "full_name=Asha Rao",
        "--value",
        "identification_number=ABCDE1234F",
        "--script",
        script.to_str().unwrap(),
        "--json",
    ]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);

    let results = payload["results"].as_array().expect("results array");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["checkId"], "pan");
    assert_eq!(results[0]["status"], "SUCCESS");
    assert_eq!(results[0]["normalizedResponse"]["verified"], true);
    assert_eq!(results[0]["requestPayload"]["name"], "Asha Rao");
    assert_eq!(results[1]["checkId"], "aadhaar");
    assert_eq!(results[1]["status"], "FAILED");
    assert_eq!(results[1]["error"], "aadhaar not found");
    assert_eq!(results[1]["requestPayload"]["name"], "Asha Rao");

    assert_eq!(payload["report"]["emitted"], 2);
    assert!(payload["report"].get("aborted").is_none());
}

#[test]
fn run_aborts_on_scripted_transport_failure() {
    let output = run_veriform([
        "run",
        "pan",
        "aadhaar",
        "gstin",
        "--fail",
        "aadhaar",
        "--json",
    ]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);

    assert_eq!(payload["results"].as_array().unwrap().len(), 1);
    assert_eq!(payload["results"][0]["checkId"], "pan");
    assert!(
        payload["report"]["aborted"]
            .as_str()
            .unwrap()
            .contains("aadhaar")
    );
}
