//! Integration tests: consolidation and expansion test vectors.
//!
//! Each fixture in tests/fixtures/ has:
//! - case.json: either `{"selected": [...]}` for a consolidated-view
//!   vector or `{"check": "...", "values": {...}}` for an expansion
//!   vector
//! - expect.json: the expected output, compared exactly
//!
//! These pin the deduplication semantics end to end: grouping, labels,
//! date flags, requiredBy order, the label sort, the canonical-first /
//! raw-fallback / empty-default lookup, and system-field injection.

use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use veriform_core::{CanonicalGroups, Catalog};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_json(path: &PathBuf) -> Value {
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", path.display()))
}

fn run_fixture(name: &str) {
    let dir = fixtures_dir().join(name);
    let case = load_json(&dir.join("case.json"));
    let expected = load_json(&dir.join("expect.json"));

    let catalog = Catalog::builtin();
    let groups = CanonicalGroups::builtin();

    let actual = if let Some(selected) = case.get("selected") {
        let selected: Vec<String> =
            serde_json::from_value(selected.clone()).expect("selected must be a string array");
        serde_json::to_value(groups.consolidated_fields(&catalog, &selected))
            .expect("failed to serialize consolidated fields")
    } else {
        let check_id = case["check"].as_str().expect("missing check field");
        let check = catalog
            .find(check_id)
            .unwrap_or_else(|| panic!("unknown check: {check_id}"));
        let values: BTreeMap<String, String> =
            serde_json::from_value(case["values"].clone()).expect("values must be a string map");
        serde_json::to_value(groups.expand(check, &values))
            .expect("failed to serialize payload")
    };

    assert_eq!(
        actual,
        expected,
        "\n\nFixture: {name}\n\nGot:\n{}\n\nExpected:\n{}\n",
        serde_json::to_string_pretty(&actual).unwrap(),
        serde_json::to_string_pretty(&expected).unwrap(),
    );
}

#[test]
fn consolidated_pan_aadhaar() {
    run_fixture("consolidated_pan_aadhaar");
}

#[test]
fn consolidated_financial_mix() {
    run_fixture("consolidated_financial_mix");
}

#[test]
fn expand_bank_account_consolidated() {
    run_fixture("expand_bank_account_consolidated");
}

#[test]
fn expand_pan_raw_keyed() {
    run_fixture("expand_pan_raw_keyed");
}
