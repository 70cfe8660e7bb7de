use async_trait::async_trait;
use serde_json::json;
use std::collections::BTreeMap;
use veriform_core::{
    BackendError, BackendResponse, CanonicalGroups, Catalog, CheckStatus, NormalizerRegistry,
    Payload, Selection, VerificationBackend, run_verification,
};

pub struct Args {
    pub ids: Vec<String>,
    pub values: Vec<String>,
    pub script: Option<String>,
    pub fail: Option<String>,
    pub json: bool,
}

/// Backend scripted from a JSON file of canned responses keyed by check
/// id. Ids absent from the script get a generic success; the `--fail` id
/// raises a transport failure to demonstrate the abort path.
struct ScriptedBackend {
    responses: BTreeMap<String, BackendResponse>,
    fail: Option<String>,
}

#[async_trait]
impl VerificationBackend for ScriptedBackend {
    async fn invoke(
        &self,
        check_id: &str,
        _payload: &Payload,
    ) -> Result<BackendResponse, BackendError> {
        if self.fail.as_deref() == Some(check_id) {
            return Err(BackendError::new(format!(
                "scripted transport failure for `{check_id}`"
            )));
        }
        Ok(self
            .responses
            .get(check_id)
            .cloned()
            .unwrap_or_else(|| BackendResponse::success(json!({"status": "ok"}))))
    }
}

pub fn run(args: Args) {
    let responses = match &args.script {
        Some(path) => load_script(path),
        None => BTreeMap::new(),
    };

    let catalog = Catalog::builtin();
    let groups = CanonicalGroups::builtin();
    let normalizers = NormalizerRegistry::builtin();

    let mut selection = Selection::new();
    for id in &args.ids {
        selection.select(id.clone());
    }
    for pair in &args.values {
        let Some((key, value)) = pair.split_once('=') else {
            eprintln!("error: --value expects key=value, got `{pair}`");
            std::process::exit(2);
        };
        selection.set_value(key, value);
    }

    let backend = ScriptedBackend {
        responses,
        fail: args.fail,
    };

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|err| {
        eprintln!("error: failed to start runtime: {err}");
        std::process::exit(2);
    });

    let mut results = Vec::new();
    let report = runtime.block_on(run_verification(
        &mut selection,
        &catalog,
        &groups,
        &normalizers,
        &backend,
        &mut results,
    ));

    if args.json {
        let payload = json!({ "results": results, "report": report });
        let rendered = serde_json::to_string_pretty(&payload).unwrap_or_else(|err| {
            eprintln!("error: failed to render run json: {err}");
            std::process::exit(2);
        });
        println!("{rendered}");
        return;
    }

    println!("veriform run");
    for result in &results {
        let status = match result.status {
            CheckStatus::Success => "SUCCESS",
            CheckStatus::Failed => "FAILED",
        };
        print!("  {:<28} {status}", result.check_id);
        if let Some(verified) = result.normalized_response.verified {
            print!(" (verified: {verified})");
        }
        if let Some(error) = &result.error {
            print!(": {error}");
        }
        println!();
    }
    println!(
        "  attempted {}, emitted {}, skipped {}, succeeded {}, failed {}",
        report.attempted, report.emitted, report.skipped, report.succeeded, report.failed
    );
    if let Some(aborted) = &report.aborted {
        eprintln!("  {aborted}; please try again");
    }
}

fn load_script(path: &str) -> BTreeMap<String, BackendResponse> {
    let text = std::fs::read_to_string(path).unwrap_or_else(|err| {
        eprintln!("error: cannot read script {path}: {err}");
        std::process::exit(2);
    });
    serde_json::from_str(&text).unwrap_or_else(|err| {
        eprintln!("error: cannot parse script {path}: {err}");
        std::process::exit(2);
    })
}
