use serde_json::json;
use veriform_core::VerificationConfig;

pub fn run(config_path: String, json_output: bool) {
    let outcome = load(&config_path);

    if json_output {
        let payload = match &outcome {
            Ok((checks, groups_note)) => json!({
                "result": "accepted",
                "config": config_path,
                "checks": checks,
                "groups": groups_note,
            }),
            Err(err) => json!({
                "result": "rejected",
                "config": config_path,
                "error": err,
            }),
        };
        let rendered = serde_json::to_string_pretty(&payload).unwrap_or_else(|err| {
            eprintln!("error: failed to render config-check json: {err}");
            std::process::exit(2);
        });
        println!("{rendered}");
    } else {
        match &outcome {
            Ok((checks, groups_note)) => {
                println!("veriform config-check: accepted");
                println!("  Checks: {checks}");
                println!("  Groups: {groups_note}");
            }
            Err(err) => {
                eprintln!("veriform config-check: rejected");
                eprintln!("  {err}");
            }
        }
    }

    if outcome.is_err() {
        std::process::exit(1);
    }
}

fn load(config_path: &str) -> Result<(usize, String), String> {
    let text =
        std::fs::read_to_string(config_path).map_err(|err| format!("cannot read file: {err}"))?;
    let config = VerificationConfig::from_toml_str(&text).map_err(|err| err.to_string())?;
    let (catalog, groups) = config.into_parts().map_err(|err| err.to_string())?;
    // Exercise the loaded table once so an accepted config is known usable.
    let sample = catalog
        .list()
        .first()
        .and_then(|check| check.raw_fields.first())
        .map(|raw| format!("`{raw}` -> `{}`", groups.canonicalize(raw)))
        .unwrap_or_else(|| "empty catalog".to_string());
    Ok((catalog.list().len(), sample))
}
