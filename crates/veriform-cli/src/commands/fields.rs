use serde_json::json;
use veriform_core::{CanonicalGroups, Catalog};

pub fn run(ids: Vec<String>, json_output: bool) {
    let catalog = Catalog::builtin();
    let groups = CanonicalGroups::builtin();
    let fields = groups.consolidated_fields(&catalog, &ids);

    if json_output {
        let payload = json!({ "selected": ids, "fields": fields });
        let rendered = serde_json::to_string_pretty(&payload).unwrap_or_else(|err| {
            eprintln!("error: failed to render fields json: {err}");
            std::process::exit(2);
        });
        println!("{rendered}");
        return;
    }

    println!("veriform fields for {}", ids.join(", "));
    if fields.is_empty() {
        println!("  (no operator-visible fields)");
        return;
    }
    for field in fields {
        let date_marker = if field.is_date_valued { " (date)" } else { "" };
        println!("  {}{date_marker}", field.display_label);
        println!("    canonical: {}", field.canonical_name);
        println!("    required by: {}", field.required_by.join(", "));
    }
}
