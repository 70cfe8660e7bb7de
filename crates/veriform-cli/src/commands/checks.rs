use serde_json::json;
use veriform_core::{Catalog, Category};

pub fn run(category: Option<String>, query: Option<String>, json_output: bool) {
    let category: Option<Category> = match category.as_deref() {
        Some(raw) => match raw.parse() {
            Ok(category) => Some(category),
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(2);
            }
        },
        None => None,
    };

    let catalog = Catalog::builtin();
    let checks = catalog.filter(category, query.as_deref());

    if json_output {
        let payload = json!({ "checks": checks });
        let rendered = serde_json::to_string_pretty(&payload).unwrap_or_else(|err| {
            eprintln!("error: failed to render checks json: {err}");
            std::process::exit(2);
        });
        println!("{rendered}");
        return;
    }

    println!("veriform checks ({} matching)", checks.len());
    for check in checks {
        println!("  {:<28} [{}] {}", check.id, check.category, check.display_name);
    }
}
