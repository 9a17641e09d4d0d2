//! Terminal rendering for command results.

use ss12000_client::{Resource, ResponseBody};

pub(crate) fn print_body(body: &ResponseBody) -> anyhow::Result<()> {
    println!("{}", render_body(body)?);
    Ok(())
}

pub(crate) fn render_body(body: &ResponseBody) -> anyhow::Result<String> {
    match body {
        ResponseBody::Json(value) => Ok(serde_json::to_string_pretty(value)?),
        ResponseBody::NoContent => Ok("no content".to_owned()),
    }
}

pub(crate) fn print_resources(resource: Option<Resource>) {
    match resource {
        Some(resource) => print!("{}", describe_resource(resource)),
        None => {
            for resource in Resource::ALL {
                println!(
                    "{:<24} /{:<22} {}",
                    resource.cli_name(),
                    resource.path(),
                    capabilities(resource).join(" ")
                );
            }
        }
    }
}

pub(crate) fn capabilities(resource: Resource) -> Vec<&'static str> {
    let d = resource.descriptor();
    let mut caps = vec!["list"];
    if d.supports_lookup() {
        caps.push("lookup");
    }
    if d.supports_by_id {
        caps.push("get");
    }
    if d.supports_delete {
        caps.push("delete");
    }
    if d.supports_expand {
        caps.push("expand");
    }
    caps
}

pub(crate) fn describe_resource(resource: Resource) -> String {
    let d = resource.descriptor();
    let mut out = format!("/{} ({})\n", resource.path(), capabilities(resource).join(", "));

    out.push_str("\nfilters:\n");
    for filter in d.accepted_filters() {
        let required = if d.required.iter().any(|r| *r == filter.logical) {
            " [required]"
        } else {
            ""
        };
        let repeat = if filter.repeatable { " [repeatable]" } else { "" };
        out.push_str(&format!("  {:<40} {}{repeat}{required}\n", filter.logical, filter.wire));
    }

    if d.supports_lookup() {
        out.push_str("\nlookup keys:\n");
        for key in d.lookup_keys {
            out.push_str(&format!("  {:<40} {}\n", key.name, key.wire));
        }
    }
    out
}
