use anyhow::Result;
use serde_json::json;

use hubfind::{MatchField, ResultPage};

/// Print a plain-text listing of one result page.
pub(crate) fn print_plain(page: &ResultPage) {
    println!(
        "{} plugins (page {} of {})",
        page.total_count, page.page, page.total_pages
    );

    for item in &page.items {
        if item.summary.is_empty() {
            println!("  {}", item.name);
        } else {
            println!("  {}  {}", item.name, item.summary);
        }
        if let Some(matches) = page.matches.get(&item.name) {
            let fields: Vec<String> = matches
                .spans()
                .iter()
                .map(|span| format!("{} [{}..{}]", field_label(span.field), span.start, span.end))
                .collect();
            println!("    matched: {}", fields.join(", "));
        }
    }
}

fn field_label(field: MatchField) -> String {
    match field {
        MatchField::Name => "name".to_string(),
        MatchField::Summary => "summary".to_string(),
        MatchField::Description => "description".to_string(),
        MatchField::Author(index) => format!("author #{index}"),
    }
}

/// Format a result page as a JSON string.
pub(crate) fn format_page_json(page: &ResultPage) -> Result<String> {
    let items: Vec<serde_json::Value> = page
        .items
        .iter()
        .map(|item| serde_json::to_value(&**item))
        .collect::<Result<_, _>>()?;

    let payload = json!({
        "totalCount": page.total_count,
        "page": page.page,
        "totalPages": page.total_pages,
        "items": items,
        "matches": serde_json::to_value(&page.matches)?,
    });

    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of a result page.
pub(crate) fn print_json(page: &ResultPage) -> Result<()> {
    println!("{}", format_page_json(page)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use hubfind::{Catalog, PluginRecord, QueryState, SortKey, run_query};

    use super::*;

    #[test]
    fn json_format_includes_totals_and_matches() {
        let record = PluginRecord {
            name: "napari-video".into(),
            summary: "Play videos".into(),
            ..PluginRecord::default()
        };
        let catalog = Catalog::new(vec![record]);
        let mut state = QueryState::with_defaults(SortKey::Name);
        state.search_text = "video".into();
        state.sort = SortKey::Relevance;
        let page = run_query(&catalog, &state, 15);

        let text = format_page_json(&page).expect("json");
        let value: Value = serde_json::from_str(&text).expect("parse");
        assert_eq!(value["totalCount"], 1);
        assert_eq!(value["items"][0]["name"], "napari-video");
        assert!(value["matches"]["napari-video"].is_object());
    }
}
