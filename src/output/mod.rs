pub mod report;

use crate::view::terminal;
use crate::view::PageSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

pub fn render_text(snapshot: &PageSnapshot) -> Vec<u8> {
    terminal::format_snapshot(snapshot, false).into_bytes()
}

pub fn render_json(snapshot: &PageSnapshot) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = serde_json::to_vec_pretty(snapshot)?;
    out.push(b'\n');
    Ok(out)
}

pub fn render_html(snapshot: &PageSnapshot) -> Vec<u8> {
    report::render_html(snapshot)
}

pub fn render(format: OutputFormat, snapshot: &PageSnapshot) -> Result<Vec<u8>, String> {
    match format {
        OutputFormat::Text => Ok(render_text(snapshot)),
        OutputFormat::Json => {
            render_json(snapshot).map_err(|e| format!("failed to serialize output: {e}"))
        }
        OutputFormat::Html => Ok(render_html(snapshot)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::FactViewModel;
    use crate::pagination::{build_pagination_view, PaginationInfo};

    fn snapshot() -> PageSnapshot {
        PageSnapshot {
            facts: vec![FactViewModel {
                text: "A".to_string(),
                author_name: "J D".to_string(),
                upvotes: 3,
            }],
            pagination: build_pagination_view(&PaginationInfo {
                total_count: 1,
                current_page: 1,
                per_page: 10,
                total_pages: 1,
            }),
            query: Some("a".to_string()),
            per_page: 10,
        }
    }

    #[test]
    fn format_parse_accepts_aliases() {
        assert_eq!(OutputFormat::parse(" TXT "), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::parse("htm"), Some(OutputFormat::Html));
        assert_eq!(OutputFormat::parse("xml"), None);
    }

    #[test]
    fn format_inferred_from_extension() {
        assert_eq!(infer_format_from_path("out.JSON"), Some(OutputFormat::Json));
        assert_eq!(infer_format_from_path("page.html"), Some(OutputFormat::Html));
        assert_eq!(infer_format_from_path("facts"), None);
    }

    #[test]
    fn json_output_carries_view_model() {
        let value: serde_json::Value = serde_json::from_slice(&render_json(&snapshot()).unwrap()).unwrap();
        assert_eq!(value["facts"][0]["author_name"], "J D");
        assert_eq!(value["facts"][0]["upvotes"], 3);
        assert_eq!(value["pagination"]["range"]["start"], 1);
        assert_eq!(value["pagination"]["buttons"][1]["active"], true);
        assert_eq!(value["query"], "a");
    }

    #[test]
    fn render_returns_serialized_json_with_trailing_newline() {
        let rendered = render(OutputFormat::Json, &snapshot()).unwrap();
        assert_eq!(rendered.last(), Some(&b'\n'));
        let value: serde_json::Value = serde_json::from_slice(&rendered).unwrap();
        assert_eq!(value["per_page"], 10);
    }
}
