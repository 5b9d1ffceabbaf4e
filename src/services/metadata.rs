//! Title/summary/keyword generation from extracted document text.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::models::{DocumentMetadata, MetadataOutcome, PageText};
use crate::services::provider::TextModel;

/// At most this many keywords are kept from the model's response.
pub const MAX_KEYWORDS: usize = 5;

const SYSTEM_PROMPT: &str = "You extract document metadata and respond with a single JSON object \
and nothing else.";

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?").expect("valid fence pattern"));

/// Raw response shape. `keywords` is accepted either as the requested
/// comma-separated string or as a JSON array, since generative output does
/// not reliably follow the format instruction.
#[derive(Debug, Deserialize)]
struct RawMetadata {
    title: String,
    summary: String,
    keywords: RawKeywords,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawKeywords {
    List(Vec<String>),
    Csv(String),
}

impl RawKeywords {
    fn into_list(self) -> Vec<String> {
        let items = match self {
            RawKeywords::List(list) => list,
            RawKeywords::Csv(csv) => csv.split(',').map(String::from).collect(),
        };
        items
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .take(MAX_KEYWORDS)
            .collect()
    }
}

/// Ask the generative capability for document metadata.
///
/// Metadata is an enrichment, not a correctness-critical artifact: a
/// provider failure or an unparsable response yields `Unavailable` and the
/// caller's ingestion still succeeds.
pub async fn generate_metadata(model: &dyn TextModel, pages: &[PageText]) -> MetadataOutcome {
    let prompt = build_prompt(pages);

    let response = match model.generate(SYSTEM_PROMPT, &prompt).await {
        Ok(text) => text,
        Err(_) => return MetadataOutcome::Unavailable,
    };

    match parse_response(&response) {
        Some(metadata) => MetadataOutcome::Parsed(metadata),
        None => MetadataOutcome::Unavailable,
    }
}

fn build_prompt(pages: &[PageText]) -> String {
    let snippet = pages
        .iter()
        .map(|p| format!("Page {} : {}", p.number, p.text))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Extract metadata from the following document snippet:\n\
         \"\"\"{snippet}\"\"\"\n\n\
         Provide the response in the following JSON format:\n\
         {{\n\
           \"title\": \"Title of the document\",\n\
           \"summary\": \"A two-sentence summary of the document\",\n\
           \"keywords\": \"Comma-separated list of important keywords, with maximum {MAX_KEYWORDS} keywords\"\n\
         }}"
    )
}

/// Strip surrounding code-fence markup, then parse the JSON object.
fn parse_response(response: &str) -> Option<DocumentMetadata> {
    let clean = CODE_FENCE.replace_all(response, "");
    let raw: RawMetadata = serde_json::from_str(clean.trim()).ok()?;
    Some(DocumentMetadata {
        title: raw.title.trim().to_string(),
        summary: raw.summary.trim().to_string(),
        keywords: raw.keywords.into_list(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let metadata = parse_response(
            r#"{"title": "Rust Book", "summary": "About Rust. It is good.", "keywords": "rust, ownership, traits"}"#,
        )
        .unwrap();
        assert_eq!(metadata.title, "Rust Book");
        assert_eq!(metadata.keywords, vec!["rust", "ownership", "traits"]);
    }

    #[test]
    fn test_parse_fenced_json() {
        let response = "```json\n{\"title\": \"T\", \"summary\": \"S\", \"keywords\": \"a, b\"}\n```";
        let metadata = parse_response(response).unwrap();
        assert_eq!(metadata.title, "T");
        assert_eq!(metadata.keywords, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_keywords_as_array() {
        let response = r#"{"title": "T", "summary": "S", "keywords": ["x", " y ", ""]}"#;
        let metadata = parse_response(response).unwrap();
        assert_eq!(metadata.keywords, vec!["x", "y"]);
    }

    #[test]
    fn test_keywords_capped_at_five() {
        let response = r#"{"title": "T", "summary": "S", "keywords": "a,b,c,d,e,f,g"}"#;
        let metadata = parse_response(response).unwrap();
        assert_eq!(metadata.keywords.len(), MAX_KEYWORDS);
    }

    #[test]
    fn test_unparsable_response() {
        assert!(parse_response("Sorry, I cannot help with that.").is_none());
        assert!(parse_response("").is_none());
        assert!(parse_response(r#"{"title": "missing the rest"}"#).is_none());
    }

    #[test]
    fn test_prompt_carries_page_markers() {
        let pages = vec![
            PageText {
                number: 1,
                text: "Intro".to_string(),
            },
            PageText {
                number: 2,
                text: "Details".to_string(),
            },
        ];
        let prompt = build_prompt(&pages);
        assert!(prompt.contains("Page 1 : Intro"));
        assert!(prompt.contains("Page 2 : Details"));
        assert!(prompt.contains("JSON format"));
    }
}
