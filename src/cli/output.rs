use std::fmt::Write as FmtWrite;

use crate::models::{Answer, DocumentRecord, IngestReport, OutputFormat};

pub trait Formatter {
    fn format_ingest_reports(&self, reports: &[IngestReport]) -> String;
    fn format_answer(&self, answer: &Answer) -> String;
    fn format_documents(&self, documents: &[DocumentRecord]) -> String;
    fn format_status(&self, status: &StatusInfo) -> String;
    fn format_message(&self, message: &str) -> String;
    fn format_error(&self, error: &str) -> String;
}

#[derive(Debug, Clone)]
pub struct StatusInfo {
    pub database_path: String,
    pub documents: u64,
    pub pages: u64,
    pub provider_url: String,
    pub embedding_model: String,
    pub chat_model: String,
    pub embedding_dimension: u32,
    pub api_key_present: bool,
    pub relevance_threshold: f32,
}

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format_ingest_reports(&self, reports: &[IngestReport]) -> String {
        let mut output = String::new();
        for report in reports {
            writeln!(output, "{}", report.file_name).unwrap();
            writeln!(output, "  Document ID: {}", report.document_id).unwrap();
            writeln!(output, "  Pages:       {}", report.pages_stored).unwrap();
            match report.metadata {
                Some(ref metadata) => {
                    writeln!(output, "  Title:       {}", metadata.title).unwrap();
                    writeln!(output, "  Summary:     {}", metadata.summary).unwrap();
                    if !metadata.keywords.is_empty() {
                        writeln!(output, "  Keywords:    {}", metadata.keywords.join(", "))
                            .unwrap();
                    }
                }
                None => {
                    writeln!(output, "  Metadata:    unavailable").unwrap();
                }
            }
            writeln!(output, "  Duration:    {}ms", report.duration_ms).unwrap();
            writeln!(output).unwrap();
        }
        output
    }

    fn format_answer(&self, answer: &Answer) -> String {
        let mut output = String::new();
        writeln!(output, "{}", answer.text).unwrap();
        if !answer.cited_pages.is_empty() {
            let pages: Vec<String> = answer.cited_pages.iter().map(u32::to_string).collect();
            writeln!(output).unwrap();
            writeln!(output, "Cited pages: {}", pages.join(", ")).unwrap();
        }
        output
    }

    fn format_documents(&self, documents: &[DocumentRecord]) -> String {
        if documents.is_empty() {
            return "No documents ingested yet.\n".to_string();
        }

        let mut output = String::new();
        writeln!(output, "Documents").unwrap();
        writeln!(output, "---------").unwrap();
        for doc in documents {
            writeln!(output, "{}", doc.id).unwrap();
            writeln!(output, "  File:     {}", doc.file_name).unwrap();
            if let Some(ref title) = doc.title {
                writeln!(output, "  Title:    {}", title).unwrap();
            }
            if let Some(ref summary) = doc.summary {
                writeln!(output, "  Summary:  {}", summary).unwrap();
            }
            if !doc.keywords.is_empty() {
                writeln!(output, "  Keywords: {}", doc.keywords.join(", ")).unwrap();
            }
            writeln!(output, "  Added:    {}", doc.created_at).unwrap();
            writeln!(output).unwrap();
        }
        output
    }

    fn format_status(&self, status: &StatusInfo) -> String {
        let mut output = String::new();
        writeln!(output, "Status").unwrap();
        writeln!(output, "------").unwrap();
        writeln!(output, "Store:     {}", status.database_path).unwrap();
        writeln!(output, "  Documents: {}", status.documents).unwrap();
        writeln!(output, "  Pages:     {}", status.pages).unwrap();
        writeln!(output).unwrap();
        writeln!(output, "Provider:  {}", status.provider_url).unwrap();
        writeln!(output, "  Embedding: {} (dim {})", status.embedding_model, status.embedding_dimension).unwrap();
        writeln!(output, "  Chat:      {}", status.chat_model).unwrap();
        let key = if status.api_key_present {
            "[SET]"
        } else {
            "[MISSING]"
        };
        writeln!(output, "  API key:   {}", key).unwrap();
        writeln!(output).unwrap();
        writeln!(
            output,
            "Relevance threshold: {:.2}",
            status.relevance_threshold
        )
        .unwrap();
        output
    }

    fn format_message(&self, message: &str) -> String {
        format!("{}\n", message)
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {}\n", error)
    }
}

pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render(&self, value: &serde_json::Value) -> String {
        if self.pretty {
            serde_json::to_string_pretty(value)
                .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        } else {
            serde_json::to_string(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        }
    }
}

impl Formatter for JsonFormatter {
    fn format_ingest_reports(&self, reports: &[IngestReport]) -> String {
        let value = serde_json::json!({ "ingested": reports });
        self.render(&value)
    }

    fn format_answer(&self, answer: &Answer) -> String {
        let value = serde_json::json!(answer);
        self.render(&value)
    }

    fn format_documents(&self, documents: &[DocumentRecord]) -> String {
        let value = serde_json::json!({ "documents": documents });
        self.render(&value)
    }

    fn format_status(&self, status: &StatusInfo) -> String {
        let value = serde_json::json!({
            "store": {
                "path": status.database_path,
                "documents": status.documents,
                "pages": status.pages,
            },
            "provider": {
                "url": status.provider_url,
                "embedding_model": status.embedding_model,
                "chat_model": status.chat_model,
                "embedding_dimension": status.embedding_dimension,
                "api_key_present": status.api_key_present,
            },
            "retrieval": {
                "relevance_threshold": status.relevance_threshold,
            }
        });
        self.render(&value)
    }

    fn format_message(&self, message: &str) -> String {
        serde_json::json!({ "message": message }).to_string()
    }

    fn format_error(&self, error: &str) -> String {
        serde_json::json!({ "error": error }).to_string()
    }
}

pub struct MarkdownFormatter;

impl Formatter for MarkdownFormatter {
    fn format_ingest_reports(&self, reports: &[IngestReport]) -> String {
        let mut output = String::new();
        writeln!(output, "## Ingested Documents\n").unwrap();
        for report in reports {
            writeln!(output, "### {}\n", report.file_name).unwrap();
            writeln!(output, "- **Document ID:** `{}`", report.document_id).unwrap();
            writeln!(output, "- **Pages:** {}", report.pages_stored).unwrap();
            if let Some(ref metadata) = report.metadata {
                writeln!(output, "- **Title:** {}", metadata.title).unwrap();
                writeln!(output, "- **Summary:** {}", metadata.summary).unwrap();
                if !metadata.keywords.is_empty() {
                    let keywords: Vec<String> = metadata
                        .keywords
                        .iter()
                        .map(|k| format!("`{}`", k))
                        .collect();
                    writeln!(output, "- **Keywords:** {}", keywords.join(", ")).unwrap();
                }
            }
            writeln!(output).unwrap();
        }
        output
    }

    fn format_answer(&self, answer: &Answer) -> String {
        let mut output = String::new();
        writeln!(output, "## Answer\n").unwrap();
        writeln!(output, "**Question:** {}\n", answer.question).unwrap();
        writeln!(output, "{}\n", answer.text).unwrap();
        if !answer.cited_pages.is_empty() {
            let pages: Vec<String> = answer
                .cited_pages
                .iter()
                .map(|p| format!("`{}`", p))
                .collect();
            writeln!(output, "**Cited pages:** {}", pages.join(", ")).unwrap();
        }
        output
    }

    fn format_documents(&self, documents: &[DocumentRecord]) -> String {
        if documents.is_empty() {
            return "## Documents\n\n*No documents ingested yet.*\n".to_string();
        }

        let mut output = String::new();
        writeln!(output, "## Documents\n").unwrap();
        writeln!(output, "| ID | File | Title | Keywords |").unwrap();
        writeln!(output, "|----|------|-------|----------|").unwrap();
        for doc in documents {
            writeln!(
                output,
                "| `{}` | {} | {} | {} |",
                doc.id,
                doc.file_name,
                doc.title.as_deref().unwrap_or("-"),
                if doc.keywords.is_empty() {
                    "-".to_string()
                } else {
                    doc.keywords.join(", ")
                },
            )
            .unwrap();
        }
        output
    }

    fn format_status(&self, status: &StatusInfo) -> String {
        let mut output = String::new();
        writeln!(output, "## Status\n").unwrap();
        writeln!(output, "### Store\n").unwrap();
        writeln!(output, "- **Path:** `{}`", status.database_path).unwrap();
        writeln!(output, "- **Documents:** {}", status.documents).unwrap();
        writeln!(output, "- **Pages:** {}", status.pages).unwrap();
        writeln!(output).unwrap();
        writeln!(output, "### Provider\n").unwrap();
        writeln!(output, "- **URL:** `{}`", status.provider_url).unwrap();
        writeln!(
            output,
            "- **Embedding:** {} (dim {})",
            status.embedding_model, status.embedding_dimension
        )
        .unwrap();
        writeln!(output, "- **Chat:** {}", status.chat_model).unwrap();
        writeln!(
            output,
            "- **API key:** {}",
            if status.api_key_present { "set" } else { "missing" }
        )
        .unwrap();
        writeln!(
            output,
            "- **Relevance threshold:** {:.2}",
            status.relevance_threshold
        )
        .unwrap();
        output
    }

    fn format_message(&self, message: &str) -> String {
        format!("> {}\n", message)
    }

    fn format_error(&self, error: &str) -> String {
        format!("> ⚠️ **Error:** {}\n", error)
    }
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_answer() -> Answer {
        Answer {
            document_id: "abc123".to_string(),
            question: "Who is Alice?".to_string(),
            text: "Alice is introduced early [Page 1].".to_string(),
            cited_pages: vec![1],
            duration_ms: 42,
        }
    }

    #[test]
    fn test_text_answer_lists_citations() {
        let output = TextFormatter.format_answer(&sample_answer());
        assert!(output.contains("[Page 1]"));
        assert!(output.contains("Cited pages: 1"));
    }

    #[test]
    fn test_json_answer_roundtrips() {
        let output = JsonFormatter::new(false).format_answer(&sample_answer());
        let parsed: Answer = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.cited_pages, vec![1]);
    }

    #[test]
    fn test_markdown_documents_empty() {
        let output = MarkdownFormatter.format_documents(&[]);
        assert!(output.contains("No documents"));
    }
}
