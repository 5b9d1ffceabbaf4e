//! Grounded answer composition from relevant pages.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CompositionError;
use crate::models::RankedPage;
use crate::services::provider::TextModel;

/// Returned when no page clears the relevance threshold. The generative
/// capability is not consulted in that case: an answer with no grounding
/// would be a hallucination.
pub const NO_RELEVANT_CONTENT_ANSWER: &str = "No highly relevant pages found for this question.";

const SYSTEM_PROMPT: &str = "You are a PDF assistant that answers user questions accurately. \
Your responses must contain inline citations referring to the page number like this: [Page 12].";

static CITATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[Page (\d+)\]").expect("valid citation pattern"));

/// Compose a cited answer from the ranked, relevance-filtered pages.
/// Returns the generated text verbatim; citation rendering is the
/// presentation layer's concern.
pub async fn compose(
    model: &dyn TextModel,
    question: &str,
    relevant_pages: &[RankedPage],
) -> Result<String, CompositionError> {
    if relevant_pages.is_empty() {
        return Ok(NO_RELEVANT_CONTENT_ANSWER.to_string());
    }

    let user_prompt = build_prompt(question, relevant_pages);
    let answer = model.generate(SYSTEM_PROMPT, &user_prompt).await?;
    Ok(answer)
}

fn build_prompt(question: &str, relevant_pages: &[RankedPage]) -> String {
    let context = relevant_pages
        .iter()
        .map(|p| format!("Page {} (Relevance: {:.2}): {}", p.number, p.similarity, p.text))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Here is the PDF content with page numbers along with a similarity factor calculated \
         using vector search, which tells how relevant the page is to the question:\n\n\
         {context}\n\n\
         Answer the following question, embedding inline citations in the format [Page X] \
         wherever necessary: {question}"
    )
}

/// Distinct page numbers cited in an answer, in first-appearance order.
/// The browser viewer deep-links on exactly these `[Page N]` tokens.
pub fn cited_pages(answer: &str) -> Vec<u32> {
    let mut seen = Vec::new();
    for capture in CITATION.captures_iter(answer) {
        if let Ok(number) = capture[1].parse::<u32>()
            && !seen.contains(&number)
        {
            seen.push(number);
        }
    }
    seen
}
