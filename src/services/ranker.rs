//! Relevance ranking of stored pages against a question embedding.

use crate::error::SimilarityError;
use crate::models::{Page, RankedPage};
use crate::services::similarity::cosine_similarity;

/// Score every page against the question, sort by descending similarity,
/// and keep pages at or above the threshold.
///
/// The sort is stable and the input arrives page-number ascending, so ties
/// keep source order. Zero stored pages yields an empty vector; the caller
/// decides how to respond.
pub fn rank_pages(
    question_embedding: &[f32],
    pages: &[Page],
    threshold: f32,
) -> Result<Vec<RankedPage>, SimilarityError> {
    let mut ranked = Vec::with_capacity(pages.len());
    for page in pages {
        let similarity = cosine_similarity(question_embedding, &page.embedding)?;
        ranked.push(RankedPage {
            number: page.number,
            text: page.text.clone(),
            similarity,
        });
    }

    ranked.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.retain(|p| p.similarity >= threshold);

    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: u32, embedding: Vec<f32>) -> Page {
        Page {
            number,
            text: format!("page {number}"),
            embedding,
        }
    }

    #[test]
    fn test_sorted_descending_and_filtered() {
        let question = vec![1.0, 0.0];
        let pages = vec![
            page(1, vec![0.0, 1.0]),
            page(2, vec![1.0, 0.0]),
            page(3, vec![1.0, 0.2]),
        ];

        let ranked = rank_pages(&question, &pages, 0.8).unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].number, 2);
        assert_eq!(ranked[1].number, 3);
        assert!(ranked[0].similarity >= ranked[1].similarity);
        assert!(ranked.iter().all(|p| p.similarity >= 0.8));
    }

    #[test]
    fn test_ties_keep_page_order() {
        let question = vec![1.0, 0.0];
        let pages = vec![
            page(1, vec![2.0, 0.0]),
            page(2, vec![0.5, 0.0]),
            page(3, vec![1.0, 0.0]),
        ];

        let ranked = rank_pages(&question, &pages, 0.0).unwrap();
        let numbers: Vec<u32> = ranked.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_pages_yield_empty() {
        let ranked = rank_pages(&[1.0, 0.0], &[], 0.8).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_zero_embedding_never_passes_threshold() {
        let question = vec![1.0, 0.0];
        let pages = vec![page(1, vec![0.0, 0.0]), page(2, vec![1.0, 0.0])];

        let ranked = rank_pages(&question, &pages, 0.8).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].number, 2);
    }

    #[test]
    fn test_dimension_mismatch_propagates() {
        let question = vec![1.0, 0.0, 0.0];
        let pages = vec![page(1, vec![1.0, 0.0])];
        assert!(rank_pages(&question, &pages, 0.8).is_err());
    }
}
