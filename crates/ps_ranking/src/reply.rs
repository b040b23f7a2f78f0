use std::collections::HashMap;

use ps_core::{Article, Error, RankedArticle, Result, SearchResponse};

/// Parsed form of the model's ranking reply.
///
/// The model is asked for three blank-line separated sections:
///
/// ```text
/// RANKINGS:
/// 1: 3, 87.5
/// 2: 1, 60
///
/// EXPLANATIONS:
/// 3: strong overlap with the profile
/// 1: tangential
///
/// SUMMARY:
/// free text
/// ```
///
/// where each ranking line is `rank: article_number, score`.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingReply {
    pub scores: Vec<(usize, f64)>,
    pub explanations: HashMap<usize, String>,
    pub summary: String,
}

pub fn parse(text: &str) -> Result<RankingReply> {
    let sections: Vec<&str> = text.split("\n\n").collect();
    let rankings_section = section(&sections, "RANKINGS:")?;
    let explanations_section = section(&sections, "EXPLANATIONS:")?;
    let summary_section = section(&sections, "SUMMARY:")?;

    let mut scores = Vec::new();
    for line in rankings_section.lines().skip(1) {
        let Some((_, rest)) = line.split_once(':') else {
            continue;
        };
        let Some((num, score)) = rest.split_once(',') else {
            continue;
        };
        match (num.trim().parse::<usize>(), score.trim().parse::<f64>()) {
            (Ok(num), Ok(score)) if score.is_finite() => scores.push((num, score)),
            _ => tracing::warn!("unparseable ranking line: {:?}", line),
        }
    }
    if scores.is_empty() {
        return Err(Error::Ranking("no rankings in model reply".to_string()));
    }

    let mut explanations = HashMap::new();
    for line in explanations_section.lines().skip(1) {
        if let Some((num, explanation)) = line.split_once(':') {
            if let Ok(num) = num.trim().parse::<usize>() {
                explanations.insert(num, explanation.trim().to_string());
            }
        }
    }

    let summary = summary_section
        .trim_start()
        .trim_start_matches("SUMMARY:")
        .trim()
        .to_string();

    Ok(RankingReply {
        scores,
        explanations,
        summary,
    })
}

fn section<'a>(sections: &[&'a str], header: &str) -> Result<&'a str> {
    sections
        .iter()
        .find(|s| s.trim_start().starts_with(header))
        .copied()
        .ok_or_else(|| Error::Ranking(format!("missing {} section in model reply", header)))
}

impl RankingReply {
    /// Apply the scores to the candidate list. Article numbers are 1-based;
    /// unknown numbers are dropped. The result is sorted by descending score
    /// and cut to `limit`.
    pub fn apply(self, articles: &[Article], limit: usize) -> SearchResponse {
        let RankingReply {
            scores,
            mut explanations,
            summary,
        } = self;

        let mut ranked = Vec::new();
        for (num, score) in scores {
            let Some(article) = num.checked_sub(1).and_then(|i| articles.get(i)) else {
                tracing::warn!("model ranked unknown article {}", num);
                continue;
            };
            ranked.push(RankedArticle {
                article: article.clone(),
                score,
                reasoning: explanations
                    .remove(&num)
                    .unwrap_or_else(|| "No explanation provided".to_string()),
            });
        }

        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(limit);

        SearchResponse {
            articles: ranked,
            llm_reasoning: summary,
        }
    }
}
