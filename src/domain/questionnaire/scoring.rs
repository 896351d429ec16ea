//! ScoringEngine - weighted completeness ("clarity") over the full registry.
//!
//! Every catalog entry counts toward the total, visible or not. A hidden,
//! unanswered question therefore keeps the score below 100.

use serde::Serialize;

use crate::domain::foundation::Percentage;

use super::answers::Answers;
use super::registry::QuestionRegistry;
use super::section::SectionId;

/// Stateless scorer.
pub struct ScoringEngine;

impl ScoringEngine {
    /// `round(100 * earned / total)` with required questions weighted 2 and
    /// optional ones 1. Zero for an empty registry.
    pub fn clarity_score(registry: &QuestionRegistry, answers: &Answers) -> Percentage {
        let (earned, total) = registry
            .questions()
            .iter()
            .fold((0u32, 0u32), |(earned, total), q| {
                let weight = q.weight();
                let earned = if q.is_answered(answers) { earned + weight } else { earned };
                (earned, total + weight)
            });
        Percentage::from_ratio(earned, total)
    }

    /// Per-section breakdown for the review screen and completion record.
    pub fn review_summary(registry: &QuestionRegistry, answers: &Answers) -> ReviewSummary {
        let sections = registry
            .sections()
            .iter()
            .filter_map(|section| {
                let span = registry.section_span(section.id)?;
                let questions = &registry.questions()[span];
                let (earned, points) = questions.iter().fold((0, 0), |(e, p), q| {
                    let w = q.weight();
                    (if q.is_answered(answers) { e + w } else { e }, p + w)
                });
                Some(SectionSummary {
                    section: section.id,
                    title: section.title,
                    answered: questions.iter().filter(|q| q.is_answered(answers)).count(),
                    total: questions.len(),
                    score: Percentage::from_ratio(earned, points),
                })
            })
            .collect();

        let missing_required = registry
            .questions()
            .iter()
            .filter(|q| q.blocks_progress(answers) && q.is_visible(answers))
            .map(|q| q.id)
            .collect();

        ReviewSummary {
            clarity: Self::clarity_score(registry, answers),
            sections,
            missing_required,
        }
    }
}

/// Completeness of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSummary {
    pub section: SectionId,
    pub title: &'static str,
    pub answered: usize,
    pub total: usize,
    pub score: Percentage,
}

/// Review-screen view of the whole foundation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub clarity: Percentage,
    pub sections: Vec<SectionSummary>,
    /// Ids of visible required questions still unanswered.
    pub missing_required: Vec<&'static str>,
}

impl ReviewSummary {
    pub fn is_complete(&self) -> bool {
        self.missing_required.is_empty()
    }
}
