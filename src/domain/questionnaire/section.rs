//! Sections and the SectionMap that partitions the question list.
//!
//! Sections are contiguous, ordered runs of questions. The synthetic
//! `review` section closes the flow; it owns no questions and is never
//! navigated into by index.

use std::fmt;
use std::ops::Range;

use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Identifier of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SectionId(&'static str);

impl SectionId {
    /// The terminal review section.
    pub const REVIEW: SectionId = SectionId("review");

    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn is_review(&self) -> bool {
        *self == Self::REVIEW
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A named chapter of the interview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub id: SectionId,
    pub name: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
}

impl Section {
    pub const fn new(
        id: &'static str,
        name: &'static str,
        title: &'static str,
        subtitle: &'static str,
    ) -> Self {
        Self {
            id: SectionId::new(id),
            name,
            title,
            subtitle,
        }
    }

    /// The synthetic terminal section.
    pub const fn review() -> Self {
        Self::new(
            "review",
            "Review",
            "Review your foundation",
            "Check everything before we lock it in",
        )
    }
}

/// Partition of question indices into ordered sections.
#[derive(Debug, Clone)]
pub struct SectionMap {
    sections: Vec<Section>,
    spans: Vec<Range<usize>>,
    owners: Vec<usize>,
}

impl SectionMap {
    /// Builds the partition from declared sections and each question's section.
    ///
    /// # Errors
    ///
    /// - `ReservedSection` if `review` is declared or owns a question
    /// - `UnknownSection` if a question names an undeclared section
    /// - `SectionOutOfOrder` if a section's questions are not contiguous or
    ///   appear out of declared order
    pub fn build(
        sections: Vec<Section>,
        question_sections: &[SectionId],
    ) -> Result<Self, DomainError> {
        if let Some(dup) = sections.iter().enumerate().find_map(|(i, s)| {
            sections[..i].iter().any(|o| o.id == s.id).then_some(s.id)
        }) {
            return Err(DomainError::new(
                ErrorCode::DuplicateSection,
                format!("Section '{}' declared twice", dup),
            ));
        }
        if sections.iter().any(|s| s.id.is_review()) {
            return Err(DomainError::new(
                ErrorCode::ReservedSection,
                "The review section is synthetic and cannot be declared",
            ));
        }

        let mut owners = Vec::with_capacity(question_sections.len());
        let mut last_position: Option<usize> = None;

        for (index, section_id) in question_sections.iter().enumerate() {
            if section_id.is_review() {
                return Err(DomainError::new(
                    ErrorCode::ReservedSection,
                    "Questions cannot belong to the review section",
                )
                .with_detail("index", index.to_string()));
            }
            let position = sections
                .iter()
                .position(|s| s.id == *section_id)
                .ok_or_else(|| {
                    DomainError::new(
                        ErrorCode::UnknownSection,
                        format!("Unknown section '{}'", section_id),
                    )
                    .with_detail("index", index.to_string())
                })?;
            if let Some(last) = last_position {
                if position < last {
                    return Err(DomainError::new(
                        ErrorCode::SectionOutOfOrder,
                        format!("Section '{}' resumes after a later section", section_id),
                    )
                    .with_detail("index", index.to_string()));
                }
            }
            last_position = Some(position);
            owners.push(position);
        }

        let spans = (0..sections.len())
            .map(|p| {
                let start = owners.iter().filter(|&&o| o < p).count();
                let end = owners.iter().filter(|&&o| o <= p).count();
                start..end
            })
            .collect();

        Ok(Self {
            sections,
            spans,
            owners,
        })
    }

    /// The section owning question `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a valid question index.
    pub fn section_of(&self, index: usize) -> &Section {
        &self.sections[self.owners[index]]
    }

    /// True iff `index` opens its section.
    pub fn is_first_of_section(&self, index: usize) -> bool {
        index == 0 || self.owners[index] != self.owners[index - 1]
    }

    /// Question index range covered by a section.
    pub fn span(&self, id: SectionId) -> Option<Range<usize>> {
        self.position(id).map(|p| self.spans[p].clone())
    }

    /// Order of a section among the declared sections.
    pub fn position(&self, id: SectionId) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Position of the section owning question `index`.
    pub fn position_of(&self, index: usize) -> usize {
        self.owners[index]
    }

    pub fn get(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: SectionId = SectionId::new("a");
    const B: SectionId = SectionId::new("b");
    const C: SectionId = SectionId::new("c");

    fn sections() -> Vec<Section> {
        vec![
            Section::new("a", "A", "Section A", ""),
            Section::new("b", "B", "Section B", ""),
            Section::new("c", "C", "Section C", ""),
        ]
    }

    #[test]
    fn section_of_follows_partition() {
        let map = SectionMap::build(sections(), &[A, A, B, C, C]).unwrap();
        assert_eq!(map.section_of(0).id, A);
        assert_eq!(map.section_of(1).id, A);
        assert_eq!(map.section_of(2).id, B);
        assert_eq!(map.section_of(4).id, C);
    }

    #[test]
    fn first_of_section_marks_boundaries() {
        let map = SectionMap::build(sections(), &[A, A, B, C, C]).unwrap();
        let firsts: Vec<bool> = (0..5).map(|i| map.is_first_of_section(i)).collect();
        assert_eq!(firsts, vec![true, false, true, true, false]);
    }

    #[test]
    fn spans_cover_contiguous_runs() {
        let map = SectionMap::build(sections(), &[A, A, C]).unwrap();
        assert_eq!(map.span(A), Some(0..2));
        assert_eq!(map.span(B), Some(2..2));
        assert_eq!(map.span(C), Some(2..3));
        assert_eq!(map.span(SectionId::new("zzz")), None);
    }

    #[test]
    fn rejects_non_contiguous_sections() {
        let err = SectionMap::build(sections(), &[A, B, A]).unwrap_err();
        assert_eq!(err.code, ErrorCode::SectionOutOfOrder);
    }

    #[test]
    fn rejects_unknown_section() {
        let err = SectionMap::build(sections(), &[A, SectionId::new("x")]).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownSection);
    }

    #[test]
    fn rejects_review_membership() {
        let err = SectionMap::build(sections(), &[A, SectionId::REVIEW]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReservedSection);

        let mut declared = sections();
        declared.push(Section::review());
        let err = SectionMap::build(declared, &[A]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReservedSection);
    }

    #[test]
    fn rejects_duplicate_declaration() {
        let mut declared = sections();
        declared.push(Section::new("a", "A again", "", ""));
        let err = SectionMap::build(declared, &[A]).unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateSection);
    }
}
