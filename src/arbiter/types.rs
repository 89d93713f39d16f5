use serde::Serialize;

use crate::vectordb::Candidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// How a [`Selection`] was reached.
pub enum SelectionSource {
    /// Retrieval returned nothing.
    NoCandidates,
    /// Exactly one candidate; returned as-is.
    Insufficient,
    /// The language model's pick was accepted.
    Arbitrated,
    /// The model failed or replied unusably; top two by score.
    FallbackTopTwo,
}

impl SelectionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionSource::NoCandidates => "NO_CANDIDATES",
            SelectionSource::Insufficient => "INSUFFICIENT",
            SelectionSource::Arbitrated => "SELECTED",
            SelectionSource::FallbackTopTwo => "FALLBACK_TOP2",
        }
    }
}

impl std::fmt::Display for SelectionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Up to two candidates with distinct ids, in presentation order.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub candidates: Vec<Candidate>,
    pub source: SelectionSource,
}

impl Selection {
    pub fn empty() -> Self {
        Self {
            candidates: Vec::new(),
            source: SelectionSource::NoCandidates,
        }
    }

    pub fn ids(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn into_candidates(self) -> Vec<Candidate> {
        self.candidates
    }
}
