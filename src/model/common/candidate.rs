use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::common::position::Position;

/// Opaque candidate identifier assigned by the server.
pub type CandidateId = String;

/// A candidate standing for a single position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// A candidate that has not been stored yet, and so has no ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCandidate {
    pub name: String,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl NewCandidate {
    /// An empty biography is treated as no biography.
    pub fn new(name: impl Into<String>, position: Position, bio: Option<String>) -> Self {
        Self {
            name: name.into(),
            position,
            bio: bio.filter(|bio| !bio.trim().is_empty()),
            photo_url: None,
        }
    }
}

/// Group candidates by the position they stand for. Every position has an
/// entry, possibly empty, and candidates keep their relative order.
pub fn by_position(candidates: &[Candidate]) -> BTreeMap<Position, Vec<&Candidate>> {
    let mut groups: BTreeMap<Position, Vec<&Candidate>> = Position::ALL
        .into_iter()
        .map(|position| (position, Vec::new()))
        .collect();
    for candidate in candidates {
        groups
            .entry(candidate.position)
            .or_default()
            .push(candidate);
    }
    groups
}
