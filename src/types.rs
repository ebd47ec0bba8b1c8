//! Core types shared by the CLI and the report generators

use crate::lineage::{Family, Relationship};
use crate::error::FamilyResult;
use serde::{Deserialize, Serialize};

/// A pair of member names to classify
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CousinQuery {
    pub a: String,
    pub b: String,
}

impl CousinQuery {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    pub fn run(&self, family: &Family) -> FamilyResult<CousinReport> {
        let relationship = family.cousin(&self.a, &self.b)?;
        Ok(CousinReport::new(self.a.clone(), self.b.clone(), relationship))
    }
}

/// Outcome of one cousin classification, ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CousinReport {
    pub a: String,
    pub b: String,
    pub degree: i32,
    pub removed: u32,
    pub ordinal: String,
}

impl CousinReport {
    pub fn new(a: String, b: String, relationship: Relationship) -> Self {
        Self {
            a,
            b,
            degree: relationship.degree,
            removed: relationship.removed,
            ordinal: relationship.ordinal(),
        }
    }

    /// `'<a>' is a <ordinal> cousin <removed> removed from '<b>'`
    pub fn sentence(&self) -> String {
        format!(
            "'{}' is a {} cousin {} removed from '{}'",
            self.a, self.ordinal, self.removed, self.b
        )
    }
}

/// Pairs printed by the reference demonstration
pub fn demo_queries() -> Vec<CousinQuery> {
    [
        ("b", "c"),
        ("d", "f"),
        ("i", "n"),
        ("q", "e"),
        ("h", "c"),
        ("h", "a"),
        ("h", "h"),
        ("a", "a"),
    ]
    .into_iter()
    .map(|(a, b)| CousinQuery::new(a, b))
    .collect()
}
