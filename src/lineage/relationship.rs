use serde::{Deserialize, Serialize};
use std::fmt;

const ORDINAL_WORDS: [&str; 6] = ["zeroth", "first", "second", "third", "fourth", "fifth"];

/// Result of classifying two members against each other.
///
/// `degree` is the larger of the two generational distances to the lowest
/// common ancestor and `removed` the difference between them. The
/// `(-1, 0)` value marks identity or direct parent/child lineage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    pub degree: i32,
    pub removed: u32,
}

impl Relationship {
    /// Same member, or one is a direct child of the other
    pub const DIRECT: Relationship = Relationship {
        degree: -1,
        removed: 0,
    };

    /// Derive the relationship from each member's distance to the common ancestor
    pub fn from_distances(a_index: usize, b_index: usize) -> Self {
        Self {
            degree: a_index.max(b_index) as i32,
            removed: a_index.abs_diff(b_index) as u32,
        }
    }

    pub fn is_direct(&self) -> bool {
        self.degree < 0
    }

    pub fn as_tuple(&self) -> (i32, i32) {
        (self.degree, self.removed as i32)
    }

    /// Ordinal word for the cousin degree, "non" for direct lineage
    pub fn ordinal(&self) -> String {
        if self.is_direct() {
            return "non".to_string();
        }

        match ORDINAL_WORDS.get(self.degree as usize) {
            Some(word) => word.to_string(),
            None => numeric_ordinal(self.degree as u32),
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cousin {} removed", self.ordinal(), self.removed)
    }
}

fn numeric_ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}
