//! Grade Ordinals
//!
//! Grades run from `NR` (not rated) up to `AAA`. Comparison goes through a
//! fixed ordinal table; grades the table does not know rank as `NR`.

/// Ordinal rank of every recognized grade, highest first.
pub const GRADE_ORDINALS: &[(&str, u8)] = &[
    ("AAA", 7),
    ("AA", 6),
    ("A", 5),
    ("BBB", 4),
    ("BB", 3),
    ("B", 2),
    ("CCC", 1),
    ("NR", 0),
];

/// Grade reported when an entity has no rating at all.
pub const NOT_RATED: &str = "NR";

/// Look up the ordinal for a grade. Matching is exact and case-sensitive.
pub fn ordinal(grade: &str) -> Option<u8> {
    GRADE_ORDINALS
        .iter()
        .find(|(name, _)| *name == grade)
        .map(|(_, rank)| *rank)
}

/// Rank used for comparisons: unknown grades count as `NR`.
pub fn rank(grade: &str) -> u8 {
    ordinal(grade).unwrap_or(0)
}

pub fn is_recognized(grade: &str) -> bool {
    ordinal(grade).is_some()
}
