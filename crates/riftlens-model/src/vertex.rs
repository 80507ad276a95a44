use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Number of vertex labels in the fixed universe.
pub const VERTEX_COUNT: usize = 11;

/// A vertex of the fixed interaction-graph universe.
///
/// Five role slots per team plus the `DEATH` sentinel that death events point
/// at. The discriminant order is the canonical vertex order used by bitmask
/// representations and the canonical graph encoding.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum VertexLabel {
    #[serde(rename = "T1-R1")]
    T1R1,
    #[serde(rename = "T1-R2")]
    T1R2,
    #[serde(rename = "T1-R3")]
    T1R3,
    #[serde(rename = "T1-R4")]
    T1R4,
    #[serde(rename = "T1-R5")]
    T1R5,
    #[serde(rename = "T2-R1")]
    T2R1,
    #[serde(rename = "T2-R2")]
    T2R2,
    #[serde(rename = "T2-R3")]
    T2R3,
    #[serde(rename = "T2-R4")]
    T2R4,
    #[serde(rename = "T2-R5")]
    T2R5,
    #[serde(rename = "DEATH")]
    Death,
}

impl VertexLabel {
    /// All vertex labels in canonical order.
    pub const ALL: [VertexLabel; VERTEX_COUNT] = [
        VertexLabel::T1R1,
        VertexLabel::T1R2,
        VertexLabel::T1R3,
        VertexLabel::T1R4,
        VertexLabel::T1R5,
        VertexLabel::T2R1,
        VertexLabel::T2R2,
        VertexLabel::T2R3,
        VertexLabel::T2R4,
        VertexLabel::T2R5,
        VertexLabel::Death,
    ];

    /// Position of this label in the canonical order, in `0..VERTEX_COUNT`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Label at canonical position `index`, or `None` if out of range.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The wire name of this label (`"T1-R1"` .. `"T2-R5"`, `"DEATH"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            VertexLabel::T1R1 => "T1-R1",
            VertexLabel::T1R2 => "T1-R2",
            VertexLabel::T1R3 => "T1-R3",
            VertexLabel::T1R4 => "T1-R4",
            VertexLabel::T1R5 => "T1-R5",
            VertexLabel::T2R1 => "T2-R1",
            VertexLabel::T2R2 => "T2-R2",
            VertexLabel::T2R3 => "T2-R3",
            VertexLabel::T2R4 => "T2-R4",
            VertexLabel::T2R5 => "T2-R5",
            VertexLabel::Death => "DEATH",
        }
    }
}

impl fmt::Display for VertexLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown vertex label: {label}")]
pub struct ParseVertexLabelError {
    pub label: String,
}

impl FromStr for VertexLabel {
    type Err = ParseVertexLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| ParseVertexLabelError {
                label: s.to_owned(),
            })
    }
}

/// One of the two competing teams; also the match-outcome class label.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::FromStr,
)]
pub enum Team {
    T1,
    T2,
}

impl Team {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Team::T1 => "T1",
            Team::T2 => "T2",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
