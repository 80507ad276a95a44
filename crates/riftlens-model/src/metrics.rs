//! Per-game positional metric tables.
//!
//! Metric values are computed externally from each time frame's interaction
//! graph (the pipeline never computes centralities itself) and supplied as a
//! table keyed by game, time frame, vertex, and metric kind.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::vertex::{Team, VERTEX_COUNT, VertexLabel};

/// Number of metric kinds.
pub const METRIC_COUNT: usize = 5;

/// A positional or interaction metric of one vertex within one time frame.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum MetricKind {
    #[serde(rename = "indeg")]
    InDegree,
    #[serde(rename = "outdeg")]
    OutDegree,
    #[serde(rename = "cls")]
    Closeness,
    #[serde(rename = "btw")]
    Betweenness,
    #[serde(rename = "eige")]
    Eigenvector,
}

impl MetricKind {
    /// All metric kinds in canonical order.
    pub const ALL: [MetricKind; METRIC_COUNT] = [
        MetricKind::InDegree,
        MetricKind::OutDegree,
        MetricKind::Closeness,
        MetricKind::Betweenness,
        MetricKind::Eigenvector,
    ];

    /// Position of this kind in the canonical order, in `0..METRIC_COUNT`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The wire name of this kind (`"indeg"`, `"outdeg"`, `"cls"`, `"btw"`,
    /// `"eige"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MetricKind::InDegree => "indeg",
            MetricKind::OutDegree => "outdeg",
            MetricKind::Closeness => "cls",
            MetricKind::Betweenness => "btw",
            MetricKind::Eigenvector => "eige",
        }
    }

    /// The neutral value substituted for a time frame past a game's recorded
    /// duration.
    ///
    /// Degrees, closeness, and betweenness of an edgeless frame are all zero.
    /// Eigenvector centrality of the edgeless universe is the uniform unit
    /// vector, so every vertex gets `1 / sqrt(11)`.
    #[must_use]
    pub fn void_value(self) -> f64 {
        match self {
            MetricKind::InDegree
            | MetricKind::OutDegree
            | MetricKind::Closeness
            | MetricKind::Betweenness => 0.0,
            #[expect(clippy::cast_precision_loss)]
            MetricKind::Eigenvector => 1.0 / (VERTEX_COUNT as f64).sqrt(),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown metric kind: {kind}")]
pub struct ParseMetricKindError {
    pub kind: String,
}

impl FromStr for MetricKind {
    type Err = ParseMetricKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseMetricKindError { kind: s.to_owned() })
    }
}

/// Metric values of one time frame: one value per (metric kind, vertex).
#[derive(Debug, Clone, PartialEq)]
pub struct FrameMetrics {
    values: [[f64; VERTEX_COUNT]; METRIC_COUNT],
}

impl FrameMetrics {
    /// A frame with every value zero.
    #[must_use]
    pub const fn zeroed() -> Self {
        FrameMetrics {
            values: [[0.0; VERTEX_COUNT]; METRIC_COUNT],
        }
    }

    /// The void frame substituted past a game's recorded duration.
    #[must_use]
    pub fn void() -> Self {
        let mut frame = FrameMetrics::zeroed();
        for kind in MetricKind::ALL {
            for vertex in VertexLabel::ALL {
                frame.set(kind, vertex, kind.void_value());
            }
        }
        frame
    }

    #[must_use]
    pub const fn get(&self, kind: MetricKind, vertex: VertexLabel) -> f64 {
        self.values[kind.index()][vertex.index()]
    }

    pub const fn set(&mut self, kind: MetricKind, vertex: VertexLabel, value: f64) {
        self.values[kind.index()][vertex.index()] = value;
    }
}

/// One game's metric table: winner plus per-time-frame metric values.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub game_id: String,
    pub winner: Team,
    pub time_frames: Vec<FrameMetrics>,
}

impl GameRecord {
    /// Number of recorded time frames.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.time_frames.len()
    }

    /// The value of `kind` for `vertex` in time frame `frame`.
    ///
    /// A frame at or past the recorded duration yields the void value for
    /// `kind`; this lookup never fails.
    #[must_use]
    pub fn metric_value(&self, kind: MetricKind, vertex: VertexLabel, frame: usize) -> f64 {
        match self.time_frames.get(frame) {
            Some(metrics) => metrics.get(kind, vertex),
            None => kind.void_value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_wire_names() {
        for kind in MetricKind::ALL {
            assert_eq!(kind.as_str().parse::<MetricKind>().unwrap(), kind);
        }
        assert!("degree".parse::<MetricKind>().is_err());
    }

    #[test]
    fn test_eigenvector_void_is_uniform_unit_entry() {
        assert_eq!(MetricKind::Eigenvector.void_value(), 0.301_511_344_577_763_63);
        assert_eq!(MetricKind::Closeness.void_value(), 0.0);

        let void = FrameMetrics::void();
        for vertex in VertexLabel::ALL {
            assert_eq!(void.get(MetricKind::InDegree, vertex), 0.0);
            assert_eq!(
                void.get(MetricKind::Eigenvector, vertex),
                MetricKind::Eigenvector.void_value()
            );
        }
    }

    #[test]
    fn test_metric_value_substitutes_void_past_duration() {
        let mut frame = FrameMetrics::zeroed();
        frame.set(MetricKind::InDegree, VertexLabel::T1R1, 3.0);
        let game = GameRecord {
            game_id: "g1".to_owned(),
            winner: Team::T1,
            time_frames: vec![frame],
        };

        assert_eq!(
            game.metric_value(MetricKind::InDegree, VertexLabel::T1R1, 0),
            3.0
        );
        assert_eq!(
            game.metric_value(MetricKind::InDegree, VertexLabel::T1R1, 5),
            0.0
        );
        assert_eq!(
            game.metric_value(MetricKind::Eigenvector, VertexLabel::T2R2, 5),
            MetricKind::Eigenvector.void_value()
        );
    }
}
