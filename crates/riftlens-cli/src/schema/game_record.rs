use std::collections::BTreeMap;

use anyhow::Context;
use riftlens_model::{FrameMetrics, GameRecord, MetricKind, Team, VertexLabel};
use serde::{Deserialize, Serialize};

/// Wire form of one game's metric table, as produced by the external metric
/// computation step: per time frame, a map from metric kind to per-vertex
/// values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetricsRecord {
    pub game_id: String,
    pub winner: Team,
    pub time_frames: Vec<FrameMetricsRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameMetricsRecord {
    pub metrics: BTreeMap<MetricKind, BTreeMap<VertexLabel, f64>>,
}

impl GameMetricsRecord {
    /// Converts to the core record, requiring a value for every
    /// (metric kind, vertex) pair of every frame.
    pub fn into_game_record(self) -> anyhow::Result<GameRecord> {
        let game_id = self.game_id;
        let mut time_frames = Vec::with_capacity(self.time_frames.len());
        for (frame_index, record) in self.time_frames.into_iter().enumerate() {
            let mut frame = FrameMetrics::zeroed();
            for kind in MetricKind::ALL {
                let values = record.metrics.get(&kind).with_context(|| {
                    format!("game {game_id}: frame {frame_index}: metric {kind} missing")
                })?;
                for vertex in VertexLabel::ALL {
                    let value = values.get(&vertex).with_context(|| {
                        format!(
                            "game {game_id}: frame {frame_index}: metric {kind} has no value for {vertex}"
                        )
                    })?;
                    frame.set(kind, vertex, *value);
                }
            }
            time_frames.push(frame);
        }
        Ok(GameRecord {
            game_id,
            winner: self.winner,
            time_frames,
        })
    }
}

/// Converts a whole input file of records.
pub fn into_game_records(records: Vec<GameMetricsRecord>) -> anyhow::Result<Vec<GameRecord>> {
    records
        .into_iter()
        .map(GameMetricsRecord::into_game_record)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_frame(value: f64) -> FrameMetricsRecord {
        let metrics = MetricKind::ALL
            .into_iter()
            .map(|kind| {
                let values = VertexLabel::ALL.into_iter().map(|v| (v, value)).collect();
                (kind, values)
            })
            .collect();
        FrameMetricsRecord { metrics }
    }

    #[test]
    fn test_complete_record_converts() {
        let record = GameMetricsRecord {
            game_id: "g1".to_owned(),
            winner: Team::T2,
            time_frames: vec![full_frame(1.5)],
        };
        let game = record.into_game_record().unwrap();
        assert_eq!(game.winner, Team::T2);
        assert_eq!(game.frame_count(), 1);
        assert_eq!(
            game.metric_value(MetricKind::Betweenness, VertexLabel::T2R5, 0),
            1.5
        );
    }

    #[test]
    fn test_missing_vertex_value_is_an_error() {
        let mut frame = full_frame(0.0);
        frame
            .metrics
            .get_mut(&MetricKind::Closeness)
            .unwrap()
            .remove(&VertexLabel::Death);
        let record = GameMetricsRecord {
            game_id: "g1".to_owned(),
            winner: Team::T1,
            time_frames: vec![frame],
        };
        let err = record.into_game_record().unwrap_err();
        assert!(err.to_string().contains("no value for DEATH"));
    }

    #[test]
    fn test_wire_names_deserialize() {
        let json = r#"{
            "game_id": "g7",
            "winner": "T1",
            "time_frames": []
        }"#;
        let record: GameMetricsRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.winner, Team::T1);
        assert_eq!(record.time_frames.len(), 0);
    }
}
