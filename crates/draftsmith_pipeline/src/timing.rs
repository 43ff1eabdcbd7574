//! Per-stage timing records.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use draftsmith_core::{ArticleRef, DraftSet};
use draftsmith_error::Stage;
use serde::Serialize;

/// Start and end of one external call.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct StageTiming {
    stage: Stage,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
}

impl StageTiming {
    /// Record a finished call.
    pub fn new(stage: Stage, started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> Self {
        Self {
            stage,
            started_at,
            finished_at,
        }
    }

    /// Elapsed milliseconds (never negative).
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds().max(0)
    }
}

impl Serialize for StageTiming {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("StageTiming", 4)?;
        state.serialize_field("stage", &self.stage.to_string())?;
        state.serialize_field("startedAt", &self.started_at)?;
        state.serialize_field("finishedAt", &self.finished_at)?;
        state.serialize_field("durationMs", &self.duration_ms())?;
        state.end()
    }
}

/// Result of a successful generation run.
#[derive(Debug, Clone, Serialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    drafts: DraftSet,
    article: ArticleRef,
    timings: Vec<StageTiming>,
}

impl GenerationReport {
    pub(crate) fn new(drafts: DraftSet, article: ArticleRef, timings: Vec<StageTiming>) -> Self {
        Self {
            drafts,
            article,
            timings,
        }
    }

    /// The drafts, dropping the rest of the report.
    pub fn into_drafts(self) -> DraftSet {
        self.drafts
    }

    /// Sum of all stage durations.
    pub fn total_ms(&self) -> i64 {
        self.timings.iter().map(StageTiming::duration_ms).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_timing_serializes_stage_and_duration() {
        let start = Utc::now();
        let timing = StageTiming::new(Stage::UrlSummary, start, start + Duration::milliseconds(1500));
        let json = serde_json::to_value(&timing).unwrap();
        assert_eq!(json["stage"], "url summary");
        assert_eq!(json["durationMs"], 1500);
    }
}
