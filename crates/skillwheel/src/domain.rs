use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::path::Path;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;
use wheelchart::{Color, DashSpec, Segment, SegmentId};

/// Lifecycle state of one competency milestone. Accepts the historical
/// spellings case-insensitively.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum MilestoneStatus {
    #[strum(to_string = "completed", serialize = "complete", serialize = "done")]
    Completed,
    #[strum(to_string = "in-progress", serialize = "in_progress", serialize = "inprogress")]
    InProgress,
    #[strum(to_string = "pending", serialize = "todo")]
    Pending,
}

impl MilestoneStatus {
    /// The fixed status→dash table the wheel renders with.
    pub fn dash_pattern(&self) -> Vec<f64> {
        match self {
            Self::Completed => Vec::new(),
            Self::InProgress => vec![4.0, 2.0],
            Self::Pending => vec![2.0, 4.0],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Milestone {
    #[serde(default)]
    pub name: Option<String>,
    pub status: MilestoneStatus,
}

/// One domain record as the upstream service supplies it. The engine
/// never sees these; `to_segments` is the documented input contract.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompetencyRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub advanced: bool,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

#[derive(Error, Debug)]
pub enum RecordsError {
    #[error("failed to read records: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse records: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn load_records(path: &Path) -> Result<Vec<CompetencyRecord>, RecordsError> {
    Ok(serde_json::from_str(&fs_err::read_to_string(path)?)?)
}

/// Load failure substitutes an empty list so the wheel renders its empty
/// state instead of aborting; the error is surfaced to the user log.
pub fn load_or_empty(path: &Path) -> Vec<CompetencyRecord> {
    match load_records(path) {
        Ok(records) => records,
        Err(e) => {
            log::error!("could not load records from {}: {e}", path.display());
            Vec::new()
        }
    }
}

fn fallback_color(index: usize) -> Color {
    const CYCLE: [(f64, f64, f64); 6] = [
        (0.29, 0.47, 0.69),
        (0.85, 0.54, 0.20),
        (0.42, 0.64, 0.34),
        (0.75, 0.31, 0.30),
        (0.52, 0.44, 0.68),
        (0.34, 0.62, 0.64),
    ];
    let (r, g, b) = CYCLE[index % CYCLE.len()];
    Color::new(r, g, b, 1.0)
}

/// Maps domain records into the generic segment descriptors the chart
/// consumes: milestone count becomes the layer count, each milestone's
/// status becomes that layer's dash pattern.
pub fn to_segments(records: &[CompetencyRecord]) -> Vec<Segment> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let dash = DashSpec::PerLayer(
                record
                    .milestones
                    .iter()
                    .map(|m| m.status.dash_pattern())
                    .collect(),
            );
            let mut segment = Segment::new(SegmentId::from(record.id.as_str()), record.name.as_str())
                .with_color(record.color.unwrap_or_else(|| fallback_color(i)))
                .with_layer_count(record.milestones.len().max(1))
                .with_dash(dash);
            segment.advanced = record.advanced;
            segment
        })
        .collect()
}
