use crate::theme::Color;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Identity of a segment; the selection model keys on it.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct SegmentId(String);

crate::impl_string_newtype!(SegmentId);

impl From<&str> for SegmentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Stroke dash specification, resolved once when the segment is built.
///
/// Deserialization accepts both historical shapes: a flat on/off pattern
/// applied to every layer, or one pattern per layer index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DashSpec {
    PerLayer(Vec<Vec<f64>>),
    Uniform(Vec<f64>),
}

impl DashSpec {
    pub fn solid() -> Self {
        Self::Uniform(Vec::new())
    }

    /// The pattern for one layer. A missing per-layer entry renders solid.
    pub fn for_layer(&self, layer: usize) -> &[f64] {
        match self {
            Self::Uniform(pattern) => pattern,
            Self::PerLayer(patterns) => patterns.get(layer).map(Vec::as_slice).unwrap_or(&[]),
        }
    }
}

impl Default for DashSpec {
    fn default() -> Self {
        Self::solid()
    }
}

/// One angular category of the wheel. Owned by the caller, immutable per
/// render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    pub label: String,
    #[serde(default)]
    pub color: Color,
    /// Rings this segment actually draws; `None` means every ring within
    /// the wheel's effective layer count.
    #[serde(default)]
    pub layer_count: Option<usize>,
    #[serde(default)]
    pub dash: DashSpec,
    /// Allow-list of visible layer indices. Empty means all in range.
    #[serde(default)]
    pub visible_layers: Vec<usize>,
    /// Layers forced to the theme's neutral gray.
    #[serde(default)]
    pub grayed_layers: Vec<usize>,
    #[serde(default)]
    pub disabled: bool,
    /// Adds a marker glyph after the label text.
    #[serde(default)]
    pub advanced: bool,
    #[serde(default)]
    pub hidden_label: bool,
}

impl Segment {
    pub fn new(id: impl Into<SegmentId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            color: Color::default(),
            layer_count: None,
            dash: DashSpec::solid(),
            visible_layers: Vec::new(),
            grayed_layers: Vec::new(),
            disabled: false,
            advanced: false,
            hidden_label: false,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_layer_count(mut self, count: usize) -> Self {
        self.layer_count = Some(count);
        self
    }

    pub fn with_dash(mut self, dash: DashSpec) -> Self {
        self.dash = dash;
        self
    }

    /// Whether this segment renders the given layer index at all.
    pub fn draws_layer(&self, layer: usize) -> bool {
        if let Some(count) = self.layer_count
            && layer >= count
        {
            return false;
        }
        self.visible_layers.is_empty() || self.visible_layers.contains(&layer)
    }

    pub fn is_grayed(&self, layer: usize) -> bool {
        self.grayed_layers.contains(&layer)
    }
}
