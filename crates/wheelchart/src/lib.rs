//! Radial wheel-chart layout and rendering engine.
//!
//! Lays out an arbitrary number of categories ("segments") as angular
//! sectors, each built from a variable number of concentric ring layers
//! with independent visual states, places labels with leader lines, and
//! resolves pointer events against the resulting geometry. Output is an
//! SVG document; the only other observable effect is the selection
//! callback on the facade.

#[macro_export]
macro_rules! impl_string_newtype {
    ($name:ty) => {
        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }
        }
    };
}

pub mod chart;
pub mod geometry;
pub mod labels;
pub mod segment;
pub mod state;
pub mod svg;
pub mod theme;
mod view;
pub mod viewport;

pub use chart::{ClickOutcome, CursorAction, HitTarget, WheelChart, WheelLayout, WheelProps};
pub use geometry::{INNER_RADIUS_RATIO, LayoutParams, Point};
pub use segment::{DashSpec, Segment, SegmentId};
pub use theme::{Color, Theme};
pub use viewport::WidthSource;
