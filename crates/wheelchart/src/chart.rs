use crate::geometry::{
    self, INNER_RADIUS_RATIO, LayoutParams, Point, Ring, Sector,
};
use crate::labels::{self, LabelPlacement};
use crate::segment::{Segment, SegmentId};
use crate::state::{HighlightState, effective_layer_count};
use crate::svg::SvgWriter;
use crate::theme::Theme;
use crate::view;
use crate::viewport::{self, WidthSource, WidthSubscription};
use parking_lot::Mutex;
use std::iter::zip;
use std::sync::Arc;

pub const DEFAULT_HEIGHT: f64 = 360.0;
pub const DEFAULT_LAYERS: usize = 4;
/// Degrees of empty space between neighbouring sectors.
pub const DEFAULT_SECTOR_SPACING: f64 = 2.0;
pub const DEFAULT_LABEL_OFFSET: f64 = 12.0;
pub const DEFAULT_WINDOW_WIDTH: f64 = 640.0;
/// Space reserved outside the rim for labels and leaders.
const RADIUS_MARGIN: f64 = 60.0;
const HIT_PADDING: f64 = 4.0;

/// Facade input. Selection is owned by the caller (controlled-component
/// style): the chart reports selection changes through the callback and
/// never mutates `selected` itself.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelProps {
    pub segments: Vec<Segment>,
    pub selected: Option<SegmentId>,
    pub height: f64,
    /// Fixed width; `None` means responsive (measured, then fallback).
    pub width: Option<f64>,
    pub default_layers: usize,
    pub sector_spacing: f64,
    /// Radial distance between rings; `None` spreads the rings evenly
    /// between the inner radius and the rim.
    pub layer_spacing: Option<f64>,
    pub label_offset: f64,
    pub inner_ratio: f64,
    pub title: Option<String>,
    pub theme: Theme,
}

impl Default for WheelProps {
    fn default() -> Self {
        Self {
            segments: Vec::new(),
            selected: None,
            height: DEFAULT_HEIGHT,
            width: None,
            default_layers: DEFAULT_LAYERS,
            sector_spacing: DEFAULT_SECTOR_SPACING,
            layer_spacing: None,
            label_offset: DEFAULT_LABEL_OFFSET,
            inner_ratio: INNER_RADIUS_RATIO,
            title: None,
            theme: Theme::default(),
        }
    }
}

/// The exact tuple geometry depends on. Two equal values mean the cached
/// layout can be reused as-is.
#[derive(Debug, Clone, PartialEq)]
struct LayoutInputs {
    segments: Vec<Segment>,
    width: u64,
    height: u64,
    default_layers: usize,
    sector_spacing: u64,
    layer_spacing: Option<u64>,
    label_offset: u64,
    inner_ratio: u64,
}

/// Everything the kernel produced for one input tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelLayout {
    pub width: f64,
    pub height: f64,
    pub params: LayoutParams,
    pub rings: Vec<Ring>,
    pub sectors: Vec<Sector>,
    pub anchors: Vec<Point>,
    pub labels: Vec<LabelPlacement>,
    pub separators: Vec<(Point, Point)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Sector(usize),
    Label(usize),
}

impl HitTarget {
    pub fn index(&self) -> usize {
        match self {
            Self::Sector(i) | Self::Label(i) => *i,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorAction {
    pub should_redraw: bool,
    pub hover: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    Miss,
    Select(SegmentId),
    /// The clicked segment was already selected; the caller should clear
    /// the selection.
    Deselect,
}

pub type SelectCallback = Box<dyn FnMut(Option<&SegmentId>)>;

pub struct WheelChart {
    props: WheelProps,
    highlight: HighlightState,
    measured: Arc<Mutex<Option<f64>>>,
    window_width: f64,
    on_select: Option<SelectCallback>,
    width_feed: Option<WidthSubscription>,
    memo: Mutex<Option<(LayoutInputs, Arc<WheelLayout>)>>,
}

impl WheelChart {
    pub fn new(props: WheelProps) -> Self {
        let mut chart = Self {
            props,
            highlight: HighlightState::default(),
            measured: Arc::new(Mutex::new(None)),
            window_width: DEFAULT_WINDOW_WIDTH,
            on_select: None,
            width_feed: None,
            memo: Mutex::new(None),
        };
        chart
            .highlight
            .sync_selection(&chart.props.segments, chart.props.selected.as_ref());
        chart
    }

    pub fn props(&self) -> &WheelProps {
        &self.props
    }

    pub fn hover(&self) -> Option<usize> {
        self.highlight.hover()
    }

    pub fn set_props(&mut self, props: WheelProps) {
        self.props = props;
        self.highlight
            .sync_selection(&self.props.segments, self.props.selected.as_ref());
    }

    pub fn set_segments(&mut self, segments: Vec<Segment>) {
        self.props.segments = segments;
    }

    /// Applies the caller-owned selection and returns whether the visible
    /// highlight moved.
    pub fn set_selected(&mut self, selected: Option<SegmentId>) -> bool {
        self.props.selected = selected;
        self.highlight
            .sync_selection(&self.props.segments, self.props.selected.as_ref())
    }

    pub fn on_select(&mut self, callback: impl FnMut(Option<&SegmentId>) + 'static) {
        self.on_select = Some(Box::new(callback));
    }

    /// Reports a fresh container measurement.
    pub fn resize(&mut self, width: f64) {
        *self.measured.lock() = Some(width);
    }

    pub fn set_window_width(&mut self, width: f64) {
        self.window_width = width;
    }

    /// Follows a shared width source; the previous subscription (if any)
    /// is dropped, which deregisters its listener.
    pub fn attach_width_source(&mut self, source: &WidthSource) {
        if let Some(width) = source.measured() {
            *self.measured.lock() = Some(width);
        }
        let cell = Arc::clone(&self.measured);
        self.width_feed = Some(source.subscribe(move |width| {
            *cell.lock() = Some(width);
        }));
    }

    pub fn detach_width_source(&mut self) {
        self.width_feed = None;
    }

    fn resolved_width(&self) -> f64 {
        viewport::resolve_width(self.props.width, *self.measured.lock(), self.window_width)
    }

    fn layout_inputs(&self) -> LayoutInputs {
        LayoutInputs {
            segments: self.props.segments.clone(),
            width: self.resolved_width().to_bits(),
            height: self.props.height.to_bits(),
            default_layers: self.props.default_layers,
            sector_spacing: self.props.sector_spacing.to_bits(),
            layer_spacing: self.props.layer_spacing.map(f64::to_bits),
            label_offset: self.props.label_offset.to_bits(),
            inner_ratio: self.props.inner_ratio.to_bits(),
        }
    }

    /// The memoized layout. Recomputed only when the input tuple changed;
    /// hover and selection restyle without touching geometry.
    pub fn layout(&self) -> Arc<WheelLayout> {
        let inputs = self.layout_inputs();
        let mut memo = self.memo.lock();
        if let Some((cached_inputs, layout)) = memo.as_ref()
            && *cached_inputs == inputs
        {
            return Arc::clone(layout);
        }

        log::debug!(
            "layout recomputed: {} segments, width {}",
            inputs.segments.len(),
            f64::from_bits(inputs.width)
        );
        let layout = Arc::new(compute_layout(&self.props, f64::from_bits(inputs.width)));
        *memo = Some((inputs, Arc::clone(&layout)));
        layout
    }

    pub fn hit_test(&self, point: Point) -> Option<HitTarget> {
        let layout = self.layout();
        let params = &layout.params;
        if params.segment_count == 0 {
            return None;
        }

        // labels live outside the rings, test them first
        for (i, (segment, placement)) in
            zip(&self.props.segments, &layout.labels).enumerate()
        {
            if !segment.hidden_label && placement.contains(&segment.label, point) {
                return Some(HitTarget::Label(i));
            }
        }

        let dist = params.center.distance(point);
        if dist < params.inner_radius() - HIT_PADDING
            || dist > params.rim_radius() + HIT_PADDING
        {
            return None;
        }

        let angle = (point.y - params.center.y)
            .atan2(point.x - params.center.x)
            .to_degrees()
            .rem_euclid(360.0);
        let step = params.sector_step();
        let index = ((angle / step).floor() as usize).min(params.segment_count - 1);

        // clicks inside the angular gap belong to nobody
        let within = angle - step * index as f64;
        if within < params.sector_spacing / 2.0 || within > step - params.sector_spacing / 2.0 {
            return None;
        }

        Some(HitTarget::Sector(index))
    }

    pub fn pointer_moved(&mut self, point: Point) -> CursorAction {
        let should_redraw = match self.hit_test(point) {
            Some(target) => self.highlight.highlight(target.index()),
            None => self.highlight.clear(),
        };
        CursorAction {
            should_redraw,
            hover: self.highlight.hover(),
        }
    }

    pub fn pointer_left(&mut self) -> CursorAction {
        CursorAction {
            should_redraw: self.highlight.clear(),
            hover: None,
        }
    }

    /// Resolves a click into a selection change and notifies the
    /// `on_select` callback. Clicking the already-selected segment asks
    /// the caller to clear the selection (toggle-off).
    pub fn click(&mut self, point: Point) -> ClickOutcome {
        let Some(target) = self.hit_test(point) else {
            return ClickOutcome::Miss;
        };
        let id = self.props.segments[target.index()].id.clone();

        if self.props.selected.as_ref() == Some(&id) {
            if let Some(callback) = self.on_select.as_mut() {
                callback(None);
            }
            ClickOutcome::Deselect
        } else {
            if let Some(callback) = self.on_select.as_mut() {
                callback(Some(&id));
            }
            ClickOutcome::Select(id)
        }
    }

    pub fn render_svg(&self) -> String {
        let layout = self.layout();
        let mut writer = SvgWriter::new(layout.width, layout.height);
        view::draw(
            &mut writer,
            &layout,
            &self.props.segments,
            self.highlight.hover(),
            &self.props.theme,
            self.props.title.as_deref(),
        );
        writer.finish()
    }
}

fn compute_layout(props: &WheelProps, width: f64) -> WheelLayout {
    let height = props.height;
    let center = Point::new(width / 2.0, height / 2.0);
    let outer_radius = (width.min(height) / 2.0 - RADIUS_MARGIN).max(10.0);
    let layer_count = effective_layer_count(&props.segments, props.default_layers);

    let inner_radius = props.inner_ratio * outer_radius;
    let layer_spacing = props.layer_spacing.unwrap_or_else(|| {
        if layer_count > 1 {
            (outer_radius - inner_radius) / (layer_count - 1) as f64
        } else {
            0.0
        }
    });

    let params = LayoutParams {
        center,
        segment_count: props.segments.len(),
        layer_count,
        layer_spacing,
        sector_spacing: props.sector_spacing,
        outer_radius,
        label_offset: props.label_offset,
        inner_ratio: props.inner_ratio,
    };

    let rings = geometry::compute_rings(&params);
    let sectors = geometry::rings_to_sectors(&rings);
    let anchors = geometry::label_anchors(
        center,
        params.segment_count,
        params.rim_radius(),
        params.label_offset,
    );
    let labels = labels::place_labels(&anchors, center.x);
    let separators = geometry::separator_lines(
        center,
        params.segment_count,
        params.sector_spacing,
        params.outer_radius,
    );

    WheelLayout {
        width,
        height,
        params,
        rings,
        sectors,
        anchors,
        labels,
        separators,
    }
}
