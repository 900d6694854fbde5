use std::f64::consts::PI;

/// Innermost ring sits at this fraction of the outer radius. The ratio is
/// overridable through `LayoutParams::inner_ratio`; this is the default.
pub const INNER_RADIUS_RATIO: f64 = 0.3;

/// Arcs whose chord is shorter than this are skipped by renderers.
pub const MIN_ARC_CHORD: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Everything the kernel needs to lay out one wheel. Built once per render
/// from the facade props plus the resolved container width.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    pub center: Point,
    pub segment_count: usize,
    pub layer_count: usize,
    pub layer_spacing: f64,
    /// Angular gap between neighbouring sectors, in degrees.
    pub sector_spacing: f64,
    pub outer_radius: f64,
    pub label_offset: f64,
    pub inner_ratio: f64,
}

impl LayoutParams {
    pub fn inner_radius(&self) -> f64 {
        self.inner_ratio * self.outer_radius
    }

    pub fn ring_radius(&self, layer: usize) -> f64 {
        self.inner_radius() + layer as f64 * self.layer_spacing
    }

    /// Radius of the outermost ring actually drawn.
    pub fn rim_radius(&self) -> f64 {
        self.ring_radius(self.layer_count.saturating_sub(1))
    }

    pub fn sector_step(&self) -> f64 {
        360.0 / self.segment_count as f64
    }
}

/// One full circle at a fixed radius, split into one `[start, end]` point
/// pair per segment, index-aligned with segment order.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    pub radius: f64,
    pub paths: Vec<[Point; 2]>,
}

/// A single stroked curve between two angular bounds at a fixed radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub start: Point,
    pub end: Point,
    pub radius: f64,
}

impl Arc {
    pub fn is_degenerate(&self) -> bool {
        self.start.distance(self.end) < MIN_ARC_CHORD
    }
}

/// The per-segment view of all rings, ordered inner to outer.
pub type Sector = Vec<Arc>;

/// Plain trigonometric convention: 0° points along +x, angles grow towards
/// +y. This is what the ring/arc stroke path uses.
pub fn polar_to_cartesian(center: Point, radius: f64, angle_deg: f64) -> Point {
    let rad = angle_deg * PI / 180.0;
    Point::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
}

/// Compass convention (0° at twelve o'clock), used by `arc_path` only.
fn compass_to_cartesian(center: Point, radius: f64, angle_deg: f64) -> Point {
    polar_to_cartesian(center, radius, angle_deg - 90.0)
}

pub fn compute_rings(params: &LayoutParams) -> Vec<Ring> {
    if params.segment_count == 0 {
        return Vec::new();
    }

    let layer_count = if params.layer_count == 0 {
        log::warn!("layer count 0 clamped to 1");
        1
    } else {
        params.layer_count
    };

    let step = params.sector_step();
    (0..layer_count)
        .map(|layer| {
            let radius = params.ring_radius(layer);
            let paths = (0..params.segment_count)
                .map(|i| {
                    let start = step * i as f64 + params.sector_spacing / 2.0;
                    let end = step * (i + 1) as f64 - params.sector_spacing / 2.0;
                    [
                        polar_to_cartesian(params.center, radius, start),
                        polar_to_cartesian(params.center, radius, end),
                    ]
                })
                .collect();
            Ring { radius, paths }
        })
        .collect()
}

/// Transposes ring-major geometry into sector-major: `sectors[i][l]` is
/// segment `i`'s arc on ring `l`.
pub fn rings_to_sectors(rings: &[Ring]) -> Vec<Sector> {
    let Some(first) = rings.first() else {
        return Vec::new();
    };

    (0..first.paths.len())
        .map(|i| {
            rings
                .iter()
                .map(|ring| Arc {
                    start: ring.paths[i][0],
                    end: ring.paths[i][1],
                    radius: ring.radius,
                })
                .collect()
        })
        .collect()
}

/// One anchor per segment at the sector's angular midpoint, pushed
/// `offset` beyond `radius`.
pub fn label_anchors(center: Point, segment_count: usize, radius: f64, offset: f64) -> Vec<Point> {
    let step = 360.0 / segment_count as f64;
    (0..segment_count)
        .map(|i| polar_to_cartesian(center, radius + offset, step * i as f64 + step / 2.0))
        .collect()
}

/// Sector boundary lines from the center outward, one per segment.
pub fn separator_lines(
    center: Point,
    segment_count: usize,
    sector_spacing: f64,
    radius: f64,
) -> Vec<(Point, Point)> {
    let step = 360.0 / segment_count as f64;
    (0..segment_count)
        .map(|i| {
            let angle = step * i as f64 + sector_spacing / 2.0;
            (center, polar_to_cartesian(center, radius, angle))
        })
        .collect()
}

/// SVG arc command between two compass-convention angles. Used for filled
/// wedges, not for the stroked ring arcs.
pub fn arc_path(center: Point, radius: f64, start_deg: f64, end_deg: f64) -> String {
    let start = compass_to_cartesian(center, radius, end_deg);
    let end = compass_to_cartesian(center, radius, start_deg);
    let large_arc = if end_deg - start_deg > 180.0 { 1 } else { 0 };

    format!(
        "M {:.2} {:.2} A {:.2} {:.2} 0 {} 0 {:.2} {:.2}",
        start.x, start.y, radius, radius, large_arc, end.x, end.y
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(segments: usize, layers: usize) -> LayoutParams {
        LayoutParams {
            center: Point::new(100.0, 100.0),
            segment_count: segments,
            layer_count: layers,
            layer_spacing: 12.0,
            sector_spacing: 4.0,
            outer_radius: 80.0,
            label_offset: 10.0,
            inner_ratio: INNER_RADIUS_RATIO,
        }
    }

    fn angle_of(center: Point, p: Point) -> f64 {
        (p.y - center.y)
            .atan2(p.x - center.x)
            .to_degrees()
            .rem_euclid(360.0)
    }

    #[test]
    fn ring_and_path_counts_match_params() {
        let p = params(6, 3);
        let rings = compute_rings(&p);
        assert_eq!(rings.len(), 3);
        for ring in &rings {
            assert_eq!(ring.paths.len(), 6);
        }
    }

    #[test]
    fn ring_radii_increase_by_layer_spacing() {
        let p = params(4, 5);
        let rings = compute_rings(&p);
        assert!((rings[0].radius - INNER_RADIUS_RATIO * 80.0).abs() < 1e-9);
        for pair in rings.windows(2) {
            assert!((pair[1].radius - pair[0].radius - 12.0).abs() < 1e-9);
        }
    }

    #[test]
    fn sector_spans_sum_to_full_circle_minus_gaps() {
        for n in [1, 3, 4, 7, 12] {
            let p = params(n, 2);
            let rings = compute_rings(&p);
            let total: f64 = rings[0]
                .paths
                .iter()
                .enumerate()
                .map(|(i, path)| {
                    let start = angle_of(p.center, path[0]);
                    let mut end = angle_of(p.center, path[1]);
                    if end < start - 1e-6 {
                        end += 360.0;
                    }
                    let span = end - start;
                    let expected = p.sector_step() - p.sector_spacing;
                    assert!((span - expected).abs() < 1e-6, "segment {i}: span {span}");
                    span
                })
                .sum();
            assert!((total - (360.0 - n as f64 * p.sector_spacing)).abs() < 1e-6);
        }
    }

    #[test]
    fn sectors_are_a_transpose_of_rings() {
        let p = params(5, 3);
        let rings = compute_rings(&p);
        let sectors = rings_to_sectors(&rings);

        assert_eq!(sectors.len(), 5);
        for (i, sector) in sectors.iter().enumerate() {
            assert_eq!(sector.len(), 3);
            for (l, arc) in sector.iter().enumerate() {
                assert_eq!(arc.start, rings[l].paths[i][0]);
                assert_eq!(arc.end, rings[l].paths[i][1]);
                assert!((arc.radius - rings[l].radius).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn empty_inputs_produce_empty_outputs() {
        assert!(compute_rings(&params(0, 3)).is_empty());
        assert!(rings_to_sectors(&[]).is_empty());
        let no_paths = [Ring {
            radius: 10.0,
            paths: Vec::new(),
        }];
        assert!(rings_to_sectors(&no_paths).is_empty());
    }

    #[test]
    fn zero_layers_clamp_to_one_ring() {
        let rings = compute_rings(&params(4, 0));
        assert_eq!(rings.len(), 1);
    }

    #[test]
    fn anchors_sit_on_sector_midpoints() {
        let p = params(4, 1);
        let anchors = label_anchors(p.center, 4, 80.0, 10.0);
        assert_eq!(anchors.len(), 4);
        for (i, anchor) in anchors.iter().enumerate() {
            let expected = 90.0 * i as f64 + 45.0;
            assert!((angle_of(p.center, *anchor) - expected).abs() < 1e-6);
            assert!((p.center.distance(*anchor) - 90.0).abs() < 1e-9);
        }
    }

    #[test]
    fn separators_start_at_center_and_reach_the_radius() {
        let center = Point::new(50.0, 50.0);
        let lines = separator_lines(center, 6, 4.0, 70.0);
        assert_eq!(lines.len(), 6);
        for (i, (from, to)) in lines.iter().enumerate() {
            assert_eq!(*from, center);
            assert!((center.distance(*to) - 70.0).abs() < 1e-9);
            let expected = 60.0 * i as f64 + 2.0;
            assert!((angle_of(center, *to) - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn arc_path_flips_large_arc_flag_past_half_turn() {
        let center = Point::new(0.0, 0.0);
        let minor = arc_path(center, 40.0, 0.0, 120.0);
        let major = arc_path(center, 40.0, 0.0, 200.0);
        assert!(minor.contains(" 0 0 "), "{minor}");
        assert!(major.contains(" 1 0 "), "{major}");
    }

    #[test]
    fn arc_path_uses_compass_convention() {
        // Start angle 0° is twelve o'clock; the command ends there.
        let path = arc_path(Point::new(0.0, 0.0), 10.0, 0.0, 90.0);
        assert!(path.ends_with("0.00 -10.00"), "{path}");
    }

    #[test]
    fn short_chords_are_degenerate() {
        let arc = Arc {
            start: Point::new(10.0, 10.0),
            end: Point::new(10.4, 10.3),
            radius: 30.0,
        };
        assert!(arc.is_degenerate());

        let arc = Arc {
            start: Point::new(10.0, 10.0),
            end: Point::new(14.0, 10.0),
            radius: 30.0,
        };
        assert!(!arc.is_degenerate());
    }
}
