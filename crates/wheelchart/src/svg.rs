use crate::geometry::Point;
use crate::theme::Color;
use std::fmt::Write as _;

pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn dash_attr(pattern: &[f64]) -> String {
    if pattern.is_empty() {
        return String::new();
    }
    let joined = pattern
        .iter()
        .map(|v| format!("{v}"))
        .collect::<Vec<_>>()
        .join(" ");
    format!(" stroke-dasharray=\"{joined}\"")
}

/// Minimal append-only SVG document builder. Writing cannot fail, so the
/// API stays infallible like the rest of the engine.
pub struct SvgWriter {
    buf: String,
}

impl SvgWriter {
    pub fn new(width: f64, height: f64) -> Self {
        let mut buf = String::new();
        let _ = write!(
            buf,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.0}\" height=\"{height:.0}\" viewBox=\"0 0 {width:.0} {height:.0}\">"
        );
        Self { buf }
    }

    pub fn background(&mut self, color: Color) {
        let _ = write!(
            self.buf,
            "<rect width=\"100%\" height=\"100%\" fill=\"{color}\"/>"
        );
    }

    pub fn open_group(&mut self, class: &str) {
        let _ = write!(self.buf, "<g class=\"{}\">", escape_xml(class));
    }

    pub fn close_group(&mut self) {
        self.buf.push_str("</g>");
    }

    pub fn stroke_path(
        &mut self,
        d: &str,
        color: Color,
        stroke_width: f64,
        opacity: f64,
        dash: &[f64],
    ) {
        let _ = write!(
            self.buf,
            "<path d=\"{d}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"{stroke_width}\" stroke-opacity=\"{opacity}\" stroke-linecap=\"round\"{}/>",
            dash_attr(dash)
        );
    }

    pub fn line(
        &mut self,
        from: Point,
        to: Point,
        color: Color,
        stroke_width: f64,
        opacity: f64,
        dash: &[f64],
    ) {
        let _ = write!(
            self.buf,
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{color}\" stroke-width=\"{stroke_width}\" stroke-opacity=\"{opacity}\"{}/>",
            from.x,
            from.y,
            to.x,
            to.y,
            dash_attr(dash)
        );
    }

    #[allow(clippy::too_many_arguments)]
    pub fn text(
        &mut self,
        pos: Point,
        content: &str,
        anchor: &str,
        fill: Color,
        size: f64,
        bold: bool,
        opacity: f64,
    ) {
        let weight = if bold { " font-weight=\"bold\"" } else { "" };
        let _ = write!(
            self.buf,
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"{anchor}\" font-family=\"sans-serif\" font-size=\"{size}\" fill=\"{fill}\" fill-opacity=\"{opacity}\"{weight} dominant-baseline=\"middle\">{}</text>",
            pos.x,
            pos.y,
            escape_xml(content)
        );
    }

    pub fn finish(mut self) -> String {
        self.buf.push_str("</svg>");
        self.buf
    }
}
