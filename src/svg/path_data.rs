//! SVG-Pfaddaten (`d`-Attribut) und Punktlisten (`points`) über `svgtypes`.
//!
//! `SimplifyingPathParser` liefert nur absolute MoveTo/LineTo/CurveTo/Quadratic/ClosePath;
//! H/V, S/T und Bögen (`A`) sind dort bereits in diese Segmente umgerechnet.

use crate::shared::path_geometry::{flatten_cubic, flatten_quadratic};
use anyhow::{bail, Context, Result};
use glam::DVec2;
use svgtypes::{NumberListParser, SimplePathSegment, SimplifyingPathParser};

/// Sammelt Teilpfade als dichte Polylines.
struct SubpathBuilder {
    step: f64,
    current: DVec2,
    start: DVec2,
    points: Vec<DVec2>,
    subpaths: Vec<Vec<DVec2>>,
}

impl SubpathBuilder {
    fn new(step: f64) -> Self {
        Self {
            step,
            current: DVec2::ZERO,
            start: DVec2::ZERO,
            points: Vec::new(),
            subpaths: Vec::new(),
        }
    }

    fn begin_if_needed(&mut self) {
        if self.points.is_empty() {
            self.points.push(self.current);
            self.start = self.current;
        }
    }

    fn move_to(&mut self, point: DVec2) {
        self.finish();
        self.current = point;
        self.start = point;
        self.points.push(point);
    }

    fn line_to(&mut self, point: DVec2) {
        self.begin_if_needed();
        self.points.push(point);
        self.current = point;
    }

    fn cubic_to(&mut self, c1: DVec2, c2: DVec2, end: DVec2) {
        self.begin_if_needed();
        let flattened = flatten_cubic(self.current, c1, c2, end, self.step);
        self.points.extend(flattened);
        self.current = end;
    }

    fn quad_to(&mut self, ctrl: DVec2, end: DVec2) {
        self.begin_if_needed();
        let flattened = flatten_quadratic(self.current, ctrl, end, self.step);
        self.points.extend(flattened);
        self.current = end;
    }

    fn close(&mut self) {
        if self.points.is_empty() {
            return;
        }
        if self.current != self.start {
            self.line_to(self.start);
        }
        self.finish();
        self.current = self.start;
    }

    fn finish(&mut self) {
        let points = std::mem::take(&mut self.points);
        // Ein einzelnes MoveTo zeichnet nichts
        if points.len() >= 2 {
            self.subpaths.push(points);
        }
    }

    fn into_subpaths(mut self) -> Vec<Vec<DVec2>> {
        self.finish();
        self.subpaths
    }
}

fn finite_point(x: f64, y: f64) -> Result<DVec2> {
    let point = DVec2::new(x, y);
    if !point.is_finite() {
        bail!("Nicht-endliche Koordinate ({x}, {y})");
    }
    Ok(point)
}

/// Interpretiert ein `d`-Attribut und liefert die Teilpfade als Polylines.
///
/// `step` steuert die Dichte der Kurvenzerlegung (Zielabstand der Abtastung).
pub fn parse_path_data(data: &str, step: f64) -> Result<Vec<Vec<DVec2>>> {
    let mut builder = SubpathBuilder::new(step);

    for (index, segment) in SimplifyingPathParser::from(data).enumerate() {
        let segment =
            segment.with_context(|| format!("Ungueltige Pfaddaten in Segment {index}"))?;
        match segment {
            SimplePathSegment::MoveTo { x, y } => builder.move_to(finite_point(x, y)?),
            SimplePathSegment::LineTo { x, y } => builder.line_to(finite_point(x, y)?),
            SimplePathSegment::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => builder.cubic_to(
                finite_point(x1, y1)?,
                finite_point(x2, y2)?,
                finite_point(x, y)?,
            ),
            SimplePathSegment::Quadratic { x1, y1, x, y } => {
                builder.quad_to(finite_point(x1, y1)?, finite_point(x, y)?)
            }
            SimplePathSegment::ClosePath => builder.close(),
        }
    }

    Ok(builder.into_subpaths())
}

/// Liest ein `points`-Attribut (`<polyline>`/`<polygon>`).
pub fn parse_points(data: &str) -> Result<Vec<DVec2>> {
    let numbers = NumberListParser::from(data)
        .enumerate()
        .map(|(index, number)| {
            number.with_context(|| format!("Ungueltige Zahl an Stelle {index} der Punktliste"))
        })
        .collect::<Result<Vec<f64>>>()?;

    if numbers.len() % 2 != 0 {
        bail!("Punktliste hat ungerade Anzahl an Koordinaten ({})", numbers.len());
    }
    numbers
        .chunks_exact(2)
        .map(|pair| finite_point(pair[0], pair[1]))
        .collect()
}
