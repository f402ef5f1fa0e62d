//! Reine Geometrie-Funktionen für Polylines und Bézier-Kurven.
//!
//! Wird vom SVG-Import genutzt, um Kurven in gleichmäßig verteilte
//! Abtastpunkte (konstante Bogenlänge) zu zerlegen.

use anyhow::{bail, Result};
use glam::DVec2;

/// Obergrenze der Abtastsegmente pro Teilpfad.
pub const MAX_RESAMPLE_SEGMENTS: usize = 1_000_000;

/// Punkt auf einer kubischen Bézier-Kurve (t ∈ [0, 1]).
pub fn cubic_bezier_point(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2, t: f64) -> DVec2 {
    let u = 1.0 - t;
    let uu = u * u;
    let tt = t * t;
    p0 * (uu * u) + p1 * (3.0 * uu * t) + p2 * (3.0 * u * tt) + p3 * (tt * t)
}

/// Punkt auf einer quadratischen Bézier-Kurve (t ∈ [0, 1]).
pub fn quadratic_bezier_point(p0: DVec2, p1: DVec2, p2: DVec2, t: f64) -> DVec2 {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

/// Anzahl der Zwischenpunkte für eine Kurve mit Kontrollpolygon-Länge `hull_length`,
/// so dass die Sehnen deutlich kürzer als `step` bleiben.
pub fn flatten_segments(hull_length: f64, step: f64) -> usize {
    if !hull_length.is_finite() || step.is_nan() || step <= 0.0 {
        return 1;
    }
    ((hull_length / step) * 4.0).ceil().clamp(1.0, 4096.0) as usize
}

/// Zerlegt eine kubische Bézier-Kurve in eine Polyline (ohne Startpunkt).
pub fn flatten_cubic(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2, step: f64) -> Vec<DVec2> {
    let hull = p0.distance(p1) + p1.distance(p2) + p2.distance(p3);
    let segments = flatten_segments(hull, step);
    (1..=segments)
        .map(|i| cubic_bezier_point(p0, p1, p2, p3, i as f64 / segments as f64))
        .collect()
}

/// Zerlegt eine quadratische Bézier-Kurve in eine Polyline (ohne Startpunkt).
pub fn flatten_quadratic(p0: DVec2, p1: DVec2, p2: DVec2, step: f64) -> Vec<DVec2> {
    let hull = p0.distance(p1) + p1.distance(p2);
    let segments = flatten_segments(hull, step);
    (1..=segments)
        .map(|i| quadratic_bezier_point(p0, p1, p2, i as f64 / segments as f64))
        .collect()
}

/// Länge einer Polyline.
pub fn polyline_length(points: &[DVec2]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Verteilt Punkte gleichmäßig (Arc-Length) entlang einer Polyline.
///
/// Der Abstand benachbarter Ergebnispunkte entlang der Kurve ist höchstens
/// `max_segment_length`; Start- und Endpunkt bleiben exakt erhalten.
/// Fehler bei nicht-endlicher Länge oder mehr als `MAX_RESAMPLE_SEGMENTS` Segmenten.
pub fn resample_by_distance(polyline: &[DVec2], max_segment_length: f64) -> Result<Vec<DVec2>> {
    let (Some(&first), Some(&last)) = (polyline.first(), polyline.last()) else {
        return Ok(Vec::new());
    };
    if polyline.len() < 2 {
        return Ok(vec![first]);
    }

    let total = polyline_length(polyline);
    if !total.is_finite() {
        bail!("Polyline-Laenge ist nicht endlich");
    }
    if total < f64::EPSILON {
        return Ok(vec![first]);
    }
    if max_segment_length.is_nan() || max_segment_length <= 0.0 {
        return Ok(polyline.to_vec());
    }

    let segments = (total / max_segment_length).ceil().max(1.0);
    if segments.is_nan() || segments > MAX_RESAMPLE_SEGMENTS as f64 {
        bail!(
            "Polyline zu lang fuer Abtastung: Laenge {:.3e} bei Abstand {} (max. {} Segmente)",
            total,
            max_segment_length,
            MAX_RESAMPLE_SEGMENTS
        );
    }
    let segment_count = segments as usize;
    let spacing = total / segment_count as f64;

    let mut result = Vec::with_capacity(segment_count + 1);
    result.push(first);

    let mut poly_idx = 0;
    let mut remainder = 0.0f64; // Rest-Distanz im aktuellen Polyline-Segment

    for _ in 1..segment_count {
        let mut needed = spacing;

        while poly_idx + 1 < polyline.len() {
            let seg_len = polyline[poly_idx].distance(polyline[poly_idx + 1]);
            let available = seg_len - remainder;

            if available >= needed {
                remainder += needed;
                let t = remainder / seg_len;
                result.push(polyline[poly_idx].lerp(polyline[poly_idx + 1], t));
                break;
            }
            needed -= available;
            remainder = 0.0;
            poly_idx += 1;
        }
    }

    // Endpunkt immer exakt übernehmen
    result.push(last);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_polyline_length() {
        let points = [DVec2::ZERO, DVec2::new(3.0, 4.0), DVec2::new(3.0, 10.0)];
        assert_relative_eq!(polyline_length(&points), 11.0);
    }

    #[test]
    fn test_resample_keeps_endpoints_and_spacing() {
        let line = [DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0)];
        let result = resample_by_distance(&line, 2.0).unwrap();

        assert_eq!(result.len(), 6);
        assert_eq!(result[0], DVec2::ZERO);
        assert_eq!(result[5], DVec2::new(10.0, 0.0));
        for pair in result.windows(2) {
            assert!(pair[0].distance(pair[1]) <= 2.0 + 1e-9);
        }
    }

    #[test]
    fn test_resample_spans_corners() {
        let corner = [DVec2::ZERO, DVec2::new(3.0, 0.0), DVec2::new(3.0, 3.0)];
        let result = resample_by_distance(&corner, 2.0).unwrap();

        assert_eq!(result.len(), 4);
        assert_relative_eq!(result[2].x, 3.0);
        assert_relative_eq!(result[2].y, 1.0);
    }

    #[test]
    fn test_resample_degenerate_inputs() {
        assert!(resample_by_distance(&[], 2.0).unwrap().is_empty());
        let single = [DVec2::new(1.0, 1.0)];
        assert_eq!(resample_by_distance(&single, 2.0).unwrap(), vec![single[0]]);
        let zero = [DVec2::ONE, DVec2::ONE];
        assert_eq!(resample_by_distance(&zero, 2.0).unwrap(), vec![DVec2::ONE]);
    }

    #[test]
    fn test_resample_rejects_infinite_length() {
        let line = [DVec2::ZERO, DVec2::new(f64::INFINITY, 0.0)];
        assert!(resample_by_distance(&line, 2.0).is_err());

        // Endliche Punkte, deren Abstand überläuft
        let line = [DVec2::new(-f64::MAX, 0.0), DVec2::new(f64::MAX, 0.0)];
        assert!(resample_by_distance(&line, 2.0).is_err());
    }

    #[test]
    fn test_resample_caps_segment_count() {
        let line = [DVec2::ZERO, DVec2::new(1e12, 0.0)];
        let err = resample_by_distance(&line, 2.0).expect_err("zu viele Segmente");
        assert!(err.to_string().contains("zu lang"));

        let line = [DVec2::ZERO, DVec2::new(1000.0, 0.0)];
        assert_eq!(resample_by_distance(&line, 1.0).unwrap().len(), 1001);
    }

    #[test]
    fn test_cubic_endpoints() {
        let p0 = DVec2::ZERO;
        let p3 = DVec2::new(10.0, 0.0);
        let p1 = DVec2::new(0.0, 5.0);
        let p2 = DVec2::new(10.0, 5.0);
        assert_eq!(cubic_bezier_point(p0, p1, p2, p3, 0.0), p0);
        assert_eq!(cubic_bezier_point(p0, p1, p2, p3, 1.0), p3);
        assert_relative_eq!(cubic_bezier_point(p0, p1, p2, p3, 0.5).y, 3.75);

        let flat = flatten_cubic(p0, p1, p2, p3, 2.0);
        assert_eq!(*flat.last().unwrap(), p3);
    }

    #[test]
    fn test_quadratic_midpoint() {
        let mid = quadratic_bezier_point(
            DVec2::ZERO,
            DVec2::new(5.0, 10.0),
            DVec2::new(10.0, 0.0),
            0.5,
        );
        assert_relative_eq!(mid.x, 5.0);
        assert_relative_eq!(mid.y, 5.0);
    }
}
