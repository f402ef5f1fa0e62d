//! Inverse Kinematik des Rhombus-Arms.
//!
//! Zwei gleich lange Segmente pro Aktuator bilden mit dem Zielpunkt eine Raute:
//! die beiden Gelenke liegen auf der Mittelsenkrechten der Strecke
//! Drehpunkt → Ziel, jeweils im Abstand `arm_length` von beiden Enden.
//!
//! `solve` ist rein, allokationsfrei und darf pro Frame aufgerufen werden.

use super::arm_config::ArmConfig;
use super::geometry::Point2D;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Mechanischer Schwenkbereich je Aktuator in Grad (± um die Vertikale).
pub const JOINT_SWEEP_LIMIT_DEG: f64 = 100.0;

/// Ergebnis der Kinematik-Berechnung für einen Zielpunkt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicsResult {
    /// Ziel liegt im erreichbaren Ring und innerhalb der Armspannweite
    pub reachable: bool,
    /// Beide Gelenkwinkel liegen innerhalb von ±`JOINT_SWEEP_LIMIT_DEG`
    pub joints_valid: bool,
    /// Abstand des Ziels vom Drehpunkt
    pub distance: f64,
    /// Gelenk von Arm A
    pub joint1: Point2D,
    /// Gelenk von Arm B
    pub joint2: Point2D,
    /// Winkel von Arm A zur Vertikalen (Uhrzeigersinn positiv)
    pub alpha_deg: f64,
    /// Winkel von Arm B zur Vertikalen (Uhrzeigersinn positiv)
    pub beta_deg: f64,
    /// Schrittposition Aktuator A
    pub step_a: i32,
    /// Schrittposition Aktuator B
    pub step_b: i32,
}

/// Klassifikation eines Zielpunkts für Diagnose und Anzeige.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reachability {
    /// Erreichbar und innerhalb der Gelenkgrenzen
    Producible,
    /// Außerhalb des Rings, Gelenke wären gültig
    OutOfReach,
    /// Im Ring, aber ein Gelenk überschreitet den Schwenkbereich
    JointLimit,
    /// Weder erreichbar noch gelenkgültig
    OutOfReachAndJointLimit,
}

impl KinematicsResult {
    /// Einzige verbindliche Regel: Ziel ist nur zeichenbar, wenn es
    /// erreichbar ist UND beide Gelenke im Schwenkbereich liegen.
    pub fn is_producible(&self) -> bool {
        self.reachable && self.joints_valid
    }

    pub fn reachability(&self) -> Reachability {
        match (self.reachable, self.joints_valid) {
            (true, true) => Reachability::Producible,
            (false, true) => Reachability::OutOfReach,
            (true, false) => Reachability::JointLimit,
            (false, false) => Reachability::OutOfReachAndJointLimit,
        }
    }

    /// Beide Gelenke (A, B)
    pub fn joints(&self) -> [Point2D; 2] {
        [self.joint1, self.joint2]
    }

    /// Ergebnis für nicht-endliche Eingaben: alles am Drehpunkt, nicht erreichbar.
    fn degenerate() -> Self {
        Self {
            reachable: false,
            joints_valid: true,
            distance: 0.0,
            joint1: DVec2::ZERO,
            joint2: DVec2::ZERO,
            alpha_deg: 0.0,
            beta_deg: 0.0,
            step_a: 0,
            step_b: 0,
        }
    }
}

/// Berechnet Gelenke, Winkel und Schrittzahlen für einen Zielpunkt.
///
/// Schlägt nie fehl und erzeugt nie NaN/Inf: unerreichbare Ziele werden über
/// `reachable`/`joints_valid` gemeldet, die Entscheidung trifft der Aufrufer.
pub fn solve(target: Point2D, config: &ArmConfig) -> KinematicsResult {
    if !target.is_finite() {
        return KinematicsResult::degenerate();
    }

    let (x, y) = (target.x, target.y);
    let arm = config.arm_length;
    let d = x.hypot(y);

    let within_span = d <= 2.0 * arm;
    let reachable = d >= config.min_reach && d <= config.max_reach && within_span;

    let half_d = d / 2.0;
    // h = 0 ausserhalb der Spannweite (reachable ist dann bereits false)
    let h = if within_span {
        (arm * arm - half_d * half_d).max(0.0).sqrt()
    } else {
        0.0
    };

    // Einheits-Normale zum Zielvektor; am Drehpunkt (d = 0) bewusst Null
    let normal = if d > 0.0 && d.is_finite() {
        DVec2::new(-y / d, x / d)
    } else {
        DVec2::ZERO
    };

    let mid = target / 2.0;
    let joint1 = mid + normal * h;
    let joint2 = mid - normal * h;

    // atan2(x, y): Winkel zur Vertikalen, im Uhrzeigersinn positiv
    let alpha_deg = joint1.x.atan2(joint1.y).to_degrees();
    let beta_deg = joint2.x.atan2(joint2.y).to_degrees();

    let joints_valid =
        alpha_deg.abs() <= JOINT_SWEEP_LIMIT_DEG && beta_deg.abs() <= JOINT_SWEEP_LIMIT_DEG;

    let steps_per_degree = config.steps_per_degree();

    KinematicsResult {
        reachable,
        joints_valid,
        distance: if d.is_finite() { d } else { f64::MAX },
        joint1,
        joint2,
        alpha_deg,
        beta_deg,
        step_a: angle_to_steps(alpha_deg, steps_per_degree),
        step_b: angle_to_steps(beta_deg, steps_per_degree),
    }
}

/// Winkel → Aktuator-Schritte. Die positive Motorrichtung ist dem
/// mathematischen Winkel entgegengesetzt, daher die Negation.
/// `as i32` sättigt an den Grenzen des Wertebereichs.
pub fn angle_to_steps(angle_deg: f64, steps_per_degree: f64) -> i32 {
    let steps = (-angle_deg * steps_per_degree).round();
    if steps.is_finite() {
        steps as i32
    } else {
        0
    }
}

/// Zielpunkt zu gegebenem Abstand und Winkel zur Vertikalen (Grad, Uhrzeigersinn positiv).
pub fn point_from_polar(distance: f64, angle_deg: f64) -> Point2D {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    DVec2::new(distance * sin, distance * cos)
}

/// Abtastpunkte entlang einer Seitengrenze vor der Verfeinerung.
const SIDE_SAMPLES: usize = 64;
/// Iterationen des Goldenen Schnitts auf der Seitengrenze.
const SIDE_REFINE_STEPS: usize = 60;

/// Nächstgelegener zeichenbarer Punkt zu `target`.
///
/// Der zeichenbare Bereich ist in Polarkoordinaten (Abstand `r`, Winkel `θ`
/// zur Vertikalen) begrenzt durch `r ∈ [min_reach, min(max_reach, 2·arm_length)]`
/// und `|θ| ≤ 100° − acos(r / 2·arm_length)`. Geprüft werden der Innen- und
/// der Außenring (Winkel begrenzt) sowie beide Seitengrenzen; der Kandidat mit
/// dem kleinsten Abstand gewinnt. Zeichenbare Ziele werden unverändert geliefert.
/// `None`, wenn das Ziel nicht endlich oder die Konfiguration ungültig ist.
pub fn clamp_to_producible(target: Point2D, config: &ArmConfig) -> Option<Point2D> {
    if !target.is_finite() || config.validate().is_err() {
        return None;
    }
    if solve(target, config).is_producible() {
        return Some(target);
    }

    let outer = config.effective_max_reach();

    // Minimalen Sicherheitsabstand einhalten, damit Rundungsfehler nicht aus dem Bereich fallen
    let margin = 1e-9 * outer.max(1.0);
    let inner = (config.min_reach + margin).min(outer);
    let outer = (outer - margin).max(inner);

    let heading = if target.length() > 0.0 {
        target.x.atan2(target.y).to_degrees()
    } else {
        0.0
    };

    let ring = |radius: f64| {
        let limit = heading_limit(radius, config.arm_length);
        point_from_polar(radius, heading.clamp(-limit, limit))
    };
    let candidates = [
        ring(inner),
        ring(outer),
        nearest_on_side(target, 1.0, inner, outer, config.arm_length),
        nearest_on_side(target, -1.0, inner, outer, config.arm_length),
    ];

    candidates
        .into_iter()
        .filter(|candidate| solve(*candidate, config).is_producible())
        .min_by(|a, b| a.distance(target).total_cmp(&b.distance(target)))
}

/// Größter zulässiger Winkel zur Vertikalen bei Abstand `radius`.
fn heading_limit(radius: f64, arm_length: f64) -> f64 {
    // Halber Öffnungswinkel der Raute: cos(phi) = (r/2) / arm_length
    let phi_deg = (radius / (2.0 * arm_length))
        .clamp(-1.0, 1.0)
        .acos()
        .to_degrees();
    (JOINT_SWEEP_LIMIT_DEG - phi_deg - 1e-9).max(0.0)
}

/// Nächster Punkt auf der Seitengrenze `θ = side · heading_limit(r)`, `r ∈ [inner, outer]`.
fn nearest_on_side(
    target: Point2D,
    side: f64,
    inner: f64,
    outer: f64,
    arm_length: f64,
) -> Point2D {
    let on_side =
        |radius: f64| point_from_polar(radius, side * heading_limit(radius, arm_length));
    let gap = |radius: f64| on_side(radius).distance_squared(target);

    let span = outer - inner;
    let radius_at = |i: usize| inner + span * i as f64 / SIDE_SAMPLES as f64;
    let best = (0..=SIDE_SAMPLES)
        .min_by(|&a, &b| gap(radius_at(a)).total_cmp(&gap(radius_at(b))))
        .unwrap_or(0);

    // Goldener Schnitt im Intervall um das beste Raster-Sample
    let mut low = radius_at(best.saturating_sub(1));
    let mut high = radius_at((best + 1).min(SIDE_SAMPLES));
    let ratio = (5.0_f64.sqrt() - 1.0) / 2.0;
    for _ in 0..SIDE_REFINE_STEPS {
        let left = high - ratio * (high - low);
        let right = low + ratio * (high - low);
        if gap(left) <= gap(right) {
            high = right;
        } else {
            low = left;
        }
    }

    on_side(((low + high) / 2.0).clamp(inner, outer))
}
