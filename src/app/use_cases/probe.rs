//! Use-Case: Einzelpunkt-Abfrage (Live-Probe, z.B. Mauszeiger pro Frame).

use crate::core::{solve, ArmConfig, KinematicsResult, Point2D, Reachability};
use std::fmt;

/// Ergebnis einer Probe mit Anzeigetext wie im Prototyp-Overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeReport {
    pub target: Point2D,
    pub result: KinematicsResult,
}

impl ProbeReport {
    pub fn is_producible(&self) -> bool {
        self.result.is_producible()
    }

    /// Statusbezeichnung für Anzeige und Logs.
    pub fn status_label(&self) -> &'static str {
        match self.result.reachability() {
            Reachability::Producible => "zeichenbar",
            Reachability::OutOfReach => "ausser Reichweite",
            Reachability::JointLimit => "Gelenkgrenze",
            Reachability::OutOfReachAndJointLimit => "ausser Reichweite + Gelenkgrenze",
        }
    }
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "x: {:.1}, y: {:.1} (d = {:.1}) -> {}",
            self.target.x,
            self.target.y,
            self.result.distance,
            self.status_label()
        )?;
        writeln!(
            f,
            "α: {:.1}° | {} steps",
            self.result.alpha_deg, self.result.step_a
        )?;
        write!(
            f,
            "β: {:.1}° | {} steps",
            self.result.beta_deg, self.result.step_b
        )
    }
}

/// Berechnet die Kinematik für einen einzelnen Punkt. Kein Zustand, keine Seiteneffekte.
pub fn probe(target: Point2D, config: &ArmConfig) -> ProbeReport {
    ProbeReport {
        target,
        result: solve(target, config),
    }
}
