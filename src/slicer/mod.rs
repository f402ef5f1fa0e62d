//! Path-Slicer: wandelt einen geordneten Pfad in eine Folge von Schrittbefehlen.
//!
//! Pro Abtastpunkt wird genau einmal der Kinematik-Solver aufgerufen;
//! Pen-Lifts werden ohne Solver-Aufruf durchgereicht.

mod policy;

pub use policy::UnreachablePolicy;

use crate::core::{clamp_to_producible, solve, ArmConfig, Path, PathElement};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Ein diskreter Befehl für die Motorsteuerung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepCommand {
    /// Beide Aktuatoren auf die angegebenen Schrittpositionen fahren
    Actuate { step_a: i32, step_b: i32 },
    /// Stift anheben
    PenLift,
}

impl StepCommand {
    pub fn actuate(step_a: i32, step_b: i32) -> Self {
        Self::Actuate { step_a, step_b }
    }

    pub fn is_pen_lift(&self) -> bool {
        matches!(self, Self::PenLift)
    }
}

/// Ergebnis eines Slice-Laufs inkl. Auswirkungen der Policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SliceOutcome {
    /// Befehle in Eingabereihenfolge
    pub commands: Vec<StepCommand>,
    /// Verworfene, nicht zeichenbare Abtastpunkte
    pub skipped: usize,
    /// Auf den zeichenbaren Rand gezogene Abtastpunkte
    pub clamped: usize,
    /// Durch die Policy eingefügte Pen-Lifts (zusätzlich zu denen des Pfads)
    pub synthetic_lifts: usize,
}

/// Konfigurierter Slicer (Arm + Policy).
#[derive(Debug, Clone, Copy)]
pub struct Slicer {
    config: ArmConfig,
    policy: UnreachablePolicy,
}

impl Slicer {
    pub fn new(config: ArmConfig) -> Self {
        Self {
            config,
            policy: UnreachablePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: UnreachablePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> UnreachablePolicy {
        self.policy
    }

    /// Slict den kompletten Pfad.
    ///
    /// Lehnt den ganzen Pfad ab, wenn die Arm-Konfiguration ungültig ist oder
    /// ein Abtastpunkt nicht-endliche Koordinaten hat.
    pub fn slice(&self, path: &Path) -> Result<SliceOutcome> {
        self.config
            .validate()
            .context("Slicing abgelehnt: Arm-Konfiguration ungueltig")?;
        validate_path(path)?;

        let mut outcome = SliceOutcome {
            commands: Vec::with_capacity(path.len()),
            ..SliceOutcome::default()
        };
        // Teilpfad hat bereits einen Strich begonnen
        let mut stroke_open = false;
        // Lücke durch verworfene Punkte, Pen-Lift vor dem nächsten Strich nötig
        let mut gap_pending = false;

        for (index, element) in path.iter().enumerate() {
            let target = match *element {
                PathElement::PenLift => {
                    outcome.commands.push(StepCommand::PenLift);
                    stroke_open = false;
                    gap_pending = false;
                    continue;
                }
                PathElement::Sample(target) => target,
            };

            let solved = solve(target, &self.config);
            let producible = if solved.is_producible() {
                Some(solved)
            } else if self.policy == UnreachablePolicy::Clamp {
                let clamped = clamp_to_producible(target, &self.config)
                    .map(|point| solve(point, &self.config));
                outcome.clamped += usize::from(clamped.is_some());
                clamped
            } else {
                None
            };

            let Some(result) = producible else {
                log::debug!(
                    "Punkt {} ({:.2}, {:.2}) nicht zeichenbar ({:?}), verworfen",
                    index,
                    target.x,
                    target.y,
                    solved.reachability()
                );
                outcome.skipped += 1;
                gap_pending |= stroke_open;
                continue;
            };

            if gap_pending {
                outcome.commands.push(StepCommand::PenLift);
                outcome.synthetic_lifts += 1;
                gap_pending = false;
            }
            outcome
                .commands
                .push(StepCommand::actuate(result.step_a, result.step_b));
            stroke_open = true;
        }

        if outcome.skipped > 0 || outcome.clamped > 0 {
            log::warn!(
                "Slicer ({}): {} Punkte verworfen, {} Punkte geklemmt, {} Pen-Lifts eingefuegt",
                self.policy.label(),
                outcome.skipped,
                outcome.clamped,
                outcome.synthetic_lifts
            );
        }
        log::debug!(
            "Slicer: {} Pfad-Elemente -> {} Befehle",
            path.len(),
            outcome.commands.len()
        );

        Ok(outcome)
    }
}

/// Slict einen Pfad mit der Standard-Policy (`LiftAndSkip`).
pub fn slice(path: &Path, config: &ArmConfig) -> Result<Vec<StepCommand>> {
    Ok(Slicer::new(*config).slice(path)?.commands)
}

/// Strukturprüfung: alle Abtastpunkte müssen endliche Koordinaten haben.
fn validate_path(path: &Path) -> Result<()> {
    for (index, element) in path.iter().enumerate() {
        if let PathElement::Sample(point) = element {
            if !point.is_finite() {
                bail!(
                    "Pfad-Element {} hat nicht-endliche Koordinaten ({}, {})",
                    index,
                    point.x,
                    point.y
                );
            }
        }
    }
    Ok(())
}
