//! Umgang mit nicht zeichenbaren Abtastpunkten.

use serde::{Deserialize, Serialize};

/// Was der Slicer mit einem Punkt macht, der nicht zeichenbar ist
/// (außerhalb des Rings oder jenseits des Gelenk-Schwenkbereichs).
///
/// Ein stilles `Actuate(0, 0)` gibt es absichtlich nicht: der Arm würde mit
/// abgesenktem Stift zur Home-Position fahren und einen Strich ziehen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnreachablePolicy {
    /// Punkt verwerfen; läuft der Teilpfad danach zeichenbar weiter,
    /// wird vorher genau ein zusätzlicher `PenLift` eingefügt.
    #[default]
    LiftAndSkip,
    /// Punkt auf den nächstgelegenen Rand des zeichenbaren Bereichs ziehen.
    Clamp,
}

impl UnreachablePolicy {
    pub fn label(self) -> &'static str {
        match self {
            Self::LiftAndSkip => "lift_and_skip",
            Self::Clamp => "clamp",
        }
    }
}

impl std::str::FromStr for UnreachablePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "lift_and_skip" | "skip" => Ok(Self::LiftAndSkip),
            "clamp" => Ok(Self::Clamp),
            other => anyhow::bail!("Unbekannte Policy: {other} (erlaubt: lift_and_skip, clamp)"),
        }
    }
}
