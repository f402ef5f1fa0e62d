//! Mechanische Kalibrierung des Rhombus-Arms.
//!
//! Der Core kennt keine eingebauten Werte: `ArmConfig` wird immer vom
//! Aufrufer geliefert (CLI/TOML-Datei, Tests, Renderer).

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Kalibrierkonstanten eines Rhombus-Arms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArmConfig {
    /// Länge jedes Armsegments (Drehpunkt → Gelenk und Gelenk → Stift)
    pub arm_length: f64,
    /// Minimale Stiftentfernung vom Drehpunkt
    pub min_reach: f64,
    /// Maximale Stiftentfernung vom Drehpunkt
    pub max_reach: f64,
    /// Schritte des Aktuators über den vollen Schwenkbereich
    pub full_steps_per_sweep: u32,
    /// Voller Schwenkbereich in Grad
    pub full_sweep_degrees: f64,
}

impl ArmConfig {
    pub fn new(
        arm_length: f64,
        min_reach: f64,
        max_reach: f64,
        full_steps_per_sweep: u32,
        full_sweep_degrees: f64,
    ) -> Self {
        Self {
            arm_length,
            min_reach,
            max_reach,
            full_steps_per_sweep,
            full_sweep_degrees,
        }
    }

    /// Prüft, ob die Konfiguration physikalisch sinnvoll ist.
    ///
    /// Der Solver selbst schlägt nie fehl; Slicer und CLI lehnen ungültige
    /// Konfigurationen aber vor der Verarbeitung ab.
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("arm_length", self.arm_length),
            ("min_reach", self.min_reach),
            ("max_reach", self.max_reach),
            ("full_sweep_degrees", self.full_sweep_degrees),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value <= 0.0 {
                bail!("Ungueltige Arm-Konfiguration: {name} = {value} (muss endlich und > 0 sein)");
            }
        }
        if self.full_steps_per_sweep == 0 {
            bail!("Ungueltige Arm-Konfiguration: full_steps_per_sweep muss > 0 sein");
        }
        if self.min_reach > self.max_reach {
            bail!(
                "Ungueltige Arm-Konfiguration: min_reach ({}) > max_reach ({})",
                self.min_reach,
                self.max_reach
            );
        }
        if self.min_reach > 2.0 * self.arm_length {
            bail!(
                "Ungueltige Arm-Konfiguration: min_reach ({}) liegt ausserhalb der Armspannweite ({})",
                self.min_reach,
                2.0 * self.arm_length
            );
        }
        Ok(())
    }

    /// Umrechnungsfaktor Grad → Schritte.
    ///
    /// Liefert 0.0 statt Inf/NaN, falls `full_sweep_degrees` nicht nutzbar ist.
    pub fn steps_per_degree(&self) -> f64 {
        let factor = f64::from(self.full_steps_per_sweep) / self.full_sweep_degrees;
        if factor.is_finite() {
            factor
        } else {
            0.0
        }
    }

    /// Tatsächlich nutzbarer Außenradius: `min(max_reach, 2·arm_length)`.
    pub fn effective_max_reach(&self) -> f64 {
        self.max_reach.min(2.0 * self.arm_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn plotter() -> ArmConfig {
        ArmConfig::new(200.0, 100.0, 360.0, 2900, 200.0)
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(plotter().validate().is_ok());
    }

    #[test]
    fn test_steps_per_degree() {
        assert_relative_eq!(plotter().steps_per_degree(), 14.5);
    }

    #[test]
    fn test_steps_per_degree_guards_zero_sweep() {
        let mut config = plotter();
        config.full_sweep_degrees = 0.0;
        assert_eq!(config.steps_per_degree(), 0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_effective_max_reach_is_bounded_by_arm_span() {
        let mut config = plotter();
        assert_relative_eq!(config.effective_max_reach(), 360.0);
        config.max_reach = 500.0;
        assert_relative_eq!(config.effective_max_reach(), 400.0);
    }

    #[test]
    fn test_rejects_inverted_reach() {
        let mut config = plotter();
        config.min_reach = 400.0;
        let err = config.validate().expect_err("min > max muss abgelehnt werden");
        assert!(format!("{err:#}").contains("min_reach"));
    }

    #[test]
    fn test_rejects_non_finite_length() {
        let mut config = plotter();
        config.arm_length = f64::NAN;
        assert!(config.validate().is_err());
    }
}
