//! Zentrale Konfiguration für den Rhombus-Plotter.
//!
//! `PlotterOptions` wird als TOML-Datei neben der Binary gespeichert.
//! Die Arm-Geometrie hat bewusst keinen Standardwert: ohne `[arm]`-Abschnitt
//! verweigern Slicer und Probe die Arbeit. `PlotterOptions::template()`
//! liefert eine Vorlage mit den Werten des Prototyp-Aufbaus.

use crate::core::ArmConfig;
use crate::slicer::UnreachablePolicy;
use crate::svg::SvgImportOptions;
use crate::table::TableFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ── Vorlage (Prototyp-Aufbau) ───────────────────────────────────────

/// Segmentlänge des Prototyp-Arms.
pub const TEMPLATE_ARM_LENGTH: f64 = 200.0;
/// Innerer Radius des Zeichenrings.
pub const TEMPLATE_MIN_REACH: f64 = 100.0;
/// Äußerer Radius des Zeichenrings.
pub const TEMPLATE_MAX_REACH: f64 = 360.0;
/// Schritte über den vollen Schwenkbereich.
pub const TEMPLATE_FULL_STEPS_PER_SWEEP: u32 = 2900;
/// Voller Schwenkbereich in Grad.
pub const TEMPLATE_FULL_SWEEP_DEGREES: f64 = 200.0;

/// Name der Optionen-Datei.
pub const CONFIG_FILE_NAME: &str = "rhombus_plotter.toml";

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle Plotter-Optionen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotterOptions {
    // Einfache Werte müssen in TOML vor den Tabellen stehen
    /// Umgang mit nicht zeichenbaren Punkten
    #[serde(default)]
    pub policy: UnreachablePolicy,
    /// Standard-Ausgabeformat der Step-Table
    #[serde(default)]
    pub output: TableFormat,
    /// Arm-Kalibrierung (Pflicht für Slicing und Probe)
    #[serde(default)]
    pub arm: Option<ArmConfig>,
    /// Abtastung und Platzierung beim SVG-Import
    #[serde(default)]
    pub svg: SvgImportOptions,
}

impl PlotterOptions {
    /// Vorlage mit den Kalibrierwerten des Prototyp-Aufbaus.
    pub fn template() -> Self {
        Self {
            arm: Some(ArmConfig::new(
                TEMPLATE_ARM_LENGTH,
                TEMPLATE_MIN_REACH,
                TEMPLATE_MAX_REACH,
                TEMPLATE_FULL_STEPS_PER_SWEEP,
                TEMPLATE_FULL_SWEEP_DEGREES,
            )),
            ..Self::default()
        }
    }

    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte (ohne Arm).
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {:#}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Parst Optionen aus TOML-Text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("TOML der Plotter-Optionen ungueltig")
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| {
            format!("Optionen konnten nicht geschrieben werden: {}", path.display())
        })?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("rhombus-plotter"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join(CONFIG_FILE_NAME)
    }

    /// Liefert die validierte Arm-Konfiguration.
    pub fn arm_config(&self) -> Result<ArmConfig> {
        let arm = self.arm.context(
            "Keine Arm-Konfiguration: [arm]-Abschnitt in der Optionen-Datei fehlt (siehe init-config)",
        )?;
        arm.validate()?;
        Ok(arm)
    }
}
