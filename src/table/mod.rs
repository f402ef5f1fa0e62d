//! Step-Table: kompakte, deterministische Darstellung einer Befehlsfolge.
//!
//! Jede Zeile ist ein Paar vorzeichenbehafteter 16-Bit-Werte. `PenLift` wird
//! als reserviertes Sentinel-Paar `(32767, 32767)` kodiert. Der Header trägt
//! die Zeilenanzahl.
//!
//! Externe Formate: C-Header-Text (`text`), Binär (`binary`) und JSON über serde.

pub mod binary;
pub mod text;

pub use binary::{from_bytes, to_bytes};
pub use text::{parse_text, write_text};

use crate::slicer::StepCommand;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Eine Tabellenzeile `[step_a, step_b]`.
pub type StepRow = [i16; 2];

/// Reserviertes Paar für `PenLift`.
pub const PEN_LIFT_SENTINEL: StepRow = [i16::MAX, i16::MAX];

/// Kodierte Step-Table mit Zeilenanzahl-Header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTable {
    /// Header: Anzahl der Zeilen
    pub row_count: u32,
    pub rows: Vec<StepRow>,
}

impl StepTable {
    /// Baut eine Tabelle und setzt den Header passend zu den Zeilen.
    pub fn from_rows(rows: Vec<StepRow>) -> Result<Self> {
        let row_count = u32::try_from(rows.len())
            .with_context(|| format!("Zu viele Zeilen fuer Step-Table: {}", rows.len()))?;
        Ok(Self { row_count, rows })
    }

    /// Header und tatsächliche Zeilenanzahl müssen übereinstimmen.
    pub fn check_row_count(&self) -> Result<()> {
        if self.row_count as usize != self.rows.len() {
            bail!(
                "Step-Table inkonsistent: Header meldet {} Zeilen, enthalten sind {}",
                self.row_count,
                self.rows.len()
            );
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Anzahl der Pen-Lift-Zeilen
    pub fn pen_lift_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| **row == PEN_LIFT_SENTINEL)
            .count()
    }
}

/// Kodiert eine Befehlsfolge, eine Zeile pro Befehl.
///
/// Schrittwerte außerhalb von `i16` oder gleich dem Sentinel sind nicht
/// darstellbar und führen zu einem Fehler statt zu stillem Überlauf.
pub fn encode(commands: &[StepCommand]) -> Result<StepTable> {
    let rows = commands
        .iter()
        .enumerate()
        .map(|(index, command)| encode_row(index, command))
        .collect::<Result<Vec<_>>>()?;
    StepTable::from_rows(rows)
}

fn encode_row(index: usize, command: &StepCommand) -> Result<StepRow> {
    match *command {
        StepCommand::PenLift => Ok(PEN_LIFT_SENTINEL),
        StepCommand::Actuate { step_a, step_b } => {
            let a = i16::try_from(step_a).with_context(|| {
                format!("Befehl {index}: step_a = {step_a} passt nicht in i16")
            })?;
            let b = i16::try_from(step_b).with_context(|| {
                format!("Befehl {index}: step_b = {step_b} passt nicht in i16")
            })?;
            if [a, b] == PEN_LIFT_SENTINEL {
                bail!("Befehl {index}: ({a}, {b}) kollidiert mit dem PenLift-Sentinel");
            }
            Ok([a, b])
        }
    }
}

/// Dekodiert eine Tabelle zurück in die Befehlsfolge.
pub fn decode(table: &StepTable) -> Result<Vec<StepCommand>> {
    table.check_row_count()?;
    Ok(table
        .rows
        .iter()
        .map(|&row| {
            if row == PEN_LIFT_SENTINEL {
                StepCommand::PenLift
            } else {
                StepCommand::actuate(i32::from(row[0]), i32::from(row[1]))
            }
        })
        .collect())
}

/// Ausgabeformat der Step-Table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableFormat {
    /// C-Header zum Einbetten in die Firmware
    #[default]
    Text,
    /// Kompaktes Binärformat
    Binary,
    /// JSON (serde)
    Json,
}

impl std::str::FromStr for TableFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "c" | "h" => Ok(Self::Text),
            "binary" | "bin" => Ok(Self::Binary),
            "json" => Ok(Self::Json),
            other => bail!("Unbekanntes Tabellenformat: {other} (erlaubt: text, binary, json)"),
        }
    }
}

impl TableFormat {
    /// Serialisiert die Tabelle im gewählten Format.
    pub fn render(self, table: &StepTable) -> Result<Vec<u8>> {
        match self {
            Self::Text => Ok(write_text(table)?.into_bytes()),
            Self::Binary => to_bytes(table),
            Self::Json => {
                table.check_row_count()?;
                Ok(serde_json::to_vec_pretty(table)?)
            }
        }
    }

    /// Liest eine Tabelle im gewählten Format.
    pub fn parse(self, data: &[u8]) -> Result<StepTable> {
        let table = match self {
            Self::Text => {
                let content =
                    std::str::from_utf8(data).context("Step-Table-Text ist kein UTF-8")?;
                parse_text(content)?
            }
            Self::Binary => from_bytes(data)?,
            Self::Json => serde_json::from_slice(data).context("Step-Table-JSON ungueltig")?,
        };
        table.check_row_count()?;
        Ok(table)
    }
}
