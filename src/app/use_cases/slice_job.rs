//! Use-Case: Batch-Slicing (Pfad → Befehle → Step-Table) und Tabellen-Dateien.

use crate::core::{ArmConfig, Path};
use crate::shared::PlotterOptions;
use crate::slicer::{SliceOutcome, Slicer, StepCommand, UnreachablePolicy};
use crate::svg;
use crate::table::{self, StepTable, TableFormat};
use anyhow::{Context, Result};

/// Ergebnis eines kompletten Slice-Laufs.
#[derive(Debug, Clone)]
pub struct SliceReport {
    pub path: Path,
    pub outcome: SliceOutcome,
    pub table: StepTable,
}

/// Slict einen fertigen Pfad und kodiert das Ergebnis.
pub fn slice_path(path: Path, arm: &ArmConfig, policy: UnreachablePolicy) -> Result<SliceReport> {
    let slicer = Slicer::new(*arm).with_policy(policy);
    let outcome = slicer.slice(&path)?;
    let table =
        table::encode(&outcome.commands).context("Step-Table konnte nicht kodiert werden")?;

    log::info!(
        "Slicing fertig ({}): {} Abtastpunkte -> {} Zeilen ({} Pen-Lifts)",
        slicer.policy().label(),
        path.sample_count(),
        table.len(),
        table.pen_lift_count()
    );

    Ok(SliceReport {
        path,
        outcome,
        table,
    })
}

/// SVG-Text importieren und slicen.
pub fn slice_svg(svg_content: &str, options: &PlotterOptions) -> Result<SliceReport> {
    let arm = options.arm_config()?;
    let path = svg::import_svg(svg_content, &options.svg)?;
    slice_path(path, &arm, options.policy)
}

/// SVG-Datei importieren und slicen.
pub fn slice_svg_file(file: &std::path::Path, options: &PlotterOptions) -> Result<SliceReport> {
    let arm = options.arm_config()?;
    let path = svg::load_svg_file(file, &options.svg)?;
    slice_path(path, &arm, options.policy)
}

/// Schreibt eine Step-Table im gewählten Format.
pub fn write_table_file(
    table: &StepTable,
    format: TableFormat,
    file: &std::path::Path,
) -> Result<()> {
    let bytes = format.render(table)?;
    std::fs::write(file, bytes).with_context(|| {
        format!("Step-Table konnte nicht geschrieben werden: {}", file.display())
    })?;
    log::info!(
        "Step-Table ({:?}, {} Zeilen) gespeichert nach: {}",
        format,
        table.len(),
        file.display()
    );
    Ok(())
}

/// Liest eine Step-Table-Datei und dekodiert sie in Befehle.
pub fn read_table_file(file: &std::path::Path, format: TableFormat) -> Result<Vec<StepCommand>> {
    let bytes = std::fs::read(file)
        .with_context(|| format!("Step-Table konnte nicht gelesen werden: {}", file.display()))?;
    let table = format
        .parse(&bytes)
        .with_context(|| format!("Step-Table ungueltig: {}", file.display()))?;
    table::decode(&table)
}
