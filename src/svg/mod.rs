//! SVG-Import: extrahiert Zeichenpfade aus einem SVG-Dokument.
//!
//! Liest `<path>`, `<polyline>`, `<polygon>` und `<line>`, zerlegt Kurven,
//! tastet jeden Teilpfad mit konstanter Bogenlänge ab und trennt Teilpfade
//! mit `PenLift`. Nicht-endliche Koordinaten werden abgelehnt.
//! `transform`-Attribute und CSS werden nicht ausgewertet; die Platzierung
//! auf dem Plotter erfolgt über `SvgImportOptions`.

pub mod path_data;
#[cfg(test)]
mod tests;

use crate::core::Path;
use crate::shared::path_geometry::resample_by_distance;
use anyhow::{bail, Context, Result};
use glam::DVec2;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use svgtypes::Number;

/// Standard-Abtastabstand entlang der Kurven (Welteinheiten).
pub const DEFAULT_SAMPLE_STEP: f64 = 2.0;

/// Abtastung und Platzierung der SVG-Geometrie in Weltkoordinaten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgImportOptions {
    /// Maximaler Abstand zweier Abtastpunkte entlang der Kurve
    pub sample_step: f64,
    /// Skalierung SVG-Einheiten → Welteinheiten
    pub scale: f64,
    /// Y-Achse spiegeln (SVG: +Y nach unten)
    pub flip_y: bool,
    /// Verschiebung nach Skalierung/Spiegelung
    pub offset: [f64; 2],
}

impl Default for SvgImportOptions {
    fn default() -> Self {
        Self {
            sample_step: DEFAULT_SAMPLE_STEP,
            scale: 1.0,
            flip_y: false,
            offset: [0.0, 0.0],
        }
    }
}

impl SvgImportOptions {
    fn validate(&self) -> Result<()> {
        if !self.sample_step.is_finite() || self.sample_step <= 0.0 {
            bail!("sample_step muss endlich und > 0 sein ({})", self.sample_step);
        }
        if !self.scale.is_finite() || self.scale == 0.0 {
            bail!("scale muss endlich und != 0 sein ({})", self.scale);
        }
        if !self.offset.iter().all(|v| v.is_finite()) {
            bail!("offset muss endlich sein ({:?})", self.offset);
        }
        Ok(())
    }

    /// SVG-Koordinaten → Weltkoordinaten. Fehler, wenn das Ergebnis nicht endlich ist.
    pub fn to_world(&self, point: DVec2) -> Result<DVec2> {
        let scaled = point * self.scale;
        let flipped = if self.flip_y {
            DVec2::new(scaled.x, -scaled.y)
        } else {
            scaled
        };
        let world = flipped + DVec2::from(self.offset);
        if !world.is_finite() {
            bail!("Punkt ({}, {}) liegt ausserhalb des Zahlenbereichs", point.x, point.y);
        }
        Ok(world)
    }
}

/// Importiert alle unterstützten Formen eines SVG-Dokuments als `Path`.
pub fn import_svg(svg_content: &str, options: &SvgImportOptions) -> Result<Path> {
    options.validate().context("Ungueltige SVG-Import-Optionen")?;

    // Abtastung in SVG-Einheiten, damit der Abstand in Welteinheiten stimmt
    let svg_step = options.sample_step / options.scale.abs();
    let polylines = extract_polylines(svg_content, svg_step)?;

    let mut subpaths = Vec::with_capacity(polylines.len());
    for (index, polyline) in polylines.iter().enumerate() {
        let world = resample_by_distance(polyline, svg_step)
            .and_then(|points| {
                points
                    .into_iter()
                    .map(|point| options.to_world(point))
                    .collect::<Result<Vec<_>>>()
            })
            .with_context(|| format!("Teilpfad {index} kann nicht abgetastet werden"))?;
        subpaths.push(world);
    }
    let path = Path::from_subpaths(subpaths);

    log::info!(
        "SVG importiert: {} Teilpfade, {} Abtastpunkte",
        polylines.len(),
        path.sample_count()
    );
    Ok(path)
}

/// Lädt und importiert eine SVG-Datei.
pub fn load_svg_file(path: &std::path::Path, options: &SvgImportOptions) -> Result<Path> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("SVG-Datei konnte nicht gelesen werden: {}", path.display()))?;
    import_svg(&content, options)
        .with_context(|| format!("SVG-Import fehlgeschlagen: {}", path.display()))
}

/// Sammelt alle Formen des Dokuments in Dokumentreihenfolge als Polylines.
fn extract_polylines(svg_content: &str, step: f64) -> Result<Vec<Vec<DVec2>>> {
    let mut reader = Reader::from_str(svg_content);
    reader.config_mut().trim_text(true);

    let mut buffer = Vec::new();
    let mut polylines = Vec::new();
    let mut element_index = 0usize;

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let local_name = e.local_name();
                let tag = reader.decoder().decode(local_name.as_ref())?.into_owned();
                let shapes = read_shape(&reader, e, &tag, step)
                    .with_context(|| format!("Fehler in <{tag}> (Element {element_index})"))?;
                polylines.extend(shapes);
                element_index += 1;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => bail!("XML-Fehler an Position {}: {}", reader.buffer_position(), e),
        }
        buffer.clear();
    }

    Ok(polylines)
}

fn read_shape(
    reader: &Reader<&[u8]>,
    element: &BytesStart<'_>,
    tag: &str,
    step: f64,
) -> Result<Vec<Vec<DVec2>>> {
    match tag {
        "path" => match attribute(reader, element, "d")? {
            Some(d) => path_data::parse_path_data(&d, step),
            None => Ok(Vec::new()),
        },
        "polyline" | "polygon" => {
            let Some(raw) = attribute(reader, element, "points")? else {
                return Ok(Vec::new());
            };
            let mut points = path_data::parse_points(&raw)?;
            if tag == "polygon" {
                if let Some(&first) = points.first() {
                    points.push(first);
                }
            }
            Ok(if points.len() >= 2 {
                vec![points]
            } else {
                Vec::new()
            })
        }
        "line" => {
            let mut coords = [0.0f64; 4];
            for (slot, name) in coords.iter_mut().zip(["x1", "y1", "x2", "y2"]) {
                if let Some(raw) = attribute(reader, element, name)? {
                    let Number(value) = raw
                        .trim()
                        .parse::<Number>()
                        .with_context(|| format!("Ungueltiger Wert {name}='{raw}'"))?;
                    if !value.is_finite() {
                        bail!("Nicht-endlicher Wert {name}='{raw}'");
                    }
                    *slot = value;
                }
            }
            Ok(vec![vec![
                DVec2::new(coords[0], coords[1]),
                DVec2::new(coords[2], coords[3]),
            ]])
        }
        _ => Ok(Vec::new()),
    }
}

fn attribute(
    reader: &Reader<&[u8]>,
    element: &BytesStart<'_>,
    name: &str,
) -> Result<Option<String>> {
    for attr in element.attributes().with_checks(false) {
        let attr = attr?;
        let local = attr.key.local_name();
        let key = reader.decoder().decode(local.as_ref())?;
        if key == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
