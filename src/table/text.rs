//! C-Header-Darstellung der Step-Table (zum Einbetten in die Firmware).
//!
//! ```text
//! // rhombus-plotter step table, PenLift = {32767, 32767}
//! const uint32_t STEP_TABLE_ROWS = 2;
//! const int16_t STEP_TABLE[2][2] = {
//!     {986, -986},
//!     {32767, 32767},
//! };
//! ```

use super::{StepRow, StepTable, PEN_LIFT_SENTINEL};
use anyhow::{bail, Context, Result};
use std::fmt::Write as _;

const ROWS_DECL: &str = "const uint32_t STEP_TABLE_ROWS =";
const TABLE_DECL: &str = "const int16_t STEP_TABLE[";

/// Schreibt die Tabelle als C-Header-Text.
pub fn write_text(table: &StepTable) -> Result<String> {
    table.check_row_count()?;

    let mut output = String::with_capacity(96 + table.rows.len() * 16);
    writeln!(
        output,
        "// rhombus-plotter step table, PenLift = {{{}, {}}}",
        PEN_LIFT_SENTINEL[0], PEN_LIFT_SENTINEL[1]
    )?;
    writeln!(output, "{} {};", ROWS_DECL, table.row_count)?;
    writeln!(output, "{}{}][2] = {{", TABLE_DECL, table.row_count)?;
    for row in &table.rows {
        writeln!(output, "    {{{}, {}}},", row[0], row[1])?;
    }
    output.push_str("};\n");
    Ok(output)
}

/// Liest eine mit `write_text` erzeugte Tabelle.
///
/// Kommentare und Leerzeilen werden ignoriert. Header, Array-Dimension und
/// tatsächliche Zeilenanzahl müssen übereinstimmen.
pub fn parse_text(content: &str) -> Result<StepTable> {
    let mut header: Option<u32> = None;
    let mut dimension: Option<u32> = None;
    let mut rows: Vec<StepRow> = Vec::new();

    for (line_index, raw_line) in content.lines().enumerate() {
        let line_no = line_index + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with("//") || line == "};" {
            continue;
        }

        if let Some(rest) = line.strip_prefix(ROWS_DECL) {
            let value = rest.trim().trim_end_matches(';').trim();
            header = Some(
                value
                    .parse()
                    .with_context(|| format!("Zeile {line_no}: ungueltige Zeilenanzahl '{value}'"))?,
            );
        } else if let Some(rest) = line.strip_prefix(TABLE_DECL) {
            let value = rest.split(']').next().unwrap_or_default().trim();
            dimension = Some(
                value
                    .parse()
                    .with_context(|| format!("Zeile {line_no}: ungueltige Array-Groesse '{value}'"))?,
            );
        } else if line.starts_with('{') {
            rows.push(parse_row(line).with_context(|| format!("Zeile {line_no}"))?);
        } else {
            bail!("Zeile {line_no}: unerwarteter Inhalt '{line}'");
        }
    }

    let Some(row_count) = header else {
        bail!("Step-Table-Text ohne Zeilenanzahl-Header");
    };
    if let Some(dimension) = dimension {
        if dimension != row_count {
            bail!("Array-Groesse {dimension} passt nicht zum Header {row_count}");
        }
    }

    let table = StepTable { row_count, rows };
    table.check_row_count()?;
    Ok(table)
}

fn parse_row(line: &str) -> Result<StepRow> {
    let inner = line
        .trim_end_matches(',')
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .with_context(|| format!("ungueltige Zeile '{line}'"))?;

    let mut values = inner.split(',').map(str::trim);
    let (Some(a), Some(b), None) = (values.next(), values.next(), values.next()) else {
        bail!("Zeile muss genau zwei Werte enthalten: '{line}'");
    };
    let a: i16 = a.parse().with_context(|| format!("ungueltiger Wert '{a}'"))?;
    let b: i16 = b.parse().with_context(|| format!("ungueltiger Wert '{b}'"))?;
    Ok([a, b])
}
