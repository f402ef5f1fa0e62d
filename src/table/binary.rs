//! Binärformat der Step-Table.
//!
//! Layout (little-endian):
//! `b"RPST"` | Version `u8` | Zeilenanzahl `u32` | N × (`i16` step_a, `i16` step_b)

use super::{StepRow, StepTable};
use anyhow::{bail, Result};

const MAGIC: &[u8; 4] = b"RPST";
const FORMAT_VERSION: u8 = 1;
const HEADER_LEN: usize = 4 + 1 + 4;
const ROW_LEN: usize = 4;

/// Serialisiert die Tabelle binär.
pub fn to_bytes(table: &StepTable) -> Result<Vec<u8>> {
    table.check_row_count()?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + table.rows.len() * ROW_LEN);
    bytes.extend_from_slice(MAGIC);
    bytes.push(FORMAT_VERSION);
    bytes.extend_from_slice(&table.row_count.to_le_bytes());
    for row in &table.rows {
        bytes.extend_from_slice(&row[0].to_le_bytes());
        bytes.extend_from_slice(&row[1].to_le_bytes());
    }
    Ok(bytes)
}

/// Liest eine binär serialisierte Tabelle.
pub fn from_bytes(bytes: &[u8]) -> Result<StepTable> {
    if bytes.len() < HEADER_LEN {
        bail!("Step-Table zu kurz: {} Bytes", bytes.len());
    }
    let (header, body) = bytes.split_at(HEADER_LEN);
    if &header[0..4] != MAGIC {
        bail!("Step-Table: ungueltige Signatur");
    }
    if header[4] != FORMAT_VERSION {
        bail!("Step-Table: nicht unterstuetzte Formatversion {}", header[4]);
    }
    let row_count = u32::from_le_bytes([header[5], header[6], header[7], header[8]]);

    let expected = (row_count as usize).checked_mul(ROW_LEN);
    if expected != Some(body.len()) {
        bail!(
            "Step-Table: Header meldet {} Zeilen, Nutzdaten haben {} Bytes",
            row_count,
            body.len()
        );
    }

    let rows: Vec<StepRow> = body
        .chunks_exact(ROW_LEN)
        .map(|chunk| {
            [
                i16::from_le_bytes([chunk[0], chunk[1]]),
                i16::from_le_bytes([chunk[2], chunk[3]]),
            ]
        })
        .collect();

    Ok(StepTable { row_count, rows })
}
