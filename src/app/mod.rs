//! Application-Layer: Use-Cases über dem Core (Probe, Slicing, Tabellen-Dateien).

pub mod use_cases;

pub use use_cases::{
    probe, read_table_file, slice_path, slice_svg, slice_svg_file, write_table_file, ProbeReport,
    SliceReport,
};
