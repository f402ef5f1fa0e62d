//! Use-Cases: dünne Aufrufer desselben Kerns (Live-Probe und Batch-Slicing).

pub mod probe;
pub mod slice_job;

pub use probe::{probe, ProbeReport};
pub use slice_job::{
    read_table_file, slice_path, slice_svg, slice_svg_file, write_table_file, SliceReport,
};
