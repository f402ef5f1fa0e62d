//! Rhombus-Plotter Library.
//! Kinematik, Slicer und Step-Table als Library exportiert für CLI, Tests und Renderer.

pub mod app;
pub mod core;
pub mod shared;
pub mod slicer;
pub mod svg;
pub mod table;

pub use app::{probe, ProbeReport, SliceReport};
pub use core::{
    clamp_to_producible, solve, ArmConfig, KinematicsResult, Path, PathElement, Point2D,
    Reachability,
};
pub use shared::PlotterOptions;
pub use slicer::{slice, SliceOutcome, Slicer, StepCommand, UnreachablePolicy};
pub use svg::{import_svg, SvgImportOptions};
pub use table::{decode, encode, StepTable, TableFormat};
