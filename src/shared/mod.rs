//! Geteilte Typen und Hilfsfunktionen außerhalb des Kinematik-Kerns.

pub mod options;
pub mod path_geometry;

pub use options::PlotterOptions;
