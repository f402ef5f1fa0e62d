//! Core-Domäne: Datenmodell, Arm-Konfiguration und Rhombus-Kinematik.
//!
//! Alles hier ist reine Berechnung ohne I/O und ohne Zustand zwischen Aufrufen.

pub mod arm_config;
pub mod geometry;
pub mod kinematics;

pub use arm_config::ArmConfig;
pub use geometry::{Path, PathElement, Point2D};
pub use kinematics::{
    clamp_to_producible, solve, KinematicsResult, Reachability, JOINT_SWEEP_LIMIT_DEG,
};
