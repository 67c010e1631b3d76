//! CLI infrastructure for the smartcab toolkit
//!
//! This module provides the command-line interface for inspecting trained
//! agents and exporting exploration schedules for analysis.

pub mod commands;
pub mod output;
