//! Ports (trait boundaries) for external collaborators.
//!
//! The grid-world simulation, route planning, and training observation all
//! live outside this crate. Following hexagonal architecture, these traits
//! are owned by the learning core and implemented by adapters: a real
//! simulator in a host application, scripted doubles in the test suite.

pub mod environment;
pub mod observer;
pub mod planner;

pub use environment::Environment;
pub use observer::Observer;
pub use planner::RoutePlanner;
