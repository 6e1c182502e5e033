//! quickcalc - Engineering Quick Calculators
//!
//! Voltage divider, regulator feedback, thermistor, battery, Ohm's law, ADC,
//! cable drop and wire gauge calculators for the terminal, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
