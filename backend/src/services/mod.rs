//! Service layer for the emulator pipeline and parameter metadata.
//!
//! Services sit between the HTTP handlers and the emulator. They turn a
//! validated request into a scenario batch, reconcile the emulator's tables
//! and resolve compare-parameter metadata from the form options.

pub mod batch;
pub mod emulator;
pub mod parameters;
pub mod reconcile;
pub mod resources;
pub mod scenarios;

#[cfg(test)]
mod test_support;


pub use batch::encode_scenarios;
pub use emulator::run_emulator_model;
pub use parameters::{get_compare_parameters, get_form_field};
pub use reconcile::post_process_results;
pub use resources::{get_dynamic_form_options, FormOptionsDocument};
pub use scenarios::build_scenarios;
