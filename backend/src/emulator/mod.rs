//! Boundary with the external emulator.
//!
//! The emulator is a black-box batch evaluator: it takes the columnar
//! scenario batch and returns a prevalence table, a cases table and a
//! batch-level validity flag. [`Emulator`] is the seam the pipeline talks
//! to; [`ProcessEmulator`] drives an emulator runner as a child process.

use async_trait::async_trait;

use crate::error::ServiceResult;
use crate::models::results::EmulatorOutput;
use crate::models::scenario::ScenarioBatch;

pub mod process;

pub use process::ProcessEmulator;

/// A batch scenario evaluator.
#[async_trait]
pub trait Emulator: Send + Sync {
    /// Evaluate every scenario in `batch` in one call.
    async fn run(&self, batch: &ScenarioBatch) -> ServiceResult<EmulatorOutput>;

    /// Version of the underlying emulator, as reported to clients.
    fn version(&self) -> String;
}
