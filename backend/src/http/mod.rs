//! HTTP server module for the MINT backend.
//!
//! Thin axum wiring over the service layer: handlers parse the request,
//! call one service function and wrap the result in the `{data}` envelope.
//!
//! ```text
//! HTTP Layer (axum handlers)
//!   request parsing, error mapping, CORS, compression, tracing
//!        │
//! Service Layer (services/)
//!   scenarios → batch → emulator → reconcile, compare parameters
//!        │
//! Emulator (emulator/)
//!   external batch evaluator
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
