//! Structured operation layer over the pricing engine.
//!
//! Callers that arrive as text (automation scripts, the CLI's `op` mode,
//! an assistant integration) get parsed into exactly one of N valid
//! operations, executed against read-only config, and answered with a
//! structured result:
//!
//! - Every operation is an enum variant with typed parameters
//! - Every response is a structured type, not free-form text
//! - Invalid requests are rejected at parse time, not at runtime
//! - The compiler guarantees every operation has a handler

pub mod error;
pub mod ops;
pub mod protocol;

pub use error::{BridgeError, BridgeResult};
pub use ops::EngineOperation;
pub use protocol::{Bridge, BridgeRequest, BridgeResponse, OperationResult};
