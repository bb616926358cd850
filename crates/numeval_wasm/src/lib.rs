//! WASM bridge for the `numeval_core` evaluation engine.
//!
//! Arguments cross the boundary as serde-encoded [`wire::WireValue`]s and are
//! decoded into core values before dispatch.
pub mod engine;
pub mod wire;

pub use engine::WasmEngine;
pub use wire::WireValue;
