//! Error taxonomy for the transport engine.

use thiserror::Error;

/// A failed outcome of a single command/response exchange. Success is a
/// bound final result code and is signaled as `Ok(F)`, not a variant here;
/// the concrete disposition (`Ok` vs. a tagged error) is then found by
/// inspecting the bound alternative in the caller's result pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorCode {
    #[error("command serialization failed")]
    SerializationFailed,
    #[error("device write failed (partial or zero write)")]
    WriteFailed,
    #[error("internal FSM state violation")]
    InternalError,
    #[error("transport is shutting down")]
    ShuttingDown,
}

/// Decode-side failure, returned by the `Decode::decode` convenience wrapper.
///
/// A parse miss is not an error by itself (the FSM just waits for more
/// bytes), but the convenience wrapper used in tests and by callers outside
/// the FSM needs to say why it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("input does not form a complete frame yet")]
    Incomplete,
    #[error("input does not match this shape")]
    Failed,
}
