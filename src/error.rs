//! Error taxonomy for the messaging transport.
//!
//! None of these are transient: each one reflects a malformed input or a missing OS facility,
//! so callers propagate them instead of retrying.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// `RegisterClassExW` returned zero.
    #[error("RegisterClassExW failed for class {class:?} (error {code})")]
    ClassRegistration { class: String, code: u32 },

    /// `CreateWindowExW` returned a null window.
    #[error("CreateWindowExW failed for class {class} (error {code})")]
    WindowCreation { class: String, code: u32 },

    /// A required module or entry point could not be resolved.
    #[error("{library} entry point {symbol} is not available")]
    OsApiUnavailable {
        library: &'static str,
        symbol: &'static str,
    },

    /// `RegisterWindowMessageW` returned zero.
    #[error("RegisterWindowMessageW failed for {name:?} (error {code})")]
    MessageRegistration { name: String, code: u32 },

    /// Name cannot be passed to the OS as a NUL-terminated UTF-16 string.
    #[error("invalid {what} name {name:?}")]
    InvalidName { what: &'static str, name: String },

    /// `GetMessageW` returned -1.
    #[error("GetMessageW failed (error {code})")]
    MessageRetrieval { code: u32 },

    /// The calling thread already routes window messages through another API instance.
    #[error("a callback router bound to a different messaging API is installed on this thread")]
    RouterConflict,

    /// `PostMessageW` / `PostThreadMessageW` returned zero.
    #[error("posting message 0x{message:04X} failed (error {code})")]
    Post { message: u32, code: u32 },
}
