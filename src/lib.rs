//! Inter-process messaging over Win32 message-only windows.
//!
//! Two cooperating processes agree on a message name, each registers it to obtain the same
//! session-wide identifier, and they exchange that message by posting to each other's
//! message-only window. The window never appears on screen or in top-level enumeration; it
//! exists only to own a message queue.
//!
//! The pieces compose bottom-up:
//! - [`registry`] turns a name into a [`MessageId`](types::MessageId).
//! - [`class`] registers a window class once and caches its atom.
//! - [`window`] creates the message-only window from that atom.
//! - [`router`] is the window procedure: it hands each message to the handler attached for
//!   the window, or to the default procedure.
//! - [`pump`] drives retrieval and dispatch until `WM_QUIT`.
//! - [`endpoint`] wires all of the above in the required order.
//!
//! Every OS call goes through [`api::MessagingApi`]; on Windows the implementation is
//! `win32::User32`.

pub mod api;
pub mod class;
pub mod cli;
pub mod constants;
pub mod endpoint;
pub mod error;
pub mod logging;
pub mod pump;
pub mod registry;
pub mod router;
pub mod send;
pub mod types;
#[cfg(windows)]
pub mod win32;
pub mod window;

#[cfg(test)]
mod fake_api;

pub use api::MessagingApi;
pub use class::WindowClass;
pub use endpoint::{EndpointConfig, IpcEndpoint};
pub use error::{Error, Result};
pub use pump::MessagePump;
pub use registry::register_message;
pub use router::{CallbackRouter, MessageHandler};
pub use window::MessageWindow;
