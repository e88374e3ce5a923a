//! Composed IPC endpoint: registered message, window class, message-only window and router.
//!
//! Startup order matters and is fixed here:
//! 1. install the callback router on the calling thread,
//! 2. register the shared message name,
//! 3. register the window class (cached atom),
//! 4. create the message-only window,
//! 5. attach the caller's handler to the new window.
//!
//! All of it happens on the thread that will later run the pump. Nothing is torn down
//! explicitly; the window and class are released when the process exits.

use std::cell::Cell;
use std::rc::Rc;

use tracing::info;

use crate::api::MessagingApi;
use crate::class::WindowClass;
use crate::error::Result;
use crate::pump::MessagePump;
use crate::registry::register_message;
use crate::router::{CallbackRouter, MessageHandler, window_proc};
use crate::send;
use crate::types::{ClassAtom, LParam, LResult, MessageId, WParam, WindowHandle};
use crate::window::MessageWindow;

pub const DEFAULT_MESSAGE_NAME: &str = "SkypeControlAPIAttach";
pub const DEFAULT_CLASS_NAME: &str = "IPC_WINDOW";
pub const DEFAULT_WINDOW_NAME: &str = "IPC endpoint";

/// Names identifying the endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Message name shared with the counterpart process.
    pub message_name: String,
    pub class_name: String,
    pub window_name: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            message_name: DEFAULT_MESSAGE_NAME.to_string(),
            class_name: DEFAULT_CLASS_NAME.to_string(),
            window_name: DEFAULT_WINDOW_NAME.to_string(),
        }
    }
}

pub struct IpcEndpoint {
    api: Rc<dyn MessagingApi>,
    router: Rc<CallbackRouter>,
    class: WindowClass,
    window: MessageWindow,
    message_id: MessageId,
    thread_id: u32,
    /// Exit code once the pump has retrieved `WM_QUIT`.
    exit_code: Cell<Option<usize>>,
}

impl IpcEndpoint {
    /// Bring the endpoint up on the calling thread.
    ///
    /// `make_handler` receives the registered message identifier so the handler can
    /// special-case it; everything it declines goes to the default window procedure.
    pub fn open<F>(
        api: Rc<dyn MessagingApi>,
        config: &EndpointConfig,
        make_handler: F,
    ) -> Result<Self>
    where
        F: FnOnce(MessageId) -> Rc<dyn MessageHandler>,
    {
        let router = CallbackRouter::install(api.clone())?;
        let message_id = register_message(api.as_ref(), &config.message_name)?;
        let mut class = WindowClass::new(&config.class_name, window_proc)?;
        let window = MessageWindow::create(api.clone(), &mut class, &config.window_name)?;
        router.attach(window.handle(), make_handler(message_id));
        let thread_id = api.current_thread_id();
        info!(
            message_name = %config.message_name,
            message_id = format!("0x{:04X}", message_id.0),
            window = ?window.handle(),
            thread_id,
            "IPC endpoint open"
        );
        Ok(Self {
            api,
            router,
            class,
            window,
            message_id,
            thread_id,
            exit_code: Cell::new(None),
        })
    }

    pub fn window(&self) -> WindowHandle {
        self.window.handle()
    }

    pub fn message_id(&self) -> MessageId {
        self.message_id
    }

    pub fn atom(&self) -> ClassAtom {
        self.window.atom()
    }

    pub fn class(&self) -> &WindowClass {
        &self.class
    }

    /// Thread that owns the window and must run the pump.
    pub fn thread_id(&self) -> u32 {
        self.thread_id
    }

    /// Replace the handler attached to this endpoint's window.
    pub fn set_handler(&self, handler: Rc<dyn MessageHandler>) {
        self.router.attach(self.window.handle(), handler);
    }

    /// Post the registered message to `target`.
    pub fn post_to(&self, target: WindowHandle, wparam: WParam, lparam: LParam) -> Result<()> {
        send::post_message(self.api.as_ref(), target, self.message_id, wparam, lparam)
    }

    /// Send the registered message to `target` and wait for its result.
    pub fn send_to(&self, target: WindowHandle, wparam: WParam, lparam: LParam) -> LResult {
        send::send_message(self.api.as_ref(), target, self.message_id, wparam, lparam)
    }

    /// Broadcast the registered message with this endpoint's handle as `wParam`, the usual
    /// way to announce the endpoint to a listening counterpart.
    pub fn announce(&self, lparam: LParam) -> Result<()> {
        let wparam = WParam(self.window.handle().0 as usize);
        send::broadcast(self.api.as_ref(), self.message_id, wparam, lparam)
    }

    /// Stop the pump running on the owning thread.
    pub fn quit(&self, exit_code: usize) -> Result<()> {
        send::post_quit(self.api.as_ref(), self.thread_id, exit_code)
    }

    /// Run the dispatch loop until `WM_QUIT`; returns the quit exit code.
    ///
    /// Once stopped the endpoint stays stopped: later calls return the same code without
    /// touching the queue.
    pub fn run(&self) -> Result<usize> {
        if let Some(code) = self.exit_code.get() {
            return Ok(code);
        }
        let code = MessagePump::new(self.api.as_ref()).run()?;
        self.exit_code.set(Some(code));
        Ok(code)
    }
}
