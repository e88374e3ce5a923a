//! Message-only endpoint window.
//!
//! Created with `HWND_MESSAGE` as parent: the window never renders, does not appear in the
//! desktop's top-level window list and cannot be found by normal enumeration, yet it has a
//! handle that other processes can post to once they learn it (typically via a broadcast of the
//! registered message). No destroy path exists; the window lives until the process exits.

use std::rc::Rc;

use tracing::{error, info};
use widestring::U16CString;

use crate::api::{CreateWindowArgs, MessagingApi};
use crate::class::WindowClass;
use crate::constants::{CW_USEDEFAULT, HWND_MESSAGE, WS_EX_LEFT};
use crate::error::{Error, Result};
use crate::router::CallbackRouter;
use crate::types::{ClassAtom, MenuHandle, Point, WindowHandle};

/// Style, geometry and parent passed to `CreateWindowExW`.
///
/// For a message-only window only `parent` matters; the defaults make that explicit with no
/// style, default position and zero size.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WindowParams {
    pub ex_style: u32,
    pub style: u32,
    pub origin: Point,
    pub width: i32,
    pub height: i32,
    pub parent: WindowHandle,
    pub menu: MenuHandle,
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            ex_style: WS_EX_LEFT,
            style: 0,
            origin: Point {
                x: CW_USEDEFAULT,
                y: CW_USEDEFAULT,
            },
            width: 0,
            height: 0,
            parent: HWND_MESSAGE,
            menu: MenuHandle::NULL,
        }
    }
}

/// Create a window of the class identified by `atom`.
pub fn create_window(
    api: &dyn MessagingApi,
    atom: ClassAtom,
    window_name: &str,
    params: &WindowParams,
) -> Result<WindowHandle> {
    let class_label = format!("atom 0x{:04X}", atom.0);
    let title = U16CString::from_str(window_name).map_err(|_| Error::InvalidName {
        what: "window",
        name: window_name.to_string(),
    })?;
    let args = CreateWindowArgs {
        ex_style: params.ex_style,
        class: atom.as_class_ptr(),
        window_name: title.as_ptr(),
        style: params.style,
        origin: params.origin,
        width: params.width,
        height: params.height,
        parent: params.parent,
        menu: params.menu,
        instance: api.module_handle(),
        param: std::ptr::null_mut(),
    };
    // SAFETY: `class` is an atom value and `title` outlives the call.
    let hwnd = unsafe { api.create_window_ex(&args) };
    if hwnd.is_null() {
        let code = api.last_error();
        error!(class = %class_label, code, "CreateWindowExW failed");
        return Err(Error::WindowCreation {
            class: class_label,
            code,
        });
    }
    Ok(hwnd)
}

/// A registered, addressable message-only window.
#[derive(Debug)]
pub struct MessageWindow {
    handle: WindowHandle,
    atom: ClassAtom,
    name: String,
}

impl MessageWindow {
    /// Register `class` if needed, then create a message-only window of it.
    ///
    /// The thread's callback router is installed first (or reused), since the OS delivers
    /// creation messages to the window procedure before `CreateWindowExW` returns.
    pub fn create(
        api: Rc<dyn MessagingApi>,
        class: &mut WindowClass,
        window_name: &str,
    ) -> Result<Self> {
        CallbackRouter::install(api.clone())?;
        let atom = class.register(api.as_ref())?;
        let handle = create_window(api.as_ref(), atom, window_name, &WindowParams::default())?;
        info!(class = class.name(), ?handle, "message-only window created");
        Ok(Self {
            handle,
            atom,
            name: window_name.to_string(),
        })
    }

    pub fn handle(&self) -> WindowHandle {
        self.handle
    }

    pub fn atom(&self) -> ClassAtom {
        self.atom
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
