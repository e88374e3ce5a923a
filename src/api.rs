//! The OS messaging surface consumed by this crate.
//!
//! Every component talks to the OS through [`MessagingApi`], one method per Win32 entry point,
//! keeping the native argument shapes and zero/null failure sentinels. The production
//! implementation is [`crate::win32::User32`]; tests substitute an in-process fake that models
//! the atom table and the thread message queue.

use widestring::{U16CStr, U16CString};

use crate::class::WindowClassEx;
use crate::error::{Error, Result};
use crate::types::{
    LParam, LResult, MenuHandle, MessageId, ModuleHandle, Msg, Point, WParam, WindowHandle,
};

/// Arguments of `CreateWindowExW`, in native order.
#[derive(Copy, Clone, Debug)]
pub struct CreateWindowArgs {
    pub ex_style: u32,
    /// Class name pointer or `MAKEINTATOM` value.
    pub class: *const u16,
    pub window_name: *const u16,
    pub style: u32,
    pub origin: Point,
    pub width: i32,
    pub height: i32,
    pub parent: WindowHandle,
    pub menu: MenuHandle,
    pub instance: ModuleHandle,
    pub param: *mut core::ffi::c_void,
}

/// Synchronous Win32 window-messaging calls. All methods must be called on the thread that
/// owns the windows involved, except [`MessagingApi::post_thread_message`] and
/// [`MessagingApi::post_message`], which the OS allows from any thread.
pub trait MessagingApi {
    /// `RegisterWindowMessageW`; zero on failure.
    fn register_window_message(&self, name: &U16CStr) -> u32;

    /// `GetModuleHandleW(NULL)`: the instance of the running executable.
    fn module_handle(&self) -> ModuleHandle;

    /// `RegisterClassExW`; zero on failure.
    ///
    /// # Safety
    /// Every pointer in `class` must be null or valid for the duration of the call.
    unsafe fn register_class_ex(&self, class: &WindowClassEx) -> u16;

    /// `CreateWindowExW`; null on failure.
    ///
    /// # Safety
    /// `args.class` must be a valid atom or NUL-terminated string and `args.window_name` null
    /// or NUL-terminated.
    unsafe fn create_window_ex(&self, args: &CreateWindowArgs) -> WindowHandle;

    /// `GetMessageW`; positive for a message, zero for `WM_QUIT`, -1 on failure.
    fn get_message(&self, msg: &mut Msg, window: WindowHandle, min: u32, max: u32) -> i32;

    /// `TranslateMessage`; true when a character message was generated.
    fn translate_message(&self, msg: &Msg) -> bool;

    /// `DispatchMessageW`; returns the window procedure's result.
    fn dispatch_message(&self, msg: &Msg) -> LResult;

    /// `DefWindowProcW`.
    fn def_window_proc(
        &self,
        window: WindowHandle,
        message: MessageId,
        wparam: WParam,
        lparam: LParam,
    ) -> LResult;

    /// `PostMessageW`; false on failure.
    fn post_message(
        &self,
        window: WindowHandle,
        message: MessageId,
        wparam: WParam,
        lparam: LParam,
    ) -> bool;

    /// `SendMessageW`.
    fn send_message(
        &self,
        window: WindowHandle,
        message: MessageId,
        wparam: WParam,
        lparam: LParam,
    ) -> LResult;

    /// `PostThreadMessageW`; false on failure.
    fn post_thread_message(
        &self,
        thread_id: u32,
        message: MessageId,
        wparam: WParam,
        lparam: LParam,
    ) -> bool;

    /// `GetCurrentThreadId`.
    fn current_thread_id(&self) -> u32;

    /// `GetLastError`.
    fn last_error(&self) -> u32;
}

/// Convert a non-empty name into a NUL-terminated UTF-16 string for the OS.
pub(crate) fn wide_name(what: &'static str, name: &str) -> Result<U16CString> {
    if name.is_empty() {
        return Err(Error::InvalidName {
            what,
            name: name.to_string(),
        });
    }
    U16CString::from_str(name).map_err(|_| Error::InvalidName {
        what,
        name: name.to_string(),
    })
}
