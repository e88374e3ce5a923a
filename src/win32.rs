//! user32 backend for [`MessagingApi`].
//!
//! The messaging entry points are resolved at runtime from `user32.dll` (taken from the loaded
//! module list, loaded on demand otherwise) and cached for the life of the process. Resolving
//! them through `GetProcAddress` lets the calls use this crate's own `#[repr(C)]` records
//! directly and turns a missing library or symbol into [`Error::OsApiUnavailable`] instead of a
//! loader failure at startup.

use core::ffi::c_void;

use once_cell::sync::OnceCell;
use tracing::debug;
use widestring::U16CStr;
use windows::Win32::Foundation::GetLastError;
use windows::Win32::System::LibraryLoader::{GetModuleHandleW, GetProcAddress, LoadLibraryW};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::core::{PCSTR, PCWSTR, w};

use crate::api::{CreateWindowArgs, MessagingApi};
use crate::class::WindowClassEx;
use crate::error::{Error, Result};
use crate::types::{
    LParam, LResult, MenuHandle, MessageId, ModuleHandle, Msg, WParam, WindowHandle,
};

const LIBRARY: &str = "user32.dll";

type PfnRegisterWindowMessageW = unsafe extern "system" fn(*const u16) -> u32;
type PfnRegisterClassExW = unsafe extern "system" fn(*const WindowClassEx) -> u16;
type PfnCreateWindowExW = unsafe extern "system" fn(
    u32,
    *const u16,
    *const u16,
    u32,
    i32,
    i32,
    i32,
    i32,
    WindowHandle,
    MenuHandle,
    ModuleHandle,
    *mut c_void,
) -> WindowHandle;
type PfnGetMessageW = unsafe extern "system" fn(*mut Msg, WindowHandle, u32, u32) -> i32;
type PfnTranslateMessage = unsafe extern "system" fn(*const Msg) -> i32;
type PfnDispatchMessageW = unsafe extern "system" fn(*const Msg) -> LResult;
type PfnWindowCall = unsafe extern "system" fn(WindowHandle, MessageId, WParam, LParam) -> LResult;
type PfnPostMessageW = unsafe extern "system" fn(WindowHandle, MessageId, WParam, LParam) -> i32;
type PfnPostThreadMessageW = unsafe extern "system" fn(u32, MessageId, WParam, LParam) -> i32;

struct User32Fns {
    register_window_message: PfnRegisterWindowMessageW,
    register_class_ex: PfnRegisterClassExW,
    create_window_ex: PfnCreateWindowExW,
    get_message: PfnGetMessageW,
    translate_message: PfnTranslateMessage,
    dispatch_message: PfnDispatchMessageW,
    def_window_proc: PfnWindowCall,
    post_message: PfnPostMessageW,
    send_message: PfnWindowCall,
    post_thread_message: PfnPostThreadMessageW,
}

/// Missing symbol name (or the library itself) when resolution failed.
static FNS: OnceCell<std::result::Result<User32Fns, &'static str>> = OnceCell::new();

#[allow(clippy::missing_transmute_annotations)]
fn load_user32() -> Result<&'static User32Fns> {
    let loaded = FNS.get_or_init(|| unsafe {
        let name = w!("user32.dll");
        let hmod = GetModuleHandleW(name)
            .or_else(|_| LoadLibraryW(name))
            .map_err(|_| LIBRARY)?;
        macro_rules! need {
            ($n:literal as $t:ty) => {
                match GetProcAddress(hmod, PCSTR(concat!($n, "\0").as_ptr())) {
                    Some(p) => std::mem::transmute::<unsafe extern "system" fn() -> isize, $t>(p),
                    None => return Err($n),
                }
            };
        }
        let fns = User32Fns {
            register_window_message: need!("RegisterWindowMessageW" as PfnRegisterWindowMessageW),
            register_class_ex: need!("RegisterClassExW" as PfnRegisterClassExW),
            create_window_ex: need!("CreateWindowExW" as PfnCreateWindowExW),
            get_message: need!("GetMessageW" as PfnGetMessageW),
            translate_message: need!("TranslateMessage" as PfnTranslateMessage),
            dispatch_message: need!("DispatchMessageW" as PfnDispatchMessageW),
            def_window_proc: need!("DefWindowProcW" as PfnWindowCall),
            post_message: need!("PostMessageW" as PfnPostMessageW),
            send_message: need!("SendMessageW" as PfnWindowCall),
            post_thread_message: need!("PostThreadMessageW" as PfnPostThreadMessageW),
        };
        debug!(library = LIBRARY, "messaging entry points resolved");
        Ok(fns)
    });
    loaded.as_ref().map_err(|symbol| Error::OsApiUnavailable {
        library: LIBRARY,
        symbol: *symbol,
    })
}

/// Handle to the resolved user32 entry points. Cheap to copy and usable from any thread.
#[derive(Copy, Clone)]
pub struct User32 {
    fns: &'static User32Fns,
}

impl User32 {
    /// Resolve (once per process) every entry point this crate calls.
    pub fn load() -> Result<Self> {
        Ok(Self { fns: load_user32()? })
    }
}

impl MessagingApi for User32 {
    fn register_window_message(&self, name: &U16CStr) -> u32 {
        unsafe { (self.fns.register_window_message)(name.as_ptr()) }
    }

    fn module_handle(&self) -> ModuleHandle {
        unsafe { GetModuleHandleW(PCWSTR::null()) }
            .map(|h| ModuleHandle(h.0 as isize))
            .unwrap_or_default()
    }

    unsafe fn register_class_ex(&self, class: &WindowClassEx) -> u16 {
        unsafe { (self.fns.register_class_ex)(class) }
    }

    unsafe fn create_window_ex(&self, args: &CreateWindowArgs) -> WindowHandle {
        unsafe {
            (self.fns.create_window_ex)(
                args.ex_style,
                args.class,
                args.window_name,
                args.style,
                args.origin.x,
                args.origin.y,
                args.width,
                args.height,
                args.parent,
                args.menu,
                args.instance,
                args.param,
            )
        }
    }

    fn get_message(&self, msg: &mut Msg, window: WindowHandle, min: u32, max: u32) -> i32 {
        unsafe { (self.fns.get_message)(msg, window, min, max) }
    }

    fn translate_message(&self, msg: &Msg) -> bool {
        unsafe { (self.fns.translate_message)(msg) != 0 }
    }

    fn dispatch_message(&self, msg: &Msg) -> LResult {
        unsafe { (self.fns.dispatch_message)(msg) }
    }

    fn def_window_proc(
        &self,
        window: WindowHandle,
        message: MessageId,
        wparam: WParam,
        lparam: LParam,
    ) -> LResult {
        unsafe { (self.fns.def_window_proc)(window, message, wparam, lparam) }
    }

    fn post_message(
        &self,
        window: WindowHandle,
        message: MessageId,
        wparam: WParam,
        lparam: LParam,
    ) -> bool {
        unsafe { (self.fns.post_message)(window, message, wparam, lparam) != 0 }
    }

    fn send_message(
        &self,
        window: WindowHandle,
        message: MessageId,
        wparam: WParam,
        lparam: LParam,
    ) -> LResult {
        unsafe { (self.fns.send_message)(window, message, wparam, lparam) }
    }

    fn post_thread_message(
        &self,
        thread_id: u32,
        message: MessageId,
        wparam: WParam,
        lparam: LParam,
    ) -> bool {
        unsafe { (self.fns.post_thread_message)(thread_id, message, wparam, lparam) != 0 }
    }

    fn current_thread_id(&self) -> u32 {
        unsafe { GetCurrentThreadId() }
    }

    fn last_error(&self) -> u32 {
        unsafe { GetLastError().0 }
    }
}
