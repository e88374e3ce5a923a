//! Window class descriptor and lazy, idempotent class registration.
//!
//! The OS rejects a second `RegisterClassExW` for a name already registered by the process, so
//! the atom from the first successful call is cached on the descriptor and handed back on every
//! later call. The cache is per descriptor instance, not per process.

use std::mem::size_of;

use tracing::{debug, error};
use widestring::U16CString;

use crate::api::{MessagingApi, wide_name};
use crate::constants::{COLOR_WINDOW, CS_HREDRAW, CS_VREDRAW};
use crate::error::{Error, Result};
use crate::types::{BrushHandle, ClassAtom, CursorHandle, IconHandle, ModuleHandle, WindowProc};

/// Native `WNDCLASSEXW` layout (12 fields, order significant).
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct WindowClassEx {
    /// Must equal `size_of::<WindowClassEx>()`; the OS refuses the call otherwise.
    pub cb_size: u32,
    pub style: u32,
    pub wnd_proc: Option<WindowProc>,
    pub cls_extra: i32,
    pub wnd_extra: i32,
    pub instance: ModuleHandle,
    pub icon: IconHandle,
    pub cursor: CursorHandle,
    pub background: BrushHandle,
    pub menu_name: *const u16,
    pub class_name: *const u16,
    pub icon_small: IconHandle,
}

impl Default for WindowClassEx {
    fn default() -> Self {
        Self {
            cb_size: size_of::<Self>() as u32,
            style: 0,
            wnd_proc: None,
            cls_extra: 0,
            wnd_extra: 0,
            instance: ModuleHandle::NULL,
            icon: IconHandle::NULL,
            cursor: CursorHandle::NULL,
            background: BrushHandle::NULL,
            menu_name: std::ptr::null(),
            class_name: std::ptr::null(),
            icon_small: IconHandle::NULL,
        }
    }
}

/// Owned class description plus its registration state.
pub struct WindowClass {
    name: String,
    wide_name: U16CString,
    menu_name: Option<U16CString>,
    style: u32,
    wnd_proc: WindowProc,
    instance: ModuleHandle,
    icon: IconHandle,
    cursor: CursorHandle,
    background: BrushHandle,
    icon_small: IconHandle,
    atom: Option<ClassAtom>,
}

impl WindowClass {
    /// Describe a class named `name` dispatching to `wnd_proc`.
    ///
    /// Defaults: `CS_HREDRAW | CS_VREDRAW`, `COLOR_WINDOW` background, no icon, cursor or menu,
    /// and the executable's module handle (resolved at registration).
    pub fn new(name: &str, wnd_proc: WindowProc) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            wide_name: wide_name("class", name)?,
            menu_name: None,
            style: CS_HREDRAW | CS_VREDRAW,
            wnd_proc,
            instance: ModuleHandle::NULL,
            icon: IconHandle::NULL,
            cursor: CursorHandle::NULL,
            background: BrushHandle::from_system_color(COLOR_WINDOW),
            icon_small: IconHandle::NULL,
            atom: None,
        })
    }

    pub fn with_style(mut self, style: u32) -> Self {
        self.style = style;
        self
    }

    pub fn with_instance(mut self, instance: ModuleHandle) -> Self {
        self.instance = instance;
        self
    }

    pub fn with_icons(mut self, icon: IconHandle, icon_small: IconHandle) -> Self {
        self.icon = icon;
        self.icon_small = icon_small;
        self
    }

    pub fn with_cursor(mut self, cursor: CursorHandle) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn with_background(mut self, background: BrushHandle) -> Self {
        self.background = background;
        self
    }

    pub fn with_menu_name(mut self, menu: &str) -> Result<Self> {
        self.menu_name = Some(wide_name("menu", menu)?);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cached atom, if registration already succeeded.
    pub fn atom(&self) -> Option<ClassAtom> {
        self.atom
    }

    /// Native descriptor. String pointers borrow from `self`.
    pub fn descriptor(&self) -> WindowClassEx {
        WindowClassEx {
            style: self.style,
            wnd_proc: Some(self.wnd_proc),
            instance: self.instance,
            icon: self.icon,
            cursor: self.cursor,
            background: self.background,
            menu_name: self
                .menu_name
                .as_ref()
                .map_or(std::ptr::null(), |m| m.as_ptr()),
            class_name: self.wide_name.as_ptr(),
            icon_small: self.icon_small,
            ..Default::default()
        }
    }

    /// Register the class on first use and return the cached atom afterwards.
    ///
    /// A failed registration leaves the cache empty and is not retried here.
    pub fn register(&mut self, api: &dyn MessagingApi) -> Result<ClassAtom> {
        if let Some(atom) = self.atom {
            return Ok(atom);
        }
        if self.instance.is_null() {
            self.instance = api.module_handle();
        }
        let raw = self.descriptor();
        // SAFETY: the name and menu strings in `raw` are owned by `self` and outlive the call.
        let atom = unsafe { api.register_class_ex(&raw) };
        if atom == 0 {
            let code = api.last_error();
            error!(class = %self.name, code, "RegisterClassExW failed");
            return Err(Error::ClassRegistration {
                class: self.name.clone(),
                code,
            });
        }
        debug!(class = %self.name, atom = format!("0x{atom:04X}"), "window class registered");
        let atom = ClassAtom(atom);
        self.atom = Some(atom);
        Ok(atom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ERROR_CLASS_ALREADY_EXISTS;
    use crate::fake_api::FakeApi;
    use crate::router::window_proc;

    #[test]
    fn descriptor_is_self_sized() {
        let class = WindowClass::new("IPC_WINDOW", window_proc).unwrap();
        let raw = class.descriptor();
        assert_eq!(raw.cb_size as usize, size_of::<WindowClassEx>());
        assert_eq!(raw.cls_extra, 0);
        assert_eq!(raw.wnd_extra, 0);
        assert!(raw.menu_name.is_null());
        assert!(raw.wnd_proc.is_some());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn descriptor_layout_matches_x64_abi() {
        assert_eq!(size_of::<WindowClassEx>(), 80);
        let raw = WindowClassEx::default();
        let base = &raw as *const WindowClassEx as usize;
        assert_eq!(&raw.wnd_proc as *const _ as usize - base, 8);
        assert_eq!(&raw.instance as *const _ as usize - base, 24);
        assert_eq!(&raw.class_name as *const _ as usize - base, 64);
        assert_eq!(&raw.icon_small as *const _ as usize - base, 72);
    }

    #[test]
    fn registering_twice_returns_cached_atom() {
        let api = FakeApi::new();
        let mut class = WindowClass::new("IPC_WINDOW", window_proc).unwrap();
        let first = class.register(&api).unwrap();
        let second = class.register(&api).unwrap();
        assert_eq!(first, second);
        assert_eq!(class.atom(), Some(first));
        assert_eq!(api.calls().register_class_ex, 1);
    }

    #[test]
    fn instance_defaults_to_executable_module() {
        let api = FakeApi::new();
        let mut class = WindowClass::new("IPC_WINDOW", window_proc).unwrap();
        class.register(&api).unwrap();
        assert_eq!(class.descriptor().instance, api.module_handle());
    }

    #[test]
    fn duplicate_name_from_other_descriptor_fails() {
        let api = FakeApi::new();
        let mut owner = WindowClass::new("IPC_WINDOW", window_proc).unwrap();
        owner.register(&api).unwrap();
        let mut intruder = WindowClass::new("IPC_WINDOW", window_proc).unwrap();
        let err = intruder.register(&api).unwrap_err();
        assert!(matches!(
            err,
            Error::ClassRegistration { code: ERROR_CLASS_ALREADY_EXISTS, .. }
        ));
        assert!(intruder.atom().is_none());
    }

    #[test]
    fn failure_is_not_cached() {
        let api = FakeApi::new();
        api.fail_class_registration(87);
        let mut class = WindowClass::new("IPC_WINDOW", window_proc).unwrap();
        assert!(class.register(&api).is_err());
        assert!(class.atom().is_none());
        assert_eq!(api.calls().register_class_ex, 1);
    }

    #[test]
    fn menu_name_is_passed_through() {
        let class = WindowClass::new("IPC_WINDOW", window_proc)
            .unwrap()
            .with_menu_name("MAIN_MENU")
            .unwrap();
        assert!(!class.descriptor().menu_name.is_null());
    }

    #[test]
    fn builder_overrides_defaults() {
        let class = WindowClass::new("IPC_WINDOW", window_proc)
            .unwrap()
            .with_style(0)
            .with_background(BrushHandle::NULL)
            .with_cursor(CursorHandle(7))
            .with_icons(IconHandle(1), IconHandle(2));
        let raw = class.descriptor();
        assert_eq!(raw.style, 0);
        assert!(raw.background.is_null());
        assert_eq!(raw.cursor, CursorHandle(7));
        assert_eq!(raw.icon_small, IconHandle(2));
    }
}
