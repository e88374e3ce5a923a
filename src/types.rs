//! Handle and parameter types exchanged with the Win32 messaging API.
//!
//! Every type here mirrors the native ABI exactly: handles are pointer-sized, `WPARAM` is an
//! unsigned pointer-sized integer, `LPARAM`/`LRESULT` are signed pointer-sized integers and
//! message identifiers are 32 bits wide. The structs are `#[repr(C)]` because the OS reads them
//! by raw offset. All handles default to the null value.

use std::fmt;

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
        pub struct $name(pub isize);

        impl $name {
            /// The null handle.
            pub const NULL: Self = Self(0);

            pub fn is_null(self) -> bool {
                self.0 == 0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "(0x{:X})"), self.0)
            }
        }
    };
}

handle!(
    /// Window handle (`HWND`).
    WindowHandle
);
handle!(
    /// Module / instance handle (`HMODULE`, `HINSTANCE`).
    ModuleHandle
);
handle!(
    /// Menu handle (`HMENU`).
    MenuHandle
);
handle!(
    /// Icon handle (`HICON`).
    IconHandle
);
handle!(
    /// Cursor handle (`HCURSOR`).
    CursorHandle
);
handle!(
    /// Brush handle (`HBRUSH`).
    BrushHandle
);

impl BrushHandle {
    /// System colour brushes are addressed as `COLOR_* + 1` in a class descriptor.
    pub fn from_system_color(index: i32) -> Self {
        Self(index as isize + 1)
    }
}

/// Word-sized message parameter (`WPARAM`).
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct WParam(pub usize);

/// Pointer-sized message parameter (`LPARAM`).
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LParam(pub isize);

/// Window procedure result (`LRESULT`).
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LResult(pub isize);

/// Message identifier (`UINT` message number).
///
/// Identifiers obtained from `RegisterWindowMessageW` live in `0xC000..=0xFFFF` and are shared by
/// every process in the session that registers the same name.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub u32);

impl MessageId {
    /// First identifier handed out by name registration.
    pub const REGISTERED_BASE: u32 = 0xC000;

    /// True for identifiers in the range reserved for registered message names.
    pub fn is_registered(self) -> bool {
        (Self::REGISTERED_BASE..=0xFFFF).contains(&self.0)
    }
}

/// Class atom returned by `RegisterClassExW`.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassAtom(pub u16);

impl ClassAtom {
    /// `MAKEINTATOM`: the atom travels in the low word of a string pointer.
    pub fn as_class_ptr(self) -> *const u16 {
        self.0 as usize as *const u16
    }
}

/// Signed 2D coordinate (`POINT`).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Queued message record (`MSG`), filled by `GetMessageW`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Msg {
    pub hwnd: WindowHandle,
    pub message: MessageId,
    pub wparam: WParam,
    pub lparam: LParam,
    pub time: u32,
    pub pt: Point,
}

/// Window procedure signature (`WNDPROC`).
pub type WindowProc =
    unsafe extern "system" fn(WindowHandle, MessageId, WParam, LParam) -> LResult;
