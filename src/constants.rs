//! Win32 constants used when registering classes, creating windows and addressing messages.
//!
//! Only the subset relevant to a message-only endpoint plus the common style values is carried.

use crate::types::{MessageId, WindowHandle};

/// Parent sentinel requesting a message-only window.
pub const HWND_MESSAGE: WindowHandle = WindowHandle(-3);
/// Post/send target meaning every top-level window.
pub const HWND_BROADCAST: WindowHandle = WindowHandle(0xFFFF);

/// Default position / size marker for `CreateWindowExW`.
pub const CW_USEDEFAULT: i32 = 0x8000_0000_u32 as i32;

pub const COLOR_WINDOW: i32 = 5;
pub const COLOR_WINDOWFRAME: i32 = 6;

// Class styles
pub const CS_VREDRAW: u32 = 0x0001;
pub const CS_HREDRAW: u32 = 0x0002;

// Window styles (subset)
pub const WS_BORDER: u32 = 0x0080_0000;
pub const WS_CAPTION: u32 = 0x00C0_0000;
pub const WS_DISABLED: u32 = 0x0800_0000;
pub const WS_OVERLAPPED: u32 = 0x0000_0000;
pub const WS_POPUP: u32 = 0x8000_0000;
pub const WS_SIZEBOX: u32 = 0x0004_0000;
pub const WS_SYSMENU: u32 = 0x0008_0000;
pub const WS_THICKFRAME: u32 = 0x0004_0000;
pub const WS_MAXIMIZEBOX: u32 = 0x0001_0000;
pub const WS_MINIMIZEBOX: u32 = 0x0002_0000;
pub const WS_OVERLAPPEDWINDOW: u32 =
    WS_OVERLAPPED | WS_CAPTION | WS_SYSMENU | WS_THICKFRAME | WS_MINIMIZEBOX | WS_MAXIMIZEBOX;
pub const WS_POPUPWINDOW: u32 = WS_POPUP | WS_BORDER | WS_SYSMENU;

// Extended window styles (subset)
pub const WS_EX_LEFT: u32 = 0;

// Messages
pub const WM_NULL: MessageId = MessageId(0x0000);
pub const WM_CREATE: MessageId = MessageId(0x0001);
pub const WM_QUIT: MessageId = MessageId(0x0012);
pub const WM_COPYDATA: MessageId = MessageId(0x004A);
pub const WM_NCCREATE: MessageId = MessageId(0x0081);

// GetLastError codes surfaced in errors and mirrored by the test fake.
pub const ERROR_INVALID_PARAMETER: u32 = 87;
pub const ERROR_CANNOT_FIND_WND_CLASS: u32 = 1407;
pub const ERROR_CLASS_ALREADY_EXISTS: u32 = 1410;
