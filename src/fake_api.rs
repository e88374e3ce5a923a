//! In-process stand-in for user32 used by unit tests.
//!
//! Models the pieces of OS behaviour the crate depends on: the session atom table for
//! registered message names (shareable between two "processes"), the per-process class table,
//! window creation with parent tracking and creation messages, a FIFO thread queue, and a
//! default window procedure whose calls are recorded. An empty queue makes `get_message` fail
//! instead of blocking.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::mem::size_of;
use std::rc::Rc;

use widestring::U16CStr;

use crate::api::{CreateWindowArgs, MessagingApi};
use crate::class::WindowClassEx;
use crate::constants::{
    ERROR_CANNOT_FIND_WND_CLASS, ERROR_CLASS_ALREADY_EXISTS, ERROR_INVALID_PARAMETER, WM_CREATE,
    WM_NCCREATE, WM_QUIT,
};
use crate::types::{
    LParam, LResult, MessageId, ModuleHandle, Msg, WParam, WindowHandle, WindowProc,
};

const ERROR_INVALID_HANDLE: u32 = 6;
const ERROR_INVALID_THREAD_ID: u32 = 1444;
const THREAD_ID: u32 = 1000;

/// Per-entry-point call counters.
#[derive(Copy, Clone, Debug, Default)]
pub struct Calls {
    pub register_window_message: usize,
    pub register_class_ex: usize,
    pub create_window_ex: usize,
    pub get_message: usize,
    pub translate_message: usize,
    pub dispatch_message: usize,
    pub def_window_proc: usize,
}

type DefaultCall = (WindowHandle, MessageId, WParam, LParam);

pub struct FakeApi {
    session_messages: Rc<RefCell<HashMap<String, u32>>>,
    classes: RefCell<HashMap<u16, (String, WindowProc)>>,
    windows: RefCell<HashMap<WindowHandle, (u16, WindowHandle)>>,
    queue: RefCell<VecDeque<Msg>>,
    next_atom: Cell<u16>,
    next_window: Cell<isize>,
    tick: Cell<u32>,
    default_result: Cell<LResult>,
    default_calls: RefCell<Vec<DefaultCall>>,
    calls: Cell<Calls>,
    last_error: Cell<u32>,
    fail_message_registration: Cell<Option<u32>>,
    fail_class_registration: Cell<Option<u32>>,
    fail_posts: Cell<Option<u32>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::with_session(Rc::new(RefCell::new(HashMap::new())))
    }

    fn with_session(session_messages: Rc<RefCell<HashMap<String, u32>>>) -> Self {
        Self {
            session_messages,
            classes: RefCell::new(HashMap::new()),
            windows: RefCell::new(HashMap::new()),
            queue: RefCell::new(VecDeque::new()),
            next_atom: Cell::new(0xC000),
            next_window: Cell::new(0x1_0000),
            tick: Cell::new(0),
            default_result: Cell::new(LResult(0)),
            default_calls: RefCell::new(Vec::new()),
            calls: Cell::new(Calls::default()),
            last_error: Cell::new(0),
            fail_message_registration: Cell::new(None),
            fail_class_registration: Cell::new(None),
            fail_posts: Cell::new(None),
        }
    }

    /// Another process in the same session: shares registered message names only.
    pub fn second_process(&self) -> Self {
        Self::with_session(self.session_messages.clone())
    }

    pub fn calls(&self) -> Calls {
        self.calls.get()
    }

    pub fn default_calls(&self) -> Vec<DefaultCall> {
        self.default_calls.borrow().clone()
    }

    pub fn set_default_result(&self, result: LResult) {
        self.default_result.set(result);
    }

    pub fn fail_message_registration(&self, code: u32) {
        self.fail_message_registration.set(Some(code));
    }

    pub fn fail_class_registration(&self, code: u32) {
        self.fail_class_registration.set(Some(code));
    }

    pub fn fail_posts(&self, code: u32) {
        self.fail_posts.set(Some(code));
    }

    pub fn parent_of(&self, window: WindowHandle) -> Option<WindowHandle> {
        self.windows.borrow().get(&window).map(|(_, parent)| *parent)
    }

    /// Windows a top-level enumeration would visit (desktop children only).
    pub fn top_level_windows(&self) -> Vec<WindowHandle> {
        self.windows
            .borrow()
            .iter()
            .filter(|(_, (_, parent))| parent.is_null())
            .map(|(h, _)| *h)
            .collect()
    }

    pub fn window_count(&self) -> usize {
        self.windows.borrow().len()
    }

    pub fn queued(&self) -> usize {
        self.queue.borrow().len()
    }

    fn count(&self, f: impl FnOnce(&mut Calls)) {
        let mut c = self.calls.get();
        f(&mut c);
        self.calls.set(c);
    }

    fn fail(&self, code: u32) {
        self.last_error.set(code);
    }

    fn procedure_for(&self, window: WindowHandle) -> Option<WindowProc> {
        let atom = self.windows.borrow().get(&window).map(|(atom, _)| *atom)?;
        self.classes.borrow().get(&atom).map(|(_, wndproc)| *wndproc)
    }

    fn enqueue(&self, hwnd: WindowHandle, message: MessageId, wparam: WParam, lparam: LParam) {
        let time = self.tick.get() + 1;
        self.tick.set(time);
        self.queue.borrow_mut().push_back(Msg {
            hwnd,
            message,
            wparam,
            lparam,
            time,
            pt: Default::default(),
        });
    }

    fn invoke(
        &self,
        window: WindowHandle,
        message: MessageId,
        wparam: WParam,
        lparam: LParam,
    ) -> LResult {
        // Borrows are released before calling out: the procedure may re-enter this fake.
        match self.procedure_for(window) {
            Some(wndproc) => unsafe { wndproc(window, message, wparam, lparam) },
            None => {
                self.fail(ERROR_INVALID_HANDLE);
                LResult(0)
            }
        }
    }
}

impl MessagingApi for FakeApi {
    fn register_window_message(&self, name: &U16CStr) -> u32 {
        self.count(|c| c.register_window_message += 1);
        if let Some(code) = self.fail_message_registration.get() {
            self.fail(code);
            return 0;
        }
        // Atom names compare case-insensitively.
        let key = name.to_string_lossy().to_lowercase();
        let mut table = self.session_messages.borrow_mut();
        let next = 0xC000 + table.len() as u32;
        let id = *table.entry(key).or_insert(next);
        id
    }

    fn module_handle(&self) -> ModuleHandle {
        ModuleHandle(0x40_0000)
    }

    unsafe fn register_class_ex(&self, class: &WindowClassEx) -> u16 {
        self.count(|c| c.register_class_ex += 1);
        if let Some(code) = self.fail_class_registration.get() {
            self.fail(code);
            return 0;
        }
        if class.cb_size as usize != size_of::<WindowClassEx>() || class.class_name.is_null() {
            self.fail(ERROR_INVALID_PARAMETER);
            return 0;
        }
        let Some(wndproc) = class.wnd_proc else {
            self.fail(ERROR_INVALID_PARAMETER);
            return 0;
        };
        let name = unsafe { U16CStr::from_ptr_str(class.class_name) }
            .to_string_lossy()
            .to_lowercase();
        let mut classes = self.classes.borrow_mut();
        if classes.values().any(|(n, _)| *n == name) {
            self.fail(ERROR_CLASS_ALREADY_EXISTS);
            return 0;
        }
        let atom = self.next_atom.get();
        self.next_atom.set(atom + 1);
        classes.insert(atom, (name, wndproc));
        atom
    }

    unsafe fn create_window_ex(&self, args: &CreateWindowArgs) -> WindowHandle {
        self.count(|c| c.create_window_ex += 1);
        let raw = args.class as usize;
        let atom = if raw <= 0xFFFF {
            let atom = raw as u16;
            self.classes.borrow().contains_key(&atom).then_some(atom)
        } else {
            let name = unsafe { U16CStr::from_ptr_str(args.class) }
                .to_string_lossy()
                .to_lowercase();
            self.classes
                .borrow()
                .iter()
                .find(|(_, (n, _))| *n == name)
                .map(|(a, _)| *a)
        };
        let Some(atom) = atom else {
            self.fail(ERROR_CANNOT_FIND_WND_CLASS);
            return WindowHandle::NULL;
        };
        let handle = WindowHandle(self.next_window.get());
        self.next_window.set(handle.0 + 0x10);
        self.windows.borrow_mut().insert(handle, (atom, args.parent));
        // Creation messages go through the class procedure before the handle is returned;
        // a zero from WM_NCCREATE or -1 from WM_CREATE aborts creation.
        let nccreate = self.invoke(handle, WM_NCCREATE, WParam(0), LParam(0));
        if nccreate == LResult(0)
            || self.invoke(handle, WM_CREATE, WParam(0), LParam(0)) == LResult(-1)
        {
            self.windows.borrow_mut().remove(&handle);
            self.fail(0);
            return WindowHandle::NULL;
        }
        handle
    }

    fn get_message(&self, msg: &mut Msg, _window: WindowHandle, _min: u32, _max: u32) -> i32 {
        self.count(|c| c.get_message += 1);
        let Some(next) = self.queue.borrow_mut().pop_front() else {
            self.fail(ERROR_INVALID_HANDLE);
            return -1;
        };
        *msg = next;
        if next.message == WM_QUIT { 0 } else { 1 }
    }

    fn translate_message(&self, _msg: &Msg) -> bool {
        self.count(|c| c.translate_message += 1);
        false
    }

    fn dispatch_message(&self, msg: &Msg) -> LResult {
        self.count(|c| c.dispatch_message += 1);
        self.invoke(msg.hwnd, msg.message, msg.wparam, msg.lparam)
    }

    fn def_window_proc(
        &self,
        window: WindowHandle,
        message: MessageId,
        wparam: WParam,
        lparam: LParam,
    ) -> LResult {
        self.count(|c| c.def_window_proc += 1);
        self.default_calls
            .borrow_mut()
            .push((window, message, wparam, lparam));
        if message == WM_NCCREATE {
            return LResult(1);
        }
        self.default_result.get()
    }

    fn post_message(
        &self,
        window: WindowHandle,
        message: MessageId,
        wparam: WParam,
        lparam: LParam,
    ) -> bool {
        if let Some(code) = self.fail_posts.get() {
            self.fail(code);
            return false;
        }
        self.enqueue(window, message, wparam, lparam);
        true
    }

    fn send_message(
        &self,
        window: WindowHandle,
        message: MessageId,
        wparam: WParam,
        lparam: LParam,
    ) -> LResult {
        self.invoke(window, message, wparam, lparam)
    }

    fn post_thread_message(
        &self,
        thread_id: u32,
        message: MessageId,
        wparam: WParam,
        lparam: LParam,
    ) -> bool {
        if thread_id != THREAD_ID {
            self.fail(ERROR_INVALID_THREAD_ID);
            return false;
        }
        if let Some(code) = self.fail_posts.get() {
            self.fail(code);
            return false;
        }
        self.enqueue(WindowHandle::NULL, message, wparam, lparam);
        true
    }

    fn current_thread_id(&self) -> u32 {
        THREAD_ID
    }

    fn last_error(&self) -> u32 {
        self.last_error.get()
    }
}
