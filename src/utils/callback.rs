use std::{cell::Cell, ffi::c_void};

use crate::native::{ControllerPtr, RecordCallback};

type Body<'a> = &'a mut dyn FnMut(ControllerPtr);

thread_local! {
    static CURRENT: Cell<*mut c_void> = const { Cell::new(std::ptr::null_mut()) };
}

unsafe extern "C" fn trampoline(ptr: ControllerPtr) {
    let ctx = CURRENT.with(Cell::get);
    if ctx.is_null() {
        log::warn!("recording callback invoked outside of a recording");
        return;
    }
    // SAFETY: `ctx` was set by `with_callback` on this thread and points to a `Body` that
    // outlives the native call.
    let body = unsafe { &mut *(ctx as *mut Body<'_>) };
    body(ptr);
}

struct Restore(*mut c_void);

impl Drop for Restore {
    fn drop(&mut self) {
        CURRENT.with(|c| c.set(self.0));
    }
}

/// Calls `call` with a C callback that forwards to `body`.
///
/// The native side has to invoke the callback synchronously on the calling thread, and `body`
/// must not unwind.
pub(crate) fn with_callback<R>(
    mut body: Body<'_>,
    call: impl FnOnce(RecordCallback) -> R,
) -> R {
    let ctx = &mut body as *mut Body<'_> as *mut c_void;
    let _restore = Restore(CURRENT.with(|c| c.replace(ctx)));
    call(trampoline)
}
