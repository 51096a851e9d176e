use std::{ffi::CStr, sync::Arc};

use derive_more::Debug;

use super::{
    AUTDStatus, ConstPtr, EmulatorPtr, InstantPtr, NativeMethods, RecordPtr, ResultPtr,
    ResultStatus, RmsPtr,
};
use crate::EmulatorError;

/// A native pointer that owns a resource which must be released through the native library.
pub(crate) trait NativeHandle: Copy + std::fmt::Debug {
    const NULL: Self;
    const KIND: &'static str;

    fn is_null(&self) -> bool;

    /// # Safety
    ///
    /// `self` must be a live handle created by `native` and must not be used afterwards.
    unsafe fn free(self, native: &dyn NativeMethods);
}

macro_rules! impl_native_handle {
    ($($ty:ty => $free:ident),* $(,)?) => {
        $(
            impl NativeHandle for $ty {
                const NULL: Self = <$ty>::NULL;
                const KIND: &'static str = stringify!($ty);

                fn is_null(&self) -> bool {
                    <$ty>::is_null(self)
                }

                unsafe fn free(self, native: &dyn NativeMethods) {
                    unsafe { native.$free(self) }
                }
            }
        )*
    };
}

impl_native_handle!(
    EmulatorPtr => emulator_free,
    RecordPtr => emulator_record_free,
    InstantPtr => emulator_sound_field_instant_free,
    RmsPtr => emulator_sound_field_rms_free,
);

/// Exclusive owner of a native handle. The handle is released exactly once, either by
/// [`Owned::release`] or on drop.
#[derive(Debug)]
pub(crate) struct Owned<P: NativeHandle> {
    ptr: P,
    #[debug(skip)]
    native: Arc<dyn NativeMethods>,
}

impl<P: NativeHandle> Owned<P> {
    /// Takes ownership of `ptr`, which must have been created by `native`.
    pub(crate) fn new(native: Arc<dyn NativeMethods>, ptr: P) -> Self {
        Self { ptr, native }
    }

    pub(crate) fn ptr(&self) -> P {
        self.ptr
    }

    pub(crate) fn native(&self) -> &dyn NativeMethods {
        self.native.as_ref()
    }

    pub(crate) fn native_arc(&self) -> Arc<dyn NativeMethods> {
        self.native.clone()
    }

    pub(crate) fn release(&mut self) {
        if self.ptr.is_null() {
            return;
        }
        log::debug!("releasing {} {:?}", P::KIND, self.ptr);
        let ptr = std::mem::replace(&mut self.ptr, P::NULL);
        // SAFETY: `ptr` was created by `self.native` and has just been nulled out here.
        unsafe { ptr.free(self.native.as_ref()) };
    }
}

impl<P: NativeHandle> Drop for Owned<P> {
    fn drop(&mut self) {
        self.release();
    }
}

fn native_error(native: &dyn NativeMethods, err: ConstPtr, err_len: u32) -> Option<String> {
    if err.0.is_null() || err_len == 0 {
        return None;
    }
    let mut buf = vec![0u8; err_len as usize];
    // SAFETY: `buf` holds `err_len` bytes as requested by the native side.
    unsafe { native.get_err(err, buf.as_mut_ptr() as _) };
    Some(
        CStr::from_bytes_until_nul(&buf)
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|_| String::from_utf8_lossy(&buf).into_owned()),
    )
}

/// Returns the pointer, or the native error if the pointer is null.
pub(crate) fn validate_ptr<P: NativeHandle>(
    native: &dyn NativeMethods,
    res: ResultPtr<P>,
) -> Result<P, EmulatorError> {
    if res.result.is_null() {
        return Err(native_error(native, res.err, res.err_len)
            .map_or(EmulatorError::NullHandle, EmulatorError::Native));
    }
    Ok(res.result)
}

/// Returns `Ok(true)`/`Ok(false)` for the two success states, or the native error.
pub(crate) fn validate_status(
    native: &dyn NativeMethods,
    res: ResultStatus,
) -> Result<bool, EmulatorError> {
    match res.result {
        AUTDStatus::True => Ok(true),
        AUTDStatus::False => Ok(false),
        AUTDStatus::Err => Err(EmulatorError::Native(
            native_error(native, res.err, res.err_len).unwrap_or_else(|| "unknown error".into()),
        )),
    }
}
