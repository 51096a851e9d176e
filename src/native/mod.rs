//! Raw interface to the `autd3capi_emulator` shared library.
//!
//! Everything in this module mirrors the C ABI of the native library. The safe wrappers in the
//! crate root are built on top of [`NativeMethods`], so an alternative implementation (for
//! example an in-process fake) can be plugged in with [`init_with`].

mod handle;
mod library;
mod types;

use std::ffi::c_char;

pub(crate) use handle::{Owned, validate_ptr, validate_status};
pub use library::{LIB_DIR_ENV, LIB_NAME, NativeLibrary, init, init_from_env, init_with};
pub(crate) use library::native;
pub use types::*;

macro_rules! native_methods {
    ($($(#[$meta:meta])* fn $name:ident($($arg:ident: $ty:ty),* $(,)?) $(-> $ret:ty)?;)*) => {
        paste::paste! {
            /// Functions exported by the native emulator library.
            ///
            /// Each method corresponds to the symbol `AUTD<MethodNameInCamelCase>`.
            ///
            /// # Safety
            ///
            /// Implementations receive raw pointers to buffers allocated by the caller. The caller
            /// guarantees that every buffer is at least as large as the dimensions the same
            /// implementation reported just before, and that handles passed in were created by
            /// the same implementation and not released yet.
            #[allow(missing_docs)]
            pub trait NativeMethods: Send + Sync {
                $(
                    $(#[$meta])*
                    #[allow(clippy::too_many_arguments)]
                    unsafe fn $name(&self, $($arg: $ty),*) $(-> $ret)?;
                )*
            }

            pub(crate) struct Symbols {
                $($name: unsafe extern "C" fn($($ty),*) $(-> $ret)?,)*
            }

            impl Symbols {
                pub(crate) unsafe fn load(lib: &libloading::Library) -> Result<Self, libloading::Error> {
                    unsafe {
                        Ok(Self {
                            $(
                                $name: *lib.get::<unsafe extern "C" fn($($ty),*) $(-> $ret)?>(
                                    concat!(stringify!([<AUTD $name:camel>]), "\0").as_bytes(),
                                )?,
                            )*
                        })
                    }
                }
            }

            impl NativeMethods for NativeLibrary {
                $(
                    unsafe fn $name(&self, $($arg: $ty),*) $(-> $ret)? {
                        unsafe { (self.symbols.$name)($($arg),*) }
                    }
                )*
            }

            /// Partial implementations of [`NativeMethods`] for unit tests. Methods that are not
            /// overridden panic.
            #[cfg(test)]
            #[allow(unused_variables)]
            pub(crate) trait StubNative: Send + Sync {
                $(
                    #[allow(clippy::too_many_arguments)]
                    unsafe fn $name(&self, $($arg: $ty),*) $(-> $ret)? {
                        unimplemented!(stringify!($name))
                    }
                )*
            }

            #[cfg(test)]
            impl<T: StubNative> NativeMethods for T {
                $(
                    unsafe fn $name(&self, $($arg: $ty),*) $(-> $ret)? {
                        unsafe { <T as StubNative>::$name(self, $($arg),*) }
                    }
                )*
            }
        }
    };
}

native_methods! {
    /// Copies the error message referenced by `err` into `dst` and releases it.
    fn get_err(err: ConstPtr, dst: *mut c_char);

    fn emulator(pos: *const Point3, rot: *const Quaternion, len: u16) -> ResultEmulator;
    fn emulator_free(emulator: EmulatorPtr);
    fn emulator_transducer_table_rows(emulator: EmulatorPtr) -> u64;
    fn emulator_transducer_table(
        emulator: EmulatorPtr,
        dev_idx: *mut u16,
        tr_idx: *mut u8,
        x: *mut f32,
        y: *mut f32,
        z: *mut f32,
        nx: *mut f32,
        ny: *mut f32,
        nz: *mut f32,
    );
    /// Runs `f` with the controller of a fresh recorder and returns the recorded trace.
    fn emulator_record_from(emulator: EmulatorPtr, start_time: DcSysTime, f: RecordCallback) -> ResultRecord;
    fn emulator_tick_ns(controller: ControllerPtr, tick: Duration) -> ResultStatus;
    fn controller_send(controller: ControllerPtr, datagram: DatagramPtr) -> ResultStatus;

    fn emulator_record_free(record: RecordPtr);
    fn emulator_record_drive_cols(record: RecordPtr) -> u64;
    fn emulator_record_drive_rows(record: RecordPtr) -> u64;
    fn emulator_record_output_cols(record: RecordPtr) -> u64;
    fn emulator_record_phase(record: RecordPtr, time: *mut u64, v: *const *mut u8);
    fn emulator_record_pulse_width(record: RecordPtr, time: *mut u64, v: *const *mut u8);
    fn emulator_record_output_voltage(record: RecordPtr, v: *const *mut f32);
    fn emulator_record_output_ultrasound(record: RecordPtr, v: *const *mut f32);

    fn emulator_sound_field_instant(record: RecordPtr, range: RangeXYZ, option: InstantRecordOption) -> ResultInstant;
    fn emulator_sound_field_instant_free(instant: InstantPtr);
    fn emulator_sound_field_instant_skip(instant: InstantPtr, duration: Duration) -> ResultStatus;
    fn emulator_sound_field_instant_points_len(instant: InstantPtr) -> u64;
    fn emulator_sound_field_instant_get_x(instant: InstantPtr, x: *mut f32);
    fn emulator_sound_field_instant_get_y(instant: InstantPtr, y: *mut f32);
    fn emulator_sound_field_instant_get_z(instant: InstantPtr, z: *mut f32);
    fn emulator_sound_field_instant_time_len(instant: InstantPtr, duration: Duration) -> u64;
    fn emulator_sound_field_instant_next(
        instant: InstantPtr,
        duration: Duration,
        time: *mut u64,
        v: *const *mut f32,
    ) -> ResultStatus;

    fn emulator_sound_field_rms(record: RecordPtr, range: RangeXYZ, option: RmsRecordOption) -> ResultRms;
    fn emulator_sound_field_rms_free(rms: RmsPtr);
    fn emulator_sound_field_rms_skip(rms: RmsPtr, duration: Duration) -> ResultStatus;
    fn emulator_sound_field_rms_points_len(rms: RmsPtr) -> u64;
    fn emulator_sound_field_rms_get_x(rms: RmsPtr, x: *mut f32);
    fn emulator_sound_field_rms_get_y(rms: RmsPtr, y: *mut f32);
    fn emulator_sound_field_rms_get_z(rms: RmsPtr, z: *mut f32);
    fn emulator_sound_field_rms_time_len(rms: RmsPtr, duration: Duration) -> u64;
    fn emulator_sound_field_rms_next(
        rms: RmsPtr,
        duration: Duration,
        time: *mut u64,
        v: *const *mut f32,
    ) -> ResultStatus;
}
