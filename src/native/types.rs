#![allow(missing_docs)]

use std::ffi::c_void;

/// An untyped pointer owned by the native library.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstPtr(pub *const c_void);

impl ConstPtr {
    /// A null pointer.
    pub const NULL: Self = Self(std::ptr::null());
}

macro_rules! native_ptr {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[repr(C)]
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name(pub *const c_void);

            impl $name {
                /// A null handle.
                pub const NULL: Self = Self(std::ptr::null());

                /// Returns `true` if the handle does not point to a native object.
                pub fn is_null(&self) -> bool {
                    self.0.is_null()
                }
            }
        )*
    };
}

native_ptr!(
    /// A handle to the native emulator context.
    EmulatorPtr,
    /// A handle to the controller driven inside a recording callback.
    ControllerPtr,
    /// A handle to a finished record.
    RecordPtr,
    /// A handle to an instantaneous sound field cursor.
    InstantPtr,
    /// A handle to a RMS sound field cursor.
    RmsPtr,
);

/// A handle to a command built by the datagram API.
///
/// The native library consumes the command when it is sent, so this handle is neither `Copy`
/// nor constructible from safe code.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub struct DatagramPtr(*const c_void);

impl DatagramPtr {
    /// A null handle. Sending it is rejected by the native library.
    pub const NULL: Self = Self(std::ptr::null());

    /// Wraps a command handle produced by the datagram API.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a live command handle that has not been sent yet.
    pub const unsafe fn from_raw(ptr: *const c_void) -> Self {
        Self(ptr)
    }

    /// Returns the raw handle.
    pub const fn as_raw(&self) -> *const c_void {
        self.0
    }

    /// Returns `true` if the handle does not point to a native object.
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

/// A position in millimeters.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// An orientation as a unit quaternion.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Duration {
    pub nanos: u64,
}

impl TryFrom<std::time::Duration> for Duration {
    type Error = crate::EmulatorError;

    fn try_from(value: std::time::Duration) -> Result<Self, Self::Error> {
        Ok(Self {
            nanos: u64::try_from(value.as_nanos())
                .map_err(|_| crate::EmulatorError::DurationOverflow(value))?,
        })
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DcSysTime {
    pub dc_sys_time: u64,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangeXYZ {
    pub x_start: f32,
    pub x_end: f32,
    pub y_start: f32,
    pub y_end: f32,
    pub z_start: f32,
    pub z_end: f32,
    pub resolution: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstantRecordOption {
    pub sound_speed: f32,
    pub time_step: Duration,
    pub print_progress: bool,
    pub memory_limits_hint_mb: u64,
    pub gpu: bool,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RmsRecordOption {
    pub sound_speed: f32,
    pub print_progress: bool,
    pub gpu: bool,
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AUTDStatus {
    True = 0,
    False = 1,
    Err = 2,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ResultStatus {
    pub result: AUTDStatus,
    pub err_len: u32,
    pub err: ConstPtr,
}

/// A pointer returned together with the error that prevented its creation.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ResultPtr<P> {
    pub result: P,
    pub err_len: u32,
    pub err: ConstPtr,
}

pub type ResultEmulator = ResultPtr<EmulatorPtr>;
pub type ResultRecord = ResultPtr<RecordPtr>;
pub type ResultInstant = ResultPtr<InstantPtr>;
pub type ResultRms = ResultPtr<RmsPtr>;

/// The callback type accepted by `AUTDEmulatorRecordFrom`.
pub type RecordCallback = unsafe extern "C" fn(ControllerPtr);
