#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! Safe bindings to the autd3 emulator native library.
//!
//! The native library emulates AUTD3 devices, records the drive signals produced by the
//! commands sent to them and calculates the resulting sound field. This crate owns the native
//! handles and converts the buffers filled by the library into [`polars`] tables.
//!
//! Call [`native::init`] once before creating an [`Emulator`].

mod datagram;
mod error;
pub mod native;
mod option;
mod record;
mod utils;

use std::{
    panic::{AssertUnwindSafe, catch_unwind, resume_unwind},
    sync::Arc,
    time::Duration,
};

use autd3::{
    core::geometry::Geometry,
    prelude::{AUTD3, DcSysTime, UnitQuaternion},
};
use derive_more::{Debug, Deref};
use polars::{df, frame::DataFrame};

pub use datagram::Datagram;
pub use error::EmulatorError;
pub use option::RangeXYZ;
pub use record::{
    Instant, InstantRecordOption, Record, RecordOption, Rms, RmsRecordOption, SoundField,
};

use native::{ControllerPtr, EmulatorPtr, NativeMethods, Owned, validate_ptr, validate_status};

/// A controller-like handle passed to the recording callback.
///
/// Commands sent and ticks advanced through it are recorded by the native emulator. The
/// recorder cannot outlive the callback.
#[derive(Debug, Deref)]
pub struct Recorder<'a> {
    #[debug(skip)]
    native: &'a dyn NativeMethods,
    ptr: ControllerPtr,
    #[debug(skip)]
    #[deref(forward)]
    geometry: &'a Geometry,
}

impl Recorder<'_> {
    /// Returns the geometry of the emulated devices.
    pub const fn geometry(&self) -> &Geometry {
        self.geometry
    }

    /// Sends a command built by the datagram API.
    ///
    /// The command is consumed, so the same handle cannot be sent twice:
    ///
    /// ```compile_fail
    /// use autd3_emulator_binding::{EmulatorError, Recorder, native::DatagramPtr};
    ///
    /// fn send_twice(autd: &mut Recorder, datagram: DatagramPtr) -> Result<(), EmulatorError> {
    ///     autd.send(datagram)?;
    ///     autd.send(datagram)
    /// }
    /// ```
    ///
    /// and a handle cannot be forged from an integer without `unsafe`:
    ///
    /// ```compile_fail
    /// let _ = autd3_emulator_binding::native::DatagramPtr(0xdead as _);
    /// ```
    pub fn send(&mut self, datagram: impl Datagram) -> Result<(), EmulatorError> {
        let datagram = datagram.datagram_ptr(self.geometry);
        validate_status(self.native, unsafe {
            self.native.controller_send(self.ptr, datagram)
        })?;
        Ok(())
    }

    /// Advances the emulated time by `tick`.
    ///
    /// The native library requires `tick` to be a non-zero multiple of the ultrasound period.
    pub fn tick(&mut self, tick: Duration) -> Result<(), EmulatorError> {
        let tick = tick.try_into()?;
        validate_status(self.native, unsafe { self.native.emulator_tick_ns(self.ptr, tick) })?;
        Ok(())
    }
}

/// An emulator of AUTD3 devices backed by the native library.
#[derive(Debug, Deref)]
pub struct Emulator {
    #[debug(skip)]
    #[deref]
    geometry: Geometry,
    handle: Owned<EmulatorPtr>,
}

impl Emulator {
    /// Creates an emulator with the process wide native library installed by [`native::init`].
    pub fn new<R, F>(devices: F) -> Result<Self, EmulatorError>
    where
        R: Into<UnitQuaternion> + std::fmt::Debug,
        F: IntoIterator<Item = AUTD3<R>>,
    {
        Self::with_native(native::native()?, devices)
    }

    /// Creates an emulator with the given implementation of the native interface.
    pub fn with_native<R, F>(
        native: Arc<dyn NativeMethods>,
        devices: F,
    ) -> Result<Self, EmulatorError>
    where
        R: Into<UnitQuaternion> + std::fmt::Debug,
        F: IntoIterator<Item = AUTD3<R>>,
    {
        let devices = devices
            .into_iter()
            .map(|d| AUTD3::<UnitQuaternion> {
                pos: d.pos,
                rot: d.rot.into(),
            })
            .collect::<Vec<_>>();
        let len = u16::try_from(devices.len())
            .map_err(|_| EmulatorError::TooManyDevices(devices.len()))?;
        let (pos, rot): (Vec<_>, Vec<_>) = devices
            .iter()
            .map(|d| {
                (
                    native::Point3 {
                        x: d.pos.x,
                        y: d.pos.y,
                        z: d.pos.z,
                    },
                    native::Quaternion {
                        w: d.rot.w,
                        x: d.rot.i,
                        y: d.rot.j,
                        z: d.rot.k,
                    },
                )
            })
            .unzip();
        let ptr = validate_ptr(native.as_ref(), unsafe {
            native.emulator(pos.as_ptr(), rot.as_ptr(), len)
        })?;
        let handle = Owned::new(native, ptr);
        Ok(Self {
            geometry: Geometry::new(devices.into_iter().map(Into::into).collect()),
            handle,
        })
    }

    /// Returns the geometry of the emulated devices.
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Returns the position and direction of every transducer.
    pub fn transducer_table(&self) -> Result<DataFrame, EmulatorError> {
        let native = self.handle.native();
        let n = unsafe { native.emulator_transducer_table_rows(self.handle.ptr()) } as usize;
        let mut dev_idx = vec![0u16; n];
        let mut tr_idx = vec![0u8; n];
        let mut x = vec![0.0f32; n];
        let mut y = vec![0.0f32; n];
        let mut z = vec![0.0f32; n];
        let mut nx = vec![0.0f32; n];
        let mut ny = vec![0.0f32; n];
        let mut nz = vec![0.0f32; n];
        unsafe {
            native.emulator_transducer_table(
                self.handle.ptr(),
                dev_idx.as_mut_ptr(),
                tr_idx.as_mut_ptr(),
                x.as_mut_ptr(),
                y.as_mut_ptr(),
                z.as_mut_ptr(),
                nx.as_mut_ptr(),
                ny.as_mut_ptr(),
                nz.as_mut_ptr(),
            )
        };
        Ok(df!(
            "dev_idx" => &dev_idx,
            "tr_idx" => &tr_idx,
            "x[mm]" => &x,
            "y[mm]" => &y,
            "z[mm]" => &z,
            "nx" => &nx,
            "ny" => &ny,
            "nz" => &nz,
        )?)
    }

    /// Records the commands sent in `f`, starting at [`DcSysTime::ZERO`].
    pub fn record(
        &self,
        f: impl FnOnce(&mut Recorder) -> Result<(), EmulatorError>,
    ) -> Result<Record, EmulatorError> {
        self.record_from(DcSysTime::ZERO, f)
    }

    /// Records the commands sent in `f`, starting at `start_time`.
    ///
    /// If `f` returns an error, the partial record is released and the error is returned. A
    /// panic in `f` is resumed after the native call has returned. If the native library returns
    /// without running `f`, [`EmulatorError::CallbackNotInvoked`] is returned.
    pub fn record_from(
        &self,
        start_time: DcSysTime,
        f: impl FnOnce(&mut Recorder) -> Result<(), EmulatorError>,
    ) -> Result<Record, EmulatorError> {
        let native = self.handle.native();

        let mut f = Some(f);
        let mut result = Ok(());
        let mut panic = None;
        let mut body = |ptr: ControllerPtr| {
            let Some(f) = f.take() else {
                return;
            };
            let mut recorder = Recorder {
                native,
                ptr,
                geometry: &self.geometry,
            };
            match catch_unwind(AssertUnwindSafe(|| f(&mut recorder))) {
                Ok(r) => result = r,
                Err(payload) => panic = Some(payload),
            }
        };

        let res = utils::callback::with_callback(&mut body, |cb| unsafe {
            native.emulator_record_from(
                self.handle.ptr(),
                native::DcSysTime {
                    dc_sys_time: start_time.sys_time(),
                },
                cb,
            )
        });
        let record = validate_ptr(native, res)
            .map(|ptr| Record::new(Owned::new(self.handle.native_arc(), ptr)));

        if let Some(payload) = panic {
            drop(record);
            resume_unwind(payload);
        }
        result?;
        let record = record?;
        if f.is_some() {
            return Err(EmulatorError::CallbackNotInvoked);
        }
        Ok(record)
    }
}
