mod output_ultrasound;
mod output_voltage;
mod sound_field;

use polars::frame::DataFrame;

pub use sound_field::{
    RecordOption, SoundField,
    instant::{Instant, InstantRecordOption},
    rms::{Rms, RmsRecordOption},
};

use crate::{
    EmulatorError,
    native::{Owned, RecordPtr},
    utils::table::ColumnBuffer,
};

/// A record of the drive signals, owned by the native library.
#[derive(Debug)]
pub struct Record {
    pub(crate) handle: Owned<RecordPtr>,
}

impl Record {
    pub(crate) fn new(handle: Owned<RecordPtr>) -> Self {
        Self { handle }
    }

    #[cfg_attr(feature = "inplace", visibility::make(pub))]
    #[doc(hidden)]
    fn drive_rows(&self) -> usize {
        unsafe {
            self.handle
                .native()
                .emulator_record_drive_rows(self.handle.ptr()) as _
        }
    }

    #[cfg_attr(feature = "inplace", visibility::make(pub))]
    #[doc(hidden)]
    fn drive_cols(&self) -> usize {
        unsafe {
            self.handle
                .native()
                .emulator_record_drive_cols(self.handle.ptr()) as _
        }
    }

    #[cfg_attr(feature = "inplace", visibility::make(pub))]
    #[doc(hidden)]
    fn output_cols(&self) -> usize {
        unsafe {
            self.handle
                .native()
                .emulator_record_output_cols(self.handle.ptr()) as _
        }
    }

    /// # Safety
    ///
    /// `time` and `v` must have [`drive_cols`](Self::drive_cols) elements and every pointer in
    /// `v` must be valid for [`drive_rows`](Self::drive_rows) writes.
    #[cfg_attr(feature = "inplace", visibility::make(pub))]
    #[doc(hidden)]
    unsafe fn phase_inplace(&self, time: &mut [u64], v: &[*mut u8]) {
        let cols = self.drive_cols();
        assert!(time.len() >= cols && v.len() >= cols);
        unsafe {
            self.handle.native().emulator_record_phase(
                self.handle.ptr(),
                time.as_mut_ptr(),
                v.as_ptr(),
            )
        }
    }

    /// # Safety
    ///
    /// Same as [`phase_inplace`](Self::phase_inplace).
    #[cfg_attr(feature = "inplace", visibility::make(pub))]
    #[doc(hidden)]
    unsafe fn pulse_width_inplace(&self, time: &mut [u64], v: &[*mut u8]) {
        let cols = self.drive_cols();
        assert!(time.len() >= cols && v.len() >= cols);
        unsafe {
            self.handle.native().emulator_record_pulse_width(
                self.handle.ptr(),
                time.as_mut_ptr(),
                v.as_ptr(),
            )
        }
    }

    /// Returns the time series data of the phase parameter for each transducer.
    pub fn phase(&self) -> Result<DataFrame, EmulatorError> {
        let mut buf = ColumnBuffer::<u8>::new(self.drive_cols(), self.drive_rows());
        let v = buf.column_ptrs();
        unsafe { self.phase_inplace(buf.time_mut(), &v) };
        Ok(buf.into_time_frame("phase")?)
    }

    /// Returns the time series data of the pulse width for each transducer.
    pub fn pulse_width(&self) -> Result<DataFrame, EmulatorError> {
        let mut buf = ColumnBuffer::<u8>::new(self.drive_cols(), self.drive_rows());
        let v = buf.column_ptrs();
        unsafe { self.pulse_width_inplace(buf.time_mut(), &v) };
        Ok(buf.into_time_frame("pulse_width")?)
    }
}
