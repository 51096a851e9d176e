use polars::frame::DataFrame;

use super::Record;
use crate::{EmulatorError, utils::table::ColumnBuffer};

impl Record {
    /// # Safety
    ///
    /// `v` must have [`output_cols`](Self::output_cols) elements, each valid for
    /// [`drive_rows`](Self::drive_rows) writes.
    #[cfg_attr(feature = "inplace", visibility::make(pub))]
    #[doc(hidden)]
    unsafe fn output_voltage_inplace(&self, v: &[*mut f32]) {
        assert!(v.len() >= self.output_cols());
        unsafe {
            self.handle
                .native()
                .emulator_record_output_voltage(self.handle.ptr(), v.as_ptr())
        }
    }

    /// Returns the output voltage of each transducer, one column per 1/256 of the ultrasound
    /// period.
    pub fn output_voltage(&self) -> Result<DataFrame, EmulatorError> {
        let mut buf = ColumnBuffer::<f32>::new(self.output_cols(), self.drive_rows());
        let v = buf.column_ptrs();
        unsafe { self.output_voltage_inplace(&v) };
        Ok(buf.into_index_frame("voltage[V]")?)
    }
}
