use polars::frame::DataFrame;

use super::Record;
use crate::{EmulatorError, utils::table::ColumnBuffer};

impl Record {
    /// # Safety
    ///
    /// Same as [`output_voltage_inplace`](Self::output_voltage_inplace).
    #[cfg_attr(feature = "inplace", visibility::make(pub))]
    #[doc(hidden)]
    unsafe fn output_ultrasound_inplace(&self, v: &[*mut f32]) {
        assert!(v.len() >= self.output_cols());
        unsafe {
            self.handle
                .native()
                .emulator_record_output_ultrasound(self.handle.ptr(), v.as_ptr())
        }
    }

    /// Returns the normalized ultrasound emitted by each transducer.
    pub fn output_ultrasound(&self) -> Result<DataFrame, EmulatorError> {
        let mut buf = ColumnBuffer::<f32>::new(self.output_cols(), self.drive_rows());
        let v = buf.column_ptrs();
        unsafe { self.output_ultrasound_inplace(&v) };
        Ok(buf.into_index_frame("p[a.u.]")?)
    }
}
