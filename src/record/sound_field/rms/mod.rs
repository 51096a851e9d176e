mod option;

use std::marker::PhantomData;

use crate::{
    EmulatorError, RangeXYZ,
    native::{Owned, RmsPtr, validate_ptr},
    record::Record,
};

pub use option::RmsRecordOption;

/// An interface to calculate RMS of the sound field.
///
/// Each output column holds the RMS over one ultrasound period. Propagation delay and
/// transducer response are not taken into account.
#[derive(Debug)]
pub struct Rms<'a> {
    handle: Owned<RmsPtr>,
    _record: PhantomData<&'a Record>,
}

super::sound_field_cursor!(Rms, rms, "rms[Pa]");

impl Record {
    pub(crate) fn sound_field_rms(
        &self,
        range: &RangeXYZ,
        option: RmsRecordOption,
    ) -> Result<Rms<'_>, EmulatorError> {
        let native = self.handle.native();
        let ptr = validate_ptr(native, unsafe {
            native.emulator_sound_field_rms(self.handle.ptr(), range.into(), option.into())
        })?;
        Ok(Rms {
            handle: Owned::new(self.handle.native_arc(), ptr),
            _record: PhantomData,
        })
    }
}
