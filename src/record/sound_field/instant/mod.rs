mod option;

use std::marker::PhantomData;

use crate::{
    EmulatorError, RangeXYZ,
    native::{self, InstantPtr, Owned, validate_ptr},
    record::Record,
};

pub use option::InstantRecordOption;

/// A cursor over the instantaneous sound pressure [Pa] at the observed points.
#[derive(Debug)]
pub struct Instant<'a> {
    handle: Owned<InstantPtr>,
    _record: PhantomData<&'a Record>,
}

super::sound_field_cursor!(Instant, instant, "p[Pa]");

impl Record {
    pub(crate) fn sound_field_instant(
        &self,
        range: &RangeXYZ,
        option: InstantRecordOption,
    ) -> Result<Instant<'_>, EmulatorError> {
        let native = self.handle.native();
        let option: native::InstantRecordOption = option.try_into()?;
        let ptr = validate_ptr(native, unsafe {
            native.emulator_sound_field_instant(self.handle.ptr(), range.into(), option)
        })?;
        Ok(Instant {
            handle: Owned::new(self.handle.native_arc(), ptr),
            _record: PhantomData,
        })
    }
}
