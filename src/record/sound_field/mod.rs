pub(crate) mod instant;
pub(crate) mod rms;

use std::time::Duration;

use derive_more::From;
use polars::frame::DataFrame;

use self::{
    instant::{Instant, InstantRecordOption},
    rms::{Rms, RmsRecordOption},
};
use super::Record;
use crate::{EmulatorError, RangeXYZ};

/// Options selecting which kind of sound field is calculated.
#[derive(Debug, Clone, Copy, From)]
pub enum RecordOption {
    /// Instantaneous sound pressure.
    Instant(InstantRecordOption),
    /// RMS of sound pressure over each ultrasound period.
    Rms(RmsRecordOption),
}

/// A sound field cursor created by [`Record::sound_field`].
#[derive(Debug, From)]
pub enum SoundField<'a> {
    #[allow(missing_docs)]
    Instant(Instant<'a>),
    #[allow(missing_docs)]
    Rms(Rms<'a>),
}

impl<'a> SoundField<'a> {
    /// Returns the observed points.
    pub fn observe_points(&self) -> Result<DataFrame, EmulatorError> {
        match self {
            Self::Instant(instant) => instant.observe_points(),
            Self::Rms(rms) => rms.observe_points(),
        }
    }

    /// Progresses by the specified time and returns the sound field during that time.
    pub fn next(&mut self, duration: Duration) -> Result<DataFrame, EmulatorError> {
        match self {
            Self::Instant(instant) => instant.next(duration),
            Self::Rms(rms) => rms.next(duration),
        }
    }

    /// Progresses by the specified time without calculating the sound field.
    pub fn skip(&mut self, duration: Duration) -> Result<&mut Self, EmulatorError> {
        match self {
            Self::Instant(instant) => {
                instant.skip(duration)?;
            }
            Self::Rms(rms) => {
                rms.skip(duration)?;
            }
        }
        Ok(self)
    }

    /// Returns the inner [`Instant`] if this cursor calculates instantaneous sound pressure.
    pub fn into_instant(self) -> Option<Instant<'a>> {
        match self {
            Self::Instant(instant) => Some(instant),
            Self::Rms(_) => None,
        }
    }

    /// Returns the inner [`Rms`] if this cursor calculates RMS of sound pressure.
    pub fn into_rms(self) -> Option<Rms<'a>> {
        match self {
            Self::Instant(_) => None,
            Self::Rms(rms) => Some(rms),
        }
    }
}

impl Record {
    /// Starts calculating the sound field at the points in `range`.
    ///
    /// The returned cursor borrows this record and yields [`Instant`] or [`Rms`] samples
    /// according to the variant of `option`.
    pub fn sound_field(
        &self,
        range: RangeXYZ,
        option: impl Into<RecordOption>,
    ) -> Result<SoundField<'_>, EmulatorError> {
        match option.into() {
            RecordOption::Instant(option) => {
                self.sound_field_instant(&range, option).map(Into::into)
            }
            RecordOption::Rms(option) => self.sound_field_rms(&range, option).map(Into::into),
        }
    }
}

macro_rules! sound_field_cursor {
    ($ty:ident, $kind:ident, $label:literal) => {
        paste::paste! {
            impl $ty<'_> {
                /// Returns the observed points.
                pub fn observe_points(&self) -> Result<polars::frame::DataFrame, crate::EmulatorError> {
                    let n = self.next_points_len();
                    let mut x = vec![0.0; n];
                    let mut y = vec![0.0; n];
                    let mut z = vec![0.0; n];
                    self.x_inplace(&mut x);
                    self.y_inplace(&mut y);
                    self.z_inplace(&mut z);
                    Ok(polars::df!(
                        "x[mm]" => &x,
                        "y[mm]" => &y,
                        "z[mm]" => &z,
                    )?)
                }

                /// Progresses by the specified time and returns the samples produced during that
                /// time, one column per time stamp.
                pub fn next(
                    &mut self,
                    duration: std::time::Duration,
                ) -> Result<polars::frame::DataFrame, crate::EmulatorError> {
                    let mut buf = crate::utils::table::ColumnBuffer::<f32>::new(
                        self.next_time_len(duration)?,
                        self.next_points_len(),
                    );
                    let v = buf.column_ptrs();
                    unsafe { self.next_inplace(duration, buf.time_mut(), &v) }?;
                    Ok(buf.into_time_frame($label)?)
                }

                /// Progresses by the specified time without calculating the sound field.
                pub fn skip(
                    &mut self,
                    duration: std::time::Duration,
                ) -> Result<&mut Self, crate::EmulatorError> {
                    let duration: crate::native::Duration = duration.try_into()?;
                    let native = self.handle.native();
                    crate::native::validate_status(native, unsafe {
                        native.[<emulator_sound_field_ $kind _skip>](self.handle.ptr(), duration)
                    })?;
                    Ok(self)
                }

                #[cfg_attr(feature = "inplace", visibility::make(pub))]
                #[doc(hidden)]
                fn x_inplace(&self, x: &mut [f32]) {
                    assert_eq!(self.next_points_len(), x.len());
                    unsafe {
                        self.handle
                            .native()
                            .[<emulator_sound_field_ $kind _get_x>](self.handle.ptr(), x.as_mut_ptr())
                    }
                }

                #[cfg_attr(feature = "inplace", visibility::make(pub))]
                #[doc(hidden)]
                fn y_inplace(&self, y: &mut [f32]) {
                    assert_eq!(self.next_points_len(), y.len());
                    unsafe {
                        self.handle
                            .native()
                            .[<emulator_sound_field_ $kind _get_y>](self.handle.ptr(), y.as_mut_ptr())
                    }
                }

                #[cfg_attr(feature = "inplace", visibility::make(pub))]
                #[doc(hidden)]
                fn z_inplace(&self, z: &mut [f32]) {
                    assert_eq!(self.next_points_len(), z.len());
                    unsafe {
                        self.handle
                            .native()
                            .[<emulator_sound_field_ $kind _get_z>](self.handle.ptr(), z.as_mut_ptr())
                    }
                }

                #[cfg_attr(feature = "inplace", visibility::make(pub))]
                #[doc(hidden)]
                fn next_time_len(
                    &self,
                    duration: std::time::Duration,
                ) -> Result<usize, crate::EmulatorError> {
                    let duration: crate::native::Duration = duration.try_into()?;
                    Ok(unsafe {
                        self.handle
                            .native()
                            .[<emulator_sound_field_ $kind _time_len>](self.handle.ptr(), duration)
                    } as _)
                }

                #[cfg_attr(feature = "inplace", visibility::make(pub))]
                #[doc(hidden)]
                fn next_points_len(&self) -> usize {
                    unsafe {
                        self.handle
                            .native()
                            .[<emulator_sound_field_ $kind _points_len>](self.handle.ptr()) as _
                    }
                }

                /// # Safety
                ///
                /// `time` and `v` must have [`next_time_len`](Self::next_time_len) elements and
                /// every pointer in `v` must be valid for
                /// [`next_points_len`](Self::next_points_len) writes.
                #[cfg_attr(feature = "inplace", visibility::make(pub))]
                #[doc(hidden)]
                unsafe fn next_inplace(
                    &mut self,
                    duration: std::time::Duration,
                    time: &mut [u64],
                    v: &[*mut f32],
                ) -> Result<(), crate::EmulatorError> {
                    let n = self.next_time_len(duration)?;
                    assert!(time.len() >= n && v.len() >= n);
                    let duration: crate::native::Duration = duration.try_into()?;
                    let native = self.handle.native();
                    crate::native::validate_status(native, unsafe {
                        native.[<emulator_sound_field_ $kind _next>](
                            self.handle.ptr(),
                            duration,
                            time.as_mut_ptr(),
                            v.as_ptr(),
                        )
                    })?;
                    Ok(())
                }
            }
        }
    };
}

pub(crate) use sound_field_cursor;
