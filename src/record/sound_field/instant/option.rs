use std::time::Duration;

use autd3::prelude::mm;

use crate::{EmulatorError, native};

/// Options for instantaneous sound field calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstantRecordOption {
    /// Sound speed [mm/s].
    pub sound_speed: f32,
    /// Time step of output. Must divide the ultrasound period.
    pub time_step: Duration,
    /// If true, the native library prints the calculation progress.
    pub print_progress: bool,
    /// A hint of the memory the calculation may use [MB].
    pub memory_limits_hint_mb: usize,
    /// If true, use GPU for computation.
    pub gpu: bool,
}

impl std::default::Default for InstantRecordOption {
    fn default() -> Self {
        Self {
            sound_speed: 340e3 * mm,
            time_step: Duration::from_micros(1),
            print_progress: false,
            memory_limits_hint_mb: 128,
            gpu: false,
        }
    }
}

impl TryFrom<InstantRecordOption> for native::InstantRecordOption {
    type Error = EmulatorError;

    fn try_from(option: InstantRecordOption) -> Result<Self, Self::Error> {
        Ok(Self {
            sound_speed: option.sound_speed,
            time_step: option.time_step.try_into()?,
            print_progress: option.print_progress,
            memory_limits_hint_mb: option.memory_limits_hint_mb as _,
            gpu: option.gpu,
        })
    }
}
