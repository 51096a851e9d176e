use autd3::prelude::mm;

use crate::native;

/// Options for RMS recording.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RmsRecordOption {
    /// Sound speed [mm/s].
    pub sound_speed: f32,
    /// If true, the native library prints the calculation progress.
    pub print_progress: bool,
    /// If true, use GPU for computation.
    pub gpu: bool,
}

impl std::default::Default for RmsRecordOption {
    fn default() -> Self {
        Self {
            sound_speed: 340e3 * mm,
            print_progress: false,
            gpu: false,
        }
    }
}

impl From<RmsRecordOption> for native::RmsRecordOption {
    fn from(option: RmsRecordOption) -> Self {
        Self {
            sound_speed: option.sound_speed,
            print_progress: option.print_progress,
            gpu: option.gpu,
        }
    }
}
