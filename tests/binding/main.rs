mod emulator;
mod rms;

use std::sync::Arc;

use autd3::prelude::*;
use autd3_emulator_binding::{Emulator, EmulatorError, Record};
use polars::frame::DataFrame;

use mock::{MockNative, ULTRASOUND_PERIOD_NS};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn devices(n: usize) -> Vec<AUTD3<UnitQuaternion>> {
    (0..n)
        .map(|i| AUTD3 {
            pos: Point3::new(200. * i as f32, 0., 0.),
            rot: UnitQuaternion::identity(),
        })
        .collect()
}

pub fn names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|n| n.to_string())
        .collect()
}

pub fn period(n: u32) -> std::time::Duration {
    n * std::time::Duration::from_nanos(ULTRASOUND_PERIOD_NS)
}

/// Records `periods` ultrasound periods on a fresh emulator with `num_devices` devices.
pub fn record(
    mock: &Arc<MockNative>,
    num_devices: usize,
    periods: u32,
) -> Result<Record, EmulatorError> {
    init_logger();
    let emulator = Emulator::with_native(mock.clone(), devices(num_devices))?;
    emulator.record(|autd| {
        if periods > 0 {
            autd.tick(period(periods))?;
        }
        Ok(())
    })
}
