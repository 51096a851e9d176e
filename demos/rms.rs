use std::time::Duration;

use autd3::prelude::*;
use autd3_emulator_binding::*;
use polars::{io::SerWriter, prelude::CsvWriter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("INFO: rms does not take into account propagation delay nor transducer response.");

    native::init_from_env()?;

    let emulator = Emulator::new([AUTD3 {
        pos: Point3::origin(),
        rot: UnitQuaternion::identity(),
    }])?;

    let focus = emulator.center() + Vector3::new(0., 0., 150. * mm);

    // Commands come from the datagram API through `Datagram` and are passed to `autd.send`.
    let record = emulator.record(|autd| autd.tick(Duration::from_millis(5)))?;

    println!("Calculating rms around focus...");
    let mut sound_field = record.sound_field(
        RangeXYZ {
            x: focus.x - 30.0..=focus.x + 30.0,
            y: focus.y - 30.0..=focus.y + 30.0,
            z: focus.z..=focus.z,
            resolution: 1.,
        },
        RmsRecordOption::default(),
    )?;

    let points = sound_field.observe_points()?;
    let df = sound_field.skip(Duration::from_millis(4))?.next(Duration::from_millis(1))?;
    let mut df = points.hstack(df.get_columns())?;
    CsvWriter::new(std::fs::File::create("rms_focus.csv")?)
        .include_header(true)
        .finish(&mut df)?;
    println!("Focus sound field data is saved as rms_focus.csv");

    Ok(())
}
