use std::time::Duration;

use anyhow::Result;

use autd3::prelude::*;
use autd3_emulator_binding::*;
use polars::{io::SerWriter, prelude::CsvWriter};

fn main() -> Result<()> {
    native::init_from_env()?;

    let emulator = Emulator::new([AUTD3 {
        pos: Point3::origin(),
        rot: UnitQuaternion::identity(),
    }])?;

    let focus = emulator.center() + Vector3::new(0., 0., 150. * mm);

    // Commands come from the datagram API through `Datagram` and are passed to `autd.send`.
    let record = emulator.record(|autd| autd.tick(Duration::from_millis(1)))?;

    println!("Calculating sound field around focus...");
    let mut sound_field = record.sound_field(
        RangeXYZ {
            x: focus.x - 20.0..=focus.x + 20.0,
            y: focus.y - 20.0..=focus.y + 20.0,
            z: focus.z..=focus.z,
            resolution: 1.,
        },
        InstantRecordOption {
            time_step: Duration::from_micros(1),
            print_progress: true,
            ..Default::default()
        },
    )?;

    let points = sound_field.observe_points()?;
    let df = sound_field.next(Duration::from_millis(1))?;
    let mut df = points.hstack(df.get_columns())?;

    CsvWriter::new(std::fs::File::create("sound_field_around_focus.csv")?)
        .include_header(true)
        .finish(&mut df)?;
    println!("Focus sound field data is saved as sound_field_around_focus.csv");

    Ok(())
}
