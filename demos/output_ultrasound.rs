use std::time::Duration;

use anyhow::Result;

use autd3::prelude::*;
use autd3_emulator_binding::*;

use polars::prelude::{AnyValue, DataFrame};
use textplots::{Chart, Plot, Shape};

fn plot(df: &DataFrame, prefix: &str) -> Result<()> {
    let t = df
        .get_column_names()
        .into_iter()
        .map(|n| {
            n.as_str()
                .replace(prefix, "")
                .replace("[25us/256]", "")
                .parse::<f32>()
                .map(|i| i * 0.025 / 256.)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let v = df.get_row(0)?.0.into_iter().map(|v| match v {
        AnyValue::Float32(v) => v,
        _ => 0.,
    });
    Chart::new(300, 40, 0.0, 1.0)
        .lineplot(&Shape::Lines(&t.into_iter().zip(v).collect::<Vec<_>>()))
        .display();
    Ok(())
}

fn main() -> Result<()> {
    native::init_from_env()?;

    let emulator = Emulator::new([AUTD3 {
        pos: Point3::origin(),
        rot: UnitQuaternion::identity(),
    }])?;

    // Commands come from the datagram API through `Datagram` and are passed to `autd.send`.
    let record = emulator.record(|autd| autd.tick(Duration::from_millis(1)))?;

    let df = record.output_voltage()?;
    println!("output voltage");
    dbg!(&df);
    plot(&df, "voltage[V]@")?;

    let df = record.output_ultrasound()?;
    println!("output ultrasound");
    dbg!(&df);
    plot(&df, "p[a.u.]@")?;

    Ok(())
}
