use autd3_emulator_binding::{RmsRecordOption, SoundField, native};

use crate::{
    mock::MockNative,
    names, period, record,
    sound_field::range,
};

#[test]
fn dispatch_rms() -> anyhow::Result<()> {
    let mock = MockNative::new();
    let record = record(&mock, 1, 1)?;

    let sound_field = record.sound_field(
        range(),
        RmsRecordOption {
            print_progress: true,
            ..Default::default()
        },
    )?;

    assert!(matches!(sound_field, SoundField::Rms(_)));
    {
        let state = mock.state();
        assert_eq!(
            vec![native::RmsRecordOption {
                sound_speed: 340e3,
                print_progress: true,
                gpu: false,
            }],
            state.rms_options
        );
        assert!(state.instant_options.is_empty());
    }
    assert!(sound_field.into_rms().is_some());
    Ok(())
}

#[test]
fn next() -> anyhow::Result<()> {
    let record = record(&MockNative::new(), 1, 3)?;
    let mut sound_field = record.sound_field(range(), RmsRecordOption::default())?;

    assert_eq!((6, 3), sound_field.observe_points()?.shape());

    let df = sound_field.next(period(2))?;
    assert_eq!((6, 2), df.shape());
    assert_eq!(vec!["rms[Pa]@0[ns]", "rms[Pa]@25000[ns]"], names(&df));
    assert_eq!(
        vec![0., 100., 200., 300., 400., 500.],
        df["rms[Pa]@25000[ns]"]
            .f32()?
            .into_no_null_iter()
            .collect::<Vec<_>>()
    );

    let df = sound_field.next(period(1))?;
    assert_eq!(vec!["rms[Pa]@50000[ns]"], names(&df));
    Ok(())
}

#[test]
fn skip() -> anyhow::Result<()> {
    let record = record(&MockNative::new(), 1, 2)?;
    let mut sound_field = record.sound_field(range(), RmsRecordOption::default())?;

    let df = sound_field.skip(period(1))?.next(period(1))?;
    assert_eq!(vec!["rms[Pa]@25000[ns]"], names(&df));

    assert_eq!(
        "Not recorded",
        sound_field.next(period(1)).unwrap_err().to_string()
    );
    Ok(())
}

#[test]
fn release() -> anyhow::Result<()> {
    let mock = MockNative::new();
    let record = record(&mock, 1, 1)?;
    let sound_field = record.sound_field(range(), RmsRecordOption::default())?;

    drop(sound_field);
    assert_eq!(vec!["emulator", "rms"], mock.state().freed);
    drop(record);
    assert_eq!(vec!["emulator", "rms", "record"], mock.state().freed);
    Ok(())
}
