use std::{
    cell::Cell,
    f32::consts::{FRAC_1_SQRT_2, PI},
    panic::{AssertUnwindSafe, catch_unwind},
};

use autd3::{core::geometry::Geometry, prelude::*};
use autd3_emulator_binding::{Datagram, Emulator, EmulatorError, native::DatagramPtr};

use crate::{
    devices, init_logger,
    mock::{Failures, MockNative, NUM_TRANS_IN_UNIT},
    period,
};

#[test]
fn rotation() -> anyhow::Result<()> {
    init_logger();
    let mock = MockNative::new();

    let emulator = Emulator::with_native(
        mock.clone(),
        [AUTD3 {
            pos: Point3::origin(),
            rot: EulerAngle::ZYZ(PI / 2. * rad, 0. * rad, 0. * rad),
        }],
    )?;

    assert_eq!(NUM_TRANS_IN_UNIT, emulator.num_transducers());
    let rot = mock.state().devices[0].1;
    approx::assert_abs_diff_eq!(FRAC_1_SQRT_2, rot.w, epsilon = 1e-6);
    approx::assert_abs_diff_eq!(0., rot.x, epsilon = 1e-6);
    approx::assert_abs_diff_eq!(0., rot.y, epsilon = 1e-6);
    approx::assert_abs_diff_eq!(FRAC_1_SQRT_2, rot.z, epsilon = 1e-6);
    Ok(())
}

#[test]
fn create_and_release() -> anyhow::Result<()> {
    init_logger();
    let mock = MockNative::new();
    {
        let emulator = Emulator::with_native(mock.clone(), devices(2))?;
        assert_eq!(2 * NUM_TRANS_IN_UNIT, emulator.num_transducers());
        let state = mock.state();
        assert_eq!(2, state.devices.len());
        assert_eq!(200., state.devices[1].0.x);
        assert_eq!(1., state.devices[1].1.w);
        assert!(state.freed.is_empty());
    }
    let state = mock.state();
    assert_eq!(vec!["emulator"], state.freed);
    assert!(state.live.is_empty());
    Ok(())
}

#[test]
fn null_emulator() {
    init_logger();
    let mock = MockNative::failing(Failures {
        emulator: true,
        ..Default::default()
    });

    let err = Emulator::with_native(mock.clone(), devices(1)).unwrap_err();

    assert_eq!("failed to create emulator", err.to_string());
    assert!(mock.state().freed.is_empty());
}

#[test]
fn not_initialized() {
    assert!(matches!(
        Emulator::new(devices(1)),
        Err(EmulatorError::NotInitialized)
    ));
}

#[test]
fn transducer_table() -> anyhow::Result<()> {
    init_logger();
    let emulator = Emulator::with_native(MockNative::new(), devices(2))?;

    let df = emulator.transducer_table()?;

    assert_eq!((2 * NUM_TRANS_IN_UNIT, 8), df.shape());
    assert_eq!(
        vec!["dev_idx", "tr_idx", "x[mm]", "y[mm]", "z[mm]", "nx", "ny", "nz"],
        df.get_column_names()
            .into_iter()
            .map(|n| n.as_str())
            .collect::<Vec<_>>()
    );
    let dev_idx = df["dev_idx"].u16()?.into_no_null_iter().collect::<Vec<_>>();
    assert_eq!(0, dev_idx[NUM_TRANS_IN_UNIT - 1]);
    assert_eq!(1, dev_idx[NUM_TRANS_IN_UNIT]);
    let x = df["x[mm]"].f32()?.into_no_null_iter().collect::<Vec<_>>();
    assert_eq!(200., x[NUM_TRANS_IN_UNIT]);
    Ok(())
}

#[test]
fn record_forwards_commands() -> anyhow::Result<()> {
    init_logger();
    let mock = MockNative::new();
    let emulator = Emulator::with_native(mock.clone(), devices(2))?;

    let _record = emulator.record(|autd| {
        assert_eq!(2 * NUM_TRANS_IN_UNIT, autd.num_transducers());
        autd.send(unsafe { DatagramPtr::from_raw(0x10 as _) })?;
        autd.tick(period(1))?;
        autd.send(unsafe { DatagramPtr::from_raw(0x20 as _) })?;
        autd.tick(period(10))?;
        Ok(())
    })?;

    let state = mock.state();
    assert_eq!(Some(0), state.start_time);
    assert_eq!(vec![0x10, 0x20], state.sent);
    assert_eq!(vec![25_000, 250_000], state.ticks);
    Ok(())
}

#[test]
fn record_from() -> anyhow::Result<()> {
    init_logger();
    let mock = MockNative::new();
    let emulator = Emulator::with_native(mock.clone(), devices(1))?;

    emulator.record_from(DcSysTime::ZERO + std::time::Duration::from_nanos(100), |autd| {
        autd.tick(period(1))
    })?;

    assert_eq!(Some(100), mock.state().start_time);
    Ok(())
}

#[rstest::rstest]
#[test]
#[case(std::time::Duration::ZERO)]
#[case(period(1) / 2)]
fn invalid_tick(#[case] tick: std::time::Duration) -> anyhow::Result<()> {
    init_logger();
    let mock = MockNative::new();
    let emulator = Emulator::with_native(mock.clone(), devices(1))?;

    let err = emulator.record(|autd| autd.tick(tick)).unwrap_err();

    assert_eq!("Tick must be multiple of 25µs", err.to_string());
    assert_eq!(vec!["record"], mock.state().freed);
    Ok(())
}

#[test]
fn invalid_datagram() -> anyhow::Result<()> {
    init_logger();
    let emulator = Emulator::with_native(MockNative::new(), devices(1))?;

    let err = emulator
        .record(|autd| autd.send(DatagramPtr::NULL))
        .unwrap_err();

    assert_eq!("Invalid datagram", err.to_string());
    Ok(())
}

#[rstest::rstest]
#[test]
#[case("failed to record", Failures { record: true, ..Default::default() })]
#[case(
    "Native library returned an invalid handle",
    Failures { record_without_message: true, ..Default::default() }
)]
fn null_record(#[case] expect: &str, #[case] failures: Failures) -> anyhow::Result<()> {
    init_logger();
    let mock = MockNative::failing(failures);
    let emulator = Emulator::with_native(mock.clone(), devices(1))?;

    let err = emulator.record(|autd| autd.tick(period(1))).unwrap_err();

    assert_eq!(expect, err.to_string());
    assert!(mock.state().freed.is_empty());
    Ok(())
}

#[test]
fn panic_in_callback() -> anyhow::Result<()> {
    init_logger();
    let mock = MockNative::new();
    let emulator = Emulator::with_native(mock.clone(), devices(1))?;

    let res = catch_unwind(AssertUnwindSafe(|| {
        emulator.record(|autd| {
            autd.tick(period(1))?;
            panic!("boom");
        })
    }));

    assert!(res.is_err());
    assert_eq!(vec!["record"], mock.state().freed);
    Ok(())
}

#[test]
fn nested_record() -> anyhow::Result<()> {
    init_logger();
    let outer_mock = MockNative::new();
    let inner_mock = MockNative::new();
    let outer = Emulator::with_native(outer_mock.clone(), devices(1))?;
    let inner = Emulator::with_native(inner_mock.clone(), devices(1))?;

    let _record = outer.record(|autd| {
        autd.tick(period(1))?;
        let _inner = inner.record(|autd| autd.tick(period(2)))?;
        autd.tick(period(3))
    })?;

    assert_eq!(vec![25_000, 75_000], outer_mock.state().ticks);
    assert_eq!(vec![50_000], inner_mock.state().ticks);
    Ok(())
}

struct Command<'a> {
    id: usize,
    num_transducers: &'a Cell<usize>,
}

impl Datagram for Command<'_> {
    fn datagram_ptr(self, geometry: &Geometry) -> DatagramPtr {
        self.num_transducers.set(geometry.num_transducers());
        unsafe { DatagramPtr::from_raw(self.id as _) }
    }
}

#[test]
fn send_datagram() -> anyhow::Result<()> {
    init_logger();
    let mock = MockNative::new();
    let emulator = Emulator::with_native(mock.clone(), devices(2))?;
    let num_transducers = Cell::new(0);

    emulator.record(|autd| {
        autd.send(Command {
            id: 0x30,
            num_transducers: &num_transducers,
        })?;
        autd.tick(period(1))
    })?;

    assert_eq!(2 * NUM_TRANS_IN_UNIT, num_transducers.get());
    assert_eq!(vec![0x30], mock.state().sent);
    Ok(())
}

#[test]
fn tick_overflow() -> anyhow::Result<()> {
    init_logger();
    let mock = MockNative::new();
    let emulator = Emulator::with_native(mock.clone(), devices(1))?;
    let tick =
        std::time::Duration::from_nanos(u64::MAX) + std::time::Duration::from_nanos(25_001);

    let err = emulator.record(|autd| autd.tick(tick)).unwrap_err();

    assert!(matches!(err, EmulatorError::DurationOverflow(d) if d == tick));
    let state = mock.state();
    assert!(state.ticks.is_empty());
    assert_eq!(vec!["record"], state.freed);
    Ok(())
}

#[test]
fn callback_not_invoked() -> anyhow::Result<()> {
    init_logger();
    let mock = MockNative::failing(Failures {
        skip_callback: true,
        ..Default::default()
    });
    let emulator = Emulator::with_native(mock.clone(), devices(1))?;

    let err = emulator.record(|autd| autd.tick(period(1))).unwrap_err();

    assert!(matches!(err, EmulatorError::CallbackNotInvoked));
    let state = mock.state();
    assert!(state.ticks.is_empty());
    assert_eq!(vec!["record"], state.freed);
    Ok(())
}
