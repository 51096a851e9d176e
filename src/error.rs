use polars::error::PolarsError;
use thiserror::Error;

/// An interface for error handling in autd3-emulator-binding.
#[derive(Error, Debug)]
pub enum EmulatorError {
    /// Error reported by the native library.
    #[error("{0}")]
    Native(String),
    /// Error when the native library returns a null handle without an error message.
    #[error("Native library returned an invalid handle")]
    NullHandle,
    /// Error when the native library is used before [`init`](crate::native::init).
    #[error("Native library is not initialized")]
    NotInitialized,
    /// Error when [`init_from_env`](crate::native::init_from_env) cannot find the library directory.
    #[error("Environment variable {} is not set", crate::native::LIB_DIR_ENV)]
    LibDirNotSet,
    /// Error when the number of devices does not fit into the native interface.
    #[error("Number of devices ({0}) exceeds {max}", max = u16::MAX)]
    TooManyDevices(usize),
    /// Error when a duration does not fit into 64-bit nanoseconds.
    #[error("Duration {0:?} exceeds the range of the native library")]
    DurationOverflow(std::time::Duration),
    /// Error when the native library returns from recording without running the callback.
    #[error("Recording callback was not invoked")]
    CallbackNotInvoked,
    #[allow(missing_docs)]
    #[error("{0}")]
    Load(#[from] libloading::Error),
    #[allow(missing_docs)]
    #[error("{0}")]
    Polars(#[from] PolarsError),
}
