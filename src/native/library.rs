use std::{
    path::{Path, PathBuf},
    sync::{Arc, OnceLock},
};

use derive_more::Debug;
use getset::Getters;
use libloading::Library;

use super::{NativeMethods, Symbols};
use crate::EmulatorError;

/// Base name of the native emulator library.
pub const LIB_NAME: &str = "autd3capi_emulator";

/// Environment variable read by [`init_from_env`].
pub const LIB_DIR_ENV: &str = "AUTD3_EMULATOR_LIB_DIR";

static NATIVE: OnceLock<Arc<dyn NativeMethods>> = OnceLock::new();

/// The native emulator library loaded at runtime.
#[derive(Debug, Getters)]
pub struct NativeLibrary {
    #[debug(skip)]
    pub(super) symbols: Symbols,
    /// The path the library was loaded from.
    #[getset(get = "pub")]
    path: PathBuf,
    #[debug(skip)]
    _lib: Library,
}

impl NativeLibrary {
    /// Loads the library file at `path` and resolves every symbol eagerly.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EmulatorError> {
        let path = path.as_ref().to_path_buf();
        // SAFETY: the library initializers have no preconditions and every resolved symbol
        // is called only with the signature declared in `native_methods!`.
        let lib = unsafe { Library::new(&path) }?;
        let symbols = unsafe { Symbols::load(&lib) }?;
        log::debug!("loaded {}", path.display());
        Ok(Self {
            symbols,
            path,
            _lib: lib,
        })
    }

    /// Loads the library from `dir` using the platform specific file name.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self, EmulatorError> {
        Self::load(dir.as_ref().join(libloading::library_filename(LIB_NAME)))
    }
}

/// Loads the native library from `dir` and installs it for the whole process.
///
/// Only the first successful initialization has an effect; later calls return `Ok(())`
/// without loading anything.
pub fn init(dir: impl AsRef<Path>) -> Result<(), EmulatorError> {
    if NATIVE.get().is_some() {
        log::debug!("native library is already initialized");
        return Ok(());
    }
    let lib = NativeLibrary::load_from_dir(dir)?;
    if NATIVE.set(Arc::new(lib)).is_err() {
        log::warn!("native library was initialized concurrently, discarding duplicate");
    }
    Ok(())
}

/// Same as [`init`], reading the directory from [`LIB_DIR_ENV`].
pub fn init_from_env() -> Result<(), EmulatorError> {
    let dir = std::env::var_os(LIB_DIR_ENV).ok_or(EmulatorError::LibDirNotSet)?;
    init(dir)
}

/// Installs a custom implementation of the native interface.
///
/// Returns `false` if another implementation was installed before.
pub fn init_with(native: Arc<dyn NativeMethods>) -> bool {
    NATIVE.set(native).is_ok()
}

pub(crate) fn native() -> Result<Arc<dyn NativeMethods>, EmulatorError> {
    NATIVE.get().cloned().ok_or(EmulatorError::NotInitialized)
}
