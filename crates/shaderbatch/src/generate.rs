//! Writes the compile script to disk.

use std::{
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use crate::{
    platform::ScriptFlavor,
    request::InvocationRequest,
    script::{CompileScript, ScriptError, DEFAULT_COMPILER, SHADERS_DIR},
};

/// An error raised while producing the script on disk.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
#[expect(clippy::module_name_repetitions, reason = "this is intended")]
pub enum GenerateError {
    /// The `shaders` directory could not be created, for any reason other than it already existing.
    #[error("could not create shaders directory '{}': {source}", path.display())]
    DirectoryCreation {
        /// The directory we tried to create.
        path: PathBuf,
        /// Source of the error.
        source: io::Error,
    },
    /// The script file could not be opened or written.
    /// Whatever was written before the failure stays on disk.
    #[error("could not write compile script '{}': {source}", path.display())]
    ScriptWrite {
        /// The script file.
        path: PathBuf,
        /// Source of the error.
        source: io::Error,
    },
    /// The script could not be assembled.
    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// Creates `<dest>/shaders` unless it is already there, and returns its path.
///
/// The dest folder itself is never created, a missing one is reported as [`GenerateError::DirectoryCreation`].
///
/// # Errors
///
/// [`GenerateError::DirectoryCreation`] for any failure except [`io::ErrorKind::AlreadyExists`].
#[inline]
pub fn ensure_shaders_dir(dest_folder: &Path) -> Result<PathBuf, GenerateError> {
    let shaders_dir = dest_folder.join(SHADERS_DIR);
    match fs::create_dir(&shaders_dir) {
        Ok(()) => log::debug!("created '{}'", shaders_dir.display()),
        Err(error) if error.kind() == io::ErrorKind::AlreadyExists => {
            log::debug!("'{}' already exists", shaders_dir.display());
        }
        Err(source) => {
            return Err(GenerateError::DirectoryCreation {
                path: shaders_dir,
                source,
            })
        }
    }
    Ok(shaders_dir)
}

/// What a successful run produced.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct GeneratedScript {
    /// Where the script was written.
    pub path: PathBuf,
    /// Its content.
    pub script: CompileScript,
}

/// Turns an [`InvocationRequest`] into a script file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generator {
    /// Script flavor to write.
    flavor: ScriptFlavor,
    /// Compiler executable referenced by the script.
    compiler: String,
}

impl Default for Generator {
    #[inline]
    fn default() -> Self {
        Self::for_host()
    }
}

impl Generator {
    /// A generator for the host's flavor, referencing [`DEFAULT_COMPILER`].
    #[inline]
    #[must_use]
    pub fn for_host() -> Self {
        Self::new(ScriptFlavor::host(), DEFAULT_COMPILER)
    }

    /// A generator for an explicit flavor and compiler.
    #[inline]
    #[must_use]
    pub fn new(flavor: ScriptFlavor, compiler: impl Into<String>) -> Self {
        Self {
            flavor,
            compiler: compiler.into(),
        }
    }

    /// Path the script will be written to for `dest_folder`.
    #[inline]
    #[must_use]
    pub fn script_path(&self, dest_folder: &Path) -> PathBuf {
        dest_folder.join(self.flavor.script_file_name())
    }

    /// Ensures the `shaders` directory, then writes the script, overwriting any previous one.
    ///
    /// # Errors
    ///
    /// See [`GenerateError`]. Nothing is written if the `shaders` directory cannot be created.
    #[inline]
    pub fn run(&self, request: &InvocationRequest) -> Result<GeneratedScript, GenerateError> {
        let script = CompileScript::new(self.compiler.as_str(), self.flavor, request)?;
        ensure_shaders_dir(request.dest_folder())?;

        let path = self.script_path(request.dest_folder());
        log::debug!(
            "writing {} script with {} command(s) to '{}'",
            self.flavor,
            script.commands().len(),
            path.display()
        );
        write_script(&path, &script.render())?;
        log::info!("wrote compile script to '{}'", path.display());

        Ok(GeneratedScript { path, script })
    }
}

/// Truncates `path` and writes `text` to it. The handle is closed when this returns, on every path.
fn write_script(path: &Path, text: &str) -> Result<(), GenerateError> {
    let to_error = |source: io::Error| GenerateError::ScriptWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut file = fs::File::create(path).map_err(to_error)?;
    file.write_all(text.as_bytes()).map_err(to_error)?;
    file.flush().map_err(to_error)
}
