//! Validated inputs of a single run.

use std::path::{Path, PathBuf};

/// An error indicating that the inputs of a run are not usable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
#[expect(clippy::module_name_repetitions, reason = "this is intended")]
pub enum RequestError {
    /// The destination folder does not exist or is not a directory.
    #[error("dest folder '{}' is not a valid directory", path.display())]
    InvalidDestination {
        /// The offending path.
        path: PathBuf,
    },
    /// A shader source does not exist or is not a regular file.
    #[error("shader file '{}' is not a valid shader file", path.display())]
    InvalidShaderFile {
        /// The offending path.
        path: PathBuf,
    },
    /// No shader source was given at all.
    #[error("at least one shader file is required")]
    NoShaderFiles,
}

/// Destination folder and shader sources of one run.
///
/// Only constructible through [`InvocationRequest::new`], so holding one means every path has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    /// Where the script and the `shaders` directory go.
    dest_folder: PathBuf,
    /// Shader sources, in the order they were given.
    shader_files: Vec<PathBuf>,
}

impl InvocationRequest {
    /// Validates the destination folder, then every shader file in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`RequestError`] encountered.
    #[inline]
    pub fn new<D, I, S>(dest_folder: D, shader_files: I) -> Result<Self, RequestError>
    where
        D: Into<PathBuf>,
        I: IntoIterator<Item = S>,
        S: Into<PathBuf>,
    {
        let dest_folder = check_dest_folder(dest_folder.into())?;
        let shader_files = shader_files
            .into_iter()
            .map(|shader| check_shader_file(shader.into()))
            .collect::<Result<Vec<_>, _>>()?;
        if shader_files.is_empty() {
            return Err(RequestError::NoShaderFiles);
        }
        Ok(Self {
            dest_folder,
            shader_files,
        })
    }

    /// Where the script and the `shaders` directory go.
    #[inline]
    #[must_use]
    pub fn dest_folder(&self) -> &Path {
        &self.dest_folder
    }

    /// Shader sources, in the order they were given.
    #[inline]
    #[must_use]
    pub fn shader_files(&self) -> &[PathBuf] {
        &self.shader_files
    }
}

/// `clap` value parser for `--dest-folder`.
///
/// # Errors
///
/// [`RequestError::InvalidDestination`] if `arg` is not an existing directory.
#[inline]
pub fn parse_dest_folder(arg: &str) -> Result<PathBuf, RequestError> {
    check_dest_folder(PathBuf::from(arg))
}

/// `clap` value parser for `--shader-file`.
///
/// # Errors
///
/// [`RequestError::InvalidShaderFile`] if `arg` is not an existing regular file.
#[inline]
pub fn parse_shader_file(arg: &str) -> Result<PathBuf, RequestError> {
    check_shader_file(PathBuf::from(arg))
}

/// Ensures `path` is an existing directory.
fn check_dest_folder(path: PathBuf) -> Result<PathBuf, RequestError> {
    if path.is_dir() {
        Ok(path)
    } else {
        log::debug!("rejecting dest folder '{}'", path.display());
        Err(RequestError::InvalidDestination { path })
    }
}

/// Ensures `path` is an existing regular file.
fn check_shader_file(path: PathBuf) -> Result<PathBuf, RequestError> {
    if path.is_file() {
        Ok(path)
    } else {
        log::debug!("rejecting shader file '{}'", path.display());
        Err(RequestError::InvalidShaderFile { path })
    }
}
