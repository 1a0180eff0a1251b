//! Assembles the text of the compile script.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::{platform::ScriptFlavor, request::InvocationRequest};

/// Name of the subdirectory of the dest folder the compiled shaders end up in.
pub const SHADERS_DIR: &str = "shaders";

/// Extension appended to a shader's file name to name its compiled artifact.
pub const SPV_EXTENSION: &str = "spv";

/// The compiler referenced by the script when no other is configured.
pub const DEFAULT_COMPILER: &str = "glslc";

/// Where the compiled artifact of `shader` will be written: `<dest>/shaders/<file name>.spv`.
///
/// The shader's own directory plays no part. Returns `None` if `shader` has no file name.
#[inline]
#[must_use]
pub fn compiled_artifact_path(dest_folder: &Path, shader: &Path) -> Option<PathBuf> {
    let mut file_name = shader.file_name()?.to_os_string();
    file_name.push(".");
    file_name.push(SPV_EXTENSION);
    Some(dest_folder.join(SHADERS_DIR).join(file_name))
}

/// A single compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileCommand {
    /// Shader source, as given by the user.
    pub source: PathBuf,
    /// Compiled artifact.
    pub output: PathBuf,
}

impl CompileCommand {
    /// `<compiler> <source> -o <output>`
    #[inline]
    #[must_use]
    pub fn to_line(&self, compiler: &str) -> String {
        format!(
            "{compiler} {} -o {}",
            self.source.display(),
            self.output.display()
        )
    }
}

/// An error raised while assembling the script.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
#[expect(clippy::module_name_repetitions, reason = "this is intended")]
pub enum ScriptError {
    /// The shader path ends in `..` or is a root, so it has no file name to derive an artifact from.
    #[error("shader file '{}' has no file name", path.display())]
    MissingFileName {
        /// The offending path.
        path: PathBuf,
    },
}

/// The full compile script: one [`CompileCommand`] per shader file, in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileScript {
    /// Executable name written at the start of every line.
    compiler: String,
    /// Decides the line ending.
    flavor: ScriptFlavor,
    /// The invocations.
    commands: Vec<CompileCommand>,
}

impl CompileScript {
    /// Builds one command per shader of `request`. Repeated shaders are kept as repeated commands.
    ///
    /// # Errors
    ///
    /// [`ScriptError::MissingFileName`] if a shader path has no file name.
    #[inline]
    pub fn new(
        compiler: impl Into<String>,
        flavor: ScriptFlavor,
        request: &InvocationRequest,
    ) -> Result<Self, ScriptError> {
        let dest_folder = request.dest_folder();
        let commands = request
            .shader_files()
            .iter()
            .map(|source| {
                let output = compiled_artifact_path(dest_folder, source).ok_or_else(|| {
                    ScriptError::MissingFileName {
                        path: source.clone(),
                    }
                })?;
                Ok(CompileCommand {
                    source: source.clone(),
                    output,
                })
            })
            .collect::<Result<Vec<_>, ScriptError>>()?;
        for collision in find_collisions(&commands) {
            log::warn!(
                "'{}' and '{}' both compile to '{}', the latter will overwrite the former",
                collision.earlier.display(),
                collision.later.display(),
                collision.output.display()
            );
        }

        Ok(Self {
            compiler: compiler.into(),
            flavor,
            commands,
        })
    }

    /// The executable name referenced by every line.
    #[inline]
    #[must_use]
    pub fn compiler(&self) -> &str {
        &self.compiler
    }

    /// The flavor the script is rendered for.
    #[inline]
    #[must_use]
    pub const fn flavor(&self) -> ScriptFlavor {
        self.flavor
    }

    /// The invocations, in order.
    #[inline]
    #[must_use]
    pub fn commands(&self) -> &[CompileCommand] {
        &self.commands
    }

    /// The script text. Every line, the last one included, is terminated.
    #[inline]
    #[must_use]
    pub fn render(&self) -> String {
        let line_ending = self.flavor.line_ending();
        self.commands
            .iter()
            .map(|command| command.to_line(&self.compiler) + line_ending)
            .collect()
    }
}

/// Two different sources compiling to the same artifact. The later one wins once the script runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision<'script> {
    /// The source listed first.
    pub earlier: &'script Path,
    /// The source listed later, whose artifact survives.
    pub later: &'script Path,
    /// The artifact both compile to.
    pub output: &'script Path,
}

/// Every pair of distinct sources sharing an artifact, in script order.
/// A source repeated verbatim is not a collision.
#[inline]
#[must_use]
pub fn find_collisions(commands: &[CompileCommand]) -> Vec<Collision<'_>> {
    let mut seen: HashMap<&Path, &Path> = HashMap::new();
    let mut collisions = Vec::new();
    for command in commands {
        match seen.get(command.output.as_path()) {
            Some(earlier) if *earlier != command.source.as_path() => {
                collisions.push(Collision {
                    earlier: *earlier,
                    later: &command.source,
                    output: &command.output,
                });
            }
            Some(_) => {}
            None => {
                seen.insert(command.output.as_path(), command.source.as_path());
            }
        }
    }
    collisions
}
