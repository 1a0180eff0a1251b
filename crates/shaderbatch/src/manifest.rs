//! Optional json manifest describing which artifact every shader source compiles to.
//! Build scripts (`build.rs` files) can read it instead of re-deriving the artifact paths.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::script::{CompileScript, SHADERS_DIR};

/// One shader source and the artifact the script compiles it to.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Shader source, as given on the command line.
    pub source_path: String,
    /// Compiled artifact, relative to the dest folder, using `/` separators.
    pub spv_path: String,
}

/// Everything a consumer needs to run or wire up the generated script.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
#[expect(clippy::module_name_repetitions, reason = "it is intended")]
pub struct ShaderManifest {
    /// File name of the generated script, inside the dest folder.
    pub script: String,
    /// Compiler executable the script invokes.
    pub compiler: String,
    /// One entry per script line, in the same order.
    pub shaders: Vec<ManifestEntry>,
}

/// An error raised while writing the manifest.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
#[expect(clippy::module_name_repetitions, reason = "it is intended")]
pub enum ManifestError {
    /// Serializing to json failed.
    #[error("could not serialize shader manifest: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The manifest would overwrite the script or land among the compiled artifacts.
    #[error("shader manifest '{}' would clobber '{}'", path.display(), conflict.display())]
    Conflict {
        /// The manifest file.
        path: PathBuf,
        /// The script or `shaders` directory it collides with.
        conflict: PathBuf,
    },
    /// Writing the file failed.
    #[error("could not write shader manifest '{}': {source}", path.display())]
    Write {
        /// The manifest file.
        path: PathBuf,
        /// Source of the error.
        source: io::Error,
    },
}

impl ShaderManifest {
    /// Describes `script`, whose artifacts live under `dest_folder`.
    #[inline]
    #[must_use]
    pub fn from_script(script: &CompileScript, dest_folder: &Path) -> Self {
        let shaders = script
            .commands()
            .iter()
            .map(|command| {
                let relative = command
                    .output
                    .strip_prefix(dest_folder)
                    .unwrap_or(command.output.as_path());
                ManifestEntry {
                    source_path: command.source.display().to_string(),
                    spv_path: forward_slashes(relative),
                }
            })
            .collect();
        Self {
            script: script.flavor().script_file_name(),
            compiler: script.compiler().to_owned(),
            shaders,
        }
    }

    /// Writes the manifest as pretty-printed json.
    ///
    /// # Errors
    ///
    /// See [`ManifestError`].
    #[inline]
    pub fn write(&self, path: &Path) -> Result<(), ManifestError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ManifestError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("wrote shader manifest to '{}'", path.display());
        Ok(())
    }
}

/// Rejects a manifest path that is the script itself or lies inside `<dest>/shaders`.
///
/// # Errors
///
/// [`ManifestError::Conflict`] naming what the manifest collides with.
#[inline]
pub fn check_manifest_path(
    path: &Path,
    script_path: &Path,
    dest_folder: &Path,
) -> Result<(), ManifestError> {
    let shaders_dir = dest_folder.join(SHADERS_DIR);
    let conflict = if path == script_path {
        script_path.to_path_buf()
    } else if path.starts_with(&shaders_dir) {
        shaders_dir
    } else {
        return Ok(());
    };
    Err(ManifestError::Conflict {
        path: path.to_path_buf(),
        conflict,
    })
}

/// Force a forward slash convention here so the manifest reads the same on all OSs.
fn forward_slashes(path: &Path) -> String {
    path.components()
        .map(|comp| comp.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod test {
    use shaderbatch_test_utils::TestEnv;

    use super::*;
    use crate::{platform::ScriptFlavor, request::InvocationRequest};

    #[test_log::test]
    fn lists_shaders_in_script_order() {
        let env = TestEnv::new();
        let dest = env.dest_folder().unwrap();
        let frag = env.shader_file("other/a.frag").unwrap();
        let vert = env.shader_file("src/a.vert").unwrap();
        let request = InvocationRequest::new(&dest, [&frag, &vert]).unwrap();
        let script = CompileScript::new("glslc", ScriptFlavor::Shell, &request).unwrap();

        let manifest = ShaderManifest::from_script(&script, &dest);
        assert_eq!(manifest.script, "compile_shaders.sh");
        assert_eq!(manifest.compiler, "glslc");
        assert_eq!(
            manifest.shaders,
            [
                ManifestEntry {
                    source_path: frag.display().to_string(),
                    spv_path: "shaders/a.frag.spv".to_owned(),
                },
                ManifestEntry {
                    source_path: vert.display().to_string(),
                    spv_path: "shaders/a.vert.spv".to_owned(),
                },
            ]
        );
    }

    #[test_log::test]
    fn written_json_reads_back() {
        let env = TestEnv::new();
        let dest = env.dest_folder().unwrap();
        let vert = env.shader_file("a.vert").unwrap();
        let request = InvocationRequest::new(&dest, [&vert]).unwrap();
        let script = CompileScript::new("glslc", ScriptFlavor::Batch, &request).unwrap();
        let manifest = ShaderManifest::from_script(&script, &dest);

        let path = dest.join("shaders.json");
        manifest.write(&path).unwrap();
        let json = fs::read_to_string(&path).unwrap();
        let read_back: ShaderManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(read_back, manifest);
        assert_eq!(read_back.script, "compile_shaders.bat");
    }

    #[test_log::test]
    fn manifest_must_not_clobber_outputs() {
        let dest = Path::new("/tmp/out");
        let script = dest.join("compile_shaders.sh");

        assert!(check_manifest_path(&dest.join("shaders.json"), &script, dest).is_ok());
        assert!(check_manifest_path(Path::new("/elsewhere/compile_shaders.sh"), &script, dest).is_ok());

        let error = check_manifest_path(&script, &script, dest).unwrap_err();
        assert!(matches!(error, ManifestError::Conflict { ref conflict, .. } if *conflict == script));

        let error =
            check_manifest_path(&dest.join("./compile_shaders.sh"), &script, dest).unwrap_err();
        assert!(matches!(error, ManifestError::Conflict { .. }));

        let error = check_manifest_path(&dest.join("shaders/list.json"), &script, dest).unwrap_err();
        assert!(
            matches!(error, ManifestError::Conflict { ref conflict, .. } if *conflict == dest.join("shaders"))
        );
    }

    #[test_log::test]
    fn write_into_missing_dir_fails() {
        let env = TestEnv::new();
        let manifest = ShaderManifest {
            script: "compile_shaders.sh".to_owned(),
            compiler: "glslc".to_owned(),
            shaders: Vec::new(),
        };
        let path = env.missing("nope").join("shaders.json");

        let error = manifest.write(&path).unwrap_err();
        assert!(matches!(error, ManifestError::Write { .. }));
    }
}
