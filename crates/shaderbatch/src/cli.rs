//! The command line surface of `generate-compile-shaders`.

use std::{ffi::OsString, path::PathBuf};

use anyhow::Context as _;

use crate::{
    generate::Generator,
    manifest::{check_manifest_path, ShaderManifest},
    platform::ScriptFlavor,
    request::{parse_dest_folder, parse_shader_file, InvocationRequest},
    script::DEFAULT_COMPILER,
};

/// Single-dash multi-letter spellings and the long flags they stand for.
/// `clap` would read `-df` as `-d -f`, so these are rewritten before parsing.
const SHORT_FLAGS: [(&str, &str); 2] = [("-df", "--dest-folder"), ("-sf", "--shader-file")];

/// Rewrites `-df` and `-sf` (also in their `-df=<value>` form) to their long spellings.
/// Everything after a bare `--` is passed through untouched.
#[inline]
pub fn expand_short_flags<I, A>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = A>,
    A: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(|arg| {
            let arg = arg.into();
            if passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            for (short, long) in SHORT_FLAGS {
                if text == short {
                    return long.into();
                }
                if let Some(value) = text
                    .strip_prefix(short)
                    .and_then(|rest| rest.strip_prefix('='))
                {
                    return format!("{long}={value}").into();
                }
            }
            arg
        })
        .collect()
}

/// Generates a script that compiles every given shader to SPIR-V with an external compiler.
#[derive(clap::Parser, Debug, Clone)]
#[clap(author, version, about, infer_long_args = true)]
#[non_exhaustive]
pub struct Cli {
    /// Compile shaders script folder. Must already exist.
    #[clap(long, value_parser = parse_dest_folder)]
    pub dest_folder: PathBuf,

    /// Shader source file path. Repeatable, each occurrence takes one or more paths.
    #[clap(
        long = "shader-file",
        required = true,
        num_args = 1..,
        value_parser = parse_shader_file
    )]
    pub shader_files: Vec<PathBuf>,

    /// Shader compiler executable referenced by the script. It is never run by this tool.
    #[clap(long, env = "SHADERBATCH_COMPILER", default_value = DEFAULT_COMPILER)]
    pub compiler: String,

    /// Also write a json manifest of source and output paths. Relative paths are resolved against the dest folder.
    #[clap(long)]
    pub manifest_file: Option<PathBuf>,
}

impl Cli {
    /// Runs the command
    ///
    /// # Errors
    /// Any errors during execution, usually printed to the user
    #[inline]
    pub fn run(&self) -> anyhow::Result<()> {
        let request = InvocationRequest::new(&self.dest_folder, &self.shader_files)?;
        log::debug!("generating with final arguments: {self:#?}");

        let generator = Generator::new(ScriptFlavor::host(), self.compiler.as_str());
        let manifest_path = self
            .manifest_file
            .as_ref()
            .map(|manifest_file| request.dest_folder().join(manifest_file));
        if let Some(manifest_path) = &manifest_path {
            check_manifest_path(
                manifest_path,
                &generator.script_path(request.dest_folder()),
                request.dest_folder(),
            )?;
        }

        let generated = generator
            .run(&request)
            .context("generating compile script")?;

        if let Some(manifest_path) = &manifest_path {
            ShaderManifest::from_script(&generated.script, request.dest_folder())
                .write(manifest_path)
                .context("writing shader manifest")?;
        }
        Ok(())
    }
}
