//! Generates a script that batches shader compiler invocations.
//!
//! Given a destination folder and a list of shader sources, this crate writes
//! `compile_shaders.sh` (or `compile_shaders.bat` on Windows) into the destination folder.
//! Each line of that script invokes an external compiler, `glslc` by default, on one shader:
//!
//! ```text
//! glslc /src/a.vert -o /tmp/out/shaders/a.vert.spv
//! glslc /other/a.frag -o /tmp/out/shaders/a.frag.spv
//! ```
//!
//! Nothing is compiled here. Running the script is left to the caller, usually as one step of
//! its own build. The `shaders` subdirectory the artifacts go into is created ahead of time.
//!
//! ## Artifact names
//!
//! Artifacts are named after the source's file name only, with `.spv` appended.
//! Two sources with the same file name from different directories therefore compile to the same
//! artifact and the later line wins. This is logged as a warning but otherwise left alone.

pub mod cli;
pub mod generate;
pub mod manifest;
pub mod platform;
pub mod request;
pub mod script;

#[expect(clippy::pub_use, reason = "part of public API")]
pub use self::{
    cli::Cli,
    generate::{GenerateError, GeneratedScript, Generator},
    platform::ScriptFlavor,
    request::{InvocationRequest, RequestError},
    script::{CompileScript, DEFAULT_COMPILER},
};
