//! Which kind of script to emit, decided by the host running the generator.

/// Base name of the generated script, the extension is added by [`ScriptFlavor`].
pub const SCRIPT_STEM: &str = "compile_shaders";

/// The two kinds of script we know how to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScriptFlavor {
    /// A `cmd.exe` batch file, for native Windows hosts.
    Batch,
    /// A plain shell script, for everything else.
    Shell,
}

impl ScriptFlavor {
    /// The flavor matching the host this binary was built for.
    #[inline]
    #[must_use]
    pub const fn host() -> Self {
        if cfg!(windows) {
            Self::Batch
        } else {
            Self::Shell
        }
    }

    /// File extension without the leading dot.
    #[inline]
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Batch => "bat",
            Self::Shell => "sh",
        }
    }

    /// Batch files are written with the native Windows text line ending.
    #[inline]
    #[must_use]
    pub const fn line_ending(self) -> &'static str {
        match self {
            Self::Batch => "\r\n",
            Self::Shell => "\n",
        }
    }

    /// `compile_shaders.<ext>`
    #[inline]
    #[must_use]
    pub fn script_file_name(self) -> String {
        format!("{SCRIPT_STEM}.{}", self.extension())
    }
}

impl core::fmt::Display for ScriptFlavor {
    #[expect(
        clippy::min_ident_chars,
        reason = "It's a core library trait implementation"
    )]
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Batch => f.write_str("batch"),
            Self::Shell => f.write_str("shell"),
        }
    }
}
