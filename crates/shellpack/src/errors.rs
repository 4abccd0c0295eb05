use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    #[error("--build-tools is required")]
    #[diagnostic(
        code(usage::missing_build_tools),
        help("Pass --build-tools=<path/to/android/build-tools> pointing at a directory that contains zipalign and apksigner")
    )]
    MissingBuildTools,

    #[error("Source directory not found: {path}")]
    #[diagnostic(
        code(usage::source_dir_missing),
        help("Pass an existing project directory, or run shellpack from inside one")
    )]
    SourceDirMissing { path: PathBuf },

    #[error("Shell archive not found: {path}")]
    #[diagnostic(
        code(shell::archive_missing),
        help("shellpack expects the prebuilt shell base.apk next to the shellpack executable; reinstall if it went missing")
    )]
    ShellArchiveMissing { path: PathBuf },

    #[error("Signing keystore not found: {path}")]
    #[diagnostic(
        code(shell::keystore_missing),
        help("shellpack expects its bundled keystore next to the shellpack executable; reinstall if it went missing")
    )]
    KeystoreMissing { path: PathBuf },

    #[error("Failed to launch {tool}")]
    #[diagnostic(
        code(tool::not_found),
        help("Make sure {tool} is installed and the path passed to shellpack is correct")
    )]
    ToolNotFound {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}\n{stderr}")]
    #[diagnostic(
        code(tool::failure),
        help("The output package is unusable; fix the reported tool failure and re-run")
    )]
    ToolFailure {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("Branding injection failed")]
    #[diagnostic(code(branding::failed))]
    Branding {
        #[from]
        source: spk_branding::Error,
    },
}

impl CliError {
    pub fn source_dir_missing(path: PathBuf) -> Self {
        Self::SourceDirMissing { path }
    }

    pub fn tool_not_found(tool: impl Into<String>, source: std::io::Error) -> Self {
        Self::ToolNotFound {
            tool: tool.into(),
            source,
        }
    }

    pub fn tool_failure(
        tool: impl Into<String>,
        status: impl ToString,
        stderr: impl Into<String>,
    ) -> Self {
        Self::ToolFailure {
            tool: tool.into(),
            status: status.to_string(),
            stderr: stderr.into(),
        }
    }
}
