use std::ffi::OsStr;

use itertools::Itertools;

/// The command line a generated file was produced by
///
/// Every structural backend starts its output with one line built from this marker so that
/// downstream tooling can recognise generated files and refuse to edit them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBy {
    pub command: String,
}

impl GeneratedBy {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into() }
    }

    /// Marker for the running process, built from its arguments
    pub fn current_process() -> Self {
        Self::from_args(std::env::args_os())
    }

    /// Marker from a command line, arguments that are not valid UTF-8 are rendered lossily
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Self::new(args.into_iter().map(|arg| arg.as_ref().to_string_lossy().into_owned()).join(" "))
    }

    /// Marker text without any comment delimiters
    pub fn text(&self) -> String {
        format!("Code generated by {}; DO NOT EDIT.", self.command)
    }
}
