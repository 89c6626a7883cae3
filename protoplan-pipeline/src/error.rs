use std::path::PathBuf;

use miette::Diagnostic;
use protoplan_core::TargetKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal planning errors. Any of these aborts the run before a job is produced.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("duplicate source file '{path}'")]
    #[diagnostic(
        code(protoplan::duplicate_source),
        help("'{path}' is provided by both {first} and {second}; remove one of the locations or exclude the file from a tree")
    )]
    DuplicateSource {
        path: String,
        first: String,
        second: String,
    },

    #[error("cannot resolve '{location}': {reason}")]
    #[diagnostic(code(protoplan::resolution))]
    Resolution { location: String, reason: String },

    #[error("cannot read '{}' while resolving '{location}'", path.display())]
    #[diagnostic(code(protoplan::unreadable))]
    Unreadable {
        location: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot walk '{location}'")]
    #[diagnostic(code(protoplan::unreadable))]
    Walk {
        location: String,
        #[source]
        source: ignore::Error,
    },

    #[error("corrupt archive '{}'", path.display())]
    #[diagnostic(
        code(protoplan::corrupt_archive),
        help("only .jar and .zip archives are supported")
    )]
    CorruptArchive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("invalid glob '{pattern}' in '{location}'")]
    #[diagnostic(code(protoplan::invalid_glob))]
    InvalidGlob {
        location: String,
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("unknown element '{element}' in {target} target")]
    #[diagnostic(
        code(protoplan::unknown_element),
        help("'{element}' does not name a type or package in the filtered sources; check {target}.elements against roots and prunes")
    )]
    UnknownElement { element: String, target: TargetKind },

    #[error("invalid element '{element}' in {target} target: {reason}")]
    #[diagnostic(code(protoplan::invalid_pattern))]
    InvalidElement {
        element: String,
        target: TargetKind,
        reason: String,
    },

    #[error("{target} target has no output directory")]
    #[diagnostic(
        code(protoplan::missing_output_directory),
        help("set {target}.out_directory or remove it to use the default")
    )]
    MissingOutputDirectory { target: TargetKind },

    #[error("{first} and {second} targets both write to '{}'", directory.display())]
    #[diagnostic(
        code(protoplan::output_collision),
        help("give each target its own out_directory")
    )]
    OutputCollision {
        directory: PathBuf,
        first: TargetKind,
        second: TargetKind,
    },

    #[error("{target} target is configured more than once")]
    #[diagnostic(code(protoplan::duplicate_target))]
    DuplicateTarget { target: TargetKind },

    #[error("invalid pattern in {field}")]
    #[diagnostic(code(protoplan::invalid_pattern))]
    InvalidPattern {
        field: &'static str,
        #[source]
        source: protoplan_core::PatternError,
    },

    #[error("the '{phase}' phase has not run")]
    #[diagnostic(
        code(protoplan::phase_order),
        help("custom phases run after the built-in lower, resolve, filter and plan phases")
    )]
    PhaseOutput { phase: &'static str },

    #[error("failed to serialize the '{phase}' snapshot")]
    #[diagnostic(code(protoplan::snapshot))]
    Snapshot {
        phase: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("plugin '{plugin}' aborted the '{phase}' phase: {message}")]
    #[diagnostic(code(protoplan::plugin))]
    Plugin {
        plugin: &'static str,
        phase: String,
        message: String,
    },

    #[error("failed to write '{}'", path.display())]
    #[diagnostic(code(protoplan::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Manifest(#[from] protoplan_manifest::Error),
}

impl From<Box<protoplan_manifest::Error>> for Error {
    fn from(err: Box<protoplan_manifest::Error>) -> Self {
        Error::Manifest(*err)
    }
}

impl Error {
    /// Create a resolution error.
    pub fn resolution(location: impl ToString, reason: impl Into<String>) -> Self {
        Error::Resolution {
            location: location.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error was raised while resolving source locations.
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            Error::Resolution { .. }
                | Error::Unreadable { .. }
                | Error::Walk { .. }
                | Error::CorruptArchive { .. }
                | Error::InvalidGlob { .. }
                | Error::DuplicateSource { .. }
        )
    }
}
