//! Generation targets.

use std::{fmt, path::PathBuf, str::FromStr};

use serde::{Deserialize, Serialize};

/// The kind of output a target produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Java sources (primary target)
    Java,
    /// Kotlin sources (secondary target)
    Kotlin,
}

impl TargetKind {
    /// Returns the target identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Java => "java",
            TargetKind::Kotlin => "kotlin",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "java" => Ok(TargetKind::Java),
            "kotlin" | "kt" => Ok(TargetKind::Kotlin),
            _ => Err(format!("unknown target '{}', expected 'java' or 'kotlin'", s)),
        }
    }
}

/// Feature switches for the Java target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JavaFlags {
    /// Emit Android-friendly code (Parcelable support).
    pub android: bool,
    /// Emit Android nullability annotations.
    pub android_annotations: bool,
    /// Emit compact code (fewer helpers, smaller output).
    pub compact: bool,
}

/// Feature switches for the Kotlin target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KotlinFlags {
    /// Emit Android-friendly code.
    pub android: bool,
    /// Emit annotations that ease calling from Java.
    pub java_interop: bool,
}

/// Kind-specific flags, carried into generation jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TargetFlags {
    Java(JavaFlags),
    Kotlin(KotlinFlags),
}

/// Primary (Java) target configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JavaTarget {
    /// Element allow-list; empty means everything.
    pub elements: Vec<String>,
    /// Directory generated sources are written to.
    pub out_directory: PathBuf,
    pub flags: JavaFlags,
}

/// Secondary (Kotlin) target configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KotlinTarget {
    /// Element allow-list; empty means everything.
    pub elements: Vec<String>,
    /// Directory generated sources are written to.
    pub out_directory: PathBuf,
    pub flags: KotlinFlags,
}

/// A configured output target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GenerationTarget {
    Java(JavaTarget),
    Kotlin(KotlinTarget),
}

impl GenerationTarget {
    /// The target kind.
    pub fn kind(&self) -> TargetKind {
        match self {
            GenerationTarget::Java(_) => TargetKind::Java,
            GenerationTarget::Kotlin(_) => TargetKind::Kotlin,
        }
    }

    /// The element allow-list.
    pub fn elements(&self) -> &[String] {
        match self {
            GenerationTarget::Java(t) => &t.elements,
            GenerationTarget::Kotlin(t) => &t.elements,
        }
    }

    /// The output directory.
    pub fn out_directory(&self) -> &PathBuf {
        match self {
            GenerationTarget::Java(t) => &t.out_directory,
            GenerationTarget::Kotlin(t) => &t.out_directory,
        }
    }

    /// Mutable access to the output directory (used to rebase relative paths).
    pub fn out_directory_mut(&mut self) -> &mut PathBuf {
        match self {
            GenerationTarget::Java(t) => &mut t.out_directory,
            GenerationTarget::Kotlin(t) => &mut t.out_directory,
        }
    }

    /// The kind-specific flags.
    pub fn flags(&self) -> TargetFlags {
        match self {
            GenerationTarget::Java(t) => TargetFlags::Java(t.flags),
            GenerationTarget::Kotlin(t) => TargetFlags::Kotlin(t.flags),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(TargetKind::from_str("java").unwrap(), TargetKind::Java);
        assert_eq!(TargetKind::from_str("Kotlin").unwrap(), TargetKind::Kotlin);
        assert_eq!(TargetKind::from_str("kt").unwrap(), TargetKind::Kotlin);
        assert!(TargetKind::from_str("swift").is_err());
    }

    #[test]
    fn test_accessors() {
        let target = GenerationTarget::Kotlin(KotlinTarget {
            elements: vec!["squareup.dinosaurs".into()],
            out_directory: "build/kotlin".into(),
            flags: KotlinFlags {
                android: false,
                java_interop: true,
            },
        });

        assert_eq!(target.kind(), TargetKind::Kotlin);
        assert_eq!(target.elements(), ["squareup.dinosaurs".to_string()]);
        assert_eq!(target.out_directory(), &PathBuf::from("build/kotlin"));
        assert_eq!(
            target.flags(),
            TargetFlags::Kotlin(KotlinFlags {
                android: false,
                java_interop: true,
            })
        );
    }

    #[test]
    fn test_flags_serialize_flat() {
        let flags = TargetFlags::Java(JavaFlags {
            compact: true,
            ..Default::default()
        });
        let json = serde_json::to_string(&flags).unwrap();
        assert_eq!(
            json,
            r#"{"android":false,"android_annotations":false,"compact":true}"#
        );
    }
}
