//! Per-target configuration tables.

use protoplan_core::{
    GenerationTarget, JavaFlags, JavaTarget, KotlinFlags, KotlinTarget,
};
use serde::Deserialize;

use super::Manifest;

/// Output directory used by targets that do not declare one.
pub const DEFAULT_OUT_DIRECTORY: &str = "build/generated/src/main/java";

/// `[java]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JavaConfig {
    /// Element allow-list (empty means everything)
    #[serde(default)]
    pub elements: Vec<String>,

    /// Output directory
    pub out_directory: Option<String>,

    #[serde(default)]
    pub android: bool,

    #[serde(default)]
    pub android_annotations: bool,

    #[serde(default)]
    pub compact: bool,
}

/// `[kotlin]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KotlinConfig {
    /// Element allow-list (empty means everything)
    #[serde(default)]
    pub elements: Vec<String>,

    /// Output directory
    pub out_directory: Option<String>,

    #[serde(default)]
    pub android: bool,

    #[serde(default)]
    pub java_interop: bool,
}

impl From<&JavaConfig> for GenerationTarget {
    fn from(config: &JavaConfig) -> Self {
        GenerationTarget::Java(JavaTarget {
            elements: config.elements.clone(),
            out_directory: out_directory(&config.out_directory).into(),
            flags: JavaFlags {
                android: config.android,
                android_annotations: config.android_annotations,
                compact: config.compact,
            },
        })
    }
}

impl From<&KotlinConfig> for GenerationTarget {
    fn from(config: &KotlinConfig) -> Self {
        GenerationTarget::Kotlin(KotlinTarget {
            elements: config.elements.clone(),
            out_directory: out_directory(&config.out_directory).into(),
            flags: KotlinFlags {
                android: config.android,
                java_interop: config.java_interop,
            },
        })
    }
}

fn out_directory(configured: &Option<String>) -> &str {
    configured.as_deref().unwrap_or(DEFAULT_OUT_DIRECTORY)
}

impl Manifest {
    /// Configured targets in planning order (Java, then Kotlin).
    ///
    /// A manifest without target tables plans a default Java target.
    /// Output directories are returned as written; relative ones are
    /// resolved by the caller.
    pub fn targets(&self) -> Vec<GenerationTarget> {
        if !self.has_targets() {
            return vec![(&JavaConfig::default()).into()];
        }

        let java = self.java.as_ref().map(GenerationTarget::from);
        let kotlin = self.kotlin.as_ref().map(GenerationTarget::from);
        java.into_iter().chain(kotlin).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use protoplan_core::{TargetFlags, TargetKind};

    use super::*;

    fn parse(content: &str) -> Manifest {
        toml::from_str(content).expect("Failed to parse test manifest")
    }

    #[test]
    fn test_default_java_target() {
        let targets = parse("").targets();

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].kind(), TargetKind::Java);
        assert!(targets[0].elements().is_empty());
        assert_eq!(
            targets[0].out_directory(),
            &PathBuf::from("build/generated/src/main/java")
        );
    }

    #[test]
    fn test_kotlin_only() {
        let targets = parse(
            r#"
            [kotlin]
            out_directory = "build/generated/kotlin"
            java_interop = true
            "#,
        )
        .targets();

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].kind(), TargetKind::Kotlin);
        assert_eq!(
            targets[0].flags(),
            TargetFlags::Kotlin(KotlinFlags {
                android: false,
                java_interop: true,
            })
        );
    }

    #[test]
    fn test_both_targets_in_order() {
        let targets = parse(
            r#"
            [kotlin]
            out_directory = "out/kotlin"

            [java]
            elements = ["squareup.dinosaurs.Dinosaur"]
            out_directory = "out/java"
            compact = true
            "#,
        )
        .targets();

        let kinds: Vec<TargetKind> = targets.iter().map(|t| t.kind()).collect();
        assert_eq!(kinds, vec![TargetKind::Java, TargetKind::Kotlin]);
        assert_eq!(targets[0].elements(), ["squareup.dinosaurs.Dinosaur".to_string()]);
    }

    #[test]
    fn test_explicit_empty_out_directory_is_kept() {
        let targets = parse(
            r#"
            [java]
            out_directory = ""
            "#,
        )
        .targets();

        assert_eq!(targets[0].out_directory(), &PathBuf::new());
    }
}
