// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Configuration layout.
//!
//! Specify the layout for the run definition file that runlog uses to
//! simplify the process of serialization and deserialization. File I/O is
//! left to the caller to figure out.

use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Error as FmtError, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    str::FromStr,
};

/// Run definition layout.
///
/// Every provisioning run checked by runlog is described by a __definition__
/// file. This file details where the node attributes of the host live, and
/// which of those attributes are considered deprecated.
///
/// # General Layout
///
/// A run definition is composed of two basic parts: settings and
/// deprecations. The settings section points at the node attribute file. The
/// deprecations section lists every setting that should be reported when it
/// shows up in the node attributes.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct RunDefinition {
    /// Settings for the run.
    pub settings: RunSettings,

    /// Listing of deprecated settings.
    #[serde(rename = "deprecation")]
    pub deprecations: Option<Vec<DeprecatedSetting>>,
}

impl RunDefinition {
    /// Deprecated settings listed by definition, if any.
    pub fn deprecations(&self) -> &[DeprecatedSetting] {
        self.deprecations.as_deref().unwrap_or_default()
    }
}

impl FromStr for RunDefinition {
    type Err = ConfigError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let mut definition: RunDefinition =
            toml::de::from_str(data).map_err(ConfigError::Deserialize)?;

        // INVARIANT: Perform shell expansion on attribute file field.
        definition.settings.attributes = AttributeFile::new(
            shellexpand::full(definition.settings.attributes.to_string().as_str())
                .map_err(ConfigError::ShellExpansion)?
                .into_owned(),
        );

        Ok(definition)
    }
}

impl Display for RunDefinition {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(
            toml::ser::to_string_pretty(self)
                .map_err(ConfigError::Serialize)?
                .as_str(),
        )
    }
}

/// Run configuration settings.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct RunSettings {
    /// Node attribute file to check.
    pub attributes: AttributeFile,
}

/// Setting that is on its way out.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct DeprecatedSetting {
    /// Dotted path of setting in node attributes, e.g., "gitlab_ci.redis_port".
    pub key: String,

    /// Version that deprecated the setting.
    pub deprecated_in: String,

    /// Version that removes the setting.
    pub removed_in: Option<String>,

    /// Additional guidance, e.g., what to use instead.
    pub note: Option<String>,
}

impl DeprecatedSetting {
    /// Construct new deprecated setting.
    pub fn new(key: impl Into<String>, deprecated_in: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            deprecated_in: deprecated_in.into(),
            ..Default::default()
        }
    }

    /// Set version that removes the setting.
    pub fn removed_in(mut self, version: impl Into<String>) -> Self {
        self.removed_in = Some(version.into());
        self
    }

    /// Set additional guidance.
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Path to node attribute file.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct AttributeFile(PathBuf);

impl AttributeFile {
    /// Construct new attribute file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Treat attribute file as [`Path`] slice.
    pub fn as_path(&self) -> &Path {
        self.0.as_path()
    }
}

impl Display for AttributeFile {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(self.as_path().to_string_lossy().as_ref())
    }
}

/// Parse node attributes.
///
/// # Errors
///
/// - Return [`ConfigError::Deserialize`] if attributes are not a valid TOML
///   table.
pub fn parse_attributes(data: &str) -> Result<toml::Table> {
    toml::de::from_str(data).map_err(ConfigError::Deserialize)
}

/// Configuration error types.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error(transparent)]
    Deserialize(#[from] toml::de::Error),

    /// Failed to serialize configuration.
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),

    /// Failed to perform shell expansion on configuration.
    #[error(transparent)]
    ShellExpansion(#[from] shellexpand::LookupError<std::env::VarError>),
}

impl From<ConfigError> for FmtError {
    fn from(_: ConfigError) -> Self {
        FmtError
    }
}

/// Friendly result alias :3
type Result<T, E = ConfigError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use sealed_test::prelude::*;

    #[sealed_test(env = [("CONFIG_ROOT", "/etc/runlog")])]
    fn deserialize_run_definition() -> anyhow::Result<()> {
        let result: RunDefinition = r#"
            [settings]
            attributes = "$CONFIG_ROOT/node.toml"

            [[deprecation]]
            key = "gitlab_ci.redis_port"
            deprecated_in = "8.0"
            removed_in = "9.0"
            note = "Use gitlab_ci.redis_socket instead."

            [[deprecation]]
            key = "gitlab_shell.git_data_directory"
            deprecated_in = "8.10"
        "#
        .parse()?;

        let expect = RunDefinition {
            settings: RunSettings {
                attributes: AttributeFile::new("/etc/runlog/node.toml"),
            },
            deprecations: Some(vec![
                DeprecatedSetting::new("gitlab_ci.redis_port", "8.0")
                    .removed_in("9.0")
                    .note("Use gitlab_ci.redis_socket instead."),
                DeprecatedSetting::new("gitlab_shell.git_data_directory", "8.10"),
            ]),
        };

        assert_eq!(result, expect);

        Ok(())
    }

    #[test]
    fn serialize_run_definition() {
        let result = RunDefinition {
            settings: RunSettings {
                attributes: AttributeFile::new("/etc/runlog/node.toml"),
            },
            deprecations: Some(vec![DeprecatedSetting::new("gitlab_ci.redis_port", "8.0")
                .removed_in("9.0")]),
        }
        .to_string();

        let expect = indoc! {r#"
            [settings]
            attributes = "/etc/runlog/node.toml"

            [[deprecation]]
            key = "gitlab_ci.redis_port"
            deprecated_in = "8.0"
            removed_in = "9.0"
        "#};

        assert_eq!(result, expect);
    }

    #[test]
    fn run_definition_without_deprecations() -> anyhow::Result<()> {
        let result: RunDefinition = indoc! {r#"
            [settings]
            attributes = "/etc/runlog/node.toml"
        "#}
        .parse()?;

        assert!(result.deprecations().is_empty());

        Ok(())
    }

    #[test]
    fn parse_attributes_rejects_invalid_toml() {
        assert!(parse_attributes("gitlab_ci = [").is_err());
    }
}
