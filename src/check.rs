// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Deprecated setting detection.
//!
//! Node attributes are a nested TOML table. A deprecated setting names one
//! entry of that table by dotted path, e.g., `gitlab_ci.redis_port` refers to
//! `redis_port` inside the `gitlab_ci` table. Any deprecated setting the host
//! still uses gets recorded as a deprecation notice, so it shows up in the
//! report at the end of the run.

use crate::{
    config::DeprecatedSetting,
    recorder::{DiagnosticSink, MessageRecorder},
};

use toml::{Table, Value};
use tracing::{debug, instrument};

/// Record a deprecation for every deprecated setting present in attributes.
///
/// Settings are checked in the order given. Returns the number of
/// deprecations recorded.
#[instrument(skip_all, level = "debug")]
pub fn check_deprecations<S>(
    attributes: &Table,
    deprecations: &[DeprecatedSetting],
    recorder: &MessageRecorder<S>,
) -> usize
where
    S: DiagnosticSink,
{
    let mut found = 0;
    for setting in deprecations {
        if lookup(attributes, &setting.key).is_none() {
            debug!("{} not set", setting.key);
            continue;
        }

        recorder.deprecation(deprecation_message(setting));
        found += 1;
    }

    found
}

/// Find value of dotted key in attributes.
///
/// Returns [`None`] if any segment of the key is missing, or if the key
/// passes through a value that is not a table.
pub fn lookup<'a>(attributes: &'a Table, key: &str) -> Option<&'a Value> {
    let mut segments = key.split('.');
    let mut value = attributes.get(segments.next()?)?;
    for segment in segments {
        value = value.as_table()?.get(segment)?;
    }

    Some(value)
}

/// Format deprecation notice for a setting.
pub fn deprecation_message(setting: &DeprecatedSetting) -> String {
    let mut message = format!(
        "* {} has been deprecated since {}",
        setting.key, setting.deprecated_in
    );

    if let Some(version) = &setting.removed_in {
        message.push_str(&format!(" and will be removed in {version}"));
    }
    message.push('.');

    if let Some(note) = &setting.note {
        message.push_str(&format!("\n  {note}"));
    }

    message
}
