// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Message recording for provisioning runs.
//!
//! A provisioning run produces operational notes as it goes. Most of them are
//! only interesting in the moment, but deprecation notices need to stand out:
//! they are easy to miss in the middle of a long run. So every message goes
//! through a [`MessageRecorder`], and at the end of the run the recorder
//! prints a summary of all deprecations it saw.
//!
//! # Report Layout
//!
//! The deprecation report is plain text written to stdout. For two
//! deprecations "one" and "two" it looks like this:
//!
//! ```text
//!
//! Deprecations:
//!
//! one
//! ---
//!
//! two
//!
//! ```
//!
//! Nothing at all is printed when no deprecations were recorded.

use crate::message::{Message, MessageKind};

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    io::{self, Write},
    sync::{Mutex, MutexGuard, PoisonError},
};
use tracing::{debug, instrument, warn};

/// Destination for deprecation notices at the moment they are recorded.
pub trait DiagnosticSink: Send + Sync {
    /// Emit text at warning severity.
    fn warn(&self, text: &str);
}

/// Diagnostic sink forwarding to [`tracing`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&self, text: &str) {
        warn!("{text}");
    }
}

/// Append-only message log of a provisioning run.
///
/// One recorder is constructed at the start of a run and handed to whoever
/// needs to record something. Messages are kept in the order they were
/// recorded, without deduplication.
///
/// # Empty Text
///
/// Messages with empty text are accepted but not recorded. Whitespace-only
/// text is not empty, and is recorded like any other text. This holds for
/// both [`log`] and [`deprecation`], so an empty deprecation is never
/// forwarded to the diagnostic sink either.
///
/// [`log`]: MessageRecorder::log
/// [`deprecation`]: MessageRecorder::deprecation
#[derive(Debug, Default)]
pub struct MessageRecorder<S = TracingSink>
where
    S: DiagnosticSink,
{
    messages: Mutex<Vec<Message>>,
    sink: S,
}

impl MessageRecorder {
    /// Construct new empty recorder that warns through [`tracing`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S> MessageRecorder<S>
where
    S: DiagnosticSink,
{
    /// Construct new empty recorder with a custom diagnostic sink.
    pub fn with_sink(sink: S) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            sink,
        }
    }

    /// Diagnostic sink used for deprecations.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Clear all recorded messages.
    pub fn reset(&self) {
        self.lock().clear();
    }

    /// Record message of the default kind.
    pub fn log(&self, text: impl Into<String>) {
        self.log_with_kind(text, MessageKind::default());
    }

    /// Record message of a given kind.
    #[instrument(skip(self, text, kind), level = "debug")]
    pub fn log_with_kind(&self, text: impl Into<String>, kind: impl Into<MessageKind>) {
        let message = Message::new(text, kind);
        if message.text.is_empty() {
            debug!("skip empty {} message", message.kind);
            return;
        }

        debug!("record {message}");
        self.lock().push(message);
    }

    /// Record deprecation notice.
    ///
    /// The notice is also forwarded to the diagnostic sink right away.
    pub fn deprecation(&self, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.sink.warn(&text);
        }

        self.log_with_kind(text, MessageKind::Deprecation);
    }

    /// All recorded messages in the order they were recorded.
    pub fn messages(&self) -> Vec<Message> {
        self.lock().clone()
    }

    /// Recorded deprecation notices in the order they were recorded.
    pub fn deprecations(&self) -> Vec<Message> {
        self.lock()
            .iter()
            .filter(|message| message.is_deprecation())
            .cloned()
            .collect()
    }

    /// Remove and return all recorded messages.
    pub fn take(&self) -> Vec<Message> {
        std::mem::take(&mut *self.lock())
    }

    /// Build deprecation report from current messages.
    pub fn deprecation_report(&self) -> DeprecationReport {
        DeprecationReport::new(self.deprecations().into_iter().map(|message| message.text))
    }

    /// Write deprecation report to target writer.
    ///
    /// Writes nothing if no deprecations have been recorded.
    ///
    /// # Errors
    ///
    /// - Return [`io::Error`] if target writer fails.
    pub fn write_report(&self, mut writer: impl Write) -> io::Result<()> {
        let report = self.deprecation_report();
        if report.is_empty() {
            return Ok(());
        }

        write!(writer, "{report}")?;
        writer.flush()
    }

    /// Print deprecation report to stdout.
    ///
    /// # Errors
    ///
    /// - Return [`io::Error`] if stdout cannot be written to.
    pub fn report(&self) -> io::Result<()> {
        self.write_report(io::stdout().lock())
    }

    // INVARIANT: Every mutation is a single push, clear, or take, so a
    // poisoned log is still consistent.
    fn lock(&self) -> MutexGuard<'_, Vec<Message>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Formatted summary of deprecation notices.
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct DeprecationReport {
    entries: Vec<String>,
}

impl DeprecationReport {
    /// Construct new report from deprecation texts.
    pub fn new(entries: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if report has nothing to show.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of deprecations in report.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Display for DeprecationReport {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        if self.is_empty() {
            return Ok(());
        }

        fmt.write_str("\nDeprecations:\n\n")?;
        fmt.write_str(&self.entries.join("\n---\n\n"))?;
        fmt.write_str("\n\n")
    }
}
