// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Message recording for provisioning runs.
//!
//! A provisioning run records what it does into a [`MessageRecorder`]. Most
//! messages are informational, but deprecation notices are also warned about
//! immediately and summarized once the run is over, so operators get a
//! chance to move away from settings that are about to disappear.
//!
//! Deprecated settings are described by a [`RunDefinition`], and detected in
//! a host's node attributes through [`check_deprecations`].

pub mod check;
pub mod config;
pub mod message;
pub mod path;
pub mod recorder;

pub use check::check_deprecations;
pub use config::{DeprecatedSetting, RunDefinition};
pub use message::{Message, MessageKind};
pub use recorder::{DeprecationReport, DiagnosticSink, MessageRecorder, TracingSink};
