// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use runlog::{
    check_deprecations,
    config::{parse_attributes, AttributeFile},
    path::default_run_definition_path,
    MessageRecorder, RunDefinition,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::{
    fs::{create_dir_all, read_to_string, write},
    path::PathBuf,
    process::exit,
};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Parser)]
#[command(
    about,
    override_usage = "runlog [options] <runlog-command>",
    subcommand_help_heading = "Commands",
    version
)]
struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    fn run(self, recorder: &MessageRecorder) -> Result<()> {
        match self.command {
            Command::Init(opts) => run_init(opts, recorder),
            Command::Check(opts) => run_check(opts, recorder),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Write new run definition.
    #[command(override_usage = "runlog init [options]")]
    Init(InitOptions),

    /// Check node attributes for deprecated settings.
    #[command(override_usage = "runlog check [options]")]
    Check(CheckOptions),
}

#[derive(Parser, Clone, Debug)]
#[command(author, about, long_about)]
struct InitOptions {
    /// Path to write run definition to.
    #[arg(short, long, value_name = "path")]
    pub path: Option<PathBuf>,

    /// Path to node attribute file.
    #[arg(short, long, value_name = "path")]
    pub attributes: Option<PathBuf>,
}

#[derive(Parser, Clone, Debug)]
#[command(author, about, long_about)]
struct CheckOptions {
    /// Path to run definition.
    #[arg(short, long, value_name = "path")]
    pub path: Option<PathBuf>,
}

fn main() {
    let layer = fmt::layer()
        .compact()
        .with_target(false)
        .without_time();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .init();

    let recorder = MessageRecorder::new();
    let result = run(&recorder);

    // INVARIANT: Deprecations recorded before a failure still get reported.
    if let Err(error) = recorder.report() {
        error!("failed to print deprecation report: {error}");
    }

    if let Err(error) = result {
        error!("{error:?}");
        exit(1);
    }

    exit(0)
}

fn run(recorder: &MessageRecorder) -> Result<()> {
    Cli::parse().run(recorder)
}

fn run_init(opts: InitOptions, recorder: &MessageRecorder) -> Result<()> {
    let path = match opts.path {
        Some(path) => path,
        None => default_run_definition_path()?,
    };
    if path.exists() {
        bail!("run definition already exists at {}", path.display());
    }

    let mut definition = RunDefinition::default();
    definition.settings.attributes = match opts.attributes {
        Some(attributes) => AttributeFile::new(attributes),
        None => AttributeFile::new("<put path to node attributes here>"),
    };

    if let Some(parent) = path.parent() {
        create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    write(&path, definition.to_string())
        .with_context(|| format!("failed to write run definition to {}", path.display()))?;

    recorder.log(format!("wrote run definition to {}", path.display()));
    info!("wrote run definition to {}", path.display());

    Ok(())
}

fn run_check(opts: CheckOptions, recorder: &MessageRecorder) -> Result<()> {
    let path = match opts.path {
        Some(path) => path,
        None => default_run_definition_path()?,
    };
    let definition: RunDefinition = read_to_string(&path)
        .with_context(|| format!("failed to read run definition at {}", path.display()))?
        .parse()?;
    recorder.log(format!("loaded run definition from {}", path.display()));

    let attributes_path = definition.settings.attributes.as_path();
    let attributes = parse_attributes(
        read_to_string(attributes_path)
            .with_context(|| {
                format!(
                    "failed to read node attributes at {}",
                    attributes_path.display()
                )
            })?
            .as_str(),
    )?;
    recorder.log(format!(
        "loaded node attributes from {}",
        attributes_path.display()
    ));

    let found = check_deprecations(&attributes, definition.deprecations(), recorder);
    let summary = format!(
        "checked {} deprecated settings, {found} in use",
        definition.deprecations().len()
    );
    info!("{summary}");
    recorder.log(summary);

    Ok(())
}
