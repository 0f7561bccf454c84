//! # Run Subcommand
//!
//! Drives one inspection from an answers file and prints the record.
//!
//! ```yaml
//! template: ladder-inspection
//! inspector: J Smith
//! location: Site A
//! date: 2026-10-19          # optional, defaults to today
//! notes: Ladder tagged out  # optional
//! default: pass             # optional, applied to every unanswered item
//! answers:
//!   - section: 1            # 1-based, as printed by `insp templates show`
//!     item: 1
//!     result: fail
//!     notes: cracked stile
//! ```
//!
//! Each answer sets its item outright, so listing an item twice keeps the
//! last result rather than toggling it off.
//!
//! Exit code: 0 on PASS or ADVISORY, 2 on FAIL, 1 on any error.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use insp_catalog::TemplateCatalog;
use insp_core::{ContentDigest, InspectionDate};
use insp_state::{ChecklistController, CompletedInspection, ItemResult, OverallResult};

use crate::config::CliConfig;
use crate::report::render_record;

/// Arguments for the `insp run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Answers file (YAML or JSON).
    #[arg(value_name = "ANSWERS")]
    pub answers: PathBuf,

    /// Print the record and its digest as JSON instead of a text report.
    #[arg(long)]
    pub json: bool,
}

/// One answered item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Answer {
    /// 1-based section number.
    pub section: usize,
    /// 1-based item number within the section.
    pub item: usize,
    /// Result to record.
    pub result: ItemResult,
    /// Optional item notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Contents of an answers file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnswersFile {
    /// Template id, title or unique id prefix.
    pub template: String,
    /// Inspector name; falls back to the config default.
    #[serde(default)]
    pub inspector: Option<String>,
    /// Location; falls back to the config default.
    #[serde(default)]
    pub location: Option<String>,
    /// Inspection date; defaults to today.
    #[serde(default)]
    pub date: Option<InspectionDate>,
    /// Additional notes for the whole inspection.
    #[serde(default)]
    pub notes: Option<String>,
    /// Result applied to every item the answers leave unanswered.
    #[serde(default)]
    pub default: Option<ItemResult>,
    /// Explicit answers.
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl AnswersFile {
    /// Read an answers file. `.json` files are parsed as JSON, anything else
    /// as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read answers file: {}", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("failed to parse answers JSON: {}", path.display()))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("failed to parse answers YAML: {}", path.display()))?
        };
        Ok(parsed)
    }
}

/// JSON output of `insp run --json`.
#[derive(Debug, Serialize)]
pub struct RunOutput<'a> {
    /// The submitted record.
    pub record: &'a CompletedInspection,
    /// Digest of the record's canonical form.
    pub digest: String,
}

/// Exit code for an outcome: 2 for FAIL, otherwise 0.
pub fn exit_code(outcome: OverallResult) -> u8 {
    match outcome {
        OverallResult::Fail => 2,
        OverallResult::Pass | OverallResult::Advisory => 0,
    }
}

/// Run a scripted inspection on `controller` and return the submitted record.
pub fn execute<'c>(
    answers: &AnswersFile,
    catalog: &TemplateCatalog,
    config: &CliConfig,
    controller: &'c mut ChecklistController,
) -> Result<&'c CompletedInspection> {
    let template = catalog.resolve(&answers.template)?;
    controller.start_inspection(template);

    for (n, answer) in answers.answers.iter().enumerate() {
        let ctx = || format!("answer {}", n + 1);
        let (s, i) = zero_based(answer.section, answer.item).with_context(ctx)?;
        controller.set_item_result(s, i, None).with_context(ctx)?;
        controller
            .set_item_result(s, i, Some(answer.result))
            .with_context(ctx)?;
        if let Some(notes) = &answer.notes {
            controller.set_item_notes(s, i, notes).with_context(ctx)?;
        }
    }

    if let Some(default) = answers.default {
        let unanswered: Vec<(usize, usize)> = controller
            .session()
            .map(|session| {
                session
                    .tree()
                    .sections()
                    .iter()
                    .enumerate()
                    .flat_map(|(s, section)| {
                        section
                            .items
                            .iter()
                            .enumerate()
                            .filter(|(_, item)| !item.is_answered())
                            .map(move |(i, _)| (s, i))
                    })
                    .collect()
            })
            .unwrap_or_default();
        tracing::debug!(count = unanswered.len(), result = %default, "applying default result");
        for (s, i) in unanswered {
            controller.set_item_result(s, i, Some(default))?;
        }
    }

    let inspector = answers.inspector.as_ref().or(config.inspector.as_ref());
    if let Some(name) = inspector {
        controller.set_inspector_name(name)?;
    }
    let location = answers.location.as_ref().or(config.location.as_ref());
    if let Some(location) = location {
        controller.set_location(location)?;
    }
    if let Some(date) = answers.date {
        controller.set_inspection_date(date)?;
    }
    if let Some(notes) = &answers.notes {
        controller.set_additional_notes(notes)?;
    }

    Ok(controller.submit_inspection()?)
}

fn zero_based(section: usize, item: usize) -> Result<(usize, usize)> {
    if section == 0 || item == 0 {
        bail!("section and item numbers start at 1 (got {section}.{item})");
    }
    Ok((section - 1, item - 1))
}

/// Write the record as a text report or as JSON with its digest.
pub fn write_record<W: Write>(record: &CompletedInspection, json: bool, out: &mut W) -> Result<()> {
    if json {
        let digest: ContentDigest = record.digest()?;
        let output = RunOutput {
            record,
            digest: digest.to_string(),
        };
        serde_json::to_writer_pretty(&mut *out, &output)?;
        writeln!(out)?;
    } else {
        render_record(record, out)?;
    }
    Ok(())
}

/// Execute the run subcommand.
pub fn run_run(args: &RunArgs, catalog: &TemplateCatalog, config: &CliConfig) -> Result<u8> {
    let answers = AnswersFile::load(&args.answers)?;
    let mut controller = ChecklistController::new();
    let record = execute(&answers, catalog, config, &mut controller)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_record(record, args.json, &mut out)?;
    out.flush()?;
    Ok(exit_code(record.overall_result))
}
