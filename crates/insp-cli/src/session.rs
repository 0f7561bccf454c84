//! # Session Subcommand
//!
//! A line-oriented shell over the checklist controller. One command per
//! line; items are addressed `section item`, both numbered from 1.
//!
//! ```text
//! start <template>            begin an inspection (replaces any in progress)
//! pass|fail|na <s> <i>        record a result; repeating it clears the item
//! clear <s> <i>               clear a result
//! note <s> <i> <text>         set item notes
//! toggle <s>                  expand or collapse a section
//! inspector|location|notes <text>
//! date <YYYY-MM-DD>
//! show | submit | cancel | history | templates | help
//! back | quit                 leave the shell, discarding any open inspection
//! ```
//!
//! Rejected commands print `error: ...` and leave the session untouched.

use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;

use insp_catalog::TemplateCatalog;
use insp_core::InspectionDate;
use insp_state::{ChecklistController, ItemResult, Navigator, RecordingNotifier};

use crate::config::CliConfig;
use crate::report::{render_history, render_record, render_session, render_template_list};

/// Arguments for the `insp session` subcommand.
#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Start an inspection on this template straight away.
    #[arg(long, value_name = "TEMPLATE")]
    pub template: Option<String>,
}

/// One parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Blank line.
    Empty,
    /// Start an inspection on the given template query.
    Start(String),
    /// Record (or clear, with `None`) the result of item `(s, i)`.
    Mark {
        result: Option<ItemResult>,
        section: usize,
        item: usize,
    },
    /// Set item notes.
    Note {
        section: usize,
        item: usize,
        text: String,
    },
    /// Expand or collapse a section.
    Toggle(usize),
    Inspector(String),
    Location(String),
    Notes(String),
    Date(InspectionDate),
    Show,
    Submit,
    Cancel,
    History,
    Templates,
    Help,
    /// Leave the shell.
    Back,
}

const HELP: &str = "\
commands:
  start <template>          begin an inspection
  pass|fail|na <s> <i>      record a result (repeat to clear)
  clear <s> <i>             clear a result
  note <s> <i> <text>       set item notes
  toggle <s>                expand or collapse a section
  inspector <name>          set the inspector name
  location <text>           set the location
  date <YYYY-MM-DD>         set the inspection date
  notes <text>              set additional notes
  show                      show the inspection in progress
  submit                    score and record the inspection
  cancel                    discard the inspection in progress
  history                   list completed inspections
  templates                 list available templates
  back | quit               leave";

/// Convert a 1-based number typed by the user into an index.
fn index(arg: Option<&str>, what: &str) -> Result<usize> {
    let Some(arg) = arg else {
        bail!("missing {what} number");
    };
    match arg.parse::<usize>() {
        Ok(0) => bail!("{what} numbers start at 1"),
        Ok(n) => Ok(n - 1),
        Err(_) => bail!("invalid {what} number: {arg:?}"),
    }
}

fn rest_of(line: &str, skip: usize) -> String {
    line.split_whitespace()
        .skip(skip)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<ShellCommand> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(ShellCommand::Empty);
    };
    let verb = verb.to_ascii_lowercase();

    let cmd = match verb.as_str() {
        "start" => {
            let query = rest_of(line, 1);
            if query.is_empty() {
                bail!("usage: start <template>");
            }
            ShellCommand::Start(query)
        }
        "clear" => ShellCommand::Mark {
            result: None,
            section: index(words.next(), "section")?,
            item: index(words.next(), "item")?,
        },
        "note" => ShellCommand::Note {
            section: index(words.next(), "section")?,
            item: index(words.next(), "item")?,
            text: rest_of(line, 3),
        },
        "toggle" => ShellCommand::Toggle(index(words.next(), "section")?),
        "inspector" => ShellCommand::Inspector(rest_of(line, 1)),
        "location" => ShellCommand::Location(rest_of(line, 1)),
        "notes" => ShellCommand::Notes(rest_of(line, 1)),
        "date" => {
            let Some(arg) = words.next() else {
                bail!("usage: date <YYYY-MM-DD>");
            };
            ShellCommand::Date(InspectionDate::parse(arg)?)
        }
        "show" => ShellCommand::Show,
        "submit" => ShellCommand::Submit,
        "cancel" => ShellCommand::Cancel,
        "history" => ShellCommand::History,
        "templates" => ShellCommand::Templates,
        "help" | "?" => ShellCommand::Help,
        "back" | "quit" | "exit" => ShellCommand::Back,
        other => match ItemResult::from_name(other) {
            Some(result) => ShellCommand::Mark {
                result: Some(result),
                section: index(words.next(), "section")?,
                item: index(words.next(), "item")?,
            },
            None => bail!("unknown command: {other} (try `help`)"),
        },
    };
    Ok(cmd)
}

/// Sets a flag when the controller asks to leave.
#[derive(Debug, Clone, Default)]
struct ExitFlag(Arc<AtomicBool>);

impl Navigator for ExitFlag {
    fn go_back(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Interactive shell reading commands from `R` and writing to `W`.
pub struct SessionShell<'a, R, W> {
    controller: ChecklistController,
    catalog: &'a TemplateCatalog,
    config: &'a CliConfig,
    notices: RecordingNotifier,
    shown_notices: usize,
    exit: ExitFlag,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> SessionShell<'a, R, W> {
    pub fn new(catalog: &'a TemplateCatalog, config: &'a CliConfig, input: R, output: W) -> Self {
        let notices = RecordingNotifier::new();
        let exit = ExitFlag::default();
        let controller = ChecklistController::new()
            .with_notifier(notices.clone())
            .with_navigator(exit.clone());
        Self {
            controller,
            catalog,
            config,
            notices,
            shown_notices: 0,
            exit,
            input,
            output,
        }
    }

    /// The controller driven by this shell.
    pub fn controller(&self) -> &ChecklistController {
        &self.controller
    }

    /// Consume the shell, returning its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Whether `back`/`quit` has been issued.
    pub fn finished(&self) -> bool {
        self.exit.0.load(Ordering::SeqCst)
    }

    /// Read and execute commands until `back`, `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        let mut line = String::new();
        while !self.finished() {
            self.prompt()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                self.controller.exit();
                break;
            }
            self.execute(&line)?;
        }
        Ok(())
    }

    /// Execute one line. Rejected commands are reported on the output;
    /// only I/O failures are returned.
    pub fn execute(&mut self, line: &str) -> Result<()> {
        let outcome = parse_command(line).and_then(|cmd| self.apply(cmd));
        if let Err(e) = outcome {
            tracing::debug!(line = line.trim(), error = %e, "command rejected");
            writeln!(self.output, "error: {e:#}")?;
        }
        self.output.flush()?;
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        match self.controller.session() {
            Some(session) => write!(
                self.output,
                "insp[{} {}%]> ",
                session.template_id(),
                session.progress()
            )?,
            None => write!(self.output, "insp> ")?,
        }
        self.output.flush()?;
        Ok(())
    }

    fn apply(&mut self, cmd: ShellCommand) -> Result<()> {
        let ctl = &mut self.controller;
        match cmd {
            ShellCommand::Empty => {}
            ShellCommand::Start(query) => {
                let template = self.catalog.resolve(&query)?;
                ctl.start_inspection(template);
                if let Some(name) = &self.config.inspector {
                    ctl.set_inspector_name(name)?;
                }
                if let Some(location) = &self.config.location {
                    ctl.set_location(location)?;
                }
                writeln!(
                    self.output,
                    "started {} ({} items)",
                    template.title,
                    template.item_count()
                )?;
            }
            ShellCommand::Mark {
                result,
                section,
                item,
            } => {
                ctl.set_item_result(section, item, result)?;
                let now = ctl
                    .session()
                    .and_then(|s| s.tree().item(section, item))
                    .and_then(|i| i.result);
                let shown = now.map_or_else(|| "unanswered".to_string(), |r| r.to_string());
                writeln!(
                    self.output,
                    "{}.{} {} ({}%)",
                    section + 1,
                    item + 1,
                    shown,
                    ctl.progress()
                )?;
            }
            ShellCommand::Note {
                section,
                item,
                text,
            } => ctl.set_item_notes(section, item, &text)?,
            ShellCommand::Toggle(section) => ctl.toggle_section(section)?,
            ShellCommand::Inspector(name) => ctl.set_inspector_name(&name)?,
            ShellCommand::Location(location) => ctl.set_location(&location)?,
            ShellCommand::Notes(notes) => ctl.set_additional_notes(&notes)?,
            ShellCommand::Date(date) => ctl.set_inspection_date(date)?,
            ShellCommand::Show => match ctl.session() {
                Some(session) => render_session(session, &mut self.output)?,
                None => writeln!(self.output, "no inspection in progress")?,
            },
            ShellCommand::Submit => {
                let record = ctl.submit_inspection()?;
                render_record(record, &mut self.output)?;
                let notices = self.notices.notifications();
                for notice in notices.iter().skip(self.shown_notices) {
                    writeln!(self.output, "{}", notice.message)?;
                }
                self.shown_notices = notices.len();
            }
            ShellCommand::Cancel => {
                if ctl.cancel_inspection() {
                    writeln!(self.output, "inspection discarded")?;
                } else {
                    writeln!(self.output, "no inspection in progress")?;
                }
            }
            ShellCommand::History => render_history(ctl.history(), &mut self.output)?,
            ShellCommand::Templates => {
                render_template_list(self.catalog.iter().map(|t| t.as_ref()), &mut self.output)?
            }
            ShellCommand::Help => writeln!(self.output, "{HELP}")?,
            ShellCommand::Back => ctl.exit(),
        }
        Ok(())
    }
}

/// Execute the session subcommand on stdin/stdout.
pub fn run_session(args: &SessionArgs, catalog: &TemplateCatalog, config: &CliConfig) -> Result<u8> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut shell = SessionShell::new(catalog, config, stdin.lock(), stdout.lock());
    if let Some(template) = &args.template {
        shell.execute(&format!("start {template}"))?;
    }
    shell.run()?;
    Ok(0)
}
