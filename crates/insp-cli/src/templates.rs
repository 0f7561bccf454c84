//! # Templates Subcommand
//!
//! - `list` prints one line per template in the catalog.
//! - `show <id>` prints every section and item of one template. The query
//!   may be an id, a title or a unique id prefix.

use std::io::Write;

use anyhow::Result;
use clap::{Args, Subcommand};

use insp_catalog::TemplateCatalog;

use crate::report::{render_template, render_template_list};

/// Arguments for the `insp templates` subcommand.
#[derive(Args, Debug)]
pub struct TemplatesArgs {
    #[command(subcommand)]
    pub command: TemplatesCommand,
}

/// Template subcommands.
#[derive(Subcommand, Debug)]
pub enum TemplatesCommand {
    /// List available templates.
    List,
    /// Show the sections and items of one template.
    Show {
        /// Template id, title or unique id prefix.
        #[arg(value_name = "TEMPLATE")]
        id: String,
    },
}

/// Execute the templates subcommand. Returns exit code 0.
pub fn run_templates(args: &TemplatesArgs, catalog: &TemplateCatalog) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_templates(args, catalog, &mut out)?;
    out.flush()?;
    Ok(0)
}

fn write_templates<W: Write>(
    args: &TemplatesArgs,
    catalog: &TemplateCatalog,
    out: &mut W,
) -> Result<()> {
    match &args.command {
        TemplatesCommand::List => {
            render_template_list(catalog.iter().map(|t| t.as_ref()), out)?;
        }
        TemplatesCommand::Show { id } => {
            let template = catalog.resolve(id)?;
            render_template(template, out)?;
        }
    }
    Ok(())
}
