//! # Text Rendering
//!
//! Plain-text views of templates, the session in progress and completed
//! records. Items are numbered `section.item` from 1, matching the indices
//! accepted by `insp run` answer files and the session shell.

use std::io::{self, Write};

use insp_catalog::ChecklistTemplate;
use insp_state::{ActiveSession, CompletedInspection, HistorySummary, ItemResult};

/// One-line summary per template.
pub fn render_template_list<'a, W: Write>(
    templates: impl IntoIterator<Item = &'a ChecklistTemplate>,
    out: &mut W,
) -> io::Result<()> {
    for t in templates {
        writeln!(
            out,
            "{:<28} {:<36} {} sections, {} items",
            t.id,
            t.title,
            t.section_count(),
            t.item_count()
        )?;
    }
    Ok(())
}

/// Full listing of one template.
pub fn render_template<W: Write>(template: &ChecklistTemplate, out: &mut W) -> io::Result<()> {
    writeln!(out, "{} ({})", template.title, template.id)?;
    if !template.regulation.is_empty() {
        writeln!(out, "Regulation: {}", template.regulation)?;
    }
    if !template.description.is_empty() {
        writeln!(out, "{}", template.description)?;
    }
    for (s, section) in template.sections.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "{}. {}", s + 1, section.title)?;
        for (i, text) in section.items.iter().enumerate() {
            writeln!(out, "  {}.{} {}", s + 1, i + 1, text)?;
        }
    }
    Ok(())
}

fn result_tag(result: Option<ItemResult>) -> String {
    match result {
        Some(r) => format!("[{r:^4}]"),
        None => "[    ]".to_string(),
    }
}

/// The session in progress: header fields, then each section. Collapsed
/// sections show only their tally.
pub fn render_session<W: Write>(session: &ActiveSession, out: &mut W) -> io::Result<()> {
    let counts = session.counts();
    writeln!(
        out,
        "{} ({}) {}",
        session.template_title(),
        session.template_id(),
        session.date()
    )?;
    writeln!(out, "Inspector: {}", display_or_dash(session.inspector_name()))?;
    writeln!(out, "Location:  {}", display_or_dash(session.location()))?;
    writeln!(
        out,
        "Progress:  {}% ({}/{} answered)",
        counts.progress(),
        counts.answered,
        counts.total
    )?;

    for (s, section) in session.tree().sections().iter().enumerate() {
        let sc = section.counts();
        let marker = if section.expanded { "-" } else { "+" };
        writeln!(
            out,
            "{marker} {}. {} ({}/{})",
            s + 1,
            section.title,
            sc.answered,
            sc.total
        )?;
        if !section.expanded {
            continue;
        }
        for (i, item) in section.items.iter().enumerate() {
            writeln!(
                out,
                "    {}.{} {} {}",
                s + 1,
                i + 1,
                result_tag(item.result),
                item.text
            )?;
            if !item.notes.is_empty() {
                writeln!(out, "          note: {}", item.notes)?;
            }
        }
    }
    if !session.additional_notes().is_empty() {
        writeln!(out, "Notes: {}", session.additional_notes())?;
    }
    Ok(())
}

/// A completed inspection, failures listed with their notes.
pub fn render_record<W: Write>(record: &CompletedInspection, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}: {}", record.template_title, record.overall_result)?;
    writeln!(out, "  Inspection: {}", record.id)?;
    writeln!(out, "  Template:   {}", record.template_id)?;
    if !record.regulation.is_empty() {
        writeln!(out, "  Regulation: {}", record.regulation)?;
    }
    writeln!(out, "  Inspector:  {}", record.inspector_name)?;
    writeln!(out, "  Location:   {}", display_or_dash(&record.location))?;
    writeln!(out, "  Date:       {}", record.date)?;
    writeln!(
        out,
        "  Results:    {} pass, {} fail, {} n/a of {} items",
        record.pass_count, record.fail_count, record.na_count, record.total_items
    )?;

    let failed = record.failed_items();
    if !failed.is_empty() {
        writeln!(out, "Failed items:")?;
        for (section, item) in failed {
            write!(out, "  {} / {}", section.title, item.text)?;
            if item.notes.is_empty() {
                writeln!(out)?;
            } else {
                writeln!(out, ": {}", item.notes)?;
            }
        }
    }
    if !record.additional_notes.is_empty() {
        writeln!(out, "Notes: {}", record.additional_notes)?;
    }
    Ok(())
}

/// One line per record, most recent first, followed by totals.
pub fn render_history<W: Write>(records: &[CompletedInspection], out: &mut W) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "No completed inspections.");
    }
    for r in records {
        writeln!(
            out,
            "{}  {}  {:<8} {}  {}",
            r.id,
            r.date,
            r.overall_result.to_string(),
            r.template_title,
            r.inspector_name
        )?;
    }
    let summary = HistorySummary::from_records(records);
    writeln!(
        out,
        "{} total: {} pass, {} fail, {} advisory",
        summary.total, summary.passed, summary.failed, summary.advisory
    )
}

fn display_or_dash(s: &str) -> &str {
    if s.trim().is_empty() {
        "-"
    } else {
        s
    }
}
