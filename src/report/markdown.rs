use crate::model::{FilteredRecord, MatchedEvent, Report, Result};
use itertools::Itertools;
use markdown_builder::Markdown;
use markdown_table::{Heading, HeadingAlignment, MarkdownTable};
use std::fs;
use std::path::PathBuf;

pub trait MarkdownReport {
    fn render_markdown(&self) -> String;
    fn report_write(&self, out_dir: &str) -> Result<PathBuf>;
}

impl MarkdownReport for Report {
    fn render_markdown(&self) -> String {
        let mut doc = Markdown::new();

        doc.header1(format!("{}: weekly activity", self.unit.name));
        doc.paragraph(format!(
            "Cycle **{}** ({} - {}), reporting window {} - {}.",
            self.cycle.name,
            self.cycle.start_date.format("%d.%m.%Y"),
            self.cycle.end_date.format("%d.%m.%Y"),
            self.window.start_date.format("%d.%m.%Y"),
            self.window.end_date.format("%d.%m.%Y"),
        ));
        doc.add_coverage(self);
        doc.add_contributors(self);

        doc.header2("Active records");
        for filtered in &self.filtered_records {
            doc.add_record(filtered);
        }

        doc.render()
    }

    fn report_write(&self, out_dir: &str) -> Result<PathBuf> {
        let path = PathBuf::from(out_dir).join(format!(
            "{}-{}.md",
            self.unit.name, self.window.start_date
        ));
        fs::write(&path, self.render_markdown())?;
        Ok(path)
    }
}

trait MarkdownExt {
    fn add_coverage(&mut self, report: &Report);
    fn add_contributors(&mut self, report: &Report);
    fn add_record(&mut self, filtered: &FilteredRecord);
}

impl MarkdownExt for Markdown {
    fn add_coverage(&mut self, report: &Report) {
        let mut line = format!(
            "Records in cycle: **{}**, fully fetched: **{}**, active in window: **{}**.",
            report.total_records_in_cycle,
            report.fetched_count,
            report.filtered_records.len(),
        );
        if !report.missing_ids.is_empty() {
            line.push_str(&format!(
                " ⚠️ Statistics are partial: {} record(s) could not be fetched after retries ({}).",
                report.missing_ids.len(),
                report.missing_ids.iter().join(", "),
            ));
        }
        self.paragraph(line);
    }

    fn add_contributors(&mut self, report: &Report) {
        self.header2("Contributors");
        if report.contributor_stats.is_empty() {
            self.paragraph("No in-window activity.".to_string());
            return;
        }

        let header = ["Contributor", "Total", "Closed", "Transitioned", "Commented", "PR activity", "Cycle moves"]
            .iter()
            .map(|h| Heading::new(h.to_string(), Some(HeadingAlignment::Center)))
            .collect::<Vec<_>>();
        let table = report
            .contributor_stats
            .iter()
            .map(|stat| {
                vec![
                    format!("**{}**", stat.author),
                    stat.event_count.to_string(),
                    stat.closed.to_string(),
                    stat.transitioned.to_string(),
                    stat.commented.to_string(),
                    stat.pr_activity.to_string(),
                    stat.cycle_membership_changed.to_string(),
                ]
            })
            .collect::<Vec<_>>();

        let mut md_table = MarkdownTable::new(table);
        md_table.with_headings(header);
        self.paragraph(md_table.as_markdown().unwrap());
    }

    fn add_record(&mut self, filtered: &FilteredRecord) {
        let events = filtered
            .matched_events
            .iter()
            .map(event_line)
            .join("\n");
        self.paragraph(format!(
            "**{}: {}**\n{}",
            filtered.record.id, filtered.record.title, events
        ));
    }
}

fn event_line(event: &MatchedEvent) -> String {
    let stamp = event.timestamp().format("%d.%m.%Y %H:%M");
    match event {
        MatchedEvent::Change(change) => format!(
            "- {} **{}** changed `{}`: {} → {}",
            stamp,
            change.author,
            change.field,
            change.old_value.as_deref().unwrap_or("(none)"),
            change.new_value.as_deref().unwrap_or("(none)"),
        ),
        MatchedEvent::Comment(comment) => {
            format!("- {} **{}** commented", stamp, comment.author)
        }
    }
}
