use ansi_term::{Colour, Style};

use crate::{
    catalog::AppCatalog,
    report::{ProcessUsage, UsageSummary},
    storage::AppTimeMap,
    tracker::events::{StatusChange, TrackerEvent},
    utils::time::format_clock,
};

const NAME_WIDTH: usize = 28;

/// One report line: icon, display name, time and share.
pub fn format_entry(entry: &ProcessUsage, catalog: &AppCatalog) -> String {
    format!(
        "{} {:<NAME_WIDTH$} {:>9} {:>7}",
        catalog.icon(&entry.process_name),
        catalog.display_name(&entry.process_name),
        format_clock(entry.seconds),
        entry.share.to_string(),
    )
}

pub fn print_summary(title: &str, summary: &UsageSummary, catalog: &AppCatalog) {
    println!("{}", Style::new().bold().underline().paint(title));
    if summary.entries.is_empty() {
        println!("{}", Colour::Fixed(244).paint("Nothing recorded"));
        println!();
        return;
    }

    println!(
        "Total {} across {} apps",
        Colour::Cyan.bold().paint(format_clock(summary.total_seconds)),
        summary.app_count
    );
    if let Some(top) = summary.most_used() {
        println!(
            "Most used {} {}",
            catalog.icon(&top.process_name),
            Colour::Green.paint(catalog.display_name(&top.process_name))
        );
    }
    for entry in &summary.entries {
        println!("  {}", format_entry(entry, catalog));
    }
    println!();
}

pub fn print_dates(dates: &[String]) {
    if dates.is_empty() {
        println!("{}", Colour::Fixed(244).paint("Nothing recorded yet"));
    }
    for date in dates {
        println!("{date}");
    }
}

/// Writes tracker notifications to the console while `track` runs.
pub struct EventPrinter<'a> {
    catalog: &'a AppCatalog,
    last_times: AppTimeMap,
}

impl<'a> EventPrinter<'a> {
    pub fn new(catalog: &'a AppCatalog) -> Self {
        Self {
            catalog,
            last_times: AppTimeMap::new(),
        }
    }

    pub fn print(&mut self, event: TrackerEvent) {
        match event {
            TrackerEvent::ActivityChanged {
                process_name,
                window_title,
            } => println!(
                "{} {} {}",
                self.catalog.icon(&process_name),
                Colour::Green.paint(self.catalog.display_name(&process_name)),
                Colour::Fixed(244).paint(window_title)
            ),
            TrackerEvent::TimeUpdated(times) => self.last_times = times,
            TrackerEvent::StatusChanged(status) => {
                let colour = match status {
                    StatusChange::Resumed | StatusChange::PrivateBrowsingEnded => Colour::Green,
                    StatusChange::Paused | StatusChange::PrivateBrowsingDetected => Colour::Yellow,
                    StatusChange::Stopped => Colour::Red,
                };
                println!("{}", colour.bold().paint(format!("[{status}]")));
            }
        }
    }

    /// Totals carried by the latest time update.
    pub fn last_times(&self) -> &AppTimeMap {
        &self.last_times
    }
}
