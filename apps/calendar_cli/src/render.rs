//! Plain-text rendering of calendar views.

use std::fmt::Write;

use calendar_core::{
    format::{format_release_date, month_title, release_badge, weekday_labels},
    grid::rows,
    FilterFacets, WeekStart,
};
use chrono::Datelike;
use shared::{
    domain::{MovieRelease, YearMonth},
    protocol::{CalendarCell, GridView, ReleaseListView, ViewStatus},
};

const CELL_WIDTH: usize = 5;

/// Renders the month as rows of seven cells. `*` marks the selected day,
/// `+` a day with releases and `<` today.
pub fn render_grid(grid: &GridView, week_start: WeekStart) -> String {
    let mut out = String::new();
    let width = CELL_WIDTH * 7;
    let _ = writeln!(out, "{:^width$}", month_title(grid.month));
    for label in weekday_labels(week_start) {
        let _ = write!(out, "{label:>4} ");
    }
    out.truncate(out.trim_end().len());
    out.push('\n');

    for row in rows(&grid.cells) {
        let line: String = row.iter().map(render_cell).collect();
        let _ = writeln!(out, "{}", line.trim_end());
    }

    if let Some(note) = status_note(&grid.status) {
        let _ = writeln!(out, "{note}");
    }
    out
}

fn render_cell(cell: &CalendarCell) -> String {
    let Some(date) = cell.date else {
        return " ".repeat(CELL_WIDTH);
    };
    let marker = if cell.is_selected {
        '*'
    } else if !cell.releases.is_empty() {
        '+'
    } else {
        ' '
    };
    let today = if cell.is_today { '<' } else { ' ' };
    format!("{:>3}{marker}{today}", date.day())
}

pub fn render_list(list: &ReleaseListView, month: YearMonth) -> String {
    let mut out = String::new();
    let heading = match list.selected_date {
        Some(date) => format!("Releases on {}", format_release_date(date)),
        None => format!("Releases in {}", month_title(month)),
    };
    let _ = writeln!(out, "{heading}");

    if let Some(note) = status_note(&list.status) {
        let _ = writeln!(out, "{note}");
        return out;
    }
    if list.is_empty_result() {
        let _ = writeln!(out, "No releases match the current filters.");
        return out;
    }
    for release in &list.releases {
        let _ = writeln!(out, "{}", render_release(release));
    }
    out
}

fn render_release(release: &MovieRelease) -> String {
    let mut line = format!(
        "  {:<14} {} [{}]",
        format_release_date(release.release_date),
        release.title,
        release_badge(release.release_type)
    );
    if let Some(platform) = &release.platform_name {
        let _ = write!(line, " on {platform}");
    }
    if !release.languages.is_empty() {
        let languages: Vec<&str> = release.languages.iter().map(String::as_str).collect();
        let _ = write!(line, " ({})", languages.join(", "));
    }
    if let Some(score) = release.score {
        let _ = write!(line, " score {score:.1}");
    }
    line
}

pub fn render_facets(facets: &FilterFacets) -> String {
    let mut out = String::new();
    for (name, values) in [
        ("languages", &facets.languages),
        ("genres", &facets.genres),
        ("countries", &facets.countries),
    ] {
        let values: Vec<&str> = values.iter().map(String::as_str).collect();
        let _ = writeln!(out, "{name}: {}", values.join(", "));
    }
    out
}

fn status_note(status: &ViewStatus) -> Option<String> {
    match status {
        ViewStatus::Loading => Some("Loading releases...".to_string()),
        ViewStatus::Ready => None,
        ViewStatus::Failed { message } => Some(format!("Could not load releases: {message}")),
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
