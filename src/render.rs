//! Terminal rendering of lookup outcomes.

use crate::lookup::{DetailOutcome, DetailRecord, NetworkFailure, SearchOutcome, SearchResultSet};
use std::fmt::Write;
use yansi::Paint;

pub const DETAILS_FAILURE_MESSAGE: &str = "Error. Something went wrong!";

/// Render a search outcome as the text of the result grid.
pub fn render_search(outcome: &SearchOutcome, default_poster: &str) -> String {
    match outcome {
        SearchOutcome::Success {
            results,
            from_cache,
        } => render_results(results, *from_cache, default_poster),
        SearchOutcome::EmptyResult => format!("{}", "No results found".yellow()),
        SearchOutcome::ApiError(message) => format!("{}", message.red()),
        SearchOutcome::NetworkError(failure) => format!("{}", network_message(failure).red()),
        SearchOutcome::ValidationError { min_length } => format!(
            "{}",
            format!("Invalid input: empty or shorter than {min_length} characters").red()
        ),
    }
}

fn network_message(failure: &NetworkFailure) -> String {
    match failure {
        NetworkFailure::Timeout => "Request timed out".to_owned(),
        NetworkFailure::Status(status) => {
            format!("Error returning results. Server returned: {status}")
        }
        NetworkFailure::Other(reason) => format!("Error returning results: {reason}"),
    }
}

fn render_results(set: &SearchResultSet, from_cache: bool, default_poster: &str) -> String {
    let mut out = String::new();
    let source = if from_cache { " (cached)" } else { "" };
    let _ = writeln!(
        out,
        "{} result(s) for {}{}",
        set.len(),
        format!("\"{}\"", set.query).bold(),
        source.dim()
    );
    for result in &set.results {
        let poster = result.poster_url.as_deref().unwrap_or(default_poster);
        let _ = writeln!(
            out,
            "  {}  {}  [{}]  {}",
            result.id.dim(),
            result.title.bold(),
            result.kind,
            poster.dim()
        );
    }
    out.truncate(out.trim_end().len());
    out
}

/// Render the detail panel for a hovered result.
pub fn render_details(outcome: &DetailOutcome) -> String {
    match outcome.record() {
        Some(record) => render_record(record),
        None => format!("{}", DETAILS_FAILURE_MESSAGE.red()),
    }
}

fn render_record(record: &DetailRecord) -> String {
    let mut lines = Vec::new();
    if let Some(title) = &record.title {
        lines.push(format!("Title: {}", title.bold()));
    }
    if let Some(year) = &record.year {
        lines.push(format!("Year: {year}"));
    }
    if let Some(director) = &record.director {
        lines.push(format!("Director: {director}"));
    }
    if let Some(rating) = record.primary_rating() {
        lines.push(format!("RatingSystem: {}", rating.source));
        lines.push(format!("Rating: {}", rating.value));
    }
    lines.join("\n")
}
