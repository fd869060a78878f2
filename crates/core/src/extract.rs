//! Report extractors.
//!
//! Each extractor is a total function from report text to an optional
//! metric. A missing marker, a malformed number or a non-finite value all
//! yield `None`; nothing here returns an error.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

/// Text-to-metric scraper.
pub type Extractor = fn(&str) -> Option<f64>;

/// Marker on the synthesis statistics line that carries the total area.
pub const AREA_MARKER: &str = "Chip area for module";
/// Token identifying the candidate line in a timing report.
pub const SLACK_TOKEN: &str = "slack";
/// Label printed by testbenches before the functionality score.
pub const FUNC_SCORE_MARKER: &str = "FUNC_SCORE:";

fn period_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-period\s+([\d.]+)").expect("valid period regex"))
}

fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\d.]+").expect("valid number regex"))
}

fn func_score_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"FUNC_SCORE:\s*([0-9]*\.?[0-9]+)").expect("valid func score regex")
    })
}

fn finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read a report leniently; unreadable files scan as empty text.
pub fn read_report(path: &Path) -> String {
    fs::read(path).map(|bytes| String::from_utf8_lossy(&bytes).to_string()).unwrap_or_default()
}

/// Run `extractor` over the file at `path`, treating a missing file as no signal.
pub fn extract_from_file(path: &Path, extractor: Extractor) -> Option<f64> {
    let value = extractor(&read_report(path));
    debug!(report = %path.display(), ?value, "extracted metric");
    value
}

/// First `-period <n>` value in a constraints file.
pub fn parse_period(text: &str) -> Option<f64> {
    period_re().captures(text).and_then(|caps| finite(&caps[1]))
}

/// Total area from a synthesis statistics report.
///
/// The first marker line carrying a number wins; the value is the last
/// number on that line.
pub fn parse_area(text: &str) -> Option<f64> {
    text.lines().filter(|line| line.contains(AREA_MARKER)).find_map(|line| {
        number_re().find_iter(line).filter_map(|m| finite(m.as_str())).last()
    })
}

/// Worst negative slack from a timing report.
///
/// Only the first line mentioning `slack` is consulted; its first numeric
/// token (after dropping parentheses) is the answer.
pub fn parse_wns(text: &str) -> Option<f64> {
    let line = text.lines().find(|line| line.contains(SLACK_TOKEN))?;
    line.replace(['(', ')'], " ").split_whitespace().find_map(finite)
}

/// Functionality score printed by the testbench, clamped into `[0, 1]`.
pub fn parse_func_score(text: &str) -> Option<f64> {
    let raw = func_score_re().captures(text).and_then(|caps| finite(&caps[1]))?;
    let clamped = raw.clamp(0.0, 1.0);
    if clamped != raw {
        warn!(reported = raw, clamped, "functionality score out of range; clamped");
    }
    Some(clamped)
}
