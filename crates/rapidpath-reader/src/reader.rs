//! Program Reader
//!
//! Line-oriented scanner for G-code text. Each line is stripped of
//! comments, split on whitespace into words, and each word is read as an
//! address letter followed by a number.
//!
//! - Height words (`Z` by default) contribute to the height set whenever
//!   their value parses, whatever the motion mode.
//! - A line is a rapid move when it carries a `G0`/`G00` word, or, with
//!   `modal_rapids` enabled, when it carries no motion word and the last
//!   motion word seen was `G0`.
//! - A rapid line yields a travel point only if both `X` and `Y` parsed on
//!   that line; later words on the line override earlier ones.

use crate::scan::ProgramScan;
use rapidpath_core::data::canonical_bits;
use rapidpath_core::Point2D;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::{self, BufRead};
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Reader configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderSettings {
    /// Treat coordinate-only lines as rapids while G0 is the active motion mode
    pub modal_rapids: bool,
    /// Address letter of the vertical axis
    pub height_axis: char,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            modal_rapids: false,
            height_axis: 'Z',
        }
    }
}

/// Scanner for G-code program text
#[derive(Debug, Clone, Default)]
pub struct ProgramReader {
    settings: ReaderSettings,
}

/// Motion mode selected by a G word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    Rapid,
    Other,
}

/// Per-line parse result
#[derive(Debug, Default)]
struct LineWords {
    motion: Option<Motion>,
    x: Option<f64>,
    y: Option<f64>,
}

/// Accumulates results across lines
#[derive(Debug, Default)]
struct ScanState {
    scan: ProgramScan,
    seen_heights: HashSet<u64>,
    modal_motion: Option<Motion>,
}

impl ProgramReader {
    /// Create a reader with the given settings
    pub fn new(settings: ReaderSettings) -> Self {
        Self { settings }
    }

    /// Active settings
    pub fn settings(&self) -> &ReaderSettings {
        &self.settings
    }

    /// Scan a buffered source line by line
    ///
    /// # Errors
    /// Propagates read errors from the source, including invalid UTF-8.
    pub fn read<R: BufRead>(&self, reader: R) -> io::Result<ProgramScan> {
        let mut state = ScanState::default();
        for line in reader.lines() {
            self.scan_line(&line?, &mut state);
        }
        Ok(self.finish(state))
    }

    /// Scan program text held in memory
    pub fn scan_str(&self, text: &str) -> ProgramScan {
        let mut state = ScanState::default();
        for line in text.lines() {
            self.scan_line(line, &mut state);
        }
        self.finish(state)
    }

    fn finish(&self, state: ScanState) -> ProgramScan {
        let scan = state.scan;
        debug!(
            "Scanned {} lines: {} rapid lines, {} travel points, {} distinct heights",
            scan.stats.lines_read,
            scan.stats.rapid_lines,
            scan.travel_points.len(),
            scan.heights.len()
        );
        if scan.stats.skipped_tokens > 0 {
            warn!(
                "Skipped {} tokens with unparsable values",
                scan.stats.skipped_tokens
            );
        }
        scan
    }

    fn scan_line(&self, line: &str, state: &mut ScanState) {
        state.scan.stats.lines_read += 1;

        let cleaned = remove_comments(line);
        let height_axis = self.settings.height_axis.to_ascii_uppercase();
        let mut words = LineWords::default();

        for word in cleaned.split_whitespace() {
            let mut chars = word.chars();
            let Some(letter) = chars.next() else {
                continue;
            };
            let letter = letter.to_ascii_uppercase();
            let value = chars.as_str();

            if letter == height_axis {
                match value.parse::<f64>() {
                    Ok(height) => {
                        if state.seen_heights.insert(canonical_bits(height)) {
                            state.scan.heights.push(height);
                        }
                    }
                    Err(_) => state.scan.stats.skipped_tokens += 1,
                }
                continue;
            }

            match letter {
                'G' => match parse_motion(value) {
                    Some(Some(motion)) => words.motion = Some(motion),
                    Some(None) => {}
                    None => state.scan.stats.skipped_tokens += 1,
                },
                'X' => match value.parse::<f64>() {
                    Ok(x) => words.x = Some(x),
                    Err(_) => state.scan.stats.skipped_tokens += 1,
                },
                'Y' => match value.parse::<f64>() {
                    Ok(y) => words.y = Some(y),
                    Err(_) => state.scan.stats.skipped_tokens += 1,
                },
                _ => {}
            }
        }

        let is_rapid = match words.motion {
            Some(motion) => {
                state.modal_motion = Some(motion);
                motion == Motion::Rapid
            }
            None => self.settings.modal_rapids && state.modal_motion == Some(Motion::Rapid),
        };

        if !is_rapid {
            return;
        }

        if words.motion.is_some() || words.x.is_some() || words.y.is_some() {
            state.scan.stats.rapid_lines += 1;
        }

        if let (Some(x), Some(y)) = (words.x, words.y) {
            state.scan.travel_points.push(Point2D::new(x, y));
        }
    }
}

/// Strip `(...)` and `;...` comments
fn remove_comments(line: &str) -> std::borrow::Cow<'_, str> {
    static COMMENT_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = COMMENT_REGEX
        .get_or_init(|| Regex::new(r"\([^)]*\)?|;.*").expect("invalid regex pattern"));
    regex.replace_all(line, " ")
}

/// Classify a G word value
///
/// `None` when the value does not parse, `Some(None)` for G codes outside
/// the motion group, `Some(Some(_))` for G0 through G3.
fn parse_motion(value: &str) -> Option<Option<Motion>> {
    let code = value.parse::<f64>().ok()?;
    Some(match code {
        c if c == 0.0 => Some(Motion::Rapid),
        c if c == 1.0 || c == 2.0 || c == 3.0 => Some(Motion::Other),
        _ => None,
    })
}
