//! Line range parsing, validation, and selection.
//!
//! Line numbers are zero-indexed and both bounds are inclusive. Lines are the
//! pieces of the decoded text between `\n` characters; `\r` is kept as part
//! of the line.

use crate::error::SliceError;

// =============================================================================
// Query Parameter Parsing
// =============================================================================

/// Parse a raw line-number query value.
///
/// Absent and empty values mean "not given". Anything else must be a base-10
/// integer (sign allowed); negative values are rejected later by
/// [`LineRange::from_params`] so the message can name the violated rule.
pub fn parse_line_param(label: &str, raw: Option<&str>) -> Result<Option<i64>, SliceError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(value) => value,
    };

    raw.parse::<i64>()
        .map(Some)
        .map_err(|_| SliceError::validation(format!("{label} line number must be an integer.")))
}

// =============================================================================
// LineRange
// =============================================================================

/// A validated, optionally bounded, inclusive line range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LineRange {
    /// First line to include
    pub start: Option<usize>,

    /// Last line to include
    pub end: Option<usize>,
}

/// Lines chosen by a [`LineRange`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedLines {
    /// Selected lines joined with `\n`
    pub content: String,

    /// Number of lines in the full text
    pub total_lines: usize,
}

impl LineRange {
    /// The unbounded range (whole file).
    pub const fn full() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Create a range without validation.
    pub const fn new(start: Option<usize>, end: Option<usize>) -> Self {
        Self { start, end }
    }

    /// Build a range from signed request values.
    ///
    /// Both values must be non-negative and, when both are present,
    /// `start <= end`.
    pub fn from_params(start: Option<i64>, end: Option<i64>) -> Result<Self, SliceError> {
        if matches!(start, Some(s) if s < 0) {
            return Err(SliceError::validation("Start line number must be positive."));
        }
        if matches!(end, Some(e) if e < 0) {
            return Err(SliceError::validation("End line number must be positive."));
        }
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(SliceError::validation(
                    "Start line number cannot be greater than End line number.",
                ));
            }
        }

        Ok(Self {
            start: start.map(to_index),
            end: end.map(to_index),
        })
    }

    /// Parse and validate raw query values in one step.
    pub fn from_query(start: Option<&str>, end: Option<&str>) -> Result<Self, SliceError> {
        let start = parse_line_param("Start", start)?;
        let end = parse_line_param("End", end)?;
        Self::from_params(start, end)
    }

    /// Whether no bound is set.
    pub fn is_full(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Select the lines of `text` covered by this range.
    ///
    /// - No bounds: the text is returned unchanged
    /// - Both bounds: out-of-range indices are clipped; an all-whitespace
    ///   result is [`SliceError::EmptyRange`]
    /// - End only: prefix up to and including `end`, clipped
    /// - Start only: suffix from `start`; a start past the line count is
    ///   [`SliceError::StartOutOfRange`]
    pub fn select(&self, text: &str) -> Result<SelectedLines, SliceError> {
        let lines: Vec<&str> = text.split('\n').collect();
        let total_lines = lines.len();

        let content = match (self.start, self.end) {
            (None, None) => text.to_string(),
            (Some(start), Some(end)) => {
                let content = clipped(&lines, start, end.saturating_add(1)).join("\n");
                if content.trim().is_empty() {
                    return Err(SliceError::EmptyRange {
                        start_line: start,
                        end_line: end,
                    });
                }
                content
            }
            (None, Some(end)) => clipped(&lines, 0, end.saturating_add(1)).join("\n"),
            (Some(start), None) => {
                if start > total_lines {
                    return Err(SliceError::StartOutOfRange {
                        start_line: start,
                        total_lines,
                    });
                }
                lines[start..].join("\n")
            }
        };

        Ok(SelectedLines {
            content,
            total_lines,
        })
    }
}

/// Slice `lines[from..to]`, clamping both ends to the available lines.
fn clipped<'a>(lines: &'a [&'a str], from: usize, to: usize) -> &'a [&'a str] {
    let to = to.min(lines.len());
    let from = from.min(to);
    &lines[from..to]
}

fn to_index(value: i64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

// =============================================================================
// Tests
// =============================================================================
