//! Prefix template engine.
//!
//! A prefix template describes how object keys are namespaced by time:
//! literal text interleaved with calendar placeholders delimited by `<` and
//! `>`, e.g. `client=1000/<yyyy-MM-dd>/hour=<HH>`. The template decides both
//! how a concrete prefix is rendered for an instant and how finely a query
//! window has to be walked.

mod format;
mod granularity;

pub use granularity::Granularity;

use chrono::{DateTime, Utc};

/// One tokenized piece of a prefix template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text copied through unchanged when rendering.
    Literal(String),
    /// A calendar format spec, the text between one `<`/`>` pair.
    Placeholder(String),
}

/// A tokenized prefix template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTemplate {
    segments: Vec<Segment>,
}

impl PrefixTemplate {
    /// Tokenize a raw template string.
    ///
    /// Splitting is mechanical on `<` and `>`: split positions alternate
    /// literal / placeholder, starting with a literal (empty when the
    /// template opens with `<`). Adjacent placeholders leave an empty
    /// literal between them. Unmatched delimiters are not rejected; the
    /// piece after a bare delimiter is still classified by its position.
    pub fn parse(raw: &str) -> Self {
        let segments = raw
            .split(['<', '>'])
            .enumerate()
            .map(|(i, part)| {
                if i % 2 == 1 {
                    Segment::Placeholder(part.to_string())
                } else {
                    Segment::Literal(part.to_string())
                }
            })
            .collect();

        Self { segments }
    }

    /// Render the concrete prefix for an instant.
    ///
    /// Literals pass through unchanged; placeholders go through calendar
    /// token substitution. Rendering is a pure function of the template and
    /// the instant.
    pub fn render(&self, instant: DateTime<Utc>) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Placeholder(spec) => format::substitute(spec, instant),
            })
            .collect()
    }

    /// Finest granularity implied by any placeholder.
    ///
    /// Starts at day and refines monotonically, so placeholder order never
    /// affects the result.
    pub fn granularity(&self) -> Granularity {
        let mut finest = Granularity::Day;
        for segment in &self.segments {
            if let Segment::Placeholder(spec) = segment {
                finest = finest.refine(granularity::of_spec(spec));
            }
        }
        finest
    }

    /// The tokenized segments in template order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether the template has no placeholders at all.
    ///
    /// A static template renders to itself and degenerates to a
    /// single-bucket query.
    pub fn is_static(&self) -> bool {
        self.segments
            .iter()
            .all(|segment| matches!(segment, Segment::Literal(_)))
    }
}

impl std::fmt::Display for PrefixTemplate {
    /// Re-joins the segments, re-inserting delimiters around placeholders.
    /// For well-formed templates this reproduces the original string.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => write!(f, "{}", text)?,
                Segment::Placeholder(spec) => write!(f, "<{}>", spec)?,
            }
        }
        Ok(())
    }
}
