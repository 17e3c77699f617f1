//! Code preservation: marker-delimited regions that survive regeneration.
//!
//! # Marker grammar
//!
//! A begin line contains `BEGIN:<block_name>` and a later line contains
//! `END:<block_name>` with the same name. Anything may precede the token
//! on the line (comment leaders like `# ` or `// `), so the same grammar
//! works in any generated language. Preserved content is everything
//! strictly between the two marker lines; the marker lines themselves are
//! never altered.
//!
//! # Pairing
//!
//! Extraction is an explicit two-pass scan: first locate every marker
//! line, then pair begin/end by name. A name with more than one begin or
//! end, an end with no begin, or a begin with no end produces a
//! [`PreservationWarning`] and that block is simply not preserved —
//! nested or out-of-order same-name markers are not well-defined, so the
//! engine refuses to guess.
//!
//! # Contract
//!
//! For every block name common to both files,
//! `extract(inject(new_render, extract(old)))` equals `extract(old)`:
//! regeneration never loses a previously preserved edit.

use std::collections::BTreeMap;

use thiserror::Error;

/// Token opening a preserved block, followed by the block name.
pub const BEGIN_TOKEN: &str = "BEGIN:";
/// Token closing a preserved block, followed by the same name.
pub const END_TOKEN: &str = "END:";

/// Non-fatal finding from a marker scan. The affected block is treated
/// as not-preserved; generation continues.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreservationWarning {
    #[error("block '{name}' has more than one begin/end marker; not preserved")]
    DuplicateBlock { name: String },

    #[error("end marker '{name}' has no matching begin marker")]
    UnmatchedEnd { name: String },

    #[error("begin marker '{name}' has no matching end marker")]
    UnterminatedBlock { name: String },

    #[error("markers for block '{name}' are out of order; not preserved")]
    OutOfOrder { name: String },
}

/// Result of scanning one existing file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Block name → preserved text (lines strictly between the markers,
    /// joined with `\n`; empty string for an empty region).
    pub blocks: BTreeMap<String, String>,
    pub warnings: Vec<PreservationWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerKind {
    Begin,
    End,
}

/// One marker line found during the first pass.
#[derive(Debug, Clone)]
struct MarkerLine {
    line_idx: usize,
    kind: MarkerKind,
    name: String,
}

/// A validated begin/end pair (second pass output).
#[derive(Debug, Clone)]
struct BlockSpan {
    name: String,
    begin: usize,
    end: usize,
}

/// First pass: locate every marker line.
fn scan_markers(lines: &[&str]) -> Vec<MarkerLine> {
    let mut markers = Vec::new();
    for (line_idx, line) in lines.iter().enumerate() {
        // BEGIN: is checked first; the two tokens cannot occur in the
        // same position since neither is a substring of the other.
        if let Some(pos) = line.find(BEGIN_TOKEN) {
            if let Some(name) = marker_name(&line[pos + BEGIN_TOKEN.len()..]) {
                markers.push(MarkerLine {
                    line_idx,
                    kind: MarkerKind::Begin,
                    name,
                });
                continue;
            }
        }
        if let Some(pos) = line.find(END_TOKEN) {
            if let Some(name) = marker_name(&line[pos + END_TOKEN.len()..]) {
                markers.push(MarkerLine {
                    line_idx,
                    kind: MarkerKind::End,
                    name,
                });
            }
        }
    }
    markers
}

/// The block name is the first whitespace-delimited word after the token,
/// so trailing comment closers (`-->`, `*/`) don't leak into the name.
fn marker_name(rest: &str) -> Option<String> {
    rest.split_whitespace().next().map(str::to_string)
}

/// Second pass: pair begins and ends by name.
fn pair_markers(markers: &[MarkerLine]) -> (Vec<BlockSpan>, Vec<PreservationWarning>) {
    let mut by_name: BTreeMap<&str, (Vec<usize>, Vec<usize>)> = BTreeMap::new();
    for marker in markers {
        let entry = by_name.entry(&marker.name).or_default();
        match marker.kind {
            MarkerKind::Begin => entry.0.push(marker.line_idx),
            MarkerKind::End => entry.1.push(marker.line_idx),
        }
    }

    let mut spans = Vec::new();
    let mut warnings = Vec::new();

    for (name, (begins, ends)) in by_name {
        match (begins.as_slice(), ends.as_slice()) {
            ([begin], [end]) if begin < end => spans.push(BlockSpan {
                name: name.to_string(),
                begin: *begin,
                end: *end,
            }),
            ([begin], [end]) if begin >= end => {
                warnings.push(PreservationWarning::OutOfOrder { name: name.into() });
            }
            ([_], []) => {
                warnings.push(PreservationWarning::UnterminatedBlock { name: name.into() });
            }
            ([], [_]) => {
                warnings.push(PreservationWarning::UnmatchedEnd { name: name.into() });
            }
            _ => {
                warnings.push(PreservationWarning::DuplicateBlock { name: name.into() });
            }
        }
    }

    spans.sort_by_key(|s| s.begin);
    (spans, warnings)
}

/// Scan `existing` for all well-formed marker pairs.
///
/// Always called on the on-disk file *before* it is overwritten (in clean
/// mode, on the pre-clean snapshot).
pub fn extract(existing: &str) -> Extraction {
    let lines: Vec<&str> = existing.lines().collect();
    let markers = scan_markers(&lines);
    let (spans, warnings) = pair_markers(&markers);

    let mut blocks = BTreeMap::new();
    for span in spans {
        let body = lines[span.begin + 1..span.end].join("\n");
        blocks.insert(span.name, body);
    }

    Extraction { blocks, warnings }
}

/// Replace the default bodies in freshly `rendered` text with preserved
/// ones.
///
/// For every well-formed marker pair in `rendered` whose name exists in
/// `preserved`, the rendered default between the markers is replaced by
/// the preserved text. Blocks absent from `preserved` (first-time
/// generation) keep their rendered default. Marker lines pass through
/// untouched.
pub fn inject(rendered: &str, preserved: &BTreeMap<String, String>) -> String {
    let lines: Vec<&str> = rendered.lines().collect();
    let markers = scan_markers(&lines);
    let (spans, _warnings) = pair_markers(&markers);

    // Only replace pairs that do not overlap an earlier one; overlapping
    // spans would mean nested markers, which pairing already refuses.
    let mut replaced: Vec<&BlockSpan> = Vec::new();
    for span in &spans {
        let overlaps = replaced
            .last()
            .is_some_and(|prev: &&BlockSpan| span.begin <= prev.end);
        if !overlaps && preserved.contains_key(&span.name) {
            replaced.push(span);
        }
    }

    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    let mut cursor = 0usize;
    for span in replaced {
        // Everything up to and including the begin marker line.
        out.extend(&lines[cursor..=span.begin]);
        let body = &preserved[&span.name];
        if !body.is_empty() {
            out.extend(body.lines());
        }
        cursor = span.end; // end marker line is emitted by the next slice
    }
    out.extend(&lines[cursor..]);

    let mut text = out.join("\n");
    if rendered.ends_with('\n') {
        text.push('\n');
    }
    text
}
