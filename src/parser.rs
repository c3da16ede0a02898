use crate::entity::Block;
use crate::entity::Span;
use crate::entity::SpanSeq;

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take, take_until},
    character::complete::{line_ending, not_line_ending},
    combinator::{eof, map, rest},
    multi::many0,
    sequence::{delimited, terminated, tuple},
    IResult,
};

/// An untyped run of lines between two block boundaries, tagged with the
/// index of its first line. The line index is what lets the classifier
/// tell a blank-line split from a marker split after the separators
/// themselves have been dropped.
#[derive(Clone, Debug, PartialEq)]
struct Segment {
    line: usize,
    text: String,
}

fn is_list_line(line: &str) -> bool {
    line.starts_with("* ") || line.starts_with("- ")
}

fn push_segment(segments: &mut Vec<Segment>, start: usize, lines: &mut Vec<&str>) {
    if lines.iter().any(|line| !line.trim().is_empty()) {
        segments.push(Segment {
            line: start,
            text: lines.join("\n"),
        });
    }
    lines.clear();
}

// Boundaries are code fences, blank lines, heading lines and bullet lines.
// A fence swallows everything through its closing marker (or end of input),
// a heading is always a segment of its own, consecutive bullet lines stay
// together, and whitespace-only runs are dropped rather than emitted.
fn segment(i: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut start = 0;
    let mut in_fence = false;
    let mut list_run = false;

    for (idx, line) in i.lines().enumerate() {
        let trimmed = line.trim();
        if in_fence {
            current.push(line);
            if trimmed.starts_with("```") {
                push_segment(&mut segments, start, &mut current);
                in_fence = false;
            }
        } else if trimmed.starts_with("```") {
            push_segment(&mut segments, start, &mut current);
            start = idx;
            current.push(line);
            in_fence = true;
            list_run = false;
        } else if trimmed.is_empty() {
            push_segment(&mut segments, start, &mut current);
            list_run = false;
        } else if trimmed.starts_with('#') {
            push_segment(&mut segments, start, &mut current);
            segments.push(Segment {
                line: idx,
                text: line.to_string(),
            });
            list_run = false;
        } else if is_list_line(trimmed) {
            if !list_run {
                push_segment(&mut segments, start, &mut current);
                start = idx;
            }
            current.push(line);
            list_run = true;
        } else {
            if list_run || current.is_empty() {
                push_segment(&mut segments, start, &mut current);
                start = idx;
            }
            current.push(line);
            list_run = false;
        }
    }
    push_segment(&mut segments, start, &mut current);
    segments
}

fn parse_bold(i: &str) -> IResult<&str, &str> {
    delimited(tag("**"), is_not("*"), tag("**"))(i)
}

fn parse_inline_code(i: &str) -> IResult<&str, &str> {
    delimited(tag("`"), is_not("`"), tag("`"))(i)
}

fn parse_plaintext(i: &str) -> IResult<&str, &str> {
    is_not("*`")(i)
}

// the take(1) arm keeps unmatched delimiters as literal text instead of
// failing the whole line
fn parse_span(i: &str) -> IResult<&str, Span> {
    alt((
        map(parse_bold, |s: &str| Span::Bold(s.to_string())),
        map(parse_inline_code, |s: &str| Span::InlineCode(s.to_string())),
        map(parse_plaintext, |s: &str| Span::Plaintext(s.to_string())),
        map(take(1u8), |s: &str| Span::Plaintext(s.to_string())),
    ))(i)
}

/// Tokenize one block-delimiter-stripped line into inline spans.
/// Left-to-right and greedy; concatenating the span texts gives back the
/// line minus the `**` and backtick delimiters.
pub fn parse_line(i: &str) -> SpanSeq {
    let raw = many0(parse_span)(i).map(|(_, spans)| spans).unwrap_or_default();
    let mut spans: SpanSeq = Vec::new();
    for span in raw {
        match (spans.pop(), span) {
            (Some(Span::Plaintext(mut head)), Span::Plaintext(tail)) => {
                head.push_str(&tail);
                spans.push(Span::Plaintext(head));
            }
            (previous, span) => {
                if let Some(previous) = previous {
                    spans.push(previous);
                }
                spans.push(span);
            }
        }
    }
    spans
}

fn parse_code_block(i: &str) -> IResult<&str, (&str, &str)> {
    let opening = delimited(tag("```"), not_line_ending, alt((line_ending, eof)));
    let body = alt((
        terminated(take_until("```"), tuple((tag("```"), rest))),
        rest,
    ));
    tuple((opening, body))(i)
}

fn flush_paragraph(pending: &mut Vec<String>) -> Option<Block> {
    let lines: Vec<SpanSeq> = pending
        .drain(..)
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .map(|line| parse_line(&line))
        .collect();
    if lines.is_empty() {
        None
    } else {
        Some(Block::Paragraph(lines))
    }
}

fn flush_into(pending: &mut Vec<String>, blocks: &mut Vec<Block>) {
    if let Some(paragraph) = flush_paragraph(pending) {
        blocks.push(paragraph);
    }
}

/// Parse a whole document. Total over any input: malformed markdown falls
/// through to paragraph text, an unterminated fence runs to end of input,
/// and the empty string yields no blocks.
pub fn parse_markdown(i: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut pending: Vec<String> = Vec::new();
    let mut pending_end = 0;
    for seg in segment(i) {
        let t = seg.text.trim();
        if t.starts_with("```") {
            flush_into(&mut pending, &mut blocks);
            if let Ok((_, (language, content))) = parse_code_block(t) {
                blocks.push(Block::Codeblock(
                    language.trim().to_string(),
                    content.trim().to_string(),
                ));
            }
        } else if let Some(text) = t.strip_prefix("### ") {
            flush_into(&mut pending, &mut blocks);
            blocks.push(Block::Heading(3, text.to_string()));
        } else if let Some(text) = t.strip_prefix("## ") {
            flush_into(&mut pending, &mut blocks);
            blocks.push(Block::Heading(2, text.to_string()));
        } else if let Some(text) = t.strip_prefix("# ") {
            flush_into(&mut pending, &mut blocks);
            blocks.push(Block::Heading(1, text.to_string()));
        } else if is_list_line(t) {
            flush_into(&mut pending, &mut blocks);
            let items: Vec<SpanSeq> = t
                .lines()
                .map(|line| parse_line(line.trim().get(2..).unwrap_or("")))
                .collect();
            blocks.push(Block::List(items));
        } else {
            // a gap in line numbers means a blank run separated this
            // segment from the buffered one
            if !pending.is_empty() && seg.line > pending_end + 1 {
                flush_into(&mut pending, &mut blocks);
            }
            pending_end = seg.line + seg.text.lines().count().saturating_sub(1);
            pending.extend(seg.text.lines().map(String::from));
        }
    }
    flush_into(&mut pending, &mut blocks);
    blocks
}
