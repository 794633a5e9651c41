//! Markup region map
//!
//! One pass over the raw text splitting it into contiguous regions
//! (character data, tags, comments, CDATA, PIs, declarations). Used to
//! tell whether a textual occurrence sits where a node of a given kind
//! could start and end, e.g. to reject the `a` inside the tag `<a>` as an
//! occurrence of a text node `a`.

use super::scanner::Scanner;
use crate::dom::NodeKind;

/// Kind of a region of raw XML text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    CharData,
    StartTag,
    EmptyTag,
    EndTag,
    Comment,
    CData,
    ProcessingInstruction,
    /// XML declaration or DOCTYPE
    Declaration,
}

/// A half-open byte range `[start, end)` of one region kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub kind: RegionKind,
    pub start: usize,
    pub end: usize,
}

/// Regions covering the whole text, in order, without gaps
#[derive(Debug, Clone, Default)]
pub struct MarkupMap {
    regions: Vec<Region>,
    len: usize,
}

impl MarkupMap {
    /// Classify `content`. Unterminated constructs run to the end of the text.
    pub fn scan(content: &str) -> Self {
        let mut scanner = Scanner::new(content.as_bytes());
        let len = scanner.len();
        let mut regions = Vec::new();

        while !scanner.is_eof() {
            let start = scanner.position();
            let (kind, end) = if scanner.peek() == Some(b'<') {
                Self::classify_markup(&scanner, start, len)
            } else {
                let end = scanner.find_byte(b'<').unwrap_or(len);
                (RegionKind::CharData, end)
            };
            regions.push(Region { kind, start, end });
            scanner.set_position(end);
        }

        MarkupMap { regions, len }
    }

    /// Kind and end of the markup construct starting at `start` (a '<')
    fn classify_markup(scanner: &Scanner<'_>, start: usize, len: usize) -> (RegionKind, usize) {
        let closed = |open_len: usize, terminator: &[u8]| {
            scanner
                .find_from(start + open_len, terminator)
                .map_or(len, |i| i + terminator.len())
        };

        if scanner.starts_with(b"<!--") {
            (RegionKind::Comment, closed(4, b"-->"))
        } else if scanner.starts_with(b"<![CDATA[") {
            (RegionKind::CData, closed(9, b"]]>"))
        } else if scanner.starts_with(b"<?xml ") || scanner.starts_with(b"<?xml?") {
            (RegionKind::Declaration, closed(2, b"?>"))
        } else if scanner.starts_with(b"<?") {
            (RegionKind::ProcessingInstruction, closed(2, b"?>"))
        } else if scanner.starts_with(b"<!") {
            let end = scanner.find_declaration_end().map_or(len, |i| i + 1);
            (RegionKind::Declaration, end)
        } else if scanner.starts_with(b"</") {
            let end = scanner.find_byte(b'>').map_or(len, |i| i + 1);
            (RegionKind::EndTag, end)
        } else {
            match scanner.find_tag_end_quoted() {
                Some(gt) if gt > start && scanner.byte_at(gt - 1) == Some(b'/') => {
                    (RegionKind::EmptyTag, gt + 1)
                }
                Some(gt) => (RegionKind::StartTag, gt + 1),
                None => (RegionKind::StartTag, len),
            }
        }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Region containing byte `pos`
    pub fn region_at(&self, pos: usize) -> Option<&Region> {
        let idx = self.regions.partition_point(|r| r.start <= pos);
        let region = self.regions.get(idx.checked_sub(1)?)?;
        (pos < region.end).then_some(region)
    }

    fn region_starting_at(&self, pos: usize) -> Option<&Region> {
        self.regions
            .binary_search_by_key(&pos, |r| r.start)
            .ok()
            .map(|i| &self.regions[i])
    }

    fn region_ending_at(&self, pos: usize) -> Option<&Region> {
        self.regions
            .binary_search_by_key(&pos, |r| r.end)
            .ok()
            .map(|i| &self.regions[i])
    }

    /// Whether `[start, end)` lies on boundaries a node of `kind` could occupy
    pub fn is_aligned(&self, content: &str, kind: NodeKind, start: usize, end: usize) -> bool {
        if start >= end || end > self.len {
            return false;
        }
        let bytes = content.as_bytes();
        match kind {
            NodeKind::Document => start == 0 && end == self.len,
            NodeKind::Element => {
                let opens = self
                    .region_starting_at(start)
                    .is_some_and(|r| matches!(r.kind, RegionKind::StartTag | RegionKind::EmptyTag));
                let closes = self
                    .region_ending_at(end)
                    .is_some_and(|r| matches!(r.kind, RegionKind::EndTag | RegionKind::EmptyTag));
                opens && closes
            }
            NodeKind::Attribute => {
                let in_tag = self.region_at(start).is_some_and(|r| {
                    matches!(r.kind, RegionKind::StartTag | RegionKind::EmptyTag) && end < r.end
                });
                let before = start.checked_sub(1).and_then(|i| bytes.get(i)).copied();
                let after = bytes.get(end).copied();
                in_tag
                    && before.is_some_and(is_xml_whitespace)
                    && after.is_some_and(|b| is_xml_whitespace(b) || b == b'/' || b == b'>')
            }
            NodeKind::Text => self.spans_region(start, end, RegionKind::CharData),
            NodeKind::CData => self.spans_region(start, end, RegionKind::CData),
            NodeKind::Comment => self.spans_region(start, end, RegionKind::Comment),
            NodeKind::ProcessingInstruction => {
                self.spans_region(start, end, RegionKind::ProcessingInstruction)
            }
        }
    }

    fn spans_region(&self, start: usize, end: usize, kind: RegionKind) -> bool {
        self.region_starting_at(start)
            .is_some_and(|r| r.kind == kind && r.end == end)
    }
}

#[inline]
fn is_xml_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}
