//! MAPI markdown parser.
//!
//! The document is read once, line by line. The scanner tracks whether it
//! is inside a fenced block, which level-2 section it is in, and which
//! capability span and `###` subsection are open. Headings inside fences
//! are ignored.
//!
//! Boundary rules:
//! - the title is the first level-1 heading;
//! - the description runs from the title to the first `~~~meta` fence or
//!   level-2 heading, and is absent if neither follows;
//! - document metadata is the first `~~~meta` block closed before the
//!   first capability heading;
//! - a capability span runs from its heading to the next capability
//!   heading, and its metadata is the first `~~~meta` block in the span;
//! - a `###` subsection runs to the next heading of level 3 or less.
//!
//! Malformed input never fails: missing pieces are `None` and capabilities
//! without `id` or `transport` are dropped.

use crate::meta::{capability_meta, document_meta};
use mapi_core::{CapabilityKind, ParsedCapability, ParsedMapiDocument};
use tracing::debug;

const DEFAULT_TITLE: &str = "Untitled API";
const GLOBAL_TYPES_HEADING: &str = "Global Types";

/// Parses MAPI markdown into a [`ParsedMapiDocument`].
///
/// # Examples
///
/// ```
/// use mapi_parser::parse_mapi_document;
///
/// let doc = parse_mapi_document(
///     "# Foo API\n\n~~~meta\nauth: bearer\n~~~\n\n## Capability: Create Widget\n~~~meta\nid: widgets.create\ntransport: HTTP POST /widgets\n~~~\n### Intention\nCreates a widget.\n",
/// );
///
/// assert_eq!(doc.title, "Foo API");
/// assert_eq!(doc.capabilities.len(), 1);
/// assert_eq!(doc.capabilities[0].meta.id, "widgets.create");
/// assert_eq!(doc.capabilities[0].intention.as_deref(), Some("Creates a widget."));
/// ```
#[must_use]
pub fn parse_mapi_document(content: &str) -> ParsedMapiDocument {
    let mut scanner = Scanner::default();
    let mut offset = 0;

    for raw in content.split_inclusive('\n') {
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);
        scanner.feed(line, offset);
        offset += raw.len();
    }

    scanner.finish(content)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FenceKind {
    Meta,
    Types,
    Other,
}

#[derive(Debug)]
struct OpenFence<'a> {
    marker: &'static str,
    kind: FenceKind,
    body: Vec<&'a str>,
}

#[derive(Debug, Default)]
enum Description<'a> {
    #[default]
    Pending,
    Collecting(Vec<&'a str>),
    Done(Option<String>),
}

#[derive(Debug)]
struct Subsection<'a> {
    heading: &'a str,
    lines: Vec<&'a str>,
    code: Option<String>,
}

#[derive(Debug)]
struct CapabilityDraft<'a> {
    kind: CapabilityKind,
    name: &'a str,
    start: usize,
    meta: Option<String>,
    open: Option<Subsection<'a>>,
    closed: Vec<Subsection<'a>>,
}

impl<'a> CapabilityDraft<'a> {
    fn close_subsection(&mut self) {
        if let Some(section) = self.open.take() {
            self.closed.push(section);
        }
    }

    /// First subsection with this heading; later duplicates are ignored.
    fn subsection(&self, heading: &str) -> Option<&Subsection<'a>> {
        self.closed.iter().find(|section| section.heading == heading)
    }

    fn text(&self, heading: &str) -> Option<String> {
        self.subsection(heading).and_then(|section| {
            let text = section.lines.join("\n");
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        })
    }

    fn code(&self, heading: &str) -> Option<String> {
        self.subsection(heading)
            .and_then(|section| section.code.clone())
    }
}

#[derive(Debug, Default)]
struct Scanner<'a> {
    fence: Option<OpenFence<'a>>,
    title: Option<String>,
    description: Description<'a>,
    document_meta: Option<String>,
    in_global_types: bool,
    global_types: Vec<String>,
    drafts: Vec<CapabilityDraft<'a>>,
}

impl<'a> Scanner<'a> {
    fn feed(&mut self, line: &'a str, offset: usize) {
        if let Some(fence) = self.fence.as_mut() {
            if closes_fence(line, fence.marker) {
                self.push_text(line);
                if let Some(fence) = self.fence.take() {
                    self.close_fence(fence);
                }
            } else {
                fence.body.push(line);
                self.push_text(line);
            }
            return;
        }

        if let Some((marker, info)) = opens_fence(line) {
            let kind = match (marker, info) {
                ("~~~", "meta") => FenceKind::Meta,
                (_, "typescript" | "ts") => FenceKind::Types,
                _ => FenceKind::Other,
            };
            if kind == FenceKind::Meta {
                self.end_description();
            }
            self.push_text(line);
            self.fence = Some(OpenFence {
                marker,
                kind,
                body: Vec::new(),
            });
            return;
        }

        match parse_heading(line) {
            Some((1, text)) if self.title.is_none() => {
                self.title = Some(text.to_string());
                self.description = Description::Collecting(Vec::new());
            }
            Some((2, text)) => self.level_two(text, offset),
            Some((level, text)) if level <= 3 => {
                if let Some(draft) = self.drafts.last_mut() {
                    draft.close_subsection();
                }
                self.push_description(line);
                if level == 3 {
                    if let Some(draft) = self.drafts.last_mut() {
                        draft.open = Some(Subsection {
                            heading: text,
                            lines: Vec::new(),
                            code: None,
                        });
                    }
                }
            }
            _ => self.push_text(line),
        }
    }

    fn level_two(&mut self, text: &'a str, offset: usize) {
        self.end_description();
        self.in_global_types = text == GLOBAL_TYPES_HEADING;

        if let Some(draft) = self.drafts.last_mut() {
            draft.close_subsection();
        }

        if let Some((kind, name)) = parse_capability_heading(text) {
            self.drafts.push(CapabilityDraft {
                kind,
                name,
                start: offset,
                meta: None,
                open: None,
                closed: Vec::new(),
            });
        }
    }

    fn push_text(&mut self, line: &'a str) {
        self.push_description(line);
        if let Some(section) = self
            .drafts
            .last_mut()
            .and_then(|draft| draft.open.as_mut())
        {
            section.lines.push(line);
        }
    }

    fn push_description(&mut self, line: &'a str) {
        if let Description::Collecting(lines) = &mut self.description {
            lines.push(line);
        }
    }

    fn end_description(&mut self) {
        if let Description::Collecting(lines) = &self.description {
            let text = lines.join("\n");
            let text = text.trim();
            self.description = Description::Done((!text.is_empty()).then(|| text.to_string()));
        }
    }

    fn close_fence(&mut self, fence: OpenFence<'a>) {
        let body = fence.body.join("\n");

        match fence.kind {
            FenceKind::Meta => match self.drafts.last_mut() {
                Some(draft) => {
                    if draft.meta.is_none() {
                        draft.meta = Some(body);
                    }
                }
                None => {
                    if self.document_meta.is_none() {
                        self.document_meta = Some(body);
                    }
                }
            },
            FenceKind::Types => {
                let code = body.trim();
                if code.is_empty() {
                    return;
                }
                if self.in_global_types {
                    self.global_types.push(code.to_string());
                }
                if let Some(section) = self
                    .drafts
                    .last_mut()
                    .and_then(|draft| draft.open.as_mut())
                {
                    if section.code.is_none() {
                        section.code = Some(code.to_string());
                    }
                }
            }
            FenceKind::Other => {}
        }
    }

    fn finish(mut self, content: &str) -> ParsedMapiDocument {
        if let Some(fence) = self.fence.take() {
            debug!(kind = ?fence.kind, "ignoring unclosed fenced block");
        }

        let description = match self.description {
            Description::Done(text) => text,
            Description::Pending | Description::Collecting(_) => None,
        };

        let meta = self
            .document_meta
            .as_deref()
            .map(document_meta)
            .unwrap_or_default();

        let global_types = (!self.global_types.is_empty()).then(|| self.global_types.join("\n\n"));

        for draft in &mut self.drafts {
            draft.close_subsection();
        }

        let ends: Vec<usize> = self
            .drafts
            .iter()
            .skip(1)
            .map(|draft| draft.start)
            .chain(std::iter::once(content.len()))
            .collect();

        let capabilities = self
            .drafts
            .iter()
            .zip(ends)
            .filter_map(|(draft, end)| build_capability(draft, &content[draft.start..end]))
            .collect();

        ParsedMapiDocument {
            title: self.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            description,
            meta,
            global_types,
            capabilities,
        }
    }
}

fn build_capability(draft: &CapabilityDraft<'_>, raw_content: &str) -> Option<ParsedCapability> {
    let Some(meta) = draft.meta.as_deref().and_then(capability_meta) else {
        debug!(
            kind = %draft.kind,
            name = draft.name,
            "dropping capability without id and transport metadata"
        );
        return None;
    };

    Some(ParsedCapability {
        kind: draft.kind,
        name: draft.name.to_string(),
        meta,
        intention: draft.text("Intention"),
        auth_intention: draft.text("Auth Intention"),
        logic_constraints: draft.text("Logic Constraints"),
        input: draft.code("Input"),
        output: draft.code("Output"),
        errors: draft.text("Errors"),
        example: draft.text("Example"),
        raw_content: raw_content.to_string(),
    })
}

/// Parses an ATX heading into `(level, text)`.
///
/// The hashes must start the line and be followed by whitespace and
/// non-empty text.
fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if level == 0 {
        return None;
    }

    let rest = &line[level..];
    if !rest.starts_with(|c: char| c.is_whitespace()) {
        return None;
    }

    let text = rest.trim();
    (!text.is_empty()).then_some((level, text))
}

/// Recognizes `<Kind>: <Name>` in a level-2 heading.
fn parse_capability_heading(text: &str) -> Option<(CapabilityKind, &str)> {
    let (label, name) = text.split_once(':')?;
    let kind = CapabilityKind::from_label(label)?;
    let name = name.trim();
    (!name.is_empty()).then_some((kind, name))
}

/// Recognizes an opening fence, returning its marker and info string.
fn opens_fence(line: &str) -> Option<(&'static str, &str)> {
    let trimmed = line.trim_start();
    let marker = ["```", "~~~"]
        .into_iter()
        .find(|marker| trimmed.starts_with(marker))?;
    let fence_char = marker.chars().next()?;
    let info = trimmed.trim_start_matches(fence_char).trim();
    Some((marker, info))
}

fn closes_fence(line: &str, marker: &str) -> bool {
    let trimmed = line.trim();
    marker.chars().next().is_some_and(|fence_char| {
        trimmed.starts_with(marker) && trimmed.trim_start_matches(fence_char).is_empty()
    })
}
