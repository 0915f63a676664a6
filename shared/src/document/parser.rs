use log::warn;

use super::{
    tree::{Document, Element, ElementId},
    error::DocumentError,
};

const ENTITIES: &[(&str, char)] = &[
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&amp;", '&'),
    ("&apos;", '\''),
    ("&quot;", '"'),
];

enum Token {
    Open(String),
    Empty(String),
    Close(String),
    Text(String),
    Skip,
}

/// Small, permissive reader for the element/attribute/text subset of XML
/// used by VML files.
///
/// Processing instructions and comments are skipped, CDATA sections become
/// text, the five predefined entities are expanded and attribute names are
/// lowercased. Attribute values must be quoted.
pub(crate) struct Parser<'a> {
    source: &'a str,
    pos: usize,
    document: &'a mut Document,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(source: &'a str, document: &'a mut Document) -> Self {
        Self {
            source,
            pos: 0,
            document,
        }
    }

    pub(crate) fn parse(mut self) -> Result<ElementId, DocumentError> {
        let mut root: Option<ElementId> = None;
        let mut open: Vec<ElementId> = Vec::new();

        while self.pos < self.source.len() {
            match self.next_token()? {
                Token::Skip => {}
                Token::Text(text) => {
                    let text = text.trim();
                    if text.is_empty() {
                        continue;
                    }
                    match open.last() {
                        Some(parent) => self.document.append_text(*parent, text),
                        None => warn!("ignoring top-level text"),
                    }
                }
                Token::Close(name) => match open.pop() {
                    Some(element) if self.document.name(element) == name => {}
                    Some(element) => {
                        return Err(DocumentError::NestingMismatch {
                            expected: self.document.name(element).to_string(),
                            found: name,
                        })
                    }
                    None => {
                        return Err(DocumentError::NestingMismatch {
                            expected: String::new(),
                            found: name,
                        })
                    }
                },
                Token::Open(tag) => {
                    let id = self.start_element(&tag, &open, &mut root)?;
                    open.push(id);
                }
                Token::Empty(tag) => {
                    self.start_element(&tag, &open, &mut root)?;
                }
            }
        }

        if let Some(element) = open.last() {
            return Err(DocumentError::Unterminated {
                element: self.document.name(*element).to_string(),
            });
        }
        root.ok_or(DocumentError::Empty)
    }

    fn start_element(
        &mut self,
        tag: &str,
        open: &[ElementId],
        root: &mut Option<ElementId>,
    ) -> Result<ElementId, DocumentError> {
        let parent = open.last().copied();
        if parent.is_none() && root.is_some() {
            return Err(DocumentError::MultipleRoots {
                element: element_name(tag).to_string(),
            });
        }
        let id = self.document.push(build_element(tag, parent)?);
        root.get_or_insert(id);
        Ok(id)
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn next_token(&mut self) -> Result<Token, DocumentError> {
        let rest = self.rest();
        if !rest.starts_with('<') {
            let end = rest.find('<').unwrap_or(rest.len());
            self.pos += end;
            return Ok(Token::Text(expand_entities(&rest[..end])));
        }

        let start = self.pos;
        if let Some(body) = rest.strip_prefix("<!") {
            if let Some(cdata) = body.strip_prefix("[CDATA[") {
                let end = cdata
                    .find("]]>")
                    .ok_or(DocumentError::UnterminatedCdata { offset: start })?;
                self.pos += "<![CDATA[".len() + end + "]]>".len();
                return Ok(Token::Text(cdata[..end].to_string()));
            }
            if let Some(comment) = body.strip_prefix("--") {
                let end = comment.find("-->").ok_or(DocumentError::Unterminated {
                    element: "!--".to_string(),
                })?;
                self.pos += "<!--".len() + end + "-->".len();
                return Ok(Token::Skip);
            }
            return Err(DocumentError::UnknownDirective { offset: start });
        }

        let tag = self.read_tag()?;
        if tag.starts_with('?') {
            Ok(Token::Skip)
        } else if let Some(name) = tag.strip_prefix('/') {
            Ok(Token::Close(name.trim().to_string()))
        } else if let Some(tag) = tag.strip_suffix('/') {
            Ok(Token::Empty(tag.trim_end().to_string()))
        } else {
            Ok(Token::Open(tag))
        }
    }

    /// Read the inside of a tag, leaving `pos` past its closing bracket.
    /// Whitespace outside quotes is collapsed to single spaces.
    fn read_tag(&mut self) -> Result<String, DocumentError> {
        let start = self.pos;
        let body = &self.source[start + 1..];
        let mut tag = String::new();
        let mut quote: Option<char> = None;
        let mut last = '\0';
        let mut chars = body.char_indices();

        while let Some((offset, here)) = chars.next() {
            let here = if matches!(here, '\n' | '\t' | '\r') { ' ' } else { here };
            match (quote, here) {
                (_, '<') | (Some(_), '>') => {
                    return Err(DocumentError::BracketInTag {
                        offset: start + 1 + offset,
                    })
                }
                (None, '>') => {
                    self.pos = start + 1 + offset + 1;
                    return Ok(tag.trim().to_string());
                }
                (None, ' ') if last == ' ' => continue,
                (_, '&') => {
                    if let Some((entity, replace)) = match_entity(&body[offset..]) {
                        tag.push(replace);
                        // the entity's remaining bytes are ASCII
                        for _ in 1..entity.len() {
                            chars.next();
                        }
                        last = replace;
                        continue;
                    }
                    tag.push(here);
                }
                (None, '\'' | '"') => {
                    quote = Some(here);
                    tag.push(here);
                }
                (Some(open), _) if open == here => {
                    quote = None;
                    tag.push(here);
                }
                _ => tag.push(here),
            }
            last = here;
        }

        Err(DocumentError::Unterminated {
            element: element_name(tag.trim_start()).to_string(),
        })
    }
}

fn element_name(tag: &str) -> &str {
    tag.split_whitespace().next().unwrap_or("")
}

fn match_entity(input: &str) -> Option<(&'static str, char)> {
    ENTITIES
        .iter()
        .find(|(entity, _)| input.starts_with(entity))
        .copied()
}

fn expand_entities(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(index) = rest.find('&') {
        output.push_str(&rest[..index]);
        rest = &rest[index..];
        match match_entity(rest) {
            Some((entity, replace)) => {
                output.push(replace);
                rest = &rest[entity.len()..];
            }
            None => {
                output.push('&');
                rest = &rest[1..];
            }
        }
    }
    output.push_str(rest);
    output
}

fn build_element(tag: &str, parent: Option<ElementId>) -> Result<Element, DocumentError> {
    let name = element_name(tag);
    let attributes = parse_attributes(&tag[name.len()..]).ok_or_else(|| {
        DocumentError::AttributeParse {
            element: name.to_string(),
        }
    })?;
    Ok(Element {
        name: name.to_string(),
        text: None,
        attributes,
        parent,
        children: Vec::new(),
    })
}

/// Parse `name="value"` pairs. Names start with a letter and continue with
/// letters, `-` or `_`.
fn parse_attributes(input: &str) -> Option<Vec<(String, String)>> {
    let mut attributes = Vec::new();
    let mut rest = input.trim_start();

    while !rest.is_empty() {
        if !rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return None;
        }
        let name_end = rest
            .find(|c: char| !(c.is_ascii_alphabetic() || c == '-' || c == '_'))
            .unwrap_or(rest.len());
        let name = rest[..name_end].to_ascii_lowercase();
        rest = rest[name_end..].strip_prefix('=')?;

        let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
        rest = &rest[1..];
        let value_end = rest.find(quote)?;
        attributes.push((name, rest[..value_end].to_string()));
        rest = rest[value_end + 1..].trim_start();
    }

    Some(attributes)
}
