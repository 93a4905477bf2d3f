//! Selector parsing and matching
//!
//! Supports selector lists of compound selectors joined by the descendant
//! combinator: `form.popup__form input[type=url], #card-name`.

use crate::{DomTree, ElementData, NodeId, SelectorError};

/// Parsed selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Alternatives; each is a descendant chain, outermost first
    alternatives: Vec<Vec<Compound>>,
}

/// Compound selector (`tag#id.class[attr=value]`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, Option<String>)>,
}

impl Compound {
    /// Check whether an element satisfies every part of this compound
    pub fn matches(&self, elem: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if elem.tag() != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if elem.id() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| elem.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|(name, value)| match value {
            Some(v) => elem.get_attr(name) == Some(v.as_str()),
            None => elem.has_attr(name),
        })
    }
}

impl Selector {
    /// Parse a selector list
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut alternatives = Vec::new();
        for part in split_top_level(input, |c| c == ',') {
            let chain = parse_chain(input, part)?;
            alternatives.push(chain);
        }
        Ok(Self { alternatives })
    }

    /// Check whether the node matches any alternative
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.alternatives
            .iter()
            .any(|chain| matches_chain(tree, node, chain))
    }

    /// Matching descendants of `root` in document order (root excluded)
    pub fn select_all(&self, tree: &DomTree, root: NodeId) -> Vec<NodeId> {
        tree.descendants(root)
            .into_iter()
            .filter(|&id| self.matches(tree, id))
            .collect()
    }

    /// First matching descendant of `root`
    pub fn select_first(&self, tree: &DomTree, root: NodeId) -> Option<NodeId> {
        tree.descendants(root)
            .into_iter()
            .find(|&id| self.matches(tree, id))
    }
}

impl std::str::FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn matches_chain(tree: &DomTree, node: NodeId, chain: &[Compound]) -> bool {
    let Some((last, rest)) = chain.split_last() else {
        return false;
    };
    let Some(elem) = tree.element(node) else {
        return false;
    };
    if !last.matches(elem) {
        return false;
    }
    // Greedy right-to-left walk: each remaining compound must match
    // some ancestor above the previous match.
    let mut ancestors = tree.ancestors(node);
    rest.iter().rev().all(|compound| {
        ancestors
            .by_ref()
            .any(|a| tree.element(a).is_some_and(|e| compound.matches(e)))
    })
}

fn parse_chain(full: &str, part: &str) -> Result<Vec<Compound>, SelectorError> {
    let mut chain = Vec::new();
    for token in split_top_level(part, char::is_whitespace) {
        if !token.is_empty() {
            chain.push(parse_compound(full, token)?);
        }
    }
    if chain.is_empty() {
        return Err(SelectorError::Empty);
    }
    Ok(chain)
}

/// Split at every `is_sep` char outside `[...]` and quoted attribute values
fn split_top_level(input: &str, is_sep: impl Fn(char) -> bool) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in input.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' if depth > 0 => quote = Some(c),
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                _ if depth == 0 && is_sep(c) => {
                    parts.push(&input[start..i]);
                    start = i + c.len_utf8();
                }
                _ => {}
            },
        }
    }
    parts.push(&input[start..]);
    parts
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn parse_compound(full: &str, token: &str) -> Result<Compound, SelectorError> {
    let mut compound = Compound::default();
    let chars: Vec<(usize, char)> = token.char_indices().collect();
    let mut i = 0;

    let unexpected = |offset: usize, found: char| SelectorError::UnexpectedChar {
        selector: full.to_string(),
        offset,
        found,
    };
    let ident = |start: usize| -> (String, usize) {
        let mut end = start;
        while end < chars.len() && is_ident_char(chars[end].1) {
            end += 1;
        }
        (chars[start..end].iter().map(|(_, c)| c).collect(), end)
    };

    while i < chars.len() {
        let (offset, c) = chars[i];
        match c {
            '*' if i == 0 => i += 1,
            '#' | '.' => {
                let (name, end) = ident(i + 1);
                if name.is_empty() {
                    return Err(unexpected(offset, c));
                }
                if c == '#' {
                    compound.id = Some(name);
                } else {
                    compound.classes.push(name);
                }
                i = end;
            }
            '[' => {
                let mut quote = None;
                let close = chars[i..]
                    .iter()
                    .position(|&(_, ch)| match quote {
                        Some(q) => {
                            if ch == q {
                                quote = None;
                            }
                            false
                        }
                        None if ch == '"' || ch == '\'' => {
                            quote = Some(ch);
                            false
                        }
                        None => ch == ']',
                    })
                    .ok_or_else(|| SelectorError::UnterminatedAttribute(full.to_string()))?;
                let inner: String = chars[i + 1..i + close].iter().map(|(_, c)| c).collect();
                let (name, value) = match inner.split_once('=') {
                    Some((n, v)) => (n.trim(), Some(v.trim().trim_matches(['"', '\'']).to_string())),
                    None => (inner.trim(), None),
                };
                if name.is_empty() || !name.chars().all(is_ident_char) {
                    return Err(unexpected(offset, c));
                }
                compound.attrs.push((name.to_ascii_lowercase(), value));
                i += close + 1;
            }
            '>' | '+' | '~' => {
                return Err(SelectorError::UnsupportedCombinator {
                    selector: full.to_string(),
                    combinator: c,
                });
            }
            c if i == 0 && is_ident_char(c) => {
                let (name, end) = ident(i);
                compound.tag = Some(name.to_ascii_lowercase());
                i = end;
            }
            _ => return Err(unexpected(offset, c)),
        }
    }
    Ok(compound)
}
