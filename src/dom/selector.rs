//! Compound selector subset
//!
//! Covers what glossary markup uses: an optional tag name followed by any
//! number of `.class` and `[attr]` / `[attr=value]` parts. Combinators,
//! pseudo-classes and selector lists are rejected.

use super::DomError;

/// One attribute condition of a selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeCondition {
    pub name: String,
    pub value: Option<String>,
}

/// A parsed compound selector such as `a.nav-link[data-letter-link="A"]`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SimpleSelector {
    pub tag: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<AttributeCondition>,
}

impl SimpleSelector {
    pub fn parse(selector: &str) -> Result<Self, DomError> {
        let invalid = || DomError::InvalidSelector(selector.to_string());
        let input = selector.trim();
        if input.is_empty() {
            return Err(invalid());
        }

        let mut parsed = SimpleSelector::default();
        let chars: Vec<char> = input.chars().collect();
        let mut i = 0;

        let tag: String = chars
            .iter()
            .take_while(|c| is_ident_char(**c))
            .collect();
        if !tag.is_empty() {
            i = tag.chars().count();
            parsed.tag = Some(tag.to_ascii_uppercase());
        }

        while i < chars.len() {
            match chars[i] {
                '.' => {
                    let name: String = chars[i + 1..]
                        .iter()
                        .take_while(|c| is_ident_char(**c))
                        .collect();
                    if name.is_empty() {
                        return Err(invalid());
                    }
                    i += 1 + name.chars().count();
                    parsed.classes.push(name);
                }
                '[' => {
                    let close = chars[i..]
                        .iter()
                        .position(|c| *c == ']')
                        .map(|offset| i + offset)
                        .ok_or_else(invalid)?;
                    let body: String = chars[i + 1..close].iter().collect();
                    parsed.attributes.push(parse_attribute(&body).ok_or_else(invalid)?);
                    i = close + 1;
                }
                _ => return Err(invalid()),
            }
        }

        Ok(parsed)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn parse_attribute(body: &str) -> Option<AttributeCondition> {
    let (name, value) = match body.split_once('=') {
        Some((name, raw)) => {
            let raw = raw.trim();
            let unquoted = raw
                .strip_prefix('"')
                .and_then(|r| r.strip_suffix('"'))
                .or_else(|| raw.strip_prefix('\'').and_then(|r| r.strip_suffix('\'')))
                .unwrap_or(raw);
            (name.trim(), Some(unquoted.to_string()))
        }
        None => (body.trim(), None),
    };

    if name.is_empty() || !name.chars().all(is_ident_char) {
        return None;
    }

    Some(AttributeCondition {
        name: name.to_string(),
        value,
    })
}

/// Attribute name of a bare attribute selector (`[data-x]` → `data-x`)
///
/// Used to strip a marker attribute from a cloned template.
pub fn selector_attribute_name(selector: &str) -> Option<String> {
    let parsed = SimpleSelector::parse(selector).ok()?;
    if parsed.tag.is_some() || !parsed.classes.is_empty() || parsed.attributes.len() != 1 {
        return None;
    }
    parsed.attributes.into_iter().next().map(|a| a.name)
}
