//! Glossary items and the letter rules applied to their titles

use std::cmp::Ordering;

/// The fixed navigation alphabet
pub fn alphabet() -> impl Iterator<Item = char> {
    'A'..='Z'
}

/// First ASCII letter anywhere in `text`, upper-cased
///
/// Titles such as `"3D printing"` or `"« Ébauche »"` still group under the
/// first plain letter found; titles with none yield `None`.
pub fn first_letter(text: &str) -> Option<char> {
    text.trim()
        .chars()
        .find(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
}

/// Case-insensitive, whitespace-trimmed form used for search matching
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Title ordering within a letter group, without a host collator
///
/// Compares base letters first (accents and case folded), so `"Année"`
/// sorts before `"Annuel"` and `"Zèbre"` before `"Zoo"` as a locale collator
/// orders them. Accents, then case, then the raw strings break ties so the
/// order stays total.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    let (a_lower, b_lower) = (a.to_lowercase(), b.to_lowercase());
    base_letters(&a_lower)
        .cmp(base_letters(&b_lower))
        .then_with(|| a_lower.cmp(&b_lower))
        .then_with(|| a.cmp(b))
}

fn base_letters(lowercase: &str) -> impl Iterator<Item = char> + '_ {
    lowercase.chars().map(base_letter)
}

/// Strip the diacritic from a lower-case Latin letter
fn base_letter(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ł' | 'ĺ' | 'ļ' | 'ľ' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

/// One collected list entry
#[derive(Debug, Clone, PartialEq)]
pub struct Item<N> {
    /// The entry element; repositioned once, never destroyed
    pub element: N,
    /// Trimmed title text
    pub title: String,
    /// Lower-cased title for search
    pub search_key: String,
    pub letter: char,
    /// `<letter>-<index>` anchor id, when the item has an anchor element
    pub id: Option<String>,
    pub anchor: Option<N>,
    /// Current visual position key
    pub order: Option<i32>,
}

impl<N> Item<N> {
    /// Build an item from its title; `None` when the title has no letter
    pub fn new(element: N, title: &str) -> Option<Self> {
        let title = title.trim().to_string();
        let letter = first_letter(&title)?;
        Some(Self {
            element,
            search_key: normalize(&title),
            title,
            letter,
            id: None,
            anchor: None,
            order: None,
        })
    }

    /// Substring match against a normalized query; empty matches everything
    pub fn matches_query(&self, normalized_query: &str) -> bool {
        normalized_query.is_empty() || self.search_key.contains(normalized_query)
    }

    /// Sort key: letter, then title under `compare`
    pub fn cmp_group_order(&self, other: &Self, compare: impl Fn(&str, &str) -> Ordering) -> Ordering {
        self.letter
            .cmp(&other.letter)
            .then_with(|| compare(&self.title, &other.title))
    }
}
