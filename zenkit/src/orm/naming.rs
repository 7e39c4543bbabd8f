//! Identifier transforms for generated code. Every transform first folds German umlauts to ASCII,
//! then keeps only ASCII word characters.

use std::collections::HashSet;

const UMLAUTS: [(char, &str); 7] = [
    ('Ü', "UE"),
    ('Ä', "AE"),
    ('Ö', "OE"),
    ('ü', "ue"),
    ('ä', "ae"),
    ('ö', "oe"),
    ('ß', "ss"),
];

fn umlaut(c: char) -> Option<&'static str> {
    UMLAUTS.iter().find(|(u, _)| *u == c).map(|(_, folded)| *folded)
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// `Über` becomes `Ueber` but a standalone or all caps `Ü` becomes `UE`.
pub fn replace_umlauts(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match umlaut(c) {
            Some(folded) if c.is_uppercase() && chars.peek().is_some_and(|n| n.is_ascii_lowercase()) => {
                let mut parts = folded.chars();
                out.extend(parts.next());
                out.extend(parts.flat_map(char::to_lowercase));
            }
            Some(folded) => out.push_str(folded),
            None => out.push(c),
        }
    }
    out
}

/// Whitespace separated chunks, each cut to start at its first ASCII word character.
fn words(input: &str) -> Vec<String> {
    replace_umlauts(input)
        .split_whitespace()
        .filter_map(|chunk| chunk.find(is_word).map(|start| chunk[start..].to_string()))
        .collect()
}

fn strip_non_word(input: &str) -> String {
    input.chars().filter(|c| is_word(*c)).collect()
}

/// `Primary Text Field` -> `PrimaryTextField`.
pub fn to_title_case(input: &str) -> String {
    let titled: String = words(input)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect();
    strip_non_word(&titled)
}

/// `Zu bearbeiten` -> `ZU_BEARBEITEN`.
pub fn to_upper_case(input: &str) -> String {
    let joined = replace_umlauts(input).split_whitespace().collect::<Vec<_>>().join("_");
    strip_non_word(&joined).to_ascii_uppercase()
}

/// `Primary Text Field` -> `primaryTextField`.
pub fn to_camel_case(input: &str) -> String {
    let title = to_title_case(input);
    let mut chars = title.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// `Primary Text Field` -> `primary_text_field`.
pub fn to_snake_case(input: &str) -> String {
    words(input)
        .iter()
        .map(|word| strip_non_word(word).to_ascii_lowercase())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern", "false", "fn", "for", "if",
    "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct",
    "super", "trait", "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "gen",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Turns a transformed name into a legal identifier that is unique within `taken`.
/// `fallback` is used for names without any word character, `id` disambiguates collisions.
pub fn unique_ident(name: String, prefix: &str, fallback: &str, id: u64, taken: &mut HashSet<String>) -> String {
    let mut ident = if name.trim_matches('_').is_empty() { format!("{}_{}", fallback, id) } else { name };
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident = format!("{}{}", prefix, ident);
    }
    if KEYWORDS.contains(&ident.as_str()) {
        ident.push('_');
    }
    if taken.contains(&ident) {
        ident = format!("{}_{}", ident, id);
    }
    taken.insert(ident.clone());
    ident
}
