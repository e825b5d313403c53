/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Identifier helpers shared by the generators: case conversion, plural
 * stripping and collision-free name allocation.
 */

use std::collections::HashSet;

/// Split an arbitrary key into words on separators and case boundaries.
///
/// `userID` -> `user`, `ID`; `HTTPServer` -> `HTTP`, `Server`; `first-name` -> `first`, `name`.
pub fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).map_or(false, |n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

fn guard_leading_digit(name: String) -> String {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name
    }
}

/// `first_name` -> `FirstName`
pub fn to_pascal_case(s: &str) -> String {
    let name: String = split_words(s).iter().map(|w| capitalize(w)).collect();
    if name.is_empty() {
        return "Empty".to_string();
    }
    guard_leading_digit(name)
}

/// `first_name` -> `firstName`
pub fn to_camel_case(s: &str) -> String {
    let words = split_words(s);
    let mut name = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            name.push_str(&word.to_lowercase());
        } else {
            name.push_str(&capitalize(word));
        }
    }
    if name.is_empty() {
        return "empty".to_string();
    }
    guard_leading_digit(name)
}

/// `firstName` -> `first_name`
pub fn to_snake_case(s: &str) -> String {
    let name = split_words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_");
    if name.is_empty() {
        return "empty".to_string();
    }
    guard_leading_digit(name)
}

/// Best-effort singular form used to name array element types.
pub fn singularize(s: &str) -> String {
    let lower = s.to_ascii_lowercase();
    if lower.ends_with("ies") && s.len() > 3 {
        format!("{}y", &s[..s.len() - 3])
    } else if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        s.to_string()
    } else if lower.ends_with('s') && s.len() > 1 {
        s[..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}

/// Hands out names that have not been used yet, appending a counter on collision.
#[derive(Debug, Default)]
pub struct NameAllocator {
    used: HashSet<String>,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// An allocator that never hands out `reserved` unsuffixed.
    pub fn reserving(reserved: &[&str]) -> Self {
        Self {
            used: reserved.iter().map(|name| name.to_string()).collect(),
        }
    }

    pub fn allocate(&mut self, base: &str) -> String {
        if self.used.insert(base.to_string()) {
            return base.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}{n}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
