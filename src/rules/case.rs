// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Letter-case classification for the `*-case` rules.

use std::str::FromStr;

/// A named letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Lower,
    Upper,
    Camel,
    Kebab,
    Pascal,
    Sentence,
    Snake,
    Start,
}

impl Case {
    pub fn as_str(&self) -> &'static str {
        match self {
            Case::Lower => "lower-case",
            Case::Upper => "upper-case",
            Case::Camel => "camel-case",
            Case::Kebab => "kebab-case",
            Case::Pascal => "pascal-case",
            Case::Sentence => "sentence-case",
            Case::Snake => "snake-case",
            Case::Start => "start-case",
        }
    }

    /// Whether `input` is already written in this case.
    pub fn matches(&self, input: &str) -> bool {
        self.apply(input) == input
    }

    /// Rewrite `input` in this case.
    pub fn apply(&self, input: &str) -> String {
        match self {
            Case::Lower => input.to_lowercase(),
            Case::Upper => input.to_uppercase(),
            Case::Sentence => capitalize(input),
            Case::Camel => {
                let words = split_words(input);
                words
                    .iter()
                    .enumerate()
                    .map(|(i, w)| if i == 0 { w.to_lowercase() } else { capitalize(w) })
                    .collect()
            }
            Case::Pascal => split_words(input).iter().map(|w| capitalize(w)).collect(),
            Case::Kebab => join_lower(input, "-"),
            Case::Snake => join_lower(input, "_"),
            Case::Start => split_words(input)
                .iter()
                .map(|w| capitalize(w))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl FromStr for Case {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "lower-case" | "lowercase" => Ok(Case::Lower),
            "upper-case" | "uppercase" => Ok(Case::Upper),
            "camel-case" | "camelcase" => Ok(Case::Camel),
            "kebab-case" | "kebabcase" => Ok(Case::Kebab),
            "pascal-case" | "pascalcase" => Ok(Case::Pascal),
            "sentence-case" | "sentencecase" => Ok(Case::Sentence),
            "snake-case" | "snakecase" => Ok(Case::Snake),
            "start-case" | "startcase" => Ok(Case::Start),
            other => Err(format!("unknown case '{}'", other)),
        }
    }
}

impl std::fmt::Display for Case {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Split on non-alphanumerics and on lower-to-upper transitions.
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in input.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_numeric();
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
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn join_lower(input: &str, sep: &str) -> String {
    split_words(input)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(sep)
}
