//! Stopword Filter: removes configured non-signal words from a `TermSet`.
//!
//! The stoplist is a plain value handed to every call, independent of the
//! tokenizer and the score curve.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::tokenizer::TermSet;

/// English and Spanish function words.
const GENERIC_WORDS: &[&str] = &[
    // English
    "the", "and", "for", "with", "that", "this", "from", "are", "was", "were", "will", "have",
    "has", "had", "been", "being", "but", "not", "you", "your", "our", "ours", "their", "they",
    "them", "his", "her", "she", "him", "its", "who", "whom", "which", "what", "when", "where",
    "why", "how", "all", "any", "can", "could", "would", "should", "may", "might", "must",
    "into", "onto", "over", "under", "about", "also", "than", "then", "there", "these", "those",
    "such", "very", "more", "most", "some", "each", "other", "only", "own", "same", "both",
    "just", "out", "off", "per", "via", "etc", "able", "well", "while", "within", "without",
    // Spanish
    "los", "las", "del", "una", "uno", "unos", "unas", "con", "por", "para", "que", "como",
    "más", "mas", "pero", "sus", "este", "esta", "estos", "estas", "ese", "esa", "esos",
    "esas", "entre", "sobre", "sin", "desde", "hasta", "muy", "también", "tambien", "donde",
    "cuando", "fue", "ser", "son", "está", "están", "han", "hay", "nos", "nuestro",
    "nuestra", "otro", "otra", "todo", "toda", "todos", "todas", "cual", "cada",
];

/// Recruiting boilerplate that appears in nearly every CV and job post.
const DOMAIN_FILLER_WORDS: &[&str] = &[
    "experience", "experienced", "team", "teams", "candidate", "candidates", "years", "year",
    "role", "roles", "work", "working", "job", "position", "responsibilities", "responsible",
    "skills", "skill", "knowledge", "strong", "looking", "ability", "company", "requirements",
    "required", "preferred", "plus", "including", "using", "etc",
    // Spanish
    "experiencia", "equipo", "candidato", "candidata", "años", "puesto", "trabajo",
    "conocimientos", "habilidades", "empresa", "requisitos", "buscamos",
];

/// A set of lowercase words excluded from matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Stoplist {
    words: HashSet<String>,
}

impl Stoplist {
    /// Builds a stoplist, lowercasing every word.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Bilingual (English + Spanish) function words.
    pub fn generic() -> Self {
        Self::new(GENERIC_WORDS)
    }

    /// Recruiting filler such as "experience", "team", "candidate".
    pub fn domain_filler() -> Self {
        Self::new(DOMAIN_FILLER_WORDS)
    }

    /// Generic words plus domain filler. The default for scoring.
    pub fn standard() -> Self {
        Self::generic().union(&Self::domain_filler())
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words.extend(Self::new(words).words);
    }

    pub fn union(mut self, other: &Stoplist) -> Self {
        self.words.extend(other.words.iter().cloned());
        self
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Sorted copy of the words, for audits and serialization.
    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut words: Vec<String> = self.words.iter().cloned().collect();
        words.sort();
        words
    }
}

impl From<Vec<String>> for Stoplist {
    fn from(words: Vec<String>) -> Self {
        Self::new(words)
    }
}

impl From<Stoplist> for Vec<String> {
    fn from(stoplist: Stoplist) -> Self {
        stoplist.to_sorted_vec()
    }
}

/// Removes every term that is an exact member of `stoplist`.
pub fn filter(tokens: TermSet, stoplist: &Stoplist) -> TermSet {
    tokens.retain(|t| !stoplist.contains(t))
}
