use crate::models::Rank;

/// How a vocabulary entry is recognised in free text
#[derive(Debug, Clone, Copy)]
enum Key {
    /// First whitespace-separated word, trailing punctuation stripped
    FirstWord(&'static str),
    /// Anywhere in the text
    Contains(&'static str),
}

/// Fixed, ordered answer vocabulary for one ordinal survey question
///
/// Entries are tried in order and the first hit wins, so more specific keys must
/// come before keys they contain.
#[derive(Debug, Clone, Copy)]
pub struct Scale {
    entries: &'static [(Key, u8)],
}

impl Scale {
    /// Rank for a response, `Rank::UNKNOWN` when nothing in the vocabulary matches
    pub fn rank(&self, text: &str) -> Rank {
        let text = text.trim();
        if text.is_empty() {
            return Rank::UNKNOWN;
        }

        let first = first_word(text);

        self.entries
            .iter()
            .find(|(key, _)| match key {
                Key::FirstWord(word) => first == *word,
                Key::Contains(needle) => text.contains(needle),
            })
            .map(|(_, rank)| Rank::new(*rank))
            .unwrap_or(Rank::UNKNOWN)
    }
}

#[inline]
fn first_word(text: &str) -> &str {
    text.split_whitespace()
        .next()
        .unwrap_or("")
        .trim_end_matches(|c: char| !c.is_alphanumeric())
}

/// Ideal Saturday night, quietest to loudest
pub const SATURDAY_NIGHT: Scale = Scale {
    entries: &[
        (Key::FirstWord("Reading"), 0),
        (Key::FirstWord("Watching"), 1),
        (Key::FirstWord("Playing"), 2),
        (Key::FirstWord("Wine"), 3),
        (Key::FirstWord("Large"), 4),
    ],
};

pub const DRINKING: Scale = Scale {
    entries: &[
        (Key::FirstWord("No"), 0),
        (Key::Contains("social"), 1),
        (Key::Contains("moderate"), 2),
        (Key::Contains("regularly"), 3),
        (Key::Contains("heavy"), 4),
    ],
};

pub const MARIJUANA: Scale = Scale {
    entries: &[
        (Key::FirstWord("No"), 0),
        (Key::FirstWord("Never"), 0),
        (Key::Contains("occasional"), 1),
        (Key::Contains("regularly"), 2),
        (Key::Contains("daily"), 3),
    ],
};

/// Kind of mentoring relationship wanted, most to least structured
pub const RELATIONSHIP: Scale = Scale {
    entries: &[
        (Key::FirstWord("Help"), 0),
        (Key::FirstWord("Catch"), 1),
        (Key::FirstWord("Grab"), 2),
        (Key::FirstWord("Someone"), 3),
    ],
};

/// Meetings over the summer
pub const SUMMER_FREQUENCY: Scale = Scale {
    entries: &[
        (Key::Contains("Once"), 0),
        (Key::Contains("2"), 1),
        (Key::Contains("4"), 2),
    ],
};

/// Meetings during the semester
pub const SEMESTER_FREQUENCY: Scale = Scale {
    entries: &[
        (Key::Contains("Once a month"), 0),
        (Key::Contains("A few times a month"), 1),
        (Key::Contains("Once a week"), 2),
        (Key::Contains("A few times a week"), 3),
    ],
};
