use serde::{Deserialize, Serialize};

pub type EmailId = u64;
pub type EventId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub id: EmailId,
    pub sender: String,
    pub subject: String,
    pub preview: String,
    pub content: String,
    #[serde(default)]
    pub has_event: bool,
    #[serde(default)]
    pub is_starred: bool,
    /// Name of the avatar asset. Not drawn by the terminal.
    #[serde(default)]
    pub image_res: String,
}

impl Email {
    /// Two-letter badge shown in place of the avatar.
    pub fn initials(&self) -> String {
        self.sender.chars().take(2).collect()
    }

    pub(crate) fn matches(&self, needle: &[char]) -> bool {
        contains_ignore_case(&self.sender, needle) || contains_ignore_case(&self.subject, needle)
    }
}

/// Single-char uppercase mapping; multi-char expansions (ß -> SS) keep `c`.
fn upper(c: char) -> char {
    let mut it = c.to_uppercase();
    match (it.next(), it.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Single-char lowercase mapping. İ lowercases to i + combining dot; keep the i.
fn lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn eq_ignore_case(a: char, b: char) -> bool {
    a == b || upper(a) == upper(b) || lower(a) == lower(b)
}

/// Substring test comparing one character at a time, so the result never
/// depends on where a letter sits in a word (final sigma and friends).
pub(crate) fn contains_ignore_case(haystack: &str, needle: &[char]) -> bool {
    if needle.is_empty() {
        return true;
    }
    let hay: Vec<char> = haystack.chars().collect();
    hay.windows(needle.len())
        .any(|w| w.iter().zip(needle).all(|(&a, &b)| eq_ignore_case(a, b)))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    /// Email this event belongs to. Not checked against the email set.
    pub email_id: EmailId,
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub link: String,
}

impl Event {
    pub fn has_link(&self) -> bool {
        !self.link.trim().is_empty()
    }
}
