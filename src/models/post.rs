//! Post data structure.

/// A single post extracted from a notestock day view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Time of day the post was published, as HHMM (absent when the
    /// archive row carries no timestamp)
    pub time: Option<String>,

    /// Post body with line breaks preserved
    pub body: String,
}

impl Post {
    /// Render the post as one prompt line, `"HHMM: body"`.
    pub fn to_line(&self) -> String {
        match &self.time {
            Some(time) => format!("{}: {}", time, self.body),
            None => self.body.clone(),
        }
    }
}
