use std::fmt;

/// An ordered list of words: the command name followed by its arguments.
///
/// The length of the vector is the argument count; there is no terminator
/// and no padding. An empty `Argv` is what a blank input line becomes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Argv(Vec<String>);

impl Argv {
    pub fn new(words: Vec<String>) -> Self {
        Self(words)
    }

    /// The command name, i.e. the first word, if there is one.
    pub fn name(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// The word at position `i`, where 0 is the command name.
    pub fn arg(&self, i: usize) -> Option<&str> {
        self.0.get(i).map(String::as_str)
    }

    /// Every word after the command name.
    pub fn args(&self) -> &[String] {
        self.0.get(1..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<Vec<&str>> for Argv {
    fn from(words: Vec<&str>) -> Self {
        Self(words.into_iter().map(String::from).collect())
    }
}

/// Renders every word followed by a single space, as `history` prints them.
impl fmt::Display for Argv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for word in &self.0 {
            write!(f, "{} ", word)?;
        }
        Ok(())
    }
}
