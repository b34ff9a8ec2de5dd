//! Player commands.
//!
//! Each verb accepts its English keyword and its Italian one; matching is
//! case-insensitive. Anything else parses to [`Verb::Unknown`] so the
//! dispatcher can echo it back.

use std::fmt;

/// Everything a named player can ask the world to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    /// `help` / `aiuto`
    Help,
    /// `say` / `di`
    Say,
    /// `look` / `osserva` / `guarda`
    Look,
    /// `go` / `vai`
    Go,
    /// `create` / `crea`
    Create,
    /// `describe` / `descrivi`
    Describe,
    /// `zone` / `zona`
    Zone,
    /// `delete` / `cancella`
    Delete,
    /// Not a known keyword; carries the word as typed.
    Unknown(String),
}

impl Verb {
    /// Every known verb with its accepted keywords, in help order.
    pub const KEYWORDS: &'static [(&'static str, &'static str)] = &[
        ("help", "aiuto"),
        ("say", "di"),
        ("look", "osserva"),
        ("go", "vai"),
        ("create", "crea"),
        ("describe", "descrivi"),
        ("zone", "zona"),
        ("delete", "cancella"),
    ];

    /// Maps a typed word to a verb.
    pub fn parse(word: &str) -> Self {
        match word.to_lowercase().as_str() {
            "help" | "aiuto" => Self::Help,
            "say" | "di" => Self::Say,
            "look" | "osserva" | "guarda" => Self::Look,
            "go" | "vai" => Self::Go,
            "create" | "crea" => Self::Create,
            "describe" | "descrivi" => Self::Describe,
            "zone" | "zona" => Self::Zone,
            "delete" | "cancella" => Self::Delete,
            _ => Self::Unknown(word.to_string()),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Self::Help => "help",
            Self::Say => "say",
            Self::Look => "look",
            Self::Go => "go",
            Self::Create => "create",
            Self::Describe => "describe",
            Self::Zone => "zone",
            Self::Delete => "delete",
            Self::Unknown(word) => word,
        };
        f.write_str(word)
    }
}

/// A parsed command: the verb plus the rest of the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub verb: Verb,
    pub arg: String,
}

impl Command {
    pub fn new(verb: &str, arg: &str) -> Self {
        Self {
            verb: Verb::parse(verb),
            arg: arg.trim().to_string(),
        }
    }
}
