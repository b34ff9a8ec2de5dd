//! Byte stream → text lines.
//!
//! Telnet clients interleave IAC negotiation with the text the player
//! types. [`LineDecoder`] strips those sequences, splits on `\n`, drops
//! a trailing `\r`, and decodes each line as lossy UTF-8.

/// Longest line kept, in bytes. Anything beyond is discarded up to the
/// next newline.
pub const MAX_LINE_LEN: usize = 1024;

const IAC: u8 = 255;
const DONT: u8 = 254;
const DO: u8 = 253;
const WONT: u8 = 252;
const WILL: u8 = 251;
const SB: u8 = 250;
const SE: u8 = 240;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum State {
    #[default]
    Data,
    Iac,
    /// IAC DO/DONT/WILL/WONT, waiting for the option byte.
    Negotiate,
    /// Inside IAC SB ... IAC SE.
    Subneg { iac_seen: bool },
}

/// Incremental line decoder for one connection.
#[derive(Debug, Default)]
pub struct LineDecoder {
    state: State,
    buf: Vec<u8>,
    overflow: bool,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a chunk of raw bytes and returns every line it completed.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();

        for &b in chunk {
            match self.state {
                State::Data => match b {
                    IAC => self.state = State::Iac,
                    b'\n' => lines.push(self.take_line()),
                    _ => self.push(b),
                },
                State::Iac => match b {
                    // Escaped 0xff is a literal byte.
                    IAC => {
                        self.push(IAC);
                        self.state = State::Data;
                    }
                    DO | DONT | WILL | WONT => self.state = State::Negotiate,
                    SB => self.state = State::Subneg { iac_seen: false },
                    _ => self.state = State::Data,
                },
                State::Negotiate => self.state = State::Data,
                State::Subneg { iac_seen } => {
                    self.state = match (iac_seen, b) {
                        (true, SE) => State::Data,
                        (_, IAC) => State::Subneg { iac_seen: true },
                        _ => State::Subneg { iac_seen: false },
                    };
                }
            }
        }

        lines
    }

    fn push(&mut self, b: u8) {
        if self.buf.len() < MAX_LINE_LEN {
            self.buf.push(b);
        } else {
            self.overflow = true;
        }
    }

    fn take_line(&mut self) -> String {
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }
        if self.overflow {
            tracing::debug!(max = MAX_LINE_LEN, "line truncated");
            self.overflow = false;
        }
        let line = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        line
    }
}

/// Splits a line into its first word and the trimmed remainder.
///
/// Returns `None` when the line is blank.
///
/// ```rust
/// use mudforge_transport::split_command;
///
/// assert_eq!(split_command("go  Esterno "), Some(("go", "Esterno")));
/// assert_eq!(split_command("look"), Some(("look", "")));
/// assert_eq!(split_command("  "), None);
/// ```
pub fn split_command(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => Some((verb, rest.trim())),
        None => Some((line, "")),
    }
}
