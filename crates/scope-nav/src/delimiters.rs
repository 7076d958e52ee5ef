//! Delimiter table: configured token sets with longest-match lookup.
//!
//! A table holds the opening/closing/separator/pseudo-separator tokens for one
//! delimiter mode (plain or markup). Tokens are either literals or slash-wrapped
//! regex patterns (`/pattern/`), compiled once when the table is built. Lookup is
//! a pure function of text + offset: among all tokens of the requested roles that
//! match at the offset in the given scan direction, the longest wins; equal
//! lengths break by role priority (closing > opening > separator >
//! pseudo-separator).

use crate::span::{Direction, Offset};
use crate::text::CharIndex;
use regex::Regex;

/// How far back a regex-pattern token is allowed to reach when matching in the
/// `Before` direction. Literal tokens are bounded by their own length.
const PATTERN_WINDOW_CHARS: usize = 64;

/// The structural role of a delimiter token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelimiterRole {
    /// Opens a nested scope (`(`, `[`, `{`, ...).
    Opening,
    /// Closes a nested scope (`)`, `]`, `}`, ...).
    Closing,
    /// Separates siblings at one nesting depth (`,`, `;`, ...).
    Separator,
    /// Recognized and skipped atomically, but never a scope or sibling boundary
    /// (`=>`, `->`, ...).
    PseudoSeparator,
}

impl DelimiterRole {
    /// Tie-break priority for equal-length matches; higher wins.
    fn priority(self) -> u8 {
        match self {
            Self::Closing => 3,
            Self::Opening => 2,
            Self::Separator => 1,
            Self::PseudoSeparator => 0,
        }
    }
}

/// Delimiter mode selecting which token set applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DelimiterMode {
    /// Programming-language brackets.
    #[default]
    Plain,
    /// Markup buffers: adds angle brackets and comment fences.
    Markup,
}

#[derive(Debug, Clone)]
enum TokenMatcher {
    Literal(String),
    Pattern(Regex),
}

#[derive(Debug, Clone)]
struct Delimiter {
    matcher: TokenMatcher,
    role: DelimiterRole,
}

/// A successful delimiter lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterMatch {
    /// Role of the matched token.
    pub role: DelimiterRole,
    /// Match length in characters, never zero.
    pub len: usize,
}

/// Errors detected while building a table from configuration.
#[derive(Debug)]
pub enum DelimiterConfigError {
    /// A configured token was empty.
    EmptyToken(DelimiterRole),
    /// A role that must be populated had no tokens.
    EmptyRole(DelimiterRole),
    /// A `/pattern/` token failed to compile.
    InvalidPattern(regex::Error),
    /// A `/pattern/` token can match the empty string.
    ZeroWidthPattern(String),
}

impl std::fmt::Display for DelimiterConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyToken(role) => write!(f, "empty delimiter token in role {:?}", role),
            Self::EmptyRole(role) => write!(f, "no delimiter tokens configured for role {:?}", role),
            Self::InvalidPattern(err) => write!(f, "invalid delimiter pattern: {}", err),
            Self::ZeroWidthPattern(pattern) => {
                write!(f, "delimiter pattern /{}/ can match the empty string", pattern)
            }
        }
    }
}

impl std::error::Error for DelimiterConfigError {}

/// Raw token lists for one delimiter mode.
///
/// Tokens are literals unless wrapped in slashes (`/pattern/`), which are
/// compiled as regexes when the table is built.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DelimiterSetConfig {
    /// Opening tokens.
    pub opening: Vec<String>,
    /// Closing tokens.
    pub closing: Vec<String>,
    /// Separator tokens.
    pub separators: Vec<String>,
    /// Pseudo-separator tokens.
    pub pseudo_separators: Vec<String>,
}

impl DelimiterSetConfig {
    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// Built-in defaults for the given mode.
    pub fn defaults(mode: DelimiterMode) -> Self {
        match mode {
            DelimiterMode::Plain => Self {
                opening: Self::strings(&["(", "[", "{"]),
                closing: Self::strings(&[")", "]", "}"]),
                separators: Self::strings(&[",", ";"]),
                pseudo_separators: Self::strings(&["=>", "->"]),
            },
            DelimiterMode::Markup => Self {
                opening: Self::strings(&["(", "[", "{", "<!--", "<"]),
                closing: Self::strings(&[")", "]", "}", "-->", ">"]),
                separators: Self::strings(&[",", ";"]),
                pseudo_separators: Self::strings(&["/>", "=>"]),
            },
        }
    }
}

/// A validated, compiled delimiter table for one mode.
#[derive(Debug, Clone)]
pub struct DelimiterTable {
    delimiters: Vec<Delimiter>,
    max_literal_len: usize,
    has_patterns: bool,
}

impl DelimiterTable {
    /// Build a table from configuration.
    ///
    /// Fails on empty tokens, uncompilable patterns, or empty opening/closing
    /// role lists; callers fall back to [`DelimiterTable::defaults`] on failure.
    pub fn from_config(config: &DelimiterSetConfig) -> Result<Self, DelimiterConfigError> {
        let roles = [
            (DelimiterRole::Opening, &config.opening),
            (DelimiterRole::Closing, &config.closing),
            (DelimiterRole::Separator, &config.separators),
            (DelimiterRole::PseudoSeparator, &config.pseudo_separators),
        ];
        for (role, tokens) in [
            (DelimiterRole::Opening, &config.opening),
            (DelimiterRole::Closing, &config.closing),
        ] {
            if tokens.is_empty() {
                return Err(DelimiterConfigError::EmptyRole(role));
            }
        }

        let mut delimiters = Vec::new();
        let mut max_literal_len = 0;
        let mut has_patterns = false;
        for (role, tokens) in roles {
            for token in tokens {
                if token.is_empty() {
                    return Err(DelimiterConfigError::EmptyToken(role));
                }
                let matcher = if token.len() > 2 && token.starts_with('/') && token.ends_with('/') {
                    let pattern = &token[1..token.len() - 1];
                    let re = Regex::new(pattern).map_err(DelimiterConfigError::InvalidPattern)?;
                    // A zero-width match would stall the bracket scan the same
                    // way an empty token would.
                    if re.find("").is_some() {
                        return Err(DelimiterConfigError::ZeroWidthPattern(pattern.to_string()));
                    }
                    has_patterns = true;
                    TokenMatcher::Pattern(re)
                } else {
                    max_literal_len = max_literal_len.max(token.chars().count());
                    TokenMatcher::Literal(token.clone())
                };
                delimiters.push(Delimiter { matcher, role });
            }
        }

        Ok(Self {
            delimiters,
            max_literal_len,
            has_patterns,
        })
    }

    /// The built-in table for the given mode.
    pub fn defaults(mode: DelimiterMode) -> Self {
        // The built-in sets are static and non-empty, so this cannot fail.
        Self::from_config(&DelimiterSetConfig::defaults(mode))
            .unwrap_or_else(|_| unreachable!("built-in delimiter sets are valid"))
    }

    /// Longest token length the table can match, in characters. Also bounds
    /// how far back a `Before`-direction pattern lookup reaches.
    pub fn max_token_len(&self) -> usize {
        if self.has_patterns {
            self.max_literal_len.max(PATTERN_WINDOW_CHARS)
        } else {
            self.max_literal_len
        }
    }

    /// Find the best delimiter match at `offset` in the given scan direction.
    ///
    /// `After` matches tokens starting exactly at `offset`; `Before` matches
    /// tokens ending exactly at `offset`. Longest match wins; equal lengths
    /// break by role priority.
    pub fn match_at(
        &self,
        text: &str,
        index: &CharIndex,
        offset: Offset,
        direction: Direction,
        roles: &[DelimiterRole],
    ) -> Option<DelimiterMatch> {
        let mut best: Option<DelimiterMatch> = None;
        for delimiter in &self.delimiters {
            if !roles.contains(&delimiter.role) {
                continue;
            }
            let Some(len) = self.token_match_len(text, index, offset, direction, delimiter) else {
                continue;
            };
            let candidate = DelimiterMatch {
                role: delimiter.role,
                len,
            };
            let wins = match best {
                None => true,
                Some(current) => {
                    candidate.len > current.len
                        || (candidate.len == current.len
                            && candidate.role.priority() > current.role.priority())
                }
            };
            if wins {
                best = Some(candidate);
            }
        }
        best
    }

    fn token_match_len(
        &self,
        text: &str,
        index: &CharIndex,
        offset: Offset,
        direction: Direction,
        delimiter: &Delimiter,
    ) -> Option<usize> {
        match (&delimiter.matcher, direction) {
            (TokenMatcher::Literal(token), Direction::After) => {
                let start = index.char_to_byte(offset);
                text[start..]
                    .starts_with(token.as_str())
                    .then(|| token.chars().count())
            }
            (TokenMatcher::Literal(token), Direction::Before) => {
                let end = index.char_to_byte(offset);
                text[..end]
                    .ends_with(token.as_str())
                    .then(|| token.chars().count())
            }
            (TokenMatcher::Pattern(re), Direction::After) => {
                let start = index.char_to_byte(offset);
                let m = re.find(&text[start..])?;
                if m.start() != 0 {
                    return None;
                }
                let len = index.byte_to_char(start + m.end()) - offset;
                (len > 0).then_some(len)
            }
            (TokenMatcher::Pattern(re), Direction::Before) => {
                let end = index.char_to_byte(offset);
                let window_start =
                    index.char_to_byte(offset.saturating_sub(self.max_token_len()));
                let window = &text[window_start..end];
                // The match must end exactly at `offset`; keep the longest such match.
                let mut best_len = None;
                for m in re.find_iter(window) {
                    if window_start + m.end() == end {
                        let len = offset - index.byte_to_char(window_start + m.start());
                        if len > 0 {
                            best_len = Some(best_len.map_or(len, |b: usize| b.max(len)));
                        }
                    }
                }
                best_len
            }
        }
    }
}

impl Default for DelimiterTable {
    fn default() -> Self {
        Self::defaults(DelimiterMode::Plain)
    }
}
