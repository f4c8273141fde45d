use std::fmt;

/// The operator written in front of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainOperator {
    /// First segment of a line.
    Normal,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `;`
    Semi,
}

impl ChainOperator {
    /// Whether a segment behind this operator runs, given the last status.
    pub fn allows(self, previous_status: i32) -> bool {
        match self {
            ChainOperator::Normal | ChainOperator::Semi => true,
            ChainOperator::And => previous_status == 0,
            ChainOperator::Or => previous_status != 0,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            ChainOperator::Normal => "",
            ChainOperator::And => "&&",
            ChainOperator::Or => "||",
            ChainOperator::Semi => ";",
        }
    }

    fn is_conditional(self) -> bool {
        matches!(self, ChainOperator::And | ChainOperator::Or)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSegment {
    pub text: String,
    pub operator: ChainOperator,
}

impl ChainSegment {
    /// Whitespace tokenization; there is no quoting.
    pub fn tokens(&self) -> Vec<String> {
        self.text.split_whitespace().map(String::from).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    UnexpectedOperator(&'static str),
    MissingCommand(&'static str),
}

impl ChainError {
    pub const STATUS: i32 = 2;
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedOperator(op) => write!(f, "Syntax error: \"{}\" unexpected", op),
            Self::MissingCommand(op) => {
                write!(f, "Syntax error: missing command after \"{}\"", op)
            }
        }
    }
}

impl std::error::Error for ChainError {}

/// Cuts the line at the first `#` that starts a word.
pub fn strip_comment(line: &str) -> &str {
    let mut previous: Option<char> = None;
    for (pos, c) in line.char_indices() {
        if c == '#' && previous.map_or(true, char::is_whitespace) {
            return &line[..pos];
        }
        previous = Some(c);
    }
    line
}

/// Splits one input line into segments on `;`, `&&` and `||`.
///
/// Empty segments left by `;` are dropped. An empty command next to `&&` or
/// `||`, or an operator opening the line, rejects the whole line.
pub fn split(line: &str) -> Result<Vec<ChainSegment>, ChainError> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut operator = ChainOperator::Normal;
    let mut chars = strip_comment(line).chars().peekable();

    while let Some(c) = chars.next() {
        let next_operator = match c {
            '&' if chars.peek() == Some(&'&') => ChainOperator::And,
            '|' if chars.peek() == Some(&'|') => ChainOperator::Or,
            ';' => ChainOperator::Semi,
            _ => {
                current.push(c);
                continue;
            }
        };
        if next_operator.is_conditional() {
            chars.next(); // second character of the operator
        }

        pieces.push(ChainSegment {
            text: std::mem::take(&mut current),
            operator,
        });
        operator = next_operator;
    }
    pieces.push(ChainSegment {
        text: current,
        operator,
    });

    validate(pieces)
}

fn validate(pieces: Vec<ChainSegment>) -> Result<Vec<ChainSegment>, ChainError> {
    for (index, piece) in pieces.iter().enumerate() {
        if !piece.text.trim().is_empty() {
            continue;
        }
        if piece.operator.is_conditional() {
            return Err(ChainError::MissingCommand(piece.operator.token()));
        }
        if let Some(next) = pieces.get(index + 1) {
            if index == 0 || next.operator.is_conditional() {
                return Err(ChainError::UnexpectedOperator(next.operator.token()));
            }
        }
    }

    Ok(pieces
        .into_iter()
        .filter(|piece| !piece.text.trim().is_empty())
        .map(|piece| ChainSegment {
            text: piece.text.trim().to_string(),
            operator: piece.operator,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(line: &str) -> Vec<(String, ChainOperator)> {
        split(line)
            .unwrap_or_default()
            .into_iter()
            .map(|segment| (segment.text, segment.operator))
            .collect()
    }

    fn seg(text: &str, operator: ChainOperator) -> (String, ChainOperator) {
        (text.to_string(), operator)
    }

    #[test]
    fn test_split_operators() {
        use ChainOperator::*;

        assert_eq!(
            shape("echo hi ; false && echo never ; echo done"),
            vec![
                seg("echo hi", Normal),
                seg("false", Semi),
                seg("echo never", And),
                seg("echo done", Semi),
            ]
        );
        assert_eq!(
            shape("a||b&&c;d"),
            vec![seg("a", Normal), seg("b", Or), seg("c", And), seg("d", Semi)]
        );
    }

    #[test]
    fn test_single_ampersand_and_pipe_are_literal() {
        assert_eq!(
            shape("echo a&b | c"),
            vec![seg("echo a&b | c", ChainOperator::Normal)]
        );
    }

    #[test]
    fn test_empty_semicolon_segments_dropped() {
        use ChainOperator::*;

        assert_eq!(shape("ls ;"), vec![seg("ls", Normal)]);
        assert_eq!(shape("a ;; b"), vec![seg("a", Normal), seg("b", Semi)]);
        assert_eq!(shape("   "), vec![]);
        assert_eq!(shape(""), vec![]);
    }

    #[test]
    fn test_comments() {
        assert_eq!(strip_comment("echo hi # note"), "echo hi ");
        assert_eq!(strip_comment("# whole line"), "");
        assert_eq!(strip_comment("echo a#b"), "echo a#b");
        assert_eq!(
            shape("echo a#b ; ls # && rm -rf /"),
            vec![
                seg("echo a#b", ChainOperator::Normal),
                seg("ls", ChainOperator::Semi)
            ]
        );
        assert_eq!(shape("  # only a comment"), vec![]);
    }

    #[test]
    fn test_malformed_chains_rejected() {
        assert_eq!(split("&& ls"), Err(ChainError::UnexpectedOperator("&&")));
        assert_eq!(split("; ls"), Err(ChainError::UnexpectedOperator(";")));
        assert_eq!(split("ls ||"), Err(ChainError::MissingCommand("||")));
        assert_eq!(split("ls && && pwd"), Err(ChainError::MissingCommand("&&")));
        assert_eq!(split("ls ; || pwd"), Err(ChainError::UnexpectedOperator("||")));
    }

    #[test]
    fn test_gating() {
        assert!(ChainOperator::Normal.allows(1));
        assert!(ChainOperator::Semi.allows(1));
        assert!(ChainOperator::And.allows(0));
        assert!(!ChainOperator::And.allows(1));
        assert!(ChainOperator::Or.allows(127));
        assert!(!ChainOperator::Or.allows(0));
    }
}
