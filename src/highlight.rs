use inksac::prelude::*;

/// Lexical class of a span of an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Command,
    Flag,
    Variable,
    Word,
    Operator,
    Comment,
    Space,
}

/// Splits `line` into classified spans. Concatenating the spans gives back
/// the line unchanged.
pub fn classify(line: &str) -> Vec<(TokenKind, &str)> {
    let mut spans: Vec<(TokenKind, &str)> = Vec::new();
    let mut expect_command = true;
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        let word_start = matches!(spans.last(), None | Some((TokenKind::Space, _)));

        let (kind, len) = if c.is_whitespace() {
            let len = rest
                .find(|c: char| !c.is_whitespace())
                .unwrap_or(rest.len());
            (TokenKind::Space, len)
        } else if c == '#' && word_start {
            (TokenKind::Comment, rest.len())
        } else if let Some(op) = operator_at(rest) {
            expect_command = true;
            (TokenKind::Operator, op.len())
        } else {
            let len = word_len(rest);
            let word = &rest[..len];
            let kind = if expect_command {
                TokenKind::Command
            } else if word.starts_with('-') {
                TokenKind::Flag
            } else if word.starts_with('$') {
                TokenKind::Variable
            } else {
                TokenKind::Word
            };
            expect_command = false;
            (kind, len)
        };

        spans.push((kind, &rest[..len]));
        rest = &rest[len..];
    }

    spans
}

fn operator_at(s: &str) -> Option<&'static str> {
    [";", "&&", "||"].into_iter().find(|op| s.starts_with(op))
}

fn word_len(s: &str) -> usize {
    s.char_indices()
        .find(|&(i, c)| c.is_whitespace() || operator_at(&s[i..]).is_some())
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    /// A highlighter that never emits escape codes.
    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    pub fn highlight_command(&self, input: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return input.to_string();
        }

        classify(input)
            .into_iter()
            .map(|(kind, text)| match Self::style_for(kind) {
                Some(style) => text.style(style).to_string(),
                None => text.to_string(),
            })
            .collect()
    }

    fn style_for(kind: TokenKind) -> Option<Style> {
        let style = match kind {
            TokenKind::Command => Style::builder().foreground(Color::Cyan).bold().build(),
            TokenKind::Flag => Style::builder().foreground(Color::Yellow).build(),
            TokenKind::Variable => Style::builder().foreground(Color::Green).build(),
            TokenKind::Operator => Style::builder().foreground(Color::Magenta).bold().build(),
            TokenKind::Comment => Style::builder()
                .foreground(Color::RGB(128, 128, 128))
                .build(),
            TokenKind::Word | TokenKind::Space => return None,
        };
        Some(style)
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();

        hint.style(hint_style).to_string()
    }
}
