use std::borrow::Cow;

use crate::core::aliases::AliasTable;
use crate::core::env::EnvStore;

/// Upper bound on alias passes for one segment; cyclic aliases stop here.
pub const MAX_ALIAS_PASSES: usize = 10;

/// Values visible to `$?`, `$$` and `$NAME`.
pub struct Expansion<'a> {
    pub env: &'a EnvStore,
    pub status: i32,
    pub pid: u32,
}

/// Applies alias expansion to the head token, then variable expansion to every
/// token. Returns the input borrowed when nothing matched.
pub fn substitute<'a>(
    tokens: &'a [String],
    aliases: &AliasTable,
    expansion: &Expansion<'_>,
) -> Cow<'a, [String]> {
    let aliased = expand_aliases(tokens, aliases);
    match expand_variables(&aliased, expansion) {
        Some(expanded) => Cow::Owned(expanded),
        None => aliased,
    }
}

/// Replaces the head token by its alias definition, repeatedly, at most
/// [`MAX_ALIAS_PASSES`] times. A definition starting with its own name is a
/// fixed point and ends expansion.
pub fn expand_aliases<'a>(tokens: &'a [String], aliases: &AliasTable) -> Cow<'a, [String]> {
    let mut current = Cow::Borrowed(tokens);

    for _ in 0..MAX_ALIAS_PASSES {
        let Some(head) = current.first() else {
            break;
        };
        let Some(definition) = aliases.get(head) else {
            break;
        };

        let mut expanded: Vec<String> = definition.split_whitespace().map(String::from).collect();
        let fixed_point = expanded.first() == Some(head);
        log::debug!("alias {} -> {}", head, definition);

        expanded.extend(current[1..].iter().cloned());
        current = Cow::Owned(expanded);
        if fixed_point {
            break;
        }
    }

    current
}

/// Expands `$?`, `$$` and `$NAME` inside every token. Tokens that expand to
/// nothing are removed. `None` means no token contained an expansion.
pub fn expand_variables(tokens: &[String], expansion: &Expansion<'_>) -> Option<Vec<String>> {
    if !tokens.iter().any(|token| token.contains('$')) {
        return None;
    }

    let mut changed = false;
    let mut expanded = Vec::with_capacity(tokens.len());
    for token in tokens {
        match expand_token(token, expansion) {
            Cow::Borrowed(original) => expanded.push(original.to_string()),
            Cow::Owned(value) => {
                changed = true;
                if !value.is_empty() {
                    expanded.push(value);
                }
            }
        }
    }

    changed.then_some(expanded)
}

fn expand_token<'a>(token: &'a str, expansion: &Expansion<'_>) -> Cow<'a, str> {
    if !token.contains('$') {
        return Cow::Borrowed(token);
    }

    let mut result = String::with_capacity(token.len());
    let mut modified = false;
    let mut rest = token;

    while let Some(dollar_pos) = rest.find('$') {
        result.push_str(&rest[..dollar_pos]);
        let after = &rest[dollar_pos + 1..];

        let consumed = match after.chars().next() {
            Some('?') => {
                result.push_str(&expansion.status.to_string());
                1
            }
            Some('$') => {
                result.push_str(&expansion.pid.to_string());
                1
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let var_end = after
                    .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
                    .unwrap_or(after.len());
                result.push_str(expansion.env.get(&after[..var_end]).unwrap_or(""));
                var_end
            }
            _ => {
                result.push('$');
                rest = after;
                continue;
            }
        };
        modified = true;
        rest = &after[consumed..];
    }
    result.push_str(rest);

    if modified {
        Cow::Owned(result)
    } else {
        Cow::Borrowed(token)
    }
}
