//! Fixed-width letter tokens shared by the permission and inheritance codecs.
//!
//! A token assigns one position to every flag. A set flag renders as its
//! letter and an unset flag renders as [`UNSET`]. Parsing is position
//! independent: each character either names a flag, is [`UNSET`], or is
//! rejected.

use std::fmt::{self, Write};

use crate::error::{AclError, AclResult};

/// Placeholder emitted for flags that are not set.
pub(crate) const UNSET: char = '-';

/// Parses `token` against `letters`, returning the flags in table order.
///
/// The token length is not checked; unknown characters are reported through
/// `reject`.
pub(crate) fn parse_token<const N: usize>(
    token: &str,
    letters: &[char; N],
    reject: fn(char) -> AclError,
) -> AclResult<[bool; N]> {
    let mut flags = [false; N];

    for ch in token.chars() {
        if ch == UNSET {
            continue;
        }

        match letters.iter().position(|&letter| letter == ch) {
            Some(index) => flags[index] = true,
            None => return Err(reject(ch)),
        }
    }

    Ok(flags)
}

/// Writes one character per flag in table order.
pub(crate) fn write_token<const N: usize>(
    f: &mut fmt::Formatter<'_>,
    letters: &[char; N],
    flags: &[bool; N],
) -> fmt::Result {
    for (&letter, &set) in letters.iter().zip(flags) {
        f.write_char(if set { letter } else { UNSET })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LETTERS: [char; 3] = ['a', 'b', 'c'];

    struct Token([bool; 3]);

    impl fmt::Display for Token {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write_token(f, &LETTERS, &self.0)
        }
    }

    #[test]
    fn parse_token_sets_matching_positions() {
        let flags = parse_token("a-c", &LETTERS, AclError::UnexpectedPermissionLetter).unwrap();
        assert_eq!(flags, [true, false, true]);
    }

    #[test]
    fn parse_token_ignores_letter_position() {
        let flags = parse_token("ca", &LETTERS, AclError::UnexpectedPermissionLetter).unwrap();
        assert_eq!(flags, [true, false, true]);
    }

    #[test]
    fn parse_token_accepts_short_and_long_input() {
        let short = parse_token("", &LETTERS, AclError::UnexpectedPermissionLetter).unwrap();
        assert_eq!(short, [false; 3]);

        let long = parse_token("abc-----b", &LETTERS, AclError::UnexpectedPermissionLetter)
            .unwrap();
        assert_eq!(long, [true; 3]);
    }

    #[test]
    fn parse_token_rejects_unknown_characters() {
        let err = parse_token("ax", &LETTERS, AclError::UnexpectedInheritanceLetter).unwrap_err();
        assert_eq!(err, AclError::UnexpectedInheritanceLetter('x'));
    }

    #[test]
    fn write_token_is_fixed_width() {
        assert_eq!(Token([false; 3]).to_string(), "---");
        assert_eq!(Token([false, true, false]).to_string(), "-b-");
        assert_eq!(Token([true; 3]).to_string(), "abc");
    }
}
