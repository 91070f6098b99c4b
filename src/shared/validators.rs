//! Credential Validators
//!
//! Pure checks applied to usernames and passwords before they reach the
//! store. No I/O happens here.
//!
//! Password strength is an entropy estimate built from character-class
//! diversity and effective length, not a dictionary lookup.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Minimum username length after trimming
pub const MIN_USERNAME_LEN: usize = 2;

/// Minimum password length after trimming
pub const MIN_PASSWORD_LEN: usize = 8;

/// Minimum estimated entropy, in bits, for a password to be accepted
pub const MIN_PASSWORD_ENTROPY: f64 = 60.0;

static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{1,15}$").expect("username pattern is valid"));

const REPLACE_CHARS: &str = "!@$&*";
const SEP_CHARS: &str = "_-., ";
const OTHER_SPECIAL_CHARS: &str = "\"#%'()+/:;<=>?[\\]^{|}~";
const LOWER_CHARS: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGIT_CHARS: &str = "0123456789";

const SEQUENCES: [&str; 6] = [
    "0123456789",
    "abcdefghijklmnopqrstuvwxyz",
    "qwertyuiop",
    "asdfghjkl",
    "zxcvbnm",
    "1qaz2wsx3edc4rfv5tgb6yhn7ujm8ik9ol0p",
];

/// A username that passed [`validate_username`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A password that passed [`validate_password`]
///
/// `Debug` is redacted so the value never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Validate a username
///
/// The input is trimmed, must be at least 2 characters, and must consist
/// of 1 to 15 ASCII letters, digits or underscores.
pub fn validate_username(raw: &str) -> Result<Username, SharedError> {
    let input = raw.trim();

    if input.chars().count() < MIN_USERNAME_LEN {
        return Err(SharedError::validation(
            "username",
            "username must be at least 2 characters",
        ));
    }

    if !USERNAME_PATTERN.is_match(input) {
        return Err(SharedError::validation(
            "username",
            "invalid username, only letters, digits and underscore, up to 15 characters",
        ));
    }

    Ok(Username(input.to_string()))
}

/// Validate a password
///
/// The input is trimmed and must be at least 8 characters long with an
/// estimated entropy of at least 60 bits.
pub fn validate_password(raw: &str) -> Result<Password, SharedError> {
    let input = raw.trim();

    if input.chars().count() < MIN_PASSWORD_LEN {
        return Err(SharedError::validation(
            "password",
            "password must be at least 8 characters",
        ));
    }

    if estimate_entropy(input) < MIN_PASSWORD_ENTROPY {
        return Err(SharedError::weak(format!(
            "password is not complex enough: {}",
            strength_hint(input)
        )));
    }

    Ok(Password(input.to_string()))
}

/// Estimate password entropy in bits
///
/// `effective_length * log2(pool_size)`, where the pool is the sum of the
/// character classes present and the effective length ignores long runs of
/// repeated or sequential characters.
pub fn estimate_entropy(password: &str) -> f64 {
    let base = character_pool(password);
    if base == 0 {
        return 0.0;
    }
    effective_length(password) as f64 * (base as f64).log2()
}

fn character_pool(password: &str) -> usize {
    let distinct: BTreeSet<char> = password.chars().collect();
    let classes = [
        REPLACE_CHARS,
        SEP_CHARS,
        OTHER_SPECIAL_CHARS,
        LOWER_CHARS,
        UPPER_CHARS,
        DIGIT_CHARS,
    ];

    let mut seen = [false; 6];
    let mut base = 0;
    for c in distinct {
        match classes.iter().position(|class| class.contains(c)) {
            Some(index) => seen[index] = true,
            None => base += 1,
        }
    }

    base + classes
        .iter()
        .zip(seen)
        .filter(|(_, present)| *present)
        .map(|(class, _)| class.chars().count())
        .sum::<usize>()
}

fn effective_length(password: &str) -> usize {
    let mut chars: Vec<char> = password.chars().collect();
    for sequence in SEQUENCES {
        chars = collapse_sequence(&chars, sequence);
    }
    collapse_repeats(&chars).len()
}

/// Drop the third and later characters of any run that walks `sequence`
fn collapse_sequence(chars: &[char], sequence: &str) -> Vec<char> {
    let position = |c: char| sequence.chars().position(|s| s == c.to_ascii_lowercase());

    let mut kept = Vec::with_capacity(chars.len());
    let mut previous: Option<usize> = None;
    let mut run = 0;
    for &c in chars {
        let current = position(c);
        run = match (previous, current) {
            (Some(p), Some(n)) if n == p + 1 => run + 1,
            (_, Some(_)) => 1,
            _ => 0,
        };
        previous = current;
        if run <= 2 {
            kept.push(c);
        }
    }
    kept
}

/// Keep at most two consecutive identical characters
fn collapse_repeats(chars: &[char]) -> Vec<char> {
    let mut kept: Vec<char> = Vec::with_capacity(chars.len());
    for &c in chars {
        let len = kept.len();
        if len >= 2 && kept[len - 1] == c && kept[len - 2] == c {
            continue;
        }
        kept.push(c);
    }
    kept
}

fn strength_hint(password: &str) -> String {
    let has = |class: &str| password.chars().any(|c| class.contains(c));

    let mut hints = Vec::new();
    if !(has(REPLACE_CHARS) || has(SEP_CHARS) || has(OTHER_SPECIAL_CHARS)) {
        hints.push("including special characters");
    }
    if !has(LOWER_CHARS) {
        hints.push("using lowercase letters");
    }
    if !has(UPPER_CHARS) {
        hints.push("using uppercase letters");
    }
    if !has(DIGIT_CHARS) {
        hints.push("including numbers");
    }
    hints.push("using a longer password");

    format!("try {}", hints.join(", "))
}
