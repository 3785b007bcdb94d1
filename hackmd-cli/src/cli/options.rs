//! Flag parsing for command tokens
//!
//! Only `--key value` pairs are recognised. A flag whose next token is
//! missing, empty, or itself starts with `--` is dropped; there are no
//! boolean flags.

use std::collections::BTreeMap;

const FLAG_PREFIX: &str = "--";

/// Keys whose values are coerced to integers
const INTEGER_KEYS: &[&str] = &["limit"];

/// A parsed option value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Text(String),
    Integer(i64),
}

/// Key/value options for a single invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    values: BTreeMap<String, OptionValue>,
}

impl Options {
    /// Parse `--key value` pairs out of a token list.
    ///
    /// Tokens that are neither a flag nor a consumed value are skipped, so
    /// positional arguments can share the same list.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut values = BTreeMap::new();
        let mut i = 0;

        while i < tokens.len() {
            let token: &str = tokens[i].as_ref();

            if let Some(key) = token.strip_prefix(FLAG_PREFIX) {
                let value: Option<&str> = tokens.get(i + 1).map(|v| v.as_ref());

                if let Some(value) = value.filter(|v| !v.is_empty() && !v.starts_with(FLAG_PREFIX)) {
                    if INTEGER_KEYS.contains(&key) {
                        if let Some(n) = parse_leading_integer(value) {
                            values.insert(key.to_string(), OptionValue::Integer(n));
                        }
                    } else {
                        values.insert(key.to_string(), OptionValue::Text(value.to_string()));
                    }
                    i += 1;
                }
            }

            i += 1;
        }

        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    /// Text value for `key`
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(OptionValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// First text value found among `keys`
    pub fn text_any(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.text(key))
    }

    /// The `limit` option, if it was given as a number
    pub fn limit(&self) -> Option<i64> {
        match self.values.get("limit") {
            Some(OptionValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parse an optional sign and leading digits, ignoring anything after them.
///
/// `"5"`, `" 5"` and `"5abc"` all give 5; `"abc"` gives `None`. Values past
/// the `i64` range clamp to its bounds.
fn parse_leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return None;
    }
    // Saturate instead of dropping the value on overflow
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);

    Some(if negative { -magnitude } else { magnitude })
}
