//! Small shared helpers.

pub mod encoding;
pub mod env;
pub mod hashing;
pub mod tokens;

pub use encoding::read_text_strict;
pub use env::expand_env_vars;
pub use hashing::short_content_hash;
pub use tokens::{estimate_tokens, format_token_count};

/// Render an integer with `,` thousands separators, e.g. `1,928,452`.
pub fn format_with_commas(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
