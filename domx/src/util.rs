//! Utility functions.

use std::borrow::Cow;

use bumpalo::collections::String as BumpString;
use bumpalo::Bump;

/// Escape text for inclusion in attribute values and element bodies.
///
/// `&`, `<`, `>`, `"` and `'` are replaced with entity references. Text without
/// any of these characters is returned borrowed.
pub fn escape(text: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(text)
}

/// Kebab-case an identifier.
///
/// A hyphen is inserted before every ASCII uppercase letter that is not the first
/// character, underscores become hyphens, and the result is lowercased. Existing
/// hyphens are kept, so already-kebab-cased names come back unchanged.
pub fn kebab_case<'bump>(bump: &'bump Bump, s: &str) -> BumpString<'bump> {
    let mut result = BumpString::with_capacity_in(s.len() + 4, bump);
    for (idx, c) in s.char_indices() {
        match c {
            '_' => result.push('-'),
            'A'..='Z' => {
                if idx > 0 {
                    result.push('-');
                }
                result.push(c.to_ascii_lowercase());
            }
            _ => result.extend(c.to_lowercase()),
        }
    }
    result
}
