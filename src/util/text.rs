use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Number of terminal columns `s` occupies.
///
/// Wide characters (CJK, most emoji) count as two columns, combining marks as
/// zero.
///
/// ```
/// use toolshelf::util::display_width;
///
/// assert_eq!(display_width("Aider"), 5);
/// assert_eq!(display_width("你好"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Cut `s` down to at most `max_width` columns, ending in "..." when
/// something was removed.
///
/// Widths of 3 or less have no room for the ellipsis, so the result is just
/// the leading characters that fit. Returns `Cow::Borrowed` when `s` already
/// fits.
///
/// ```
/// use toolshelf::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Sourcery", 20), "Sourcery");
/// assert_eq!(truncate_to_width("GitHub Copilot", 9), "GitHub...");
/// assert_eq!(truncate_to_width("Tabnine", 3), "Tab");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    if max_width <= ELLIPSIS_WIDTH {
        let end = prefix_end(s, max_width);
        return if end == s.len() {
            Cow::Borrowed(s)
        } else {
            Cow::Owned(s[..end].to_owned())
        };
    }

    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let end = prefix_end(s, max_width - ELLIPSIS_WIDTH);
    Cow::Owned(format!("{}{}", &s[..end], ELLIPSIS))
}

/// Byte index just past the longest prefix of `s` fitting in `width` columns.
fn prefix_end(s: &str, width: usize) -> usize {
    let mut used = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            return idx;
        }
        used += w;
    }
    s.len()
}

fn is_stripped_control(b: u8) -> bool {
    b == 0x7f || (b < 0x20 && b != b'\t' && b != b'\n' && b != b'\r')
}

/// Remove terminal control characters and ANSI escape sequences.
///
/// Catalog files are user-supplied, so every displayed string passes through
/// here once at load time. Handles CSI (`ESC [` ... final byte), OSC
/// (`ESC ]` ... BEL or `ESC \`), bare ESC and C0/DEL controls. Tab, newline and
/// carriage return survive.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    if !bytes.iter().any(|&b| b == 0x1b || is_stripped_control(b)) {
        return Cow::Borrowed(s);
    }

    let len = bytes.len();
    let mut out = String::with_capacity(len);
    let mut i = 0;

    while i < len {
        match bytes[i] {
            0x1b if bytes.get(i + 1) == Some(&b'[') => {
                i += 2;
                while i < len {
                    let c = bytes[i];
                    i += 1;
                    if (0x40..=0x7e).contains(&c) {
                        break;
                    }
                }
            }
            0x1b if bytes.get(i + 1) == Some(&b']') => {
                i += 2;
                while i < len {
                    if bytes[i] == 0x07 {
                        i += 1;
                        break;
                    }
                    if bytes[i] == 0x1b && bytes.get(i + 1) == Some(&b'\\') {
                        i += 2;
                        break;
                    }
                    i += 1;
                }
            }
            b if b == 0x1b || is_stripped_control(b) => i += 1,
            _ => {
                let start = i;
                while i < len && bytes[i] != 0x1b && !is_stripped_control(bytes[i]) {
                    i += 1;
                }
                // Only ASCII bytes end a run, so the slice is on char boundaries.
                out.push_str(&s[start..i]);
            }
        }
    }

    Cow::Owned(out)
}
