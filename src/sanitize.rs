//! Text normalization applied to free-text names before they are exposed.

/// Pure string normalizer. The batch form must keep length and order.
pub trait Sanitizer {
    fn sanitize(&self, text: &str) -> String;

    fn sanitize_all<I>(&self, texts: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        texts
            .into_iter()
            .map(|text| self.sanitize(text.as_ref()))
            .collect()
    }
}

impl<F> Sanitizer for F
where
    F: Fn(&str) -> String,
{
    fn sanitize(&self, text: &str) -> String {
        self(text)
    }
}

/// Leaves text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl Sanitizer for Verbatim {
    fn sanitize(&self, text: &str) -> String {
        text.to_string()
    }
}

const PAYLOAD_START: char = '\u{02}';
const PAYLOAD_END: char = '\u{03}';
const SOFT_HYPHEN: char = '\u{ad}';

/// Strips embedded payload segments (STX .. ETX), soft hyphens, zero-width
/// characters and other control characters from game strings, then trims.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeStringSanitizer;

impl Sanitizer for SeStringSanitizer {
    fn sanitize(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut in_payload = false;
        for ch in text.chars() {
            if in_payload {
                in_payload = ch != PAYLOAD_END;
                continue;
            }
            match ch {
                PAYLOAD_START => in_payload = true,
                SOFT_HYPHEN | '\u{200b}' | '\u{200c}' | '\u{200d}' | '\u{feff}' => {}
                ch if ch.is_control() && !matches!(ch, ' ' | '\t' | '\n') => {}
                ch => out.push(ch),
            }
        }
        out.trim().to_string()
    }
}
