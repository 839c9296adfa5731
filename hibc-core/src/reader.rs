//! Character cursor shared by the segment decoders
//!
//! HIBC fields are fixed-width from the front (labeler id, dates, quantity) or
//! single characters taken from the back (check, link, unit of measure). All
//! widths count characters, so a multibyte check character never splits a
//! code point.

/// Cursor over the not-yet-consumed middle of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldReader<'a> {
    rest: &'a str,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    pub(crate) fn rest(&self) -> &'a str {
        self.rest
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Take exactly `n` characters from the front
    pub(crate) fn take_front(&mut self, n: usize) -> Option<&'a str> {
        let end = byte_offset(self.rest, n)?;
        let (head, tail) = self.rest.split_at(end);
        self.rest = tail;
        Some(head)
    }

    /// Drop exactly `n` characters from the front
    pub(crate) fn skip(&mut self, n: usize) -> bool {
        self.take_front(n).is_some()
    }

    /// Take the last character
    pub(crate) fn take_back(&mut self) -> Option<char> {
        let last = self.rest.chars().next_back()?;
        self.rest = &self.rest[..self.rest.len() - last.len_utf8()];
        Some(last)
    }
}

/// Byte offset of the `n`th character, or `None` if `s` is shorter than `n`
pub(crate) fn byte_offset(s: &str, n: usize) -> Option<usize> {
    if n == 0 {
        return Some(0);
    }
    match s.char_indices().nth(n) {
        Some((idx, _)) => Some(idx),
        None if s.chars().count() == n => Some(s.len()),
        None => None,
    }
}

/// True when every character of `s` is an ASCII digit and `s` is non-empty
pub(crate) fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_front_and_back() {
        let mut reader = FieldReader::new("Z9991234C");
        assert_eq!(reader.take_front(4), Some("Z999"));
        assert_eq!(reader.take_back(), Some('C'));
        assert_eq!(reader.rest(), "1234");
    }

    #[test]
    fn test_take_front_too_long() {
        let mut reader = FieldReader::new("abc");
        assert_eq!(reader.take_front(4), None);
        assert_eq!(reader.rest(), "abc");
        assert_eq!(reader.take_front(3), Some("abc"));
        assert!(reader.is_empty());
    }

    #[test]
    fn test_multibyte_characters() {
        let mut reader = FieldReader::new("$1é€");
        assert_eq!(reader.take_back(), Some('€'));
        assert_eq!(reader.take_back(), Some('é'));
        assert_eq!(reader.take_front(1), Some("$"));
        assert_eq!(reader.peek(), Some('1'));
    }

    #[test]
    fn test_all_digits() {
        assert!(all_digits("0905"));
        assert!(!all_digits(""));
        assert!(!all_digits("09a5"));
        assert!(!all_digits("+12"));
    }
}
