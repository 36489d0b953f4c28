//! Newline-aware splitting of leaf text.
//!
//! A leaf is decomposed into atomic runs that alternate between a maximal
//! run of non-newline characters and a single newline marker. `\r\n`, `\r`
//! and `\n` are each one marker.

/// Whether `run` is exactly one newline marker.
pub fn is_newline(run: &str) -> bool {
    matches!(run, "\n" | "\r" | "\r\n")
}

/// Split `text` into alternating text runs and newline markers.
///
/// The sequence always starts and ends with a (possibly empty) text run, so
/// `""` yields `[""]` and `"a\n"` yields `["a", "\n", ""]`.
pub fn split_on_newlines(text: &str) -> SplitNewlines<'_> {
    SplitNewlines {
        rest: text,
        pending_newline: false,
        done: false,
    }
}

/// Iterator returned by [`split_on_newlines`].
#[derive(Debug, Clone)]
pub struct SplitNewlines<'a> {
    rest: &'a str,
    pending_newline: bool,
    done: bool,
}

impl<'a> Iterator for SplitNewlines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.done {
            return None;
        }

        if self.pending_newline {
            self.pending_newline = false;
            let bytes = self.rest.as_bytes();
            let width = if bytes.starts_with(b"\r\n") { 2 } else { 1 };
            let (marker, rest) = self.rest.split_at(width);
            self.rest = rest;
            return Some(marker);
        }

        match self.rest.find(&['\n', '\r'][..]) {
            Some(idx) => {
                let (run, rest) = self.rest.split_at(idx);
                self.rest = rest;
                self.pending_newline = true;
                Some(run)
            }
            None => {
                self.done = true;
                Some(self.rest)
            }
        }
    }
}

/// Number of columns a text run occupies.
pub fn column_width(run: &str) -> i64 {
    i64::try_from(run.chars().count()).unwrap_or(i64::MAX)
}
