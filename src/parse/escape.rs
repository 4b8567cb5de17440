use crate::pct_enc;

/// Validates percent-encoded sequences as the characters stream past.
///
/// An escape is started by `%` and normally needs two hexadecimal digits.
/// Where the `%uXXXX` form is allowed, a `u` in place of the first digit
/// extends the countdown to four digits.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct PctEscape {
    remaining: u8,
    wide: bool,
    start: usize,
}

/// Why a character was rejected by [`PctEscape::feed`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EscapeError {
    /// A `%` while another escape is still open.
    Nested,
    /// A character that is not a hexadecimal digit.
    NotHex,
}

impl PctEscape {
    /// Checks whether an escape is still waiting for digits.
    pub(crate) fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Index of the `%` that opened the current escape.
    pub(crate) fn start(&self) -> usize {
        self.start
    }

    /// Opens an escape at index `i`.
    pub(crate) fn begin(&mut self, i: usize) -> Result<(), EscapeError> {
        if self.is_active() {
            return Err(EscapeError::Nested);
        }
        *self = PctEscape {
            remaining: 2,
            wide: false,
            start: i,
        };
        Ok(())
    }

    /// Feeds the next character to an active escape.
    pub(crate) fn feed(&mut self, x: u8, allow_wide: bool) -> Result<(), EscapeError> {
        debug_assert!(self.is_active());
        if x == b'%' {
            return Err(EscapeError::Nested);
        }
        if allow_wide && x == b'u' && !self.wide && self.remaining == 2 {
            self.wide = true;
            self.remaining = 4;
            return Ok(());
        }
        if !pct_enc::is_hexdig(x) {
            return Err(EscapeError::NotHex);
        }
        self.remaining -= 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(s: &str, allow_wide: bool) -> Result<bool, EscapeError> {
        let mut esc = PctEscape::default();
        for (i, &x) in s.as_bytes().iter().enumerate() {
            if esc.is_active() {
                esc.feed(x, allow_wide)?;
            } else if x == b'%' {
                esc.begin(i)?;
            }
        }
        Ok(esc.is_active())
    }

    #[test]
    fn two_digits() {
        assert_eq!(run("%20", false), Ok(false));
        assert_eq!(run("a%2", false), Ok(true));
        assert_eq!(run("%2g", false), Err(EscapeError::NotHex));
        assert_eq!(run("%2%", false), Err(EscapeError::Nested));
    }

    #[test]
    fn wide_form() {
        assert_eq!(run("%u00e9", true), Ok(false));
        assert_eq!(run("%u00e", true), Ok(true));
        assert_eq!(run("%u00e9", false), Err(EscapeError::NotHex));
        // Only the first digit may be `u`.
        assert_eq!(run("%2u", true), Err(EscapeError::NotHex));
        assert_eq!(run("%uu00", true), Err(EscapeError::NotHex));
    }
}
