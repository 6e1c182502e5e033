//! Permissive numeric parsing for calculator input fields.
//!
//! Field text is read the way a forgiving decimal reader would: leading
//! whitespace is skipped and the longest numeric prefix is taken, so
//! `"12abc"` reads as 12 and `"3.3 V"` as 3.3. Text without a numeric
//! prefix yields `None`, which every formula treats as a missing input.
//!
//! # Grammar
//!
//! ```bnf
//! Number   ::= Sign? ( "Infinity" | Decimal ) Exponent?
//! Decimal  ::= Digits ( "." Digits? )? | "." Digits
//! Exponent ::= ( "e" | "E" ) Sign? Digits
//! Sign     ::= "+" | "-"
//! Digits   ::= [0-9]+
//! ```
//!
//! An exponent marker that is not followed by digits is left unconsumed,
//! so `"1e"` reads as 1.

/// Scanner that walks the field text and records the end of the longest
/// numeric prefix.
struct NumberScanner {
    input: Vec<char>,
    position: usize,
    current_char: Option<char>,
}

impl NumberScanner {
    fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let current_char = chars.first().copied();

        Self {
            input: chars,
            position: 0,
            current_char,
        }
    }

    fn advance(&mut self) {
        self.position += 1;
        self.current_char = self.input.get(self.position).copied();
    }

    fn rewind(&mut self, position: usize) {
        self.position = position;
        self.current_char = self.input.get(position).copied();
    }

    fn skip_whitespace(&mut self) {
        // U+FEFF counts as whitespace for form fields but not for char::is_whitespace
        while let Some(ch) = self.current_char {
            if ch.is_whitespace() || ch == '\u{FEFF}' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn skip_sign(&mut self) {
        if matches!(self.current_char, Some('+') | Some('-')) {
            self.advance();
        }
    }

    /// Consumes a run of ASCII digits and returns how many were read.
    fn read_digits(&mut self) -> usize {
        let mut count = 0;
        while let Some(ch) = self.current_char {
            if ch.is_ascii_digit() {
                count += 1;
                self.advance();
            } else {
                break;
            }
        }
        count
    }

    fn read_keyword(&mut self, keyword: &str) -> bool {
        let start = self.position;
        for expected in keyword.chars() {
            if self.current_char != Some(expected) {
                self.rewind(start);
                return false;
            }
            self.advance();
        }
        true
    }

    /// Scans the numeric prefix and returns it as a string, if any.
    fn scan(mut self) -> Option<String> {
        self.skip_whitespace();
        let start = self.position;
        self.skip_sign();

        if self.read_keyword("Infinity") {
            return Some(self.input[start..self.position].iter().collect());
        }

        let integer_digits = self.read_digits();
        let mut fraction_digits = 0;
        if self.current_char == Some('.') {
            self.advance();
            fraction_digits = self.read_digits();
        }

        if integer_digits == 0 && fraction_digits == 0 {
            return None;
        }

        if matches!(self.current_char, Some('e') | Some('E')) {
            let mantissa_end = self.position;
            self.advance();
            self.skip_sign();
            if self.read_digits() == 0 {
                self.rewind(mantissa_end);
            }
        }

        Some(self.input[start..self.position].iter().collect())
    }
}

/// Parses the leading numeric prefix of `text`.
///
/// Returns `None` when the text has no numeric prefix. Never panics.
///
/// # Examples
///
/// ```
/// use quickcalc::domain::parse_number;
///
/// assert_eq!(parse_number("12abc"), Some(12.0));
/// assert_eq!(parse_number("  .5"), Some(0.5));
/// assert_eq!(parse_number("abc"), None);
/// ```
pub fn parse_number(text: &str) -> Option<f64> {
    let prefix = NumberScanner::new(text).scan()?;
    // f64::from_str accepts "5.", ".5", "+Infinity" and exponents
    prefix.parse::<f64>().ok()
}
