//! printf-style message templates.
//!
//! Supported specifier grammar:
//!
//! ```text
//! %[index$][flags][width][.precision]conversion
//! ```
//!
//! | Conversion | Output | Flags |
//! |------------|--------|-------|
//! | `s` `c` `b` | the argument's `Display` | `-` |
//! | `S` | the argument's `Display`, upper-cased | `-` |
//! | `d` | decimal integer | `- 0 + space ,` |
//! | `x` `X` `o` | hexadecimal / octal integer | `- 0 #` |
//! | `f` | fixed-point, 6 decimals unless a precision is given | `- 0 + space ,` |
//! | `e` `E` | scientific, `1.500000e+01` | `- 0 + space` |
//! | `%` | a literal `%` | |
//! | `n` | a line feed | |
//!
//! Numeric conversions parse the argument's `Display` output, so any integer
//! or float type works; anything else is a [`FormatError::NotANumber`].
//! Negative values keep their sign under `x`/`o` (`-ff`) since the source
//! type's width is unknown. Precision truncates strings and is rejected on
//! `c`, `d`, `x`, `X` and `o`. Arguments beyond those referenced are ignored.

use std::fmt::{self, Display, Write};
use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::FormatError;

/// Renders `template` with positional `args`.
///
/// ```rust
/// use guacamole_log::template::render;
///
/// let msg = render("something went %s after %.1f s", &[&"wrong", &2.5]).unwrap();
/// assert_eq!(msg, "something went wrong after 2.5 s");
/// ```
pub fn render(template: &str, args: &[&dyn Display]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut chars = template.char_indices().peekable();
    let mut next_implicit = 0usize;

    while let Some((pos, c)) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let spec = Spec::parse(&mut chars, pos)?;
        match spec.conversion {
            '%' => out.push('%'),
            'n' => out.push('\n'),
            _ => {
                spec.validate()?;
                let index = match spec.index {
                    Some(0) => return Err(FormatError::ZeroIndex { position: pos }),
                    Some(i) => i - 1,
                    None => {
                        next_implicit += 1;
                        next_implicit - 1
                    }
                };
                let arg = args.get(index).ok_or(FormatError::MissingArgument {
                    position: pos,
                    index: index + 1,
                    available: args.len(),
                })?;
                spec.write_arg(&mut out, *arg)?;
            }
        }
    }

    Ok(out)
}

#[derive(Debug, Default, Clone, Copy)]
struct Flags {
    left: bool,
    zero: bool,
    plus: bool,
    space: bool,
    group: bool,
    alternate: bool,
}

impl Flags {
    /// Records `c` if it is a flag character.
    fn set(&mut self, c: char) -> bool {
        match c {
            '-' => self.left = true,
            '0' => self.zero = true,
            '+' => self.plus = true,
            ' ' => self.space = true,
            ',' => self.group = true,
            '#' => self.alternate = true,
            _ => return false,
        }
        true
    }

    fn present(&self) -> impl Iterator<Item = char> {
        [
            (self.left, '-'),
            (self.zero, '0'),
            (self.plus, '+'),
            (self.space, ' '),
            (self.group, ','),
            (self.alternate, '#'),
        ]
        .into_iter()
        .filter_map(|(on, c)| on.then_some(c))
    }
}

#[derive(Debug, Default)]
struct Spec {
    position: usize,
    index: Option<usize>,
    flags: Flags,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: char,
}

impl Spec {
    fn parse(chars: &mut Peekable<CharIndices<'_>>, position: usize) -> Result<Self, FormatError> {
        let mut spec = Spec { position, ..Spec::default() };

        // Leading digits are an explicit index (`2$`), zero flags, or the width.
        let mut digits = take_digits(chars);
        if !digits.is_empty() && next_is(chars, '$') {
            chars.next();
            spec.index = Some(to_number(&digits));
            digits.clear();
        }

        if digits.bytes().all(|b| b == b'0') {
            spec.flags.zero |= !digits.is_empty();
            while let Some(&(_, c)) = chars.peek() {
                if !spec.flags.set(c) {
                    break;
                }
                chars.next();
            }
            digits = take_digits(chars);
        }

        let width = digits.trim_start_matches('0');
        if width.len() != digits.len() {
            spec.flags.zero = true;
        }
        if !width.is_empty() {
            spec.width = Some(to_number(width));
        }

        if next_is(chars, '.') {
            chars.next();
            spec.precision = Some(to_number(&take_digits(chars)));
        }

        let (_, conversion) = chars.next().ok_or(FormatError::DanglingPercent)?;
        spec.conversion = conversion;
        Ok(spec)
    }

    fn validate(&self) -> Result<(), FormatError> {
        let (conversion, position) = (self.conversion, self.position);
        let (allowed, takes_precision) = match conversion {
            's' | 'S' | 'b' => ("-", true),
            'c' => ("-", false),
            'd' => ("-0+ ,", false),
            'x' | 'X' | 'o' => ("-0#", false),
            'f' => ("-0+ ,", true),
            'e' | 'E' => ("-0+ ", true),
            other => return Err(FormatError::UnknownConversion { conversion: other, position }),
        };

        if let Some(flag) = self.flags.present().find(|f| !allowed.contains(*f)) {
            return Err(FormatError::UnsupportedFlag { flag, conversion, position });
        }
        if self.flags.left && self.flags.zero {
            return Err(FormatError::ConflictingFlags { first: '-', second: '0', position });
        }
        if self.flags.plus && self.flags.space {
            return Err(FormatError::ConflictingFlags { first: '+', second: ' ', position });
        }
        if self.width.is_none() {
            if let Some(flag) = self.flags.present().find(|f| matches!(f, '-' | '0')) {
                return Err(FormatError::MissingWidth { flag, position });
            }
        }
        if self.precision.is_some() && !takes_precision {
            return Err(FormatError::IllegalPrecision { conversion, position });
        }
        Ok(())
    }

    fn write_arg(&self, out: &mut String, arg: &dyn Display) -> Result<(), FormatError> {
        match self.conversion {
            'd' => {
                let (negative, magnitude) = self.integer(arg)?;
                let digits = magnitude.to_string();
                let digits = if self.flags.group { group_thousands(&digits) } else { digits };
                self.pad_number(out, &self.sign(negative), &digits);
            }
            'x' | 'X' | 'o' => {
                let (negative, magnitude) = self.integer(arg)?;
                let (digits, radix_prefix) = match self.conversion {
                    'o' => (format!("{magnitude:o}"), "0"),
                    _ => (format!("{magnitude:x}"), "0x"),
                };
                let mut prefix = if negative { "-".to_owned() } else { String::new() };
                if self.flags.alternate {
                    prefix.push_str(radix_prefix);
                }
                if self.conversion == 'X' {
                    self.pad_number(out, &prefix.to_uppercase(), &digits.to_uppercase());
                } else {
                    self.pad_number(out, &prefix, &digits);
                }
            }
            'f' | 'e' | 'E' => {
                let value = self.float(arg)?;
                if !value.is_finite() {
                    let text = if value.is_nan() {
                        "NaN".to_owned()
                    } else {
                        format!("{}Infinity", self.sign(value < 0.0))
                    };
                    self.pad_text(out, &self.case(text));
                    return Ok(());
                }

                let precision = self.precision.unwrap_or(6);
                let digits = if self.conversion == 'f' {
                    let fixed = format!("{:.precision$}", value.abs());
                    if self.flags.group { group_fraction(&fixed) } else { fixed }
                } else {
                    scientific(value.abs(), precision)
                };
                self.pad_number(out, &self.sign(value < 0.0), &self.case(digits));
            }
            _ => {
                let text = match self.precision {
                    Some(p) => format!("{arg:.p$}"),
                    None => arg.to_string(),
                };
                self.pad_text(out, &self.case(text));
            }
        }
        Ok(())
    }

    fn case(&self, text: String) -> String {
        if self.conversion.is_ascii_uppercase() { text.to_uppercase() } else { text }
    }

    fn sign(&self, negative: bool) -> String {
        let sign = if negative {
            "-"
        } else if self.flags.plus {
            "+"
        } else if self.flags.space {
            " "
        } else {
            ""
        };
        sign.to_owned()
    }

    fn integer(&self, arg: &dyn Display) -> Result<(bool, u128), FormatError> {
        let text = arg.to_string();
        let trimmed = text.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        match digits.parse::<u128>() {
            Ok(magnitude) => Ok((negative && magnitude != 0, magnitude)),
            Err(_) => Err(self.not_a_number(text)),
        }
    }

    fn float(&self, arg: &dyn Display) -> Result<f64, FormatError> {
        let text = arg.to_string();
        text.trim().parse::<f64>().map_err(|_| self.not_a_number(text))
    }

    fn not_a_number(&self, value: String) -> FormatError {
        FormatError::NotANumber { conversion: self.conversion, position: self.position, value }
    }

    fn pad_text(&self, out: &mut String, text: &str) {
        let pad = self.width.unwrap_or(0).saturating_sub(text.chars().count());
        if pad == 0 {
            out.push_str(text);
        } else if self.flags.left {
            let _ = write!(out, "{text}{:pad$}", "");
        } else {
            let _ = write!(out, "{:pad$}{text}", "");
        }
    }

    /// Zero padding goes between the sign/radix prefix and the digits.
    fn pad_number(&self, out: &mut String, prefix: &str, digits: &str) {
        if !self.flags.zero {
            self.pad_text(out, &format!("{prefix}{digits}"));
            return;
        }
        let len = prefix.chars().count() + digits.chars().count();
        let pad = self.width.unwrap_or(0).saturating_sub(len);
        out.push_str(prefix);
        out.extend(std::iter::repeat_n('0', pad));
        out.push_str(digits);
    }
}

/// `1.5e1` style from Rust becomes `1.500000e+01`.
fn scientific(value: f64, precision: usize) -> String {
    let rust = format!("{value:.precision$e}");
    let (mantissa, exponent) = rust.split_once('e').unwrap_or((rust.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn group_fraction(fixed: &str) -> String {
    match fixed.split_once('.') {
        Some((int, frac)) => format!("{}.{frac}", group_thousands(int)),
        None => group_thousands(fixed),
    }
}

fn next_is(chars: &mut Peekable<CharIndices<'_>>, expected: char) -> bool {
    matches!(chars.peek(), Some(&(_, c)) if c == expected)
}

fn take_digits(chars: &mut Peekable<CharIndices<'_>>) -> String {
    let mut digits = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    digits
}

fn to_number(digits: &str) -> usize {
    digits.bytes().fold(0usize, |acc, b| {
        acc.saturating_mul(10).saturating_add(usize::from(b - b'0'))
    })
}

/// Adapter so `fmt::Arguments` can be rendered through the same path as
/// templates.
pub(crate) fn render_args(args: fmt::Arguments<'_>) -> String {
    match args.as_str() {
        Some(s) => s.to_owned(),
        None => args.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(template: &str, args: &[&dyn Display]) -> String {
        render(template, args).unwrap()
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(ok("no specifiers here", &[]), "no specifiers here");
    }

    #[test]
    fn substitutes_in_order() {
        assert_eq!(ok("%s loaded %d assets", &[&"atlas", &42]), "atlas loaded 42 assets");
    }

    #[test]
    fn explicit_indices() {
        assert_eq!(ok("%2$s %1$s", &[&"world", &"hello"]), "hello world");
    }

    #[test]
    fn implicit_counter_ignores_explicit() {
        assert_eq!(ok("%2$s %s %s", &[&"a", &"b"]), "b a b");
    }

    #[test]
    fn percent_and_newline() {
        assert_eq!(ok("100%% done%n", &[]), "100% done\n");
    }

    #[test]
    fn width_and_justification() {
        assert_eq!(ok("[%5s]", &[&"ab"]), "[   ab]");
        assert_eq!(ok("[%-5s]", &[&"ab"]), "[ab   ]");
        assert_eq!(ok("[%1s]", &[&"abc"]), "[abc]");
    }

    #[test]
    fn precision_rounds_floats_and_truncates_strings() {
        assert_eq!(ok("%.2f", &[&3.14159]), "3.14");
        assert_eq!(ok("%.3s", &[&"abcdef"]), "abc");
        assert_eq!(ok("%8.3f|", &[&1.5]), "   1.500|");
    }

    #[test]
    fn upper_case_conversion() {
        assert_eq!(ok("%S", &[&"loud"]), "LOUD");
    }

    #[test]
    fn extra_arguments_are_ignored() {
        assert_eq!(ok("only %s", &[&"one", &"two"]), "only one");
    }

    #[test]
    fn missing_argument_is_an_error() {
        let err = render("%s and %s", &[&"one"]).unwrap_err();
        assert_eq!(err, FormatError::MissingArgument { position: 7, index: 2, available: 1 });
    }

    #[test]
    fn unknown_conversion_is_an_error() {
        let err = render("value %q", &[&1]).unwrap_err();
        assert_eq!(err, FormatError::UnknownConversion { conversion: 'q', position: 6 });
    }

    #[test]
    fn dangling_percent_is_an_error() {
        assert_eq!(render("50%", &[]).unwrap_err(), FormatError::DanglingPercent);
    }

    #[test]
    fn zero_index_is_an_error() {
        assert_eq!(render("%0$s", &[&1]).unwrap_err(), FormatError::ZeroIndex { position: 0 });
    }

    // ── flags ─────────────────────────────────────────────────────────────

    #[test]
    fn zero_flag_pads_with_zeros() {
        assert_eq!(ok("id=%05d", &[&42]), "id=00042");
        assert_eq!(ok("%05d", &[&-42]), "-0042");
        assert_eq!(ok("%08.2f", &[&-3.14159]), "-0003.14");
        assert_eq!(ok("%1$05d", &[&7]), "00007");
    }

    #[test]
    fn plus_and_space_flags_sign_numbers() {
        assert_eq!(ok("dx=%+d", &[&3]), "dx=+3");
        assert_eq!(ok("%+d", &[&-3]), "-3");
        assert_eq!(ok("[% d]", &[&5]), "[ 5]");
        assert_eq!(ok("%+.1f", &[&2.5]), "+2.5");
        assert_eq!(ok("%0+6d", &[&12]), "+00012");
    }

    #[test]
    fn grouping_flag() {
        assert_eq!(ok("%,d", &[&1234567]), "1,234,567");
        assert_eq!(ok("%,d", &[&-999]), "-999");
        assert_eq!(ok("%,.2f", &[&1234567.891]), "1,234,567.89");
    }

    #[test]
    fn alternate_flag_adds_radix_prefix() {
        assert_eq!(ok("%#x", &[&255]), "0xff");
        assert_eq!(ok("%#X", &[&255]), "0XFF");
        assert_eq!(ok("%#o", &[&8]), "010");
        assert_eq!(ok("%#06x", &[&255]), "0x00ff");
    }

    #[test]
    fn flags_in_any_order() {
        assert_eq!(ok("[%-+6d]", &[&4]), "[+4    ]");
        assert_eq!(ok("[%+-6d]", &[&4]), "[+4    ]");
    }

    // ── numeric conversions ───────────────────────────────────────────────

    #[test]
    fn hex_and_octal() {
        assert_eq!(ok("mask=%x", &[&255]), "mask=ff");
        assert_eq!(ok("%X", &[&48879u32]), "BEEF");
        assert_eq!(ok("%o", &[&64]), "100");
        assert_eq!(ok("%x", &[&-255]), "-ff");
    }

    #[test]
    fn fixed_point_defaults_to_six_decimals() {
        assert_eq!(ok("%f", &[&1.5]), "1.500000");
        assert_eq!(ok("%f", &[&2]), "2.000000");
    }

    #[test]
    fn scientific_notation() {
        assert_eq!(ok("%e", &[&15.0]), "1.500000e+01");
        assert_eq!(ok("%.2e", &[&0.00123]), "1.23e-03");
        assert_eq!(ok("%E", &[&15.0]), "1.500000E+01");
    }

    #[test]
    fn non_finite_floats() {
        assert_eq!(ok("%f", &[&f64::NAN]), "NaN");
        assert_eq!(ok("%08f", &[&f64::NEG_INFINITY]), "-Infinity");
    }

    #[test]
    fn non_numeric_argument_is_an_error() {
        assert_eq!(
            render("%d", &[&"seven"]).unwrap_err(),
            FormatError::NotANumber { conversion: 'd', position: 0, value: "seven".to_owned() }
        );
        assert!(matches!(render("%d", &[&1.5]), Err(FormatError::NotANumber { .. })));
        assert!(matches!(render("%x", &[&"ff"]), Err(FormatError::NotANumber { .. })));
    }

    // ── flag errors ───────────────────────────────────────────────────────

    #[test]
    fn unsupported_flags_are_errors() {
        assert_eq!(
            render("%05s", &[&"ab"]).unwrap_err(),
            FormatError::UnsupportedFlag { flag: '0', conversion: 's', position: 0 }
        );
        assert!(matches!(render("%+x", &[&1]), Err(FormatError::UnsupportedFlag { flag: '+', .. })));
        assert!(matches!(render("%#d", &[&1]), Err(FormatError::UnsupportedFlag { flag: '#', .. })));
        assert!(matches!(render("%,e", &[&1.0]), Err(FormatError::UnsupportedFlag { flag: ',', .. })));
    }

    #[test]
    fn conflicting_flags_are_errors() {
        assert_eq!(
            render("%-05d", &[&1]).unwrap_err(),
            FormatError::ConflictingFlags { first: '-', second: '0', position: 0 }
        );
        assert!(matches!(render("%+ d", &[&1]), Err(FormatError::ConflictingFlags { .. })));
    }

    #[test]
    fn justification_needs_a_width() {
        assert_eq!(render("%-s", &[&"a"]).unwrap_err(), FormatError::MissingWidth { flag: '-', position: 0 });
        assert_eq!(render("%0d", &[&1]).unwrap_err(), FormatError::MissingWidth { flag: '0', position: 0 });
    }

    #[test]
    fn precision_on_integers_is_an_error() {
        assert_eq!(
            render("%.2d", &[&1]).unwrap_err(),
            FormatError::IllegalPrecision { conversion: 'd', position: 0 }
        );
    }

    #[test]
    fn fmt_arguments_render() {
        assert_eq!(render_args(format_args!("static")), "static");
        assert_eq!(render_args(format_args!("{} + {}", 1, 2)), "1 + 2");
    }
}
