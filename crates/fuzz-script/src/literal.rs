//! Source-level literals for generated values.
//!
//! One rendering rule per variant:
//!
//! | Value | Literal |
//! |-------|---------|
//! | integer | `Scalar::Int(-12)` |
//! | float | `Scalar::Float(0.5)` (shortest round-trip form) |
//! | string | `Scalar::Str("ab\"c".to_owned())` |
//! | boolean | `Scalar::Bool(true)` |
//! | null | `Scalar::Null` |
//! | mapping | `Value::Map(FieldMap::from([("field:0", Scalar::Null)]))` |
//!
//! Scalars at the top level are wrapped as `Value::Scalar(..)`. Decoding a
//! literal produced here yields a value equal to the one encoded.

use crate::error::LiteralError;
use fuzz_core::{FieldMap, Scalar, Value};

/// Render a value as a Rust expression.
pub fn encode_value(value: &Value) -> String {
    match value {
        Value::Scalar(scalar) => format!("Value::Scalar({})", encode_scalar(scalar)),
        Value::Map(map) if map.is_empty() => "Value::Map(FieldMap::new())".to_string(),
        Value::Map(map) => {
            let fields: Vec<String> = map
                .iter()
                .map(|(name, scalar)| format!("({}, {})", encode_str(name), encode_scalar(scalar)))
                .collect();
            format!("Value::Map(FieldMap::from([{}]))", fields.join(", "))
        }
    }
}

/// Render a scalar as a Rust expression.
pub fn encode_scalar(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Int(n) => format!("Scalar::Int({n})"),
        Scalar::Float(f) => format!("Scalar::Float({})", encode_float(*f)),
        Scalar::Str(s) => format!("Scalar::Str({}.to_owned())", encode_str(s)),
        Scalar::Bool(b) => format!("Scalar::Bool({b})"),
        Scalar::Null => "Scalar::Null".to_string(),
    }
}

/// Render a string literal.
pub fn encode_str(s: &str) -> String {
    format!("{s:?}")
}

fn encode_float(f: f64) -> String {
    if f.is_nan() {
        "f64::NAN".to_string()
    } else if f == f64::INFINITY {
        "f64::INFINITY".to_string()
    } else if f == f64::NEG_INFINITY {
        "f64::NEG_INFINITY".to_string()
    } else {
        // Debug always keeps a decimal point or exponent, so the literal
        // stays a float.
        format!("{f:?}")
    }
}

/// Decode a literal produced by [`encode_value`].
pub fn parse_value(src: &str) -> Result<Value, LiteralError> {
    let mut cursor = Cursor::new(src);
    let value = cursor.value()?;
    cursor.finish()?;
    Ok(value)
}

/// Decode a literal produced by [`encode_scalar`].
pub fn parse_scalar(src: &str) -> Result<Scalar, LiteralError> {
    let mut cursor = Cursor::new(src);
    let scalar = cursor.scalar()?;
    cursor.finish()?;
    Ok(scalar)
}

/// Hand-written scanner over literal source text.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    pub(crate) fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    /// Consume `token` if it comes next, ignoring leading whitespace.
    pub(crate) fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, token: &'static str) -> Result<(), LiteralError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.expected(token))
        }
    }

    pub(crate) fn finish(&mut self) -> Result<(), LiteralError> {
        self.skip_ws();
        if self.rest().is_empty() {
            Ok(())
        } else {
            Err(LiteralError::Trailing(self.pos))
        }
    }

    fn expected(&self, expected: &'static str) -> LiteralError {
        LiteralError::Expected {
            expected,
            offset: self.pos,
        }
    }

    /// An identifier (`[A-Za-z_][A-Za-z0-9_]*`), possibly empty.
    pub(crate) fn ident(&mut self) -> &'a str {
        self.skip_ws();
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(i, c)| !(c == '_' || c.is_ascii_alphabetic() || (i > 0 && c.is_ascii_digit())))
            .map_or(rest.len(), |(i, _)| i);
        self.pos += len;
        &rest[..len]
    }

    fn number_token(&mut self) -> &'a str {
        self.skip_ws();
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(i, c)| {
                let sign_ok = (c == '-' || c == '+')
                    && (i == 0 || matches!(rest.as_bytes()[i - 1], b'e' | b'E'));
                !(c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '_') || sign_ok)
            })
            .map_or(rest.len(), |(i, _)| i);
        self.pos += len;
        &rest[..len]
    }

    fn invalid_number(&self, text: &str) -> LiteralError {
        LiteralError::InvalidNumber {
            text: text.to_string(),
            offset: self.pos - text.len(),
        }
    }

    pub(crate) fn int(&mut self) -> Result<i64, LiteralError> {
        let text = self.number_token();
        text.replace('_', "")
            .parse()
            .map_err(|_| self.invalid_number(text))
    }

    pub(crate) fn uint(&mut self) -> Result<u32, LiteralError> {
        let text = self.number_token();
        text.replace('_', "")
            .parse()
            .map_err(|_| self.invalid_number(text))
    }

    pub(crate) fn float(&mut self) -> Result<f64, LiteralError> {
        if self.eat("f64::NAN") {
            return Ok(f64::NAN);
        }
        if self.eat("f64::INFINITY") {
            return Ok(f64::INFINITY);
        }
        if self.eat("f64::NEG_INFINITY") {
            return Ok(f64::NEG_INFINITY);
        }
        let text = self.number_token();
        text.replace('_', "")
            .parse()
            .map_err(|_| self.invalid_number(text))
    }

    /// A double-quoted string literal with Rust escapes.
    pub(crate) fn string(&mut self) -> Result<String, LiteralError> {
        self.skip_ws();
        let start = self.pos;
        let Some(body) = self.rest().strip_prefix('"') else {
            return Err(self.expected("string literal"));
        };
        let base = start + 1;
        let mut out = String::new();
        let mut chars = body.char_indices();

        loop {
            let Some((i, c)) = chars.next() else {
                return Err(LiteralError::UnterminatedString(start));
            };
            match c {
                '"' => {
                    self.pos = base + i + 1;
                    return Ok(out);
                }
                '\\' => {
                    let escape_at = base + i;
                    let Some((_, e)) = chars.next() else {
                        return Err(LiteralError::UnterminatedString(start));
                    };
                    let decoded = match e {
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        '0' => '\0',
                        '\\' => '\\',
                        '"' => '"',
                        '\'' => '\'',
                        'x' => {
                            let hex: String = chars.by_ref().take(2).map(|(_, h)| h).collect();
                            u8::from_str_radix(&hex, 16)
                                .ok()
                                .filter(|b| b.is_ascii() && hex.len() == 2)
                                .map(char::from)
                                .ok_or(LiteralError::InvalidEscape(escape_at))?
                        }
                        'u' => {
                            if chars.next().map(|(_, b)| b) != Some('{') {
                                return Err(LiteralError::InvalidEscape(escape_at));
                            }
                            let mut hex = String::new();
                            loop {
                                match chars.next() {
                                    Some((_, '}')) => break,
                                    Some((_, h)) if h.is_ascii_hexdigit() && hex.len() < 6 => {
                                        hex.push(h)
                                    }
                                    _ => return Err(LiteralError::InvalidEscape(escape_at)),
                                }
                            }
                            u32::from_str_radix(&hex, 16)
                                .ok()
                                .and_then(char::from_u32)
                                .ok_or(LiteralError::InvalidEscape(escape_at))?
                        }
                        _ => return Err(LiteralError::InvalidEscape(escape_at)),
                    };
                    out.push(decoded);
                }
                c => out.push(c),
            }
        }
    }

    pub(crate) fn scalar(&mut self) -> Result<Scalar, LiteralError> {
        let scalar = if self.eat("Scalar::Int(") {
            Scalar::Int(self.int()?)
        } else if self.eat("Scalar::Float(") {
            Scalar::Float(self.float()?)
        } else if self.eat("Scalar::Str(") {
            let s = self.string()?;
            self.expect(".to_owned()")?;
            Scalar::Str(s)
        } else if self.eat("Scalar::Bool(") {
            if self.eat("true") {
                Scalar::Bool(true)
            } else if self.eat("false") {
                Scalar::Bool(false)
            } else {
                return Err(self.expected("boolean"));
            }
        } else if self.eat("Scalar::Null") {
            return Ok(Scalar::Null);
        } else {
            return Err(self.expected("scalar literal"));
        };
        self.expect(")")?;
        Ok(scalar)
    }

    pub(crate) fn value(&mut self) -> Result<Value, LiteralError> {
        if self.eat("Value::Scalar(") {
            let scalar = self.scalar()?;
            self.expect(")")?;
            return Ok(Value::Scalar(scalar));
        }
        if !self.eat("Value::Map(") {
            return Err(self.expected("value literal"));
        }
        if self.eat("FieldMap::new()") {
            self.expect(")")?;
            return Ok(Value::Map(FieldMap::new()));
        }

        self.expect("FieldMap::from([")?;
        let mut map = FieldMap::new();
        while !self.eat("]") {
            self.expect("(")?;
            let name = self.string()?;
            self.expect(",")?;
            let scalar = self.scalar()?;
            self.expect(")")?;
            map.push(name, scalar);
            if !self.eat(",") {
                self.expect("]")?;
                break;
            }
        }
        self.expect(")")?;
        self.expect(")")?;
        Ok(Value::Map(map))
    }
}
