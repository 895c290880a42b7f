//! Fixed-width two's-complement hex tokens.
//!
//!   i8  -> 2 uppercase hex digits  (-128 = "80", 127 = "7F")
//!   i32 -> 8 uppercase hex digits  (-1 = "FFFFFFFF")

use crate::error::HexError;

pub trait HexToken: Sized + Copy {
    /// Hex digits per token.
    const WIDTH: usize;

    fn to_hex_token(self) -> String;

    fn from_hex_token(token: &str) -> Result<Self, HexError>;
}

fn check_width(token: &str, expected: usize) -> Result<(), HexError> {
    if token.len() != expected {
        return Err(HexError::Width {
            token: token.to_string(),
            expected,
            found: token.len(),
        });
    }
    if !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(HexError::Digit(token.to_string()));
    }
    Ok(())
}

impl HexToken for i8 {
    const WIDTH: usize = 2;

    fn to_hex_token(self) -> String {
        format!("{:02X}", self as u8)
    }

    fn from_hex_token(token: &str) -> Result<Self, HexError> {
        check_width(token, Self::WIDTH)?;
        u8::from_str_radix(token, 16)
            .map(|u| u as i8)
            .map_err(|_| HexError::Digit(token.to_string()))
    }
}

impl HexToken for i32 {
    const WIDTH: usize = 8;

    fn to_hex_token(self) -> String {
        format!("{:08X}", self as u32)
    }

    fn from_hex_token(token: &str) -> Result<Self, HexError> {
        check_width(token, Self::WIDTH)?;
        u32::from_str_radix(token, 16)
            .map(|u| u as i32)
            .map_err(|_| HexError::Digit(token.to_string()))
    }
}

/// Encode a row-major slice into tokens, one per element.
pub fn encode_tokens<T: HexToken>(values: &[T]) -> Vec<String> {
    values.iter().map(|&v| v.to_hex_token()).collect()
}

/// Decode whitespace-separated tokens (any line layout) back into values.
pub fn decode_tokens<T: HexToken>(text: &str) -> Result<Vec<T>, HexError> {
    text.split_whitespace().map(T::from_hex_token).collect()
}
