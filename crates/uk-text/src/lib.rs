//! UK Text - Ukrainian language text formatting
//!
//! This crate provides:
//! - Number formatting with document-style grouping (1 234 567,50)
//! - Currency formatting and amounts in words (гривня, копійка)
//! - Long-form contract dates («07» серпня 2026 року)
//! - Land area and ownership share stringification
//!
//! # Example
//!
//! ```ignore
//! use uk_text::{format_money, format_date_words, format_hryvnia_words};
//!
//! let rent = format_money("1234567.5");        // "1 234 567,50 грн"
//! let words = format_hryvnia_words(1234.56);   // "одна тисяча двісті ..."
//! let date = format_date_words("07.08.2026");  // "«07» серпня 2026 року"
//! ```

mod formatter;

pub use formatter::{
    format_area, format_date_words, format_hryvnia_words, format_money, format_number_words,
    format_share, render_money, Gender,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money("1234567.5"), "1 234 567,50 грн");
        assert_eq!(format_money("100"), "100,00 грн");
    }

    #[test]
    fn test_format_hryvnia_words() {
        assert_eq!(format_hryvnia_words(1.0), "одна гривня 00 копійок");
        assert_eq!(format_hryvnia_words(0.50), "нуль гривень 50 копійок");
    }
}
