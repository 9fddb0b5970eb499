//! Ukrainian number, currency, and date formatting

use chrono::{Datelike, NaiveDate};

/// Ukrainian month names in genitive case, as used inside dates
const MONTHS_GENITIVE: [&str; 12] = [
    "січня",
    "лютого",
    "березня",
    "квітня",
    "травня",
    "червня",
    "липня",
    "серпня",
    "вересня",
    "жовтня",
    "листопада",
    "грудня",
];

/// Digit names 1-9, masculine form
const UNITS_MASCULINE: [&str; 9] = [
    "один",
    "два",
    "три",
    "чотири",
    "п'ять",
    "шість",
    "сім",
    "вісім",
    "дев'ять",
];

/// Digit names 1-9, feminine form (differs only for 1 and 2)
const UNITS_FEMININE: [&str; 9] = [
    "одна",
    "дві",
    "три",
    "чотири",
    "п'ять",
    "шість",
    "сім",
    "вісім",
    "дев'ять",
];

/// Names for 10-19
const TEENS: [&str; 10] = [
    "десять",
    "одинадцять",
    "дванадцять",
    "тринадцять",
    "чотирнадцять",
    "п'ятнадцять",
    "шістнадцять",
    "сімнадцять",
    "вісімнадцять",
    "дев'ятнадцять",
];

/// Names for 20, 30, ... 90
const TENS: [&str; 8] = [
    "двадцять",
    "тридцять",
    "сорок",
    "п'ятдесят",
    "шістдесят",
    "сімдесят",
    "вісімдесят",
    "дев'яносто",
];

/// Names for 100, 200, ... 900
const HUNDREDS: [&str; 9] = [
    "сто",
    "двісті",
    "триста",
    "чотириста",
    "п'ятсот",
    "шістсот",
    "сімсот",
    "вісімсот",
    "дев'ятсот",
];

/// Grammatical gender of a counted noun; 1 and 2 agree with it
/// (один/одна, два/дві).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Masculine,
    Feminine,
}

/// Pick the noun form for a count: one (1), few (2-4), many (the rest).
/// 11-14 always take the many form.
fn plural_form<'a>(n: i64, one: &'a str, few: &'a str, many: &'a str) -> &'a str {
    let r100 = (n % 100).abs();
    let r10 = (n % 10).abs();
    if (11..=14).contains(&r100) {
        many
    } else if r10 == 1 {
        one
    } else if (2..=4).contains(&r10) {
        few
    } else {
        many
    }
}

/// Format an integer as Ukrainian words.
///
/// # Examples
/// ```
/// use uk_text::{format_number_words, Gender};
/// assert_eq!(format_number_words(0, Gender::Masculine), "нуль");
/// assert_eq!(format_number_words(21, Gender::Feminine), "двадцять одна");
/// assert_eq!(format_number_words(1000, Gender::Masculine), "одна тисяча");
/// ```
pub fn format_number_words(n: i64, gender: Gender) -> String {
    if n == 0 {
        return "нуль".to_string();
    }

    let mut rest = n.unsigned_abs();
    let mut groups: Vec<u16> = Vec::new();
    while rest > 0 {
        groups.push((rest % 1000) as u16);
        rest /= 1000;
    }

    let mut parts: Vec<String> = Vec::new();
    for (idx, &group) in groups.iter().enumerate().rev() {
        if group == 0 {
            continue;
        }
        // Thousands count as feminine (одна тисяча), higher scales as
        // masculine (один мільйон); the lowest group follows the noun.
        let group_gender = match idx {
            0 => gender,
            1 => Gender::Feminine,
            _ => Gender::Masculine,
        };
        parts.push(triple_words(group, group_gender));
        let scale = match idx {
            1 => Some(plural_form(group as i64, "тисяча", "тисячі", "тисяч")),
            2 => Some(plural_form(group as i64, "мільйон", "мільйони", "мільйонів")),
            3 => Some(plural_form(group as i64, "мільярд", "мільярди", "мільярдів")),
            _ => None,
        };
        if let Some(scale) = scale {
            parts.push(scale.to_string());
        }
    }

    parts.join(" ")
}

/// Words for one 0-999 group
fn triple_words(n: u16, gender: Gender) -> String {
    let mut words: Vec<&str> = Vec::new();
    let hundreds = (n / 100) as usize;
    if hundreds > 0 {
        words.push(HUNDREDS[hundreds - 1]);
    }
    let rest = (n % 100) as usize;
    if (10..=19).contains(&rest) {
        words.push(TEENS[rest - 10]);
    } else {
        let tens = rest / 10;
        let units = rest % 10;
        if tens >= 2 {
            words.push(TENS[tens - 2]);
        }
        if units > 0 {
            let table = match gender {
                Gender::Masculine => &UNITS_MASCULINE,
                Gender::Feminine => &UNITS_FEMININE,
            };
            words.push(table[units - 1]);
        }
    }
    words.join(" ")
}

/// Format an amount as hryvnias in words with numeric kopiykas.
///
/// # Examples
/// ```
/// use uk_text::format_hryvnia_words;
/// assert_eq!(format_hryvnia_words(1.0), "одна гривня 00 копійок");
/// assert_eq!(
///     format_hryvnia_words(1234.56),
///     "одна тисяча двісті тридцять чотири гривні 56 копійок"
/// );
/// ```
pub fn format_hryvnia_words(amount: f64) -> String {
    let total_kop = (amount.abs() * 100.0).round() as i64;
    let hryvnias = total_kop / 100;
    let kopiykas = total_kop % 100;

    format!(
        "{} {} {:02} {}",
        format_number_words(hryvnias, Gender::Feminine),
        plural_form(hryvnias, "гривня", "гривні", "гривень"),
        kopiykas,
        plural_form(kopiykas, "копійка", "копійки", "копійок"),
    )
}

/// Render an amount in the document money format: space-grouped thousands,
/// comma decimal separator, two places, currency suffix.
pub fn render_money(n: f64) -> String {
    let total_kop = (n.abs() * 100.0).round() as i64;
    let sign = if n < -0.000_000_001 { "-" } else { "" };
    format!(
        "{sign}{},{:02} грн",
        group_thousands(total_kop / 100),
        total_kop % 100
    )
}

/// Format integer digits in groups of three separated by a space
fn group_thousands(n: i64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ' ');
        }
        result.insert(0, c);
    }
    result
}

/// Format a money value from its raw string form.
///
/// Accepts both dot and comma decimal separators and ignores spaces. Input
/// that does not parse as a number is returned unchanged.
///
/// # Examples
/// ```
/// use uk_text::format_money;
/// assert_eq!(format_money("1234567.5"), "1 234 567,50 грн");
/// assert_eq!(format_money("1234,5"), "1 234,50 грн");
/// assert_eq!(format_money("договірна"), "договірна");
/// ```
pub fn format_money(raw: &str) -> String {
    let normalized = raw.trim().replace(' ', "").replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(n) => render_money(n),
        Err(_) => raw.to_string(),
    }
}

/// Format a land area with fixed four decimal places.
///
/// # Examples
/// ```
/// use uk_text::format_area;
/// assert_eq!(format_area("12.3"), "12.3000");
/// assert_eq!(format_area("bad"), "bad");
/// ```
pub fn format_area(raw: &str) -> String {
    match raw.trim().parse::<f64>() {
        Ok(n) => format!("{n:.4}"),
        Err(_) => raw.to_string(),
    }
}

/// Ownership shares are carried through verbatim (1/2, 0.25, ...).
pub fn format_share(raw: &str) -> String {
    raw.to_string()
}

/// Convert a `DD.MM.YYYY` date into the long contract form.
///
/// Unparsable input is returned unchanged.
///
/// # Examples
/// ```
/// use uk_text::format_date_words;
/// assert_eq!(format_date_words("07.08.2026"), "«07» серпня 2026 року");
/// assert_eq!(format_date_words("немає дати"), "немає дати");
/// ```
pub fn format_date_words(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), "%d.%m.%Y") {
        Ok(date) => format!(
            "«{:02}» {} {} року",
            date.day(),
            MONTHS_GENITIVE[date.month0() as usize],
            date.year()
        ),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_number_words_basic() {
        assert_eq!(format_number_words(0, Gender::Masculine), "нуль");
        assert_eq!(format_number_words(1, Gender::Masculine), "один");
        assert_eq!(format_number_words(1, Gender::Feminine), "одна");
        assert_eq!(format_number_words(2, Gender::Feminine), "дві");
        assert_eq!(format_number_words(9, Gender::Masculine), "дев'ять");
    }

    #[test]
    fn test_number_words_teens_and_tens() {
        assert_eq!(format_number_words(10, Gender::Masculine), "десять");
        assert_eq!(format_number_words(11, Gender::Masculine), "одинадцять");
        assert_eq!(format_number_words(20, Gender::Masculine), "двадцять");
        assert_eq!(format_number_words(42, Gender::Masculine), "сорок два");
        assert_eq!(format_number_words(99, Gender::Masculine), "дев'яносто дев'ять");
    }

    #[test]
    fn test_number_words_hundreds() {
        assert_eq!(format_number_words(100, Gender::Masculine), "сто");
        assert_eq!(format_number_words(101, Gender::Feminine), "сто одна");
        assert_eq!(
            format_number_words(999, Gender::Masculine),
            "дев'ятсот дев'яносто дев'ять"
        );
    }

    #[test]
    fn test_number_words_large() {
        assert_eq!(format_number_words(1000, Gender::Masculine), "одна тисяча");
        assert_eq!(format_number_words(2000, Gender::Masculine), "дві тисячі");
        assert_eq!(format_number_words(5000, Gender::Masculine), "п'ять тисяч");
        assert_eq!(
            format_number_words(1_000_000, Gender::Masculine),
            "один мільйон"
        );
        assert_eq!(
            format_number_words(2_000_345, Gender::Masculine),
            "два мільйони триста сорок п'ять"
        );
    }

    #[test]
    fn test_hryvnia_words() {
        assert_eq!(format_hryvnia_words(1.0), "одна гривня 00 копійок");
        assert_eq!(format_hryvnia_words(2.0), "дві гривні 00 копійок");
        assert_eq!(format_hryvnia_words(5.0), "п'ять гривень 00 копійок");
        assert_eq!(format_hryvnia_words(11.0), "одинадцять гривень 00 копійок");
        assert_eq!(format_hryvnia_words(0.50), "нуль гривень 50 копійок");
        assert_eq!(
            format_hryvnia_words(1234.56),
            "одна тисяча двісті тридцять чотири гривні 56 копійок"
        );
    }

    #[test]
    fn test_render_money() {
        assert_eq!(render_money(1234567.5), "1 234 567,50 грн");
        assert_eq!(render_money(100.0), "100,00 грн");
        assert_eq!(render_money(0.0), "0,00 грн");
    }

    #[test]
    fn test_format_money_inputs() {
        assert_eq!(format_money("1234567.5"), "1 234 567,50 грн");
        assert_eq!(format_money("1234567,5"), "1 234 567,50 грн");
        assert_eq!(format_money("12 500,75"), "12 500,75 грн");
        assert_eq!(format_money("n/a"), "n/a");
    }

    #[test]
    fn test_format_area() {
        assert_eq!(format_area("12.3"), "12.3000");
        assert_eq!(format_area("0"), "0.0000");
        assert_eq!(format_area("bad"), "bad");
    }

    #[test]
    fn test_format_share() {
        assert_eq!(format_share("1/2"), "1/2");
        assert_eq!(format_share("0.25"), "0.25");
    }

    #[test]
    fn test_date_words() {
        assert_eq!(format_date_words("07.08.2026"), "«07» серпня 2026 року");
        assert_eq!(format_date_words("01.01.2024"), "«01» січня 2024 року");
        assert_eq!(format_date_words("31.12.2025"), "«31» грудня 2025 року");
        assert_eq!(format_date_words("2026-08-07"), "2026-08-07");
        assert_eq!(format_date_words(""), "");
    }

    #[test]
    fn test_plural_form_edge_cases() {
        assert_eq!(plural_form(21, "гривня", "гривні", "гривень"), "гривня");
        assert_eq!(plural_form(22, "гривня", "гривні", "гривень"), "гривні");
        assert_eq!(plural_form(111, "гривня", "гривні", "гривень"), "гривень");
        assert_eq!(plural_form(112, "гривня", "гривні", "гривень"), "гривень");
    }
}
