//! Common regex patterns for invoice field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Invoice number templates, tried in order.
    pub static ref INVOICE_NUMBER_LABELED: Regex = Regex::new(
        r"(?i)\b(?:invoice|inv)\b\.?[\s#:.]*(?:(?:no|number|num)\b\.?[\s#:.]*)?([A-Z0-9][A-Z0-9-]*)"
    ).unwrap();

    pub static ref INVOICE_NUMBER_PREFIXED: Regex = Regex::new(
        r"(?i)(?:\b(?:no|number)\b\.?|#)[\s#:.]*([A-Z0-9][A-Z0-9-]*)"
    ).unwrap();

    pub static ref INVOICE_NUMBER_CODE: Regex = Regex::new(
        r"\b([A-Z]{2,}-[0-9]+(?:-[A-Z0-9]+)*)\b"
    ).unwrap();

    pub static ref INVOICE_NUMBER_COMPACT: Regex = Regex::new(
        r"(?i)\b(INV[0-9]{6,})\b"
    ).unwrap();

    // Numeric dates, month first: 03/15/2024, 3-15-24, 03.15.2024
    pub static ref DATE_MDY: Regex = Regex::new(
        r"\b(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{4}|\d{2})\b"
    ).unwrap();

    // Numeric dates, year first: 2024-03-15, 2024/3/15
    pub static ref DATE_YMD: Regex = Regex::new(
        r"\b(\d{4})[/.\-](\d{1,2})[/.\-](\d{1,2})\b"
    ).unwrap();

    // March 15, 2024 / Mar. 15th 2024 / Sept 5, 2024
    pub static ref DATE_MONTH_NAME_FIRST: Regex = Regex::new(
        r"(?i)\b(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})\b"
    ).unwrap();

    // 15 March 2024 / 15th Mar, 2024
    pub static ref DATE_DAY_FIRST: Regex = Regex::new(
        r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?,?\s+(\d{4})\b"
    ).unwrap();

    // <description> <qty> [x|×|@|$] <unit price> [= <line total>]
    pub static ref LINE_ITEM: Regex = Regex::new(
        r"(.+?)[ \t]+(\d+)\b[ \t]*(?:[xX×@][ \t]*)?\$?[ \t]*(\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?)(?:[ \t]*=[ \t]*\$?[ \t]*(\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?))?"
    ).unwrap();

    // Leading enumeration marker: "3. ", "12) ", "- ", "* "
    pub static ref ENUMERATION_MARKER: Regex = Regex::new(
        r"^(?:\d+[.)]|[-*•])\s+"
    ).unwrap();

    // North American phone numbers
    pub static ref PHONE: Regex = Regex::new(
        r"(?:\+?1[-. ]?)?(?:\((\d{3})\)|\b(\d{3}))[-. ]?(\d{3})[-. ]?(\d{4})\b"
    ).unwrap();

    pub static ref EMAIL: Regex = Regex::new(
        r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"
    ).unwrap();

    // Proper-noun phrase: capitalized, letters/digits/&/./,/spaces only
    pub static ref COMPANY_NAME: Regex = Regex::new(
        r"^[A-Z][A-Za-z0-9&., ]*$"
    ).unwrap();
}
