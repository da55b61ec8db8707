// src/extractors/patterns.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;

// --- Pattern Combinators ---

/// A regular-expression fragment that can be composed with other fragments
/// before being compiled. Every combinator groups its operands, so fragments
/// can be nested without worrying about alternation precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
}

impl Pattern {
    /// Wraps regex syntax as-is.
    pub fn raw(source: impl Into<String>) -> Self {
        Self { source: source.into() }
    }

    /// Matches `text` literally.
    pub fn literal(text: &str) -> Self {
        Self::raw(regex::escape(text))
    }

    /// Matches any one of `alternatives`, tried in order.
    pub fn any_of(alternatives: &[Pattern]) -> Self {
        let joined = alternatives
            .iter()
            .map(|p| format!("(?:{})", p.source))
            .collect::<Vec<_>>()
            .join("|");
        Self::raw(format!("(?:{})", joined))
    }

    pub fn or(&self, other: &Pattern) -> Self {
        Self::any_of(&[self.clone(), other.clone()])
    }

    pub fn then(&self, next: &Pattern) -> Self {
        Self::raw(format!("(?:{})(?:{})", self.source, next.source))
    }

    pub fn optional(&self) -> Self {
        Self::raw(format!("(?:{})?", self.source))
    }

    pub fn capture(&self) -> Self {
        Self::raw(format!("({})", self.source))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Compiles a regex that must cover the whole haystack.
    pub fn whole(&self) -> Result<Regex, regex::Error> {
        Regex::new(&format!("^(?:{})$", self.source))
    }

    /// Compiles a regex that must match at the start of the haystack.
    pub fn prefix(&self) -> Result<Regex, regex::Error> {
        Regex::new(&format!("^(?:{})", self.source))
    }
}

// --- Named Patterns ---

/// Day of month, 1-99. No calendar validation.
pub fn day() -> Pattern {
    Pattern::raw("[1-9][0-9]?")
}

pub fn year() -> Pattern {
    Pattern::raw("[1-9][0-9]{3}")
}

pub fn short_year() -> Pattern {
    Pattern::raw("[0-9]{2}")
}

/// English month names, full or in the usual citation abbreviations.
/// "June" and "July" also appear unabbreviated without a period.
pub fn month() -> Pattern {
    Pattern::any_of(&[
        Pattern::raw("Jan(?:uary)?"),
        Pattern::raw("Feb(?:ruary)?"),
        Pattern::raw("Mar(?:ch)?"),
        Pattern::raw("Apr(?:il)?"),
        Pattern::raw("May"),
        Pattern::raw("June?"),
        Pattern::raw("July?"),
        Pattern::raw("Aug(?:ust)?"),
        Pattern::raw("Sep(?:tember)?"),
        Pattern::raw("Oct(?:ober)?"),
        Pattern::raw("Nov(?:ember)?"),
        Pattern::raw("Dec(?:ember)?"),
    ])
}

/// Upper-case acronym, optionally brace-escaped: "SODA" or "{SODA}".
pub fn conference_short_name() -> Pattern {
    Pattern::raw(r"\{[A-Z]+\}").or(&Pattern::raw("[A-Z]+"))
}

/// "June 1-4" or "Sep 30 - Oct 2".
pub fn date_range() -> Pattern {
    let space = Pattern::literal(" ");
    let month_day = month().then(&space).then(&day());
    let same_month = month_day.then(&Pattern::literal("-")).then(&day());
    let cross_month = month_day.then(&Pattern::literal(" - ")).then(&month_day);
    same_month.or(&cross_month)
}

/// Short name followed by a full year or an apostrophe short year:
/// "{SODA} 2012", "STOC'13", "{PODC} '20".
pub fn conference_year_short_name() -> Pattern {
    let full_year = Pattern::literal(" ").then(&year());
    let apostrophe_year = Pattern::literal(" ")
        .optional()
        .then(&Pattern::literal("'"))
        .then(&short_year());
    conference_short_name().then(&full_year.or(&apostrophe_year))
}

/// Whole-booktitle template
/// `<ShortName Year>: <free text>, <address>, <date range>, <year>`.
/// The only capture group is the address.
pub fn structured_prefix() -> Pattern {
    let free_text = Pattern::raw(".+?");
    let separator = Pattern::literal(", ");
    conference_year_short_name()
        .then(&Pattern::literal(": "))
        .then(&free_text)
        .then(&separator)
        .then(&free_text.capture())
        .then(&separator)
        .then(&date_range())
        .then(&separator)
        .then(&year())
}

// --- Compiled Regexes (Lazy Static) ---

// Date and year tests only look at the start of a segment:
// "July 9-13 2012" is a date range, "2012 Proceedings" is a year.
static DATE_RANGE_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    date_range().prefix().expect("Failed to compile DATE_RANGE_PREFIX_RE")
});

static YEAR_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    year().prefix().expect("Failed to compile YEAR_PREFIX_RE")
});

static CONFERENCE_YEAR_SHORT_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    conference_year_short_name()
        .whole()
        .expect("Failed to compile CONFERENCE_YEAR_SHORT_NAME_RE")
});

static STRUCTURED_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    structured_prefix()
        .whole()
        .expect("Failed to compile STRUCTURED_PREFIX_RE")
});

pub fn starts_with_date_range(text: &str) -> bool {
    DATE_RANGE_PREFIX_RE.is_match(text)
}

pub fn starts_with_year(text: &str) -> bool {
    YEAR_PREFIX_RE.is_match(text)
}

pub fn is_conference_year_short_name(segment: &str) -> bool {
    CONFERENCE_YEAR_SHORT_NAME_RE.is_match(segment)
}

/// Returns the address captured by the structured template, if the whole
/// booktitle follows it.
pub fn match_structured_prefix(booktitle: &str) -> Option<&str> {
    STRUCTURED_PREFIX_RE
        .captures(booktitle)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn matches_whole(pattern: Pattern, text: &str) -> bool {
        pattern.whole().unwrap().is_match(text)
    }

    #[test]
    fn test_combinators_group_alternation() {
        // Without grouping "a|b" followed by "c" would accept a bare "a"
        let p = Pattern::literal("a").or(&Pattern::literal("b")).then(&Pattern::literal("c"));
        let re = p.whole().unwrap();
        assert!(re.is_match("ac"));
        assert!(re.is_match("bc"));
        assert!(!re.is_match("a"));
    }

    #[test]
    fn test_literal_escapes_metacharacters() {
        let p = Pattern::literal("a.b");
        assert_eq!(p.as_str(), r"a\.b");
        let re = p.whole().unwrap();
        assert!(re.is_match("a.b"));
        assert!(!re.is_match("axb"));
    }

    #[test]
    fn test_optional_and_capture() {
        let p = Pattern::literal("x").optional().then(&Pattern::raw("[0-9]+").capture());
        let re = p.whole().unwrap();
        assert_eq!(re.captures("x42").unwrap().get(1).unwrap().as_str(), "42");
        assert_eq!(re.captures("7").unwrap().get(1).unwrap().as_str(), "7");
    }

    #[test]
    fn test_prefix_only_anchors_start() {
        let re = year().prefix().unwrap();
        assert!(re.is_match("2012 Proceedings"));
        assert!(!re.is_match("Proceedings 2012"));
    }

    #[test]
    fn test_day() {
        assert!(matches_whole(day(), "1"));
        assert!(matches_whole(day(), "31"));
        assert!(matches_whole(day(), "99"));
        assert!(!matches_whole(day(), "0"));
        assert!(!matches_whole(day(), "07"));
        assert!(!matches_whole(day(), "100"));
    }

    #[test]
    fn test_year_and_short_year() {
        assert!(matches_whole(year(), "2012"));
        assert!(!matches_whole(year(), "0999"));
        assert!(!matches_whole(year(), "201"));
        assert!(matches_whole(short_year(), "13"));
        assert!(matches_whole(short_year(), "09"));
        assert!(!matches_whole(short_year(), "2013"));
    }

    #[test]
    fn test_month_abbreviations() {
        for m in ["Jan", "January", "June", "Jun", "July", "Jul", "Sep", "September", "May", "Dec"] {
            assert!(matches_whole(month(), m), "{} should be a month", m);
        }
        assert!(!matches_whole(month(), "Sept"));
        assert!(!matches_whole(month(), "january"));
    }

    #[test]
    fn test_conference_short_name() {
        assert!(matches_whole(conference_short_name(), "SODA"));
        assert!(matches_whole(conference_short_name(), "{ICALP}"));
        assert!(!matches_whole(conference_short_name(), "{SODA"));
        assert!(!matches_whole(conference_short_name(), "Soda"));
        assert!(!matches_whole(conference_short_name(), "{ACM-SIAM}"));
    }

    #[test]
    fn test_date_range_forms() {
        assert!(matches_whole(date_range(), "December 14-17"));
        assert!(matches_whole(date_range(), "June 1-4"));
        assert!(matches_whole(date_range(), "Sep 30 - Oct 2"));
        assert!(!matches_whole(date_range(), "December 14 - 17"));
        assert!(!matches_whole(date_range(), "December 14-17 2015"));
    }

    #[test]
    fn test_starts_with_date_range() {
        assert!(starts_with_date_range("December 14-17"));
        assert!(starts_with_date_range("July 9-13 2012"));
        assert!(starts_with_date_range("July 9-13 2012, Warwick"));
        assert!(!starts_with_date_range("December 14 - 17"));
        assert!(!starts_with_date_range("Held July 9-13"));
    }

    #[test]
    fn test_conference_year_short_name_pattern() {
        assert!(is_conference_year_short_name("{SODA} 2012"));
        assert!(is_conference_year_short_name("STOC'13"));
        assert!(is_conference_year_short_name("{PODC} '20"));
        assert!(!is_conference_year_short_name("SODA"));
        assert!(!is_conference_year_short_name("SODA 12"));
        assert!(!is_conference_year_short_name("Proceedings {SODA} 2012"));
    }

    #[test]
    fn test_starts_with_year() {
        assert!(starts_with_year("2015"));
        assert!(starts_with_year("2012 Proceedings"));
        assert!(!starts_with_year("Part 2015"));
        assert!(!starts_with_year("201"));
    }

    #[test]
    fn test_structured_prefix_captures_address() {
        let booktitle = "{PODC} '20: {ACM} Symposium on Principles of Distributed Computing, \
                         Virtual Event, Italy, August 3-7, 2020";
        assert_eq!(match_structured_prefix(booktitle), Some("Virtual Event, Italy"));
    }

    #[test]
    fn test_structured_prefix_requires_trailing_date_and_year() {
        assert_eq!(match_structured_prefix("{PODC} '20: Symposium, Salerno, Italy"), None);
        assert_eq!(
            match_structured_prefix("Symposium, {PODC} 2020, Salerno, Italy, August 3-7, 2020"),
            None
        );
    }
}
