//! Free-text hours parsing.
//!
//! Turns staff-authored hours text such as
//!
//! ```text
//! Mon-Thu 9am-10pm
//! Fri 9am-AS; Sat AS-11:30pm
//! Closed Sun
//! ```
//!
//! into a [`WeeklySchedule`]. Parsing is tolerant: a clause that cannot be
//! understood is skipped (and logged at `debug`), never fatal. Later clauses
//! overwrite earlier ones for the same day.
//!
//! # Grammar
//!
//! A clause is either `[<day-range>] <time> <dash> <time>` or
//! `[<day-range>] Closed` (the keyword may appear anywhere in the clause).
//! Clauses are separated by newlines or semicolons.
//!
//! - **Day range**: empty (every day), `daily`, a single day (`Mon`, `monday`,
//!   `Tues`), a list (`Mon, Wed & Fri`), or a cyclic range (`Fri-Sun`,
//!   `Sat - Mon`). List elements may themselves be ranges.
//! - **Time**: `9`, `9:30`, `9am`, `9:30 PM`, `noon`, `midnight`, or `AS`
//!   ("after Shabbat", resolved later from the local sunset).
//! - **Dash**: `-`, `–` or `—`, with or without surrounding spaces.

use chrono::Weekday;
use tracing::debug;

use crate::error::{HoursError, Result};
use crate::schedule::{DaySpec, TimeValue, WeeklySchedule, WEEK};

/// Token (compared case-insensitively) for the "after Shabbat" marker.
pub const DYNAMIC_MARKER_TOKEN: &str = "as";

const CLOSED_KEYWORD: &str = "closed";

/// One successfully parsed clause: the days it covers and what it says about them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    /// Days covered, in the order the range walks them. May be empty when the
    /// day expression was not recognized.
    pub days: Vec<Weekday>,
    pub spec: DaySpec,
}

// ── parse_schedule ──────────────────────────────────────────────────────────

/// Parse free-text hours into a weekly schedule.
///
/// Never fails. Unparseable clauses are skipped; days never mentioned are
/// absent from the result (not [`DaySpec::Closed`]).
///
/// # Examples
///
/// ```
/// use chrono::Weekday;
/// use hours_engine::parser::parse_schedule;
/// use hours_engine::{DaySpec, TimeValue};
///
/// let schedule = parse_schedule("Mon-Fri 9am-5pm; Sat closed");
/// assert_eq!(
///     schedule.get(Weekday::Tue),
///     Some(&DaySpec::Hours {
///         open: TimeValue::Minutes(9 * 60),
///         close: TimeValue::Minutes(17 * 60),
///     })
/// );
/// assert_eq!(schedule.get(Weekday::Sat), Some(&DaySpec::Closed));
/// assert_eq!(schedule.get(Weekday::Sun), None);
/// ```
pub fn parse_schedule(text: &str) -> WeeklySchedule {
    let mut schedule = WeeklySchedule::new();

    for clause in split_clauses(text) {
        match parse_clause(clause) {
            Ok(parsed) => {
                for day in parsed.days {
                    schedule.set(day, parsed.spec);
                }
            }
            Err(e) => debug!(clause, error = %e, "skipping unparseable hours clause"),
        }
    }

    schedule
}

/// Split raw text into trimmed, non-empty clauses.
pub fn split_clauses(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| matches!(c, '\n' | '\r' | ';'))
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
}

// ── parse_clause ────────────────────────────────────────────────────────────

/// Parse a single clause.
///
/// An unrecognized day expression is not an error: the clause simply covers
/// no days. A malformed time token or a missing time range is an error.
pub fn parse_clause(clause: &str) -> Result<Clause> {
    let clause = clause.trim();

    if let Some(day_expr) = strip_closed_keyword(clause) {
        return Ok(Clause {
            days: days_or_none(&day_expr, clause),
            spec: DaySpec::Closed,
        });
    }

    let (day_expr, open_token, close_token) = split_time_range(clause)?;
    let open = parse_time_token(&open_token)?;
    let close = parse_time_token(close_token)?;

    Ok(Clause {
        days: days_or_none(day_expr, clause),
        spec: DaySpec::Hours { open, close },
    })
}

fn days_or_none(day_expr: &str, clause: &str) -> Vec<Weekday> {
    parse_day_range(day_expr).unwrap_or_else(|e| {
        debug!(clause, error = %e, "hours clause matched no days");
        Vec::new()
    })
}

/// If the clause contains the `closed` keyword as a word, return the clause
/// with that word removed. Punctuation around the keyword (`Closed-Sun`,
/// `Sun (closed)`) is left for the day-range parser to trim.
fn strip_closed_keyword(clause: &str) -> Option<String> {
    let lower = clause.to_ascii_lowercase();
    let is_boundary = |c: Option<char>| c.map_or(true, |c| !c.is_alphanumeric());

    let at = lower
        .match_indices(CLOSED_KEYWORD)
        .map(|(i, _)| i)
        .find(|&i| {
            is_boundary(lower[..i].chars().next_back())
                && is_boundary(lower[i + CLOSED_KEYWORD.len()..].chars().next())
        })?;

    let rest = format!("{} {}", &clause[..at], &clause[at + CLOSED_KEYWORD.len()..]);
    let rest = rest.trim_matches(|c: char| c.is_whitespace() || matches!(c, '.' | '(' | ')' | '!'));
    Some(rest.to_string())
}

/// Split `<day-range> <open> <dash> <close>` into its three parts.
///
/// The last dash in the clause separates the times, so dashes inside the day
/// range (`Mon-Fri`) are left alone. A detached meridiem (`9 am`) is joined to
/// the hour before it.
fn split_time_range(clause: &str) -> Result<(&str, String, &str)> {
    let (dash_at, dash) = clause
        .char_indices()
        .rev()
        .find(|(_, c)| is_dash(*c))
        .ok_or_else(|| HoursError::MalformedClause(format!("no time range in '{clause}'")))?;

    let head = &clause[..dash_at];
    let close = clause[dash_at + dash.len_utf8()..].trim();

    let (rest, last) = split_last_token(head);
    let (day_expr, open) = if is_meridiem(last) {
        let (rest, hour) = split_last_token(rest);
        (rest, format!("{hour}{last}"))
    } else {
        (rest, last.to_string())
    };

    if open.is_empty() || close.is_empty() {
        return Err(HoursError::MalformedClause(format!(
            "incomplete time range in '{clause}'"
        )));
    }

    Ok((day_expr, open, close))
}

/// Split off the final token: `("Mon, Wed", "9am")`. A colon right after a
/// word also separates (`Mon:9am`), one between digits (`9:30`) does not.
fn split_last_token(s: &str) -> (&str, &str) {
    let s = s.trim_end();
    let is_separator = |i: usize, c: char| {
        c.is_whitespace()
            || (c == ':' && s[..i].chars().next_back().is_some_and(char::is_alphabetic))
    };
    match s.char_indices().rev().find(|&(i, c)| is_separator(i, c)) {
        Some((i, c)) => (s[..i].trim_end(), &s[i + c.len_utf8()..]),
        None => ("", s),
    }
}

fn is_dash(c: char) -> bool {
    matches!(c, '-' | '\u{2013}' | '\u{2014}')
}

fn is_meridiem(token: &str) -> bool {
    let lower = token.to_ascii_lowercase();
    matches!(lower.as_str(), "am" | "pm" | "a.m." | "p.m.")
}

// ── Day ranges ──────────────────────────────────────────────────────────────

/// Resolve a day-range expression to the days it covers.
///
/// Empty (or `daily`) means all seven days. Returns
/// [`HoursError::InvalidDayRange`] when any part is unrecognized.
pub fn parse_day_range(expr: &str) -> Result<Vec<Weekday>> {
    let expr = expr
        .trim()
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | ':' | '&') || is_dash(c));

    if expr.is_empty() || is_every_day(expr) {
        return Ok(WEEK.to_vec());
    }

    if let Some(day) = parse_day_token(expr) {
        return Ok(vec![day]);
    }

    if expr.contains([',', '&']) {
        let mut days = Vec::new();
        for part in expr.split([',', '&']).map(str::trim).filter(|p| !p.is_empty()) {
            for day in parse_day_span(part)? {
                if !days.contains(&day) {
                    days.push(day);
                }
            }
        }
        return Ok(days);
    }

    parse_day_span(expr)
}

/// A single day or a `<DayA>-<DayB>` range.
fn parse_day_span(part: &str) -> Result<Vec<Weekday>> {
    if let Some(day) = parse_day_token(part) {
        return Ok(vec![day]);
    }

    if let Some((from, to)) = part.split_once(is_dash) {
        if let (Some(from), Some(to)) = (parse_day_token(from), parse_day_token(to)) {
            return Ok(cyclic_range(from, to));
        }
    }

    Err(HoursError::InvalidDayRange(format!("'{part}'")))
}

/// Inclusive walk forward through the week from `from` to `to`, wrapping past
/// Saturday. `Fri..Sun` yields Friday, Saturday, Sunday.
pub fn cyclic_range(from: Weekday, to: Weekday) -> Vec<Weekday> {
    let mut days = vec![from];
    let mut day = from;
    while day != to {
        day = day.succ();
        days.push(day);
    }
    days
}

fn is_every_day(expr: &str) -> bool {
    let lower = expr.to_lowercase();
    matches!(lower.as_str(), "daily" | "everyday" | "every day")
}

/// Parse a weekday name (case-insensitive, full or abbreviated, plural full names allowed).
pub fn parse_day_token(token: &str) -> Option<Weekday> {
    let lower = token
        .trim()
        .trim_end_matches(['.', ':'])
        .to_lowercase();

    match lower.as_str() {
        "sunday" | "sun" => Some(Weekday::Sun),
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sundays" => Some(Weekday::Sun),
        "mondays" => Some(Weekday::Mon),
        "tuesdays" => Some(Weekday::Tue),
        "wednesdays" => Some(Weekday::Wed),
        "thursdays" => Some(Weekday::Thu),
        "fridays" => Some(Weekday::Fri),
        "saturdays" => Some(Weekday::Sat),
        _ => None,
    }
}

// ── Time tokens ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

/// Parse a time token: `9`, `9:30`, `9am`, `9:30 PM`, `noon`, `midnight`, or `AS`.
///
/// This is a 12-hour grammar: the hour must be 1-12. Without a meridiem the
/// digits are taken literally (`9` is 09:00, `12` is 12:00).
pub fn parse_time_token(token: &str) -> Result<TimeValue> {
    let normalized: String = token
        .trim()
        .to_lowercase()
        .replace("a.m.", "am")
        .replace("p.m.", "pm")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let invalid = || HoursError::InvalidTime(format!("'{}'", token.trim()));

    match normalized.as_str() {
        DYNAMIC_MARKER_TOKEN => return Ok(TimeValue::AfterShabbat),
        "noon" => return Ok(TimeValue::Minutes(12 * 60)),
        "midnight" => return Ok(TimeValue::Minutes(0)),
        _ => {}
    }

    let (digits, meridiem) = if let Some(d) = normalized.strip_suffix("am") {
        (d, Some(Meridiem::Am))
    } else if let Some(d) = normalized.strip_suffix("pm") {
        (d, Some(Meridiem::Pm))
    } else {
        (normalized.as_str(), None)
    };

    let (hour, minute) = match digits.split_once(':') {
        Some((h, m)) if m.len() == 2 => (parse_number(h), parse_number(m)),
        Some(_) => return Err(invalid()),
        None => (parse_number(digits), Some(0)),
    };
    let (hour, minute) = match (hour, minute) {
        (Some(h), Some(m)) if (1..=12).contains(&h) && m < 60 => (h, m),
        _ => return Err(invalid()),
    };

    let hour24 = match (hour, meridiem) {
        (12, Some(Meridiem::Am)) => 0,
        (12, Some(Meridiem::Pm)) => 12,
        (h, Some(Meridiem::Pm)) => h + 12,
        (h, _) => h,
    };

    TimeValue::at(hour24, minute).ok_or_else(invalid)
}

/// One or two ASCII digits.
fn parse_number(s: &str) -> Option<u16> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours(open: u16, close: u16) -> DaySpec {
        DaySpec::Hours {
            open: TimeValue::Minutes(open),
            close: TimeValue::Minutes(close),
        }
    }

    // ── parse_schedule tests ────────────────────────────────────────────

    #[test]
    fn test_parse_is_idempotent() {
        let text = "Mon-Thu 9am-10pm\nFri 9am-AS; Sat AS-11:30pm\nClosed Sun";
        assert_eq!(parse_schedule(text), parse_schedule(text));
    }

    #[test]
    fn test_last_clause_wins() {
        let schedule = parse_schedule("Mon 9am-5pm; Mon 10am-2pm");
        assert_eq!(schedule.get(Weekday::Mon), Some(&hours(600, 840)));
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn test_later_closed_overrides_range() {
        let schedule = parse_schedule("Mon-Fri 9am-5pm\nWed closed");
        assert_eq!(schedule.get(Weekday::Wed), Some(&DaySpec::Closed));
        assert_eq!(schedule.get(Weekday::Thu), Some(&hours(540, 1020)));
    }

    #[test]
    fn test_day_list_union() {
        let schedule = parse_schedule("Mon, Wed 9am-5pm");
        assert_eq!(schedule.get(Weekday::Mon), Some(&hours(540, 1020)));
        assert_eq!(schedule.get(Weekday::Wed), Some(&hours(540, 1020)));
        assert_eq!(schedule.get(Weekday::Tue), None);
    }

    #[test]
    fn test_ampersand_list() {
        let schedule = parse_schedule("Tue & Thu 11am-3pm");
        assert_eq!(schedule.get(Weekday::Tue), Some(&hours(660, 900)));
        assert_eq!(schedule.get(Weekday::Thu), Some(&hours(660, 900)));
        assert_eq!(schedule.len(), 2);
    }

    #[test]
    fn test_cyclic_range_wraps_past_saturday() {
        let schedule = parse_schedule("Fri-Sun 6pm-11pm");
        for day in [Weekday::Fri, Weekday::Sat, Weekday::Sun] {
            assert_eq!(schedule.get(day), Some(&hours(1080, 1380)), "{day}");
        }
        assert_eq!(schedule.len(), 3);
    }

    #[test]
    fn test_no_day_range_means_every_day() {
        let schedule = parse_schedule("7am-7pm");
        assert_eq!(schedule.len(), 7);
        assert!(schedule.iter().all(|(_, spec)| *spec == hours(420, 1140)));
    }

    #[test]
    fn test_daily_keyword() {
        let schedule = parse_schedule("Daily 8am-8pm");
        assert_eq!(schedule.len(), 7);
    }

    #[test]
    fn test_closed_keyword_before_days() {
        let schedule = parse_schedule("Closed Sat");
        assert_eq!(schedule.get(Weekday::Sat), Some(&DaySpec::Closed));
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn test_closed_keyword_after_days_with_colon() {
        let schedule = parse_schedule("Sat-Sun: CLOSED");
        assert_eq!(schedule.get(Weekday::Sat), Some(&DaySpec::Closed));
        assert_eq!(schedule.get(Weekday::Sun), Some(&DaySpec::Closed));
        assert_eq!(schedule.len(), 2);
    }

    #[test]
    fn test_bare_closed_closes_every_day() {
        let schedule = parse_schedule("Closed");
        assert_eq!(schedule.len(), 7);
        assert!(schedule.iter().all(|(_, spec)| *spec == DaySpec::Closed));
    }

    #[test]
    fn test_closed_keyword_joined_by_punctuation() {
        let schedule = parse_schedule("Closed-Sun; Closed, Sat");
        assert_eq!(schedule.get(Weekday::Sun), Some(&DaySpec::Closed));
        assert_eq!(schedule.get(Weekday::Sat), Some(&DaySpec::Closed));
        assert_eq!(schedule.len(), 2);
    }

    #[test]
    fn test_closed_keyword_in_parentheses() {
        let schedule = parse_schedule("Mon 9am-5pm\nTue (closed)");
        assert_eq!(schedule.get(Weekday::Tue), Some(&DaySpec::Closed));
        assert_eq!(schedule.get(Weekday::Mon), Some(&hours(540, 1020)));
    }

    #[test]
    fn test_closed_inside_another_word_is_not_keyword() {
        assert!(strip_closed_keyword("Mon enclosed 9am-5pm").is_none());
        assert!(strip_closed_keyword("Closedness").is_none());
    }

    #[test]
    fn test_colon_without_space_after_days() {
        let schedule = parse_schedule("Mon:9am-5pm\nTue:9:30 am-1pm");
        assert_eq!(schedule.get(Weekday::Mon), Some(&hours(540, 1020)));
        assert_eq!(schedule.get(Weekday::Tue), Some(&hours(570, 780)));
    }

    #[test]
    fn test_dynamic_marker_on_both_sides() {
        let schedule = parse_schedule("Fri 6pm-AS\nSat as-11:30pm");
        assert_eq!(
            schedule.get(Weekday::Fri),
            Some(&DaySpec::Hours {
                open: TimeValue::Minutes(1080),
                close: TimeValue::AfterShabbat,
            })
        );
        assert_eq!(
            schedule.get(Weekday::Sat),
            Some(&DaySpec::Hours {
                open: TimeValue::AfterShabbat,
                close: TimeValue::Minutes(23 * 60 + 30),
            })
        );
    }

    #[test]
    fn test_en_and_em_dashes() {
        let schedule = parse_schedule("Mon\u{2013}Tue 9am \u{2013} 5pm; Wed 10am\u{2014}4pm");
        assert_eq!(schedule.get(Weekday::Mon), Some(&hours(540, 1020)));
        assert_eq!(schedule.get(Weekday::Tue), Some(&hours(540, 1020)));
        assert_eq!(schedule.get(Weekday::Wed), Some(&hours(600, 960)));
    }

    #[test]
    fn test_spaced_range_and_detached_meridiem() {
        let schedule = parse_schedule("Mon - Wed 9:30 AM - 5:15 PM");
        assert_eq!(schedule.get(Weekday::Tue), Some(&hours(570, 1035)));
        assert_eq!(schedule.len(), 3);
    }

    #[test]
    fn test_overnight_window_is_kept_as_written() {
        let schedule = parse_schedule("Sat 6pm-1am");
        assert_eq!(schedule.get(Weekday::Sat), Some(&hours(1080, 60)));
    }

    #[test]
    fn test_bad_time_drops_only_that_clause() {
        let schedule = parse_schedule("Mon 9am-5pm; Tue 25pm-5pm; Wed 9am-5pm");
        assert!(schedule.get(Weekday::Mon).is_some());
        assert_eq!(schedule.get(Weekday::Tue), None);
        assert!(schedule.get(Weekday::Wed).is_some());
    }

    #[test]
    fn test_unknown_day_contributes_nothing() {
        let schedule = parse_schedule("Holidays 9am-1pm\nMon 9am-5pm");
        assert_eq!(schedule.len(), 1);
        assert!(schedule.get(Weekday::Mon).is_some());
    }

    #[test]
    fn test_free_text_noise_is_ignored() {
        let schedule = parse_schedule("Call ahead for catering!\n\n;;Sun 10am-2pm");
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.get(Weekday::Sun), Some(&hours(600, 840)));
    }

    #[test]
    fn test_empty_text_yields_empty_schedule() {
        assert!(parse_schedule("").is_empty());
        assert!(parse_schedule("  \n ; ").is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let schedule = parse_schedule("Mon 9am-5pm\r\nTue 9am-5pm\r\n");
        assert_eq!(schedule.len(), 2);
    }

    // ── parse_clause tests ──────────────────────────────────────────────

    #[test]
    fn test_clause_without_times_is_error() {
        let err = parse_clause("Mon-Fri").unwrap_err();
        assert!(matches!(err, HoursError::InvalidTime(_)), "got: {err}");
        let err = parse_clause("open late").unwrap_err();
        assert!(err.to_string().contains("Malformed clause"), "got: {err}");
    }

    #[test]
    fn test_clause_missing_close_time_is_error() {
        assert!(parse_clause("Mon 9am-").is_err());
        assert!(parse_clause("Mon -5pm").is_err());
    }

    #[test]
    fn test_clause_reports_days_in_walk_order() {
        let clause = parse_clause("Sat-Mon 10am-2pm").unwrap();
        assert_eq!(clause.days, vec![Weekday::Sat, Weekday::Sun, Weekday::Mon]);
    }

    // ── Day range tests ─────────────────────────────────────────────────

    #[test]
    fn test_day_tokens_full_and_abbreviated() {
        assert_eq!(parse_day_token("Wednesday"), Some(Weekday::Wed));
        assert_eq!(parse_day_token("THU"), Some(Weekday::Thu));
        assert_eq!(parse_day_token("tues"), Some(Weekday::Tue));
        assert_eq!(parse_day_token("Sundays"), Some(Weekday::Sun));
        assert_eq!(parse_day_token("Sat:"), Some(Weekday::Sat));
        assert_eq!(parse_day_token("weekend"), None);
    }

    #[test]
    fn test_range_same_day_is_single_day() {
        assert_eq!(parse_day_range("Mon-Mon").unwrap(), vec![Weekday::Mon]);
    }

    #[test]
    fn test_list_with_embedded_range() {
        let days = parse_day_range("Mon-Wed, Fri").unwrap();
        assert_eq!(
            days,
            vec![Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Fri]
        );
    }

    #[test]
    fn test_list_deduplicates() {
        let days = parse_day_range("Mon, Mon-Tue").unwrap();
        assert_eq!(days, vec![Weekday::Mon, Weekday::Tue]);
    }

    #[test]
    fn test_list_with_unknown_member_is_error() {
        let err = parse_day_range("Mon, Funday").unwrap_err();
        assert!(err.to_string().contains("Invalid day range"), "got: {err}");
    }

    #[test]
    fn test_cyclic_range_full_week() {
        assert_eq!(cyclic_range(Weekday::Sun, Weekday::Sat).len(), 7);
        assert_eq!(cyclic_range(Weekday::Mon, Weekday::Sun).len(), 7);
        assert_eq!(cyclic_range(Weekday::Sat, Weekday::Fri).len(), 7);
    }

    // ── Time token tests ────────────────────────────────────────────────

    #[test]
    fn test_time_12_hour_forms() {
        assert_eq!(parse_time_token("9am").unwrap(), TimeValue::Minutes(540));
        assert_eq!(parse_time_token("9:30pm").unwrap(), TimeValue::Minutes(1290));
        assert_eq!(parse_time_token("9:30 PM").unwrap(), TimeValue::Minutes(1290));
        assert_eq!(parse_time_token("11 p.m.").unwrap(), TimeValue::Minutes(1380));
    }

    #[test]
    fn test_time_twelve_oclock_meridiem() {
        assert_eq!(parse_time_token("12am").unwrap(), TimeValue::Minutes(0));
        assert_eq!(parse_time_token("12pm").unwrap(), TimeValue::Minutes(720));
        assert_eq!(parse_time_token("12:30am").unwrap(), TimeValue::Minutes(30));
    }

    #[test]
    fn test_time_bare_digits_are_literal() {
        assert_eq!(parse_time_token("9").unwrap(), TimeValue::Minutes(540));
        assert_eq!(parse_time_token("5:45").unwrap(), TimeValue::Minutes(345));
        assert_eq!(parse_time_token("12").unwrap(), TimeValue::Minutes(720));
    }

    #[test]
    fn test_time_named() {
        assert_eq!(parse_time_token("Noon").unwrap(), TimeValue::Minutes(720));
        assert_eq!(parse_time_token("midnight").unwrap(), TimeValue::Minutes(0));
    }

    #[test]
    fn test_time_dynamic_marker_case_insensitive() {
        assert_eq!(parse_time_token("AS").unwrap(), TimeValue::AfterShabbat);
        assert_eq!(parse_time_token(" as ").unwrap(), TimeValue::AfterShabbat);
    }

    #[test]
    fn test_time_rejects_malformed() {
        for token in ["0", "13", "17:00", "9:5", "9:60am", "ninepm", "", "9:30:00", "123"] {
            let result = parse_time_token(token);
            assert!(result.is_err(), "{token:?} should be rejected");
        }
    }
}
