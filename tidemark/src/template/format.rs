//! Calendar token substitution for placeholder specs.
//!
//! A spec like `yyyy-MM-dd HH:mm` mixes calendar tokens with punctuation.
//! Categories are substituted in a fixed order (year, month, day, 24-hour,
//! 12-hour, minute) and within each category only the longest token present
//! is substituted, so `yyyy` never leaves a stray `yy` behind. Substituted
//! values are purely numeric, which is what keeps later categories from
//! re-touching a region an earlier category already produced.

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Substitute every calendar token in `spec` with the corresponding field of
/// `instant`.
pub(super) fn substitute(spec: &str, instant: DateTime<Utc>) -> String {
    let mut out = spec.to_string();

    let year = instant.year();
    replace_longest(
        &mut out,
        &[
            ("yyyy", format!("{:04}", year)),
            // `yyy` is read as the last three digits of the year, not as a
            // zero prefix glued onto the 2-digit year.
            ("yyy", format!("{:03}", year.rem_euclid(1000))),
            ("yy", format!("{:02}", year.rem_euclid(100))),
        ],
    );

    replace_longest(
        &mut out,
        &[
            ("MM", format!("{:02}", instant.month())),
            ("M", instant.month().to_string()),
        ],
    );

    replace_longest(
        &mut out,
        &[
            ("dd", format!("{:02}", instant.day())),
            ("d", instant.day().to_string()),
        ],
    );

    // Both 24-hour tokens zero-pad: keys written under the reference layout
    // always carry a two-digit hour, so an unpadded `H` would render prefixes
    // that never match existing partitions.
    replace_longest(
        &mut out,
        &[
            ("HH", format!("{:02}", instant.hour())),
            ("H", format!("{:02}", instant.hour())),
        ],
    );

    let (_, hour12) = instant.hour12();
    replace_longest(
        &mut out,
        &[
            ("hh", format!("{:02}", hour12)),
            ("h", hour12.to_string()),
        ],
    );

    replace_longest(
        &mut out,
        &[
            ("mm", format!("{:02}", instant.minute())),
            ("m", instant.minute().to_string()),
        ],
    );

    out
}

/// Replace all occurrences of the first (longest) token found, then stop.
fn replace_longest(text: &mut String, tokens: &[(&str, String)]) {
    for (token, value) in tokens {
        if text.contains(token) {
            *text = text.replace(token, value);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant() -> DateTime<Utc> {
        // 2021-10-30 17:40:05 UTC
        Utc.with_ymd_and_hms(2021, 10, 30, 17, 40, 5).unwrap()
    }

    #[test]
    fn test_year_tokens() {
        assert_eq!(substitute("yyyy", instant()), "2021");
        assert_eq!(substitute("yyy", instant()), "021");
        assert_eq!(substitute("yy", instant()), "21");
    }

    #[test]
    fn test_three_digit_year_outside_current_century() {
        // `yyy` takes the last three digits of the year. For 2185 that is
        // "185", not "0" followed by the 2-digit year.
        let future = Utc.with_ymd_and_hms(2185, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(substitute("yyy", future), "185");
        assert_eq!(substitute("yy", future), "85");
    }

    #[test]
    fn test_month_and_day_tokens() {
        assert_eq!(substitute("MM-dd", instant()), "10-30");
        let march = Utc.with_ymd_and_hms(2021, 3, 4, 0, 0, 0).unwrap();
        assert_eq!(substitute("M/d", march), "3/4");
    }

    #[test]
    fn test_hour_tokens() {
        assert_eq!(substitute("HH", instant()), "17");
        assert_eq!(substitute("hh", instant()), "05");
        assert_eq!(substitute("h", instant()), "5");

        let morning = Utc.with_ymd_and_hms(2021, 10, 30, 7, 0, 0).unwrap();
        assert_eq!(substitute("HH", morning), "07");
    }

    #[test]
    fn test_single_h_token_is_zero_padded() {
        // A lone `H` still renders two digits, matching the layout that
        // partition keys are written with.
        let morning = Utc.with_ymd_and_hms(2021, 10, 30, 7, 0, 0).unwrap();
        assert_eq!(substitute("H", morning), "07");
        assert_eq!(substitute("hour=H", morning), "hour=07");
    }

    #[test]
    fn test_minute_tokens() {
        assert_eq!(substitute("mm", instant()), "40");
        let early = Utc.with_ymd_and_hms(2021, 10, 30, 17, 4, 0).unwrap();
        assert_eq!(substitute("mm", early), "04");
        assert_eq!(substitute("m", early), "4");
    }

    #[test]
    fn test_full_spec() {
        assert_eq!(
            substitute("yyyy-MM-dd HH:mm", instant()),
            "2021-10-30 17:40"
        );
    }

    #[test]
    fn test_longest_token_wins_within_category() {
        // `yyyy` must be substituted as one token, not as two `yy` runs.
        // Only the longest token found in a category is substituted, so a
        // shorter leftover token stays as-is.
        assert_eq!(substitute("yyyy/yy", instant()), "2021/yy");
    }

    #[test]
    fn test_no_cross_category_substitution() {
        // Year substitution produces digits only, so the month pass cannot
        // re-touch the substituted region.
        assert_eq!(substitute("yyyyMM", instant()), "202110");
        assert_eq!(substitute("MMmm", instant()), "1040");
    }

    #[test]
    fn test_punctuation_passes_through() {
        assert_eq!(substitute("=:-|", instant()), "=:-|");
    }
}
