//! Number parsing shared by the locale packs.
//!
//! Accepts ASCII digits, full-width digits, and simple CJK numerals up to
//! the thousands ("二〇二五", "十二", "三十一").

/// Parse a numeric token. Returns `None` for anything that is not a number.
pub fn parse_number(token: &str) -> Option<i32> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    let normalized: String = token.chars().map(fold_fullwidth).collect();
    if normalized.chars().all(|c| c.is_ascii_digit()) {
        return normalized.parse().ok();
    }

    parse_cjk(&normalized)
}

fn fold_fullwidth(c: char) -> char {
    match c {
        '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
        _ => c,
    }
}

fn cjk_digit(c: char) -> Option<i32> {
    Some(match c {
        '〇' | '零' => 0,
        '一' => 1,
        '二' | '两' | '兩' => 2,
        '三' => 3,
        '四' => 4,
        '五' => 5,
        '六' => 6,
        '七' => 7,
        '八' => 8,
        '九' => 9,
        d if d.is_ascii_digit() => d.to_digit(10)? as i32,
        _ => return None,
    })
}

fn cjk_unit(c: char) -> Option<i32> {
    match c {
        '十' => Some(10),
        '百' => Some(100),
        '千' => Some(1000),
        _ => None,
    }
}

fn parse_cjk(token: &str) -> Option<i32> {
    // Positional form: "二〇二五"
    if !token.chars().any(|c| cjk_unit(c).is_some()) {
        return token
            .chars()
            .try_fold(0i32, |acc, c| Some(acc * 10 + cjk_digit(c)?));
    }

    // Multiplicative form: "三十一", "十二", "二千二十五"
    let mut total = 0;
    let mut pending: Option<i32> = None;
    for c in token.chars() {
        if let Some(unit) = cjk_unit(c) {
            total += pending.take().unwrap_or(1) * unit;
        } else {
            let digit = cjk_digit(c)?;
            pending = Some(pending.unwrap_or(0) * 10 + digit);
        }
    }
    Some(total + pending.unwrap_or(0))
}
