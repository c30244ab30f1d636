use chrono::NaiveDate;

/// `YYYY-MM-DD` -> `DD.MM.YY`. Missing components come out empty.
pub fn iso_to_display(iso: &str) -> String {
    let mut parts = iso.split('-');
    let year = parts.next().unwrap_or("");
    let month = parts.next().unwrap_or("");
    let day = parts.next().unwrap_or("");
    format!("{day}.{month}.{}", short_year(year))
}

/// `DD.MM.YY` -> `YYYY-MM-DD`, expanding a two-character year with `20`.
/// Malformed input is not rejected; missing parts come out empty.
pub fn display_to_iso(display: &str) -> String {
    let mut parts = display.split('.');
    let day = parts.next().unwrap_or("");
    let month = parts.next().unwrap_or("");
    let year = parts.next().unwrap_or("");
    let year = if year.chars().count() == 2 {
        format!("20{year}")
    } else {
        year.to_string()
    };
    format!("{year}-{month}-{day}")
}

/// Sort key for a display date, `None` when it does not name a real day.
pub fn parse_display(display: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&display_to_iso(display), "%Y-%m-%d").ok()
}

fn short_year(year: &str) -> &str {
    match year.char_indices().rev().nth(1) {
        Some((idx, _)) => &year[idx..],
        None => year,
    }
}
