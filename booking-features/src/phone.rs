//! Indonesian phone numbers in two shapes.
//!
//! - display form: `+62 812 3456 7890` (or a shorter grouped prefix while typing)
//! - canonical form: `6281234567890` (digits only, country code first)
//!
//! Every function here is total: garbage in gives an empty string or `false`,
//! never a panic.

/// Country code every canonical number starts with.
pub const COUNTRY_CODE: &str = "62";

/// Prefix of the display form.
pub const DISPLAY_PREFIX: &str = "+62 ";

/// Upper bound of local digits kept while typing.
pub const MAX_LOCAL_DIGITS: usize = 13;

/// Shop number used for the "chat with us" links.
pub const WHATSAPP_NUMBER: &str = "6285172272514";

const TRUNK_PREFIX: char = '0';

fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// `8123456789` -> `+62 812 3456 789`
///
/// At most 11 local digits are shown (3 + 4 + 4).
fn group_local(local: &str) -> String {
    let n = local.len();
    if n <= 3 {
        format!("{DISPLAY_PREFIX}{local}")
    } else if n <= 7 {
        format!("{DISPLAY_PREFIX}{} {}", &local[..3], &local[3..])
    } else {
        format!(
            "{DISPLAY_PREFIX}{} {} {}",
            &local[..3],
            &local[3..7],
            &local[7..n.min(11)]
        )
    }
}

/// Reformats whatever the user has typed so far into display form.
///
/// Meant to run on every keystroke, so it has to be idempotent:
/// feeding its own output back in gives the same string.
///
/// ```
/// use booking_features::phone::auto_format_phone;
///
/// assert_eq!(auto_format_phone("081234567890"), "+62 812 3456 7890");
/// assert_eq!(auto_format_phone("+62 812 3456 7890"), "+62 812 3456 7890");
/// assert_eq!(auto_format_phone("0812"), "+62 812");
/// ```
pub fn auto_format_phone(input: &str) -> String {
    let mut digits = digits_only(input);
    if digits.is_empty() {
        return String::new();
    }

    if digits.starts_with(TRUNK_PREFIX) {
        digits.remove(0);
    }
    if let Some(rest) = digits.strip_prefix(COUNTRY_CODE) {
        digits = rest.to_string();
    }
    digits.truncate(MAX_LOCAL_DIGITS);

    group_local(&digits)
}

/// Canonicalizes a phone number: digits only, `62` first.
///
/// Same as `normalize_phone_number_with(input, true)`.
pub fn normalize_phone_number(input: &str) -> String {
    normalize_phone_number_with(input, true)
}

/// Canonicalizes a phone number.
///
/// With `force_normalize == false` a value that is already in display form
/// is handed back untouched, so a form field can keep showing it.
pub fn normalize_phone_number_with(input: &str, force_normalize: bool) -> String {
    if input.is_empty() {
        return String::new();
    }
    if !force_normalize && input.starts_with(DISPLAY_PREFIX) {
        return input.to_string();
    }

    let digits = digits_only(input);
    if digits.is_empty() || digits.starts_with(COUNTRY_CODE) {
        return digits;
    }
    if let Some(rest) = digits.strip_prefix(TRUNK_PREFIX) {
        return format!("{COUNTRY_CODE}{rest}");
    }
    if (9..=13).contains(&digits.len()) {
        return format!("{COUNTRY_CODE}{digits}");
    }

    digits
}

/// Turns a stored number (`62…` or `0…`) into display form.
///
/// Fewer than 3 local digits cannot be grouped and come back as bare digits.
/// Every trunk `0` left after the country code is dropped.
pub fn format_phone_number(canonical: &str) -> String {
    let digits = digits_only(canonical);
    let local = digits.strip_prefix(COUNTRY_CODE).unwrap_or(&digits);
    let local = local.trim_start_matches(TRUNK_PREFIX);

    let n = local.len();
    if n >= 10 {
        format!(
            "{DISPLAY_PREFIX}{} {} {}",
            &local[..3],
            &local[3..7],
            &local[7..n.min(11)]
        )
    } else if n >= 7 {
        format!("{DISPLAY_PREFIX}{} {}", &local[..3], &local[3..7])
    } else if n >= 3 {
        format!("{DISPLAY_PREFIX}{}", &local[..3])
    } else {
        local.to_string()
    }
}

/// Accepts display or canonical input.
pub fn validate_phone_number(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }

    let normalized = normalize_phone_number(value);
    let Some(local) = normalized.strip_prefix(COUNTRY_CODE) else {
        return false;
    };
    if !(10..=15).contains(&normalized.len()) {
        return false;
    }

    (8..=13).contains(&local.len())
}

/// Display form for anything that can be canonicalized; other input is
/// returned as it came.
pub fn to_display_format(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    if value.starts_with(DISPLAY_PREFIX) {
        return value.to_string();
    }

    let normalized = normalize_phone_number(value);
    match normalized.strip_prefix(COUNTRY_CODE) {
        Some(local) if local.len() >= 3 => format_phone_number(&normalized),
        Some(local) => format!("{DISPLAY_PREFIX}{local}"),
        None => value.to_string(),
    }
}

/// Log-safe rendering: only the last four digits survive.
pub fn mask_phone(value: &str) -> String {
    let digits = digits_only(value);
    if digits.is_empty() {
        return "<empty>".to_string();
    }
    let hidden = digits.len().saturating_sub(4);
    format!("{}{}", "*".repeat(hidden), &digits[hidden..])
}

/// `https://wa.me/<shop number>?text=<message>`
pub fn whatsapp_link(message: &str) -> String {
    if message.is_empty() {
        return format!("https://wa.me/{WHATSAPP_NUMBER}");
    }
    format!(
        "https://wa.me/{WHATSAPP_NUMBER}?text={}",
        urlencoding::encode(message)
    )
}
