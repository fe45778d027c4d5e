//! Invoice file naming

use chrono::NaiveDate;

/// Replaces every character that is not an ASCII alphanumeric, `-` or `_`
pub fn sanitize_registration_number(registration_number: &str) -> String {
    registration_number
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// `Invoice-<registration>-<YYYYMMDD>` without extension
pub fn invoice_stem(registration_number: &str, issued_on: NaiveDate) -> String {
    format!(
        "Invoice-{}-{}",
        sanitize_registration_number(registration_number),
        issued_on.format("%Y%m%d")
    )
}

/// Full download name, e.g. `Invoice-REG-0042-20240815.pdf`
pub fn invoice_filename(registration_number: &str, issued_on: NaiveDate, extension: &str) -> String {
    format!("{}.{}", invoice_stem(registration_number, issued_on), extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 15).unwrap()
    }

    #[test]
    fn test_filename_format() {
        assert_eq!(
            invoice_filename("REG-0042", date(), "pdf"),
            "Invoice-REG-0042-20240815.pdf"
        );
    }

    #[test]
    fn test_unsafe_characters_are_replaced() {
        assert_eq!(sanitize_registration_number("ZM/2024 07"), "ZM_2024_07");
        assert_eq!(sanitize_registration_number("../etc"), "___etc");
        assert_eq!(sanitize_registration_number("Tésting"), "T_sting");
    }

    proptest! {
        #[test]
        fn sanitized_numbers_are_path_safe(raw in ".{0,40}") {
            let sanitized = sanitize_registration_number(&raw);
            prop_assert!(sanitized
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        }
    }
}
