use std::path::{Path, PathBuf};

pub fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// Parses the usual spellings of an on/off environment value.
pub fn flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

pub fn schedule_file(dir: &Path, team: &str) -> PathBuf {
    dir.join("schedules").join(format!("{}.csv", team))
}

#[cfg(test)]
#[test]
fn test_round3() {
    use assert_approx_eq::assert_approx_eq;

    assert_approx_eq!(round3(0.5), 0.5);
    assert_approx_eq!(round3(2.0 / 3.0), 0.667);
    assert_approx_eq!(round3(1.0 / 3.0), 0.333);
    assert_approx_eq!(round3(0.0004), 0.0);
}

#[cfg(test)]
#[test]
fn test_flag() {
    assert_eq!(flag("1"), Some(true));
    assert_eq!(flag("TRUE"), Some(true));
    assert_eq!(flag(" off "), Some(false));
    assert_eq!(flag(""), Some(false));
    assert_eq!(flag("maybe"), None);
}
