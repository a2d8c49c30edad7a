//! LaTeX escape cleanup for field values.

use once_cell::sync::Lazy;
use regex::Regex;

/// `{\cmd{X}}`, e.g. `{\'{e}}`
static BRACED_ACCENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\\[a-zA-Z]+\{([a-zA-Z])\}\}").expect("valid regex"));

/// `{\cmd X}`, e.g. `{\c c}` or `{\ss}`
static SHORT_ACCENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\\[a-zA-Z]+\s*([a-zA-Z])\}").expect("valid regex"));

/// Strip the LaTeX markup a bibliography value commonly carries.
///
/// The rules run in a fixed order and later rules never reintroduce what an
/// earlier one removed:
///
/// 1. `\&` becomes `&`
/// 2. `{\cmd{X}}` becomes `X`
/// 3. `{\cmd X}` becomes `X`
/// 4. remaining braces are dropped
/// 5. `’` becomes `'`
/// 6. `–` becomes `-`
/// 7. remaining backslashes are dropped
///
/// Anything else passes through untouched. The output contains no braces or
/// backslashes, so the function is idempotent on its own output.
///
/// ```
/// use publist::normalize;
///
/// assert_eq!(normalize(r"Erd{\H{o}}s \& Sons"), "Erdos & Sons");
/// assert_eq!(normalize(r#"Schr{\"o}dinger"#), "Schr\"odinger");
/// ```
pub fn normalize(raw: &str) -> String {
    let value = raw.replace("\\&", "&");
    let value = BRACED_ACCENT.replace_all(&value, "$1");
    let value = SHORT_ACCENT.replace_all(&value, "$1");

    value
        .chars()
        .filter(|c| *c != '{' && *c != '}')
        .map(|c| match c {
            '\u{2019}' => '\'',
            '\u{2013}' => '-',
            other => other,
        })
        .filter(|c| *c != '\\')
        .collect()
}
