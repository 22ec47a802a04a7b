/// Returns the first `visible` characters of `value` followed by `...`.
///
/// Used wherever an identifier or credential is logged or echoed back in a
/// `debug` payload. Values no longer than `visible` are still suffixed so a
/// short secret is never shown in full.
#[must_use]
pub fn redact_prefix(value: &str, visible: usize) -> String {
    let prefix: String = value.chars().take(visible).collect();
    if prefix.len() == value.len() {
        let half: String = value.chars().take(value.chars().count() / 2).collect();
        return format!("{half}...");
    }
    format!("{prefix}...")
}
