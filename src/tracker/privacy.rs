/// Lowercase markers browsers put into the title of a private window.
pub const PRIVATE_INDICATORS: [&str; 4] =
    ["inprivate", "incognito", "private browsing", "private window"];

/// Whether the window title belongs to a private browsing session.
pub fn is_private(window_title: &str) -> bool {
    let title = window_title.to_lowercase();
    PRIVATE_INDICATORS
        .iter()
        .any(|indicator| title.contains(indicator))
}
