use ammonia;

/// Whitelist-sanitizes rich text for rendering: safe tags (like <b>, <p>)
/// are preserved, dangerous tags (like <script>, <iframe>) and malicious
/// attributes (like onclick) are stripped.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}

/// Fully entity-escapes plain text for embedding in view markup.
pub fn escape_text(input: &str) -> String {
    ammonia::clean_text(input)
}
