//! Reporter module for output formatting
//!
//! `html` and its fragment modules build the report page; `console` and
//! `json` describe a finished run on stdout.

pub mod assets;
pub mod console;
pub mod fixture;
pub mod html;
pub mod json;
pub mod style;
pub mod summary;

pub use assets::AssetBundle;
pub use console::ConsoleReporter;
pub use html::HtmlReporter;
pub use json::JsonReporter;

/// Escape text taken from result documents for element content and
/// double-quoted attribute values
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
