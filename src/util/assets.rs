//! Stylesheet and favicon baked into the binary from `assets/`.

use std::sync::OnceLock;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

const STYLESHEET: &str = "main.css";
const FAVICON: &str = "favicon.svg";

static MAIN_CSS: OnceLock<String> = OnceLock::new();
static FAVICON_DATA_URI: OnceLock<String> = OnceLock::new();

pub fn main_css() -> &'static str {
    MAIN_CSS.get_or_init(|| embedded_text(STYLESHEET))
}

/// Favicon as an inline `data:` URI so the webview needs no asset server.
pub fn favicon_data_uri() -> &'static str {
    FAVICON_DATA_URI.get_or_init(|| svg_data_uri(embedded_text(FAVICON).as_bytes()))
}

fn embedded_text(name: &str) -> String {
    let file = EmbeddedAssets::get(name)
        .unwrap_or_else(|| panic!("asset {name} missing from assets/"));
    String::from_utf8(file.data.into_owned())
        .unwrap_or_else(|_| panic!("asset {name} is not valid UTF-8"))
}

fn svg_data_uri(svg: &[u8]) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}
