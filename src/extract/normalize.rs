use url::{Position, Url};

/// Prefix `https://` unless the input already carries an http(s) scheme.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

fn has_http_scheme(s: &str) -> bool {
    ["http://", "https://"].iter().any(|p| {
        s.len() >= p.len() && s.as_bytes()[..p.len()].eq_ignore_ascii_case(p.as_bytes())
    })
}

/// Network location (host plus explicit non-default port).
pub fn network_location(url: &Url) -> String {
    url[Position::BeforeHost..Position::AfterPort].to_string()
}
