// src/core/sanitize.rs

/// Decode the entities that actually show up in the pages we ingest:
/// a small named set plus numeric (decimal and hex) references.
pub fn normalize_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let semi = match tail.find(';') {
            // entities are short; a far-away ';' means a bare '&'
            Some(p) if p <= 10 => p,
            _ => {
                out.push('&');
                rest = &tail[1..];
                continue;
            }
        };
        let body = &tail[1..semi];
        let decoded = match body {
            "amp" => Some(s!("&")),
            "lt" => Some(s!("<")),
            "gt" => Some(s!(">")),
            "quot" => Some(s!("\"")),
            "apos" | "#39" => Some(s!("'")),
            "nbsp" => Some(s!(" ")),
            _ => decode_numeric(body),
        };
        match decoded {
            Some(d) => out.push_str(&d),
            None => {
                out.push('&');
                out.push_str(body);
                out.push(';');
            }
        }
        rest = &tail[semi + 1..];
    }
    out.push_str(rest);
    out
}

fn decode_numeric(body: &str) -> Option<String> {
    let code = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok()?
    } else if let Some(dec) = body.strip_prefix('#') {
        dec.parse::<u32>().ok()?
    } else {
        return None;
    };
    char::from_u32(code).map(String::from)
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}
