//! Content-Type parameter parsing.

/// Extract the `charset` parameter from a `Content-Type` header value.
///
/// ```text
/// text/html; charset=utf-8       -> Some("utf-8")
/// text/html; Charset="UTF-8"     -> Some("UTF-8")
/// text/html                      -> None
/// text/html; charset=            -> None
/// ```
pub fn content_type_charset(value: &str) -> Option<&str> {
    // The first segment is the media type itself
    for param in value.split(';').skip(1) {
        let Some((name, raw)) = param.split_once('=') else {
            continue;
        };
        if !name.trim().eq_ignore_ascii_case("charset") {
            continue;
        }
        let charset = unquote(raw.trim()).trim();
        return if charset.is_empty() { None } else { Some(charset) };
    }
    None
}

/// Extract a charset from a `<meta http-equiv="Content-Type">` `content`
/// attribute, following the HTML "extract a character encoding from a meta
/// element" steps: find `charset`, skip whitespace, require `=`, then take a
/// quoted or unquoted value.
pub fn meta_content_charset(content: &str) -> Option<&str> {
    let bytes = content.as_bytes();
    let mut pos = 0;

    loop {
        let rel = find_ignore_ascii_case(&bytes[pos..], b"charset")?;
        pos += rel + "charset".len();

        let mut i = skip_whitespace(bytes, pos);
        if bytes.get(i) != Some(&b'=') {
            // Not a parameter; keep looking after this occurrence
            continue;
        }
        i = skip_whitespace(bytes, i + 1);

        return match bytes.get(i) {
            None => None,
            Some(&q) if q == b'"' || q == b'\'' => {
                let rest = &content[i + 1..];
                let end = rest.find(q as char)?;
                non_empty(&rest[..end])
            }
            Some(_) => {
                let rest = &content[i..];
                let end = rest
                    .find(|c: char| c.is_ascii_whitespace() || c == ';')
                    .unwrap_or(rest.len());
                non_empty(&rest[..end])
            }
        };
    }
}

fn unquote(s: &str) -> &str {
    for q in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(q) {
            return inner.split(q).next().unwrap_or(inner);
        }
    }
    s
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(|b| b.is_ascii_whitespace()) {
        i += 1;
    }
    i
}

fn find_ignore_ascii_case(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
}
