//! Raw HTTP header block parsing.
//!
//! # Design
//! The transport hands back headers as one text block (`HTTP/1.1 200 OK`
//! followed by `Name: value` lines). Parsing is lenient: lines without a
//! colon are skipped instead of failing the whole block, since the block comes
//! from a cooperating transport rather than untrusted input.
//!
//! Names are canonicalized to lower case with `-` replaced by `_`, so
//! `Content-Type` is stored as `content_type`. When a name repeats, the last
//! value wins but the key keeps the position of its first occurrence.

/// Canonical header key: lower-cased, `-` replaced with `_`.
pub fn canonical_key(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace('-', "_")
}

/// Parsed response headers keyed by canonical name, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpHeaders {
    entries: Vec<(String, String)>,
}

impl HttpHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header, canonicalizing `name`. Replaces the value of an existing key.
    pub fn insert(&mut self, name: &str, value: &str) {
        let key = canonical_key(name);
        let value = value.trim().to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a header by raw or canonical name.
    pub fn get(&self, name: &str) -> Option<&str> {
        let key = canonical_key(name);
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

fn is_status_line(line: &str) -> bool {
    line.starts_with("HTTP/")
}

/// Parse a raw header block into canonical headers.
///
/// Status lines are skipped. So are blank lines and lines without a `:`.
/// Values are trimmed.
pub fn parse_headers(raw: &str) -> HttpHeaders {
    let mut headers = HttpHeaders::new();
    for line in raw.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || is_status_line(line) {
            continue;
        }
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        if name.trim().is_empty() {
            continue;
        }
        headers.insert(name, value);
    }
    headers
}

/// Status code from the last status line in a raw header block.
///
/// Interim responses (`100 Continue`) may precede the final status line; the
/// final one is normative.
pub fn parse_status_code(raw: &str) -> Option<u16> {
    raw.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| is_status_line(line))
        .filter_map(|line| line.split_whitespace().nth(1))
        .filter_map(|code| code.parse().ok())
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "HTTP/1.1 200 OK\n\
Date: Wed, 17 Nov 2010 15:39:52 GMT\n\
Cache-Control: public\n\
Content-Type: text/html; charset=utf-8\n\
Content-Encoding: gzip\n\
Server: foobar\n\
Content-Length: 1337";

    #[test]
    fn parses_and_canonicalizes_names() {
        let headers = parse_headers(RAW);
        let keys: Vec<&str> = headers.keys().collect();
        assert_eq!(
            keys,
            vec![
                "date",
                "cache_control",
                "content_type",
                "content_encoding",
                "server",
                "content_length"
            ]
        );
        assert_eq!(headers.get("date"), Some("Wed, 17 Nov 2010 15:39:52 GMT"));
        assert_eq!(headers.get("content_type"), Some("text/html; charset=utf-8"));
        assert_eq!(headers.get("content_length"), Some("1337"));
    }

    #[test]
    fn status_line_is_not_a_header() {
        let headers = parse_headers(RAW);
        assert_eq!(headers.len(), 6);
        assert!(headers.iter().all(|(k, _)| !k.starts_with("http")));
        assert_eq!(parse_status_code(RAW), Some(200));
    }

    #[test]
    fn handles_crlf_and_blank_lines() {
        let raw = "HTTP/1.1 404 Not Found\r\nServer:   nginx  \r\n\r\nX-Request-Id: abc\r\n";
        let headers = parse_headers(raw);
        assert_eq!(headers.get("server"), Some("nginx"));
        assert_eq!(headers.get("x_request_id"), Some("abc"));
        assert_eq!(headers.len(), 2);
        assert_eq!(parse_status_code(raw), Some(404));
    }

    #[test]
    fn skips_malformed_lines() {
        let raw = "HTTP/1.1 200 OK\nthis line has no colon\n: empty name\nServer: foobar\n";
        let headers = parse_headers(raw);
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("server"), Some("foobar"));
    }

    #[test]
    fn value_keeps_colons_after_the_first() {
        let headers = parse_headers("Location: https://api.soundcloud.com/me");
        assert_eq!(headers.get("location"), Some("https://api.soundcloud.com/me"));
    }

    #[test]
    fn duplicate_names_last_value_wins() {
        let headers = parse_headers("Set-Cookie: a=1\nset-cookie: b=2\nServer: x\n");
        assert_eq!(headers.get("set_cookie"), Some("b=2"));
        let keys: Vec<&str> = headers.keys().collect();
        assert_eq!(keys, vec!["set_cookie", "server"]);
    }

    #[test]
    fn lookup_accepts_raw_names() {
        let headers = parse_headers(RAW);
        assert_eq!(headers.get("Cache-Control"), Some("public"));
        assert!(headers.contains("CONTENT-ENCODING"));
        assert!(!headers.contains("etag"));
    }

    #[test]
    fn final_status_line_wins() {
        let raw = "HTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 201 Created\r\nServer: x\r\n";
        assert_eq!(parse_status_code(raw), Some(201));
        assert_eq!(parse_headers(raw).len(), 1);
    }

    #[test]
    fn empty_block_has_no_headers_or_status() {
        assert!(parse_headers("").is_empty());
        assert_eq!(parse_status_code(""), None);
    }
}
