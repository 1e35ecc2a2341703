//! # Shareable links
//! Positions travel between players as a `fen` query parameter appended to the
//! address of the page, e.g.
//! `https://example.org/chess?fen=rnbqkbnr%2Fpppppppp%2F8%2F8%2F8%2F8%2FPPPPPPPP%2FRNBQKBNR%20w%20KQkq%20-%200%201`.
//!
//! Links are produced with the FEN percent-encoded the way browsers'
//! `encodeURIComponent` does it, and read back with form-urlencoded decoding
//! (`+` stands for a space), so links written by hand or by other tools load too.

use thiserror::Error;

use crate::game::{fen::FenParseError, position::Position};

/// Name of the query parameter holding the position.
pub const FEN_PARAMETER: &str = "fen";

/// Errors that may arise when loading a position from a link.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("The link has no `fen` parameter")]
    MissingFen,
    #[error("The `fen` parameter does not decode to UTF-8 text")]
    InvalidEncoding,
    #[error("The link holds an invalid position: {0}")]
    InvalidFen(#[from] FenParseError),
}

/// Characters `encodeURIComponent` leaves untouched besides ASCII alphanumerics.
const UNRESERVED_MARKS: &[u8] = b"-_.!~*'()";

/// Percent-encodes a query component.
/// # Example
/// ```
/// # use chesslink::link::encode_component;
/// assert_eq!(encode_component("8/8 w - -"), "8%2F8%20w%20-%20-");
/// ```
pub fn encode_component(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len());
    for byte in s.bytes() {
        if byte.is_ascii_alphanumeric() || UNRESERVED_MARKS.contains(&byte) {
            encoded.push(byte as char)
        } else {
            encoded.push_str(&format!("%{byte:02X}"))
        }
    }
    encoded
}

/// Decodes a form-urlencoded query component. Malformed escapes are kept as
/// they are.
pub fn decode_component(s: &str) -> Result<String, LinkError> {
    let bytes = s.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => decoded.push(b' '),
            b'%' => {
                let escape = bytes
                    .get(i + 1..i + 3)
                    .filter(|hex| hex.iter().all(u8::is_ascii_hexdigit))
                    .and_then(|hex| std::str::from_utf8(hex).ok())
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                match escape {
                    Some(byte) => {
                        decoded.push(byte);
                        i += 2;
                    }
                    None => decoded.push(b'%'),
                }
            }
            byte => decoded.push(byte),
        }
        i += 1;
    }
    String::from_utf8(decoded).map_err(|_| LinkError::InvalidEncoding)
}

/// Strips the query string and fragment from a URL.
pub fn without_query(url: &str) -> &str {
    let end = url.find(|c: char| c == '?' || c == '#').unwrap_or(url.len());
    &url[..end]
}

/// Builds the link to share for a position.
///
/// Any query or fragment already present on `base_url` is dropped.
pub fn share_link(base_url: &str, position: &Position) -> String {
    format!(
        "{}?{FEN_PARAMETER}={}",
        without_query(base_url),
        encode_component(&position.to_fen_string())
    )
}

/// Extracts and decodes the FEN from a query string (with or without its
/// leading `?`). Only the first `fen` parameter is read; an empty one counts
/// as missing.
pub fn fen_from_query(query: &str) -> Result<String, LinkError> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let value = query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| decode_component(key).as_deref() == Ok(FEN_PARAMETER))
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
        .ok_or(LinkError::MissingFen)?;
    decode_component(value)
}

/// The query string of a URL, without its leading `?` nor the fragment.
fn query_of(url: &str) -> &str {
    let Some((_, rest)) = url.split_once('?') else {
        return "";
    };
    rest.split_once('#').map_or(rest, |(query, _)| query)
}

/// Loads the position carried by a link.
/// # Errors
/// Fails if the link has no `fen` parameter or if it does not hold a valid
/// position.
pub fn load_link(url: &str) -> Result<Position, LinkError> {
    let fen = fen_from_query(query_of(url))?;
    log::debug!("Loading position {fen:?} from link");
    Ok(fen.parse()?)
}

/// Loads the position carried by a link, falling back to the starting position
/// when the link holds none or an invalid one.
pub fn position_from_url(url: &str) -> Position {
    match load_link(url) {
        Ok(position) => position,
        Err(LinkError::MissingFen) => Position::initial(),
        Err(e) => {
            log::warn!("Ignoring position from {url:?}: {e}");
            Position::initial()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::{action::PcnMove, fen::START_FEN};

    #[test]
    fn encodes_like_encode_uri_component() {
        assert_eq!(
            encode_component(START_FEN),
            "rnbqkbnr%2Fpppppppp%2F8%2F8%2F8%2F8%2FPPPPPPPP%2FRNBQKBNR%20w%20KQkq%20-%200%201"
        );
        assert_eq!(encode_component("a+b&c=d?é"), "a%2Bb%26c%3Dd%3F%C3%A9");
        assert_eq!(encode_component("(it's)*~!"), "(it's)*~!");
    }

    #[test]
    fn decoding() {
        assert_eq!(decode_component("8%2F8+w%20-"), Ok("8/8 w -".to_string()));
        assert_eq!(decode_component("100%"), Ok("100%".to_string()));
        assert_eq!(decode_component("%zz%4"), Ok("%zz%4".to_string()));
        assert_eq!(decode_component("%C3%A9"), Ok("é".to_string()));
        assert_eq!(decode_component("%FF"), Err(LinkError::InvalidEncoding));
    }

    #[test]
    fn share_then_load() {
        let position = Position::initial()
            .make("e2e4".parse::<PcnMove>().unwrap())
            .unwrap();
        let link = share_link("https://example.org/play?fen=old#board", &position);
        assert_eq!(
            link,
            "https://example.org/play?fen=rnbqkbnr%2Fpppppppp%2F8%2F8%2F4P3%2F8%2FPPPP1PPP%2FRNBQKBNR%20b%20KQkq%20e3%200%201"
        );
        assert_eq!(load_link(&link), Ok(position.clone()));
        assert_eq!(position_from_url(&link), position);
    }

    #[test]
    fn query_parsing() {
        assert_eq!(
            fen_from_query("?lang=it&fen=8%2F8&fen=ignored"),
            Ok("8/8".to_string())
        );
        assert_eq!(fen_from_query("fen=a+b"), Ok("a b".to_string()));
        assert_eq!(fen_from_query("?fen="), Err(LinkError::MissingFen));
        assert_eq!(fen_from_query("?fen=&fen=8%2F8"), Err(LinkError::MissingFen));
        assert_eq!(fen_from_query("?fen"), Err(LinkError::MissingFen));
        assert_eq!(fen_from_query(""), Err(LinkError::MissingFen));
        assert_eq!(query_of("https://x.org/?fen=1#top"), "fen=1");
        assert_eq!(query_of("https://x.org/#top"), "");
        assert_eq!(without_query("https://x.org/a#top"), "https://x.org/a");
    }

    #[test]
    fn invalid_links_fall_back_to_the_start() {
        assert_eq!(
            load_link("https://x.org/?fen=not-a-fen"),
            Err(LinkError::InvalidFen(FenParseError::FieldCount(1)))
        );
        assert_eq!(
            position_from_url("https://x.org/?fen=not-a-fen"),
            Position::initial()
        );
        assert_eq!(load_link("https://x.org/"), Err(LinkError::MissingFen));
        assert_eq!(
            position_from_url("https://x.org/?fen=&fen=8%2F8%2F8%2F8%2F8%2F8%2F8%2FK6k%20w%20-%20-%200%201"),
            Position::initial()
        );
        assert_eq!(position_from_url("https://x.org/"), Position::initial());
    }
}
