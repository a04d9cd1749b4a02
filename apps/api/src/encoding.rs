//! Best-effort mojibake repair for pre-rendered sample text.
//!
//! This is a lossy heuristic, not an encoding-correctness guarantee. It
//! targets UTF-8 text that was decoded as Latin-1 somewhere upstream
//! ("FranÃ§ais" instead of "Français"), plus HTML-escaped sequences. Text it
//! cannot reinterpret is returned untouched.

/// Decodes HTML entities, then reinterprets each character as one Latin-1
/// byte and re-decodes the bytes as UTF-8, dropping invalid sequences.
///
/// Never fails: if any character is outside Latin-1 the input is returned
/// unchanged.
pub fn repair_text(input: &str) -> String {
    let unescaped = unescape_html(input);

    let mut bytes = Vec::with_capacity(unescaped.len());
    for c in unescaped.chars() {
        match u8::try_from(u32::from(c)) {
            Ok(byte) => bytes.push(byte),
            Err(_) => return input.to_string(),
        }
    }

    bytes
        .utf8_chunks()
        .map(|chunk| chunk.valid())
        .collect::<String>()
}

/// Decodes the XML entities, the Latin-1 named set, common typographic
/// punctuation, and numeric character references. Anything unrecognized is
/// left as written.
fn unescape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp..];

        // Entities are short; don't scan the whole tail for a ';'.
        let decoded = candidate
            .char_indices()
            .take(12)
            .find(|&(_, c)| c == ';')
            .and_then(|(end, _)| decode_entity(&candidate[1..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &candidate[end + 1..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Named entities for U+00A0..=U+00FF, in code point order.
const LATIN1_ENTITIES: [&str; 96] = [
    "nbsp", "iexcl", "cent", "pound", "curren", "yen", "brvbar", "sect", "uml", "copy", "ordf",
    "laquo", "not", "shy", "reg", "macr", "deg", "plusmn", "sup2", "sup3", "acute", "micro",
    "para", "middot", "cedil", "sup1", "ordm", "raquo", "frac14", "frac12", "frac34", "iquest",
    "Agrave", "Aacute", "Acirc", "Atilde", "Auml", "Aring", "AElig", "Ccedil", "Egrave",
    "Eacute", "Ecirc", "Euml", "Igrave", "Iacute", "Icirc", "Iuml", "ETH", "Ntilde", "Ograve",
    "Oacute", "Ocirc", "Otilde", "Ouml", "times", "Oslash", "Ugrave", "Uacute", "Ucirc", "Uuml",
    "Yacute", "THORN", "szlig", "agrave", "aacute", "acirc", "atilde", "auml", "aring", "aelig",
    "ccedil", "egrave", "eacute", "ecirc", "euml", "igrave", "iacute", "icirc", "iuml", "eth",
    "ntilde", "ograve", "oacute", "ocirc", "otilde", "ouml", "divide", "oslash", "ugrave",
    "uacute", "ucirc", "uuml", "yacute", "thorn", "yuml",
];

const PUNCTUATION_ENTITIES: [(&str, char); 12] = [
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("sbquo", '\u{201A}'),
    ("ldquo", '\u{201C}'),
    ("rdquo", '\u{201D}'),
    ("bdquo", '\u{201E}'),
    ("ndash", '\u{2013}'),
    ("mdash", '\u{2014}'),
    ("hellip", '\u{2026}'),
    ("bull", '\u{2022}'),
    ("trade", '\u{2122}'),
    ("euro", '\u{20AC}'),
];

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => return Some('&'),
        "lt" => return Some('<'),
        "gt" => return Some('>'),
        "quot" => return Some('"'),
        "apos" => return Some('\''),
        _ => {}
    }

    if let Some(index) = LATIN1_ENTITIES.iter().position(|&entity| entity == name) {
        return char::from_u32(0xA0 + index as u32);
    }
    if let Some(&(_, c)) = PUNCTUATION_ENTITIES.iter().find(|&&(entity, _)| entity == name) {
        return Some(c);
    }

    let digits = name.strip_prefix('#')?;
    let code = match digits
        .strip_prefix('x')
        .or_else(|| digits.strip_prefix('X'))
    {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    // NUL, surrogates and out-of-range code points become U+FFFD.
    match char::from_u32(code) {
        Some(c) if code != 0 => Some(c),
        _ => Some(char::REPLACEMENT_CHARACTER),
    }
}
