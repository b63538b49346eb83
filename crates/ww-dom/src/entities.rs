//! Named HTML entity normalization.
//!
//! Document converters emit named HTML entities the XML reader does not
//! know. This pre-pass rewrites them to Unicode before parsing. The five
//! standard XML entities (amp, lt, gt, quot, apos) are left for the
//! reader itself.

use std::sync::LazyLock;

use regex::Regex;

static ENTITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&([a-zA-Z]+);").expect("invalid entity regex"));

/// Rewrite named HTML entities to their Unicode characters.
///
/// Unknown entities are preserved unchanged.
pub fn normalize_entities(html: &str) -> String {
    ENTITY_PATTERN
        .replace_all(html, |caps: &regex::Captures| {
            named_entity(&caps[1]).map_or_else(|| caps[0].to_owned(), str::to_owned)
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<&'static str> {
    Some(match name {
        "nbsp" => "\u{00a0}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "hellip" => "\u{2026}",
        "bull" => "\u{2022}",
        "middot" => "\u{00b7}",
        "sect" => "\u{00a7}",
        "para" => "\u{00b6}",
        "copy" => "\u{00a9}",
        "reg" => "\u{00ae}",
        "trade" => "\u{2122}",
        "deg" => "\u{00b0}",
        "plusmn" => "\u{00b1}",
        "times" => "\u{00d7}",
        "divide" => "\u{00f7}",
        "le" => "\u{2264}",
        "ge" => "\u{2265}",
        "ne" => "\u{2260}",
        "rarr" => "\u{2192}",
        "larr" => "\u{2190}",
        _ => return None,
    })
}

/// Decode an XML entity reference reported by the reader.
///
/// Handles the standard five plus numeric character references. Unknown
/// references are re-emitted verbatim so content is never silently lost.
pub(crate) fn decode_reference(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        numeric if numeric.starts_with('#') => {
            let code = numeric
                .strip_prefix("#x")
                .or_else(|| numeric.strip_prefix("#X"))
                .map_or_else(
                    || numeric[1..].parse::<u32>().ok(),
                    |hex| u32::from_str_radix(hex, 16).ok(),
                );
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        _ => format!("&{entity};"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_named_entities() {
        assert_eq!(
            normalize_entities("A&nbsp;B&mdash;C"),
            "A\u{00a0}B\u{2014}C"
        );
    }

    #[test]
    fn test_xml_entities_left_alone() {
        assert_eq!(normalize_entities("a &amp; b &lt;tag&gt;"), "a &amp; b &lt;tag&gt;");
    }

    #[test]
    fn test_unknown_entity_preserved() {
        assert_eq!(normalize_entities("&unknownthing;"), "&unknownthing;");
    }

    #[test]
    fn test_decode_numeric_references() {
        assert_eq!(decode_reference("#65"), "A");
        assert_eq!(decode_reference("#x41"), "A");
        assert_eq!(decode_reference("#xZZ"), "&#xZZ;");
    }
}
