//! Named character references of XHTML 1.0 beyond the five XML ones.
//!
//! Covers the Latin-1, symbol and special sets that show up in practice;
//! anything missing is kept as literal text by the reader.
use phf::{Map, phf_map};

static ENTITIES: Map<&'static str, &'static str> = phf_map! {
    // Latin-1
    "nbsp" => "\u{00A0}",
    "iexcl" => "\u{00A1}",
    "cent" => "\u{00A2}",
    "pound" => "\u{00A3}",
    "curren" => "\u{00A4}",
    "yen" => "\u{00A5}",
    "brvbar" => "\u{00A6}",
    "sect" => "\u{00A7}",
    "uml" => "\u{00A8}",
    "copy" => "\u{00A9}",
    "ordf" => "\u{00AA}",
    "laquo" => "\u{00AB}",
    "not" => "\u{00AC}",
    "shy" => "\u{00AD}",
    "reg" => "\u{00AE}",
    "macr" => "\u{00AF}",
    "deg" => "\u{00B0}",
    "plusmn" => "\u{00B1}",
    "sup2" => "\u{00B2}",
    "sup3" => "\u{00B3}",
    "acute" => "\u{00B4}",
    "micro" => "\u{00B5}",
    "para" => "\u{00B6}",
    "middot" => "\u{00B7}",
    "cedil" => "\u{00B8}",
    "sup1" => "\u{00B9}",
    "ordm" => "\u{00BA}",
    "raquo" => "\u{00BB}",
    "frac14" => "\u{00BC}",
    "frac12" => "\u{00BD}",
    "frac34" => "\u{00BE}",
    "iquest" => "\u{00BF}",
    "Agrave" => "\u{00C0}",
    "Aacute" => "\u{00C1}",
    "Acirc" => "\u{00C2}",
    "Atilde" => "\u{00C3}",
    "Auml" => "\u{00C4}",
    "Aring" => "\u{00C5}",
    "AElig" => "\u{00C6}",
    "Ccedil" => "\u{00C7}",
    "Egrave" => "\u{00C8}",
    "Eacute" => "\u{00C9}",
    "Ecirc" => "\u{00CA}",
    "Euml" => "\u{00CB}",
    "Igrave" => "\u{00CC}",
    "Iacute" => "\u{00CD}",
    "Icirc" => "\u{00CE}",
    "Iuml" => "\u{00CF}",
    "ETH" => "\u{00D0}",
    "Ntilde" => "\u{00D1}",
    "Ograve" => "\u{00D2}",
    "Oacute" => "\u{00D3}",
    "Ocirc" => "\u{00D4}",
    "Otilde" => "\u{00D5}",
    "Ouml" => "\u{00D6}",
    "times" => "\u{00D7}",
    "Oslash" => "\u{00D8}",
    "Ugrave" => "\u{00D9}",
    "Uacute" => "\u{00DA}",
    "Ucirc" => "\u{00DB}",
    "Uuml" => "\u{00DC}",
    "Yacute" => "\u{00DD}",
    "THORN" => "\u{00DE}",
    "szlig" => "\u{00DF}",
    "agrave" => "\u{00E0}",
    "aacute" => "\u{00E1}",
    "acirc" => "\u{00E2}",
    "atilde" => "\u{00E3}",
    "auml" => "\u{00E4}",
    "aring" => "\u{00E5}",
    "aelig" => "\u{00E6}",
    "ccedil" => "\u{00E7}",
    "egrave" => "\u{00E8}",
    "eacute" => "\u{00E9}",
    "ecirc" => "\u{00EA}",
    "euml" => "\u{00EB}",
    "igrave" => "\u{00EC}",
    "iacute" => "\u{00ED}",
    "icirc" => "\u{00EE}",
    "iuml" => "\u{00EF}",
    "eth" => "\u{00F0}",
    "ntilde" => "\u{00F1}",
    "ograve" => "\u{00F2}",
    "oacute" => "\u{00F3}",
    "ocirc" => "\u{00F4}",
    "otilde" => "\u{00F5}",
    "ouml" => "\u{00F6}",
    "divide" => "\u{00F7}",
    "oslash" => "\u{00F8}",
    "ugrave" => "\u{00F9}",
    "uacute" => "\u{00FA}",
    "ucirc" => "\u{00FB}",
    "uuml" => "\u{00FC}",
    "yacute" => "\u{00FD}",
    "thorn" => "\u{00FE}",
    "yuml" => "\u{00FF}",
    // Special
    "OElig" => "\u{0152}",
    "oelig" => "\u{0153}",
    "Scaron" => "\u{0160}",
    "scaron" => "\u{0161}",
    "Yuml" => "\u{0178}",
    "circ" => "\u{02C6}",
    "tilde" => "\u{02DC}",
    "ensp" => "\u{2002}",
    "emsp" => "\u{2003}",
    "thinsp" => "\u{2009}",
    "zwnj" => "\u{200C}",
    "zwj" => "\u{200D}",
    "lrm" => "\u{200E}",
    "rlm" => "\u{200F}",
    "ndash" => "\u{2013}",
    "mdash" => "\u{2014}",
    "lsquo" => "\u{2018}",
    "rsquo" => "\u{2019}",
    "sbquo" => "\u{201A}",
    "ldquo" => "\u{201C}",
    "rdquo" => "\u{201D}",
    "bdquo" => "\u{201E}",
    "dagger" => "\u{2020}",
    "Dagger" => "\u{2021}",
    "permil" => "\u{2030}",
    "lsaquo" => "\u{2039}",
    "rsaquo" => "\u{203A}",
    "euro" => "\u{20AC}",
    // Symbols
    "fnof" => "\u{0192}",
    "Alpha" => "\u{0391}",
    "Beta" => "\u{0392}",
    "Gamma" => "\u{0393}",
    "Delta" => "\u{0394}",
    "Omega" => "\u{03A9}",
    "alpha" => "\u{03B1}",
    "beta" => "\u{03B2}",
    "gamma" => "\u{03B3}",
    "delta" => "\u{03B4}",
    "epsilon" => "\u{03B5}",
    "lambda" => "\u{03BB}",
    "mu" => "\u{03BC}",
    "pi" => "\u{03C0}",
    "sigma" => "\u{03C3}",
    "omega" => "\u{03C9}",
    "bull" => "\u{2022}",
    "hellip" => "\u{2026}",
    "prime" => "\u{2032}",
    "Prime" => "\u{2033}",
    "trade" => "\u{2122}",
    "larr" => "\u{2190}",
    "uarr" => "\u{2191}",
    "rarr" => "\u{2192}",
    "darr" => "\u{2193}",
    "harr" => "\u{2194}",
    "rArr" => "\u{21D2}",
    "hArr" => "\u{21D4}",
    "forall" => "\u{2200}",
    "part" => "\u{2202}",
    "exist" => "\u{2203}",
    "empty" => "\u{2205}",
    "nabla" => "\u{2207}",
    "isin" => "\u{2208}",
    "notin" => "\u{2209}",
    "sum" => "\u{2211}",
    "minus" => "\u{2212}",
    "radic" => "\u{221A}",
    "infin" => "\u{221E}",
    "ne" => "\u{2260}",
    "equiv" => "\u{2261}",
    "le" => "\u{2264}",
    "ge" => "\u{2265}",
    "loz" => "\u{25CA}",
    "spades" => "\u{2660}",
    "clubs" => "\u{2663}",
    "hearts" => "\u{2665}",
    "diams" => "\u{2666}",
};

/// Replacement text of a named entity (case-sensitive, without `&`/`;`).
pub fn resolve(name: &str) -> Option<&'static str> {
    ENTITIES.get(name).copied()
}
