use super::Charset;

/// Map frequent OCR confusions to the letter they usually stand for.
fn confusion(c: char) -> Option<char> {
    match c {
        '0' => Some('O'),
        '1' | '|' => Some('I'),
        '5' | '$' => Some('S'),
        '2' => Some('Z'),
        '8' => Some('B'),
        '€' => Some('E'),
        _ => None,
    }
}

/// Upper-case `raw`, fix common confusions and drop characters outside
/// `charset`.
pub fn normalize_text(raw: &str, charset: Charset) -> String {
    raw.chars()
        .flat_map(char::to_uppercase)
        .map(|c| confusion(c).unwrap_or(c))
        .filter(|&c| charset.allows(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixes_confusions_and_strips() {
        assert_eq!(normalize_text("az3rty", Charset::Letters), "AZRTY");
        assert_eq!(normalize_text("[q]w€r7y|", Charset::Letters), "QWERYI");
        assert_eq!(normalize_text(" c0mm4nd\n", Charset::Letters), "COMMND");
        assert_eq!(normalize_text("$1 8", Charset::Letters), "SIB");
    }

    #[test]
    fn alphanumeric_keeps_other_digits() {
        assert_eq!(normalize_text("f4 f1", Charset::Alphanumeric), "F4FI");
    }
}
