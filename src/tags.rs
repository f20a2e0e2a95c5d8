/// Tag normalization
///
/// Player, clan and tournament tags are written by users in many shapes
/// (`#2cccp`, `2CCCP`, `#2CCCo`). They are canonicalized before being used as
/// cache keys or URL path segments:
/// 1. uppercase
/// 2. strip every `#`
/// 3. replace the letter `O` with the digit `0`
/// 4. reject anything outside the 14-character tag alphabet
///
/// Normalization is idempotent: a normalized tag normalizes to itself.
use crate::errors::TagError;

/// Characters allowed in a normalized tag
pub const TAG_CHARACTERS: [char; 14] = [
    '0', '2', '8', '9', 'P', 'Y', 'L', 'Q', 'G', 'R', 'J', 'C', 'U', 'V',
];

pub fn normalize_tag(raw: &str) -> Result<String, TagError> {
    if raw.is_empty() {
        return Err(TagError::Empty);
    }

    let tag: String = raw
        .to_uppercase()
        .chars()
        .filter(|c| *c != '#')
        .map(|c| if c == 'O' { '0' } else { c })
        .collect();

    if tag.is_empty() {
        return Err(TagError::Empty);
    }

    if let Some((position, character)) = tag
        .chars()
        .enumerate()
        .find(|(_, c)| !TAG_CHARACTERS.contains(c))
    {
        return Err(TagError::InvalidCharacter {
            tag: raw.to_string(),
            character,
            position,
        });
    }

    Ok(tag)
}

pub fn is_valid_tag(raw: &str) -> bool {
    normalize_tag(raw).is_ok()
}

/// Location segment for leaderboard endpoints (`US`, `EU`, `57000249`)
///
/// Locations are passed through verbatim apart from trimming, but must be a
/// single non-empty alphanumeric path segment.
pub fn normalize_location(raw: &str) -> Result<String, TagError> {
    let location = raw.trim();
    if location.is_empty() {
        return Err(TagError::Empty);
    }

    if let Some((position, character)) = location
        .chars()
        .enumerate()
        .find(|(_, c)| !c.is_ascii_alphanumeric() && *c != '_')
    {
        return Err(TagError::InvalidCharacter {
            tag: raw.to_string(),
            character,
            position,
        });
    }

    Ok(location.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_hash_and_uppercases() {
        assert_eq!(normalize_tag("#2cccp").unwrap(), "2CCCP");
        assert_eq!(normalize_tag("2CCCP").unwrap(), "2CCCP");
        assert_eq!(normalize_tag("##2CC#CP").unwrap(), "2CCCP");
    }

    #[test]
    fn test_normalize_replaces_letter_o() {
        assert_eq!(normalize_tag("#pyo2o").unwrap(), "PY020");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["#2cccp", "9ulgry", "#o2oPLqG", "JCUV"] {
            let once = normalize_tag(raw).unwrap();
            let twice = normalize_tag(&once).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_rejects_empty_input() {
        assert_eq!(normalize_tag(""), Err(TagError::Empty));
        assert_eq!(normalize_tag("#"), Err(TagError::Empty));
    }

    #[test]
    fn test_rejects_characters_outside_alphabet() {
        match normalize_tag("invalid#tag!") {
            Err(TagError::InvalidCharacter {
                character,
                position,
                ..
            }) => {
                assert_eq!(character, 'I');
                assert_eq!(position, 0);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!is_valid_tag("2CCCP!"));
        assert!(is_valid_tag("2cccp"));
    }

    #[test]
    fn test_location_segment() {
        assert_eq!(normalize_location(" US ").unwrap(), "US");
        assert_eq!(normalize_location("57000249").unwrap(), "57000249");
        assert!(normalize_location("").is_err());
        assert!(normalize_location("us/../x").is_err());
    }
}
