#![warn(missing_docs)]
//! Check of the learner's written justification.
//!
//! The check is a plain keyword search on the lower-cased text. Lengths are counted in UTF-16 code
//! units, the unit a browser text field reports.

/// Minimum length (UTF-16 code units) of an explanation.
pub const MIN_EXPLANATION_LENGTH: usize = 80;

/// Phrases expected in the explanation of a virtual image.
pub const VIRTUAL_IMAGE_PHRASES: [&str; 4] = [
    "diverge",
    "appear to meet",
    "backward extension",
    "cannot be projected",
];
/// Phrases expected in the explanation of a real image.
pub const REAL_IMAGE_PHRASES: [&str; 3] = ["principal axis", "focal point", "real image"];

/// Returns `true` if the explanation is long enough and uses the required terminology.
///
/// For virtual images at least two of [`VIRTUAL_IMAGE_PHRASES`] must be present, otherwise at least one
/// of [`REAL_IMAGE_PHRASES`].
#[must_use]
pub fn is_adequate(explanation: &str, virtual_image: bool) -> bool {
    let text = explanation.to_lowercase();
    if text.encode_utf16().count() < MIN_EXPLANATION_LENGTH {
        return false;
    }
    if virtual_image {
        VIRTUAL_IMAGE_PHRASES
            .iter()
            .filter(|p| text.contains(*p))
            .count()
            >= 2
    } else {
        REAL_IMAGE_PHRASES.iter().any(|p| text.contains(p))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn too_short() {
        assert!(!is_adequate("The real image forms at the focal point.", false));
    }
    #[test]
    fn real_image() {
        let text = "The parallel ray refracts through the Focal Point and meets the central ray below the axis beyond 2F.";
        assert!(text.len() >= MIN_EXPLANATION_LENGTH);
        assert!(is_adequate(text, false));
        // the same text lacks the virtual image vocabulary
        assert!(!is_adequate(text, true));
    }
    #[test]
    fn real_image_without_terms() {
        let text = "The two rays that I drew cross each other somewhere on the right side of the lens, I think.";
        assert!(!is_adequate(text, false));
    }
    #[test]
    fn virtual_image() {
        let text = "After the lens the rays diverge. Their backward extension shows where they appear to meet on the object side.";
        assert!(is_adequate(text, true));
    }
    #[test]
    fn length_in_utf16_units() {
        // 78 ASCII characters followed by one emoji outside the basic multilingual plane
        let text = format!("{}\u{1F52D}", "x".repeat(66) + " focal point");
        assert_eq!(text.chars().count(), 79);
        assert_eq!(text.encode_utf16().count(), 80);
        assert!(is_adequate(&text, false));
        let short = format!("{}\u{1F52D}", "x".repeat(65) + " focal point");
        assert!(!is_adequate(&short, false));
    }
    #[test]
    fn virtual_image_one_phrase_only() {
        let text = "After the lens the rays diverge, so there is nothing on a screen to see on the right side of the lens.";
        assert!(!is_adequate(text, true));
    }
}
