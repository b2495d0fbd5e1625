//! Byte-oriented fast paths for text normalization.

/// ASCII fast paths with Unicode fallbacks.
pub mod ascii {

    /// Lowercase ASCII input by processing bytes in fixed-size chunks.
    ///
    /// Callers must only pass ASCII text; non-ASCII input goes through
    /// [`to_lowercase_fallback`].
    pub fn to_lowercase_optimized(input: &str) -> String {
        let bytes = input.as_bytes();
        let mut result = Vec::with_capacity(bytes.len());

        let chunks = bytes.chunks_exact(8);
        let remainder = chunks.remainder();

        for chunk in chunks {
            let mut processed = [0u8; 8];
            for (i, &byte) in chunk.iter().enumerate() {
                processed[i] = byte.to_ascii_lowercase();
            }
            result.extend_from_slice(&processed);
        }

        result.extend(remainder.iter().map(u8::to_ascii_lowercase));

        // ASCII in, ASCII out.
        String::from_utf8(result).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into())
    }

    /// Unicode-aware lowercasing.
    pub fn to_lowercase_fallback(input: &str) -> String {
        input.to_lowercase()
    }

    /// Lowercase `input`, picking the chunked ASCII path when it applies.
    pub fn to_lowercase(input: &str) -> String {
        if input.is_ascii() && input.len() >= 16 {
            to_lowercase_optimized(input)
        } else {
            to_lowercase_fallback(input)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ascii;

    #[test]
    fn test_ascii_lowercase_paths_agree() {
        let long = "The Quick Brown Fox Jumps Over The Lazy Dog";
        assert_eq!(ascii::to_lowercase(long), long.to_lowercase());
        assert_eq!(ascii::to_lowercase_optimized(long), long.to_lowercase());
        assert_eq!(ascii::to_lowercase("ABC"), "abc");
    }

    #[test]
    fn test_unicode_lowercase() {
        assert_eq!(ascii::to_lowercase("ÉCOLE Ÿ"), "école ÿ");
    }
}
