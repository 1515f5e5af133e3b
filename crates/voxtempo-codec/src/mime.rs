//! Sample-rate extraction from raw PCM MIME descriptors such as
//! `audio/L16; rate=24000`.

/// Sample rate assumed when the descriptor carries no usable `rate=`.
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;

/// Parse the `rate=` parameter out of a MIME descriptor.
///
/// Parameter names are matched case-insensitively. A missing, unparsable or
/// zero rate falls back to [`DEFAULT_SAMPLE_RATE`]; the result is always a
/// positive integer.
pub fn parse_sample_rate(mime: &str) -> u32 {
    let parsed = mime
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("rate"))
        .and_then(|(_, value)| value.trim().trim_matches('"').parse::<u32>().ok())
        .filter(|rate| *rate > 0);

    match parsed {
        Some(rate) => rate,
        None => {
            tracing::debug!(
                mime,
                default = DEFAULT_SAMPLE_RATE,
                "no usable rate in MIME descriptor"
            );
            DEFAULT_SAMPLE_RATE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_sample_rate("audio/L16; rate=24000"), 24000);
        assert_eq!(parse_sample_rate("audio/L16;rate=16000"), 16000);
        assert_eq!(parse_sample_rate("audio/L16; codec=pcm; RATE=44100"), 44100);
        assert_eq!(parse_sample_rate("audio/L16; rate=\"48000\""), 48000);
    }

    #[test]
    fn test_parse_rate_defaults() {
        assert_eq!(parse_sample_rate("audio/L16"), DEFAULT_SAMPLE_RATE);
        assert_eq!(parse_sample_rate(""), DEFAULT_SAMPLE_RATE);
        assert_eq!(parse_sample_rate("audio/L16; rate="), DEFAULT_SAMPLE_RATE);
        assert_eq!(parse_sample_rate("audio/L16; rate=fast"), DEFAULT_SAMPLE_RATE);
        assert_eq!(parse_sample_rate("audio/L16; rate=-8000"), DEFAULT_SAMPLE_RATE);
        assert_eq!(parse_sample_rate("audio/L16; rate=0"), DEFAULT_SAMPLE_RATE);
    }

    #[test]
    fn test_rate_in_media_type_is_ignored() {
        // Only parameters count, not the media type itself.
        assert_eq!(parse_sample_rate("rate=8000"), DEFAULT_SAMPLE_RATE);
    }
}
