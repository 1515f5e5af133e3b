//! Download file naming.

/// Stem used when the caller supplies none.
pub const DEFAULT_STEM: &str = "speech";

/// File name for a clip at `tempo`, e.g. `speech_1.3x.wav`.
///
/// The tempo is printed to one decimal place so each correction gets its own
/// file next to the `1.0x` original. Path separators in `stem` are replaced.
pub fn artifact_file_name(stem: &str, tempo: f32) -> String {
    let stem = stem.trim();
    let stem: String = if stem.is_empty() {
        DEFAULT_STEM.to_string()
    } else {
        stem.chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect()
    };
    format!("{stem}_{tempo:.1}x.wav")
}
