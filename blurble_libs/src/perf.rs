//! Typing performance math, shared verbatim between the live-feedback UI
//! and the server's range validation. A "word" is five characters, the
//! typing-test convention, not a whitespace split.

const CHARS_PER_WORD: f64 = 5.0;
const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// Words per minute for `char_count` characters typed over `elapsed_millis`.
///
/// Returns `None` when no time has elapsed: the UI re-evaluates this on
/// every keystroke, and the very first keystroke lands at zero elapsed time.
pub fn words_per_minute(char_count: usize, elapsed_millis: u64) -> Option<u32> {
    if elapsed_millis == 0 {
        return None;
    }
    let words = char_count as f64 / CHARS_PER_WORD;
    let minutes = elapsed_millis as f64 / MILLIS_PER_MINUTE;
    Some((words / minutes).round() as u32)
}

/// Index-aligned accuracy of `input` against `target`, rounded to a whole
/// percentage. Characters typed past the end of the target count as wrong.
/// Empty input is trivially 100.
pub fn accuracy(input: &str, target: &str) -> u32 {
    let typed = input.chars().count();
    if typed == 0 {
        return 100;
    }
    let correct = input
        .chars()
        .zip(target.chars())
        .filter(|(typed, expected)| typed == expected)
        .count();
    (100.0 * correct as f64 / typed as f64).round() as u32
}

/// A run is complete exactly when the input equals the target, byte for
/// byte. Whitespace and case both matter.
pub fn is_complete(input: &str, target: &str) -> bool {
    input == target
}

/// Seconds a run must have taken, derived from the quote length and the
/// reported WPM by inverting the WPM formula. `None` for zero WPM.
pub fn elapsed_seconds(quote_chars: usize, wpm: f64) -> Option<f64> {
    if wpm <= 0.0 {
        return None;
    }
    let words = quote_chars as f64 / CHARS_PER_WORD;
    Some(words / wpm * 60.0)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_wpm_formula() {
        // 300 chars = 60 words in one minute
        assert_eq!(words_per_minute(300, 60_000), Some(60));
        // 25 chars = 5 words in 6 seconds => 50 wpm
        assert_eq!(words_per_minute(25, 6_000), Some(50));
        // result is rounded, not truncated: 17 chars in 5s => 40.8
        assert_eq!(words_per_minute(17, 5_000), Some(41));
    }

    #[test]
    fn test_wpm_zero_chars() {
        assert_eq!(words_per_minute(0, 1_000), Some(0));
    }

    #[test]
    fn test_wpm_unavailable_at_zero_elapsed() {
        assert_eq!(words_per_minute(100, 0), None);
    }

    #[test]
    fn test_accuracy_empty_input_is_perfect() {
        assert_eq!(accuracy("", "the quick brown fox"), 100);
    }

    #[test]
    fn test_accuracy_matching_prefix_is_perfect() {
        assert_eq!(accuracy("the qui", "the quick brown fox"), 100);
    }

    #[test]
    fn test_accuracy_drops_with_a_mismatch() {
        // one wrong character out of eight
        assert_eq!(accuracy("the quixk", "the quick brown fox"), 89);
        assert!(accuracy("the quixk", "the quick brown fox") < 100);
    }

    #[test]
    fn test_accuracy_counts_overrun_as_wrong() {
        // two correct characters, two past the end of the target
        assert_eq!(accuracy("okay", "ok"), 50);
    }

    #[test]
    fn test_completion_requires_exact_equality() {
        assert!(is_complete("hello world", "hello world"));
        assert!(!is_complete("hello world ", "hello world"));
        assert!(!is_complete("Hello world", "hello world"));
        assert!(!is_complete("hello worl", "hello world"));
    }

    #[test]
    fn test_elapsed_seconds_inverts_wpm() {
        // 200 chars at 80 wpm: 40 words / 80 wpm * 60 = 30s
        assert_eq!(elapsed_seconds(200, 80.0), Some(30.0));
        assert_eq!(elapsed_seconds(200, 0.0), None);
    }

    #[test]
    fn test_round_trip_through_wpm() {
        let wpm = words_per_minute(200, 30_000).unwrap();
        let seconds = elapsed_seconds(200, wpm as f64).unwrap();
        assert!((seconds - 30.0).abs() < 1e-9);
    }
}
