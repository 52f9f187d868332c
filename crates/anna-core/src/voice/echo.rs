// Echo suppression for the open microphone. The speaker and microphone
// share a room, so right after the assistant talks, the recognizer tends
// to transcribe the assistant's own voice. Three filters, all pure:
// very short utterances, known self-referential phrases, and an exact
// match against the last spoken text.

/// Phrases the assistant says constantly. Only entries of at most two
/// words are used for filtering so longer user sentences survive.
pub const SELF_PHRASES: &[&str] = &[
    "merhaba",
    "dinliyorum",
    "anlıyorum",
    "yardımcı olabilirim",
    "buyur",
    "efendim",
    "anladım",
    "tamam",
    "size nasıl yardımcı olabilirim",
    "memnuniyet duyarım",
];

/// Whether a transcription is probably the assistant hearing itself.
pub fn is_self_echo(heard: &str, last_spoken: Option<&str>) -> bool {
    let words = heard.split_whitespace().count();
    if words <= 2 {
        return true;
    }

    let lower = heard.to_lowercase();
    for phrase in SELF_PHRASES {
        if phrase.split_whitespace().count() <= 2 && lower.contains(phrase) {
            return true;
        }
    }

    if let Some(last) = last_spoken {
        if lower == last.to_lowercase() {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_utterances_are_echo() {
        assert!(is_self_echo("tamam", None));
        assert!(is_self_echo("evet efendim", None));
        assert!(!is_self_echo("yarın sabah dokuzda toplantım var", None));
    }

    #[test]
    fn short_self_phrases_are_echo_inside_longer_text() {
        assert!(is_self_echo("merhaba size bugün nasıl yardım edebilirim", None));
        // A long self phrase (>2 words) does not filter a long sentence.
        assert!(!is_self_echo(
            "lütfen bana nasıl yardımcı olunacağını uzun uzun anlatma",
            None
        ));
    }

    #[test]
    fn repeating_the_last_spoken_text_is_echo() {
        let last = Some("Bugün istanbul'da yağmur bekleniyor dikkatli olun");
        assert!(is_self_echo("bugün istanbul'da yağmur bekleniyor dikkatli olun", last));
        assert!(!is_self_echo("bana yarın için şemsiye almayı hatırlat lütfen", last));
    }
}
