// ── Dispatch ───────────────────────────────────────────────────────────────
// Routes one utterance to one intent. The trigger table in `rules` is a
// priority-ordered decision list: the first rule whose matcher hits wins,
// so precedence lives in the table order, not in control flow.

mod rules;

pub use rules::TRIGGERS;

/// What a matched utterance asks the engine to do. Arguments are extracted
/// by the matching rule; empty strings mean the trigger fired without a
/// usable argument and the handler should prompt instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    RegisterFace { name: String },
    RecognizeFace,
    Weather { city: String },
    Forecast { city: String },
    Headlines { category: Option<&'static str> },
    WebSearch { query: String },
    SetName { name: String },
    AskName,
    History,
    TakeNote { content: String },
    ListNotes,
    Stats,
    DateTime,
    TellJoke,
    SetMood { mood: String },
}

/// One row of the trigger table. `matches` runs against the lowercased
/// utterance; `extract` gets both casings so rules that store user text
/// (names, notes) can keep the original capitalization.
pub struct TriggerRule {
    pub id: &'static str,
    pub matches: fn(&str) -> bool,
    pub extract: fn(&str, &str) -> Intent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub rule_id: &'static str,
    pub intent: Intent,
}

/// Scan the trigger table in order and return the first match, if any.
pub fn classify(utterance: &str) -> Option<RouteMatch> {
    let lower = utterance.to_lowercase();
    TRIGGERS
        .iter()
        .find(|rule| (rule.matches)(&lower))
        .map(|rule| RouteMatch {
            rule_id: rule.id,
            intent: (rule.extract)(&lower, utterance),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_recognition_beats_search() {
        // "ben kimim" carries the generic search word "ara" when combined;
        // the face rule sits above search, so it must win.
        let m = classify("ben kimim, internette ara").unwrap();
        assert_eq!(m.rule_id, "face_recognize");
        assert_eq!(m.intent, Intent::RecognizeFace);
    }

    #[test]
    fn forecast_beats_plain_weather() {
        let m = classify("yarın hava istanbul").unwrap();
        assert_eq!(m.intent, Intent::Forecast { city: "istanbul".into() });

        let m = classify("ankara hava nasıl").unwrap();
        assert_eq!(m.intent, Intent::Weather { city: "ankara".into() });
    }

    #[test]
    fn weather_without_city_extracts_empty() {
        let m = classify("hava durumu nasıl").unwrap();
        assert_eq!(m.intent, Intent::Weather { city: String::new() });
    }

    #[test]
    fn headline_categories_map_to_api_slugs() {
        for (utterance, category) in [
            ("teknoloji haberleri", Some("technology")),
            ("spor haberleri var mı", Some("sports")),
            ("ekonomi manşetleri", Some("business")),
            ("bugünkü haberler", None),
        ] {
            let m = classify(utterance).unwrap();
            assert_eq!(m.intent, Intent::Headlines { category }, "{utterance}");
        }
    }

    #[test]
    fn set_name_keeps_original_casing() {
        let m = classify("Benim adım Ali").unwrap();
        assert_eq!(m.intent, Intent::SetName { name: "Ali".into() });
    }

    #[test]
    fn face_register_extracts_name() {
        let m = classify("yüz kaydet Ayşe").unwrap();
        assert_eq!(m.intent, Intent::RegisterFace { name: "Ayşe".into() });
    }

    #[test]
    fn search_with_no_query_extracts_empty() {
        let m = classify("internette ara").unwrap();
        assert_eq!(m.intent, Intent::WebSearch { query: String::new() });
    }

    #[test]
    fn note_content_keeps_original_casing() {
        let m = classify("not al Yarın Ahmet'i ara demek istedim").unwrap();
        // "not al" outranks the search trigger even though "ara" appears.
        assert_eq!(m.rule_id, "take_note");
        assert_eq!(
            m.intent,
            Intent::TakeNote {
                content: "Yarın Ahmet'i ara demek istedim".into()
            }
        );
    }

    #[test]
    fn mood_change_extracts_known_mood() {
        let m = classify("ruh halini playful yap").unwrap();
        assert_eq!(m.intent, Intent::SetMood { mood: "playful".into() });

        let m = classify("ruh halini değiştir").unwrap();
        assert_eq!(m.intent, Intent::SetMood { mood: String::new() });
    }

    #[test]
    fn small_talk_falls_through() {
        assert!(classify("bugün kendimi yorgun hissediyorum").is_none());
        assert!(classify("").is_none());
    }

    #[test]
    fn joke_and_stats_and_datetime_route() {
        assert_eq!(classify("şaka yap").unwrap().intent, Intent::TellJoke);
        assert_eq!(classify("kaç konuşma yaptık").unwrap().intent, Intent::Stats);
        assert_eq!(classify("saat kaç").unwrap().intent, Intent::DateTime);
        assert_eq!(classify("notlarım neler").unwrap().intent, Intent::ListNotes);
        assert_eq!(classify("dün ne konuştuk").unwrap().intent, Intent::History);
        assert_eq!(classify("adım ne").unwrap().intent, Intent::AskName);
    }
}
