extern crate reasoner;
use reasoner::*;
use shared::rule::{Implication, Sentence};
use shared::statement::Statement;
use shared::terms::Term;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::path::Path;

    fn st(pred: &str, tokens: &[&str]) -> Statement {
        Statement::from_tokens(pred, tokens)
    }

    fn fact(pred: &str, tokens: &[&str]) -> Sentence {
        Sentence::fact(st(pred, tokens))
    }

    fn setup_kb() -> KnowledgeBase {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/statements_kb.txt");
        let mut kb = KnowledgeBase::new();
        assert_eq!(kb.load_file(&path).unwrap(), 8);
        kb.validate().unwrap();
        kb
    }

    fn fact_set(kb: &KnowledgeBase) -> BTreeSet<String> {
        kb.facts().map(|(_, f)| f.statement().to_string()).collect()
    }

    #[test]
    fn test_saturation() {
        let kb = setup_kb();
        assert_eq!(kb.fact_count(), 8);
        assert_eq!(kb.rule_count(), 6);
        for derived in [
            st("isliterally", &["profHammond", "TonyStark"]),
            st("resembles", &["profHammond", "TonyStark"]),
            st("smart", &["profHammond"]),
            st("employable", &["profHammond"]),
            st("Avenger", &["profHammond"]),
        ] {
            let id = kb.find_fact(&derived).unwrap();
            assert!(!kb.fact(id).unwrap().is_asserted(), "{derived}");
        }
        let curried =
            Implication::new(vec![st("smart", &["profHammond"])], st("Avenger", &["profHammond"]));
        assert!(kb.find_rule(&curried).is_some());
    }

    #[test]
    fn test_ask_derived_fact() {
        let kb = setup_kb();
        let answers = kb.kb_ask(&fact("Avenger", &["?X"])).unwrap();
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].to_string(), "?X : profHammond");
        assert_eq!(answers[0].bound_to("X"), Some(&Term::constant("profHammond")));
    }

    #[test]
    fn test_ask_two_variables() {
        let kb = setup_kb();
        let answers = kb.kb_ask(&fact("resembles", &["?X", "?Y"])).unwrap();
        assert_eq!(answers[0].to_string(), "?X : profHammond, ?Y : TonyStark");
        assert!(kb.kb_ask(&fact("resembles", &["?X", "?X"])).is_none());
    }

    #[test]
    fn test_assertion_is_idempotent() {
        let mut kb = setup_kb();
        let before = kb.snapshot();
        let handle = kb.kb_assert(fact("techgenius", &["profHammond"])).unwrap();
        assert_eq!(kb.kb_assert(fact("techgenius", &["profHammond"])).unwrap(), handle);
        assert_eq!(kb.snapshot(), before);
        kb.validate().unwrap();
    }

    #[test]
    fn test_asserting_derived_fact_marks_it_asserted() {
        let mut kb = setup_kb();
        let handle = kb.kb_assert(fact("smart", &["profHammond"])).unwrap();
        let Handle::Fact(id) = handle else {
            panic!("expected a fact handle");
        };
        let smart = kb.fact(id).unwrap();
        assert!(smart.is_asserted());
        assert_eq!(smart.support().supported_by().len(), 1);
        assert_eq!(kb.fact_count(), 8);
    }

    #[test]
    fn test_order_independence() {
        let text = std::fs::read_to_string(
            Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/statements_kb.txt"),
        )
        .unwrap();
        let mut sentences = reasoner::parser::parse_kb(&text).unwrap();
        sentences.reverse();

        let mut reversed = KnowledgeBase::new();
        for sentence in sentences {
            reversed.kb_assert(sentence).unwrap();
        }
        reversed.validate().unwrap();

        let kb = setup_kb();
        assert_eq!(fact_set(&reversed), fact_set(&kb));
        assert_eq!(reversed.rule_count(), kb.rule_count());
    }

    #[test]
    fn test_multi_antecedent_joins() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/blocks_kb.txt");
        let mut kb = KnowledgeBase::new();
        kb.load_file(&path).unwrap();
        kb.validate().unwrap();

        let blocks = kb.kb_ask(&fact("inst", &["?x", "block"])).unwrap();
        let names: BTreeSet<String> = blocks.iter().map(|b| b.to_string()).collect();
        assert_eq!(
            names,
            BTreeSet::from(["?x : cube1".to_string(), "?x : pyramid1".to_string()])
        );

        let supporting = kb.kb_ask(&fact("supporting", &["?x"])).unwrap();
        assert_eq!(supporting.len(), 1);
        assert_eq!(supporting[0].to_string(), "?x : cube1");
    }

    #[test]
    fn test_malformed_sentences_are_rejected() {
        let mut kb = KnowledgeBase::new();
        let err = kb.kb_assert(Sentence::fact(Statement::new("", vec![]))).unwrap_err();
        assert!(matches!(err, KbError::MalformedSentence(_)));
        let err = kb.kb_assert(Sentence::rule(vec![], st("q", &["a"]))).unwrap_err();
        assert!(matches!(err, KbError::MalformedSentence(_)));
        assert_eq!(kb.fact_count() + kb.rule_count(), 0);
    }

    #[test]
    fn test_malformed_query() {
        let kb = setup_kb();
        assert!(kb.kb_ask(&fact("?p", &["profHammond"])).is_none());
        let rule = Sentence::rule(vec![st("smart", &["?x"])], st("employable", &["?x"]));
        assert!(matches!(kb.try_ask(&rule), Err(KbError::MalformedQuery(_))));
    }

    #[test]
    fn test_display_and_snapshot() {
        let kb = setup_kb();
        let text = kb.to_string();
        assert!(text.starts_with("Knowledge Base:\n"));
        assert!(text.contains("fact: (Avenger profHammond)"));
        assert!(text.contains("rule: ((employable ?x) (smart ?x)) -> (Avenger ?x)"));

        let snapshot = kb.snapshot();
        let avenger = snapshot
            .facts
            .iter()
            .find(|f| f.sentence == "(Avenger profHammond)")
            .unwrap();
        assert!(!avenger.asserted);
        assert_eq!(avenger.supported_by[0].fact, "(smart profHammond)");
        assert_eq!(avenger.supported_by[0].rule, "((smart profHammond)) -> (Avenger profHammond)");

        let json: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(json["facts"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn test_config_log_target() {
        let config =
            ReasonerConfig::from_json_str(r#"{ "log_target": "kb-test", "trace_inference": true }"#)
                .unwrap();
        let mut kb = KnowledgeBase::with_config(config);
        kb.load_str("fact: (p a)\nrule: ((p ?x)) -> (q ?x)\n").unwrap();
        assert_eq!(kb.config().log_target, "kb-test");
        assert!(kb.kb_ask(&fact("q", &["a"])).is_some());
    }
}
