extern crate reasoner;
use reasoner::*;
use shared::rule::Sentence;
use shared::statement::Statement;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    const PREDICATES: [&str; 4] = ["p", "q", "r", "s"];
    const CONSTANTS: [&str; 2] = ["a", "b"];

    /// Ground facts over a small vocabulary plus rules whose predicate graph
    /// is acyclic, so every surviving entity is well-founded.
    fn sentence_pool() -> Vec<Sentence> {
        let mut pool = Vec::new();
        for predicate in PREDICATES {
            for constant in CONSTANTS {
                pool.push(Sentence::fact(Statement::from_tokens(predicate, &[constant])));
            }
        }
        let st = |p: &str| Statement::from_tokens(p, &["?x"]);
        pool.push(Sentence::rule(vec![st("p")], st("q")));
        pool.push(Sentence::rule(vec![st("q")], st("r")));
        pool.push(Sentence::rule(vec![st("p"), st("r")], st("s")));
        pool
    }

    #[derive(Debug, Clone)]
    enum Op {
        Assert(usize),
        Retract(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let n = sentence_pool().len();
        prop_oneof![(0..n).prop_map(Op::Assert), (0..n).prop_map(Op::Retract)]
    }

    fn contents(kb: &KnowledgeBase) -> BTreeSet<(String, bool)> {
        let facts = kb.facts().map(|(_, f)| (f.statement().to_string(), f.is_asserted()));
        let rules = kb.rules().map(|(_, r)| (r.implication().to_string(), r.is_asserted()));
        facts.chain(rules).collect()
    }

    fn rebuild(asserted: &[Sentence]) -> KnowledgeBase {
        let mut kb = KnowledgeBase::new();
        for sentence in asserted {
            kb.kb_assert(sentence.clone()).unwrap();
        }
        kb
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn test_incremental_matches_rebuild(ops in prop::collection::vec(op_strategy(), 1..40)) {
            let pool = sentence_pool();
            let mut kb = KnowledgeBase::new();
            let mut asserted: Vec<Sentence> = Vec::new();

            for op in ops {
                match op {
                    Op::Assert(i) => {
                        kb.kb_assert(pool[i].clone()).unwrap();
                        if !asserted.contains(&pool[i]) {
                            asserted.push(pool[i].clone());
                        }
                    }
                    Op::Retract(i) => {
                        let before = kb.find(&pool[i]);
                        match kb.kb_retract(&pool[i]) {
                            Ok(_) => asserted.retain(|s| s != &pool[i]),
                            Err(KbError::NotFound(_)) => prop_assert!(before.is_none()),
                            Err(e) => prop_assert!(false, "unexpected error {}", e),
                        }
                    }
                }

                prop_assert!(kb.validate().is_ok(), "{:?}", kb.validate());
                prop_assert_eq!(contents(&kb), contents(&rebuild(&asserted)));
            }
        }

        #[test]
        fn test_assertion_is_idempotent(picks in prop::collection::vec(0..11usize, 1..20)) {
            let pool = sentence_pool();
            let mut kb = KnowledgeBase::new();
            for &i in &picks {
                kb.kb_assert(pool[i].clone()).unwrap();
            }
            let before = kb.snapshot();
            for &i in &picks {
                kb.kb_assert(pool[i].clone()).unwrap();
            }
            prop_assert_eq!(kb.snapshot(), before);
        }

        #[test]
        fn test_ask_returns_one_answer_per_matching_fact(
            picks in prop::collection::vec(0..8usize, 0..8)
        ) {
            let pool = sentence_pool();
            let mut kb = KnowledgeBase::new();
            for &i in &picks {
                kb.kb_assert(pool[i].clone()).unwrap();
            }
            let query = Sentence::fact(Statement::from_tokens("s", &["?x"]));
            let expected: BTreeSet<String> = picks
                .iter()
                .map(|&i| pool[i].to_string())
                .filter(|s| s.starts_with("fact: (s "))
                .collect();

            match kb.kb_ask(&query) {
                Some(answers) => prop_assert_eq!(answers.len(), expected.len()),
                None => prop_assert!(expected.is_empty()),
            }
        }
    }
}
