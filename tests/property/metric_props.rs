//! Edit distance and n-gram profiles against reference implementations.

use ngram_suggest::metric::{
    jaccard_distance, levenshtein, levenshtein_within, ngram_distance, Overlap,
};
use ngram_suggest::MetricKind;
use proptest::prelude::*;

fn text() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-eéж ]{0,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn levenshtein_matches_strsim(a in text(), b in text()) {
        prop_assert_eq!(levenshtein(&a, &b), strsim::levenshtein(&a, &b));
    }

    #[test]
    fn bounded_levenshtein_agrees(a in text(), b in text(), max in 0usize..8) {
        let distance = strsim::levenshtein(&a, &b);
        prop_assert_eq!(levenshtein_within(&a, &b, max), distance <= max);
    }

    #[test]
    fn profile_distances_are_symmetric(a in text(), b in text(), k in 2usize..5) {
        prop_assert_eq!(ngram_distance(&a, &b, k), ngram_distance(&b, &a, k));
        prop_assert_eq!(ngram_distance(&a, &a, k), 0);

        let j = jaccard_distance(&a, &b, k);
        prop_assert!((0.0..=1.0).contains(&j));
        prop_assert_eq!(j, jaccard_distance(&b, &a, k));
        prop_assert_eq!(jaccard_distance(&a, &a, k), 0.0);
    }

    /// Any consistent overlap scores inside the unit interval.
    #[test]
    fn scores_stay_in_unit_interval(
        a in text(),
        b in text(),
        query_terms in 1usize..20,
        candidate_terms in 1usize..20,
        shared_seed in 0usize..20,
    ) {
        let shared = shared_seed % (query_terms.min(candidate_terms) + 1);
        let overlap = Overlap {
            shared,
            query_terms,
            candidate_terms,
            query: &a,
            candidate: &b,
            ngram_size: 3,
        };
        for kind in MetricKind::ALL {
            let score = kind.metric().score(&overlap);
            prop_assert!((0.0..=1.0).contains(&score), "{} scored {}", kind, score);
        }
    }
}
