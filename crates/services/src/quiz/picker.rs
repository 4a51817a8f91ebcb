use rand::Rng;
use rand::seq::IndexedRandom;

use spelling_core::model::WordEntry;

/// Uniformly picks a word from `pool`, avoiding an immediate repeat.
///
/// With more than one candidate the draw is repeated until it differs from
/// `previous`. Returns `None` for an empty pool.
pub fn pick_next<'a, R: Rng>(
    pool: &[&'a WordEntry],
    previous: Option<&str>,
    rng: &mut R,
) -> Option<&'a WordEntry> {
    // Duplicate entries of the previous word would never terminate the redraw.
    let avoidable = previous.is_some_and(|prev| pool.iter().any(|w| w.word != prev));

    loop {
        let candidate = *pool.choose(rng)?;
        if pool.len() == 1 || !avoidable || previous != Some(candidate.word.as_str()) {
            return Some(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn entries(words: &[&str]) -> Vec<WordEntry> {
        words.iter().map(|w| WordEntry::new(*w, "", "")).collect()
    }

    #[test]
    fn empty_pool_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(pick_next(&[], Some("cat"), &mut rng).is_none());
    }

    #[test]
    fn single_entry_may_repeat() {
        let words = entries(&["cat"]);
        let pool: Vec<&WordEntry> = words.iter().collect();
        let mut rng = StdRng::seed_from_u64(7);
        let picked = pick_next(&pool, Some("cat"), &mut rng).unwrap();
        assert_eq!(picked.word, "cat");
    }

    #[test]
    fn never_repeats_previous_with_two_or_more_entries() {
        let words = entries(&["cat", "dog"]);
        let pool: Vec<&WordEntry> = words.iter().collect();
        let mut rng = StdRng::seed_from_u64(42);

        let mut previous = "cat".to_string();
        for _ in 0..500 {
            let picked = pick_next(&pool, Some(&previous), &mut rng).unwrap();
            assert_ne!(picked.word, previous);
            previous = picked.word.clone();
        }
    }

    #[test]
    fn eventually_draws_every_candidate() {
        let words = entries(&["cat", "dog", "owl", "emu"]);
        let pool: Vec<&WordEntry> = words.iter().collect();
        let mut rng = StdRng::seed_from_u64(3);

        let seen: HashSet<String> = (0..400)
            .filter_map(|_| pick_next(&pool, None, &mut rng))
            .map(|w| w.word.clone())
            .collect();
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn duplicates_of_previous_do_not_hang() {
        let words = entries(&["cat", "cat"]);
        let pool: Vec<&WordEntry> = words.iter().collect();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_next(&pool, Some("cat"), &mut rng).unwrap().word, "cat");
    }
}
