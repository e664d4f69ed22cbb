use crate::catalog::WordCatalog;
use crate::session::state::TypeFilter;
use rand::Rng;

/// Builds a freshly shuffled deck: every catalog index whose word matches
/// `filter`, each exactly once. An empty match is an empty deck.
pub fn build<R: Rng + ?Sized>(catalog: &WordCatalog, filter: TypeFilter, rng: &mut R) -> Vec<usize> {
    let mut deck: Vec<usize> = catalog
        .iter()
        .enumerate()
        .filter(|(_, word)| filter.matches(word.kind))
        .map(|(index, _)| index)
        .collect();
    shuffle(&mut deck, rng);
    deck
}

/// In-place Fisher-Yates: walk down from the last slot, swapping each with a
/// uniformly chosen slot at or below it.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::word::{Word, WordType};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn catalog_of(kinds: &[WordType]) -> WordCatalog {
        WordCatalog::new(
            kinds
                .iter()
                .enumerate()
                .map(|(i, &kind)| Word { kind, en: format!("word {}", i), ..Default::default() })
                .collect(),
        )
    }

    #[test]
    fn filter_selects_matching_indices() {
        let catalog = catalog_of(&[WordType::Noun, WordType::Verb, WordType::Noun, WordType::Adj]);
        let mut rng = SmallRng::seed_from_u64(1);

        let mut nouns = build(&catalog, TypeFilter::Noun, &mut rng);
        nouns.sort_unstable();
        assert_eq!(nouns, vec![0, 2]);

        let mut all = build(&catalog, TypeFilter::All, &mut rng);
        all.sort_unstable();
        assert_eq!(all, vec![0, 1, 2, 3]);

        assert!(build(&catalog, TypeFilter::Phrase, &mut rng).is_empty());
    }

    #[test]
    fn same_seed_same_order() {
        let catalog = catalog_of(&[WordType::Noun; 20]);
        let a = build(&catalog, TypeFilter::All, &mut SmallRng::seed_from_u64(42));
        let b = build(&catalog, TypeFilter::All, &mut SmallRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_of_short_slices_is_trivial() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut empty: [u8; 0] = [];
        shuffle(&mut empty, &mut rng);
        let mut one = [7];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, [7]);
    }

    #[test]
    fn every_permutation_of_three_shows_up_evenly() {
        let mut rng = SmallRng::seed_from_u64(0xC0FFEE);
        let mut counts: HashMap<[u8; 3], u32> = HashMap::new();
        let trials = 60_000;
        for _ in 0..trials {
            let mut items = [0u8, 1, 2];
            shuffle(&mut items, &mut rng);
            *counts.entry(items).or_insert(0) += 1;
        }
        assert_eq!(counts.len(), 6);
        let expected = trials / 6;
        for (perm, count) in counts {
            // Loose bound; a biased shuffle is off by far more.
            assert!(
                count.abs_diff(expected) < expected / 10,
                "permutation {:?} appeared {} times",
                perm,
                count
            );
        }
    }
}
