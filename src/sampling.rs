use rand::{
    SeedableRng,
    rngs::StdRng,
    seq::{IndexedRandom, SliceRandom},
};

/// Seeded generator for reproducible sessions, or one seeded from the OS when `seed` is `None`.
pub fn session_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Returns a shuffled copy, leaving the input untouched.
pub fn shuffled<T: Clone>(items: &[T], rng: &mut StdRng) -> Vec<T> {
    let mut result = items.to_vec();
    result.shuffle(rng);
    result
}

/// Up to `n` distinct elements in random order. Returns all of them when `n >= items.len()`.
pub fn sample_distinct<T: Clone>(items: &[T], n: usize, rng: &mut StdRng) -> Vec<T> {
    let mut picked: Vec<T> = items.choose_multiple(rng, n).cloned().collect();
    picked.shuffle(rng);
    picked
}

/// Uniform choice; `None` for an empty slice.
pub fn pick<'a, T>(items: &'a [T], rng: &mut StdRng) -> Option<&'a T> {
    items.choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn shuffle_is_reproducible_with_a_seed() {
        let items = (0..20).collect_vec();
        let a = shuffled(&items, &mut session_rng(Some(7)));
        let b = shuffled(&items, &mut session_rng(Some(7)));
        assert_eq!(a, b);
        assert_eq!(a.iter().copied().sorted().collect_vec(), items);
    }

    #[test]
    fn sample_distinct_caps_at_input_len() {
        let mut rng = session_rng(Some(42));
        let items = ["a", "b", "c"];
        let picked = sample_distinct(&items, 5, &mut rng);
        assert_eq!(picked.len(), 3);
        assert!(picked.iter().all_unique());

        let picked = sample_distinct(&items, 2, &mut rng);
        assert_eq!(picked.len(), 2);
        assert!(picked.iter().all(|p| items.contains(p)));
    }

    #[test]
    fn pick_from_empty_is_none() {
        let mut rng = session_rng(Some(1));
        let empty: [u8; 0] = [];
        assert_eq!(pick(&empty, &mut rng), None);
        assert_eq!(pick(&[9], &mut rng), Some(&9));
    }
}
