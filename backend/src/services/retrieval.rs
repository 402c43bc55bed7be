//! Question retrieval and quiz selection.
//!
//! Everything here is a pure function over a slice of questions that the caller
//! already loaded in ascending id order. None of these functions decide what an
//! empty result means; that is the caller's policy.

use std::collections::{BTreeMap, HashSet};

use trivia_store::{Category, Question};

use super::random::RandomSource;

pub const QUESTIONS_PER_PAGE: usize = 10;

/// Returns the `page`-th window (1-based) of `page_size` items.
///
/// Pages at or below zero, and pages past the end, are empty.
pub fn paginate(items: &[Question], page: i64, page_size: usize) -> Vec<Question> {
    if page <= 0 || page_size == 0 {
        return Vec::new();
    }
    let start = usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(page_size));
    match start {
        Some(start) if start < items.len() => {
            let end = start.saturating_add(page_size).min(items.len());
            items[start..end].to_vec()
        }
        _ => Vec::new(),
    }
}

/// Maps category id to its label.
pub fn category_map(categories: &[Category]) -> BTreeMap<i64, String> {
    categories
        .iter()
        .map(|c| (c.id, c.kind.clone()))
        .collect()
}

/// Questions whose text contains `term`, ignoring case.
pub fn search(items: &[Question], term: &str) -> Vec<Question> {
    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|q| q.question.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

pub fn by_category(items: &[Question], category_id: i64) -> Vec<Question> {
    items
        .iter()
        .filter(|q| q.category == category_id)
        .cloned()
        .collect()
}

/// Picks an unseen question, optionally restricted to one category.
///
/// `None` means the pool is exhausted.
pub fn next_question(
    items: &[Question],
    category_filter: Option<i64>,
    previous_ids: &HashSet<i64>,
    rng: &mut dyn RandomSource,
) -> Option<Question> {
    let pool: Vec<&Question> = items
        .iter()
        .filter(|q| category_filter.map_or(true, |c| q.category == c))
        .filter(|q| !previous_ids.contains(&q.id))
        .collect();

    if pool.is_empty() {
        return None;
    }
    let index = rng.pick_index(pool.len());
    pool.get(index).map(|q| (*q).clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::random::SeededRandom;
    use proptest::prelude::*;

    fn question(id: i64, text: &str, category: i64) -> Question {
        Question {
            id,
            question: text.to_string(),
            answer: "answer".to_string(),
            category,
            difficulty: 1,
        }
    }

    fn numbered(count: i64) -> Vec<Question> {
        (1..=count)
            .map(|id| question(id, &format!("Question number {id}"), id % 3 + 1))
            .collect()
    }

    fn ids(items: &[Question]) -> Vec<i64> {
        items.iter().map(|q| q.id).collect()
    }

    /// Always picks the last candidate.
    struct LastPick;

    impl RandomSource for LastPick {
        fn pick_index(&mut self, len: usize) -> usize {
            len - 1
        }
    }

    #[test]
    fn paginate_slices_ten_at_a_time() {
        let items = numbered(25);
        assert_eq!(ids(&paginate(&items, 1, QUESTIONS_PER_PAGE)), (1..=10).collect::<Vec<_>>());
        assert_eq!(ids(&paginate(&items, 3, QUESTIONS_PER_PAGE)), (21..=25).collect::<Vec<_>>());
    }

    #[test]
    fn paginate_out_of_range_is_empty() {
        let items = numbered(25);
        assert!(paginate(&items, 4, QUESTIONS_PER_PAGE).is_empty());
        assert!(paginate(&items, 0, QUESTIONS_PER_PAGE).is_empty());
        assert!(paginate(&items, -3, QUESTIONS_PER_PAGE).is_empty());
        assert!(paginate(&items, i64::MAX, QUESTIONS_PER_PAGE).is_empty());
        assert!(paginate(&[], 1, QUESTIONS_PER_PAGE).is_empty());
    }

    #[test]
    fn category_map_keys_by_id() {
        let categories = vec![
            Category { id: 2, kind: "Art".into() },
            Category { id: 1, kind: "Science".into() },
        ];
        let map = category_map(&categories);
        assert_eq!(map.get(&1).map(String::as_str), Some("Science"));
        assert_eq!(map.get(&2).map(String::as_str), Some("Art"));
        assert_eq!(
            serde_json::to_value(&map).unwrap(),
            serde_json::json!({ "1": "Science", "2": "Art" })
        );
    }

    #[test]
    fn search_ignores_case() {
        let items = vec![
            question(1, "What is the Title of the book?", 1),
            question(2, "Who painted this?", 2),
            question(3, "Subtitle language", 2),
        ];
        assert_eq!(ids(&search(&items, "TITLE")), vec![1, 3]);
        assert!(search(&items, "nothing like it").is_empty());
    }

    #[test]
    fn by_category_compares_integers() {
        let items = vec![question(1, "a", 1), question(2, "b", 2), question(3, "c", 2)];
        assert_eq!(ids(&by_category(&items, 2)), vec![2, 3]);
        assert!(by_category(&items, 12).is_empty());
    }

    #[test]
    fn next_question_skips_previous_ids() {
        let items = vec![question(1, "a", 1), question(2, "b", 1), question(3, "c", 2)];
        let previous: HashSet<i64> = [1].into_iter().collect();
        let picked = next_question(&items, Some(1), &previous, &mut LastPick).unwrap();
        assert_eq!(picked.id, 2);
    }

    #[test]
    fn next_question_single_candidate_is_deterministic() {
        let items = vec![question(1, "a", 1), question(2, "b", 2)];
        let picked = next_question(&items, Some(2), &HashSet::new(), &mut SeededRandom::new(1));
        assert_eq!(picked.map(|q| q.id), Some(2));
    }

    #[test]
    fn next_question_exhausts_the_pool() {
        let items = numbered(12);
        let mut previous = HashSet::new();
        let mut rng = SeededRandom::new(99);
        while let Some(q) = next_question(&items, None, &previous, &mut rng) {
            assert!(previous.insert(q.id), "question {} repeated", q.id);
        }
        assert_eq!(previous.len(), items.len());
    }

    #[test]
    fn next_question_unknown_category_is_none() {
        let items = numbered(5);
        assert!(next_question(&items, Some(42), &HashSet::new(), &mut LastPick).is_none());
    }

    proptest! {
        #[test]
        fn pages_partition_the_collection(total in 0i64..60, page in 1i64..9) {
            let items = numbered(total);
            let expected = 10i64.min((total - 10 * (page - 1)).max(0)) as usize;
            let slice = paginate(&items, page, QUESTIONS_PER_PAGE);
            prop_assert_eq!(slice.len(), expected);
            prop_assert!(slice.windows(2).all(|w| w[0].id < w[1].id));

            let mut joined = Vec::new();
            let mut k = 1;
            loop {
                let chunk = paginate(&items, k, QUESTIONS_PER_PAGE);
                if chunk.is_empty() {
                    break;
                }
                joined.extend(chunk);
                k += 1;
            }
            prop_assert_eq!(joined, items);
        }

        #[test]
        fn search_matches_exactly_the_containing_questions(
            texts in proptest::collection::vec("[a-zA-Z ]{0,12}", 0..20),
            term in "[a-zA-Z]{1,3}",
        ) {
            let items: Vec<Question> = texts
                .iter()
                .enumerate()
                .map(|(i, t)| question(i as i64 + 1, t, 1))
                .collect();
            let found = search(&items, &term);
            let needle = term.to_lowercase();
            for q in &items {
                let contains = q.question.to_lowercase().contains(&needle);
                prop_assert_eq!(found.iter().any(|f| f.id == q.id), contains);
            }
        }

        #[test]
        fn by_category_keeps_each_match_once(
            categories in proptest::collection::vec(1i64..5, 0..30),
            wanted in 1i64..5,
        ) {
            let items: Vec<Question> = categories
                .iter()
                .enumerate()
                .map(|(i, c)| question(i as i64 + 1, "q", *c))
                .collect();
            let filtered = by_category(&items, wanted);
            prop_assert!(filtered.iter().all(|q| q.category == wanted));
            prop_assert_eq!(
                filtered.len(),
                categories.iter().filter(|c| **c == wanted).count()
            );
        }

        #[test]
        fn next_question_never_repeats(
            seed in any::<u64>(),
            seen in proptest::collection::hash_set(1i64..=20, 0..20),
        ) {
            let items = numbered(20);
            let mut rng = SeededRandom::new(seed);
            match next_question(&items, None, &seen, &mut rng) {
                Some(q) => prop_assert!(!seen.contains(&q.id)),
                None => prop_assert_eq!(seen.len(), items.len()),
            }
        }
    }
}
