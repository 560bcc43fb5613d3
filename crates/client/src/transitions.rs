//! Keyed enter/exit planning for the product grid.
//!
//! The DOM driver snapshots card ids before swapping the content
//! fragment and re-scans afterwards; this module turns those two key
//! lists into a plan: which cards play an exit animation, which appear
//! with a staggered delay, and which stay put. The planner is pure so
//! the diffing rules are testable without a browser.

use std::collections::HashSet;

/// Delay between consecutive appearing cards.
pub const APPEAR_STAGGER_MS: u32 = 20;

/// An element entering the grid, with its animation delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appear {
    pub key: String,
    pub delay_ms: u32,
}

/// What each keyed element does across one content swap.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransitionPlan {
    /// Keys present before but not after, in their old order. These
    /// play an exit animation before detaching.
    pub exits: Vec<String>,
    /// Keys present after but not before, staggered by their position
    /// in the new list.
    pub appears: Vec<Appear>,
    /// Keys present on both sides, in their new order. They move to
    /// their new slot without entering or exiting.
    pub kept: Vec<String>,
}

/// Diffs two key lists. Keys are assumed unique and non-empty within
/// each list; duplicates keep their first occurrence.
pub fn plan(old_keys: &[String], new_keys: &[String]) -> TransitionPlan {
    let old_set: HashSet<&str> = old_keys.iter().map(String::as_str).collect();
    let new_set: HashSet<&str> = new_keys.iter().map(String::as_str).collect();

    let mut seen = HashSet::new();
    let exits = old_keys
        .iter()
        .filter(|key| !new_set.contains(key.as_str()) && seen.insert(key.as_str()))
        .cloned()
        .collect();

    let mut appears = Vec::new();
    let mut kept = Vec::new();
    let mut placed = HashSet::new();
    for (index, key) in new_keys.iter().enumerate() {
        if !placed.insert(key.as_str()) {
            continue;
        }
        if old_set.contains(key.as_str()) {
            kept.push(key.clone());
        } else {
            appears.push(Appear {
                key: key.clone(),
                delay_ms: index as u32 * APPEAR_STAGGER_MS,
            });
        }
    }

    TransitionPlan {
        exits,
        appears,
        kept,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn test_exit_keep_and_appear() {
        let plan = plan(
            &keys(&["product-1", "product-2", "product-3"]),
            &keys(&["product-2", "product-4"]),
        );
        assert_eq!(plan.exits, keys(&["product-1", "product-3"]));
        assert_eq!(plan.kept, keys(&["product-2"]));
        assert_eq!(
            plan.appears,
            vec![Appear {
                key: "product-4".to_string(),
                delay_ms: 20,
            }]
        );
    }

    #[test]
    fn test_stagger_follows_position_in_new_list() {
        let plan = plan(&[], &keys(&["product-1", "product-2", "product-3"]));
        let delays: Vec<u32> = plan.appears.iter().map(|appear| appear.delay_ms).collect();
        assert_eq!(delays, vec![0, 20, 40]);
    }

    #[test]
    fn test_identical_lists_only_keep() {
        let same = keys(&["product-1", "product-2"]);
        let plan = plan(&same, &same);
        assert!(plan.exits.is_empty());
        assert!(plan.appears.is_empty());
        assert_eq!(plan.kept, same);
    }

    #[test]
    fn test_emptying_the_grid_exits_everything() {
        let plan = plan(&keys(&["product-1", "product-2"]), &[]);
        assert_eq!(plan.exits, keys(&["product-1", "product-2"]));
        assert!(plan.appears.is_empty());
        assert!(plan.kept.is_empty());
    }

    #[test]
    fn test_kept_order_follows_new_list() {
        let plan = plan(
            &keys(&["product-1", "product-2"]),
            &keys(&["product-2", "product-1"]),
        );
        assert_eq!(plan.kept, keys(&["product-2", "product-1"]));
    }
}
