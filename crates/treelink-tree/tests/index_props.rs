//! Structural invariants of the tree index and level index

use proptest::prelude::*;
use treelink_test_utils::forest_from_parents;
use treelink_tree::{Key, LevelIndex, TreeLink};

fn arb_parent_table() -> impl Strategy<Value = Vec<(usize, bool)>> {
    prop::collection::vec((any::<usize>(), prop::bool::weighted(0.2)), 0..48)
}

proptest! {
    #[test]
    fn prop_every_node_is_indexed(table in arb_parent_table()) {
        let tree = forest_from_parents(&table);
        let link = TreeLink::build(&tree);
        prop_assert_eq!(link.len(), table.len());
    }

    #[test]
    fn prop_child_level_is_parent_level_plus_one(table in arb_parent_table()) {
        let link = TreeLink::build(&forest_from_parents(&table));
        for (_, node) in link.iter() {
            match link.parent_of(node.key()) {
                Some(parent) => prop_assert_eq!(node.level, parent.level + 1),
                None => prop_assert_eq!(node.level, 0),
            }
        }
    }

    #[test]
    fn prop_parent_disabled_is_sticky(table in arb_parent_table()) {
        let link = TreeLink::build(&forest_from_parents(&table));
        for (key, node) in link.iter() {
            let expected = node.is_disabled()
                || link.ancestors(key).iter().any(|a| a.is_disabled());
            prop_assert_eq!(node.parent_disabled, expected);
            for child in &node.children {
                let child_entry = link.get(child.key()).unwrap();
                prop_assert_eq!(child.parent_disabled, child_entry.parent_disabled);
                prop_assert_eq!(child.disabled, child_entry.is_disabled());
            }
        }
    }

    #[test]
    fn prop_levels_partition_the_index(table in arb_parent_table()) {
        let link = TreeLink::build(&forest_from_parents(&table));
        let levels = LevelIndex::build(&link);

        prop_assert_eq!(levels.top_down().count(), link.len());
        for level in 0..levels.depth() {
            for key in levels.level(level) {
                prop_assert_eq!(link.get(key).unwrap().level, level);
            }
        }
    }
}

#[test]
fn forest_helper_builds_expected_shape() {
    // 0 root, 1 under 0, 2 root, 3 under 1
    let tree = forest_from_parents(&[(0, false), (0, false), (2, true), (1, false)]);
    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].value, Key::Int(0));
    assert_eq!(tree[0].children[0].children[0].value, Key::Int(3));
    assert_eq!(tree[1].disabled, Some(true));
}
