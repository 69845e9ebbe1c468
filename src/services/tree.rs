//! Nested view over the flat `grocery_items` table.
//!
//! Nodes are materialised by walking down from the roots, so a record only
//! shows up when its parent chain ends at a root. Orphans, their descendants
//! and records caught in a parent cycle are left out, and the forest can never
//! contain a node twice.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use uuid::Uuid;

use crate::db::entities::grocery_item;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroceryNode {
    #[serde(flatten)]
    pub item: grocery_item::Model,
    pub children: Vec<GroceryNode>,
}

/// Sibling order: `sort_order` ascending, then `id` (insertion order).
pub fn sort_flat(records: &mut [grocery_item::Model]) {
    records.sort_by_key(|record| (record.sort_order, record.id));
}

pub fn assemble(mut records: Vec<grocery_item::Model>) -> Vec<GroceryNode> {
    sort_flat(&mut records);

    let known: HashSet<Uuid> = records.iter().map(|record| record.id).collect();
    let mut roots = Vec::new();
    let mut by_parent: HashMap<Uuid, Vec<grocery_item::Model>> = HashMap::new();

    for record in records {
        match record.parent_id {
            None => roots.push(record),
            Some(parent_id) if known.contains(&parent_id) => {
                by_parent.entry(parent_id).or_default().push(record);
            }
            // orphan
            Some(_) => {}
        }
    }

    roots
        .into_iter()
        .map(|root| build_node(root, &mut by_parent))
        .collect()
}

fn build_node(
    item: grocery_item::Model,
    by_parent: &mut HashMap<Uuid, Vec<grocery_item::Model>>,
) -> GroceryNode {
    let children = by_parent
        .remove(&item.id)
        .unwrap_or_default()
        .into_iter()
        .map(|child| build_node(child, by_parent))
        .collect();
    GroceryNode { item, children }
}

/// Leaf counts for the checklist header; categories are never counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TreeSummary {
    pub total_items: usize,
    pub checked_items: usize,
}

impl TreeSummary {
    pub fn of(forest: &[GroceryNode]) -> Self {
        forest.iter().fold(Self::default(), |acc, node| {
            let below = Self::of(&node.children);
            let (own_total, own_checked) = if node.item.is_category {
                (0, 0)
            } else {
                (1, usize::from(node.item.is_checked))
            };
            Self {
                total_items: acc.total_items + below.total_items + own_total,
                checked_items: acc.checked_items + below.checked_items + own_checked,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use uuid::Uuid;

    use super::{GroceryNode, TreeSummary, assemble, sort_flat};
    use crate::db::entities::grocery_item;

    fn record(title: &str, parent_id: Option<Uuid>, sort_order: i32) -> grocery_item::Model {
        let now = FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 3, 1, 9, 30, 0)
            .single()
            .expect("timestamp should be valid");
        grocery_item::Model {
            id: Uuid::now_v7(),
            title: title.to_string(),
            description: None,
            quantity: None,
            unit: None,
            is_checked: false,
            is_category: false,
            parent_id,
            sort_order,
            created_at: now,
            updated_at: now,
        }
    }

    fn category(title: &str, sort_order: i32) -> grocery_item::Model {
        grocery_item::Model {
            is_category: true,
            ..record(title, None, sort_order)
        }
    }

    fn titles(nodes: &[GroceryNode]) -> Vec<&str> {
        nodes.iter().map(|node| node.item.title.as_str()).collect()
    }

    #[test]
    fn nests_children_under_their_parent() {
        let dairy = category("Dairy", 1);
        let milk = record("Milk", Some(dairy.id), 1);
        let bread = record("Bread", None, 2);

        let forest = assemble(vec![bread, milk, dairy]);

        assert_eq!(titles(&forest), vec!["Dairy", "Bread"]);
        assert_eq!(titles(&forest[0].children), vec!["Milk"]);
        assert!(forest[1].children.is_empty());
    }

    #[test]
    fn roots_and_siblings_break_ties_by_id() {
        let produce = category("Produce", 0);
        let first = record("Apples", Some(produce.id), 4);
        let second = record("Pears", Some(produce.id), 4);
        let early = record("Kale", Some(produce.id), 1);
        let root_a = record("Soap", None, 0);

        let forest = assemble(vec![second, root_a, first, early, produce]);

        assert_eq!(titles(&forest), vec!["Produce", "Soap"]);
        assert_eq!(titles(&forest[0].children), vec!["Kale", "Apples", "Pears"]);
    }

    #[test]
    fn orphans_and_their_descendants_are_dropped() {
        let vanished = Uuid::now_v7();
        let orphan = record("Cheddar", Some(vanished), 0);
        let grandchild = record("Slices", Some(orphan.id), 0);
        let kept = record("Bread", None, 1);

        let forest = assemble(vec![orphan, grandchild, kept]);

        assert_eq!(titles(&forest), vec!["Bread"]);
        assert!(forest[0].children.is_empty());
    }

    #[test]
    fn parent_cycles_never_reach_the_forest() {
        let mut a = record("A", None, 0);
        let mut b = record("B", None, 0);
        a.parent_id = Some(b.id);
        b.parent_id = Some(a.id);
        let mut looped = record("Self", None, 0);
        looped.parent_id = Some(looped.id);
        let root = record("Root", None, 1);

        let forest = assemble(vec![a, b, looped, root]);

        assert_eq!(titles(&forest), vec!["Root"]);
    }

    #[test]
    fn deep_nesting_is_preserved() {
        let store = category("Store", 0);
        let aisle = grocery_item::Model {
            is_category: true,
            ..record("Aisle 5", Some(store.id), 0)
        };
        let shelf = record("Pasta", Some(aisle.id), 0);

        let forest = assemble(vec![shelf, aisle, store]);

        assert_eq!(titles(&forest[0].children[0].children), vec!["Pasta"]);
    }

    #[test]
    fn flat_sort_uses_order_then_id() {
        let first = record("first", None, 3);
        let second = record("second", None, 3);
        let zeroth = record("zeroth", Some(first.id), -1);
        let mut rows = vec![second, first, zeroth];

        sort_flat(&mut rows);

        let order: Vec<_> = rows.iter().map(|row| row.title.as_str()).collect();
        assert_eq!(order, vec!["zeroth", "first", "second"]);
    }

    #[test]
    fn summary_counts_leaf_items_only() {
        let dairy = category("Dairy", 0);
        let mut milk = record("Milk", Some(dairy.id), 0);
        milk.is_checked = true;
        let butter = record("Butter", Some(dairy.id), 1);
        let mut checked_category = category("Frozen", 1);
        checked_category.is_checked = true;
        let bread = record("Bread", None, 2);

        let forest = assemble(vec![dairy, milk, butter, checked_category, bread]);

        assert_eq!(
            TreeSummary::of(&forest),
            TreeSummary {
                total_items: 3,
                checked_items: 1,
            }
        );
    }

    #[test]
    fn nodes_serialize_flat_fields_with_children() {
        let dairy = category("Dairy", 1);
        let forest = assemble(vec![dairy]);

        let json = serde_json::to_value(&forest).expect("forest should serialize");

        assert_eq!(json[0]["title"], "Dairy");
        assert_eq!(json[0]["is_category"], true);
        assert_eq!(json[0]["children"], serde_json::json!([]));
    }
}
