//! Property tests for the checklist tree, scoring and controller.

use std::sync::Arc;

use proptest::prelude::*;

use insp_catalog::{ChecklistTemplate, TemplateSection};
use insp_core::TemplateId;
use insp_state::{
    ChecklistController, ChecklistTree, ItemResult, OverallResult, RecordingNotifier,
    ResultCounts, SessionState,
};

/// Templates with 1..5 sections of 1..8 items each.
fn template_strategy() -> impl Strategy<Value = ChecklistTemplate> {
    prop::collection::vec(1usize..8, 1..5).prop_map(|shape| ChecklistTemplate {
        id: TemplateId::new("generated").unwrap(),
        title: "Generated".to_string(),
        description: String::new(),
        sections: shape
            .iter()
            .enumerate()
            .map(|(s, &len)| TemplateSection {
                title: format!("Section {s}"),
                items: (0..len).map(|i| format!("Item {s}.{i}")).collect(),
            })
            .collect(),
        regulation: String::new(),
    })
}

fn result_strategy() -> impl Strategy<Value = Option<ItemResult>> {
    prop_oneof![
        Just(None),
        Just(Some(ItemResult::Pass)),
        Just(Some(ItemResult::Fail)),
        Just(Some(ItemResult::NotApplicable)),
    ]
}

/// A template plus a sequence of (section, item, result) edits, with indices
/// reduced modulo the template shape so every edit is in range.
fn edits_strategy(
) -> impl Strategy<Value = (ChecklistTemplate, Vec<(usize, usize, Option<ItemResult>)>)> {
    template_strategy().prop_flat_map(|template| {
        let edits = prop::collection::vec((any::<usize>(), any::<usize>(), result_strategy()), 0..40);
        (Just(template), edits).prop_map(|(template, raw)| {
            let edits = raw
                .into_iter()
                .map(|(s, i, r)| {
                    let s = s % template.sections.len();
                    let i = i % template.sections[s].items.len();
                    (s, i, r)
                })
                .collect();
            (template, edits)
        })
    })
}

/// One edit to a checklist tree.
#[derive(Debug, Clone)]
enum Edit {
    Result(Option<ItemResult>),
    Notes(String),
    Toggle,
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        result_strategy().prop_map(Edit::Result),
        "[a-z ]{0,12}".prop_map(Edit::Notes),
        Just(Edit::Toggle),
    ]
}

/// A template plus a sequence of mixed result, notes and expand edits.
fn mixed_edits_strategy() -> impl Strategy<Value = (ChecklistTemplate, Vec<(usize, usize, Edit)>)> {
    template_strategy().prop_flat_map(|template| {
        let edits = prop::collection::vec((any::<usize>(), any::<usize>(), edit_strategy()), 0..40);
        (Just(template), edits).prop_map(|(template, raw)| {
            let edits = raw
                .into_iter()
                .map(|(s, i, e)| {
                    let s = s % template.sections.len();
                    let i = i % template.sections[s].items.len();
                    (s, i, e)
                })
                .collect();
            (template, edits)
        })
    })
}

proptest! {
    /// Setting the same result twice returns the item to unanswered.
    #[test]
    fn same_result_twice_clears(
        (template, edits) in edits_strategy(),
        result in prop_oneof![
            Just(ItemResult::Pass),
            Just(ItemResult::Fail),
            Just(ItemResult::NotApplicable),
        ]
    ) {
        let mut tree = ChecklistTree::from_template(&template);
        for (s, i, r) in &edits {
            tree = tree.with_item_result(*s, *i, *r).unwrap();
        }
        let cleared = tree.with_item_result(0, 0, None).unwrap();
        let once = cleared.with_item_result(0, 0, Some(result)).unwrap();
        let twice = once.with_item_result(0, 0, Some(result)).unwrap();
        prop_assert_eq!(once.item(0, 0).unwrap().result, Some(result));
        prop_assert_eq!(twice.item(0, 0).unwrap().result, None);
    }

    /// An edit touches exactly one item; every other item keeps its value and
    /// every other section keeps its allocation.
    #[test]
    fn edit_is_isolated((template, edits) in edits_strategy()) {
        let mut tree = ChecklistTree::from_template(&template);
        for (s, i, r) in edits {
            let next = tree.with_item_result(s, i, r).unwrap();
            for (si, (old, new)) in tree.sections().iter().zip(next.sections()).enumerate() {
                if si != s {
                    prop_assert!(Arc::ptr_eq(old, new));
                    continue;
                }
                for (ii, (a, b)) in old.items.iter().zip(&new.items).enumerate() {
                    if ii != i {
                        prop_assert!(Arc::ptr_eq(a, b));
                    }
                }
                prop_assert_eq!(old.expanded, new.expanded);
            }
            tree = next;
        }
    }

    /// Result and notes edits both touch exactly one item. Sibling items keep
    /// their allocation, result and notes; other sections and every expanded
    /// flag are left alone.
    #[test]
    fn result_and_notes_edits_are_isolated((template, edits) in mixed_edits_strategy()) {
        let mut tree = ChecklistTree::from_template(&template);
        for (s, i, edit) in edits {
            let next = match &edit {
                Edit::Result(r) => tree.with_item_result(s, i, *r).unwrap(),
                Edit::Notes(notes) => tree.with_item_notes(s, i, notes).unwrap(),
                Edit::Toggle => {
                    tree = tree.with_section_toggled(s).unwrap();
                    continue;
                }
            };
            for (si, (old, new)) in tree.sections().iter().zip(next.sections()).enumerate() {
                prop_assert_eq!(old.expanded, new.expanded);
                if si != s {
                    prop_assert!(Arc::ptr_eq(old, new));
                    continue;
                }
                for (ii, (a, b)) in old.items.iter().zip(&new.items).enumerate() {
                    if ii != i {
                        prop_assert!(Arc::ptr_eq(a, b));
                        prop_assert_eq!(a.result, b.result);
                        prop_assert_eq!(&a.notes, &b.notes);
                    }
                }
            }
            let (before, after) = (tree.item(s, i).unwrap(), next.item(s, i).unwrap());
            match edit {
                Edit::Notes(notes) => {
                    prop_assert_eq!(after.notes.as_str(), notes.as_str());
                    prop_assert_eq!(after.result, before.result);
                }
                Edit::Result(_) => prop_assert_eq!(&after.notes, &before.notes),
                Edit::Toggle => {}
            }
            tree = next;
        }
    }

    /// The outcome follows the three-way rule over the tally.
    #[test]
    fn outcome_rule_holds((template, edits) in edits_strategy()) {
        let mut tree = ChecklistTree::from_template(&template);
        for (s, i, r) in edits {
            tree = tree.with_item_result(s, i, r).unwrap();
        }
        let c = tree.counts();
        prop_assert_eq!(c.answered, c.pass + c.fail + c.na);
        prop_assert_eq!(c.total, template.item_count());
        let expected = if c.fail > 0 {
            OverallResult::Fail
        } else if c.pass < c.total - c.na {
            OverallResult::Advisory
        } else {
            OverallResult::Pass
        };
        prop_assert_eq!(c.overall_result(), expected);
    }

    /// Progress is a rounded percentage in 0..=100 and only hits 100 when
    /// rounding allows it.
    #[test]
    fn progress_bounds(total in 0usize..500, answered_frac in 0u32..=100) {
        let answered = total * answered_frac as usize / 100;
        let counts = ResultCounts { pass: answered, fail: 0, na: 0, answered, total };
        let p = counts.progress();
        prop_assert!(p <= 100);
        if total == 0 {
            prop_assert_eq!(p, 0);
        } else {
            let exact = answered as f64 * 100.0 / total as f64;
            prop_assert!((p as f64 - exact).abs() <= 0.5);
        }
    }

    /// Successive submissions get strictly increasing ids and history stays
    /// most-recent-first.
    #[test]
    fn submitted_ids_increase(template in template_strategy(), runs in 1usize..6) {
        let recorder = RecordingNotifier::new();
        let mut ctl = ChecklistController::new().with_notifier(recorder.clone());
        for n in 0..runs {
            ctl.start_inspection(&template);
            ctl.set_item_result(0, 0, Some(ItemResult::Pass)).unwrap();
            ctl.set_inspector_name(&format!("Inspector {n}")).unwrap();
            ctl.submit_inspection().unwrap();
            prop_assert_eq!(ctl.state(), SessionState::NoSession);
        }
        let ids: Vec<_> = ctl.history().iter().map(|r| r.id).collect();
        prop_assert_eq!(ids.len(), runs);
        for pair in ids.windows(2) {
            prop_assert!(pair[0] > pair[1]);
        }
        prop_assert_eq!(recorder.len(), runs);
        let newest = format!("Inspector {}", runs - 1);
        prop_assert_eq!(ctl.history()[0].inspector_name.as_str(), newest.as_str());
    }
}
