//! Properties over arbitrary two-tier lists and gestures.

mod common;

use common::{drag, engine, FakeList, RecordingAuthority};
use nestsort::{DomIdentity, ItemId, ReconcileOutcome, ReorderItemsCommand, SyncChannel, NEST_THRESHOLD};
use proptest::prelude::*;

/// A valid two-tier list: each entry is either top-level or a child of the
/// nearest preceding top-level item
fn two_tier_list() -> impl Strategy<Value = Vec<(String, Option<String>)>> {
    prop::collection::vec(any::<bool>(), 1..10).prop_map(|nested| {
        let mut last_top: Option<String> = None;
        nested
            .into_iter()
            .enumerate()
            .map(|(i, want_parent)| {
                let id = format!("i{i}");
                let parent = if want_parent { last_top.clone() } else { None };
                if parent.is_none() {
                    last_top = Some(id.clone());
                }
                (id, parent)
            })
            .collect()
    })
}

fn build(spec: &[(String, Option<String>)]) -> FakeList {
    let borrowed: Vec<(&str, Option<&str>)> = spec
        .iter()
        .map(|(id, parent)| (id.as_str(), parent.as_deref()))
        .collect();
    FakeList::new(&borrowed)
}

proptest! {
    #[test]
    fn small_offsets_keep_parent(
        spec in two_tier_list(),
        pick in any::<prop::sample::Index>(),
        dest in any::<prop::sample::Index>(),
        offset in -NEST_THRESHOLD..=NEST_THRESHOLD,
    ) {
        let list = build(&spec);
        let mut engine = engine(&list);
        let (id, before) = spec[pick.index(spec.len())].clone();

        let result = drag(&mut engine, &list, &id, dest.index(spec.len()), offset).unwrap();
        prop_assert_eq!(
            result.parent_of(&ItemId::from(id.as_str())).map(ToString::to_string),
            before
        );
    }

    #[test]
    fn nested_parent_is_top_level(
        spec in two_tier_list(),
        pick in any::<prop::sample::Index>(),
        dest in any::<prop::sample::Index>(),
        extra in 0.5f64..400.0,
    ) {
        let list = build(&spec);
        let mut engine = engine(&list);
        let id = spec[pick.index(spec.len())].0.clone();

        let result = drag(&mut engine, &list, &id, dest.index(spec.len()), NEST_THRESHOLD + extra).unwrap();
        if let Some(parent) = result.parent_of(&ItemId::from(id.as_str())) {
            prop_assert_ne!(parent.as_str(), id.as_str());
            prop_assert_eq!(result.parent_of(parent), None);
        }
    }

    #[test]
    fn unnest_always_ends_top_level(
        spec in two_tier_list(),
        pick in any::<prop::sample::Index>(),
        dest in any::<prop::sample::Index>(),
        extra in 0.5f64..400.0,
    ) {
        let list = build(&spec);
        let mut engine = engine(&list);
        let id = spec[pick.index(spec.len())].0.clone();

        let result = drag(&mut engine, &list, &id, dest.index(spec.len()), -(NEST_THRESHOLD + extra)).unwrap();
        // Top-level items have nothing to leave, so they stay top-level either way
        prop_assert_eq!(result.parent_of(&ItemId::from(id.as_str())), None);
    }

    #[test]
    fn result_covers_every_item_once(
        spec in two_tier_list(),
        pick in any::<prop::sample::Index>(),
        dest in any::<prop::sample::Index>(),
        offset in -200.0f64..200.0,
    ) {
        let list = build(&spec);
        let mut engine = engine(&list);
        let id = spec[pick.index(spec.len())].0.clone();

        let result = drag(&mut engine, &list, &id, dest.index(spec.len()), offset).unwrap();
        let mut ids: Vec<String> = result.ids().iter().map(ToString::to_string).collect();
        prop_assert_eq!(ids.clone(), list.ids());
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), spec.len());
        prop_assert_eq!(list.live_listeners(), 0);
    }

    #[test]
    fn reconcile_round_trip(
        spec in two_tier_list(),
        pick in any::<prop::sample::Index>(),
        dest in any::<prop::sample::Index>(),
        offset in -200.0f64..200.0,
    ) {
        let list = build(&spec);
        let authority = RecordingAuthority::default();
        let mut channel = SyncChannel::new(authority.clone(), DomIdentity::default());
        let mut engine = engine(&list);
        let id = spec[pick.index(spec.len())].0.clone();

        engine.choose(id.as_str().into());
        engine.start();
        engine.sample(0.0);
        list.move_to(&id, dest.index(spec.len()));
        engine.sample(offset);
        channel.complete_gesture(&mut engine).unwrap();
        let after = list.ids();

        let sent = authority.sent.borrow().last().cloned().unwrap();
        let command = ReorderItemsCommand {
            ids: sent.ids().iter().map(|i| format!("items-{i}")).collect(),
        };
        prop_assert_eq!(channel.accept(&mut engine, &command), ReconcileOutcome::Unchanged);
        prop_assert_eq!(list.ids(), after);
        prop_assert_eq!(list.reflows(), 0);
    }
}
