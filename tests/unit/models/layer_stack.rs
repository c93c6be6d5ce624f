use super::*;
use slotmap::SlotMap;

fn ids(n: usize) -> Vec<NodeId> {
    let mut arena: SlotMap<NodeId, ()> = SlotMap::with_key();
    (0..n).map(|_| arena.insert(())).collect()
}

#[test]
fn push_keeps_most_recent_on_top() {
    let ids = ids(2);
    let mut stacks = LayerStacks::new();
    stacks.push(Layer::Main, ids[0]);
    stacks.push(Layer::Main, ids[1]);

    assert_eq!(stacks.stack(Layer::Main), &[ids[0], ids[1]]);
    assert_eq!(stacks.top_of(Layer::Main), Some(ids[1]));
    assert_eq!(stacks.top_of(Layer::Popup), None);
}

#[test]
fn node_lives_in_one_stack_at_a_time() {
    let ids = ids(1);
    let mut stacks = LayerStacks::new();
    stacks.push(Layer::Main, ids[0]);
    stacks.push(Layer::Popup, ids[0]);

    assert!(stacks.stack(Layer::Main).is_empty());
    assert_eq!(stacks.layer_of(ids[0]), Some(Layer::Popup));
    assert_eq!(stacks.len(), 1);
}

#[test]
fn bring_to_front_reorders_within_layer() {
    let ids = ids(3);
    let mut stacks = LayerStacks::new();
    for id in &ids {
        stacks.push(Layer::Main, *id);
    }

    assert!(stacks.bring_to_front(ids[0]));
    assert_eq!(stacks.stack(Layer::Main), &[ids[1], ids[2], ids[0]]);

    stacks.remove(ids[1]);
    assert!(!stacks.bring_to_front(ids[1]));
}

#[test]
fn iter_top_down_orders_by_layer_then_stack() {
    let ids = ids(4);
    let mut stacks = LayerStacks::new();
    stacks.push(Layer::Background, ids[0]);
    stacks.push(Layer::Main, ids[1]);
    stacks.push(Layer::Main, ids[2]);
    stacks.push(Layer::System, ids[3]);

    let order: Vec<_> = stacks.iter_top_down().collect();
    assert_eq!(
        order,
        vec![
            (Layer::System, ids[3]),
            (Layer::Main, ids[2]),
            (Layer::Main, ids[1]),
            (Layer::Background, ids[0]),
        ]
    );
}

#[test]
fn retain_drops_across_layers() {
    let ids = ids(3);
    let mut stacks = LayerStacks::new();
    stacks.push(Layer::Main, ids[0]);
    stacks.push(Layer::Popup, ids[1]);
    stacks.push(Layer::Popup, ids[2]);

    stacks.retain(|id| id != ids[1]);

    assert_eq!(stacks.stack(Layer::Popup), &[ids[2]]);
    assert!(stacks.contains(ids[0]));
    assert!(!stacks.is_empty());
}
