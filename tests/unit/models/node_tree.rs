use super::*;
use std::cell::RefCell;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<String>>>;

struct Recorder {
    name: &'static str,
    log: Log,
    escape_result: bool,
}

impl Recorder {
    fn boxed(name: &'static str, log: &Log) -> Box<dyn NodeBehavior> {
        Box::new(Self {
            name,
            log: Rc::clone(log),
            escape_result: false,
        })
    }

    fn custom(name: &'static str, log: &Log, escape_result: bool) -> Box<dyn NodeBehavior> {
        Box::new(Self {
            name,
            log: Rc::clone(log),
            escape_result,
        })
    }

    fn push(&self, event: &str) {
        self.log.borrow_mut().push(format!("{}:{}", self.name, event));
    }
}

impl NodeBehavior for Recorder {
    fn on_hide(&mut self, _node: NodeId) {
        self.push("hide");
    }

    fn on_show(&mut self, _node: NodeId) {
        self.push("show");
    }

    fn on_destroy(&mut self, _node: NodeId) {
        self.push("destroy");
    }

    fn on_child_closed(&mut self, _node: NodeId, _child: NodeId) {
        self.push("child_closed");
    }

    fn on_escape(&mut self, _node: NodeId) -> bool {
        self.push("escape");
        self.escape_result
    }
}

fn spec(escape: EscapePolicy) -> NodeSpec {
    NodeSpec::new(Layer::Main, escape)
}

fn entries(log: &Log) -> Vec<String> {
    log.borrow().clone()
}

#[test]
fn create_node_links_parent_and_child() {
    let mut tree = NodeTree::new();
    let root = tree.root();
    let a = tree
        .create_node(root, spec(EscapePolicy::Hide).panel("A"), Box::new(Inert))
        .unwrap();

    assert_eq!(tree.get(a).unwrap().parent(), Some(root));
    assert_eq!(tree.get(root).unwrap().children(), &[a]);
    assert_eq!(tree.get(a).unwrap().panel().map(|p| p.as_str()), Some("A"));
    assert!(tree.get(a).unwrap().is_visible());
    assert_eq!(tree.len(), 2);
}

#[test]
fn attach_rejects_cycles() {
    let mut tree = NodeTree::new();
    let root = tree.root();
    let a = tree.create_node(root, spec(EscapePolicy::Ignore), Box::new(Inert)).unwrap();
    let b = tree.create_node(a, spec(EscapePolicy::Ignore), Box::new(Inert)).unwrap();
    let c = tree.create_node(b, spec(EscapePolicy::Ignore), Box::new(Inert)).unwrap();

    assert_eq!(
        tree.attach(c, a),
        Err(TreeError::Cycle { parent: c, child: a })
    );
    assert_eq!(
        tree.attach(a, a),
        Err(TreeError::Cycle { parent: a, child: a })
    );
    // Unchanged after the failed attach.
    assert_eq!(tree.get(a).unwrap().parent(), Some(root));
}

#[test]
fn attach_moves_subtree_to_new_parent() {
    let mut tree = NodeTree::new();
    let root = tree.root();
    let a = tree.create_node(root, spec(EscapePolicy::Ignore), Box::new(Inert)).unwrap();
    let b = tree.create_node(root, spec(EscapePolicy::Ignore), Box::new(Inert)).unwrap();
    let c = tree.create_node(a, spec(EscapePolicy::Ignore), Box::new(Inert)).unwrap();

    tree.attach(b, c).unwrap();

    assert!(tree.get(a).unwrap().children().is_empty());
    assert_eq!(tree.get(b).unwrap().children(), &[c]);
    assert_eq!(tree.get(c).unwrap().parent(), Some(b));
}

#[test]
fn root_is_pinned() {
    let mut tree = NodeTree::new();
    let root = tree.root();
    assert_eq!(tree.detach(root), Err(TreeError::Pinned(root)));
    assert_eq!(tree.hide(root), Err(TreeError::Pinned(root)));
}

#[test]
fn detach_destroys_children_first_and_notifies_grandparent_once() {
    let log = Log::default();
    let mut tree = NodeTree::new();
    let root = tree.root();
    let grandparent = tree
        .create_node(root, spec(EscapePolicy::Ignore), Recorder::boxed("gp", &log))
        .unwrap();
    let parent = tree
        .create_node(grandparent, spec(EscapePolicy::AutoClose), Recorder::boxed("p", &log))
        .unwrap();
    let c1 = tree
        .create_node(parent, spec(EscapePolicy::AutoClose), Recorder::boxed("c1", &log))
        .unwrap();
    let c2 = tree
        .create_node(parent, spec(EscapePolicy::AutoClose), Recorder::boxed("c2", &log))
        .unwrap();

    let removed = tree.detach(parent).unwrap();

    assert_eq!(removed, vec![c1, c2, parent]);
    assert_eq!(
        entries(&log),
        vec!["c1:destroy", "c2:destroy", "p:destroy", "gp:child_closed"]
    );
    assert!(tree.get(grandparent).unwrap().children().is_empty());
    assert!(!tree.contains(c1));
}

#[test]
fn stale_handles_are_reported() {
    let mut tree = NodeTree::new();
    let root = tree.root();
    let a = tree.create_node(root, spec(EscapePolicy::AutoClose), Box::new(Inert)).unwrap();
    tree.detach(a).unwrap();

    assert_eq!(tree.detach(a), Err(TreeError::InvalidNode(a)));
    assert_eq!(tree.hide(a), Err(TreeError::InvalidNode(a)));
    assert_eq!(tree.escalate_escape(a), Err(TreeError::InvalidNode(a)));
    assert!(matches!(
        tree.create_node(a, spec(EscapePolicy::Hide), Box::new(Inert)),
        Err(TreeError::InvalidNode(_))
    ));
}

#[test]
fn hide_notifies_parent_and_is_idempotent() {
    let log = Log::default();
    let mut tree = NodeTree::new();
    let root = tree.root();
    let parent = tree
        .create_node(root, spec(EscapePolicy::Ignore), Recorder::boxed("p", &log))
        .unwrap();
    let child = tree
        .create_node(parent, spec(EscapePolicy::Hide), Recorder::boxed("c", &log))
        .unwrap();

    assert_eq!(tree.hide(child), Ok(true));
    assert_eq!(tree.hide(child), Ok(false));
    assert_eq!(entries(&log), vec!["c:hide", "p:child_closed"]);

    assert_eq!(tree.show(child), Ok(true));
    assert_eq!(tree.show(child), Ok(false));
    assert_eq!(entries(&log).last().map(String::as_str), Some("c:show"));
}

#[test]
fn is_shown_considers_ancestors() {
    let mut tree = NodeTree::new();
    let root = tree.root();
    let parent = tree.create_node(root, spec(EscapePolicy::Hide), Box::new(Inert)).unwrap();
    let child = tree.create_node(parent, spec(EscapePolicy::Hide), Box::new(Inert)).unwrap();

    tree.hide(parent).unwrap();

    assert!(tree.get(child).unwrap().is_visible());
    assert!(!tree.is_shown(child));
}

#[test]
fn escape_stops_at_custom_handler_result() {
    let log = Log::default();
    let mut tree = NodeTree::new();
    let root = tree.root();
    let outer = tree
        .create_node(root, spec(EscapePolicy::AutoClose), Recorder::boxed("outer", &log))
        .unwrap();
    let middle = tree
        .create_node(outer, spec(EscapePolicy::Hide), Recorder::boxed("middle", &log))
        .unwrap();
    let inner = tree
        .create_node(middle, spec(EscapePolicy::Custom), Recorder::custom("inner", &log, false))
        .unwrap();

    let outcome = tree.escalate_escape(inner).unwrap();

    assert_eq!(
        outcome,
        EscapeOutcome::Custom {
            node: inner,
            handled: false
        }
    );
    assert!(!outcome.handled());
    assert_eq!(entries(&log), vec!["inner:escape"]);
    assert!(tree.get(middle).unwrap().is_visible());
    assert!(tree.contains(outer));
}

#[test]
fn escape_bubbles_past_ignore_and_hides() {
    let log = Log::default();
    let mut tree = NodeTree::new();
    let root = tree.root();
    let panel = tree
        .create_node(root, spec(EscapePolicy::Hide), Recorder::boxed("panel", &log))
        .unwrap();
    let inner = tree
        .create_node(panel, spec(EscapePolicy::Ignore), Recorder::boxed("inner", &log))
        .unwrap();

    let outcome = tree.escalate_escape(inner).unwrap();

    assert_eq!(outcome, EscapeOutcome::Hidden(panel));
    assert!(outcome.handled());
    assert!(tree.contains(panel));
    assert!(!tree.get(panel).unwrap().is_visible());
    assert!(!log.borrow().iter().any(|e| e.ends_with("destroy")));
}

#[test]
fn escape_auto_close_detaches_subtree() {
    let mut tree = NodeTree::new();
    let root = tree.root();
    let panel = tree.create_node(root, spec(EscapePolicy::AutoClose), Box::new(Inert)).unwrap();
    let inner = tree.create_node(panel, spec(EscapePolicy::Ignore), Box::new(Inert)).unwrap();

    let outcome = tree.escalate_escape(inner).unwrap();

    assert_eq!(
        outcome,
        EscapeOutcome::Closed {
            node: panel,
            removed: vec![inner, panel]
        }
    );
    assert_eq!(tree.len(), 1);
}

#[test]
fn escape_reaching_root_is_unhandled() {
    let mut tree = NodeTree::new();
    let root = tree.root();
    let a = tree.create_node(root, spec(EscapePolicy::Ignore), Box::new(Inert)).unwrap();
    let b = tree.create_node(a, spec(EscapePolicy::Ignore), Box::new(Inert)).unwrap();

    assert_eq!(tree.escalate_escape(b), Ok(EscapeOutcome::Unhandled));
    assert_eq!(tree.escalate_escape(root), Ok(EscapeOutcome::Unhandled));
    assert!(tree.contains(a) && tree.contains(b));
}

#[test]
fn ancestors_walk_to_root() {
    let mut tree = NodeTree::new();
    let root = tree.root();
    let a = tree.create_node(root, spec(EscapePolicy::Ignore), Box::new(Inert)).unwrap();
    let b = tree.create_node(a, spec(EscapePolicy::Ignore), Box::new(Inert)).unwrap();

    assert_eq!(tree.ancestors(b).collect::<Vec<_>>(), vec![a, root]);
    assert!(tree.is_ancestor(root, b));
    assert!(!tree.is_ancestor(b, a));
}
