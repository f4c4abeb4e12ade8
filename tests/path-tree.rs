//! Tests for the path-addressed tree.

use pathtree::path_tree::{Children, Matches, Parents};
use pathtree::{NodeRef, OnConflict, PathTree, RemoveMode, SortMode, TreeConfig, TreeError};
use pretty_assertions::assert_eq;

/// Returns a tree built from the paths.
fn tree_of(paths: &[&str]) -> PathTree {
    let mut tree = PathTree::new();
    tree.append_all(paths, OnConflict::Raise).unwrap();
    tree
}

/// Returns the leaves in ascending lexicographic order.
fn leaves(tree: &PathTree) -> Vec<String> {
    tree.leaves(SortMode::Alphabetical, true)
}

#[test]
fn search_by_name_finds_every_path() {
    let tree = tree_of(&["a.b.c", "a.d.c"]);
    assert_eq!(
        tree.search(&NodeRef::name("c")),
        Some(Matches::Many(vec!["a.b.c".into(), "a.d.c".into()]))
    );
    assert_eq!(tree.search(&NodeRef::name("x")), None);
    assert_eq!(
        tree.search(&NodeRef::path("a.d")),
        Some(Matches::Single("a.d".into()))
    );
    assert_eq!(tree.search(&NodeRef::path("a.c")), None);
}

#[test]
fn remove_one_reattaches_to_parent() {
    let mut tree = tree_of(&["a.b.c", "a.d.c"]);
    assert!(tree.remove(&NodeRef::name("b"), RemoveMode::RemoveOne));
    assert_eq!(leaves(&tree), ["a.c", "a.d.c"]);
    assert_eq!(tree.len(), 4);
}

#[test]
fn remove_one_merges_colliding_subtrees() {
    let mut tree = tree_of(&["a.b.c.d.h", "a.b.c.e.d.f"]);
    assert!(tree.remove(&NodeRef::name("e"), RemoveMode::RemoveOne));
    assert_eq!(leaves(&tree), ["a.b.c.d.f", "a.b.c.d.h"]);
    assert_eq!(tree.len(), 6);
    assert_eq!(
        tree.tree_structure(),
        "a\n\
         └ b\n\
         \x20 └ c\n\
         \x20   └ d\n\
         \x20     ├ f\n\
         \x20     └ h"
    );
}

#[test]
fn remove_one_merges_at_every_depth() {
    let mut tree = tree_of(&["a.x.b.c.p", "a.b.c.q"]);
    assert!(tree.remove(&NodeRef::path("a.x"), RemoveMode::RemoveOne));
    assert_eq!(leaves(&tree), ["a.b.c.p", "a.b.c.q"]);
    assert_eq!(tree.len(), 5);
    assert_eq!(
        tree.children(&NodeRef::path("a.b.c")),
        Some(Children::Single(vec!["p".into(), "q".into()]))
    );
}

#[test]
fn remove_one_with_nested_names() {
    let mut tree = tree_of(&["a.e.e.x"]);
    assert!(tree.remove(&NodeRef::name("e"), RemoveMode::RemoveOne));
    assert_eq!(leaves(&tree), ["a.x"]);
    assert_eq!(tree.len(), 2);
}

#[test]
fn remove_one_keeps_the_root() {
    let mut tree = tree_of(&["a.b.c", "a.b.d"]);
    let before = tree.clone();
    assert!(!tree.remove(&NodeRef::name("a"), RemoveMode::RemoveOne));
    assert!(!tree.remove(&NodeRef::path("a"), RemoveMode::RemoveOne));
    assert_eq!(tree, before);

    let mut tree = tree_of(&["a"]);
    assert!(!tree.remove(&NodeRef::name("a"), RemoveMode::RemoveOne));
    assert_eq!(tree.root(), Some("a"));
    assert_eq!(tree.len(), 1);
}

#[test]
fn remove_one_by_name_skips_only_the_root() {
    let mut tree = tree_of(&["a.b.a.c", "a.d"]);
    assert!(tree.remove(&NodeRef::name("a"), RemoveMode::RemoveOne));
    assert_eq!(tree.root(), Some("a"));
    assert_eq!(leaves(&tree), ["a.b.c", "a.d"]);
    assert_eq!(tree.len(), 4);
}

#[test]
fn empty_tree_has_no_leaves() {
    let mut tree = PathTree::new();
    assert!(tree.leaves(SortMode::Length, false).is_empty());
    assert!(tree.leaves(SortMode::Alphabetical, true).is_empty());

    tree.append_all(["a.b", "a.c"], OnConflict::Raise).unwrap();
    assert!(tree.remove(&NodeRef::path("a"), RemoveMode::RemoveAll));
    assert!(tree.leaves(SortMode::Length, true).is_empty());
    assert!(tree.leaves(SortMode::Alphabetical, false).is_empty());
}

#[test]
fn remove_all_by_name() {
    let mut tree = tree_of(&["a.b.c.x", "a.d.c"]);
    assert!(tree.remove(&NodeRef::name("c"), RemoveMode::RemoveAll));
    assert_eq!(leaves(&tree), ["a.b", "a.d"]);
    assert_eq!(tree.len(), 3);

    assert!(tree.remove(&NodeRef::name("a"), RemoveMode::RemoveAll));
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
}

#[test]
fn dont_remove_spares_inner_nodes() {
    let mut tree = tree_of(&["a.b.c"]);
    assert!(!tree.remove(&NodeRef::path("a.b"), RemoveMode::DontRemove));
    assert!(tree.remove(&NodeRef::path("a.b.c"), RemoveMode::DontRemove));
    assert!(tree.remove(&NodeRef::path("a.b"), RemoveMode::DontRemove));
    assert!(tree.remove(&NodeRef::name("a"), RemoveMode::DontRemove));
    assert!(tree.is_empty());
    assert!(!tree.remove(&NodeRef::name("a"), RemoveMode::DontRemove));
}

#[test]
fn append_fans_out_over_names() {
    let mut tree = tree_of(&["a.b.c.x", "a.d.c"]);
    assert_eq!(
        tree.append("x", Some(&NodeRef::name("c")), OnConflict::Raise),
        Err(TreeError::PathAlreadyExists {
            path: "a.b.c.x".into()
        })
    );
    assert!(!tree.contains_path("a.d.c.x"));

    // Ignoring skips only the conflicting parent.
    tree.append("x", Some(&NodeRef::name("c")), OnConflict::Ignore)
        .unwrap();
    assert!(tree.contains_path("a.d.c.x"));
    assert_eq!(
        tree.parent(&NodeRef::name("x")),
        Some(Parents::Many(vec!["a.b.c".into(), "a.d.c".into()]))
    );
}

#[test]
fn append_on_empty_tree() {
    let mut tree = PathTree::new();
    tree.try_append("leaf", Some(&NodeRef::name("top"))).unwrap();
    assert_eq!(tree.root(), Some("top"));
    assert!(tree.contains_path("top.leaf"));
    assert_eq!(tree.len(), 2);

    let mut tree = PathTree::new();
    tree.try_append("top", Some(&NodeRef::path("ignored.path")))
        .unwrap();
    assert_eq!(tree.root(), Some("top"));
    assert_eq!(tree.len(), 1);
}

#[test]
fn append_conflicts() {
    let mut tree = tree_of(&["a.b"]);
    assert_eq!(tree.try_append("x", None), Err(TreeError::ParentRequired));
    assert_eq!(
        tree.try_append("x", Some(&NodeRef::path("a.z"))),
        Err(TreeError::NodeNotFound {
            target: "a.z".into()
        })
    );
    assert_eq!(
        tree.try_append("x.y", Some(&NodeRef::name("b"))),
        Err(TreeError::InvalidLabel {
            label: "x.y".into()
        })
    );
    assert_eq!(
        tree.append("x", Some(&NodeRef::name("z")), OnConflict::Ignore),
        Ok(())
    );
    assert_eq!(tree.len(), 2);
}

#[test]
fn append_abs_creates_ancestors() {
    let mut tree = PathTree::new();
    tree.append_abs("a.b.c", OnConflict::Raise).unwrap();
    assert_eq!(tree.len(), 3);
    assert_eq!(
        tree.append_abs("a.b.c", OnConflict::Raise),
        Err(TreeError::PathAlreadyExists {
            path: "a.b.c".into()
        })
    );
    assert_eq!(
        tree.append_abs("z.b", OnConflict::Raise),
        Err(TreeError::RootNotUnique {
            existing: "a".into(),
            found: "z".into()
        })
    );
    assert_eq!(
        tree.append_abs("a..d", OnConflict::Raise),
        Err(TreeError::InvalidLabel {
            label: "a..d".into()
        })
    );
    assert_eq!(tree.append_abs("z.b", OnConflict::Ignore), Ok(()));
    assert_eq!(tree.len(), 3);
}

#[test]
fn append_all_requires_one_root() {
    let mut tree = PathTree::new();
    assert_eq!(
        tree.append_all(["a.b", "c.d"], OnConflict::Raise),
        Err(TreeError::RootNotUnique {
            existing: "a".into(),
            found: "c".into()
        })
    );
    assert!(tree.is_empty());

    tree.append_all(["a.b", "a.b.c", "a.b"], OnConflict::Raise)
        .unwrap();
    assert_eq!(tree.len(), 3);

    // A foreign root is skipped when ignoring.
    tree.append_all(["c.d", "a.e"], OnConflict::Ignore).unwrap();
    assert_eq!(leaves(&tree), ["a.b.c", "a.e"]);

    tree.append_all(Vec::<String>::new(), OnConflict::Raise)
        .unwrap();
    assert_eq!(tree.len(), 4);
}

#[test]
fn parents_and_children() {
    let tree = tree_of(&["a.x.a", "a.b"]);
    assert_eq!(
        tree.parent(&NodeRef::name("a")),
        Some(Parents::Many(vec!["".into(), "a.x".into()]))
    );
    assert_eq!(tree.parent(&NodeRef::path("a")), None);
    assert_eq!(
        tree.parent(&NodeRef::path("a.x.a")),
        Some(Parents::Single("a.x".into()))
    );
    assert_eq!(tree.parent(&NodeRef::path("a.y")), None);

    let expected = [
        ("a".to_string(), vec!["b".to_string(), "x".to_string()]),
        ("a.x.a".to_string(), vec![]),
    ];
    assert_eq!(
        tree.children(&NodeRef::name("a")),
        Some(Children::Many(expected.into_iter().collect()))
    );
    assert_eq!(tree.children(&NodeRef::name("q")), None);
}

#[test]
fn replace_moves_the_subtree() {
    let mut tree = tree_of(&["a.b.c.d", "a.e"]);
    assert_eq!(
        tree.replace(&NodeRef::path("a.b"), "z", OnConflict::Raise),
        Ok(true)
    );
    assert_eq!(leaves(&tree), ["a.e", "a.z.c.d"]);
    assert!(!tree.contains_path("a.b.c"));
    assert_eq!(
        tree.children(&NodeRef::path("a")),
        Some(Children::Single(vec!["e".into(), "z".into()]))
    );
    assert_eq!(tree.len(), 5);

    assert_eq!(
        tree.replace(&NodeRef::name("a"), "r", OnConflict::Raise),
        Ok(true)
    );
    assert_eq!(tree.root(), Some("r"));
    assert_eq!(leaves(&tree), ["r.e", "r.z.c.d"]);
}

#[test]
fn replace_nested_names() {
    let mut tree = tree_of(&["a.c.c.x"]);
    assert_eq!(
        tree.replace(&NodeRef::name("c"), "e", OnConflict::Raise),
        Ok(true)
    );
    assert_eq!(leaves(&tree), ["a.e.e.x"]);
    assert_eq!(tree.len(), 4);
}

#[test]
fn replace_conflicts() {
    let mut tree = tree_of(&["a.b", "a.c"]);
    assert_eq!(
        tree.replace(&NodeRef::path("a.b"), "c", OnConflict::Raise),
        Err(TreeError::PathAlreadyExists {
            path: "a.c".into()
        })
    );
    assert_eq!(
        tree.replace(&NodeRef::path("a.b"), "c", OnConflict::Ignore),
        Ok(false)
    );
    assert_eq!(
        tree.replace(&NodeRef::name("q"), "c", OnConflict::Raise),
        Err(TreeError::NodeNotFound { target: "q".into() })
    );
    assert_eq!(
        tree.replace(&NodeRef::name("b"), "", OnConflict::Raise),
        Err(TreeError::InvalidLabel { label: "".into() })
    );
    assert_eq!(leaves(&tree), ["a.b", "a.c"]);
}

#[test]
fn leaves_by_length() {
    let tree = tree_of(&["r.aaa", "r.b.c", "r.dd", "r.ee"]);
    assert_eq!(
        tree.leaves(SortMode::Length, false),
        ["r.aaa", "r.b.c", "r.dd", "r.ee"]
    );
    assert_eq!(
        tree.leaves(SortMode::Length, true),
        ["r.dd", "r.ee", "r.aaa", "r.b.c"]
    );
}

#[test]
fn always_raise_overrides_ignore() {
    let mut tree = PathTree::with_config(TreeConfig::new().always_raise(true)).unwrap();
    tree.try_append("a", None).unwrap();
    assert!(tree.append("b", None, OnConflict::Ignore).is_err());
    assert!(tree
        .replace(&NodeRef::name("q"), "c", OnConflict::Ignore)
        .is_err());

    assert!(tree.remove(&NodeRef::name("a"), RemoveMode::RemoveAll));
    assert!(tree.raise_error_mode());
    tree.clear();
    assert!(!tree.raise_error_mode());
}

#[test]
fn delimiter_change_rewrites_paths() {
    let mut tree = tree_of(&["a.b.c", "a.d"]);
    tree.set_delimiter("/").unwrap();
    assert_eq!(leaves(&tree), ["a/b/c", "a/d"]);
    assert_eq!(tree.node_ref("a/b"), NodeRef::path("a/b"));
    assert_eq!(tree.node_ref("a.b"), NodeRef::name("a.b"));

    assert_eq!(
        tree.set_delimiter(""),
        Err(TreeError::InvalidDelimiter {
            delimiter: "".into()
        })
    );
    // "b" is a label, so it cannot become the delimiter.
    let before = tree.clone();
    assert_eq!(
        tree.set_delimiter("b"),
        Err(TreeError::InvalidDelimiter {
            delimiter: "b".into()
        })
    );
    assert_eq!(tree, before);
}

#[test]
fn config_with_default_root() {
    let mut tree =
        PathTree::with_config(TreeConfig::new().delimiter("/").default_root(true)).unwrap();
    assert_eq!(tree.root(), Some("root"));
    tree.try_append("x", Some(&NodeRef::name("root"))).unwrap();
    assert!(tree.contains_path("root/x"));

    assert_eq!(
        PathTree::with_config(TreeConfig::new().delimiter("")),
        Err(TreeError::InvalidDelimiter {
            delimiter: "".into()
        })
    );
}

#[test]
fn breadth_first_order() {
    let tree = tree_of(&["a.b.c", "a.d"]);
    let expected: Vec<(usize, String)> = vec![
        (0, "a".into()),
        (1, "a.b".into()),
        (1, "a.d".into()),
        (2, "a.b.c".into()),
    ];
    assert_eq!(tree.breadth_first(), expected);
}
