//! End-to-end scenarios against the public `Tree` API: building a small
//! tree, finalizing it, and checking both the logical lookups and the
//! packed byte output they produce.

use iptree::{IpVersion, SequentialDataWriter, Tree};

#[test]
fn single_v4_slash_24_insert_has_a_node_per_prefix_bit() {
    let mut tree: Tree<u32, &str> = Tree::new(IpVersion::V4, 24, 0).unwrap();
    tree.insert("1.2.3.0", 24, 0, "alpha").unwrap();
    tree.finalize();
    assert_eq!(tree.node_count(), 24);
    assert!(tree.contains("1.2.3.0", 24).unwrap());
    assert_eq!(tree.lookup_host("1.2.3.200").unwrap(), Some(&"alpha"));
    assert_eq!(tree.lookup_host("1.2.4.1").unwrap(), None);
}

#[test]
fn same_key_on_both_slash_25_halves_merges_into_a_slash_24() {
    let mut tree: Tree<u32, &str> = Tree::new(IpVersion::V4, 24, 0).unwrap();
    tree.insert("10.0.0.0", 25, 7, "same").unwrap();
    tree.insert("10.0.0.128", 25, 7, "same").unwrap();
    tree.finalize();

    // The merge collapses the pair of /25 leaves one level up, onto the
    // record a plain single /24 insert would have used: same node count,
    // and `contains` (which reports non-empty along the path, not an
    // exact-depth match) is true at every depth that was ever touched.
    assert_eq!(tree.node_count(), 24);
    assert!(tree.contains("10.0.0.0", 25).unwrap());
    assert!(tree.contains("10.0.0.128", 25).unwrap());
    assert!(tree.contains("10.0.0.0", 24).unwrap());
    assert_eq!(tree.lookup_host("10.0.0.1").unwrap(), Some(&"same"));
    assert_eq!(tree.lookup_host("10.0.0.200").unwrap(), Some(&"same"));
}

#[test]
fn distinct_keys_on_sibling_slash_25_halves_do_not_merge() {
    let mut tree: Tree<u32, &str> = Tree::new(IpVersion::V4, 24, 0).unwrap();
    tree.insert("10.0.0.0", 25, 1, "left-half").unwrap();
    tree.insert("10.0.0.128", 25, 2, "right-half").unwrap();
    tree.finalize();

    // One more level of real structure survives than in the merged case,
    // since the two halves keep distinct leaves instead of collapsing.
    assert_eq!(tree.node_count(), 25);
    assert!(tree.contains("10.0.0.0", 25).unwrap());
    assert!(tree.contains("10.0.0.128", 25).unwrap());
    assert_eq!(tree.lookup_host("10.0.0.1").unwrap(), Some(&"left-half"));
    assert_eq!(tree.lookup_host("10.0.0.200").unwrap(), Some(&"right-half"));
}

#[test]
fn v6_tree_aliases_v4_mapped_and_6to4_forms_to_the_same_data() {
    let mut tree: Tree<u32, &str> = Tree::new(IpVersion::V6, 28, 0).unwrap();
    tree.insert("203.0.113.0", 24, 42, "example-net").unwrap();
    tree.alias_ipv4_subtree().unwrap();

    assert_eq!(tree.lookup_host("::ffff:203.0.113.5").unwrap(), Some(&"example-net"));
    assert_eq!(tree.lookup_host("2002:cb00:7100::1").unwrap(), Some(&"example-net"));
    assert_eq!(tree.lookup_host("203.0.113.5").unwrap(), Some(&"example-net"));
    assert_eq!(tree.lookup_host("::cafe").unwrap(), None);
}

#[test]
fn alias_is_a_no_op_without_any_v4_data() {
    let mut tree: Tree<u32, &str> = Tree::new(IpVersion::V6, 28, 0).unwrap();
    tree.insert("2001:db8::", 32, 1, "doc-range").unwrap();
    tree.alias_ipv4_subtree().unwrap();
    assert_eq!(tree.lookup_host("::ffff:1.2.3.4").unwrap(), None);
    assert_eq!(tree.lookup_host("2001:db8::1").unwrap(), Some(&"doc-range"));
}

#[test]
fn delete_reserved_networks_removes_private_ranges_but_not_public_ones() {
    let mut tree: Tree<u32, &str> = Tree::new(IpVersion::V4, 24, 0).unwrap();
    tree.insert("10.0.0.0", 8, 1, "private").unwrap();
    tree.insert("8.8.8.0", 24, 2, "public-dns").unwrap();

    tree.delete_reserved_networks().unwrap();

    assert_eq!(tree.lookup_host("10.1.2.3").unwrap(), None);
    assert_eq!(tree.lookup_host("8.8.8.8").unwrap(), Some(&"public-dns"));
}

#[test]
fn delete_reserved_networks_on_a_v6_tree_covers_mapped_v4_space_too() {
    let mut tree: Tree<u32, &str> = Tree::new(IpVersion::V6, 28, 0).unwrap();
    tree.insert("10.0.0.0", 8, 1, "private").unwrap();
    tree.alias_ipv4_subtree().unwrap();

    tree.delete_reserved_networks().unwrap();

    assert_eq!(tree.lookup_host("::ffff:10.1.2.3").unwrap(), None);
    assert_eq!(tree.lookup_host("fc00::1").unwrap(), None);
}

#[test]
fn delete_removes_an_exact_record_without_merging_siblings() {
    let mut tree: Tree<u32, &str> = Tree::new(IpVersion::V4, 24, 0).unwrap();
    tree.insert("10.0.0.0", 25, 1, "left-half").unwrap();
    tree.insert("10.0.0.128", 25, 2, "right-half").unwrap();

    tree.delete("10.0.0.0", 25).unwrap();

    assert!(!tree.contains("10.0.0.0", 25).unwrap());
    assert!(tree.contains("10.0.0.128", 25).unwrap());
    assert_eq!(tree.lookup_host("10.0.0.1").unwrap(), None);
}

#[test]
fn empty_tree_finalizes_to_a_single_root_node() {
    let mut tree: Tree<u32, &str> = Tree::new(IpVersion::V6, 32, 0).unwrap();
    tree.finalize();
    assert_eq!(tree.node_count(), 1);
}

#[test]
fn write_search_tree_emits_exactly_node_count_times_node_bytes() {
    let mut tree: Tree<u32, &str> = Tree::new(IpVersion::V4, 28, 0).unwrap();
    tree.insert("1.2.3.0", 24, 0, "alpha").unwrap();
    tree.insert("1.2.4.0", 24, 1, "beta").unwrap();
    tree.finalize();

    let mut out = Vec::new();
    let mut writer = SequentialDataWriter::<&str>::new();
    tree.write_search_tree(&mut out, &mut writer).unwrap();

    assert_eq!(out.len(), tree.node_count() as usize * tree.record_size().node_bytes());
    assert_eq!(writer.values().len(), 2);
}

#[test]
fn write_search_tree_before_finalize_is_rejected() {
    let mut tree: Tree<u32, &str> = Tree::new(IpVersion::V4, 24, 0).unwrap();
    tree.insert("1.2.3.0", 24, 0, "alpha").unwrap();

    let mut out = Vec::new();
    let mut writer = SequentialDataWriter::<&str>::new();
    assert!(tree.write_search_tree(&mut out, &mut writer).is_err());
}

#[test]
fn v6_literal_rejected_by_a_v4_tree() {
    let mut tree: Tree<u32, &str> = Tree::new(IpVersion::V4, 24, 0).unwrap();
    assert!(tree.insert("::1", 128, 0, "nope").is_err());
}

#[test]
fn write_search_tree_to_a_real_file() {
    let mut tree: Tree<u32, &str> = Tree::new(IpVersion::V4, 24, 0).unwrap();
    tree.insert("1.2.3.0", 24, 0, "alpha").unwrap();
    tree.finalize();

    let mut file = tempfile::tempfile().unwrap();
    let mut writer = SequentialDataWriter::<&str>::new();
    tree.write_search_tree(&mut file, &mut writer).unwrap();

    use std::io::{Seek, SeekFrom, Read};
    file.seek(SeekFrom::Start(0)).unwrap();
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).unwrap();
    assert_eq!(bytes.len(), tree.node_count() as usize * tree.record_size().node_bytes());
}
