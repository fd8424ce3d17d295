//! Integration tests for public suffix lookups, using the rules of the
//! upstream list's own examples and the bundled snapshot.

use tld_tree::{
    build_tree, get_public_suffix, FnPreparer, SuffixList, SuffixListOptions, TreeNode,
};

/// Rules exercising plain, multi-level, private, wildcard and exception entries
fn sample_list() -> SuffixList {
    SuffixList::new(build_tree([
        "com",
        "com.au",
        "au",
        "de",
        "com.de",
        "github.io",
        "*.ck",
        "!www.ck",
    ]))
}

fn check(list: &SuffixList, domain: &str, expected: Option<&str>) {
    assert_eq!(
        list.public_suffix(Some(domain)).as_deref(),
        expected,
        "public suffix of {:?}",
        domain
    );
}

#[test]
fn test_basic_suffixes() {
    let list = sample_list();
    check(&list, "a.b.com", Some(".com"));
    check(&list, "b.com.au", Some(".com.au"));
    check(&list, "com.au", Some(".au"));
    check(&list, "a.b.de", Some(".de"));
}

#[test]
fn test_unknown_suffixes() {
    let list = sample_list();
    check(&list, "a.b.blob", None);
    check(&list, "b.com.yx", None);
}

#[test]
fn test_none_input() {
    let list = sample_list();
    assert_eq!(list.public_suffix(None), None);
    assert_eq!(get_public_suffix(None), None);
}

#[test]
fn test_second_level_needs_three_labels() {
    let list = sample_list();
    check(&list, "a.b.com.de", Some(".com.de"));
    check(&list, "com.de", Some(".de"));
}

#[test]
fn test_single_label() {
    let list = sample_list();
    check(&list, "localhost", Some(""));
    check(&list, "foo", Some(""));
    check(&list, "false", Some(""));
}

#[test]
fn test_wildcards() {
    let list = sample_list();
    check(&list, "a.foo.ck", Some(".foo.ck"));
    check(&list, "com.ck", None);
}

#[test]
fn test_excluded_wildcards() {
    let list = sample_list();
    check(&list, "www.ck", Some(".ck"));
    check(&list, "a.www.ck", Some(".ck"));
}

#[test]
fn test_company_second_level() {
    let list = sample_list();
    check(&list, "a.github.io", Some(".github.io"));
}

#[test]
fn test_identity_on_output() {
    let list = sample_list();
    for suffix in [".com", ".com.au", ".foo.ck", ".github.io"] {
        check(&list, suffix, Some(suffix));
    }
}

#[test]
fn test_tree_shape() {
    let list = sample_list();
    let root = list.tree().root();

    assert_eq!(root.child("com"), Some(&TreeNode::Terminal));
    assert!(root.child("de").unwrap().is_terminal());
    assert_eq!(root.child("de").unwrap().child("com"), Some(&TreeNode::Terminal));

    let ck = root.child("ck").unwrap();
    assert!(!ck.is_terminal());
    assert!(ck.exceptions().unwrap().contains("www"));
    assert_eq!(list.tree().rule_count(), 8);
}

#[test]
fn test_punycode_through_custom_preparer() {
    // the list holds the ASCII form, queries may use the Unicode form
    let preparer = FnPreparer::new(|label: &str| match label {
        "游戏" => "xn--unup4y".to_string(),
        other => other.to_ascii_lowercase(),
    });
    let options = SuffixListOptions::new().with_preparer(preparer);
    let list = SuffixList::from_text("xn--unup4y\n", options);

    check(&list, "a.xn--unup4y", Some(".xn--unup4y"));
    check(&list, "a.游戏", Some(".游戏"));
}

#[test]
fn test_bundled_list() {
    let cases = [
        ("www.example.com", Some(".com")),
        ("www.example.co.uk", Some(".co.uk")),
        ("example.uk", Some(".uk")),
        ("foo.bar.sch.uk", Some(".bar.sch.uk")),
        ("a.b.kawasaki.jp", Some(".b.kawasaki.jp")),
        ("city.kawasaki.jp", Some(".kawasaki.jp")),
        ("www.city.kawasaki.jp", Some(".kawasaki.jp")),
        ("a.b.er", Some(".b.er")),
        ("me.github.io", Some(".github.io")),
        ("project.pages.dev", Some(".pages.dev")),
        ("Example.COM", Some(".COM")),
        ("a.\u{6e38}\u{620f}", Some(".\u{6e38}\u{620f}")),
        ("www.example.es", Some(".es")),
        ("www.example.it", Some(".it")),
        ("www.example.se", Some(".se")),
        ("my.example.app", Some(".app")),
        ("www.example.co", Some(".co")),
        ("example.invalid", None),
        ("localhost", Some("")),
    ];
    for (domain, expected) in cases {
        assert_eq!(
            get_public_suffix(Some(domain)).as_deref(),
            expected,
            "public suffix of {:?}",
            domain
        );
    }
}

#[test]
fn test_bundled_list_without_private_section() {
    let text = include_str!("../data/public_suffix_list.dat");
    let list = SuffixList::from_text(text, SuffixListOptions::new().with_private_domains(false));

    check(&list, "me.github.io", Some(".io"));
    check(&list, "a.blogspot.co.uk", Some(".co.uk"));
    check(&list, "a.b.com.de", Some(".de"));
}

#[test]
fn test_bundled_list_is_complete() {
    let list = tld_tree::default_list();
    assert!(list.tree().rule_count() > 9000, "{}", list.tree().rule_count());

    for domain in [
        "www.example.es",
        "www.example.it",
        "www.example.se",
        "my.example.app",
        "www.example.co",
    ] {
        let host = tld_tree::parse_host_strict(domain).unwrap();
        assert_eq!(host.name, "example", "{}", domain);
    }
}
