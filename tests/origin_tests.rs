#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]

/// Origin derivation and identity tests
use gurl::{Gurl, Origin, UnguessableToken};
use std::collections::HashSet;

#[test]
fn test_opaque_origins_are_unique() {
    let a = Origin::create_opaque();
    let b = Origin::create_opaque();

    assert_ne!(a, b);
    for origin in [&a, &b] {
        assert!(origin.is_opaque());
        assert_eq!(origin.scheme(), "");
        assert_eq!(origin.host(), "");
        assert_eq!(origin.port(), 0);
        assert_eq!(origin.to_string(), "null");
    }
    assert_eq!(a, a.clone());
}

#[test]
fn test_tuple_origin_from_url() {
    let origin = Gurl::new("https://user:pw@www.example.com/path?q#f").origin();
    assert!(!origin.is_opaque());
    assert_eq!(origin.scheme(), "https");
    assert_eq!(origin.host(), "www.example.com");
    assert_eq!(origin.port(), 443);
    assert_eq!(origin.to_string(), "https://www.example.com:443");
}

#[test]
fn test_explicit_port() {
    let origin = Origin::create(&Gurl::new("http://example.com:8080/"));
    assert_eq!(origin.port(), 8080);
    assert_eq!(origin, Origin::tuple("http", "example.com", 8080));
}

#[test]
fn test_same_origin_urls() {
    let a = Gurl::new("https://example.com/a").origin();
    let b = Gurl::new("https://example.com:443/b?x").origin();
    let c = Gurl::new("http://example.com/a").origin();
    assert!(a.is_same_origin_with(&b));
    assert_ne!(a, c);

    let set: HashSet<Origin> = [a, b, c].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn test_opaque_for_data_and_invalid_urls() {
    let data = Gurl::new("data:text/html,<p>hi</p>");
    let first = data.origin();
    let second = data.origin();
    assert!(first.is_opaque());
    // Every derivation mints a new token
    assert_ne!(first, second);

    assert!(Gurl::new("not a url").origin().is_opaque());
    assert!(Gurl::empty().origin().is_opaque());
}

#[test]
fn test_file_origin() {
    let origin = Gurl::new("file:///etc/hosts").origin();
    assert!(!origin.is_opaque());
    assert_eq!(origin.scheme(), "file");
    assert_eq!(origin.host(), "");
    assert_eq!(origin.port(), 0);
}

#[test]
fn test_file_origin_keeps_server_host() {
    let a = Gurl::new("file://server-a/share/x").origin();
    let b = Gurl::new("file://server-b/share/x").origin();
    assert!(!a.is_opaque());
    assert_eq!(a, Origin::tuple("file", "server-a", 0));
    assert_ne!(a, b);
    assert_ne!(a, Gurl::new("file:///share/x").origin());
}

#[test]
fn test_blob_origin_is_inner_origin() {
    let origin = Gurl::new("blob:https://example.com/0b3c4d5e").origin();
    assert_eq!(origin, Origin::tuple("https", "example.com", 443));
}

#[test]
fn test_filesystem_origin_is_inner_origin() {
    let origin = Gurl::new("filesystem:http://example.com:81/temporary/a").origin();
    assert_eq!(origin, Origin::tuple("http", "example.com", 81));
}

#[test]
fn test_ipv6_origin() {
    let origin = Gurl::new("http://[::1]:3000/").origin();
    assert_eq!(origin.host(), "[::1]");
    assert_eq!(origin.to_string(), "http://[::1]:3000");
}

#[test]
fn test_wire_round_trip() {
    let original = Origin::create_opaque();
    let token = original.token().unwrap();
    let rebuilt = Origin::from_parts("", "", 0, true, token.high(), token.low()).unwrap();
    assert_eq!(rebuilt, original);

    let tuple = Origin::from_parts("https", "example.com", 443, false, 0, 0).unwrap();
    assert_eq!(tuple, Gurl::new("https://example.com").origin());
}

#[test]
fn test_opaque_origin_ignores_stored_tuple_in_accessors_but_not_equality() {
    let token = UnguessableToken::create();
    let with_precursor =
        Origin::from_parts("https", "example.com", 443, true, token.high(), token.low()).unwrap();
    let bare = Origin::opaque(token);

    assert_eq!(with_precursor.host(), "");
    assert_eq!(with_precursor.to_string(), "null");
    assert_ne!(with_precursor, bare);
}
