use uri_components::{pct_enc::Charset, UriComponents, UriComponentsBuilder, UriErrorKind};

fn build(s: &str) -> UriComponents {
    UriComponentsBuilder::from_uri_string(s)
        .unwrap()
        .build(false)
        .unwrap()
}

#[test]
fn encode() {
    let c = UriComponentsBuilder::new()
        .scheme("http")
        .user_info("j\u{f6}rg:p@ss")
        .host("b\u{fc}cher.example")
        .path("/a b;c=d/\u{e9}")
        .query_param("q", ["x&y=z", "100%"])
        .query_param("k ey", ["v"])
        .fragment("sec tion")
        .build(false)
        .unwrap()
        .encode();

    assert!(c.is_encoded());
    assert_eq!(c.user_info(), Some("j%C3%B6rg:p%40ss"));
    assert_eq!(c.host(), Some("b%C3%BCcher.example"));
    assert_eq!(c.path().as_deref(), Some("/a%20b;c=d/%C3%A9"));
    assert_eq!(c.query().as_deref(), Some("q=x%26y%3Dz&q=100%25&k%20ey=v"));
    assert_eq!(c.fragment(), Some("sec%20tion"));
}

#[test]
fn encode_is_idempotent() {
    for case in [
        "http://example.com/a b/%41?q=%20 x%zz#frag ment",
        "https://user@h/{path}/\u{263a}?a=1&b",
        "/already%20encoded",
    ] {
        let once = build(case).encode();
        let twice = once.encode();
        assert_eq!(twice, once, "{case}");

        // Also when the encoded flag is dropped.
        let reparsed = build(&once.to_uri_string()).encode();
        assert_eq!(reparsed.to_uri_string(), once.to_uri_string(), "{case}");
    }
}

#[test]
fn encode_templates_and_ports() {
    let c = build("http://{host}:{port}/{id}").encode();
    assert_eq!(c.to_uri_string(), "http://%7Bhost%7D:%7Bport%7D/%7Bid%7D");
    assert_eq!(c.port(), Some("%7Bport%7D"));
    assert_eq!(c.port_number(), None);
    assert_eq!(c.encode(), c);

    // An encoded port is accepted as encoded, but is still not a valid URI port.
    let c = UriComponentsBuilder::new()
        .host("h")
        .port("%7Bport%7D")
        .build(true)
        .unwrap();
    assert!(c.is_encoded());
    assert!(c.to_uri().is_err());

    let c = build("http://h:8080/").encode();
    assert_eq!(c.port_number(), Some(8080));
}

#[test]
fn encode_ip_literal() {
    let c = build("http://[2001:db8::1]:8080/").encode();
    assert_eq!(c.host(), Some("[2001:db8::1]"));
    assert_eq!(c.to_uri_string(), "http://[2001:db8::1]:8080/");
}

#[test]
fn encode_latin1() {
    let c = UriComponentsBuilder::from_path("/\u{e9}t\u{e9}")
        .query_param("euro", ["\u{20ac}"])
        .build(false)
        .unwrap()
        .encode_with(Charset::Latin1);
    assert_eq!(c.to_uri_string(), "/%E9t%E9?euro=%3F");
}

#[test]
fn encode_opaque_is_identity() {
    let c = build("mailto:a b@example.com");
    assert_eq!(c.encode(), c);
    assert!(!c.encode().is_encoded());
}

#[test]
fn normalize() {
    let c = build("http://h/a/b/../c/./d").normalize();
    assert_eq!(c.path().as_deref(), Some("/a/c/d"));

    let c = build("http://h/../a").normalize();
    assert_eq!(c.path().as_deref(), Some("/../a"));

    let c = build("http://h/a/b/..?x#y").normalize();
    assert_eq!(c.to_uri_string(), "http://h/a/?x#y");

    // The whole path is normalized, across path parts.
    let c = UriComponentsBuilder::from_path("/a/b")
        .path_segment(&["..", "c"])
        .build(false)
        .unwrap()
        .normalize();
    assert_eq!(c.path().as_deref(), Some("/a/c"));

    let c = build("http://h").normalize();
    assert_eq!(c.path(), None);

    let c = build("urn:a/../b");
    assert_eq!(c.normalize(), c);
}

#[test]
fn normalize_keeps_encoded_flag() {
    let c = UriComponentsBuilder::from_path("/a/./b")
        .build(true)
        .unwrap()
        .normalize();
    assert!(c.is_encoded());
    assert_eq!(c.path().as_deref(), Some("/a/b"));
}

#[test]
fn to_uri() {
    let uri = build("https://example.com/a b?q=\u{e9}#f g").to_uri().unwrap();
    assert_eq!(uri.as_str(), "https://example.com/a%20b?q=%C3%A9#f%20g");
    assert_eq!(uri.path(), Some("/a%20b"));

    let uri = UriComponentsBuilder::from_uri_string("http://example.com/%7Bx%7D")
        .unwrap()
        .build(true)
        .unwrap()
        .to_uri()
        .unwrap();
    assert_eq!(uri.as_str(), "http://example.com/%7Bx%7D");

    let uri = build("mailto:a b@example.com#x y").to_uri().unwrap();
    assert_eq!(uri.as_str(), "mailto:a%20b@example.com#x%20y");
    assert!(uri.is_opaque());

    let e = build("{scheme}://example.com/").to_uri().unwrap_err();
    assert_eq!(e.kind(), UriErrorKind::InvalidUri);
}

#[test]
fn structural_equality() {
    assert_eq!(build("http://h/p?a=1"), build("HTTP://h/p?a=1"));
    assert_ne!(build("http://h/p?a=1"), build("http://h/p?a=2"));
    assert_ne!(build("http://h/p").encode(), build("http://h/p"));
}
