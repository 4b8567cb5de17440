#![cfg(feature = "serde")]

use uri_components::{Uri, UriComponents, UriComponentsBuilder};

#[test]
fn uri() {
    let uri = Uri::parse("https://example.com/a?b#c").unwrap();
    let json = serde_json::to_string(&uri).unwrap();
    assert_eq!(json, "\"https://example.com/a?b#c\"");
    assert_eq!(serde_json::from_str::<Uri>(&json).unwrap(), uri);

    assert!(serde_json::from_str::<Uri>("\"http://a b/\"").is_err());
}

#[test]
fn components() {
    let c = UriComponentsBuilder::from_uri_string("http://{host}/x?y=1")
        .unwrap()
        .build(false)
        .unwrap();
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(json, "\"http://{host}/x?y=1\"");
    assert_eq!(serde_json::from_str::<UriComponents>(&json).unwrap(), c);

    assert!(serde_json::from_str::<UriComponents>("\"*\"").is_err());
}
