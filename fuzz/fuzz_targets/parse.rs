#![no_main]
use libfuzzer_sys::fuzz_target;
use uri_components::parse_uri;

fuzz_target!(|data: &str| {
    let Ok(r1) = parse_uri(data) else {
        return;
    };
    if r1.is_opaque {
        assert!(r1.user.is_none() && r1.host.is_none() && r1.port.is_none());
    }

    // Reassembling only drops empty delimiters, so the text parses back the same.
    let r2 = parse_uri(&r1.to_uri_string()).unwrap();
    assert_eq!(r1, r2);
});
