#![no_main]
use libfuzzer_sys::fuzz_target;
use uri_components::UriComponentsBuilder;

fuzz_target!(|data: &str| {
    let Ok(b) = UriComponentsBuilder::from_uri_string(data) else {
        return;
    };
    let Ok(c) = b.build(false) else {
        return;
    };

    let s = c.encode().to_uri_string();

    // An encoded port template no longer parses as a port.
    let Ok(b) = UriComponentsBuilder::from_uri_string(&s) else {
        return;
    };
    let again = b.build(false).unwrap().encode();
    assert_eq!(again.to_uri_string(), s);
});
