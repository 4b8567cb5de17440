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

    let n1 = c.normalize();
    // `normalize` is idempotent.
    assert_eq!(n1.normalize(), n1);
});
