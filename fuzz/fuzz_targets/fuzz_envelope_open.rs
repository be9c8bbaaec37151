#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Arbitrary envelope text against the cipher. Corrupt envelopes must
    // come back as errors, never panics.
    let _ = bgeo_vault::open(data, "password");

    // A credential record from an untrusted store must parse safely too.
    let _ = serde_json::from_str::<bgeo_vault::Credential>(data);
});
