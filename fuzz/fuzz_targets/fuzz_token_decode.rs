#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Handoff tokens and mini-app payloads come from untrusted clients; both
    // decoders must reject arbitrary input without panicking.
    let _ = pond_core::codec::decode(data);
    let _ = pond_core::codec::parse_mini_app(data);
});
