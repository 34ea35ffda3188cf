#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Exercise the parenthesized-timestamp parser on arbitrary text
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = billwatch::bill::format_prompt_payment_date(text);
    }
});
