#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(d) = pacer_config::parse_duration(data) {
        // Whatever parses must print and re-parse as nanoseconds without panicking.
        let text = format!("{}ns", d.as_nanos());
        let _ = pacer_config::parse_duration(&text);
    }
});
