#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Arbitrary text through the recipient list parser. Malformed lines are
    // skipped, never fatal; nothing here may panic.
    let report = bgeo_recipients::parse(data);

    // Exercise the renderer and a second parse over its output.
    let rendered = report.set.to_text();
    let _ = bgeo_recipients::parse(&rendered);

    // Summing the accepted amounts walks every stored raw string.
    let _ = report.set.total();
});
