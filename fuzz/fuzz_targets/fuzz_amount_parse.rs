#![no_main]

use bgeo_types::{Address, Amount};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Amounts and addresses take raw user input; parsing must never panic.
    if let Ok(amount) = Amount::parse(data) {
        let _ = amount.value();
        let _ = amount.plus(&amount);
    }

    let _ = Address::parse(data);
});
