#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfops::ActionSpec;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };

    // Every spec that parses must validate and build an action.
    if let Ok(specs) = ActionSpec::parse_many(json) {
        for spec in specs {
            assert!(spec.validate().is_ok());
            assert!(spec.into_action().is_ok());
        }
    }
});
