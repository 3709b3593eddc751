#![no_main]

use libfuzzer_sys::fuzz_target;
use pmta_error::{taxonomy, ErrorKind, ErrorSignal, OriginTag};

fuzz_target!(|data: &[u8]| {
    // Name parsing must never panic, and a parsed kind must round-trip
    // through its code.
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(kind) = s.parse::<ErrorKind>() {
            assert_eq!(ErrorKind::from_code(kind.code()), Some(kind));
        }
    }

    // Any code is accepted, declared or not.
    if data.len() >= 8 {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&data[..8]);
        let code = i64::from_le_bytes(raw);
        let signal = ErrorSignal::new(OriginTag::Message, code, "");
        assert_eq!(signal.code(), code);
        assert_eq!(
            signal.kind().is_some(),
            taxonomy::global().name_for_code(code).is_some()
        );
    }
});
