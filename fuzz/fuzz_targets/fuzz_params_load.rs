#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use sfxgen_core::codec::{read_params, write_params};

fuzz_target!(|data: &[u8]| {
    let Ok(loaded) = read_params(&mut Cursor::new(data)) else {
        return;
    };

    // anything that loads must survive a save/load cycle bit for bit
    let mut buf = Vec::new();
    if write_params(&loaded.params, &mut buf).is_err() {
        panic!("in-memory write failed");
    }
    let reloaded = match read_params(&mut Cursor::new(&buf)) {
        Ok(r) => r,
        Err(e) => panic!("reload failed: {}", e),
    };
    assert_eq!(reloaded.params.encode_record(), loaded.params.encode_record());
});
