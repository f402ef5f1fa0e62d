#![no_main]

use libfuzzer_sys::fuzz_target;
use rhombus_plotter::{decode, encode, TableFormat};

fuzz_target!(|data: &[u8]| {
    for format in [TableFormat::Text, TableFormat::Binary, TableFormat::Json] {
        let Ok(table) = format.parse(data) else {
            continue;
        };
        if let Ok(commands) = decode(&table) {
            let reencoded = encode(&commands).expect("decoded commands must re-encode");
            assert_eq!(reencoded.rows, table.rows);
        }
    }
});
