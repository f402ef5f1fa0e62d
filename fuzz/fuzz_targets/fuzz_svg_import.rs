#![no_main]

use libfuzzer_sys::fuzz_target;
use rhombus_plotter::{import_svg, slice, ArmConfig, SvgImportOptions};

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(path) = import_svg(content, &SvgImportOptions::default()) else {
        return;
    };
    let config = ArmConfig::new(200.0, 100.0, 360.0, 2900, 200.0);
    if let Ok(commands) = slice(&path, &config) {
        assert!(commands.len() <= path.len() * 2);
    }
});
