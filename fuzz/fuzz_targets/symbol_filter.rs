#![no_main]

use cse_core::config::SymbolFileFormat;
use cse_core::symbols::{QualifiedName, SymbolFilter};
use cse_core::ProjectIndex;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut index = ProjectIndex::new();
    index.push_variable("PLC_PRG", "Counter");
    index.push_variable("", "Alarm");

    let format = SymbolFileFormat::default();
    let mut output = Vec::new();
    let mut copied = 0usize;
    let report = SymbolFilter::new(&format)
        .run(data, &mut index, &mut output, &mut |_: &QualifiedName<'_>| {
            copied += 1;
        })
        .expect("in-memory streams do not fail");

    assert!(output.len() <= data.len());
    assert_eq!(copied, report.copied_lines);
    if !report.start_marker_found {
        assert_eq!(output.as_slice(), data);
    }
});
