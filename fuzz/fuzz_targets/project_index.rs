#![no_main]

use cse_core::config::ProjectFormat;
use cse_core::index_project;
use libfuzzer_sys::fuzz_target;

const MAX_PROJECT_BYTES: usize = 64 * 1024;

fuzz_target!(|data: &[u8]| {
    let capped = &data[..data.len().min(MAX_PROJECT_BYTES)];
    let mut buffer = b"CoDeSys+".to_vec();
    buffer.extend_from_slice(capped);

    let format = ProjectFormat::default();
    let first = index_project(&buffer, &format).expect("signature is present");
    let second = index_project(&buffer, &format).expect("signature is present");
    assert_eq!(first, second);
    assert_eq!(first.used_count(), 0);

    let _ = index_project(capped, &format);
});
