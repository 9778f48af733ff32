//! Tag parser fuzz target: feed arbitrary bytes to the tag parser and the validator.
//! Neither may panic; malformed input must come back as an error.
//! Build with: cargo fuzz run tag_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };
    let _ = tagvalidate::parse_tag(s);
    let record = tagvalidate::Record::new("Fuzz")
        .field("n", Some(s), 7)
        .field("s", Some(s), "seven");
    let _ = tagvalidate::validate(&record);
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run tag_fuzz");
}
