// tests/search_tests.rs

use intcode::search::find_noun_verb;
use intcode::Value;

// [0] = noun + verb
const SUM: [Value; 5] = [1101, 0, 0, 0, 99];

// Runs off into address 100 when noun < verb, otherwise [0] = noun * verb.
const PICKY_PRODUCT: [Value; 12] = [1107, 0, 0, 15, 1005, 15, 100, 2, 1, 2, 0, 99];

#[test]
fn test_first_pair_in_noun_major_order() {
    assert_eq!(find_noun_verb(&SUM, 150), Ok(Some((51, 99))));
    assert_eq!(find_noun_verb(&SUM, 0), Ok(Some((0, 0))));
}

#[test]
fn test_failing_runs_are_skipped() {
    // (0, 1) already fails, so an error would surface long before (4, 3).
    assert_eq!(find_noun_verb(&PICKY_PRODUCT, 12), Ok(Some((4, 3))));
}

#[test]
fn test_no_matching_pair() {
    assert_eq!(find_noun_verb(&SUM, 199), Ok(None));
    assert_eq!(find_noun_verb(&PICKY_PRODUCT, -1), Ok(None));
}

#[test]
fn test_blocked_runs_are_skipped() {
    // Waits for input before ever writing the sum.
    let waiting = [1101, 0, 0, 0, 3, 20, 99];
    assert_eq!(find_noun_verb(&waiting, 10), Ok(None));
}

#[test]
fn test_program_image_is_not_modified() {
    let program = SUM.to_vec();
    find_noun_verb(&program, 150).unwrap();
    assert_eq!(program, SUM.to_vec());
}
