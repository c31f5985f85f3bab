mod proptest_regexp;

use crate::regexp::RegexpOptions;

pub(super) fn options(min_length: usize, max_length: usize, max_results: usize) -> RegexpOptions {
    RegexpOptions {
        min_length,
        max_length,
        max_results,
        user_list_1: String::new(),
        user_list_2: String::new(),
    }
}
