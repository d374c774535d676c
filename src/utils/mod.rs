pub mod format_utils;
pub mod progress_utils;
pub mod test_utils;
