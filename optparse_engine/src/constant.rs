pub(crate) const HELP_SPELLING: &str = "--help";
pub(crate) const VERSION_SPELLING: &str = "--version";
pub(crate) const END_OF_OPTIONS: &str = "--";

pub(crate) const EXIT_SUCCESS: i32 = 0;
pub(crate) const EXIT_OPTION_ERROR: i32 = 2;
pub(crate) const EXIT_SPEC_ERROR: i32 = 1;
