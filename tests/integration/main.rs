mod check_test;
mod config_test;
mod exit_codes_test;
mod exposed_test;
mod transform_test;

use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
