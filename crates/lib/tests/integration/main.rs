mod manifest_tests;
mod needed_tests;
