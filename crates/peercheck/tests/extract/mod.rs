/// Extraction tests against on-disk peer list fixtures
pub mod tree_tests;
