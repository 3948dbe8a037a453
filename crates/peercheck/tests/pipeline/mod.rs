/// End-to-end probe and report tests
pub mod probe_tests;

/// QUIC peers serving self-signed certificates
pub mod quic_tests;
