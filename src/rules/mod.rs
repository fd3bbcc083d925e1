// Rules module
// Content rules applied across the scanned tree.

/// Rules for detecting hardcoded secrets and credentials.
pub mod secrets;
