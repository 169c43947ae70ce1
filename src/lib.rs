//! Cross-crate integration tests for the speedup workspace live in `tests/`.
