//! End-to-end integration tests for Dexter
//!
//! The tests under `tests/` wire the data-access facade to both backends and
//! the session store to real file storage.
