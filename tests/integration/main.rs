//! Integration tests for gaitview.

mod helpers;
mod info_test;
mod playback_test;
