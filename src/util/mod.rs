//! Shared utilities: frame timing and info-text formatting.

/// Once-per-second frame-rate measurement and frame limiting.
pub mod frame_timing;
pub mod overlay;
