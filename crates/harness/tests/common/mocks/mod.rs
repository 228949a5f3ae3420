/// Defective circuits wrapping the reference core.
pub mod circuit;

/// Mock waveform sink.
pub mod trace;
