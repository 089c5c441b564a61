//! Burst detection
//!
//! Two independent ways to find a burst in a received signal:
//!
//! * [`estimate_changepoint()`] locates the jump in received
//!   power where a burst rises out of the noise. It works on
//!   samples and needs no demodulation.
//!
//! * The [`PreambleCorrelator`] searches demodulated bits for the
//!   burst's sync sequence. It reports the bit position of the
//!   burst and copies out its detection block.

mod changepoint;
mod correlator;

pub use changepoint::{estimate_changepoint, estimate_changepoint_waveform};
pub use correlator::{DetectionResult, PreambleCorrelator};
