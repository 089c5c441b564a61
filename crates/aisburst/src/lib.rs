//! # aisburst: AIS Burst Physical Layer
//!
//! This crate models the physical layer of the
//! [Automatic Identification System](https://en.wikipedia.org/wiki/Automatic_identification_system)
//! (AIS). It can build a complete AIS burst from a position report,
//! modulate it to complex baseband, pass it through a noisy channel,
//! and then find, demodulate, and decode it again.
//!
//! ## Disclaimer
//!
//! This crate is dual-licensed MIT and Apache 2.0. Read these licenses
//! carefully as they may affect your rights.
//!
//! This crate is a simulation and research tool. It is not a
//! certified AIS transponder and must not be used for navigation
//! or collision avoidance.
//!
//! ## Example
//!
//! A complete link is built from three parts: a transmitter, a
//! channel, and a receiver. All three are created through
//! builders.
//!
//! ```
//! use aisburst::{AisFrame, ChannelBuilder, GmskBuilder, ReceiverBuilder};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! // a Type 1 position report: type, MMSI, longitude,
//! // latitude, course over ground
//! let frame = AisFrame::new(1, 305323000, -6.233335, 47.99603, 25.3).unwrap();
//!
//! // modulate at 9600 baud with ten samples per symbol
//! let gmsk = GmskBuilder::default();
//! let burst = gmsk.build_transmitter().transmit_frame(&frame).unwrap();
//!
//! // add noise at 30 dB SNR, with a random carrier phase
//! let mut channel = ChannelBuilder::new(30.0)
//!     .with_random_phase(true)
//!     .build(StdRng::seed_from_u64(7));
//! let received = channel.propagate(&burst).unwrap();
//!
//! // find and decode the burst
//! let receiver = ReceiverBuilder::default().with_gmsk(&gmsk).build().unwrap();
//! let rx = receiver
//!     .receive(&received.samples)
//!     .unwrap()
//!     .expect("no burst found");
//!
//! assert!(rx.decoded.crc_ok);
//! assert_eq!(305323000, rx.decoded.frame.mmsi());
//! ```
//!
//! The receiver works on one burst at a time. Each call to
//! [`AisReceiver::receive()`] searches the entire signal for the
//! best match to the burst's sync sequence.
//!
//! The individual stages are also available:
//!
//! * **Framing codec.** [`encode()`] turns a payload into line
//!   levels, ready for the modulator, and [`decode()`] reverses it.
//!   The codec steps are public too: [`flip_byte_bits()`],
//!   [`append_crc()`], [`stuff()`], [`frame()`], and
//!   [`line_encode()`], with their inverses.
//!
//! * **Payload armoring.** AIS payloads are commonly exchanged as
//!   `!AIVDM` sentences. Use [`payload_field()`] and [`unpack6bit()`]
//!   to recover the bits, and [`pack6bit()`] and [`format_sentence()`]
//!   to produce a sentence.
//!
//! * **Modem.** The [`GmskModulator`] and [`GmskDemodulator`] are built
//!   from a [`GmskBuilder`].
//!
//! * **Channel.** The [`ChannelModel`] adds white Gaussian noise and,
//!   optionally, a random phase and position in a longer buffer.
//!
//! * **Detection.** The [`PreambleCorrelator`] finds the sync sequence
//!   in demodulated bits. [`estimate_changepoint()`] finds where the
//!   received power rises, without demodulating.
//!
//! Recorded baseband may be loaded with [`parse_iq_text()`].
//!
//! ## Background
//!
//! AIS transponders on ships report their identity, position, and
//! course on two VHF channels near 162 MHz. Each report is a short
//! burst, one 26.7 ms slot long, sent at 9600 baud.
//!
//! Bursts are HDLC-framed. A burst begins with a ramp-up period and
//! an alternating training sequence, then a start flag. The data is
//! protected by a CRC-16 and bit-stuffed so that the flag never
//! appears inside it. An end flag and a short buffer close the burst.
//! The whole sequence is NRZI-coded and then modulated with Gaussian
//! minimum-shift keying (GMSK) at a bandwidth-time product of 0.4.

mod bits;
mod builder;
mod channel;
mod codec;
mod demod;
mod detect;
mod error;
mod filter;
mod iq;
mod modulate;
mod receiver;
mod transmitter;

pub mod waveform;

pub use bits::BitVector;
pub use builder::{ChannelBuilder, GmskBuilder, ReceiverBuilder};
pub use channel::{ChannelModel, ChannelOutput};
pub use codec::{
    append_crc, compute_crc16, decode, decode_stuffed, deframe, delimit_frame, destuff, encode,
    encode_sentence, extract_fields, flip_byte_bits, flip_byte_bits_truncating, format_sentence,
    frame, line_decode, line_encode, pack6bit, payload_field, split_crc, stuff, unpack6bit,
    AisFrame, DecodedFrame, NavigationStatus, CRC_BITS,
};
pub use demod::GmskDemodulator;
pub use detect::{
    estimate_changepoint, estimate_changepoint_waveform, DetectionResult, PreambleCorrelator,
};
pub use error::AisError;
pub use iq::parse_iq_text;
pub use modulate::GmskModulator;
pub use receiver::{AisReceiver, ReceivedBurst};
pub use transmitter::AisTransmitter;
