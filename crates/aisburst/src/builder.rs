use rand::Rng;

use crate::channel::ChannelModel;
use crate::demod::GmskDemodulator;
use crate::detect::PreambleCorrelator;
use crate::error::AisError;
use crate::modulate::GmskModulator;
use crate::receiver::AisReceiver;
use crate::transmitter::AisTransmitter;
use crate::waveform::{BAUD_HZ, BT};

/// Builds the GMSK modulator and demodulator
///
/// The defaults are the AIS waveform: 9600 baud, ten samples
/// per symbol, a bandwidth-time product of 0.4, and a modulation
/// index of one half. The transmitter and receiver of a link
/// must be built from matching settings.
///
/// ```
/// use aisburst::GmskBuilder;
///
/// let mut builder = GmskBuilder::default();
/// builder.with_upsampling(4);
/// assert_eq!(38400.0, builder.sample_rate());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct GmskBuilder {
    bit_rate: f32,
    upsampling: usize,
    bt: f32,
    filter_length: usize,
    mod_index: f32,
}

impl GmskBuilder {
    /// New GMSK configuration with AIS defaults
    pub fn new() -> Self {
        Self {
            bit_rate: BAUD_HZ,
            upsampling: 10,
            bt: BT,
            filter_length: 1,
            mod_index: 0.5,
        }
    }

    /// Build a modulator
    pub fn build_modulator(&self) -> GmskModulator {
        GmskModulator::from(self)
    }

    /// Build a demodulator
    pub fn build_demodulator(&self) -> GmskDemodulator {
        GmskDemodulator::from(self)
    }

    /// Build a transmitter
    pub fn build_transmitter(&self) -> AisTransmitter {
        AisTransmitter::from(self)
    }

    /// Bit rate (Hz)
    ///
    /// The bit rate must be positive. Leave this at 9600 Hz
    /// for AIS.
    pub fn with_bit_rate(&mut self, rate: f32) -> &mut Self {
        self.bit_rate = f32::max(rate, 1.0);
        self
    }

    /// Samples per symbol
    ///
    /// The sampling rate is `upsampling` times the bit rate.
    /// The demodulator needs at least two samples per symbol.
    pub fn with_upsampling(&mut self, upsampling: usize) -> &mut Self {
        self.upsampling = usize::max(upsampling, 2);
        self
    }

    /// Bandwidth-time product of the Gaussian filter
    ///
    /// Lower values narrow the spectrum but add more
    /// intersymbol interference. AIS uses 0.4 on the air.
    pub fn with_bt(&mut self, bt: f32) -> &mut Self {
        self.bt = f32::clamp(bt, 0.1, 1.0);
        self
    }

    /// Gaussian filter half-length (symbols)
    ///
    /// The filter spans this many symbols on either side of its
    /// peak. Must be at least one.
    pub fn with_filter_length(&mut self, symbols: usize) -> &mut Self {
        self.filter_length = usize::max(symbols, 1);
        self
    }

    /// Modulation index
    ///
    /// A value of 0.5 is minimum-shift keying. Values are
    /// clamped to `[0.1, 1.0]`.
    pub fn with_mod_index(&mut self, h: f32) -> &mut Self {
        self.mod_index = f32::clamp(h, 0.1, 1.0);
        self
    }

    /// Bit rate (Hz)
    pub fn bit_rate(&self) -> f32 {
        self.bit_rate
    }

    /// Samples per symbol
    pub fn upsampling(&self) -> usize {
        self.upsampling
    }

    /// Sampling rate (Hz)
    pub fn sample_rate(&self) -> f32 {
        self.bit_rate * self.upsampling as f32
    }

    /// Bandwidth-time product
    pub fn bt(&self) -> f32 {
        self.bt
    }

    /// Gaussian filter half-length (symbols)
    pub fn filter_length(&self) -> usize {
        self.filter_length
    }

    /// Modulation index
    pub fn mod_index(&self) -> f32 {
        self.mod_index
    }
}

impl std::default::Default for GmskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a noisy channel
///
/// The only mandatory parameter is the signal-to-noise ratio.
/// By default, noise is added sample-for-sample with no phase
/// rotation.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct ChannelBuilder {
    snr_db: f32,
    buffer_len: Option<usize>,
    random_phase: bool,
}

impl ChannelBuilder {
    /// New channel at the given SNR (dB)
    ///
    /// Use `f32::INFINITY` for a noiseless channel.
    pub fn new(snr_db: f32) -> Self {
        Self {
            snr_db,
            buffer_len: None,
            random_phase: false,
        }
    }

    /// Build the channel
    ///
    /// The channel draws all of its noise, phases, and offsets
    /// from `rng`.
    pub fn build<R: Rng>(&self, rng: R) -> ChannelModel<R> {
        ChannelModel::new(self, rng)
    }

    /// Signal-to-noise ratio (dB)
    pub fn with_snr_db(&mut self, snr_db: f32) -> &mut Self {
        self.snr_db = snr_db;
        self
    }

    /// Place the burst within `len` samples of noise
    ///
    /// The burst begins at a uniformly random offset, and the
    /// channel reports the offset with its output.
    pub fn with_buffer_len(&mut self, len: usize) -> &mut Self {
        self.buffer_len = Some(len);
        self
    }

    /// Add noise only over the burst itself
    pub fn without_buffer(&mut self) -> &mut Self {
        self.buffer_len = None;
        self
    }

    /// Rotate each burst by a uniformly random carrier phase
    pub fn with_random_phase(&mut self, enable: bool) -> &mut Self {
        self.random_phase = enable;
        self
    }

    /// Signal-to-noise ratio (dB)
    pub fn snr_db(&self) -> f32 {
        self.snr_db
    }

    /// Noise buffer length (samples)
    pub fn buffer_len(&self) -> Option<usize> {
        self.buffer_len
    }

    /// True if bursts are phase-rotated
    pub fn random_phase(&self) -> bool {
        self.random_phase
    }
}

impl std::default::Default for ChannelBuilder {
    fn default() -> Self {
        Self::new(20.0)
    }
}

/// Builds an AIS burst receiver
///
/// The receiver demodulates with the [`GmskBuilder`] settings,
/// so these must match the transmitter.
///
/// ```
/// use aisburst::ReceiverBuilder;
///
/// let receiver = ReceiverBuilder::default()
///     .with_threshold(28)
///     .build()
///     .unwrap();
/// assert_eq!(28, receiver.threshold());
///
/// assert!(ReceiverBuilder::default().with_threshold(27).build().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct ReceiverBuilder {
    gmsk: GmskBuilder,
    threshold: i32,
    compensate_frequency: bool,
}

impl ReceiverBuilder {
    /// New receiver with default settings
    ///
    /// By default, only an error-free sync sequence is accepted
    /// and no frequency compensation is performed.
    pub fn new() -> Self {
        Self {
            gmsk: GmskBuilder::default(),
            threshold: 32,
            compensate_frequency: false,
        }
    }

    /// Build the receiver
    ///
    /// Fails if the detection threshold is invalid.
    pub fn build(&self) -> Result<AisReceiver, AisError> {
        AisReceiver::try_from(self)
    }

    /// GMSK settings
    pub fn with_gmsk(&mut self, gmsk: &GmskBuilder) -> &mut Self {
        self.gmsk = *gmsk;
        self
    }

    /// Correlator detection threshold
    ///
    /// The threshold is the minimum preamble correlation score.
    /// It must be an even number within `[-32, 32]`. Each step
    /// of two below 32 tolerates one more bit error in the
    /// preamble and start flag. This is checked when the receiver
    /// is built.
    pub fn with_threshold(&mut self, threshold: i32) -> &mut Self {
        self.threshold = threshold;
        self
    }

    /// Estimate and remove a carrier frequency offset
    ///
    /// The estimate assumes that the burst dominates the signal's
    /// power spectrum. Leave this off for signals that are
    /// mostly noise.
    pub fn with_frequency_compensation(&mut self, enable: bool) -> &mut Self {
        self.compensate_frequency = enable;
        self
    }

    /// GMSK settings
    pub fn gmsk(&self) -> &GmskBuilder {
        &self.gmsk
    }

    /// Correlator detection threshold
    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    /// True if frequency compensation is enabled
    pub fn frequency_compensation(&self) -> bool {
        self.compensate_frequency
    }

    // Correlator for the configured threshold
    pub(crate) fn build_correlator(&self) -> Result<PreambleCorrelator, AisError> {
        PreambleCorrelator::new(self.threshold)
    }
}

impl std::default::Default for ReceiverBuilder {
    fn default() -> Self {
        Self::new()
    }
}
