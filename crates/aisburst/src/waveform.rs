//! AIS burst layout and waveform parameters

/// Baud rate (Hz)
pub const BAUD_HZ: f32 = 9600.0;

/// Default GMSK bandwidth-time product
pub const BT: f32 = 0.4;

/// Zero bits sent while the transmitter ramps up
pub const RAMP_UP_BITS: usize = 8;

/// Alternating training sequence, `0101…01`
///
/// The preamble gives the receiver many level transitions
/// for bit synchronization.
pub const PREAMBLE: u32 = 0x55_5555;

/// Preamble length (bits)
pub const PREAMBLE_BITS: usize = 24;

/// HDLC start and end flag
pub const FLAG: u8 = 0x7E;

/// Flag length (bits)
pub const FLAG_BITS: usize = 8;

/// Zero bits sent after the end flag
pub const BUFFER_BITS: usize = 24;

/// Bits in front of the data: ramp-up, preamble, start flag
pub const HEADER_BITS: usize = RAMP_UP_BITS + PREAMBLE_BITS + FLAG_BITS;

/// Bits after the data: end flag and buffer
pub const TRAILER_BITS: usize = FLAG_BITS + BUFFER_BITS;

/// Preamble and start flag, as a 32-bit word, first bit in the MSB
///
/// Received bits are correlated against this sequence to find
/// the start of a burst.
pub const SYNC_WORD: u32 = (PREAMBLE << FLAG_BITS) | FLAG as u32;

/// Detection block length (bits)
///
/// A Type 1 burst occupies one 256-bit slot.
pub const BLOCK_LEN: usize = 256;

/// Number of payload bits in a Type 1 position report
pub const TYPE1_PAYLOAD_BITS: usize = 168;

#[cfg(test)]
use crate::bits::BitVector;

/// Sync sequence as bits
#[cfg(test)]
pub fn sync_bits() -> BitVector {
    let mut out = BitVector::new();
    out.push_int(SYNC_WORD as i64, PREAMBLE_BITS + FLAG_BITS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_word() {
        assert_eq!(0x5555_557E, SYNC_WORD);
        assert_eq!(
            "010101010101010101010101_01111110"
                .parse::<BitVector>()
                .unwrap(),
            sync_bits()
        );
        assert_eq!(40, HEADER_BITS);
        assert_eq!(32, TRAILER_BITS);
    }
}
