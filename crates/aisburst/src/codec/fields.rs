//! Type 1 position report fields

use std::fmt;
use std::ops::Range;

use rand::Rng;
use strum::EnumMessage;

use crate::bits::BitVector;
use crate::error::AisError;
use crate::waveform::TYPE1_PAYLOAD_BITS;

const MSG_TYPE: Range<usize> = 0..6;
const MMSI: Range<usize> = 8..38;
const NAV_STATUS: Range<usize> = 38..42;
const LONGITUDE: Range<usize> = 61..89;
const LATITUDE: Range<usize> = 89..116;
const COURSE: Range<usize> = 116..128;

/// Position units per degree
const POSITION_SCALE: f64 = 600_000.0;

/// Course units per degree
const COURSE_SCALE: f64 = 10.0;

/// Navigation status of the reporting vessel
///
/// Each Type 1 report carries one of sixteen four-bit status
/// codes. Statuses convert to a human-readable description.
///
/// ```
/// use aisburst::NavigationStatus;
///
/// assert_eq!(NavigationStatus::Moored, NavigationStatus::from_code(5));
/// assert_eq!("moored", format!("{}", NavigationStatus::Moored));
/// assert_eq!("5", format!("{:#}", NavigationStatus::Moored));
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumString,
    strum_macros::EnumIter,
    strum_macros::FromRepr,
)]
#[repr(u8)]
pub enum NavigationStatus {
    #[strum(serialize = "0", detailed_message = "under way using engine")]
    UnderWayUsingEngine = 0,

    #[strum(serialize = "1", detailed_message = "at anchor")]
    AtAnchor = 1,

    #[strum(serialize = "2", detailed_message = "not under command")]
    NotUnderCommand = 2,

    #[strum(serialize = "3", detailed_message = "restricted manoeuverability")]
    RestrictedManoeuverability = 3,

    #[strum(serialize = "4", detailed_message = "constrained by her draught")]
    ConstrainedByDraught = 4,

    #[strum(serialize = "5", detailed_message = "moored")]
    Moored = 5,

    #[strum(serialize = "6", detailed_message = "aground")]
    Aground = 6,

    #[strum(serialize = "7", detailed_message = "engaged in fishing")]
    EngagedInFishing = 7,

    #[strum(serialize = "8", detailed_message = "under way sailing")]
    UnderWaySailing = 8,

    /// Reserved for high-speed craft
    #[strum(serialize = "9", detailed_message = "reserved (HSC)")]
    ReservedHsc = 9,

    /// Reserved for wing-in-ground craft
    #[strum(serialize = "10", detailed_message = "reserved (WIG)")]
    ReservedWig = 10,

    #[strum(serialize = "11", detailed_message = "power-driven vessel towing astern")]
    TowingAstern = 11,

    #[strum(
        serialize = "12",
        detailed_message = "power-driven vessel pushing ahead or towing alongside"
    )]
    PushingAhead = 12,

    #[strum(serialize = "13", detailed_message = "reserved")]
    Reserved = 13,

    /// Search and rescue transponder
    #[strum(serialize = "14", detailed_message = "AIS-SART active")]
    SartActive = 14,

    /// Status not available
    #[strum(serialize = "15", detailed_message = "not defined")]
    NotDefined = 15,
}

impl NavigationStatus {
    /// Convert from a four-bit status code
    ///
    /// Only the low four bits of `code` are used.
    pub fn from_code(code: u8) -> Self {
        Self::from_repr(code & 0x0f).unwrap_or(NavigationStatus::NotDefined)
    }

    /// Four-bit status code
    pub fn as_code(&self) -> u8 {
        *self as u8
    }

    /// Human-readable description, like "`moored`"
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }
}

impl fmt::Display for NavigationStatus {
    /// Printable string
    ///
    /// * The normal form is a description like "`at anchor`"
    /// * The alternate form is the numeric code, like "`1`"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{}", self.as_code())
        } else {
            self.as_display_str().fmt(f)
        }
    }
}

/// Decoded fields of an AIS position report
///
/// Positions are in decimal degrees, with east longitude and
/// north latitude positive. They are quantized to 1/600000 of a
/// degree on the air. The course over ground is in degrees true,
/// quantized to 0.1°.
///
/// Frames built with [`AisFrame::new()`] are range-checked.
/// Frames decoded from the air are not: a frame which fails its
/// checksum may contain anything.
#[derive(Clone, Debug, PartialEq)]
pub struct AisFrame {
    msg_type: u8,
    mmsi: u32,
    longitude: f64,
    latitude: f64,
    course: f64,
    nav_status: NavigationStatus,
}

impl AisFrame {
    /// Create a position report
    ///
    /// Fails with [`AisError::FieldOutOfRange`] unless
    ///
    /// * `msg_type` fits in six bits
    /// * `mmsi` fits in thirty bits
    /// * `longitude` ∈ [-180, 180)
    /// * `latitude` ∈ [-90, 90]
    /// * `course` ∈ [0, 360)
    ///
    /// The bounds apply after quantization, so a course of
    /// 359.96°, which would be sent as 360.0°, is rejected.
    ///
    /// The navigation status is initially
    /// [`NavigationStatus::UnderWayUsingEngine`], which is code
    /// zero.
    pub fn new(
        msg_type: u8,
        mmsi: u32,
        longitude: f64,
        latitude: f64,
        course: f64,
    ) -> Result<Self, AisError> {
        check_range("msg_type", msg_type as f64, 0.0..64.0)?;
        check_range("mmsi", mmsi as f64, 0.0..(1u64 << MMSI.len()) as f64)?;
        check_quantized("longitude", longitude, POSITION_SCALE, -180.0..180.0)?;
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(AisError::FieldOutOfRange {
                field: "latitude",
                value: latitude,
            });
        }
        check_quantized("course", course, COURSE_SCALE, 0.0..360.0)?;

        Ok(Self {
            msg_type,
            mmsi,
            longitude,
            latitude,
            course,
            nav_status: NavigationStatus::UnderWayUsingEngine,
        })
    }

    /// Random position report
    ///
    /// Draws a Type 1 report from `rng`. The MMSI is below
    /// 10<sup>8</sup>, positions are whole thousandths of a
    /// degree, and the course is whole tenths of a degree.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            msg_type: 1,
            mmsi: rng.gen_range(0..100_000_000),
            longitude: rng.gen_range(-180_000..180_000) as f64 / 1000.0,
            latitude: rng.gen_range(-90_000..=90_000) as f64 / 1000.0,
            course: rng.gen_range(0..3600) as f64 / COURSE_SCALE,
            nav_status: NavigationStatus::from_code(rng.gen_range(0..16)),
        }
    }

    /// Set the navigation status
    pub fn with_nav_status(mut self, status: NavigationStatus) -> Self {
        self.nav_status = status;
        self
    }

    /// Message type
    pub fn msg_type(&self) -> u8 {
        self.msg_type
    }

    /// Maritime Mobile Service Identity
    pub fn mmsi(&self) -> u32 {
        self.mmsi
    }

    /// Longitude (degrees east)
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Latitude (degrees north)
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Course over ground (degrees true)
    pub fn course(&self) -> f64 {
        self.course
    }

    /// Navigation status
    pub fn nav_status(&self) -> NavigationStatus {
        self.nav_status
    }

    /// Pack into a 168-bit Type 1 payload
    ///
    /// Fields which `AisFrame` does not model, like speed and
    /// heading, are sent as zero. The output is most significant
    /// bit first and is ready for six-bit armoring.
    pub fn to_payload_bits(&self) -> BitVector {
        let mut out = BitVector::with_capacity(TYPE1_PAYLOAD_BITS);
        out.push_int(self.msg_type as i64, MSG_TYPE.len());
        out.push_int(0, 2); // repeat indicator
        out.push_int(self.mmsi as i64, MMSI.len());
        out.push_int(self.nav_status.as_code() as i64, NAV_STATUS.len());
        out.push_int(0, 8); // rate of turn
        out.push_int(0, 10); // speed over ground
        out.push_int(0, 1); // position accuracy
        out.push_int(
            (self.longitude * POSITION_SCALE).round() as i64,
            LONGITUDE.len(),
        );
        out.push_int(
            (self.latitude * POSITION_SCALE).round() as i64,
            LATITUDE.len(),
        );
        out.push_int((self.course * COURSE_SCALE).round() as i64, COURSE.len());
        out.push_int(0, 9); // true heading
        out.push_int(0, 6); // time stamp
        out.push_int(0, 2); // maneuver indicator
        out.push_int(0, 3); // spare
        out.push_int(0, 1); // RAIM
        out.push_int(0, 19); // radio status
        debug_assert_eq!(TYPE1_PAYLOAD_BITS, out.len());
        out
    }
}

impl fmt::Display for AisFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type {} MMSI {:09} at {:.6}°, {:.6}°, course {:.1}°, {}",
            self.msg_type, self.mmsi, self.latitude, self.longitude, self.course, self.nav_status
        )
    }
}

/// Decode Type 1 fields from payload bits
///
/// `bits` are the payload bits in six-bit packing order, most
/// significant bit first. Only the first 128 bits are examined.
/// The field offsets are fixed by the Type 1 layout.
pub fn extract_fields(bits: &[bool]) -> Result<AisFrame, AisError> {
    if bits.len() < COURSE.end {
        return Err(AisError::PayloadTooShort {
            len: bits.len(),
            needed: COURSE.end,
        });
    }

    let bits = BitVector::from(&bits[0..COURSE.end]);
    Ok(AisFrame {
        msg_type: bits.read_unsigned(MSG_TYPE) as u8,
        mmsi: bits.read_unsigned(MMSI) as u32,
        longitude: bits.read_signed(LONGITUDE) as f64 / POSITION_SCALE,
        latitude: bits.read_signed(LATITUDE) as f64 / POSITION_SCALE,
        course: bits.read_unsigned(COURSE) as f64 / COURSE_SCALE,
        nav_status: NavigationStatus::from_code(bits.read_unsigned(NAV_STATUS) as u8),
    })
}

// Check that `value` is within the half-open `range`
//
// NaN is never in range.
fn check_range(field: &'static str, value: f64, range: Range<f64>) -> Result<(), AisError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(AisError::FieldOutOfRange { field, value })
    }
}

// Check that `value` is within `range` both as given and as
// quantized to units of `1 / scale` for transmission
//
// The range bounds must be whole units.
fn check_quantized(
    field: &'static str,
    value: f64,
    scale: f64,
    range: Range<f64>,
) -> Result<(), AisError> {
    check_range(field, value, range.clone())?;
    if (value * scale).round() < range.end * scale {
        Ok(())
    } else {
        Err(AisError::FieldOutOfRange { field, value })
    }
}
