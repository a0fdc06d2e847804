//! Gamma lookup tables
//!
//! Three table shapes cover every row a decoder hands over:
//!
//! - 8-bit ([`build_8bit_table`]) - 256 byte entries for rows of 8 bits
//!   or less
//! - 16-bit ([`build_16bit_table`]) - `1 << (8 - shift)` subtables of 256
//!   16-bit entries for 16-bit rows
//! - 16-to-8 ([`build_16to8_table`]) - same shape, filled so that a 16-bit
//!   input maps to the 16-bit form (`i * 257`) of the nearest 8-bit output
//!
//! A 16-bit value `v` is looked up as `table[(v & 0xff) >> shift][v >> 8]`:
//! the subtable is chosen by the significant low bits and the entry by the
//! high byte. The subtables are stored back to back in one allocation,
//! subtable `i` at `i * 256`.
//!
//! [`build_gamma_tables`] builds the set an image needs from a
//! [`GammaRequest`]; [`GammaTables`] owns a built set and reports when it
//! is replaced.

use crate::correct::{MAX_GAMMA_8, gamma_16bit_correct, gamma_8bit_correct, gamma_significant};
use crate::error::{GammaError, GammaResult};
use pngtran_core::{ColorType, Error, FixedPoint, SigBits, product2, reciprocal, reciprocal2};

/// Entries per subtable, one per high byte.
pub const SUBTABLE_LEN: usize = 256;

/// A built gamma lookup table.
///
/// Only the `build_*` functions create tables, so the entries always match
/// the shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GammaTable {
    repr: Repr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Repr {
    /// One entry per byte value
    Bit8(Vec<u8>),
    /// Corrected 16-bit values, `1 << (8 - shift)` subtables
    Bit16 { shift: u8, entries: Vec<u16> },
    /// 16-bit inputs mapped to `i * 257` for the nearest 8-bit output `i`
    Bit16To8 { shift: u8, entries: Vec<u16> },
}

impl GammaTable {
    /// Short name of the table shape, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match &self.repr {
            Repr::Bit8(_) => "8-bit",
            Repr::Bit16 { .. } => "16-bit",
            Repr::Bit16To8 { .. } => "16-to-8",
        }
    }

    /// Number of low input bits ignored by a 16-bit table (0 for 8-bit).
    pub fn shift(&self) -> u8 {
        match &self.repr {
            Repr::Bit8(_) => 0,
            Repr::Bit16 { shift, .. } | Repr::Bit16To8 { shift, .. } => *shift,
        }
    }

    /// All entries of a 16-bit table, subtable `i` at `i * 256`.
    pub fn entries(&self) -> Option<&[u16]> {
        match &self.repr {
            Repr::Bit8(_) => None,
            Repr::Bit16 { entries, .. } | Repr::Bit16To8 { entries, .. } => Some(entries),
        }
    }

    /// Whether the table takes 16-bit input.
    pub fn is_16bit(&self) -> bool {
        !matches!(self.repr, Repr::Bit8(_))
    }

    /// Number of 256-entry subtables.
    pub fn subtable_count(&self) -> usize {
        match &self.repr {
            Repr::Bit8(_) => 1,
            Repr::Bit16 { shift, .. } | Repr::Bit16To8 { shift, .. } => 1 << (8 - shift),
        }
    }

    /// The byte entries of an 8-bit table.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.repr {
            Repr::Bit8(entries) => Some(entries),
            _ => None,
        }
    }

    /// Subtable `index` of a 16-bit table.
    pub fn subtable(&self, index: usize) -> Option<&[u16]> {
        match &self.repr {
            Repr::Bit8(_) => None,
            Repr::Bit16 { entries, .. } | Repr::Bit16To8 { entries, .. } => {
                let start = index.checked_mul(SUBTABLE_LEN)?;
                entries.get(start..start + SUBTABLE_LEN)
            }
        }
    }

    /// Look up one sample.
    ///
    /// An 8-bit table uses the low byte of `value`.
    #[inline]
    pub fn lookup(&self, value: u16) -> u16 {
        match &self.repr {
            Repr::Bit8(entries) => u16::from(entries[usize::from(value & 0xff)]),
            Repr::Bit16 { shift, entries } | Repr::Bit16To8 { shift, entries } => {
                let low = usize::from((value & 0xff) >> shift);
                entries[low * SUBTABLE_LEN + usize::from(value >> 8)]
            }
        }
    }
}

fn allocate<T: Copy>(len: usize, fill: T) -> GammaResult<Vec<T>> {
    let mut entries = Vec::new();
    entries
        .try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailed {
            bytes: len.saturating_mul(size_of::<T>()),
        })?;
    entries.resize(len, fill);
    Ok(entries)
}

fn check_shift(shift: u8) -> GammaResult<()> {
    if shift > 8 {
        return Err(Error::InvalidParameter(format!("gamma table shift {shift} exceeds 8")).into());
    }
    Ok(())
}

/// Build a 256-entry table correcting bytes by `gamma`.
///
/// An insignificant gamma gives the identity table.
pub fn build_8bit_table(gamma: FixedPoint) -> GammaResult<GammaTable> {
    let mut entries = allocate(SUBTABLE_LEN, 0u8)?;
    if gamma_significant(gamma) {
        for (i, entry) in entries.iter_mut().enumerate() {
            *entry = gamma_8bit_correct(i as u8, gamma);
        }
    } else {
        tracing::debug!(%gamma, "gamma not significant, 8-bit table is the identity");
        for (i, entry) in entries.iter_mut().enumerate() {
            *entry = i as u8;
        }
    }
    tracing::trace!(%gamma, "built 8-bit gamma table");
    Ok(GammaTable {
        repr: Repr::Bit8(entries),
    })
}

/// Build a 16-bit table correcting by `gamma`, ignoring the low `shift`
/// bits of each input.
///
/// Entry `[i][j]` corrects the reduced value `(j << (8 - shift)) + i`,
/// rescaled to the full 16-bit range. With an insignificant gamma the
/// entries are just the rescaled values.
pub fn build_16bit_table(shift: u8, gamma: FixedPoint) -> GammaResult<GammaTable> {
    check_shift(shift)?;
    let num = 1usize << (8 - shift);
    let max = (1u32 << (16 - shift)) - 1;
    let max_by_2 = 1u32 << (15 - shift);
    let significant = gamma_significant(gamma);
    if !significant {
        tracing::debug!(%gamma, shift, "gamma not significant, 16-bit table only rescales");
    }

    let mut entries = allocate(num * SUBTABLE_LEN, 0u16)?;
    for (i, subtable) in entries.chunks_exact_mut(SUBTABLE_LEN).enumerate() {
        for (j, entry) in subtable.iter_mut().enumerate() {
            let mut ig = ((j as u32) << (8 - shift)) + i as u32;
            if shift > 0 {
                ig = (ig * 65_535 + max_by_2) / max;
            }
            // ig <= 65535 after rescaling
            let ig = ig as u16;
            *entry = if significant {
                gamma_16bit_correct(ig, gamma)
            } else {
                ig
            };
        }
    }

    tracing::trace!(%gamma, shift, subtables = num, "built 16-bit gamma table");
    Ok(GammaTable {
        repr: Repr::Bit16 { shift, entries },
    })
}

/// Build a table mapping 16-bit input to the nearest 8-bit output.
///
/// `inverse_gamma` is the reciprocal of the correction to apply: for each
/// output byte `i` it carries the midpoint between outputs `i` and `i + 1`
/// back to the input domain, giving the last input that still rounds to
/// `i`. Slots are filled with `i * 257` from the previous boundary up to
/// and including this one. Inputs above the last boundary get 65535.
///
/// The boundary is taken at `i * 257 + 128`, just under the true midpoint,
/// so the slot on the boundary belongs to the lower output.
pub fn build_16to8_table(shift: u8, inverse_gamma: FixedPoint) -> GammaResult<GammaTable> {
    check_shift(shift)?;
    let num = 1usize << (8 - shift);
    let max = (1u32 << (16 - shift)) - 1;
    let low_mask = 0xffusize >> shift;

    let mut entries = allocate(num * SUBTABLE_LEN, u16::MAX)?;
    let slot = |last: usize| (last & low_mask) * SUBTABLE_LEN + (last >> (8 - shift));

    let mut last = 0usize;
    for i in 0..255u16 {
        let out = i * 257;
        let bound = u32::from(gamma_16bit_correct(out + 128, inverse_gamma));
        let bound = ((bound * max + 32_768) / 65_535 + 1) as usize;
        while last < bound {
            entries[slot(last)] = out;
            last += 1;
        }
    }
    // Remaining slots keep the 65535 fill

    tracing::trace!(%inverse_gamma, shift, subtables = num, "built 16-to-8 gamma table");
    Ok(GammaTable {
        repr: Repr::Bit16To8 { shift, entries },
    })
}

/// Low input bits a 16-bit table ignores.
///
/// Derived from the significant bits of the value channels (the largest of
/// red, green and blue for color), kept to at least `16 - MAX_GAMMA_8`
/// when the output is reduced to 8 bits, and capped at 8 so there is
/// always at least one subtable.
pub fn gamma_shift(sig_bits: &SigBits, color_type: ColorType, reduce_to_8bit: bool) -> u8 {
    let sig = sig_bits.value_bits(color_type);
    let mut shift = if sig > 0 && sig < 16 { 16 - sig } else { 0 };
    if reduce_to_8bit {
        shift = shift.max(16 - MAX_GAMMA_8);
    }
    shift.min(8)
}

/// What to build gamma tables for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GammaRequest {
    /// Sample depth of the rows to correct
    pub bit_depth: u8,
    /// Color type of the rows to correct
    pub color_type: ColorType,
    /// Significant bits per channel; `None` means the full depth
    pub sig_bits: Option<SigBits>,
    /// Encoding gamma recorded in the file
    pub file_gamma: FixedPoint,
    /// Display gamma; `None` leaves samples uncorrected
    pub screen_gamma: Option<FixedPoint>,
    /// Whether 16-bit rows will be reduced to 8 bits afterwards
    pub reduce_to_8bit: bool,
    /// Also build the to-linear and from-linear tables used for compositing
    pub compose: bool,
}

impl Default for GammaRequest {
    fn default() -> Self {
        Self {
            bit_depth: 8,
            color_type: ColorType::Gray,
            sig_bits: None,
            file_gamma: FixedPoint::SRGB_GAMMA,
            screen_gamma: None,
            reduce_to_8bit: false,
            compose: false,
        }
    }
}

impl GammaRequest {
    /// Request tables for a file gamma and a display gamma.
    pub fn new(bit_depth: u8, color_type: ColorType, file_gamma: FixedPoint) -> Self {
        Self {
            bit_depth,
            color_type,
            file_gamma,
            ..Default::default()
        }
    }

    /// Set the display gamma.
    pub fn with_screen_gamma(mut self, screen_gamma: FixedPoint) -> Self {
        self.screen_gamma = Some(screen_gamma);
        self
    }

    /// Validate the request.
    pub fn validate(&self) -> GammaResult<()> {
        self.color_type.check_bit_depth(self.bit_depth)?;
        if self.file_gamma.raw() <= 0 {
            return Err(GammaError::InvalidGamma(self.file_gamma.raw()));
        }
        match self.screen_gamma {
            Some(screen) if screen.raw() <= 0 => {
                return Err(GammaError::InvalidGamma(screen.raw()));
            }
            _ => {}
        }
        if let Some(sig) = &self.sig_bits {
            sig.validate(self.color_type, self.bit_depth)?;
        }
        Ok(())
    }

    /// Correction applied by the primary table: `1 / (file * screen)`.
    fn primary_gamma(&self) -> GammaResult<FixedPoint> {
        match self.screen_gamma {
            Some(screen) => Ok(reciprocal2(self.file_gamma, screen)?),
            None => Ok(FixedPoint::ONE),
        }
    }

    /// Inverse of the primary correction, as the 16-to-8 builder expects.
    fn inverse_primary_gamma(&self) -> GammaResult<FixedPoint> {
        match self.screen_gamma {
            Some(screen) => Ok(product2(self.file_gamma, screen)?),
            None => Ok(FixedPoint::ONE),
        }
    }

    /// Corrections for the compositing pair: file to linear, linear to
    /// screen. Without a screen gamma the second falls back to the file
    /// gamma.
    fn linear_gammas(&self) -> GammaResult<(FixedPoint, FixedPoint)> {
        let to_linear = reciprocal(self.file_gamma)?;
        let from_linear = match self.screen_gamma {
            Some(screen) => reciprocal(screen)?,
            None => self.file_gamma,
        };
        Ok((to_linear, from_linear))
    }
}

/// The tables built for one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GammaTableSet {
    bit_depth: u8,
    shift: u8,
    table: GammaTable,
    to_linear: Option<GammaTable>,
    from_linear: Option<GammaTable>,
}

impl GammaTableSet {
    /// Sample depth the set was built for.
    pub fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    /// Shift shared by every 16-bit table in the set.
    pub fn shift(&self) -> u8 {
        self.shift
    }

    /// The table applied to rows.
    pub fn table(&self) -> &GammaTable {
        &self.table
    }

    /// File-to-linear table, when compositing tables were requested.
    pub fn to_linear(&self) -> Option<&GammaTable> {
        self.to_linear.as_ref()
    }

    /// Linear-to-screen table, when compositing tables were requested.
    pub fn from_linear(&self) -> Option<&GammaTable> {
        self.from_linear.as_ref()
    }
}

/// Build every table `request` calls for.
///
/// # Errors
///
/// - [`GammaError::InvalidGamma`] for a non-positive gamma
/// - [`GammaError::Core`] for an invalid color type/depth, an overflowing
///   gamma ratio or a failed allocation
pub fn build_gamma_tables(request: &GammaRequest) -> GammaResult<GammaTableSet> {
    request.validate()?;

    let set = if request.bit_depth <= 8 {
        let table = build_8bit_table(request.primary_gamma()?)?;
        let (to_linear, from_linear) = if request.compose {
            let (to, from) = request.linear_gammas()?;
            (Some(build_8bit_table(to)?), Some(build_8bit_table(from)?))
        } else {
            (None, None)
        };
        GammaTableSet {
            bit_depth: request.bit_depth,
            shift: 0,
            table,
            to_linear,
            from_linear,
        }
    } else {
        let sig_bits = request
            .sig_bits
            .unwrap_or_else(|| SigBits::full(request.bit_depth));
        let shift = gamma_shift(&sig_bits, request.color_type, request.reduce_to_8bit);

        let table = if request.reduce_to_8bit {
            build_16to8_table(shift, request.inverse_primary_gamma()?)?
        } else {
            build_16bit_table(shift, request.primary_gamma()?)?
        };
        let (to_linear, from_linear) = if request.compose {
            let (to, from) = request.linear_gammas()?;
            (
                Some(build_16bit_table(shift, to)?),
                Some(build_16bit_table(shift, from)?),
            )
        } else {
            (None, None)
        };
        GammaTableSet {
            bit_depth: request.bit_depth,
            shift,
            table,
            to_linear,
            from_linear,
        }
    };

    tracing::debug!(
        bit_depth = set.bit_depth,
        kind = set.table.kind(),
        shift = set.shift,
        compose = request.compose,
        "built gamma tables"
    );
    Ok(set)
}

/// Outcome of [`GammaTables::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableBuild {
    /// No tables existed before
    Fresh,
    /// Existing tables were released and built again
    Rebuilt,
}

/// Owner of the gamma tables for one image.
///
/// Building twice is allowed but costs a full rebuild, so it is reported
/// as [`TableBuild::Rebuilt`] and logged as a warning.
#[derive(Debug, Default)]
pub struct GammaTables {
    current: Option<GammaTableSet>,
}

impl GammaTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build tables for `request`, replacing any existing set.
    ///
    /// The old set is released before the new one is built; if the build
    /// fails no tables remain.
    pub fn build(&mut self, request: &GammaRequest) -> GammaResult<TableBuild> {
        let outcome = if self.current.take().is_some() {
            tracing::warn!("gamma table being rebuilt");
            TableBuild::Rebuilt
        } else {
            TableBuild::Fresh
        };
        self.current = Some(build_gamma_tables(request)?);
        Ok(outcome)
    }

    /// The current tables, if built.
    pub fn tables(&self) -> Option<&GammaTableSet> {
        self.current.as_ref()
    }

    pub fn is_built(&self) -> bool {
        self.current.is_some()
    }

    /// Release the tables. Returns whether any existed.
    pub fn invalidate(&mut self) -> bool {
        self.current.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(raw: i32) -> FixedPoint {
        FixedPoint::from_raw(raw)
    }

    #[test]
    fn test_8bit_identity_when_insignificant() {
        let table = build_8bit_table(fp(102_000)).unwrap();
        let bytes = table.as_bytes().unwrap();
        assert!(bytes.iter().enumerate().all(|(i, &b)| b as usize == i));
        assert_eq!(table.lookup(0x1234), 0x34);
    }

    #[test]
    fn test_8bit_table_entries() {
        let g = fp(219_998);
        let table = build_8bit_table(g).unwrap();
        for v in 0..=255u8 {
            assert_eq!(table.lookup(u16::from(v)), u16::from(gamma_8bit_correct(v, g)));
        }
    }

    #[test]
    fn test_gamma_shift() {
        let full = SigBits::full(16);
        assert_eq!(gamma_shift(&full, ColorType::Gray, false), 0);
        assert_eq!(gamma_shift(&full, ColorType::Gray, true), 5);
        assert_eq!(gamma_shift(&SigBits::uniform(12, 16), ColorType::Rgb, false), 4);
        assert_eq!(gamma_shift(&SigBits::uniform(12, 16), ColorType::Rgb, true), 5);
        assert_eq!(gamma_shift(&SigBits::uniform(10, 16), ColorType::Gray, true), 6);
        assert_eq!(gamma_shift(&SigBits::uniform(4, 16), ColorType::Gray, false), 8);
        let mixed = SigBits {
            red: 5,
            green: 10,
            blue: 7,
            gray: 1,
            alpha: 16,
        };
        assert_eq!(gamma_shift(&mixed, ColorType::Rgba, false), 6);
        assert_eq!(gamma_shift(&mixed, ColorType::GrayAlpha, false), 8);
    }

    #[test]
    fn test_16bit_table_shape() {
        for shift in 0..=8u8 {
            let table = build_16bit_table(shift, fp(219_998)).unwrap();
            assert_eq!(table.subtable_count(), 1 << (8 - shift));
            assert!(table.subtable(table.subtable_count() - 1).is_some());
            assert!(table.subtable(table.subtable_count()).is_none());
            assert_eq!(table.lookup(0), 0);
            assert_eq!(table.lookup(65_535), 65_535);
        }
        assert!(build_16bit_table(9, FixedPoint::ONE).is_err());
    }

    #[test]
    fn test_built_tables_match_their_shift() {
        for shift in 0..=8u8 {
            for table in [
                build_16bit_table(shift, fp(45_455)).unwrap(),
                build_16to8_table(shift, FixedPoint::SRGB_GAMMA).unwrap(),
            ] {
                assert_eq!(table.shift(), shift);
                assert_eq!(
                    table.entries().unwrap().len(),
                    table.subtable_count() * SUBTABLE_LEN
                );
                assert!(table.as_bytes().is_none());
            }
        }
        let table = build_8bit_table(fp(45_455)).unwrap();
        assert_eq!(table.as_bytes().unwrap().len(), SUBTABLE_LEN);
        assert!(table.entries().is_none());
        assert_eq!(table.shift(), 0);
        assert!(build_16to8_table(9, FixedPoint::ONE).is_err());
    }

    #[test]
    fn test_16bit_identity_rescales() {
        let table = build_16bit_table(8, FixedPoint::ONE).unwrap();
        assert_eq!(table.lookup(0x8000), 32_896);
        assert_eq!(table.lookup(0xff00), 65_535);
        assert_eq!(table.lookup(0x01ff), 257);

        let table = build_16bit_table(0, FixedPoint::ONE).unwrap();
        for v in (0..=65_535u16).step_by(251) {
            assert_eq!(table.lookup(v), v);
        }
    }

    #[cfg(not(feature = "floating-arithmetic"))]
    #[test]
    fn test_16bit_table_values() {
        let table = build_16bit_table(0, fp(219_998)).unwrap();
        assert_eq!(table.lookup(32_768), 14_263);
        assert_eq!(table.lookup(1_000), 7);

        let table = build_16bit_table(4, fp(219_998)).unwrap();
        assert_eq!(table.lookup(32_768), 14_271);
        assert_eq!(table.lookup(4_096), 147);
    }

    #[test]
    fn test_16to8_identity_boundaries() {
        let table = build_16to8_table(0, FixedPoint::ONE).unwrap();
        assert_eq!(table.lookup(128), 0);
        assert_eq!(table.lookup(129), 257);
        assert_eq!(table.lookup(385), 257);
        assert_eq!(table.lookup(386), 514);
        assert_eq!(table.lookup(65_535), 65_535);
    }

    #[test]
    fn test_16to8_monotone_within_subtables() {
        for shift in [0u8, 3, 5, 8] {
            let table = build_16to8_table(shift, FixedPoint::SRGB_GAMMA).unwrap();
            for i in 0..table.subtable_count() {
                let sub = table.subtable(i).unwrap();
                assert!(
                    sub.windows(2).all(|w| w[0] <= w[1]),
                    "subtable {i} of shift {shift} decreases"
                );
                assert!(sub.iter().all(|&v| v % 257 == 0));
            }
        }
    }

    #[test]
    fn test_16to8_nearest_output() {
        // 16-bit linear in, 8-bit encoded with exponent 2.2 out
        let table = build_16to8_table(5, FixedPoint::SRGB_GAMMA).unwrap();
        for v in (0..=65_535u16).step_by(97) {
            let out = f64::from(table.lookup(v) >> 8);
            let ideal = 255.0 * (f64::from(v) / 65_535.0).powf(2.2);
            assert!((out - ideal).abs() < 0.7, "v={v}: {out} vs {ideal}");
        }
        assert_eq!(table.lookup(32_768) >> 8, 56);
    }

    #[test]
    fn test_request_validation() {
        let mut request = GammaRequest::default();
        assert!(request.validate().is_ok());

        request.file_gamma = FixedPoint::ZERO;
        assert_eq!(request.validate(), Err(GammaError::InvalidGamma(0)));

        let request = GammaRequest::new(8, ColorType::Rgb, FixedPoint::SRGB_GAMMA)
            .with_screen_gamma(fp(-1));
        assert_eq!(request.validate(), Err(GammaError::InvalidGamma(-1)));

        let request = GammaRequest::new(4, ColorType::Rgb, FixedPoint::SRGB_GAMMA);
        assert!(matches!(
            request.validate(),
            Err(GammaError::Core(Error::InvalidColorDepth { .. }))
        ));
    }

    #[test]
    fn test_build_set_8bit() {
        let request = GammaRequest {
            compose: true,
            ..GammaRequest::new(8, ColorType::Rgb, FixedPoint::SRGB_GAMMA)
                .with_screen_gamma(FixedPoint::ONE)
        };
        let set = build_gamma_tables(&request).unwrap();
        assert_eq!(set.table().kind(), "8-bit");
        assert_eq!(set.shift(), 0);
        assert_eq!(
            set.table().lookup(128),
            u16::from(gamma_8bit_correct(128, fp(219_998)))
        );
        let to_linear = set.to_linear().unwrap();
        assert_eq!(
            to_linear.lookup(128),
            u16::from(gamma_8bit_correct(128, fp(219_998)))
        );
        // Screen gamma 1.0 makes linear-to-screen the identity
        let from_linear = set.from_linear().unwrap();
        assert_eq!(from_linear.lookup(77), 77);
    }

    #[test]
    fn test_build_set_without_screen_gamma() {
        let set = build_gamma_tables(&GammaRequest::default()).unwrap();
        assert_eq!(set.table().lookup(128), 128);
        assert!(set.to_linear().is_none());
    }

    #[test]
    fn test_build_set_16bit() {
        let request = GammaRequest {
            sig_bits: Some(SigBits::uniform(12, 16)),
            compose: true,
            ..GammaRequest::new(16, ColorType::Rgba, FixedPoint::SRGB_GAMMA)
                .with_screen_gamma(FixedPoint::ONE)
        };
        let set = build_gamma_tables(&request).unwrap();
        assert_eq!(set.table().kind(), "16-bit");
        assert_eq!(set.shift(), 4);
        assert_eq!(set.to_linear().unwrap().shift(), 4);
        assert_eq!(set.from_linear().unwrap().shift(), 4);

        let request = GammaRequest {
            reduce_to_8bit: true,
            ..request
        };
        let set = build_gamma_tables(&request).unwrap();
        assert_eq!(set.table().kind(), "16-to-8");
        assert_eq!(set.shift(), 5);
    }

    #[test]
    fn test_tables_owner_rebuild() {
        let mut tables = GammaTables::new();
        assert!(!tables.is_built());
        let request = GammaRequest::default().with_screen_gamma(fp(220_000));
        assert_eq!(tables.build(&request).unwrap(), TableBuild::Fresh);
        assert_eq!(tables.build(&request).unwrap(), TableBuild::Rebuilt);
        assert!(tables.tables().is_some());
        assert!(tables.invalidate());
        assert!(!tables.invalidate());
        assert_eq!(tables.build(&request).unwrap(), TableBuild::Fresh);
    }

    #[test]
    fn test_failed_build_leaves_no_tables() {
        let mut tables = GammaTables::new();
        tables.build(&GammaRequest::default()).unwrap();
        let bad = GammaRequest {
            file_gamma: fp(-5),
            ..Default::default()
        };
        assert!(tables.build(&bad).is_err());
        assert!(!tables.is_built());
    }
}
