//! Fixed-point base-2 logarithms of samples
//!
//! Both functions return `-log2(value / max)` for an 8- or 16-bit sample,
//! with 16 fractional bits. The value is normalised into `128..=255` by
//! counting shifts, which give the integer part; a table supplies the
//! fraction. Zero has no logarithm and yields `None`.

/// `-log2(i / 255)` for `i` in `128..=255`, as 32-bit fractions.
pub(crate) const L2_8BIT: [u32; 128] = [
    4270715492, 4222494797, 4174646467, 4127164793, 4080044201, 4033279239,
    3986864580, 3940795015, 3895065449, 3849670902, 3804606499, 3759867474,
    3715449162, 3671346997, 3627556511, 3584073329, 3540893168, 3498011834,
    3455425220, 3413129301, 3371120137, 3329393864, 3287946700, 3246774933,
    3205874930, 3165243125, 3124876025, 3084770202, 3044922296, 3005329011,
    2965987113, 2926893432, 2888044853, 2849438323, 2811070844, 2772939474,
    2735041326, 2697373562, 2659933400, 2622718104, 2585724991, 2548951424,
    2512394810, 2476052606, 2439922311, 2404001468, 2368287663, 2332778523,
    2297471715, 2262364947, 2227455964, 2192742551, 2158222529, 2123893754,
    2089754119, 2055801552, 2022034013, 1988449497, 1955046031, 1921821672,
    1888774511, 1855902668, 1823204291, 1790677560, 1758320682, 1726131893,
    1694109454, 1662251657, 1630556815, 1599023271, 1567649391, 1536433567,
    1505374214, 1474469770, 1443718700, 1413119487, 1382670639, 1352370686,
    1322218179, 1292211689, 1262349810, 1232631153, 1203054352, 1173618059,
    1144320946, 1115161701, 1086139034, 1057251672, 1028498358, 999877854,
    971388940, 943030410, 914801076, 886699767, 858725327, 830876614,
    803152505, 775551890, 748073672, 720716771, 693480120, 666362667,
    639363374, 612481215, 585715177, 559064263, 532527486, 506103872,
    479792461, 453592303, 427502463, 401522014, 375650043, 349885648,
    324227938, 298676034, 273229066, 247886176, 222646516, 197509248,
    172473545, 147538590, 122703574, 97967701, 73330182, 48790236,
    24347096, 0,
];

/// Interpolation end points for the 16-bit correction, `log2(256/257)` and
/// `log2(258/257)` scaled by 2^22.
const INTERP_LOW: u32 = 23_591;
const INTERP_HIGH: u32 = 23_499;

/// Logarithm of an 8-bit sample.
///
/// The result lies in `0..=523918` (about 7.994 with 16 fractional bits),
/// so it always fits in 19 bits.
pub fn log8bit(value: u8) -> Option<i32> {
    if value == 0 {
        return None;
    }

    let mut x = u32::from(value);
    let mut lg2: u32 = 0;
    if x & 0xf0 == 0 {
        lg2 = 4;
        x <<= 4;
    }
    if x & 0xc0 == 0 {
        lg2 += 2;
        x <<= 2;
    }
    if x & 0x80 == 0 {
        lg2 += 1;
        x <<= 1;
    }

    let fraction = (L2_8BIT[(x - 128) as usize] + 32_768) >> 16;
    Some(((lg2 << 16) + fraction) as i32)
}

/// Logarithm of a 16-bit sample.
///
/// The top eight significant bits select the table entry; the remaining
/// bits correct it by linear interpolation of `log2(x / 257)` between 256
/// and 258, where the curve is all but straight. The work is carried at 28
/// fractional bits and rounded back to 16.
pub fn log16bit(value: u16) -> Option<i32> {
    if value == 0 {
        return None;
    }

    let mut x = u32::from(value);
    let mut lg2: u32 = 0;
    if x & 0xff00 == 0 {
        lg2 = 8;
        x <<= 8;
    }
    if x & 0xf000 == 0 {
        lg2 += 4;
        x <<= 4;
    }
    if x & 0xc000 == 0 {
        lg2 += 2;
        x <<= 2;
    }
    if x & 0x8000 == 0 {
        lg2 += 1;
        x <<= 1;
    }

    lg2 <<= 28;
    lg2 = lg2.wrapping_add((L2_8BIT[((x >> 8) - 128) as usize] + 8) >> 4);

    // x / top byte, with 1.0 at bit 24 and 16 bits of interpolation below
    // the single bit at 1 << 16
    x = ((x << 16) + (x >> 9)) / (x >> 8);
    x -= 1 << 24;

    if x <= 65_536 {
        lg2 = lg2.wrapping_add((INTERP_LOW * (65_536 - x) + (1 << 9)) >> 10);
    } else {
        lg2 = lg2.wrapping_sub((INTERP_HIGH * (x - 65_536) + (1 << 9)) >> 10);
    }

    // At most 20 bits remain after the final shift
    Some((lg2.wrapping_add(2048) >> 12) as i32)
}
