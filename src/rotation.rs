//! Rotation to memory access control mapping
//!
//! The ILI9341 rotates in hardware: the MADCTL register selects the order
//! in which the controller walks its 240x320 GRAM. Four flag combinations
//! give the four orientations, always with the BGR bit set for the panel's
//! color filter order.
//!
//! | Rotation  | Flags            | Byte | Width/height |
//! |-----------|------------------|------|--------------|
//! | Rotate0   | MX, BGR          | 0x48 | native       |
//! | Rotate90  | MV, BGR          | 0x28 | swapped      |
//! | Rotate180 | MY, BGR          | 0x88 | native       |
//! | Rotate270 | MX, MY, MV, BGR  | 0xE8 | swapped      |
//!
//! ## Example
//!
//! ```
//! use ili9341::{rotation, Dimensions, Rotation};
//!
//! assert_eq!(rotation::madctl(Rotation::Rotate90), 0x28);
//!
//! let dims = rotation::rotated_dimensions(Dimensions::ILI9341, Rotation::Rotate90);
//! assert_eq!((dims.width, dims.height), (320, 240));
//! ```

use crate::command::madctl::{BGR, MV, MX, MY};
use crate::config::{Dimensions, Rotation};

/// Memory access control byte for a rotation
pub fn madctl(rotation: Rotation) -> u8 {
    match rotation {
        Rotation::Rotate0 => MX | BGR,
        Rotation::Rotate90 => MV | BGR,
        Rotation::Rotate180 => MY | BGR,
        Rotation::Rotate270 => MX | MY | MV | BGR,
    }
}

/// Whether the rotation exchanges rows and columns
pub fn swaps_axes(rotation: Rotation) -> bool {
    matches!(rotation, Rotation::Rotate90 | Rotation::Rotate270)
}

/// Effective dimensions of a panel under a rotation
///
/// The result is always either `baseline` or its transpose.
pub fn rotated_dimensions(baseline: Dimensions, rotation: Rotation) -> Dimensions {
    if swaps_axes(rotation) {
        baseline.transposed()
    } else {
        baseline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Rotation; 4] = [
        Rotation::Rotate0,
        Rotation::Rotate90,
        Rotation::Rotate180,
        Rotation::Rotate270,
    ];

    #[test]
    fn test_madctl_table() {
        assert_eq!(madctl(Rotation::Rotate0), 0x48);
        assert_eq!(madctl(Rotation::Rotate90), 0x28);
        assert_eq!(madctl(Rotation::Rotate180), 0x88);
        assert_eq!(madctl(Rotation::Rotate270), 0xE8);
    }

    #[test]
    fn test_bgr_always_set() {
        for rotation in ALL {
            assert_ne!(madctl(rotation) & BGR, 0);
        }
    }

    #[test]
    fn test_exchange_bit_matches_swap() {
        for rotation in ALL {
            assert_eq!(madctl(rotation) & MV != 0, swaps_axes(rotation));
        }
    }

    #[test]
    fn test_rotated_dimensions_are_permutation_of_baseline() {
        let baseline = Dimensions::new(200, 300).unwrap();
        for rotation in ALL {
            let dims = rotated_dimensions(baseline, rotation);
            assert!(dims == baseline || dims == baseline.transposed());
        }
        assert_eq!(rotated_dimensions(baseline, Rotation::Rotate180), baseline);
        assert_eq!(
            rotated_dimensions(baseline, Rotation::Rotate270),
            Dimensions {
                width: 300,
                height: 200
            }
        );
    }
}
