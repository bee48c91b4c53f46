//! Display configuration types and builder

pub use crate::error::{BuilderError, MAX_COLUMNS, MAX_ROWS};

/// Display dimensions as manufactured (unrotated)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels (columns, source outputs)
    pub width: u16,
    /// Height in pixels (rows, gate outputs)
    pub height: u16,
}

impl Dimensions {
    /// Stock 240x320 ILI9341 panel
    pub const ILI9341: Self = Self {
        width: MAX_COLUMNS,
        height: MAX_ROWS,
    };

    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - width == 0 or width > MAX_COLUMNS
    /// - height == 0 or height > MAX_ROWS
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || width > MAX_COLUMNS {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        if height == 0 || height > MAX_ROWS {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Dimensions with width and height exchanged
    pub fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::ILI9341
    }
}

/// Display rotation relative to native orientation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    /// No rotation (portrait)
    #[default]
    Rotate0,
    /// Rotate 90 degrees clockwise (landscape)
    Rotate90,
    /// Rotate 180 degrees (portrait, flipped)
    Rotate180,
    /// Rotate 270 degrees clockwise (landscape, flipped)
    Rotate270,
}

/// Display configuration
///
/// This struct holds the panel geometry and every register table written
/// during [`Display::init`](crate::Display::init). Use `Builder` to create
/// a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Display dimensions
    pub dimensions: Dimensions,
    /// Rotation applied during initialization
    pub rotation: Rotation,
    /// Power control A (5 bytes for command 0xCB)
    pub power_control_a: [u8; 5],
    /// Power control B (3 bytes for command 0xCF)
    pub power_control_b: [u8; 3],
    /// Driver timing control A (3 bytes for command 0xE8)
    pub driver_timing_a: [u8; 3],
    /// Driver timing control C (2 bytes for command 0xEA)
    pub driver_timing_c: [u8; 2],
    /// Power on sequence control (4 bytes for command 0xED)
    pub power_on_sequence: [u8; 4],
    /// Pump ratio control
    pub pump_ratio: u8,
    /// Power control 1 (GVDD level)
    pub power_control_1: u8,
    /// Power control 2 (step-up factor)
    pub power_control_2: u8,
    /// VCOM control 1 (VCOMH, VCOML)
    pub vcom_control_1: [u8; 2],
    /// VCOM control 2 (VCOM offset)
    pub vcom_control_2: u8,
    /// Frame rate control in normal mode (division ratio, clocks per line)
    pub frame_rate: [u8; 2],
    /// Display function control (3 bytes for command 0xB6)
    pub display_function: [u8; 3],
    /// Gamma curve selection
    pub gamma_curve: u8,
    /// Positive gamma correction table
    pub positive_gamma: [u8; 15],
    /// Negative gamma correction table
    pub negative_gamma: [u8; 15],
}

impl Config {
    /// Get the rotated dimensions based on rotation setting
    pub fn rotated_dimensions(&self) -> Dimensions {
        crate::rotation::rotated_dimensions(self.dimensions, self.rotation)
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust,no_run
/// use ili9341::{Builder, Dimensions, Rotation};
///
/// let config = match Builder::new()
///     .dimensions(Dimensions::ILI9341)
///     .rotation(Rotation::Rotate90)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
pub struct Builder {
    /// Display dimensions (required)
    dimensions: Option<Dimensions>,
    /// Rotation applied during initialization
    rotation: Rotation,
    power_control_a: [u8; 5],
    power_control_b: [u8; 3],
    driver_timing_a: [u8; 3],
    driver_timing_c: [u8; 2],
    power_on_sequence: [u8; 4],
    pump_ratio: u8,
    power_control_1: u8,
    power_control_2: u8,
    vcom_control_1: [u8; 2],
    vcom_control_2: u8,
    frame_rate: [u8; 2],
    display_function: [u8; 3],
    gamma_curve: u8,
    positive_gamma: [u8; 15],
    negative_gamma: [u8; 15],
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            rotation: Rotation::Rotate0,
            // Power sequence tables (panel-specific, override as needed)
            power_control_a: [0x39, 0x2C, 0x00, 0x34, 0x02],
            power_control_b: [0x00, 0xC1, 0x30],
            driver_timing_a: [0x85, 0x00, 0x78],
            driver_timing_c: [0x00, 0x00],
            power_on_sequence: [0x64, 0x03, 0x12, 0x81],
            // Try 0x00 or 0x30 if colors look saturated or dim
            pump_ratio: 0x20,
            // GVDD 4.60V
            power_control_1: 0x23,
            power_control_2: 0x10,
            vcom_control_1: [0x3E, 0x28],
            vcom_control_2: 0x86,
            // fosc, 79Hz
            frame_rate: [0x00, 0x18],
            display_function: [0x08, 0x82, 0x27],
            gamma_curve: 0x01,
            positive_gamma: [
                0x0F, 0x31, 0x2B, 0x0C, 0x0E, 0x08, 0x4E, 0xF1, 0x37, 0x07, 0x10, 0x03, 0x0E, 0x09,
                0x00,
            ],
            negative_gamma: [
                0x00, 0x0E, 0x14, 0x03, 0x11, 0x07, 0x31, 0xC1, 0x48, 0x08, 0x0F, 0x0C, 0x31, 0x36,
                0x0F,
            ],
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set the rotation applied during initialization
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set power control A parameters
    pub fn power_control_a(mut self, values: [u8; 5]) -> Self {
        self.power_control_a = values;
        self
    }

    /// Set power control B parameters
    pub fn power_control_b(mut self, values: [u8; 3]) -> Self {
        self.power_control_b = values;
        self
    }

    /// Set driver timing control A parameters
    pub fn driver_timing_a(mut self, values: [u8; 3]) -> Self {
        self.driver_timing_a = values;
        self
    }

    /// Set driver timing control C parameters
    pub fn driver_timing_c(mut self, values: [u8; 2]) -> Self {
        self.driver_timing_c = values;
        self
    }

    /// Set power on sequence control parameters
    pub fn power_on_sequence(mut self, values: [u8; 4]) -> Self {
        self.power_on_sequence = values;
        self
    }

    /// Set pump ratio control
    pub fn pump_ratio(mut self, value: u8) -> Self {
        self.pump_ratio = value;
        self
    }

    /// Set power control 1
    pub fn power_control_1(mut self, value: u8) -> Self {
        self.power_control_1 = value;
        self
    }

    /// Set power control 2
    pub fn power_control_2(mut self, value: u8) -> Self {
        self.power_control_2 = value;
        self
    }

    /// Set VCOM control 1 (VCOMH, VCOML)
    pub fn vcom_control_1(mut self, values: [u8; 2]) -> Self {
        self.vcom_control_1 = values;
        self
    }

    /// Set VCOM control 2
    pub fn vcom_control_2(mut self, value: u8) -> Self {
        self.vcom_control_2 = value;
        self
    }

    /// Set frame rate control (normal mode)
    pub fn frame_rate(mut self, values: [u8; 2]) -> Self {
        self.frame_rate = values;
        self
    }

    /// Set display function control parameters
    pub fn display_function(mut self, values: [u8; 3]) -> Self {
        self.display_function = values;
        self
    }

    /// Set gamma curve selection
    pub fn gamma_curve(mut self, value: u8) -> Self {
        self.gamma_curve = value;
        self
    }

    /// Set positive and negative gamma correction tables
    pub fn gamma_tables(mut self, positive: [u8; 15], negative: [u8; 15]) -> Self {
        self.positive_gamma = positive;
        self.negative_gamma = negative;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set
    pub fn build(self) -> Result<Config, BuilderError> {
        Ok(Config {
            dimensions: self.dimensions.ok_or(BuilderError::MissingDimensions)?,
            rotation: self.rotation,
            power_control_a: self.power_control_a,
            power_control_b: self.power_control_b,
            driver_timing_a: self.driver_timing_a,
            driver_timing_c: self.driver_timing_c,
            power_on_sequence: self.power_on_sequence,
            pump_ratio: self.pump_ratio,
            power_control_1: self.power_control_1,
            power_control_2: self.power_control_2,
            vcom_control_1: self.vcom_control_1,
            vcom_control_2: self.vcom_control_2,
            frame_rate: self.frame_rate,
            display_function: self.display_function,
            gamma_curve: self.gamma_curve,
            positive_gamma: self.positive_gamma,
            negative_gamma: self.negative_gamma,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_rejects_zero_and_oversize() {
        assert!(matches!(
            Dimensions::new(0, 320),
            Err(BuilderError::InvalidDimensions { width: 0, .. })
        ));
        assert!(Dimensions::new(240, 0).is_err());
        assert!(Dimensions::new(241, 320).is_err());
        assert!(Dimensions::new(240, 321).is_err());
        assert_eq!(Dimensions::new(240, 320).unwrap(), Dimensions::ILI9341);
    }

    #[test]
    fn test_builder_requires_dimensions() {
        assert!(matches!(
            Builder::new().build(),
            Err(BuilderError::MissingDimensions)
        ));
    }

    #[test]
    fn test_rotated_dimensions_follow_rotation() {
        let config = Builder::new()
            .dimensions(Dimensions::ILI9341)
            .rotation(Rotation::Rotate270)
            .build()
            .unwrap();
        assert_eq!(
            config.rotated_dimensions(),
            Dimensions {
                width: 320,
                height: 240
            }
        );
    }
}
