//! ILI9341 command definitions
//!
//! This module defines the command bytes used to control the ILI9341
//! TFT controller. Commands are sent with the DC pin low, their parameters
//! with the DC pin high.
//!
//! ## Command Structure
//!
//! All register writes follow the pattern:
//! 1. Assert CS (Chip Select)
//! 2. Set DC low (command mode)
//! 3. Send command byte
//! 4. Set DC high (data mode)
//! 5. Send parameter bytes (if any)
//!
//! ## Example
//!
//! ```rust,no_run
//! use ili9341::{command, DisplayInterface, SpiInterface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::SpiBus;
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiBus for MockSpi {
//! #     fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # let mut interface = SpiInterface::new(MockSpi, MockPin, MockPin, MockPin);
//! // Pixel format: 16 bits per pixel
//! let _ = interface.send_command(command::PIXFMT);
//! let _ = interface.send_data(&[0x55]);
//! ```

// System commands

/// No operation (0x00)
pub const NOP: u8 = 0x00;

/// Software reset (0x01)
///
/// Used when no hardware reset pin is wired. Wait 120ms before Sleep Out.
pub const SWRESET: u8 = 0x01;

/// Enter sleep mode (0x10)
pub const SLPIN: u8 = 0x10;

/// Sleep out (0x11)
///
/// Wakes the panel from sleep. Needs 120ms before the next Sleep In and
/// 5ms before any other command.
pub const SLPOUT: u8 = 0x11;

/// Normal display mode on (0x13)
///
/// Leaves partial/scroll mode.
pub const NORON: u8 = 0x13;

/// Display inversion off (0x20)
pub const INVOFF: u8 = 0x20;

/// Display inversion on (0x21)
pub const INVON: u8 = 0x21;

/// Gamma curve select (0x26)
///
/// Requires 1 byte: 0x01 = gamma curve 1 (G2.2)
pub const GAMMASET: u8 = 0x26;

/// Display off (0x28)
pub const DISPOFF: u8 = 0x28;

/// Display on (0x29)
pub const DISPON: u8 = 0x29;

// Memory and addressing commands

/// Column address set (0x2A)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const CASET: u8 = 0x2A;

/// Page (row) address set (0x2B)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const PASET: u8 = 0x2B;

/// Memory write (0x2C)
///
/// Following data bytes fill the current address window, row by row.
pub const RAMWR: u8 = 0x2C;

/// Vertical scrolling definition (0x33)
///
/// Requires 6 bytes: top fixed area, scroll area and bottom fixed area,
/// each big-endian. The three must sum to the panel height.
pub const VSCRDEF: u8 = 0x33;

/// Memory access control (0x36)
///
/// Requires 1 byte of [`madctl`] flags.
pub const MADCTL: u8 = 0x36;

/// Vertical scrolling start address (0x37)
///
/// Requires 2 bytes: [line_MSB, line_LSB]
pub const VSCRSADD: u8 = 0x37;

/// Pixel format set (0x3A)
///
/// Requires 1 byte: 0x55 = 16 bits/pixel for both RGB and MCU interfaces
pub const PIXFMT: u8 = 0x3A;

// Panel control commands

/// Frame rate control, normal mode (0xB1)
pub const FRMCTR1: u8 = 0xB1;

/// Display function control (0xB6)
pub const DFUNCTR: u8 = 0xB6;

/// Power control 1 (0xC0)
pub const PWCTR1: u8 = 0xC0;

/// Power control 2 (0xC1)
pub const PWCTR2: u8 = 0xC1;

/// VCOM control 1 (0xC5)
pub const VMCTR1: u8 = 0xC5;

/// VCOM control 2 (0xC7)
pub const VMCTR2: u8 = 0xC7;

/// Power control A (0xCB)
pub const PWCTRA: u8 = 0xCB;

/// Power control B (0xCF)
pub const PWCTRB: u8 = 0xCF;

/// Read index preamble (0xD9)
///
/// Undocumented. Selects which parameter byte (0x10 + index) the next read
/// command returns over a serial interface.
pub const READ_INDEX: u8 = 0xD9;

/// Positive gamma correction (0xE0)
///
/// Requires 15 bytes.
pub const GMCTRP1: u8 = 0xE0;

/// Negative gamma correction (0xE1)
///
/// Requires 15 bytes.
pub const GMCTRN1: u8 = 0xE1;

/// Driver timing control A (0xE8)
pub const DTMCTRA: u8 = 0xE8;

/// Driver timing control B (0xEA)
///
/// Named "timing control C" by some vendor init tables.
pub const DTMCTRC: u8 = 0xEA;

/// Power on sequence control (0xED)
pub const PWONCS: u8 = 0xED;

/// Enable 3 gamma control (0xF2)
pub const EN3GAM: u8 = 0xF2;

/// Pump ratio control (0xF7)
///
/// Has a subtle effect on color saturation.
pub const PURTCTR: u8 = 0xF7;

/// Pixel format parameter for 16 bits per pixel (RGB565)
pub const PIXEL_FORMAT_16BIT: u8 = 0x55;

/// Memory access control (MADCTL) bit flags
pub mod madctl {
    /// Row address order (mirror Y)
    pub const MY: u8 = 0x80;
    /// Column address order (mirror X)
    pub const MX: u8 = 0x40;
    /// Row/column exchange
    pub const MV: u8 = 0x20;
    /// Vertical refresh order
    pub const ML: u8 = 0x10;
    /// BGR color filter panel order
    pub const BGR: u8 = 0x08;
    /// Horizontal refresh order
    pub const MH: u8 = 0x04;
}

/// Registers that can be read back with
/// [`Display::read_diagnostic`](crate::Display::read_diagnostic)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ReadRegister {
    /// Read display power mode (0x0A)
    PowerMode = 0x0A,
    /// Read MADCTL (0x0B)
    MemoryAccessControl = 0x0B,
    /// Read pixel format (0x0C)
    PixelFormat = 0x0C,
    /// Read image format (0x0D)
    ImageFormat = 0x0D,
    /// Read self-diagnostic result (0x0F)
    SelfDiagnostic = 0x0F,
}

impl From<ReadRegister> for u8 {
    fn from(register: ReadRegister) -> Self {
        register as u8
    }
}
