//! ILI9341 TFT Display Driver
//!
//! A driver for the ILI9341 240x320 RGB565 TFT controller over hardware or
//! bit-banged SPI.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Hardware SPI via `SpiBus` with a driver-owned CS pin, or bit-banged SPI
//!   on plain GPIO pins
//! - Optional reset pin (software reset fallback)
//! - Hardware rotation, vertical scrolling and color inversion
//! - Diagnostic register reads
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::SpiBus;
//! use ili9341::{Builder, Dimensions, Display, Rotation, SpiInterface};
//!
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
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let cs = MockPin;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let mut delay = MockDelay;
//! let interface = SpiInterface::new(spi, cs, dc, rst);
//! let config = match Builder::new()
//!     .dimensions(Dimensions::ILI9341)
//!     .rotation(Rotation::Rotate90)
//!     .build()
//! {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface, config);
//! if display.init(&mut delay).is_err() {
//!     return;
//! }
//!
//! // Fill a 10x10 square with red
//! let red = 0xF800u16.to_be_bytes();
//! let _ = display.set_address_window(0, 0, 9, 9);
//! for _ in 0..100 {
//!     let _ = display.write_pixels(&red);
//! }
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// ILI9341 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;
/// Rotation to memory access control mapping
pub mod rotation;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use command::ReadRegister;
pub use config::{Builder, Config, Dimensions, MAX_COLUMNS, MAX_ROWS, Rotation};
pub use display::Display;
pub use error::{BuilderError, Error};
pub use interface::InterfaceError;
pub use interface::{
    BitBangInterface, BitBangPins, DEFAULT_BIT_DELAY_US, DisplayInterface, SpiInterface,
};
