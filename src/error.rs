//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! ## Example
//!
//! ```
//! use ili9341::{Builder, Dimensions, BuilderError};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Invalid dimensions
//! let result = Dimensions::new(320, 480); // Too large
//! assert!(result.is_err());
//! ```

use crate::interface::DisplayInterface;

/// Maximum columns (source outputs) driven by the ILI9341
pub const MAX_COLUMNS: u16 = 240;

/// Maximum rows (gate outputs) driven by the ILI9341
///
/// NOTE: The vertical scroll area is defined against this many lines on
/// most modules; configure [`crate::Dimensions`] to match the panel.
pub const MAX_ROWS: u16 = 320;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
/// This allows error handling code to match on the underlying hardware error.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
    /// Scroll margins do not fit on the panel
    ///
    /// `top + bottom` must not exceed the baseline panel height. Nothing is
    /// sent to the controller when this is returned.
    InvalidScrollMargins {
        /// Requested top fixed area in lines
        top: u16,
        /// Requested bottom fixed area in lines
        bottom: u16,
        /// Baseline panel height in lines
        height: u16,
    },
    /// The interface cannot read from the controller
    ///
    /// Returned by [`Display::read_diagnostic`](crate::Display::read_diagnostic)
    /// when a bit-banged interface has no MISO pin. No bytes are transferred.
    ReadUnsupported,
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::InvalidScrollMargins {
                top,
                bottom,
                height,
            } => write!(
                f,
                "Invalid scroll margins: top {top} + bottom {bottom} exceeds height {height}"
            ),
            Self::ReadUnsupported => write!(f, "Interface has no data-in line"),
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Debug)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Width in pixels requested
        width: u16,
        /// Height in pixels requested
        height: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (max {MAX_COLUMNS}x{MAX_ROWS}, both non-zero)"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
