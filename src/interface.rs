//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and its two
//! implementations for talking to the ILI9341:
//!
//! - [`SpiInterface`] - hardware SPI through an embedded-hal [`SpiBus`]
//! - [`BitBangInterface`] - software SPI toggled over GPIO pins
//!
//! ## Hardware Requirements
//!
//! The ILI9341 serial interface needs:
//! - **SCK** and **MOSI** (owned by the SPI peripheral, or bit-banged)
//! - **CS**: Chip select (output, active low)
//! - **DC**: Data/Command select (output, low=command, high=data)
//! - **RST**: Reset (output, active low, optional)
//! - **MISO**: Data from the controller (optional, only for diagnostic reads)
//!
//! Both interfaces drive CS themselves. A register read must keep CS low
//! from the index preamble to the returned byte while DC toggles between
//! phases, which an [`SpiDevice`](embedded_hal::spi::SpiDevice) transaction
//! cannot express.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::SpiBus;
//! use ili9341::{DisplayInterface, SpiInterface};
//! # use core::convert::Infallible;
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
//! # let mut delay = MockDelay;
//! // Create interface with SPI bus, CS, DC and RST pins
//! let mut interface = SpiInterface::new(MockSpi, MockPin, MockPin, MockPin);
//!
//! // Pulse the reset line
//! let _ = interface.hardware_reset(&mut delay);
//!
//! // Send command
//! let _ = interface.send_command(0x29); // Display on
//!
//! // Send data
//! let _ = interface.send_data(&[0x00, 0x00, 0x00, 0xEF]);
//! ```

use core::convert::Infallible;
use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin, PinState};
use embedded_hal::spi::SpiBus;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Reset line held high before the pulse, in milliseconds
const RESET_SETUP_MS: u32 = 5;
/// Reset pulse width (low), in milliseconds
const RESET_PULSE_MS: u32 = 20;
/// Settle time after releasing reset, in milliseconds
const RESET_SETTLE_MS: u32 = 120;

/// Default half-period delay for the bit-banged clock, in microseconds
pub const DEFAULT_BIT_DELAY_US: u16 = 0;

/// Trait for hardware interface to the ILI9341 controller
///
/// This trait abstracts over the two transport paths, allowing the
/// [`Display`](crate::display::Display) to work with a hardware SPI
/// peripheral, a bit-banged bus, or a recording fake in tests.
///
/// ## Implementing
///
/// For most cases, use [`SpiInterface`] or [`BitBangInterface`]. If you
/// need custom behavior (e.g., a parallel bus), implement this trait on
/// your own type.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Put the control lines in their idle state
    ///
    /// Called once at the start of
    /// [`Display::init`](crate::display::Display::init).
    fn begin(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Send a command byte to the controller
    ///
    /// The implementation must:
    /// 1. Assert CS
    /// 2. Set DC pin low (command mode)
    /// 3. Send the command byte
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send data bytes to the controller
    ///
    /// The implementation must:
    /// 1. Set DC pin high (data mode)
    /// 2. Send the data bytes in order
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Perform a hardware reset, if a reset pin is wired
    ///
    /// The implementation must, when it owns a reset pin:
    /// 1. Set RST high, wait at least 5ms
    /// 2. Set RST low, wait at least 20ms
    /// 3. Set RST high, wait at least 120ms
    ///
    /// Returns `false` without touching the bus when there is no reset pin;
    /// the caller then falls back to a software reset.
    fn hardware_reset<D: DelayNs>(&mut self, delay: &mut D)
    -> InterfaceResult<bool, Self::Error>;

    /// Whether [`read_register`](Self::read_register) can return controller data
    fn can_read(&self) -> bool;

    /// Read one byte of a register through an index preamble
    ///
    /// The implementation must, with CS held low for the whole sequence:
    /// 1. Send `select` as a command
    /// 2. Send `param` as data
    /// 3. Send `register` as a command
    /// 4. Set DC high and clock in one byte
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer fails or the interface has no
    /// data-in line.
    fn read_register(
        &mut self,
        select: u8,
        param: u8,
        register: u8,
    ) -> InterfaceResult<u8, Self::Error>;

    /// Drive the control lines low for power down
    fn power_down(&mut self) -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
    /// No data-in (MISO) pin configured
    ReadUnsupported,
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
            Self::ReadUnsupported => write!(f, "No MISO pin configured"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

fn pulse_reset<RST: OutputPin, D: DelayNs>(rst: &mut RST, delay: &mut D) -> Result<(), RST::Error> {
    rst.set_high()?;
    delay.delay_ms(RESET_SETUP_MS);
    rst.set_low()?;
    delay.delay_ms(RESET_PULSE_MS);
    rst.set_high()?;
    delay.delay_ms(RESET_SETTLE_MS);
    Ok(())
}

/// Hardware SPI interface implementation
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI and GPIO traits.
/// Owns the bus and the CS pin: every command, every data burst and every
/// register read is one CS frame. The bus is flushed before DC changes level
/// and before CS is released.
///
/// ## Type Parameters
///
/// * `SPI` - SPI bus implementing [`SpiBus`]
/// * `CS` - Chip select pin implementing [`OutputPin`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
///
/// ## Example
///
/// ```rust,no_run
/// use ili9341::{Builder, Dimensions, Display, SpiInterface};
/// # use core::convert::Infallible;
/// # use embedded_hal::digital::OutputPin;
/// # use embedded_hal::spi::SpiBus;
/// # struct MockSpi;
/// # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
/// # impl SpiBus for MockSpi {
/// #     fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
/// #     fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> { Ok(()) }
/// #     fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> { Ok(()) }
/// #     fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
/// #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// # struct MockPin;
/// # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
/// # impl OutputPin for MockPin {
/// #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// // No reset pin wired: init falls back to a software reset
/// let interface = SpiInterface::without_reset(MockSpi, MockPin, MockPin);
///
/// # let config = match Builder::new().dimensions(Dimensions::ILI9341).build() {
/// #     Ok(config) => config,
/// #     Err(_) => return,
/// # };
/// let _display = Display::new(interface, config);
/// ```
pub struct SpiInterface<SPI, CS, DC, RST> {
    /// SPI bus for communication
    spi: SPI,
    /// Chip select pin (active low)
    cs: CS,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: Option<RST>,
}

impl<SPI, CS, DC, RST> SpiInterface<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a new interface with a hardware reset pin
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI bus (must implement [`SpiBus`])
    /// * `cs` - Chip select pin (output, active low)
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin (output, active low)
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST) -> Self {
        Self {
            spi,
            cs,
            dc,
            rst: Some(rst),
        }
    }

    /// Whether a hardware reset pin is wired
    pub fn has_reset_pin(&self) -> bool {
        self.rst.is_some()
    }

    /// Release the SPI bus and pins
    pub fn release(self) -> (SPI, CS, DC, Option<RST>) {
        (self.spi, self.cs, self.dc, self.rst)
    }
}

impl<SPI, CS, DC> SpiInterface<SPI, CS, DC, DC>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
{
    /// Create a new interface without a reset pin
    ///
    /// [`Display::init`](crate::display::Display::init) will issue a
    /// software reset instead of pulsing RST.
    pub fn without_reset(spi: SPI, cs: CS, dc: DC) -> Self {
        Self {
            spi,
            cs,
            dc,
            rst: None,
        }
    }
}

type SpiResult<T, SPI, PinErr> =
    InterfaceResult<T, InterfaceError<<SPI as embedded_hal::spi::ErrorType>::Error, PinErr>>;

impl<SPI, CS, DC, RST, PinErr> SpiInterface<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
{
    /// Run `phases` inside one CS frame
    ///
    /// CS is released even when a phase fails; the first error wins.
    fn framed<T>(
        &mut self,
        phases: impl FnOnce(&mut Self) -> SpiResult<T, SPI, PinErr>,
    ) -> SpiResult<T, SPI, PinErr> {
        self.cs.set_low().map_err(InterfaceError::Pin)?;
        let result = phases(self);
        let released = self.cs.set_high().map_err(InterfaceError::Pin);
        let value = result?;
        released?;
        Ok(value)
    }

    fn write_phase(&mut self, level: PinState, bytes: &[u8]) -> SpiResult<(), SPI, PinErr> {
        self.dc.set_state(level).map_err(InterfaceError::Pin)?;
        self.spi.write(bytes).map_err(InterfaceError::Spi)?;
        self.spi.flush().map_err(InterfaceError::Spi)
    }
}

impl<SPI, CS, DC, RST, PinErr> DisplayInterface for SpiInterface<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    SPI::Error: Debug,
    CS: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn begin(&mut self) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.cs.set_high().map_err(InterfaceError::Pin)
    }

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.framed(|bus| bus.write_phase(PinState::Low, &[command]))
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.framed(|bus| bus.write_phase(PinState::High, data))
    }

    fn hardware_reset<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> InterfaceResult<bool, Self::Error> {
        match self.rst.as_mut() {
            Some(rst) => {
                pulse_reset(rst, delay).map_err(InterfaceError::Pin)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn can_read(&self) -> bool {
        true
    }

    fn read_register(
        &mut self,
        select: u8,
        param: u8,
        register: u8,
    ) -> InterfaceResult<u8, Self::Error> {
        self.framed(|bus| {
            bus.write_phase(PinState::Low, &[select])?;
            bus.write_phase(PinState::High, &[param])?;
            bus.write_phase(PinState::Low, &[register])?;
            bus.dc.set_high().map_err(InterfaceError::Pin)?;
            let mut read = [0u8];
            bus.spi
                .transfer(&mut read, &[0x00])
                .map_err(InterfaceError::Spi)?;
            bus.spi.flush().map_err(InterfaceError::Spi)?;
            Ok(read[0])
        })
    }

    fn power_down(&mut self) -> InterfaceResult<(), Self::Error> {
        if let Some(rst) = self.rst.as_mut() {
            rst.set_low().map_err(InterfaceError::Pin)?;
        }
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.cs.set_low().map_err(InterfaceError::Pin)
    }
}

/// GPIO pins for a bit-banged interface
///
/// `miso` and `rst` are optional. Without `miso`, diagnostic reads are
/// rejected; without `rst`, initialization uses a software reset.
pub struct BitBangPins<SCLK, MOSI, MISO, CS, DC, RST> {
    /// Serial clock (output)
    pub sclk: SCLK,
    /// Data to the controller (output)
    pub mosi: MOSI,
    /// Data from the controller (input)
    pub miso: Option<MISO>,
    /// Chip select (output, active low)
    pub cs: CS,
    /// Data/Command select (output, low=command, high=data)
    pub dc: DC,
    /// Reset (output, active low)
    pub rst: Option<RST>,
}

/// Software (bit-banged) SPI interface implementation
///
/// Shifts bytes MSB first in SPI mode 0: MOSI is set up while SCLK is low
/// and sampled on the rising edge. CS is asserted by every command and
/// stays asserted across the following data bytes; it is released after a
/// register read and in [`begin`](DisplayInterface::begin).
///
/// ## Example
///
/// ```rust,no_run
/// use ili9341::{BitBangInterface, BitBangPins};
/// # use core::convert::Infallible;
/// # use embedded_hal::delay::DelayNs;
/// # use embedded_hal::digital::{InputPin, OutputPin};
/// # struct MockPin;
/// # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
/// # impl OutputPin for MockPin {
/// #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// # impl InputPin for MockPin {
/// #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(false) }
/// #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(true) }
/// # }
/// # struct MockDelay;
/// # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
/// let pins = BitBangPins {
///     sclk: MockPin,
///     mosi: MockPin,
///     miso: None::<MockPin>,
///     cs: MockPin,
///     dc: MockPin,
///     rst: Some(MockPin),
/// };
/// let mut interface = BitBangInterface::new(pins, MockDelay, 1);
///
/// // Slow the clock down for long wires
/// interface.set_bit_delay_us(5);
/// ```
pub struct BitBangInterface<SCLK, MOSI, MISO, CS, DC, RST, D> {
    /// Bus pins
    pins: BitBangPins<SCLK, MOSI, MISO, CS, DC, RST>,
    /// Delay used for clock timing
    delay: D,
    /// Half-period of the serial clock in microseconds
    bit_delay_us: u16,
}

fn pause<D: DelayNs>(delay: &mut D, us: u16) {
    if us > 0 {
        delay.delay_us(u32::from(us));
    }
}

impl<SCLK, MOSI, MISO, CS, DC, RST, D, PinErr> BitBangInterface<SCLK, MOSI, MISO, CS, DC, RST, D>
where
    SCLK: OutputPin<Error = PinErr>,
    MOSI: OutputPin<Error = PinErr>,
    MISO: InputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    D: DelayNs,
{
    /// Create a new bit-banged interface
    ///
    /// # Arguments
    ///
    /// * `pins` - Bus pins
    /// * `delay` - Delay implementation for clock timing
    /// * `bit_delay_us` - Clock half-period in microseconds (0 = as fast as GPIO allows)
    pub fn new(pins: BitBangPins<SCLK, MOSI, MISO, CS, DC, RST>, delay: D, bit_delay_us: u16) -> Self {
        Self {
            pins,
            delay,
            bit_delay_us,
        }
    }

    /// Set the clock half-period in microseconds
    pub fn set_bit_delay_us(&mut self, bit_delay_us: u16) -> &mut Self {
        self.bit_delay_us = bit_delay_us;
        self
    }

    /// Get the clock half-period in microseconds
    pub fn bit_delay_us(&self) -> u16 {
        self.bit_delay_us
    }

    /// Release the pins and delay
    pub fn release(self) -> (BitBangPins<SCLK, MOSI, MISO, CS, DC, RST>, D) {
        (self.pins, self.delay)
    }

    fn shift_out(&mut self, byte: u8) -> InterfaceResult<(), InterfaceError<Infallible, PinErr>> {
        for bit in (0..8).rev() {
            self.pins
                .mosi
                .set_state(PinState::from(byte & (1 << bit) != 0))
                .map_err(InterfaceError::Pin)?;
            self.pins.sclk.set_high().map_err(InterfaceError::Pin)?;
            pause(&mut self.delay, self.bit_delay_us);
            self.pins.sclk.set_low().map_err(InterfaceError::Pin)?;
            pause(&mut self.delay, self.bit_delay_us);
        }
        Ok(())
    }

    fn shift_in(&mut self) -> InterfaceResult<u8, InterfaceError<Infallible, PinErr>> {
        let Some(miso) = self.pins.miso.as_mut() else {
            return Err(InterfaceError::ReadUnsupported);
        };
        let sclk = &mut self.pins.sclk;
        let mut value = 0u8;
        for _ in 0..8 {
            sclk.set_high().map_err(InterfaceError::Pin)?;
            pause(&mut self.delay, self.bit_delay_us);
            let bit = miso.is_high().map_err(InterfaceError::Pin)?;
            value = (value << 1) | u8::from(bit);
            sclk.set_low().map_err(InterfaceError::Pin)?;
            pause(&mut self.delay, self.bit_delay_us);
        }
        Ok(value)
    }
}

impl<SCLK, MOSI, MISO, CS, DC, RST, D, PinErr> DisplayInterface
    for BitBangInterface<SCLK, MOSI, MISO, CS, DC, RST, D>
where
    SCLK: OutputPin<Error = PinErr>,
    MOSI: OutputPin<Error = PinErr>,
    MISO: InputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    D: DelayNs,
    PinErr: Debug,
{
    type Error = InterfaceError<Infallible, PinErr>;

    fn begin(&mut self) -> InterfaceResult<(), Self::Error> {
        self.pins.dc.set_low().map_err(InterfaceError::Pin)?;
        self.pins.cs.set_high().map_err(InterfaceError::Pin)?;
        self.pins.sclk.set_low().map_err(InterfaceError::Pin)?;
        self.pins.mosi.set_low().map_err(InterfaceError::Pin)?;
        Ok(())
    }

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.pins.cs.set_low().map_err(InterfaceError::Pin)?;
        self.pins.dc.set_low().map_err(InterfaceError::Pin)?;
        self.shift_out(command)
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.pins.dc.set_high().map_err(InterfaceError::Pin)?;
        for &byte in data {
            self.shift_out(byte)?;
        }
        Ok(())
    }

    fn hardware_reset<D2: DelayNs>(
        &mut self,
        delay: &mut D2,
    ) -> InterfaceResult<bool, Self::Error> {
        match self.pins.rst.as_mut() {
            Some(rst) => {
                pulse_reset(rst, delay).map_err(InterfaceError::Pin)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn can_read(&self) -> bool {
        self.pins.miso.is_some()
    }

    fn read_register(
        &mut self,
        select: u8,
        param: u8,
        register: u8,
    ) -> InterfaceResult<u8, Self::Error> {
        if !self.can_read() {
            return Err(InterfaceError::ReadUnsupported);
        }
        self.send_command(select)?;
        self.send_data(&[param])?;
        self.send_command(register)?;
        self.pins.dc.set_high().map_err(InterfaceError::Pin)?;
        let value = self.shift_in()?;
        self.pins.cs.set_high().map_err(InterfaceError::Pin)?;
        Ok(value)
    }

    fn power_down(&mut self) -> InterfaceResult<(), Self::Error> {
        if let Some(rst) = self.pins.rst.as_mut() {
            rst.set_low().map_err(InterfaceError::Pin)?;
        }
        self.pins.dc.set_low().map_err(InterfaceError::Pin)?;
        self.pins.cs.set_low().map_err(InterfaceError::Pin)?;
        self.pins.sclk.set_low().map_err(InterfaceError::Pin)?;
        self.pins.mosi.set_low().map_err(InterfaceError::Pin)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ReadRegister;
    use crate::config::{Builder, Dimensions};
    use crate::display::Display;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    #[derive(Clone, Debug, PartialEq)]
    enum Event {
        Pin(&'static str, bool),
        Write(Vec<u8>),
        Transfer(Vec<u8>),
        Flush,
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct MockSpi {
        log: Log,
        response: u8,
    }

    impl embedded_hal::spi::ErrorType for MockSpi {
        type Error = Infallible;
    }

    impl SpiBus for MockSpi {
        fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            words.fill(self.response);
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Event::Write(words.to_vec()));
            Ok(())
        }

        fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Event::Transfer(write.to_vec()));
            read.fill(self.response);
            Ok(())
        }

        fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            words.fill(self.response);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Event::Flush);
            Ok(())
        }
    }

    struct MockPin {
        name: &'static str,
        log: Log,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Event::Pin(self.name, false));
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Event::Pin(self.name, true));
            Ok(())
        }
    }

    /// Input pin that replays `bits` MSB first
    struct MockMiso {
        bits: u8,
        next: u8,
    }

    impl embedded_hal::digital::ErrorType for MockMiso {
        type Error = Infallible;
    }

    impl InputPin for MockMiso {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            let bit = self.bits & (0x80 >> (self.next % 8)) != 0;
            self.next += 1;
            Ok(bit)
        }
        fn is_low(&mut self) -> Result<bool, Self::Error> {
            self.is_high().map(|high| !high)
        }
    }

    struct MockDelay;
    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn pin(name: &'static str, log: &Log) -> MockPin {
        MockPin {
            name,
            log: log.clone(),
        }
    }

    type TestSpi = SpiInterface<MockSpi, MockPin, MockPin, MockPin>;

    fn spi(log: &Log, response: u8, with_reset: bool) -> TestSpi {
        let bus = MockSpi {
            log: log.clone(),
            response,
        };
        if with_reset {
            SpiInterface::new(bus, pin("cs", log), pin("dc", log), pin("rst", log))
        } else {
            SpiInterface::without_reset(bus, pin("cs", log), pin("dc", log))
        }
    }

    type TestBitBang = BitBangInterface<MockPin, MockPin, MockMiso, MockPin, MockPin, MockPin, MockDelay>;

    fn bitbang(log: &Log, miso: Option<MockMiso>, with_reset: bool) -> TestBitBang {
        let pins = BitBangPins {
            sclk: pin("sclk", log),
            mosi: pin("mosi", log),
            miso,
            cs: pin("cs", log),
            dc: pin("dc", log),
            rst: with_reset.then(|| pin("rst", log)),
        };
        BitBangInterface::new(pins, MockDelay, DEFAULT_BIT_DELAY_US)
    }

    /// Bytes seen on MOSI at each SCLK rising edge
    fn clocked_bytes(events: &[Event]) -> Vec<u8> {
        let mut mosi = false;
        let mut bits = Vec::new();
        for event in events {
            match event {
                Event::Pin("mosi", level) => mosi = *level,
                Event::Pin("sclk", true) => bits.push(mosi),
                _ => {}
            }
        }
        bits.chunks(8)
            .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit)))
            .collect()
    }

    fn cs_frames(events: &[Event]) -> usize {
        events
            .iter()
            .filter(|event| **event == Event::Pin("cs", false))
            .count()
    }

    #[test]
    fn test_spi_command_then_data_framing() {
        let log = Log::default();
        let mut interface = spi(&log, 0, true);

        interface.send_command(0x2A).unwrap();
        interface.send_data(&[0x00, 0x10, 0x00, 0x20]).unwrap();

        assert_eq!(
            *log.borrow(),
            [
                Event::Pin("cs", false),
                Event::Pin("dc", false),
                Event::Write(vec![0x2A]),
                Event::Flush,
                Event::Pin("cs", true),
                Event::Pin("cs", false),
                Event::Pin("dc", true),
                Event::Write(vec![0x00, 0x10, 0x00, 0x20]),
                Event::Flush,
                Event::Pin("cs", true),
            ]
        );
    }

    #[test]
    fn test_spi_read_register_holds_cs_for_all_phases() {
        let log = Log::default();
        let mut interface = spi(&log, 0xA5, false);

        assert!(interface.can_read());
        assert_eq!(interface.read_register(0xD9, 0x10, 0x0A).unwrap(), 0xA5);

        let events = log.borrow();
        assert_eq!(cs_frames(&events), 1);
        assert_eq!(events.first(), Some(&Event::Pin("cs", false)));
        assert_eq!(events.last(), Some(&Event::Pin("cs", true)));
    }

    #[test]
    fn test_diagnostic_read_over_spi_framing() {
        let log = Log::default();
        let config = Builder::new()
            .dimensions(Dimensions::ILI9341)
            .build()
            .unwrap();
        let mut display = Display::new(spi(&log, 0x9C, true), config);

        let value = display.read_diagnostic(ReadRegister::PowerMode, 2);

        assert!(matches!(value, Ok(0x9C)));
        assert_eq!(
            *log.borrow(),
            [
                Event::Pin("cs", false),
                Event::Pin("dc", false),
                Event::Write(vec![0xD9]),
                Event::Flush,
                Event::Pin("dc", true),
                Event::Write(vec![0x12]),
                Event::Flush,
                Event::Pin("dc", false),
                Event::Write(vec![0x0A]),
                Event::Flush,
                Event::Pin("dc", true),
                Event::Transfer(vec![0x00]),
                Event::Flush,
                Event::Pin("cs", true),
            ]
        );
    }

    #[test]
    fn test_spi_reset_pulse_sequence() {
        let log = Log::default();
        let mut interface = spi(&log, 0, true);

        assert!(interface.has_reset_pin());
        assert!(interface.hardware_reset(&mut MockDelay).unwrap());
        assert_eq!(
            *log.borrow(),
            [
                Event::Pin("rst", true),
                Event::Pin("rst", false),
                Event::Pin("rst", true),
            ]
        );
    }

    #[test]
    fn test_spi_without_reset_pin_skips_pulse() {
        let log = Log::default();
        let mut interface = spi(&log, 0, false);

        assert!(!interface.has_reset_pin());
        assert!(!interface.hardware_reset(&mut MockDelay).unwrap());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_spi_begin_and_power_down_levels() {
        let log = Log::default();
        let mut interface = spi(&log, 0, true);

        interface.begin().unwrap();
        interface.power_down().unwrap();
        assert_eq!(
            *log.borrow(),
            [
                Event::Pin("dc", false),
                Event::Pin("cs", true),
                Event::Pin("rst", false),
                Event::Pin("dc", false),
                Event::Pin("cs", false),
            ]
        );
    }

    #[test]
    fn test_bitbang_command_shifts_msb_first() {
        let log = Log::default();
        let mut interface = bitbang(&log, None, true);

        interface.send_command(0xA5).unwrap();

        let events = log.borrow();
        assert_eq!(events[0], Event::Pin("cs", false));
        assert_eq!(events[1], Event::Pin("dc", false));
        assert_eq!(clocked_bytes(&events), [0xA5]);
        // CS stays asserted for the parameters that follow
        assert!(!events.contains(&Event::Pin("cs", true)));
    }

    #[test]
    fn test_bitbang_data_sets_dc_once() {
        let log = Log::default();
        let mut interface = bitbang(&log, None, true);

        interface.send_data(&[0x12, 0x34, 0xFF]).unwrap();

        let events = log.borrow();
        assert_eq!(events[0], Event::Pin("dc", true));
        let dc_changes = events
            .iter()
            .filter(|event| matches!(event, Event::Pin("dc", _)))
            .count();
        assert_eq!(dc_changes, 1);
        assert_eq!(clocked_bytes(&events), [0x12, 0x34, 0xFF]);
    }

    #[test]
    fn test_bitbang_read_register_sequence() {
        let log = Log::default();
        let miso = MockMiso {
            bits: 0b1011_0010,
            next: 0,
        };
        let mut interface = bitbang(&log, Some(miso), true);

        assert!(interface.can_read());
        assert_eq!(
            interface.read_register(0xD9, 0x11, 0x0C).unwrap(),
            0b1011_0010
        );

        let events = log.borrow();
        assert_eq!(cs_frames(&events), 2);
        assert_eq!(events.first(), Some(&Event::Pin("cs", false)));
        assert_eq!(events.last(), Some(&Event::Pin("cs", true)));
        // Only the final release raises CS
        let raised = events
            .iter()
            .filter(|event| **event == Event::Pin("cs", true))
            .count();
        assert_eq!(raised, 1);
        // Three bytes out, then eight clocks in
        let rising_edges = events
            .iter()
            .filter(|event| **event == Event::Pin("sclk", true))
            .count();
        assert_eq!(rising_edges, 4 * 8);
        assert_eq!(clocked_bytes(&events)[..3], [0xD9, 0x11, 0x0C]);
    }

    #[test]
    fn test_bitbang_read_without_miso_is_rejected() {
        let log = Log::default();
        let mut interface = bitbang(&log, None, true);

        assert!(!interface.can_read());
        assert!(matches!(
            interface.read_register(0xD9, 0x10, 0x0A),
            Err(InterfaceError::ReadUnsupported)
        ));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_bitbang_begin_idles_lines() {
        let log = Log::default();
        let mut interface = bitbang(&log, None, false);

        interface.begin().unwrap();
        assert_eq!(
            *log.borrow(),
            [
                Event::Pin("dc", false),
                Event::Pin("cs", true),
                Event::Pin("sclk", false),
                Event::Pin("mosi", false),
            ]
        );
    }

    #[test]
    fn test_bitbang_power_down_without_reset_pin() {
        let log = Log::default();
        let mut interface = bitbang(&log, None, false);

        interface.power_down().unwrap();
        assert_eq!(
            *log.borrow(),
            [
                Event::Pin("dc", false),
                Event::Pin("cs", false),
                Event::Pin("sclk", false),
                Event::Pin("mosi", false),
            ]
        );
    }

    #[test]
    fn test_set_bit_delay() {
        let log = Log::default();
        let mut interface = bitbang(&log, None, false);
        assert_eq!(interface.bit_delay_us(), DEFAULT_BIT_DELAY_US);

        interface.set_bit_delay_us(10);
        assert_eq!(interface.bit_delay_us(), 10);
    }
}
