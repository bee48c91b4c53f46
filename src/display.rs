//! Core display operations

use embedded_hal::delay::DelayNs;

use crate::command::{
    CASET, DFUNCTR, DISPOFF, DISPON, DTMCTRA, DTMCTRC, EN3GAM, FRMCTR1, GAMMASET, GMCTRN1,
    GMCTRP1, INVOFF, INVON, MADCTL, NORON, PASET, PIXEL_FORMAT_16BIT, PIXFMT, PURTCTR, PWCTR1,
    PWCTR2, PWCTRA, PWCTRB, PWONCS, RAMWR, READ_INDEX, ReadRegister, SLPIN, SLPOUT, SWRESET,
    VMCTR1, VMCTR2, VSCRDEF, VSCRSADD,
};
use crate::config::{Config, Dimensions, Rotation};
use crate::error::Error;
use crate::interface::DisplayInterface;
use crate::rotation;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Settle time after a software reset, in milliseconds
const SOFT_RESET_SETTLE_MS: u32 = 120;
/// Settle time after Display Off during init, in milliseconds
const DISPLAY_OFF_SETTLE_MS: u32 = 5;
/// Settle time after Sleep Out and Display On during init, in milliseconds
const WAKE_SETTLE_MS: u32 = 150;
/// Settle time when toggling sleep with [`Display::enable_display`], in milliseconds
const SLEEP_SETTLE_MS: u32 = 120;

/// Core display driver for the ILI9341
///
/// Owns the interface and tracks the panel geometry. Call
/// [`init`](Self::init) once after power-up before any other operation.
///
/// Pixel data is written by setting an address window and streaming
/// big-endian RGB565 bytes with [`write_pixels`](Self::write_pixels).
/// For embedded-graphics support enable the `graphics` feature.
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Current rotation
    rotation: Rotation,
    /// Effective dimensions under the current rotation
    size: Dimensions,
    /// Whether the panel is awake and displaying
    is_display_on: bool,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// No bytes are sent until [`init`](Self::init).
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            rotation: config.rotation,
            size: config.rotated_dimensions(),
            config,
            is_display_on: false,
        }
    }

    /// Reset and initialize the controller
    ///
    /// Pulses the reset pin (or sends a software reset when none is wired),
    /// then writes the power, VCOM, pixel format and gamma registers from the
    /// [`Config`] and wakes the panel. Takes roughly 450ms.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.interface.begin().map_err(Error::Interface)?;
        self.reset(delay)?;

        self.send_command(DISPOFF)?;
        delay.delay_ms(DISPLAY_OFF_SETTLE_MS);

        log::debug!("ili9341: power control");
        self.init_power()?;
        log::debug!("ili9341: panel setup");
        self.init_panel()?;
        self.init_gamma()?;

        self.send_command(SLPOUT)?;
        delay.delay_ms(WAKE_SETTLE_MS);
        self.send_command(DISPON)?;
        delay.delay_ms(WAKE_SETTLE_MS);

        self.is_display_on = true;
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        let pulsed = self
            .interface
            .hardware_reset(delay)
            .map_err(Error::Interface)?;
        if pulsed {
            log::debug!("ili9341: hardware reset");
        } else {
            log::debug!("ili9341: software reset");
            self.send_command(SWRESET)?;
            delay.delay_ms(SOFT_RESET_SETTLE_MS);
        }
        Ok(())
    }

    fn init_power(&mut self) -> DisplayResult<I> {
        let Config {
            power_control_a,
            power_control_b,
            driver_timing_a,
            driver_timing_c,
            power_on_sequence,
            pump_ratio,
            ..
        } = self.config;
        self.write_register(PWCTRA, &power_control_a)?;
        self.write_register(PWCTRB, &power_control_b)?;
        self.write_register(DTMCTRA, &driver_timing_a)?;
        self.write_register(DTMCTRC, &driver_timing_c)?;
        self.write_register(PWONCS, &power_on_sequence)?;
        self.write_register(PURTCTR, &[pump_ratio])
    }

    fn init_panel(&mut self) -> DisplayResult<I> {
        let Config {
            power_control_1,
            power_control_2,
            vcom_control_1,
            vcom_control_2,
            rotation,
            frame_rate,
            display_function,
            ..
        } = self.config;
        self.write_register(PWCTR1, &[power_control_1])?;
        self.write_register(PWCTR2, &[power_control_2])?;
        self.write_register(VMCTR1, &vcom_control_1)?;
        self.write_register(VMCTR2, &[vcom_control_2])?;
        self.set_rotation(rotation)?;
        self.write_register(VSCRSADD, &[0x00])?;
        self.write_register(PIXFMT, &[PIXEL_FORMAT_16BIT])?;
        self.write_register(FRMCTR1, &frame_rate)?;
        self.write_register(DFUNCTR, &display_function)?;
        self.write_register(EN3GAM, &[0x00])
    }

    fn init_gamma(&mut self) -> DisplayResult<I> {
        let Config {
            gamma_curve,
            positive_gamma,
            negative_gamma,
            ..
        } = self.config;
        self.write_register(GAMMASET, &[gamma_curve])?;
        self.write_register(GMCTRP1, &positive_gamma)?;
        self.write_register(GMCTRN1, &negative_gamma)
    }

    /// Set the display orientation
    ///
    /// Writes the memory access control register and swaps the effective
    /// width and height for the 90° and 270° orientations.
    pub fn set_rotation(&mut self, rotation: Rotation) -> DisplayResult<I> {
        let madctl = rotation::madctl(rotation);
        log::trace!("ili9341: rotation {:?} (MADCTL {:#04x})", rotation, madctl);
        self.write_register(MADCTL, &[madctl])?;
        self.rotation = rotation;
        self.size = rotation::rotated_dimensions(self.config.dimensions, rotation);
        Ok(())
    }

    /// Set the RAM address window and start a memory write
    ///
    /// The next [`write_pixels`](Self::write_pixels) burst fills the
    /// rectangle `(x0, y0)`-`(x1, y1)` (inclusive) row by row starting at
    /// `(x0, y0)`. Coordinates are passed to the controller unchecked.
    pub fn set_address_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> DisplayResult<I> {
        let [x0_hi, x0_lo] = x0.to_be_bytes();
        let [x1_hi, x1_lo] = x1.to_be_bytes();
        let [y0_hi, y0_lo] = y0.to_be_bytes();
        let [y1_hi, y1_lo] = y1.to_be_bytes();
        self.write_register(CASET, &[x0_hi, x0_lo, x1_hi, x1_lo])?;
        self.write_register(PASET, &[y0_hi, y0_lo, y1_hi, y1_lo])?;
        self.send_command(RAMWR)
    }

    /// Stream raw pixel bytes into the current address window
    ///
    /// Bytes are sent unchanged; with the default pixel format each pixel is
    /// two bytes of big-endian RGB565.
    pub fn write_pixels(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.send_data(data)
    }

    /// Define the vertical scroll area
    ///
    /// `top` and `bottom` are the fixed areas in lines; everything between
    /// them scrolls.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidScrollMargins` without sending anything if
    /// `top + bottom` exceeds the baseline panel height.
    pub fn set_scroll_margins(&mut self, top: u16, bottom: u16) -> DisplayResult<I> {
        let height = self.config.dimensions.height;
        let fixed = u32::from(top) + u32::from(bottom);
        if fixed > u32::from(height) {
            log::warn!(
                "ili9341: scroll margins {}+{} exceed height {}",
                top,
                bottom,
                height
            );
            return Err(Error::InvalidScrollMargins {
                top,
                bottom,
                height,
            });
        }
        let middle = height - top - bottom;

        let [top_hi, top_lo] = top.to_be_bytes();
        let [mid_hi, mid_lo] = middle.to_be_bytes();
        let [bottom_hi, bottom_lo] = bottom.to_be_bytes();
        self.write_register(
            VSCRDEF,
            &[top_hi, top_lo, mid_hi, mid_lo, bottom_hi, bottom_lo],
        )
    }

    /// Set the vertical scroll start address
    ///
    /// `line` is the GRAM line shown at the top of the scroll area.
    pub fn scroll_to(&mut self, line: u16) -> DisplayResult<I> {
        self.write_register(VSCRSADD, &line.to_be_bytes())
    }

    /// Leave scroll or partial mode
    pub fn normal_mode(&mut self) -> DisplayResult<I> {
        self.send_command(NORON)
    }

    /// Enable or disable color inversion
    pub fn invert_display(&mut self, invert: bool) -> DisplayResult<I> {
        self.send_command(if invert { INVON } else { INVOFF })
    }

    /// Wake the panel and turn it on, or turn it off and put it to sleep
    ///
    /// Each direction waits 120ms for the sleep transition to settle.
    pub fn enable_display<D: DelayNs>(&mut self, enable: bool, delay: &mut D) -> DisplayResult<I> {
        if enable {
            self.send_command(SLPOUT)?;
            delay.delay_ms(SLEEP_SETTLE_MS);
            self.send_command(DISPON)?;
        } else {
            self.send_command(DISPOFF)?;
            self.send_command(SLPIN)?;
            delay.delay_ms(SLEEP_SETTLE_MS);
        }
        self.is_display_on = enable;
        Ok(())
    }

    /// Turn the display off and drive the control lines low
    ///
    /// [`init`](Self::init) must be called again before further use.
    pub fn power_down<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.enable_display(false, delay)?;
        self.interface.power_down().map_err(Error::Interface)
    }

    /// Read a single diagnostic byte from the controller
    ///
    /// Selects parameter `index` of `register` through the read index
    /// preamble, issues the read command and clocks back one byte.
    ///
    /// # Errors
    ///
    /// Returns `Error::ReadUnsupported` without touching the bus if the
    /// interface has no data-in line.
    pub fn read_diagnostic(&mut self, register: ReadRegister, index: u8) -> Result<u8, Error<I>> {
        if !self.interface.can_read() {
            log::warn!("ili9341: diagnostic read needs a MISO pin");
            return Err(Error::ReadUnsupported);
        }
        self.interface
            .read_register(READ_INDEX, 0x10u8.wrapping_add(index), register.into())
            .map_err(Error::Interface)
    }

    /// Send a command followed by its parameters
    fn write_register(&mut self, cmd: u8, data: &[u8]) -> DisplayResult<I> {
        self.send_command(cmd)?;
        self.send_data(data)
    }

    /// Send a command to the display controller
    fn send_command(&mut self, cmd: u8) -> DisplayResult<I> {
        self.interface.send_command(cmd).map_err(Error::Interface)
    }

    /// Send data to the display controller
    fn send_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.interface.send_data(data).map_err(Error::Interface)
    }

    /// Get the baseline (unrotated) display dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.config.dimensions
    }

    /// Current width in pixels, after rotation
    pub fn width(&self) -> u16 {
        self.size.width
    }

    /// Current height in pixels, after rotation
    pub fn height(&self) -> u16 {
        self.size.height
    }

    /// Get display rotation
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Whether the panel is awake and displaying
    pub fn is_display_on(&self) -> bool {
        self.is_display_on
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Release the hardware interface
    pub fn release(self) -> I {
        self.interface
    }
}
