//! Controller command definitions for SSD1306-class OLED panels
//!
//! These are the page-addressed monochrome controllers that the band layout
//! maps onto directly: one band is one controller page, and each band column
//! byte holds eight vertically stacked pixels with the LSB on top.
//!
//! Commands are sent with the DC pin low; band data with DC high.

// Controller limits

/// Widest panel the controller can address, in columns
pub const MAX_COLUMNS: u16 = 128;

/// Tallest panel the controller can drive (multiplex ratio 64)
pub const MAX_ROWS: u16 = 64;

// Fundamental commands

/// Display off (sleep) command (0xAE)
pub const DISPLAY_OFF: u8 = 0xAE;

/// Display on command (0xAF)
pub const DISPLAY_ON: u8 = 0xAF;

/// Resume to RAM content display (0xA4)
pub const DISPLAY_ALL_ON_RESUME: u8 = 0xA4;

/// Entire display on, ignoring RAM content (0xA5)
///
/// Used by the diagnostic halt to light every pixel.
pub const DISPLAY_ALL_ON: u8 = 0xA5;

/// Normal (non-inverted) display (0xA6)
pub const NORMAL_DISPLAY: u8 = 0xA6;

/// Set contrast control command (0x81)
///
/// Requires 1 byte of data.
pub const SET_CONTRAST: u8 = 0x81;

// Addressing commands

/// Set memory addressing mode command (0x20)
///
/// Requires 1 byte: 0x00 = horizontal, 0x01 = vertical, 0x02 = page.
pub const SET_MEMORY_ADDRESSING_MODE: u8 = 0x20;

/// Horizontal addressing: column pointer wraps into the next page
pub const ADDRESSING_HORIZONTAL: u8 = 0x00;

/// Set column address range command (0x21)
///
/// Requires 2 bytes: [start, end]
pub const SET_COLUMN_ADDRESS: u8 = 0x21;

/// Set page address range command (0x22)
///
/// Requires 2 bytes: [start, end]
pub const SET_PAGE_ADDRESS: u8 = 0x22;

// Hardware configuration commands

/// Set display start line 0 (0x40)
pub const SET_START_LINE: u8 = 0x40;

/// Segment remap, column 127 mapped to SEG0 (0xA1)
pub const SEGMENT_REMAP: u8 = 0xA1;

/// Set multiplex ratio command (0xA8)
///
/// Requires 1 byte: rows - 1.
pub const SET_MULTIPLEX_RATIO: u8 = 0xA8;

/// COM output scan direction, remapped (0xC8)
pub const COM_SCAN_DEC: u8 = 0xC8;

/// Set display offset command (0xD3)
///
/// Requires 1 byte.
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;

/// Set COM pins hardware configuration command (0xDA)
///
/// Requires 1 byte.
pub const SET_COM_PINS: u8 = 0xDA;

// Timing and power commands

/// Set display clock divide ratio command (0xD5)
///
/// Requires 1 byte.
pub const SET_CLOCK_DIV: u8 = 0xD5;

/// Set pre-charge period command (0xD9)
///
/// Requires 1 byte.
pub const SET_PRECHARGE: u8 = 0xD9;

/// Charge pump setting command (0x8D)
///
/// Requires 1 byte: 0x14 enables the internal pump.
pub const CHARGE_PUMP: u8 = 0x8D;

/// Boot sequence sent by [`SpiTransport::init`](crate::interface::SpiTransport::init)
///
/// Panel-geometry commands (multiplex ratio, address window) and
/// [`DISPLAY_ON`] follow it. Horizontal addressing mode makes consecutive
/// bands land on consecutive pages without re-addressing.
pub const BOOT_SEQUENCE: &[u8] = &[
    DISPLAY_OFF,
    SET_CLOCK_DIV,
    0xF0,
    SET_DISPLAY_OFFSET,
    0x00,
    SET_START_LINE,
    CHARGE_PUMP,
    0x14,
    SET_MEMORY_ADDRESSING_MODE,
    ADDRESSING_HORIZONTAL,
    SEGMENT_REMAP,
    COM_SCAN_DEC,
    SET_COM_PINS,
    0x12,
    SET_CONTRAST,
    0xCF,
    SET_PRECHARGE,
    0xF1,
    DISPLAY_ALL_ON_RESUME,
    NORMAL_DISPLAY,
];
