//! SerDes register windows
//!
//! The SerDes blocks are reached through memory-mapped windows of 16-bit
//! registers: one RXTX window per lane and a single CMU window shared by
//! every lane on the chip. [`SerdesRegs`] abstracts a window so the driver
//! can be exercised on the host; [`MmioWindow`] is the volatile
//! implementation used on hardware.

// =============================================================================
// Bit Fields
// =============================================================================

/// A bit field inside a 16-bit SerDes register
///
/// Writing a value masks it to `width` bits and leaves the other bits of
/// the register untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Byte offset of the register in its window
    pub offset: u16,
    /// Position of the least significant bit
    pub shift: u8,
    /// Number of bits
    pub width: u8,
}

impl Field {
    /// Define a field
    pub const fn new(offset: u16, shift: u8, width: u8) -> Self {
        Self {
            offset,
            shift,
            width,
        }
    }

    /// Mask of the field, in register position
    pub const fn mask(self) -> u16 {
        (((1u32 << self.width) - 1) << self.shift) as u16
    }

    /// Extract the field from a register value
    pub const fn get(self, reg: u16) -> u16 {
        (reg & self.mask()) >> self.shift
    }

    /// Replace the field in a register value
    pub const fn set(self, reg: u16, value: u32) -> u16 {
        let value = (value & ((1u32 << self.width) - 1)) as u16;
        (reg & !self.mask()) | (value << self.shift)
    }
}

// =============================================================================
// Register Window Trait
// =============================================================================

/// Access to a window of 16-bit SerDes registers
pub trait SerdesRegs {
    /// Read the register at `offset`
    fn read(&mut self, offset: u16) -> u16;

    /// Write the register at `offset`
    fn write(&mut self, offset: u16, value: u16);

    /// Read one field
    fn read_field(&mut self, field: Field) -> u16 {
        field.get(self.read(field.offset))
    }

    /// Read-modify-write one field
    fn write_field(&mut self, field: Field, value: u32) {
        let reg = self.read(field.offset);
        self.write(field.offset, field.set(reg, value));
    }
}

impl<T: SerdesRegs + ?Sized> SerdesRegs for &mut T {
    fn read(&mut self, offset: u16) -> u16 {
        (**self).read(offset)
    }

    fn write(&mut self, offset: u16, value: u16) {
        (**self).write(offset, value);
    }
}

// =============================================================================
// Memory-Mapped Window
// =============================================================================

/// Volatile 16-bit register window at a fixed base address
#[derive(Debug)]
pub struct MmioWindow {
    base: usize,
}

impl MmioWindow {
    /// Create a window over the registers mapped at `base`
    ///
    /// # Safety
    ///
    /// `base` must be the start of a mapped SerDes register window, valid
    /// for 16-bit volatile access at every offset the driver uses, and not
    /// aliased by another `MmioWindow`.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    /// Base address of the window
    pub const fn base(&self) -> usize {
        self.base
    }
}

impl SerdesRegs for MmioWindow {
    #[inline(always)]
    fn read(&mut self, offset: u16) -> u16 {
        // SAFETY: the constructor contract guarantees the window is mapped.
        unsafe { core::ptr::read_volatile((self.base + offset as usize) as *const u16) }
    }

    #[inline(always)]
    fn write(&mut self, offset: u16, value: u16) {
        // SAFETY: the constructor contract guarantees the window is mapped.
        unsafe { core::ptr::write_volatile((self.base + offset as usize) as *mut u16, value) }
    }
}
