/// Power-on value of the accumulator/flags pair.
pub const INITIAL_AF: u16 = 0x01B0;
/// Power-on value of the `BC` pair.
pub const INITIAL_BC: u16 = 0x0804;
/// Power-on value of the `DE` pair.
pub const INITIAL_DE: u16 = 0x0201;
/// Power-on value of the `HL` pointer pair.
pub const INITIAL_HL: u16 = 0x0000;
/// Power-on value of the stack pointer.
pub const INITIAL_SP: u16 = 0xFFFE;
/// Power-on value of the program counter.
pub const INITIAL_PC: u16 = 0x0100;

/// A 16-bit register addressable as two independent 8-bit halves.
///
/// Every register-to-register load and every ALU write-back in the engine goes
/// through the four half-to-half copy operations on this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RegisterPair(u16);

impl RegisterPair {
    /// Creates a pair holding `value`.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Full 16-bit value.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Replaces the full 16-bit value.
    pub const fn set(&mut self, value: u16) {
        self.0 = value;
    }

    /// Upper 8 bits.
    #[must_use]
    pub const fn high(self) -> u8 {
        self.0.to_be_bytes()[0]
    }

    /// Lower 8 bits.
    #[must_use]
    pub const fn low(self) -> u8 {
        self.0.to_be_bytes()[1]
    }

    /// Replaces only the upper 8 bits.
    pub const fn set_high(&mut self, value: u8) {
        self.0 = u16::from_be_bytes([value, self.low()]);
    }

    /// Replaces only the lower 8 bits.
    pub const fn set_low(&mut self, value: u8) {
        self.0 = u16::from_be_bytes([self.high(), value]);
    }

    /// Copies `src`'s high half into this pair's high half.
    pub const fn copy_high_from_high(&mut self, src: Self) {
        self.set_high(src.high());
    }

    /// Copies `src`'s low half into this pair's high half.
    pub const fn copy_high_from_low(&mut self, src: Self) {
        self.set_high(src.low());
    }

    /// Copies `src`'s high half into this pair's low half.
    pub const fn copy_low_from_high(&mut self, src: Self) {
        self.set_low(src.high());
    }

    /// Copies `src`'s low half into this pair's low half.
    pub const fn copy_low_from_low(&mut self, src: Self) {
        self.set_low(src.low());
    }
}

/// Named 16-bit register pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(missing_docs)]
pub enum Pair {
    AF,
    BC,
    DE,
    HL,
    SP,
    PC,
}

/// Which 8-bit half of a pair an operand refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Half {
    /// Bits 15..8.
    High,
    /// Bits 7..0.
    Low,
}

/// Single-byte register, each living in one half of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(missing_docs)]
pub enum Reg8 {
    A,
    B,
    C,
    D,
    E,
    H,
    L,
}

impl Reg8 {
    /// Ordered list of every byte register.
    pub const ALL: [Self; 7] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::H,
        Self::L,
    ];

    /// Decodes the 3-bit register field used by the opcode map.
    ///
    /// Field `6` selects the `(HL)` memory operand and field `7` the
    /// accumulator, so `6` yields `None` here.
    #[must_use]
    pub const fn from_u3(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::B),
            1 => Some(Self::C),
            2 => Some(Self::D),
            3 => Some(Self::E),
            4 => Some(Self::H),
            5 => Some(Self::L),
            7 => Some(Self::A),
            _ => None,
        }
    }

    /// Pair holding this register.
    #[must_use]
    pub const fn pair(self) -> Pair {
        match self {
            Self::A => Pair::AF,
            Self::B | Self::C => Pair::BC,
            Self::D | Self::E => Pair::DE,
            Self::H | Self::L => Pair::HL,
        }
    }

    /// Half of [`Self::pair`] holding this register.
    #[must_use]
    pub const fn half(self) -> Half {
        match self {
            Self::A | Self::B | Self::D | Self::H => Half::High,
            Self::C | Self::E | Self::L => Half::Low,
        }
    }
}

/// The six register pairs of the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RegisterFile {
    /// Accumulator (high) and flags (low, never written by this core).
    pub af: RegisterPair,
    /// General pair `B`/`C`.
    pub bc: RegisterPair,
    /// General pair `D`/`E`.
    pub de: RegisterPair,
    /// General pair `H`/`L`, also the memory pointer.
    pub hl: RegisterPair,
    /// Stack pointer.
    pub sp: RegisterPair,
    /// Program counter.
    pub pc: RegisterPair,
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self {
            af: RegisterPair::new(INITIAL_AF),
            bc: RegisterPair::new(INITIAL_BC),
            de: RegisterPair::new(INITIAL_DE),
            hl: RegisterPair::new(INITIAL_HL),
            sp: RegisterPair::new(INITIAL_SP),
            pc: RegisterPair::new(INITIAL_PC),
        }
    }
}

impl RegisterFile {
    /// Returns a copy of the named pair.
    #[must_use]
    pub const fn pair(&self, pair: Pair) -> RegisterPair {
        match pair {
            Pair::AF => self.af,
            Pair::BC => self.bc,
            Pair::DE => self.de,
            Pair::HL => self.hl,
            Pair::SP => self.sp,
            Pair::PC => self.pc,
        }
    }

    /// Mutable access to the named pair.
    pub const fn pair_mut(&mut self, pair: Pair) -> &mut RegisterPair {
        match pair {
            Pair::AF => &mut self.af,
            Pair::BC => &mut self.bc,
            Pair::DE => &mut self.de,
            Pair::HL => &mut self.hl,
            Pair::SP => &mut self.sp,
            Pair::PC => &mut self.pc,
        }
    }

    /// Reads a byte register.
    #[must_use]
    pub const fn read8(&self, reg: Reg8) -> u8 {
        let pair = self.pair(reg.pair());
        match reg.half() {
            Half::High => pair.high(),
            Half::Low => pair.low(),
        }
    }

    /// Writes a byte register, leaving the other half of its pair untouched.
    pub const fn write8(&mut self, reg: Reg8, value: u8) {
        let pair = self.pair_mut(reg.pair());
        match reg.half() {
            Half::High => pair.set_high(value),
            Half::Low => pair.set_low(value),
        }
    }

    /// Copies byte register `src` into `dst` through the matching half-to-half
    /// copy primitive.
    ///
    /// `src` and `dst` may live in the same pair (`LD C,B` copies `BC`'s own
    /// high half into its own low half).
    pub const fn copy8(&mut self, dst: Reg8, src: Reg8) {
        let source = self.pair(src.pair());
        let target = self.pair_mut(dst.pair());
        match (dst.half(), src.half()) {
            (Half::High, Half::High) => target.copy_high_from_high(source),
            (Half::High, Half::Low) => target.copy_high_from_low(source),
            (Half::Low, Half::High) => target.copy_low_from_high(source),
            (Half::Low, Half::Low) => target.copy_low_from_low(source),
        }
    }

    /// Program counter value.
    #[must_use]
    pub const fn pc(&self) -> u16 {
        self.pc.get()
    }

    /// Replaces the program counter.
    pub const fn set_pc(&mut self, value: u16) {
        self.pc.set(value);
    }
}
