//! Decoding of the ARM Main ID Register (MIDR).
//!
//! Bit layout of the 32-bit register:
//!
//! ```text
//!  31        24 23    20 19    16 15                     4 3      0
//! +------------+--------+--------+------------------------+--------+
//! | implementer| variant|  arch  |  primary part number   |revision|
//! +------------+--------+--------+------------------------+--------+
//! ```

use std::fmt::{self, Display};

use derive_more::derive::Display;

/// Decoded value of the ARM Main ID Register (MIDR) of a core.
///
/// Every 32-bit value decodes to some `Midr` - codes that are not known to the lookup tables
/// decode to [`Implementer::Unknown`] or [`Architecture::Unmapped`] while the raw value stays
/// available via [`raw()`][Self::raw].
///
/// # Example
///
/// ```
/// use cpu_topology::{Architecture, Implementer, Midr};
///
/// let midr = Midr::decode(0x410F_D034);
///
/// assert_eq!(midr.implementer(), Implementer::Arm);
/// assert_eq!(midr.variant(), 0x0);
/// assert_eq!(midr.architecture(), Architecture::DefinedByCpuid);
/// assert_eq!(midr.part_number(), 0xD03);
/// assert_eq!(midr.revision(), 0x4);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Midr {
    raw: u32,
    implementer: Implementer,
    variant: u8,
    architecture: Architecture,
    part_number: u16,
    revision: u8,
}

impl Midr {
    /// Decodes a raw MIDR value. This is a pure function of its input and never fails.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "every field is masked to its width before narrowing"
    )]
    #[must_use]
    pub const fn decode(raw: u32) -> Self {
        Self {
            raw,
            implementer: Implementer::from_code(((raw >> 24) & 0xFF) as u8),
            variant: ((raw >> 20) & 0xF) as u8,
            architecture: Architecture::from_code(((raw >> 16) & 0xF) as u8),
            part_number: ((raw >> 4) & 0xFFF) as u16,
            revision: (raw & 0xF) as u8,
        }
    }

    /// The undecoded register value.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn raw(&self) -> u32 {
        self.raw
    }

    /// The company that implemented the core (bits 31:24).
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn implementer(&self) -> Implementer {
        self.implementer
    }

    /// The raw implementer code (bits 31:24), useful when [`implementer()`][Self::implementer]
    /// is [`Implementer::Unknown`].
    #[expect(
        clippy::cast_possible_truncation,
        reason = "shifting a u32 right by 24 leaves exactly 8 bits"
    )]
    #[must_use]
    pub const fn implementer_code(&self) -> u8 {
        (self.raw >> 24) as u8
    }

    /// The implementation-defined variant number, typically the major revision (bits 23:20).
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn variant(&self) -> u8 {
        self.variant
    }

    /// The architecture revision (bits 19:16).
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn architecture(&self) -> Architecture {
        self.architecture
    }

    /// The implementation-defined primary part number (bits 15:4).
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn part_number(&self) -> u16 {
        self.part_number
    }

    /// The implementation-defined revision number, typically the minor revision (bits 3:0).
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn revision(&self) -> u8 {
        self.revision
    }
}

impl Display for Midr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} part 0x{:03X} r{}p{} ({})",
            self.implementer, self.part_number, self.variant, self.revision, self.architecture
        )
    }
}

/// The company that implemented a core, from the MIDR implementer field.
///
/// The first group of codes comes from the ARM architecture reference manual, the rest are
/// codes observed on shipping silicon.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Implementer {
    /// The implementer code is not in the table.
    #[display("Unknown")]
    Unknown,

    /// ARM Limited (0x41).
    #[display("ARM")]
    Arm,

    /// Digital Equipment Corporation (0x44).
    #[display("DEC")]
    Dec,

    /// Motorola, Freescale Semiconductor Inc. (0x4D).
    #[display("Motorola")]
    Motorola,

    /// Qualcomm Inc. (0x51).
    #[display("Qualcomm")]
    Qualcomm,

    /// Marvell International Ltd. (0x56).
    #[display("Marvell")]
    Marvell,

    /// Intel Corporation (0x69).
    #[display("Intel")]
    Intel,

    /// Broadcom Corporation (0x42).
    #[display("Broadcom")]
    Broadcom,

    /// Cavium Inc. (0x43).
    #[display("Cavium")]
    Cavium,

    /// Huawei Technologies Co. Ltd. (0x48).
    #[display("Huawei")]
    Huawei,

    /// Nvidia Corporation (0x4E).
    #[display("Nvidia")]
    Nvidia,

    /// Applied Micro Circuits Corporation (0x50).
    #[display("APM")]
    Apm,

    /// Samsung Electronics Co., Ltd. (0x53).
    #[display("Samsung")]
    Samsung,
}

impl Implementer {
    /// Looks up an implementer code, returning [`Self::Unknown`] for codes not in the table.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            0x41 => Self::Arm,
            0x42 => Self::Broadcom,
            0x43 => Self::Cavium,
            0x44 => Self::Dec,
            0x48 => Self::Huawei,
            0x4D => Self::Motorola,
            0x4E => Self::Nvidia,
            0x50 => Self::Apm,
            0x51 => Self::Qualcomm,
            0x53 => Self::Samsung,
            0x56 => Self::Marvell,
            0x69 => Self::Intel,
            _ => Self::Unknown,
        }
    }

    /// The implementer code, or 0 for [`Self::Unknown`].
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Unknown => 0x00,
            Self::Arm => 0x41,
            Self::Broadcom => 0x42,
            Self::Cavium => 0x43,
            Self::Dec => 0x44,
            Self::Huawei => 0x48,
            Self::Motorola => 0x4D,
            Self::Nvidia => 0x4E,
            Self::Apm => 0x50,
            Self::Qualcomm => 0x51,
            Self::Samsung => 0x53,
            Self::Marvell => 0x56,
            Self::Intel => 0x69,
        }
    }
}

/// The architecture revision from the MIDR architecture field.
///
/// Only the codes 0x1-0x7 and 0xF have a defined meaning. Everything else (0x0 and 0x8-0xE)
/// decodes to [`Self::Unmapped`] carrying the raw code; no meaning is guessed for them.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Architecture {
    /// ARMv4 (0x1).
    #[display("ARMv4")]
    ArmV4,

    /// ARMv4T (0x2).
    #[display("ARMv4T")]
    ArmV4T,

    /// ARMv5, obsolete (0x3).
    #[display("ARMv5")]
    ArmV5,

    /// ARMv5T (0x4).
    #[display("ARMv5T")]
    ArmV5T,

    /// ARMv5TE (0x5).
    #[display("ARMv5TE")]
    ArmV5Te,

    /// ARMv5TEJ (0x6).
    #[display("ARMv5TEJ")]
    ArmV5Tej,

    /// ARMv6 (0x7).
    #[display("ARMv6")]
    ArmV6,

    /// Architectural features are individually identified by the CPUID scheme (0xF). This is
    /// what every ARMv7 and later core reports.
    #[display("defined by CPUID")]
    DefinedByCpuid,

    /// A code with no defined architecture.
    #[display("unmapped (0x{_0:X})")]
    Unmapped(u8),
}

impl Architecture {
    /// Looks up an architecture code. Codes without a defined meaning map to
    /// [`Self::Unmapped`].
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            0x1 => Self::ArmV4,
            0x2 => Self::ArmV4T,
            0x3 => Self::ArmV5,
            0x4 => Self::ArmV5T,
            0x5 => Self::ArmV5Te,
            0x6 => Self::ArmV5Tej,
            0x7 => Self::ArmV6,
            0xF => Self::DefinedByCpuid,
            other => Self::Unmapped(other),
        }
    }

    /// The architecture code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::ArmV4 => 0x1,
            Self::ArmV4T => 0x2,
            Self::ArmV5 => 0x3,
            Self::ArmV5T => 0x4,
            Self::ArmV5Te => 0x5,
            Self::ArmV5Tej => 0x6,
            Self::ArmV6 => 0x7,
            Self::DefinedByCpuid => 0xF,
            Self::Unmapped(code) => code,
        }
    }
}
