use crate::code_table::code_table;

code_table! {
    /// The microarchitecture of a processor core.
    ///
    /// Codes are laid out as `0xVVSSIIII`: vendor family in the high byte, series in the next
    /// byte and the variant in the low 16 bits. The layout only keeps the codes unique; no
    /// arithmetic is done on them.
    ///
    /// Some marketing names share a code with another entry and are not separate variants:
    /// Kaby Lake is [`Uarch::SkyLake`], Cortex-A76AE is [`Uarch::CortexA76`] and Samsung
    /// Mongoose/Meerkat are [`Uarch::ExynosM1`] through [`Uarch::ExynosM4`].
    pub enum Uarch {
        /// The microarchitecture is unknown or could not be obtained from the OS.
        Unknown = 0x0000_0000 => "Unknown",

        /// Pentium and Pentium MMX.
        P5 = 0x0010_0100 => "P5",
        /// Intel Quark.
        Quark = 0x0010_0101 => "Quark",
        /// Pentium Pro, Pentium II and Pentium III.
        P6 = 0x0010_0200 => "P6",
        /// Pentium M.
        Dothan = 0x0010_0201 => "Dothan",
        /// Intel Core.
        Yonah = 0x0010_0202 => "Yonah",
        /// Intel Core 2 (65 nm).
        Conroe = 0x0010_0203 => "Conroe",
        /// Intel Core 2 (45 nm).
        Penryn = 0x0010_0204 => "Penryn",
        Nehalem = 0x0010_0205 => "Nehalem",
        SandyBridge = 0x0010_0206 => "Sandy Bridge",
        IvyBridge = 0x0010_0207 => "Ivy Bridge",
        Haswell = 0x0010_0208 => "Haswell",
        Broadwell = 0x0010_0209 => "Broadwell",
        /// Also covers Kaby Lake.
        SkyLake = 0x0010_020A => "Sky Lake",
        PalmCove = 0x0010_020B => "Palm Cove",
        SunnyCove = 0x0010_020C => "Sunny Cove",
        /// Pentium 4 (180 nm and 130 nm).
        Willamette = 0x0010_0300 => "Willamette",
        /// Pentium 4 (90 nm and later).
        Prescott = 0x0010_0301 => "Prescott",
        /// Intel Atom (45 nm).
        Bonnell = 0x0010_0400 => "Bonnell",
        /// Intel Atom (32 nm).
        Saltwell = 0x0010_0401 => "Saltwell",
        /// Intel Atom (22 nm).
        Silvermont = 0x0010_0402 => "Silvermont",
        /// Intel Atom (14 nm).
        Airmont = 0x0010_0403 => "Airmont",
        Goldmont = 0x0010_0404 => "Goldmont",
        GoldmontPlus = 0x0010_0405 => "Goldmont Plus",
        KnightsFerry = 0x0010_0500 => "Knights Ferry",
        KnightsCorner = 0x0010_0501 => "Knights Corner",
        KnightsLanding = 0x0010_0502 => "Knights Landing",
        KnightsHill = 0x0010_0503 => "Knights Hill",
        KnightsMill = 0x0010_0504 => "Knights Mill",
        /// Intel/Marvell XScale.
        Xscale = 0x0010_0600 => "XScale",

        K5 = 0x0020_0100 => "K5",
        K6 = 0x0020_0101 => "K6",
        /// AMD Athlon and Duron.
        K7 = 0x0020_0102 => "K7",
        /// AMD Athlon 64 and Opteron 64.
        K8 = 0x0020_0103 => "K8",
        /// AMD Family 10h (Barcelona, Istanbul, Magny-Cours).
        K10 = 0x0020_0104 => "K10",
        Bulldozer = 0x0020_0105 => "Bulldozer",
        Piledriver = 0x0020_0106 => "Piledriver",
        Steamroller = 0x0020_0107 => "Steamroller",
        Excavator = 0x0020_0108 => "Excavator",
        Zen = 0x0020_0109 => "Zen",
        Zen2 = 0x0020_010A => "Zen 2",
        Zen3 = 0x0020_010B => "Zen 3",
        Zen4 = 0x0020_010C => "Zen 4",
        /// NSC Geode and AMD Geode GX and LX.
        Geode = 0x0020_0200 => "Geode",
        Bobcat = 0x0020_0201 => "Bobcat",
        Jaguar = 0x0020_0202 => "Jaguar",
        Puma = 0x0020_0203 => "Puma",

        /// ARM7 series.
        Arm7 = 0x0030_0100 => "ARM7",
        /// ARM9 series.
        Arm9 = 0x0030_0101 => "ARM9",
        /// ARM11 series.
        Arm11 = 0x0030_0102 => "ARM11",
        CortexA5 = 0x0030_0205 => "Cortex-A5",
        CortexA7 = 0x0030_0207 => "Cortex-A7",
        CortexA8 = 0x0030_0208 => "Cortex-A8",
        CortexA9 = 0x0030_0209 => "Cortex-A9",
        CortexA12 = 0x0030_0212 => "Cortex-A12",
        CortexA15 = 0x0030_0215 => "Cortex-A15",
        CortexA17 = 0x0030_0217 => "Cortex-A17",
        CortexA32 = 0x0030_0332 => "Cortex-A32",
        CortexA35 = 0x0030_0335 => "Cortex-A35",
        CortexA53 = 0x0030_0353 => "Cortex-A53",
        /// Cortex-A55 revision 0, which lacks some instructions of later revisions.
        CortexA55r0 = 0x0030_0354 => "Cortex-A55r0",
        CortexA55 = 0x0030_0355 => "Cortex-A55",
        CortexA57 = 0x0030_0357 => "Cortex-A57",
        CortexA65 = 0x0030_0365 => "Cortex-A65",
        CortexA72 = 0x0030_0372 => "Cortex-A72",
        CortexA73 = 0x0030_0373 => "Cortex-A73",
        CortexA75 = 0x0030_0375 => "Cortex-A75",
        /// Also covers Cortex-A76AE.
        CortexA76 = 0x0030_0376 => "Cortex-A76",
        CortexA77 = 0x0030_0377 => "Cortex-A77",
        CortexA78 = 0x0030_0378 => "Cortex-A78",
        NeoverseN1 = 0x0030_0400 => "Neoverse N1",
        NeoverseE1 = 0x0030_0401 => "Neoverse E1",
        NeoverseV1 = 0x0030_0402 => "Neoverse V1",
        NeoverseN2 = 0x0030_0403 => "Neoverse N2",
        NeoverseV2 = 0x0030_0404 => "Neoverse V2",
        CortexX1 = 0x0030_0501 => "Cortex-X1",
        CortexX2 = 0x0030_0502 => "Cortex-X2",
        CortexX3 = 0x0030_0503 => "Cortex-X3",
        CortexX4 = 0x0030_0504 => "Cortex-X4",
        CortexA510 = 0x0030_0551 => "Cortex-A510",
        CortexA520 = 0x0030_0552 => "Cortex-A520",
        CortexA710 = 0x0030_0571 => "Cortex-A710",
        CortexA715 = 0x0030_0572 => "Cortex-A715",
        CortexA720 = 0x0030_0573 => "Cortex-A720",

        Scorpion = 0x0040_0100 => "Scorpion",
        Krait = 0x0040_0101 => "Krait",
        Kryo = 0x0040_0102 => "Kryo",
        Falkor = 0x0040_0103 => "Falkor",
        Saphira = 0x0040_0104 => "Saphira",

        Denver = 0x0050_0100 => "Denver",
        Denver2 = 0x0050_0101 => "Denver 2",
        Carmel = 0x0050_0102 => "Carmel",

        /// Also covers Mongoose M1.
        ExynosM1 = 0x0060_0100 => "Exynos M1",
        /// Also covers Mongoose M2.
        ExynosM2 = 0x0060_0101 => "Exynos M2",
        /// Also covers Meerkat M3.
        ExynosM3 = 0x0060_0102 => "Exynos M3",
        /// Also covers Meerkat M4.
        ExynosM4 = 0x0060_0103 => "Exynos M4",
        ExynosM5 = 0x0060_0104 => "Exynos M5",

        /// Apple A6 and A6X.
        Swift = 0x0070_0100 => "Swift",
        /// Apple A7.
        Cyclone = 0x0070_0101 => "Cyclone",
        /// Apple A8 and A8X.
        Typhoon = 0x0070_0102 => "Typhoon",
        /// Apple A9 and A9X.
        Twister = 0x0070_0103 => "Twister",
        /// Apple A10 and A10X, performance cores.
        Hurricane = 0x0070_0104 => "Hurricane",
        /// Apple A11, performance cores.
        Monsoon = 0x0070_0105 => "Monsoon",
        /// Apple A11, efficiency cores.
        Mistral = 0x0070_0106 => "Mistral",
        /// Apple A12, performance cores.
        Vortex = 0x0070_0107 => "Vortex",
        /// Apple A12, efficiency cores.
        Tempest = 0x0070_0108 => "Tempest",
        /// Apple A13, performance cores.
        Lightning = 0x0070_0109 => "Lightning",
        /// Apple A13, efficiency cores.
        Thunder = 0x0070_010A => "Thunder",
        /// Apple A14 and M1, performance cores.
        Firestorm = 0x0070_010B => "Firestorm",
        /// Apple A14 and M1, efficiency cores.
        Icestorm = 0x0070_010C => "Icestorm",
        /// Apple A15 and M2, performance cores.
        Avalanche = 0x0070_010D => "Avalanche",
        /// Apple A15 and M2, efficiency cores.
        Blizzard = 0x0070_010E => "Blizzard",

        ThunderX = 0x0080_0100 => "ThunderX",
        ThunderX2 = 0x0080_0200 => "ThunderX2",
        /// Marvell PJ4.
        Pj4 = 0x0090_0100 => "PJ4",
        BrahmaB15 = 0x00A0_0100 => "Brahma B15",
        BrahmaB53 = 0x00A0_0101 => "Brahma B53",
        /// Applied Micro X-Gene.
        XGene = 0x00B0_0100 => "X-Gene",
        /// Hygon Dhyana, a derivative of AMD Zen.
        Dhyana = 0x0100_0100 => "Dhyana",
        /// HiSilicon TaiShan v110 (Kunpeng 920).
        TaishanV110 = 0x00C0_0100 => "TaiShan v110",
    }
}

/// Resolves a numeric microarchitecture code. Never fails: unrecognized codes resolve to
/// [`Uarch::Unknown`].
#[cfg_attr(test, mutants::skip)] // Trivial delegation.
#[must_use]
pub fn uarch_of(code: u32) -> Uarch {
    Uarch::from_code(code)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::collections::HashSet;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Uarch: Send, Sync, Copy);

    #[test]
    fn known_codes() {
        let fixtures = [
            (0x0000_0000, Uarch::Unknown),
            (0x0010_0100, Uarch::P5),
            (0x0010_0206, Uarch::SandyBridge),
            (0x0010_020A, Uarch::SkyLake),
            (0x0010_020C, Uarch::SunnyCove),
            (0x0010_0301, Uarch::Prescott),
            (0x0010_0405, Uarch::GoldmontPlus),
            (0x0010_0504, Uarch::KnightsMill),
            (0x0010_0600, Uarch::Xscale),
            (0x0020_0109, Uarch::Zen),
            (0x0020_010C, Uarch::Zen4),
            (0x0020_0203, Uarch::Puma),
            (0x0030_0102, Uarch::Arm11),
            (0x0030_0353, Uarch::CortexA53),
            (0x0030_0354, Uarch::CortexA55r0),
            (0x0030_0355, Uarch::CortexA55),
            (0x0030_0376, Uarch::CortexA76),
            (0x0030_0400, Uarch::NeoverseN1),
            (0x0030_0504, Uarch::CortexX4),
            (0x0030_0551, Uarch::CortexA510),
            (0x0030_0573, Uarch::CortexA720),
            (0x0040_0102, Uarch::Kryo),
            (0x0050_0102, Uarch::Carmel),
            (0x0060_0104, Uarch::ExynosM5),
            (0x0070_010B, Uarch::Firestorm),
            (0x0070_010E, Uarch::Blizzard),
            (0x0080_0200, Uarch::ThunderX2),
            (0x0090_0100, Uarch::Pj4),
            (0x00A0_0101, Uarch::BrahmaB53),
            (0x00B0_0100, Uarch::XGene),
            (0x00C0_0100, Uarch::TaishanV110),
            (0x0100_0100, Uarch::Dhyana),
        ];

        for (code, uarch) in fixtures {
            assert_eq!(uarch_of(code), uarch, "code {code:#010X}");
            assert_eq!(uarch.code(), code);
        }
    }

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<u32> = Uarch::ALL.iter().map(|u| u.code()).collect();

        assert_eq!(codes.len(), Uarch::ALL.len());
    }

    #[test]
    fn every_entry_round_trips() {
        for uarch in Uarch::ALL {
            assert_eq!(uarch_of(uarch.code()), *uarch);
        }
    }

    #[test]
    fn unknown_codes_resolve_to_unknown() {
        assert_eq!(uarch_of(0x0010_020D), Uarch::Unknown);
        assert_eq!(uarch_of(0x0030_0000), Uarch::Unknown);
        assert_eq!(uarch_of(u32::MAX), Uarch::Unknown);
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(Uarch::CortexA53.to_string(), "Cortex-A53");
        assert_eq!(Uarch::SkyLake.to_string(), "Sky Lake");
        assert_eq!(Uarch::Unknown.to_string(), "Unknown");
    }
}
