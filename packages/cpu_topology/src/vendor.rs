use crate::code_table::code_table;

code_table! {
    /// The company that designed a processor core.
    ///
    /// Obtained from a [`Core`][crate::Core], [`Cluster`][crate::Cluster] or from a numeric code
    /// via [`Vendor::from_code()`] / [`vendor_of()`].
    pub enum Vendor {
        Unknown = 0 => "Unknown",

        Intel = 1 => "Intel",
        Amd = 2 => "AMD",
        Arm = 3 => "ARM",
        Qualcomm = 4 => "Qualcomm",
        Apple = 5 => "Apple",
        Samsung = 6 => "Samsung",
        Nvidia = 7 => "Nvidia",
        Mips = 8 => "MIPS",
        Ibm = 9 => "IBM",
        Ingenic = 10 => "Ingenic",
        Via = 11 => "VIA",
        Cavium = 12 => "Cavium",
        Broadcom = 13 => "Broadcom",
        /// Applied Micro Circuits Corporation.
        Apm = 14 => "APM",
        /// Huawei and its HiSilicon subsidiary.
        Huawei = 15 => "Huawei",
        /// Hygon (Chengdu Haiguang Integrated Circuit Design Co., Ltd).
        Hygon = 16 => "Hygon",
        SiFive = 17 => "SiFive",

        // Vendors of x86 and ARM cores found in low-volume and embedded parts.
        TexasInstruments = 30 => "Texas Instruments",
        Marvell = 31 => "Marvell",
        /// RDC Semiconductor Co.
        Rdc = 32 => "RDC",
        /// DM&P Electronics Inc.
        Dmp = 33 => "DM&P",
        Motorola = 34 => "Motorola",

        // Historical x86 vendors.
        Transmeta = 50 => "Transmeta",
        Cyrix = 51 => "Cyrix",
        Rise = 52 => "Rise",
        /// National Semiconductor.
        Nsc = 53 => "NSC",
        /// Silicon Integrated Systems.
        Sis = 54 => "SiS",
        NexGen = 55 => "NexGen",
        /// United Microelectronics Corporation.
        Umc = 56 => "UMC",
        /// Digital Equipment Corporation.
        Dec = 57 => "DEC",
    }
}

/// Resolves a numeric vendor code. Never fails: unrecognized codes resolve to
/// [`Vendor::Unknown`].
#[cfg_attr(test, mutants::skip)] // Trivial delegation.
#[must_use]
pub fn vendor_of(code: u32) -> Vendor {
    Vendor::from_code(code)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::collections::HashSet;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Vendor: Send, Sync, Copy);

    #[test]
    fn known_codes() {
        let fixtures = [
            (0, Vendor::Unknown),
            (1, Vendor::Intel),
            (2, Vendor::Amd),
            (3, Vendor::Arm),
            (4, Vendor::Qualcomm),
            (5, Vendor::Apple),
            (6, Vendor::Samsung),
            (7, Vendor::Nvidia),
            (8, Vendor::Mips),
            (9, Vendor::Ibm),
            (10, Vendor::Ingenic),
            (11, Vendor::Via),
            (12, Vendor::Cavium),
            (13, Vendor::Broadcom),
            (14, Vendor::Apm),
            (15, Vendor::Huawei),
            (16, Vendor::Hygon),
            (17, Vendor::SiFive),
            (30, Vendor::TexasInstruments),
            (31, Vendor::Marvell),
            (32, Vendor::Rdc),
            (33, Vendor::Dmp),
            (34, Vendor::Motorola),
            (50, Vendor::Transmeta),
            (51, Vendor::Cyrix),
            (52, Vendor::Rise),
            (53, Vendor::Nsc),
            (54, Vendor::Sis),
            (55, Vendor::NexGen),
            (56, Vendor::Umc),
            (57, Vendor::Dec),
        ];

        for (code, vendor) in fixtures {
            assert_eq!(vendor_of(code), vendor, "code {code}");
            assert_eq!(vendor.code(), code);
        }

        assert_eq!(fixtures.len(), Vendor::ALL.len());
    }

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<u32> = Vendor::ALL.iter().map(|v| v.code()).collect();

        assert_eq!(codes.len(), Vendor::ALL.len());
    }

    #[test]
    fn unknown_codes_resolve_to_unknown() {
        assert_eq!(vendor_of(18), Vendor::Unknown);
        assert_eq!(vendor_of(29), Vendor::Unknown);
        assert_eq!(vendor_of(58), Vendor::Unknown);
        assert_eq!(vendor_of(u32::MAX), Vendor::Unknown);
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(Vendor::Amd.to_string(), "AMD");
        assert_eq!(Vendor::TexasInstruments.to_string(), "Texas Instruments");
        assert_eq!(Vendor::Dmp.name(), "DM&P");
    }
}
