use derive_more::derive::Display;

/// Selects one of the clock frequency attributes of a logical processor.
///
/// The `Hardware*` readings are the limits and current value reported by the hardware (via the
/// cpufreq driver). The `Scaling*` readings are the limits imposed by, and the current value
/// requested by, the operating system frequency governor.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[non_exhaustive]
pub enum FrequencyKind {
    /// `cpufreq/cpuinfo_cur_freq`
    #[display("hardware current")]
    HardwareCurrent,

    /// `cpufreq/cpuinfo_min_freq`
    #[display("hardware minimum")]
    HardwareMin,

    /// `cpufreq/cpuinfo_max_freq`
    #[display("hardware maximum")]
    HardwareMax,

    /// `cpufreq/scaling_cur_freq`
    #[display("scaling current")]
    ScalingCurrent,

    /// `cpufreq/scaling_min_freq`
    #[display("scaling minimum")]
    ScalingMin,

    /// `cpufreq/scaling_max_freq`
    #[display("scaling maximum")]
    ScalingMax,
}

impl FrequencyKind {
    /// Every frequency attribute.
    pub const ALL: [Self; 6] = [
        Self::HardwareCurrent,
        Self::HardwareMin,
        Self::HardwareMax,
        Self::ScalingCurrent,
        Self::ScalingMin,
        Self::ScalingMax,
    ];

    /// Path of the attribute file, relative to the per-CPU directory. The file holds a
    /// frequency in kHz.
    #[must_use]
    pub const fn relative_path(self) -> &'static str {
        match self {
            Self::HardwareCurrent => "cpufreq/cpuinfo_cur_freq",
            Self::HardwareMin => "cpufreq/cpuinfo_min_freq",
            Self::HardwareMax => "cpufreq/cpuinfo_max_freq",
            Self::ScalingCurrent => "cpufreq/scaling_cur_freq",
            Self::ScalingMin => "cpufreq/scaling_min_freq",
            Self::ScalingMax => "cpufreq/scaling_max_freq",
        }
    }
}
