use crate::{Cache, CacheLevel};

/// The caches a logical processor has access to, by level. Any level may be absent.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct ProcessorCache {
    pub(crate) l1i: Option<Cache>,
    pub(crate) l1d: Option<Cache>,
    pub(crate) l2: Option<Cache>,
    pub(crate) l3: Option<Cache>,
    pub(crate) l4: Option<Cache>,
}

impl ProcessorCache {
    /// The cache at the given level, if the processor has one.
    #[must_use]
    pub const fn get(&self, level: CacheLevel) -> Option<&Cache> {
        match level {
            CacheLevel::L1i => self.l1i.as_ref(),
            CacheLevel::L1d => self.l1d.as_ref(),
            CacheLevel::L2 => self.l2.as_ref(),
            CacheLevel::L3 => self.l3.as_ref(),
            CacheLevel::L4 => self.l4.as_ref(),
        }
    }

    /// The level 1 instruction cache.
    #[cfg_attr(test, mutants::skip)] // Trivial delegation.
    #[must_use]
    pub const fn l1i(&self) -> Option<&Cache> {
        self.get(CacheLevel::L1i)
    }

    /// The level 1 data cache.
    #[cfg_attr(test, mutants::skip)] // Trivial delegation.
    #[must_use]
    pub const fn l1d(&self) -> Option<&Cache> {
        self.get(CacheLevel::L1d)
    }

    /// The level 2 cache.
    #[cfg_attr(test, mutants::skip)] // Trivial delegation.
    #[must_use]
    pub const fn l2(&self) -> Option<&Cache> {
        self.get(CacheLevel::L2)
    }

    /// The level 3 cache.
    #[cfg_attr(test, mutants::skip)] // Trivial delegation.
    #[must_use]
    pub const fn l3(&self) -> Option<&Cache> {
        self.get(CacheLevel::L3)
    }

    /// The level 4 cache.
    #[cfg_attr(test, mutants::skip)] // Trivial delegation.
    #[must_use]
    pub const fn l4(&self) -> Option<&Cache> {
        self.get(CacheLevel::L4)
    }

    /// Iterates over the levels that are present, from closest to the core to furthest away.
    pub fn iter(&self) -> impl Iterator<Item = (CacheLevel, &Cache)> {
        CacheLevel::ALL
            .into_iter()
            .filter_map(|level| self.get(level).map(|cache| (level, cache)))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::pal::RawCache;

    #[test]
    fn iter_skips_absent_levels() {
        let l2 = Cache::from_raw(&RawCache {
            size: 1024 * 1024,
            ..RawCache::default()
        });

        let caches = ProcessorCache {
            l2: Some(l2),
            ..ProcessorCache::default()
        };

        let present: Vec<_> = caches.iter().map(|(level, _)| level).collect();

        assert_eq!(present, vec![CacheLevel::L2]);
        assert_eq!(caches.l2().map(Cache::size_bytes), Some(1024 * 1024));
        assert!(caches.l1d().is_none());
        assert!(caches.get(CacheLevel::L4).is_none());
    }
}
