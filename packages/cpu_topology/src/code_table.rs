/// Generates a symbolic enum over a static table of numeric codes.
///
/// Every generated enum gets:
///
/// * `ALL`, listing every entry in declaration order.
/// * `code()`, returning the numeric code of an entry.
/// * `from_code()`, a total lookup that returns the `Unknown` entry for codes not in the table.
///   The lookup map is built on first use and never mutated afterwards.
/// * `name()` and a `Display` implementation returning the human-readable name.
///
/// The table must contain an `Unknown` entry.
macro_rules! code_table {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $code:literal => $display:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        #[non_exhaustive]
        $vis enum $name {
            $(
                #[doc = $display]
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl $name {
            /// Every entry of the table, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Looks up a numeric code. Codes not in the table resolve to `Unknown`.
            #[must_use]
            pub fn from_code(code: u32) -> Self {
                static LOOKUP: ::std::sync::LazyLock<::foldhash::HashMap<u32, $name>> =
                    ::std::sync::LazyLock::new(|| {
                        $name::ALL.iter().map(|entry| (entry.code(), *entry)).collect()
                    });

                LOOKUP.get(&code).copied().unwrap_or(Self::Unknown)
            }

            /// The numeric code of this entry.
            #[must_use]
            pub const fn code(self) -> u32 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            /// The human-readable name of this entry.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $display,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

pub(crate) use code_table;
