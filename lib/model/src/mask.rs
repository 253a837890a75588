use crate::{Datatype, Rank, SnakKind};
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

/// Declares a bit mask newtype with a fixed set of flags and a full mask `ALL`.
macro_rules! define_mask {
    (
        $(#[$meta:meta])*
        $name:ident: $repr:ty {
            $($(#[$flag_meta:meta])* $flag:ident = $bits:expr;)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name($repr);

        impl $name {
            $($(#[$flag_meta])* pub const $flag: Self = Self($bits);)*

            /// The mask without any flag set.
            pub const EMPTY: Self = Self(0);

            /// Creates a mask from its raw bits, dropping unknown bits.
            #[must_use]
            pub const fn from_bits_truncate(bits: $repr) -> Self {
                Self(bits & Self::ALL.0)
            }

            #[must_use]
            pub const fn bits(self) -> $repr {
                self.0
            }

            #[must_use]
            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }

            #[must_use]
            pub const fn is_all(self) -> bool {
                self.0 == Self::ALL.0
            }

            /// Returns whether every flag of `other` is also set in `self`.
            #[must_use]
            pub const fn contains_all(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            #[must_use]
            pub const fn intersects(self, other: Self) -> bool {
                self.0 & other.0 != 0
            }
        }

        impl BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl BitAnd for $name {
            type Output = Self;

            fn bitand(self, rhs: Self) -> Self {
                Self(self.0 & rhs.0)
            }
        }

        impl Not for $name {
            type Output = Self;

            fn not(self) -> Self {
                Self(!self.0 & Self::ALL.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:#b})", stringify!($name), self.0)
            }
        }
    };
}

define_mask! {
    /// A set of [Datatype]s.
    DatatypeMask: u16 {
        ITEM = 1;
        PROPERTY = 1 << 1;
        LEXEME = 1 << 2;
        IRI = 1 << 3;
        TEXT = 1 << 4;
        STRING = 1 << 5;
        EXTERNAL_ID = 1 << 6;
        QUANTITY = 1 << 7;
        TIME = 1 << 8;
        /// Items, properties and lexemes.
        ENTITY = 0b111;
        /// IRIs, texts, strings and external ids.
        SHALLOW_DATA_VALUE = 0b111_1000;
        /// Quantities and times.
        DEEP_DATA_VALUE = 0b1_1000_0000;
        DATA_VALUE = 0b1_1111_1000;
        ALL = 0b1_1111_1111;
    }
}

impl DatatypeMask {
    #[must_use]
    pub const fn contains(self, datatype: Datatype) -> bool {
        self.contains_all(datatype.mask())
    }

    /// Returns the single datatype of this mask, if exactly one bit is set.
    #[must_use]
    pub fn single(self) -> Option<Datatype> {
        let mut datatypes = self.datatypes();
        match (datatypes.next(), datatypes.next()) {
            (Some(datatype), None) => Some(datatype),
            _ => None,
        }
    }

    /// Iterates over the datatypes in this mask, in declaration order.
    pub fn datatypes(self) -> impl Iterator<Item = Datatype> {
        Datatype::ALL
            .into_iter()
            .filter(move |datatype| self.contains(*datatype))
    }
}

impl From<Datatype> for DatatypeMask {
    fn from(datatype: Datatype) -> Self {
        datatype.mask()
    }
}

define_mask! {
    /// A set of [SnakKind]s.
    SnakMask: u8 {
        VALUE_SNAK = 1;
        SOME_VALUE_SNAK = 1 << 1;
        NO_VALUE_SNAK = 1 << 2;
        ALL = 0b111;
    }
}

impl SnakMask {
    #[must_use]
    pub const fn contains(self, kind: SnakKind) -> bool {
        self.contains_all(kind.mask())
    }
}

impl From<SnakKind> for SnakMask {
    fn from(kind: SnakKind) -> Self {
        kind.mask()
    }
}

define_mask! {
    /// A set of statement [Rank]s.
    RankMask: u8 {
        PREFERRED = 1;
        NORMAL = 1 << 1;
        DEPRECATED = 1 << 2;
        ALL = 0b111;
    }
}

impl RankMask {
    #[must_use]
    pub const fn contains(self, rank: Rank) -> bool {
        self.contains_all(rank.mask())
    }

    /// Iterates over the ranks in this mask.
    pub fn ranks(self) -> impl Iterator<Item = Rank> {
        [Rank::Preferred, Rank::Normal, Rank::Deprecated]
            .into_iter()
            .filter(move |rank| self.contains(*rank))
    }
}

impl From<Rank> for RankMask {
    fn from(rank: Rank) -> Self {
        rank.mask()
    }
}
