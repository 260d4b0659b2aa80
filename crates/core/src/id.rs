//! Strongly-typed identifiers over storage-assigned rowids.
//!
//! Every identifier in this system is an integer primary key handed out by
//! the storage engine on insert; display identifiers (invoice numbers) are
//! derived from them afterwards. The macro below implements the shared
//! surface of an `i64`-backed id newtype so each domain crate can declare
//! its own id types without repeating the boilerplate.

/// Implement the common interface of an `i64`-backed id newtype.
#[macro_export]
macro_rules! rowid_newtype {
    ($t:ty) => {
        impl $t {
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            pub fn get(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}
