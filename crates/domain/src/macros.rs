//! Fixed string forms of the sync enums
//!
//! Mapping statuses are stored as text in `sync_mappings.status` (guarded by
//! a CHECK constraint), strategy names come from configuration and lifecycle
//! kinds appear in logs. `storage_strings!` gives such an enum `as_str()`,
//! the list of accepted strings, `Display` and a `FromStr` that reports the
//! allowed values on failure.

macro_rules! storage_strings {
    ($name:ident, $label:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// Accepted string forms, in declaration order
            pub const STRINGS: &'static [&'static str] = &[$($text),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::errors::EventSyncError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                match s {
                    $(s if s.eq_ignore_ascii_case($text) => Ok(Self::$variant),)+
                    other => Err($crate::errors::EventSyncError::InvalidInput(format!(
                        "unknown {} '{}' (expected one of: {})",
                        $label,
                        other,
                        Self::STRINGS.join(", ")
                    ))),
                }
            }
        }
    };
}
