//! DRY macro for reference-data enums.
//!
//! **`reference_enum!`** declares a fieldless enum together with its static
//! lookup tables: the wire name used by the Hedge Accounting API and the
//! display name shown to users. Both tables are plain `match` arms, so the
//! mapping is resolved at compile time.
//!
//! ```ignore
//! reference_enum! {
//!     /// Hedge accounting model.
//!     pub enum HedgeType {
//!         CashFlow => ("CashFlow", "Cash Flow"),
//!         FairValue => ("FairValue", "Fair Value"),
//!     }
//! }
//!
//! assert_eq!(HedgeType::CashFlow.display_name(), "Cash Flow");
//! assert_eq!(HedgeType::from_wire_name("fairvalue"), Some(HedgeType::FairValue));
//! ```

/// Declares a reference-data enum with `all()`, `wire_name()`,
/// `display_name()`, `from_wire_name()` and a `Display` impl.
#[macro_export]
macro_rules! reference_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => ($wire:literal, $display:literal)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant
            ),+
        }

        impl $name {
            /// Returns every variant in declaration order.
            pub const fn all() -> &'static [$name] {
                &[$($name::$variant),+]
            }

            /// Name used on the wire by the Hedge Accounting API.
            pub const fn wire_name(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            /// Human-readable label.
            pub const fn display_name(&self) -> &'static str {
                match self {
                    $($name::$variant => $display),+
                }
            }

            /// Case-insensitive lookup by wire name.
            pub fn from_wire_name(value: &str) -> Option<Self> {
                let value = value.trim();
                Self::all()
                    .iter()
                    .copied()
                    .find(|v| v.wire_name().eq_ignore_ascii_case(value))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.display_name())
            }
        }
    };
}
