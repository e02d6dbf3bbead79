//! Label-enum macro shared by the closed enumerations of this crate.

/// Define a `Copy` enum whose variants carry an explicit display/wire label.
///
/// Generates `ALL`, `as_str`, `Display`, and a lenient `FromStr` that accepts
/// the label case-insensitively, with `_` standing in for spaces, plus any
/// listed aliases. With the `serde` feature the label is the wire token.
macro_rules! label_enum {
    (
        $(#[$meta:meta])*
        $name:ident => { $($variant:ident = $label:literal $(| $alias:literal)*),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $(
                #[cfg_attr(feature = "serde", serde(rename = $label $(, alias = $alias)*))]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::errors::CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if $crate::macros::label_matches(s, $label) $(|| $crate::macros::label_matches(s, $alias))* {
                        return Ok($name::$variant);
                    }
                )+
                Err($crate::errors::CoreError::UnknownLabel(stringify!($name)))
            }
        }
    };
}

/// Case-insensitive label comparison where `_` in the input stands for a space.
pub(crate) fn label_matches(input: &str, label: &str) -> bool {
    let input = input.trim();
    input.len() == label.len()
        && input
            .chars()
            .zip(label.chars())
            .all(|(a, b)| {
                let a = if a == '_' { ' ' } else { a };
                a.eq_ignore_ascii_case(&b)
            })
}

#[cfg(test)]
mod tests {
    use super::label_matches;

    #[test]
    fn label_match_rules() {
        assert!(label_matches("SPONSORED BRANDS", "SPONSORED BRANDS"));
        assert!(label_matches("sponsored_brands", "SPONSORED BRANDS"));
        assert!(label_matches("  Spend ", "Spend"));
        assert!(!label_matches("Spend", "Sales"));
        assert!(!label_matches("SPONSORED BRANDS VIDEO", "SPONSORED BRANDS"));
    }
}
