// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use magicscript_math::Alignment;

/// An enum parsed from a fixed table of script-side string tokens.
pub trait Token: Sized + Copy {
    /// Human readable name of the property kind, used in diagnostics.
    const KIND: &'static str;

    /// Look up `token`; unknown tokens yield `None`.
    fn from_token(token: &str) -> Option<Self>;

    /// Script-side spelling of this value.
    fn token(self) -> &'static str;
}

impl Token for Alignment {
    const KIND: &'static str = "alignment";

    fn from_token(token: &str) -> Option<Self> {
        Self::from_token(token)
    }

    fn token(self) -> &'static str {
        Self::token(self)
    }
}

/// Declare a fieldless enum together with its [`Token`] table.
///
/// The first variant is the [`Default`].
///
/// ```rust
/// magicscript_props::token_enum! {
///     /// Direction a list scrolls in.
///     pub enum Direction: "scroll direction" {
///         /// Left to right.
///         Horizontal => "horizontal",
///         /// Top to bottom.
///         Vertical => "vertical",
///     }
/// }
///
/// use magicscript_props::Token;
/// assert_eq!(Direction::from_token("vertical"), Some(Direction::Vertical));
/// assert_eq!(Direction::default(), Direction::Horizontal);
/// ```
#[macro_export]
macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $kind:literal {
            $(#[$first_meta:meta])*
            $first:ident => $first_token:literal,
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $token:literal,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(#[$first_meta])*
            #[default]
            $first,
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $crate::Token for $name {
            const KIND: &'static str = $kind;

            fn from_token(token: &str) -> Option<Self> {
                match token {
                    $first_token => Some(Self::$first),
                    $($token => Some(Self::$variant),)*
                    _ => None,
                }
            }

            fn token(self) -> &'static str {
                match self {
                    Self::$first => $first_token,
                    $(Self::$variant => $token,)*
                }
            }
        }
    };
}
