//! `define_port_error!` generates `thiserror` enums for driven ports,
//! together with snake_case constructors taking `impl Into<_>` fields.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor generation for unit, single-field and multi-field variants.
    use rstest::rstest;

    define_port_error! {
        pub enum LedgerPortError {
            Offline => "ledger offline",
            Rejected { message: String } => "ledger rejected write: {message}",
            Stale { expected: u32, actual: u32 } => "stale revision {expected}, found {actual}",
            Missing { hunter_id: String, day: u32 } => "no entry for {hunter_id} on day {day}",
        }
    }

    #[rstest]
    #[case(LedgerPortError::offline(), "ledger offline")]
    #[case(LedgerPortError::rejected("disk full"), "ledger rejected write: disk full")]
    #[case(LedgerPortError::stale(3_u32, 4_u32), "stale revision 3, found 4")]
    #[case(LedgerPortError::missing("jinwoo", 10_u32), "no entry for jinwoo on day 10")]
    fn constructors_render_messages(#[case] err: LedgerPortError, #[case] expected: &str) {
        assert_eq!(err.to_string(), expected);
    }

    #[rstest]
    fn string_fields_accept_owned_and_borrowed_values() {
        let owned = LedgerPortError::rejected(String::from("timeout"));
        assert_eq!(owned, LedgerPortError::rejected("timeout"));
        assert_eq!(
            owned,
            LedgerPortError::Rejected {
                message: "timeout".to_owned()
            }
        );
    }
}
