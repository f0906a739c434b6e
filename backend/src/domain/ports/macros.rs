//! Helper macro for port error enums.
//!
//! `define_port_error!` derives `thiserror::Error` and, per variant, emits a
//! snake-case constructor taking `impl Into<_>` for every field plus an
//! `is_<variant>()` predicate.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = "Construct `" $variant "`."]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        ::paste::paste! {
            #[doc = "Construct `" $variant "`."]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (@is $variant:ident $($fields:tt)?) => {
        ::paste::paste! {
            #[doc = "Whether this is `" $variant "`."]
            #[must_use]
            pub fn [<is_ $variant:snake>](&self) -> bool {
                matches!(self, Self::$variant { .. })
            }
        }
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
                define_port_error!(@is $variant);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SampleError {
            Offline => "offline",
            Status { status: u16, status_text: String } => "failed: {status} {status_text}",
        }
    }

    #[test]
    fn constructors_convert_fields() {
        let err = SampleError::status(503_u16, "Service Unavailable");
        assert_eq!(err.to_string(), "failed: 503 Service Unavailable");
        assert_eq!(SampleError::offline().to_string(), "offline");
    }

    #[test]
    fn predicates_match_variants() {
        assert!(SampleError::offline().is_offline());
        assert!(SampleError::status(404_u16, "Not Found").is_status());
        assert!(!SampleError::offline().is_status());
    }
}
