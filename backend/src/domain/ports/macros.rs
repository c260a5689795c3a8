//! Helper macro generating port error enums with snake_case constructors.

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
    //! Regression coverage for this module.
    define_port_error! {
        pub enum StoreAccessError {
            Unreachable { message: String } => "store unreachable: {message}",
            Rejected { status: u16 } => "store rejected request with {status}",
            Partial { message: String, written: u32 } => "partial write: {message} ({written})",
            Closed => "store closed",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = StoreAccessError::unreachable("pool exhausted");
        assert_eq!(err.to_string(), "store unreachable: pool exhausted");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = StoreAccessError::rejected(409_u16);
        assert_eq!(err.to_string(), "store rejected request with 409");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = StoreAccessError::partial("fund batch", 3_u32);
        assert_eq!(err.to_string(), "partial write: fund batch (3)");
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(StoreAccessError::closed(), StoreAccessError::Closed);
    }
}
