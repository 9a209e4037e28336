//! `define_port_error!`: generates a port error enum with `thiserror`
//! messages and one snake_case constructor per variant.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
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
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
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
    use rstest::rstest;

    define_port_error! {
        pub enum EnrolmentStoreError {
            Unavailable => "enrolment store unavailable",
            CourseFull { course: String, seats: u32 } => "course {course} is full ({seats} seats)",
            UnknownLearner { email: String } => "no learner registered as {email}",
        }
    }

    #[rstest]
    fn unit_variants_get_a_nullary_constructor() {
        assert_eq!(
            EnrolmentStoreError::unavailable(),
            EnrolmentStoreError::Unavailable
        );
    }

    #[rstest]
    fn constructors_convert_each_field() {
        let err = EnrolmentStoreError::course_full("Morning Flow", 12_u32);
        assert_eq!(
            err,
            EnrolmentStoreError::CourseFull {
                course: "Morning Flow".to_owned(),
                seats: 12,
            }
        );
        assert_eq!(err.to_string(), "course Morning Flow is full (12 seats)");
    }

    #[rstest]
    fn string_fields_accept_borrowed_or_owned() {
        let borrowed = EnrolmentStoreError::unknown_learner("ada@coach.io");
        let owned = EnrolmentStoreError::unknown_learner(String::from("ada@coach.io"));
        assert_eq!(borrowed, owned);
        assert_eq!(owned.to_string(), "no learner registered as ada@coach.io");
    }
}
