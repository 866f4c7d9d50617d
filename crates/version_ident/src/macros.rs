/// implement PartialEq and PartialOrd against integer types for a type
/// that has a `cmp_int<T: Into<BigInt>>(&self, T) -> Ordering` method
/// impl_int_cmp!(NumericalToken; u8, i32, u64)
macro_rules! impl_int_cmp {
    ( $target:ty; $( $int:ty ),* ) => {
        $(
            impl PartialEq<$int> for $target {
                fn eq(&self, other: &$int) -> bool {
                    matches!(self.cmp_int(Clone::clone(other)), std::cmp::Ordering::Equal)
                }
            }

            impl PartialOrd<$int> for $target {
                fn partial_cmp(&self, other: &$int) -> Option<std::cmp::Ordering> {
                    Some(self.cmp_int(Clone::clone(other)))
                }
            }
        )*
    }
}

/// every integer width, plus the arbitrary precision ones
macro_rules! impl_int_cmp_all {
    ( $target:ty ) => {
        impl_int_cmp!($target;
            i8, i16, i32, i64, i128, isize,
            u8, u16, u32, u64, u128, usize,
            num_bigint::BigInt, num_bigint::BigUint
        );
    }
}
