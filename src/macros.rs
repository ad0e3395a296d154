/// Implements `PartialEq` between a `CircVec` and a contiguous sequence, which is compared as a
/// single span.
macro_rules! __impl_slice_eq {
    ([$($vars:tt)*] $lhs:ty, $rhs:ty, ) => {
        impl<T, U, $($vars)*> PartialEq<$rhs> for $lhs
        where
            T: PartialEq<U>,
        {
            fn eq(&self, other: &$rhs) -> bool {
                $crate::spans_eq(self.as_slices(), (&other[..], &[][..]))
            }
        }
    };
}
