use core::fmt::Debug;

use num_traits::{AsPrimitive, PrimInt, Unsigned};

/// An unsigned ADC reading of fixed bit width.
///
/// `Accumulator` is wide enough to hold the sum of a full window of
/// full-scale samples without overflowing.
pub trait Sample: PrimInt + Unsigned + Debug + 'static {
    type Accumulator: PrimInt + Unsigned + From<Self> + AsPrimitive<Self>;
}

macro_rules! impl_sample {
    ($($sample:ty => $acc:ty),* $(,)?) => {
        $(
            impl Sample for $sample {
                type Accumulator = $acc;
            }
        )*
    };
}

impl_sample!(u8 => u16, u16 => u32, u32 => u64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::MAX_WINDOW;
    use num_traits::Zero;

    fn full_window_sum<T: Sample>() -> T::Accumulator {
        let mut acc = T::Accumulator::zero();
        for _ in 0..MAX_WINDOW {
            acc = acc + <T::Accumulator as From<T>>::from(T::max_value());
        }
        acc
    }

    #[test]
    fn accumulator_holds_full_window() {
        assert_eq!(full_window_sum::<u8>(), 255 * MAX_WINDOW as u16);
        assert_eq!(full_window_sum::<u16>(), 65_535 * MAX_WINDOW as u32);
        assert_eq!(full_window_sum::<u32>(), u32::MAX as u64 * MAX_WINDOW as u64);
    }

    #[test]
    fn narrowing_keeps_in_range_values() {
        let acc: u16 = 1275 / 5;
        let back: u8 = acc.as_();
        assert_eq!(back, 255);
    }
}
