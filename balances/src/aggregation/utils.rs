use providers::U256;

/// Renders a raw amount as a decimal string scaled by `decimals`. Whole
/// amounts carry no fraction and fractional parts lose their trailing
/// zeros, so five full tokens render as `"5"`, never `"5.0"`.
pub fn format_units(amount: U256, decimals: u8) -> String {
    let divisor = U256::exp10(decimals as usize);
    let (whole, fraction) = amount.div_mod(divisor);

    if fraction.is_zero() {
        return whole.to_string();
    }

    let digits = fraction.to_string();
    let padded = format!("{digits:0>width$}", width = decimals as usize);

    format!("{whole}.{}", padded.trim_end_matches('0'))
}

#[cfg(test)]
mod test {
    use super::format_units;
    use providers::U256;

    #[test]
    fn whole_amounts_have_no_fraction() {
        assert_eq!(format_units(U256::from(5) * U256::exp10(18), 18), "5");
        assert_eq!(format_units(U256::from(1_000_000_000_u64), 6), "1000");
        assert_eq!(format_units(U256::zero(), 18), "0");
    }

    #[test]
    fn fractions_lose_trailing_zeros() {
        assert_eq!(format_units(U256::from(1_500_000_u64), 6), "1.5");
        assert_eq!(format_units(U256::from(2_500_000_u64), 6), "2.5");
    }

    #[test]
    fn small_amounts_keep_leading_zeros() {
        assert_eq!(format_units(U256::from(1_000_u64), 6), "0.001");
        assert_eq!(format_units(U256::from(1_u64), 18), "0.000000000000000001");
    }

    #[test]
    fn zero_decimals_render_verbatim() {
        assert_eq!(format_units(U256::from(123_u64), 0), "123");
    }

    #[test]
    fn large_amounts_do_not_lose_precision() {
        let amount = U256::from_dec_str("123456789012345678901234567890").unwrap();

        assert_eq!(format_units(amount, 18), "123456789012.34567890123456789");
    }
}
