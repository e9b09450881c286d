/// Render a month count as "y years and m months", dropping the zero part
/// and using the singular for a count of one.
pub fn format_months(total_months: u32) -> String {
    let years = total_months / 12;
    let months = total_months % 12;

    match (years, months) {
        (0, m) => plural(m, "month"),
        (y, 0) => plural(y, "year"),
        (y, m) => format!("{} and {}", plural(y, "year"), plural(m, "month")),
    }
}

fn plural(count: u32, unit: &str) -> String {
    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::format_months;
    use test_log::test;

    #[test]
    fn test_format_months() {
        assert_eq!(format_months(0), "0 months");
        assert_eq!(format_months(1), "1 month");
        assert_eq!(format_months(11), "11 months");
        assert_eq!(format_months(12), "1 year");
        assert_eq!(format_months(13), "1 year and 1 month");
        assert_eq!(format_months(14), "1 year and 2 months");
        assert_eq!(format_months(24), "2 years");
        assert_eq!(format_months(25), "2 years and 1 month");
        assert_eq!(format_months(131), "10 years and 11 months");
    }
}
