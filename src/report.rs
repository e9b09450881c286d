use crate::loan::LoanResult;
use crate::period::format_months;
use std::fmt;

/// Console rendering of a [`LoanResult`], currency shown to `dec_places`.
#[derive(Clone, Copy, Debug)]
pub struct Report<'a> {
    result: &'a LoanResult,
    dec_places: usize,
}

impl<'a> Report<'a> {
    pub fn new(result: &'a LoanResult, dec_places: usize) -> Self {
        Self { result, dec_places }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.dec_places;
        match self.result {
            LoanResult::Principal { principal, .. } => {
                writeln!(f, "Your loan principal is = {:.*}!", dp, principal)?;
            }
            LoanResult::Payment { payment, .. } => {
                writeln!(f, "Your annuity payment = {:.*}!", dp, payment)?;
            }
            LoanResult::Periods { periods, .. } => {
                writeln!(
                    f,
                    "It will take {} to repay this loan!",
                    format_months(periods.get())
                )?;
            }
            LoanResult::Differentiated { schedule, .. } => {
                for (idx, payment) in schedule.iter().enumerate() {
                    writeln!(f, "Month {}: payment is {:.*}", idx + 1, dp, payment)?;
                }
                writeln!(f)?;
            }
        }
        write!(f, "Overpayment = {:.*}", dp, self.result.overpayment())
    }
}

#[cfg(test)]
mod tests {
    use super::Report;
    use crate::loan::{calculate, LoanInputs, LoanResult};
    use std::num::NonZeroU32;
    use test_log::test;

    #[test]
    fn test_annuity_reports() {
        let principal = LoanResult::Principal {
            principal: 94130.,
            overpayment: 25870.,
        };
        assert_eq!(
            Report::new(&principal, 0).to_string(),
            "Your loan principal is = 94130!\nOverpayment = 25870"
        );

        let payment = LoanResult::Payment {
            payment: 21248.,
            overpayment: 274880.,
        };
        assert_eq!(
            Report::new(&payment, 2).to_string(),
            "Your annuity payment = 21248.00!\nOverpayment = 274880.00"
        );

        let periods = LoanResult::Periods {
            periods: NonZeroU32::new(14).unwrap(),
            overpayment: 1234.4,
        };
        assert_eq!(
            Report::new(&periods, 0).to_string(),
            "It will take 1 year and 2 months to repay this loan!\nOverpayment = 1234"
        );
    }

    #[test]
    fn test_differentiated_report() {
        let result = calculate(
            &LoanInputs::new("differentiated")
                .principal(1000000.)
                .interest(10.)
                .periods(3),
        )
        .unwrap();
        assert_eq!(
            Report::new(&result, 0).to_string(),
            "Month 1: payment is 341667\n\
             Month 2: payment is 338889\n\
             Month 3: payment is 336112\n\
             \n\
             Overpayment = 16668"
        );
    }
}
