use crate::loan::LoanInputs;
use clap::{ArgAction, Parser};
use log::LevelFilter;

/// Solve for the missing principal, payment or term of a fixed-rate loan.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "loan-calc", version)]
pub struct Cli {
    /// Payment scheme: "annuity" or "differentiated"
    #[arg(long = "type", default_value = "")]
    pub scheme: String,

    /// Amount borrowed
    #[arg(long, allow_negative_numbers = true)]
    pub principal: Option<f64>,

    /// Nominal annual interest rate, in percent
    #[arg(long, allow_negative_numbers = true)]
    pub interest: Option<f64>,

    /// Monthly payment (annuity only)
    #[arg(long, allow_negative_numbers = true)]
    pub payment: Option<f64>,

    /// Loan term in months
    #[arg(long)]
    pub periods: Option<u32>,

    /// Decimal places for currency amounts
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=4))]
    pub decimals: u8,

    /// Increase log output (-v info, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn inputs(&self) -> LoanInputs {
        LoanInputs {
            scheme: self.scheme.clone(),
            principal: self.principal,
            interest: self.interest,
            periods: self.periods,
            payment: self.payment,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use crate::loan::LoanInputs;
    use clap::{CommandFactory, Parser};
    use log::LevelFilter;
    use test_log::test;

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_annuity() {
        let cli = Cli::try_parse_from([
            "loan-calc",
            "--type",
            "annuity",
            "--payment",
            "8721.8",
            "--periods",
            "120",
            "--interest",
            "5.6",
        ])
        .unwrap();
        assert_eq!(
            cli.inputs(),
            LoanInputs::new("annuity").payment(8721.8).periods(120).interest(5.6)
        );
        assert_eq!(cli.decimals, 0);
        assert_eq!(cli.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn test_parse_options() {
        let cli = Cli::try_parse_from([
            "loan-calc",
            "--type=differentiated",
            "--principal=-500000",
            "--interest=10",
            "--periods=12",
            "--decimals=2",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.principal, Some(-500000.));
        assert_eq!(cli.decimals, 2);
        assert_eq!(cli.log_level(), LevelFilter::Trace);
    }

    #[test]
    fn test_missing_type() {
        let cli = Cli::try_parse_from(["loan-calc", "--principal", "1000"]).unwrap();
        assert_eq!(cli.inputs(), LoanInputs::new("").principal(1000.));
    }

    #[test]
    fn test_rejects_bad_decimals() {
        assert!(Cli::try_parse_from(["loan-calc", "--decimals", "9"]).is_err());
        assert!(Cli::try_parse_from(["loan-calc", "--periods", "twelve"]).is_err());
    }
}
