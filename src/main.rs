use clap::Parser;
use loan_calc::{calculate, cli::Cli, report::Report};
use simple_logger::SimpleLogger;
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = SimpleLogger::new().with_level(cli.log_level()).init() {
        eprintln!("logger not initialized: {}", e);
    }

    match calculate(&cli.inputs()) {
        Ok(result) => println!("{}", Report::new(&result, cli.decimals.into())),
        Err(e) if e.is_invalid_parameters() => {
            println!("Incorrect parameters");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    }
}

// verifies that types can implement the gated traits below
#[cfg(test)]
fn is_normal<T: Sized + Send + Sync + Unpin>() {}

#[test]
fn normal_types() {
    is_normal::<loan_calc::LoanInputs>();
    is_normal::<loan_calc::Calculation>();
    is_normal::<loan_calc::LoanResult>();
    is_normal::<loan_calc::LoanError>();
    is_normal::<Cli>();
}
