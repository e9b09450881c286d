use crate::error::LoanError;
use log::{info, trace, warn};
use std::{fmt, num::NonZeroU32, str::FromStr};

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Scheme {
    Annuity,
    Differentiated,
}

impl FromStr for Scheme {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "annuity" => Ok(Scheme::Annuity),
            "differentiated" => Ok(Scheme::Differentiated),
            other => {
                warn!("unknown payment scheme {:?}", other);
                Err(LoanError::InvalidScheme(other.to_string()))
            }
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Annuity => write!(f, "annuity"),
            Scheme::Differentiated => write!(f, "differentiated"),
        }
    }
}

/// A finite amount strictly greater than zero.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug)]
pub struct Positive(f64);

impl Positive {
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && value > 0. {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

/// Raw request as supplied by the caller. `scheme` is the selector text;
/// each numeric field is `None` when it was not supplied.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoanInputs {
    pub scheme: String,
    pub principal: Option<f64>,
    pub interest: Option<f64>,
    pub periods: Option<u32>,
    pub payment: Option<f64>,
}

impl LoanInputs {
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            ..Self::default()
        }
    }

    pub fn principal(mut self, principal: f64) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn interest(mut self, interest: f64) -> Self {
        self.interest = Some(interest);
        self
    }

    pub fn periods(mut self, periods: u32) -> Self {
        self.periods = Some(periods);
        self
    }

    pub fn payment(mut self, payment: f64) -> Self {
        self.payment = Some(payment);
        self
    }
}

/// A validated request. Each variant carries exactly the inputs its solver
/// needs; `rate` is the annual percentage rate.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Calculation {
    AnnuityPrincipal {
        payment: Positive,
        rate: Positive,
        periods: NonZeroU32,
    },
    AnnuityPeriods {
        principal: Positive,
        rate: Positive,
        payment: Positive,
    },
    AnnuityPayment {
        principal: Positive,
        rate: Positive,
        periods: NonZeroU32,
    },
    Differentiated {
        principal: Positive,
        rate: Positive,
        periods: NonZeroU32,
    },
}

impl Calculation {
    pub fn scheme(&self) -> Scheme {
        match self {
            Calculation::Differentiated { .. } => Scheme::Differentiated,
            _ => Scheme::Annuity,
        }
    }
}

/// Differentiated payments in period order, each rounded up to a whole unit.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaymentSchedule {
    payments: Vec<f64>,
}

impl PaymentSchedule {
    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    /// Payment for the 1-based `period`.
    pub fn get(&self, period: usize) -> Option<f64> {
        period
            .checked_sub(1)
            .and_then(|idx| self.payments.get(idx))
            .copied()
    }

    pub fn payments(&self) -> &[f64] {
        &self.payments
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.payments.iter().copied()
    }

    pub fn total(&self) -> f64 {
        self.payments.iter().sum()
    }
}

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoanResult {
    Principal {
        principal: f64,
        overpayment: f64,
    },
    Payment {
        payment: f64,
        overpayment: f64,
    },
    Periods {
        periods: NonZeroU32,
        overpayment: f64,
    },
    Differentiated {
        schedule: PaymentSchedule,
        overpayment: f64,
    },
}

impl LoanResult {
    pub fn overpayment(&self) -> f64 {
        match self {
            LoanResult::Principal { overpayment, .. }
            | LoanResult::Payment { overpayment, .. }
            | LoanResult::Periods { overpayment, .. }
            | LoanResult::Differentiated { overpayment, .. } => *overpayment,
        }
    }
}

/// Longest supplied term accepted, in months.
pub const MAX_PERIODS: u32 = 12_000;

fn reject(scheme: Scheme, reason: &str) -> LoanError {
    warn!("rejected {} request: {}", scheme, reason);
    LoanError::combination(scheme.to_string(), reason)
}

fn positive(scheme: Scheme, name: &str, value: Option<f64>) -> Result<Option<Positive>, LoanError> {
    match value {
        None => Ok(None),
        Some(v) => Positive::new(v)
            .map(Some)
            .ok_or_else(|| reject(scheme, &format!("{} must be positive, got {}", name, v))),
    }
}

/// Decide which computation `inputs` asks for, or why it is malformed.
pub fn validate(inputs: &LoanInputs) -> Result<Calculation, LoanError> {
    let scheme: Scheme = inputs.scheme.parse()?;

    if scheme == Scheme::Differentiated && inputs.payment.is_some() {
        return Err(reject(scheme, "payment must not be supplied"));
    }

    let principal = positive(scheme, "principal", inputs.principal)?;
    let rate = positive(scheme, "interest", inputs.interest)?;
    let payment = positive(scheme, "payment", inputs.payment)?;
    let periods = match inputs.periods {
        None => None,
        Some(n) if n > MAX_PERIODS => {
            return Err(reject(
                scheme,
                &format!("periods must not exceed {}, got {}", MAX_PERIODS, n),
            ))
        }
        Some(n) => Some(
            NonZeroU32::new(n).ok_or_else(|| reject(scheme, "periods must be positive, got 0"))?,
        ),
    };

    match scheme {
        Scheme::Annuity => {
            let rate = rate.ok_or_else(|| reject(scheme, "interest is required"))?;
            match (principal, payment, periods) {
                (None, Some(payment), Some(periods)) => Ok(Calculation::AnnuityPrincipal {
                    payment,
                    rate,
                    periods,
                }),
                (Some(principal), None, Some(periods)) => Ok(Calculation::AnnuityPayment {
                    principal,
                    rate,
                    periods,
                }),
                (Some(principal), Some(payment), None) => Ok(Calculation::AnnuityPeriods {
                    principal,
                    rate,
                    payment,
                }),
                _ => Err(reject(
                    scheme,
                    "exactly one of principal, payment and periods must be omitted",
                )),
            }
        }
        Scheme::Differentiated => match (principal, rate, periods) {
            (Some(principal), Some(rate), Some(periods)) => Ok(Calculation::Differentiated {
                principal,
                rate,
                periods,
            }),
            _ => Err(reject(scheme, "principal, interest and periods are required")),
        },
    }
}

/// Convert a nominal annual percentage rate to a monthly decimal rate.
pub fn monthly_rate(annual_rate: f64) -> f64 {
    annual_rate / (12. * 100.)
}

// i(1+i)^n / ((1+i)^n - 1) written as i / (1 - (1+i)^-n): finite for long
// terms (tends to i) and for rates below epsilon (tends to 1/n)
fn annuity_factor(monthly_rate: f64, periods: NonZeroU32) -> f64 {
    let discount = (-(periods.get() as f64) * monthly_rate.ln_1p()).exp_m1();
    let factor = monthly_rate / -discount;
    trace!(
        "rate {}, periods {}, discount {}, annuity factor {}",
        monthly_rate,
        periods,
        discount,
        factor
    );
    factor
}

fn finite(quantity: &str, value: f64) -> Result<f64, LoanError> {
    if value.is_finite() {
        Ok(value)
    } else {
        warn!("{} is not representable: {}", quantity, value);
        Err(LoanError::OutOfRange {
            quantity: quantity.to_string(),
            value,
        })
    }
}

// a solved currency amount must be at least one whole unit
fn whole_amount(quantity: &str, value: f64) -> Result<f64, LoanError> {
    let value = finite(quantity, value)?;
    if value > 0. {
        Ok(value)
    } else {
        warn!("{} rounds to {}", quantity, value);
        Err(LoanError::OutOfRange {
            quantity: quantity.to_string(),
            value,
        })
    }
}

/// Largest whole principal that `payment` repays over `periods` months.
pub fn calculate_principal(
    payment: f64,
    monthly_rate: f64,
    periods: NonZeroU32,
) -> Result<f64, LoanError> {
    whole_amount(
        "principal",
        (payment / annuity_factor(monthly_rate, periods)).floor(),
    )
}

/// Monthly annuity payment, rounded up to a whole unit.
pub fn calculate_payment(
    principal: f64,
    monthly_rate: f64,
    periods: NonZeroU32,
) -> Result<f64, LoanError> {
    whole_amount(
        "payment",
        (principal * annuity_factor(monthly_rate, periods)).ceil(),
    )
}

/// Months needed to repay `principal` with a fixed `payment`, rounded up.
///
/// Fails with [`LoanError::DomainError`] when the payment does not exceed the
/// first month's interest, since the balance would never shrink, and with
/// [`LoanError::OutOfRange`] when the term does not fit a `u32` month count.
pub fn calculate_periods(
    principal: f64,
    monthly_rate: f64,
    payment: f64,
) -> Result<NonZeroU32, LoanError> {
    let interest = monthly_rate * principal;

    if payment <= interest {
        warn!(
            "payment {} does not cover first month's interest {}",
            payment, interest
        );
        return Err(LoanError::DomainError { payment, interest });
    }

    let periods = ((payment / (payment - interest)).ln() / (1. + monthly_rate).ln()).ceil();
    trace!("periods for payment {}: {}", payment, periods);

    let out_of_range = || {
        warn!("periods out of range: {}", periods);
        LoanError::OutOfRange {
            quantity: "periods".to_string(),
            value: periods,
        }
    };
    if !periods.is_finite() || periods > u32::MAX as f64 {
        return Err(out_of_range());
    }
    NonZeroU32::new(periods as u32).ok_or_else(out_of_range)
}

pub fn annuity_overpayment(
    payment: f64,
    principal: f64,
    periods: NonZeroU32,
) -> Result<f64, LoanError> {
    finite("overpayment", payment * periods.get() as f64 - principal)
}

/// Payments with an equal principal share each month, period 1 first.
pub fn calculate_diff_payments(
    principal: f64,
    monthly_rate: f64,
    periods: NonZeroU32,
) -> Result<PaymentSchedule, LoanError> {
    let n = periods.get() as f64;
    let payments = (1..=periods.get())
        .map(|k| {
            let balance = principal - principal * (k - 1) as f64 / n;
            let payment = (principal / n + monthly_rate * balance).ceil();
            trace!("month {}, balance {}, payment {}", k, balance, payment);
            whole_amount("payment", payment)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PaymentSchedule { payments })
}

/// Run the single solver `calculation` asks for.
pub fn solve(calculation: &Calculation) -> Result<LoanResult, LoanError> {
    trace!("solving {} request {:?}", calculation.scheme(), calculation);
    let result = match *calculation {
        Calculation::AnnuityPrincipal {
            payment,
            rate,
            periods,
        } => {
            let principal = calculate_principal(payment.get(), monthly_rate(rate.get()), periods)?;
            info!("annuity principal {}", principal);
            LoanResult::Principal {
                principal,
                overpayment: annuity_overpayment(payment.get(), principal, periods)?,
            }
        }
        Calculation::AnnuityPeriods {
            principal,
            rate,
            payment,
        } => {
            let periods = calculate_periods(principal.get(), monthly_rate(rate.get()), payment.get())?;
            info!("annuity periods {}", periods);
            LoanResult::Periods {
                periods,
                overpayment: annuity_overpayment(payment.get(), principal.get(), periods)?,
            }
        }
        Calculation::AnnuityPayment {
            principal,
            rate,
            periods,
        } => {
            let payment = calculate_payment(principal.get(), monthly_rate(rate.get()), periods)?;
            info!("annuity payment {}", payment);
            LoanResult::Payment {
                payment,
                overpayment: annuity_overpayment(payment, principal.get(), periods)?,
            }
        }
        Calculation::Differentiated {
            principal,
            rate,
            periods,
        } => {
            let schedule = calculate_diff_payments(principal.get(), monthly_rate(rate.get()), periods)?;
            let overpayment = finite("overpayment", schedule.total() - principal.get())?;
            info!(
                "differentiated schedule of {} payments, total {}",
                schedule.len(),
                schedule.total()
            );
            LoanResult::Differentiated {
                schedule,
                overpayment,
            }
        }
    };
    Ok(result)
}

pub fn calculate(inputs: &LoanInputs) -> Result<LoanResult, LoanError> {
    solve(&validate(inputs)?)
}
