use crate::{
    api::rem::{AddressRequest, ElectrificationModel, ModelResponse},
    fmt::{FormattedDollars, Precision},
    prelude::*,
};

/// Sign-inverted mean cost delta of the total fuel results, in dollars per year.
#[derive(Copy, Clone, Debug, PartialEq, derive_more::Neg)]
pub struct AnnualSavings(pub f64);

impl TryFrom<&ModelResponse> for AnnualSavings {
    type Error = Error;

    fn try_from(response: &ModelResponse) -> Result<Self> {
        let cost = response.fuel_results.total()?.delta.cost().context("no total cost delta")?;
        Ok(-Self(cost.mean.value))
    }
}

impl AnnualSavings {
    /// Round half away from zero to the precision, and return the whole cents.
    #[expect(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn rounded_cents(self, precision: Precision) -> Result<i64> {
        ensure!(self.0.is_finite(), "the savings are not a finite number: {}", self.0);
        let rounded = match precision {
            Precision::Dollars => self.0.round(),
            Precision::Cents => (self.0 * 100.0).round(),
        };
        // `i64::MAX as f64` is 2⁶³, hence the half-open range:
        ensure!(
            (i64::MIN as f64..i64::MAX as f64).contains(&rounded),
            "the savings are out of range: {}",
            self.0,
        );
        let rounded = rounded as i64;
        match precision {
            Precision::Dollars => rounded
                .checked_mul(100)
                .with_context(|| format!("the savings are out of range: {}", self.0)),
            Precision::Cents => Ok(rounded),
        }
    }

    pub fn describe(self, precision: Precision) -> Result<String> {
        let cents = self.rounded_cents(precision)?;
        let amount = FormattedDollars { cents: cents.unsigned_abs(), precision };
        if cents < 0 {
            warn!(savings = self.0, "the upgrade increases the cost");
            Ok(format!("This home upgrade could cost me {amount} more annually."))
        } else {
            Ok(format!("I could save {amount} annually with this home upgrade!"))
        }
    }
}

/// Call the model and derive the annual savings from its response.
pub async fn estimate(
    model: &impl ElectrificationModel,
    request: &AddressRequest,
) -> Result<AnnualSavings> {
    let response = model.get_by_address(request).await?;
    AnnualSavings::try_from(&response)
}

/// Run the estimation and render the only line to print, whatever the outcome.
pub async fn report(
    model: &impl ElectrificationModel,
    request: &AddressRequest,
    precision: Precision,
) -> String {
    let line = estimate(model, request).await.and_then(|savings| {
        info!(savings = savings.0, "estimated");
        savings.describe(precision)
    });
    line.unwrap_or_else(|error| failure_message(&error))
}

pub fn failure_message(error: &Error) -> String {
    error!("failed to model the upgrade: {error:#}");
    format!("Exception when calling get_by_address: {error:#}")
}
