use clap::{Parser, Subcommand};
use reqwest::Url;

use crate::{
    api::rem::{
        AddressRequest,
        Configuration,
        ElectrificationModel,
        HeatingFuel,
        Session,
        SupportedUpgrade,
    },
    fmt::Precision,
    prelude::*,
    savings,
    tables::build_fuel_results_table,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: model the upgrade and print the annual savings.
    #[clap(name = "savings")]
    Savings(SavingsArgs),

    /// Model the upgrade and print the baseline, upgrade, and delta for every fuel.
    #[clap(name = "breakdown")]
    Breakdown(HomeArgs),
}

impl Args {
    /// Open the session, run the command, and render the output to print.
    ///
    /// The session is released before returning.
    pub async fn run(self) -> String {
        match self.connection.open_session() {
            Ok(session) => self.command.render(&session).await,
            Err(error) => savings::failure_message(&error),
        }
    }
}

impl Command {
    pub async fn render(self, model: &impl ElectrificationModel) -> String {
        match self {
            Self::Savings(args) => {
                savings::report(model, &args.home.request(), args.precision).await
            }
            Self::Breakdown(args) => match model.get_by_address(&args.request()).await {
                Ok(response) => build_fuel_results_table(&response.fuel_results).to_string(),
                Err(error) => savings::failure_message(&error),
            },
        }
    }
}

#[derive(Parser)]
pub struct ConnectionArgs {
    /// Residential Electrification Model API key.
    ///
    /// Sign up for one at <https://rewiring.link/api-signup>.
    #[clap(long = "api-key", env = "REM_API_KEY", hide_env_values = true)]
    pub access_token: String,

    #[clap(
        long = "api-base-url",
        env = "REM_API_BASE_URL",
        default_value = "https://api.rewiringamerica.org/api/v1"
    )]
    pub base_url: Url,

    /// Request timeout.
    #[clap(long = "timeout", env = "REM_API_TIMEOUT", default_value = "60s")]
    pub timeout: humantime::Duration,
}

impl ConnectionArgs {
    pub fn configuration(&self) -> Configuration {
        Configuration::builder()
            .access_token(&self.access_token)
            .base_url(self.base_url.clone())
            .timeout(self.timeout.into())
            .build()
    }

    pub fn open_session(&self) -> Result<Session> {
        Session::open(&self.configuration())
    }
}

#[derive(Parser)]
pub struct HomeArgs {
    /// Upgrade to model.
    #[clap(long, env = "REM_UPGRADE", default_value = "hvac-heat-pump-seer15-hspf9")]
    pub upgrade: SupportedUpgrade,

    /// Current primary heating fuel of the home.
    #[clap(long, env = "REM_HEATING_FUEL", default_value = "natural-gas")]
    pub heating_fuel: HeatingFuel,

    /// Home address, for example: `1060 W Addison St, Chicago, IL 60613`.
    pub address: String,
}

impl HomeArgs {
    pub fn request(&self) -> AddressRequest {
        AddressRequest::builder()
            .upgrade(self.upgrade)
            .address(&self.address)
            .heating_fuel(self.heating_fuel)
            .build()
    }
}

#[derive(Parser)]
pub struct SavingsArgs {
    #[clap(flatten)]
    pub home: HomeArgs,

    #[clap(long, env = "REM_PRECISION", default_value = "dollars")]
    pub precision: Precision,
}
