pub mod calendar;
pub mod config;
pub mod log;
pub mod marks;
pub mod period;
pub mod status;

use chrono::NaiveDate;
use luna_core::date::{parse_date, parse_date_or};
use luna_core::{Config, JsonFileStore, ReferenceTime, Tracker};
use serde::Serialize;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Settings shared by every subcommand.
pub struct Context {
    pub reference: ReferenceTime,
    pub json: bool,
}

impl Context {
    /// `--date` must be well formed; `--shift` is applied on top of it.
    pub fn new(
        date: Option<&str>,
        shift: i64,
        json: bool,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut reference = match date {
            Some(input) => ReferenceTime::new(parse_date(input)?),
            None => ReferenceTime::today(),
        };
        reference.shift(shift);
        Ok(Self { reference, json })
    }

    pub fn config(&self) -> Result<Config, luna_core::ConfigError> {
        Config::load()
    }

    pub fn tracker(&self, config: &Config) -> Result<Tracker<JsonFileStore>, luna_core::ConfigError> {
        Ok(Tracker::open(JsonFileStore::open()?, config.rules(), self.reference))
    }

    /// Optional positional date. Malformed input falls back to the reference.
    pub fn date_arg(&self, input: Option<&str>) -> NaiveDate {
        match input {
            Some(input) => parse_date_or(input, self.reference.date()),
            None => self.reference.date(),
        }
    }

    /// Print `value` as pretty JSON.
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> CliResult {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}
