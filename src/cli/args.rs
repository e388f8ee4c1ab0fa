//! CLI argument definitions using clap derive

use crate::dataset::Field;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Wagecast - salary explorer with cached AI estimates
///
/// Browses an employee salary dataset and predicts salaries for new
/// profiles. Identical requests are answered from a local cache.
#[derive(Parser, Debug)]
#[command(name = "wagecast")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "WAGECAST_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the prediction cache and default configuration
    Init(InitArgs),

    /// Predict a salary, using the cache when possible
    Predict(PredictArgs),

    /// List selectable values for dataset fields
    Options(OptionsArgs),

    /// Show dataset rows matching filters
    Data(DataArgs),

    /// Average salary per experience range
    Ranges(RangesArgs),

    /// Add your own salary to the dataset
    Contribute(ContributeArgs),

    /// Inspect the prediction cache
    Cache(CacheArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the init command
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(short, long)]
    pub force: bool,
}

/// The eight inputs of a prediction request
#[derive(Args, Debug, Clone, Default)]
pub struct RequestFields {
    /// Job title, e.g. "Software Engineer"
    #[arg(long)]
    pub job_title: Option<String>,

    /// Employment type, e.g. "Full-time"
    #[arg(long)]
    pub employment_type: Option<String>,

    /// Industry, e.g. "IT"
    #[arg(long)]
    pub industry: Option<String>,

    /// Company size, e.g. "Large"
    #[arg(long)]
    pub company_size: Option<String>,

    /// Years of experience
    #[arg(long, allow_negative_numbers = true)]
    pub years_experience: Option<f64>,

    /// Remote status, e.g. "Hybrid"
    #[arg(long)]
    pub remote: Option<String>,

    /// Location, e.g. "Bangalore"
    #[arg(long)]
    pub location: Option<String>,

    /// Education level, e.g. "Bachelor's"
    #[arg(long)]
    pub education_level: Option<String>,
}

impl RequestFields {
    /// Value given for a categorical field
    pub fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::JobTitle => &self.job_title,
            Field::EmploymentType => &self.employment_type,
            Field::Industry => &self.industry,
            Field::CompanySize => &self.company_size,
            Field::Remote => &self.remote,
            Field::Location => &self.location,
            Field::EducationLevel => &self.education_level,
        };
        value.as_deref()
    }

    /// Fill in a categorical field
    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::JobTitle => &mut self.job_title,
            Field::EmploymentType => &mut self.employment_type,
            Field::Industry => &mut self.industry,
            Field::CompanySize => &mut self.company_size,
            Field::Remote => &mut self.remote,
            Field::Location => &mut self.location,
            Field::EducationLevel => &mut self.education_level,
        };
        *slot = Some(value);
    }
}

/// Arguments for the predict command
#[derive(Parser, Debug)]
pub struct PredictArgs {
    #[command(flatten)]
    pub fields: RequestFields,

    /// Output format
    #[arg(long, value_enum, default_value_t = PredictFormat::Text)]
    pub format: PredictFormat,

    /// Give up after this many seconds (overrides config)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

/// Output format for predictions
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PredictFormat {
    Text,
    Json,
}

/// Output format for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns
    #[default]
    Table,
    /// JSON array
    Json,
    /// One value per line, tab separated
    Plain,
}

/// Arguments for the options command
#[derive(Parser, Debug)]
pub struct OptionsArgs {
    /// Only this field (e.g. job-title); all fields when omitted
    #[arg(short, long)]
    pub field: Option<Field>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Arguments for the data command
#[derive(Parser, Debug)]
pub struct DataArgs {
    /// Keep rows where FIELD equals VALUE ("All" matches any value)
    #[arg(short = 'f', long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(Field, String)>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Arguments for the ranges command
#[derive(Parser, Debug)]
pub struct RangesArgs {
    /// Extra grouping fields beyond job title and industry (default: all)
    #[arg(short, long = "group-by", value_delimiter = ',')]
    pub group_by: Vec<Field>,

    /// Width of each experience range in years
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub bucket: u32,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Arguments for the contribute command
#[derive(Parser, Debug)]
pub struct ContributeArgs {
    #[command(flatten)]
    pub fields: RequestFields,

    /// Annual salary in INR
    #[arg(long, allow_negative_numbers = true)]
    pub salary: Option<f64>,

    /// Append without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// List cached predictions, newest first
    List {
        /// Maximum entries to show
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,

        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Show the cached result for a fingerprint
    Show {
        /// 64-character fingerprint
        fingerprint: String,
    },

    /// Print the cache database path
    Path,

    /// Print the fingerprint of a request without predicting
    Key(RequestFields),
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., estimator.model)
        key: String,

        /// Value to set
        value: String,
    },
}

/// Parse a FIELD=VALUE filter
fn parse_filter(s: &str) -> Result<(Field, String), String> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid FIELD=VALUE: no '=' found in '{}'", s))?;
    let field: Field = field.parse().map_err(|e: crate::error::WagecastError| e.to_string())?;
    Ok((field, value.trim().to_string()))
}
