use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "conreg",
    version,
    about = "Procurement contract registry with PDF import and reporting"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Add(AddArgs),
    List(ListArgs),
    Edit(EditArgs),
    Remove(RemoveArgs),
    Import(ImportArgs),
    Report(ReportArgs),
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum SortField {
    ContractNumber,
    ContractName,
    StartDate,
    #[default]
    ExpirationDate,
    Value,
    Status,
}

impl SortField {
    pub fn as_column(self) -> &'static str {
        match self {
            Self::ContractNumber => "contract_number",
            Self::ContractName => "contract_name",
            Self::StartDate => "start_date",
            Self::ExpirationDate => "expiration_date",
            Self::Value => "value",
            Self::Status => "status",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ContractNumber => "Contract Number",
            Self::ContractName => "Contract Name",
            Self::StartDate => "Start Date",
            Self::ExpirationDate => "Expiration Date",
            Self::Value => "Value",
            Self::Status => "Status",
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum SearchField {
    ContractNumber,
    ContractName,
    Status,
    Notes,
    Value,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ReportStyle {
    Full,
    Simple,
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    #[arg(long, default_value = "contracts.db")]
    pub db_path: PathBuf,

    #[arg(long)]
    pub contract_number: String,

    #[arg(long)]
    pub contract_name: String,

    #[arg(long)]
    pub start_date: Option<String>,

    #[arg(long)]
    pub expiration_date: Option<String>,

    #[arg(long, default_value_t = 0.0)]
    pub value: f64,

    #[arg(long, default_value = "Active")]
    pub status: String,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[arg(long, default_value = "contracts.db")]
    pub db_path: PathBuf,

    #[arg(long)]
    pub search: Option<String>,

    #[arg(long, value_enum, default_value_t = SearchField::ContractNumber)]
    pub search_field: SearchField,

    #[arg(long, value_enum, default_value_t = SortField::ExpirationDate)]
    pub sort_by: SortField,

    #[arg(long, value_enum, default_value_t = SortOrder::Asc)]
    pub order: SortOrder,

    #[arg(long, default_value_t = false)]
    pub active_only: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    #[arg(long, default_value = "contracts.db")]
    pub db_path: PathBuf,

    #[arg(long)]
    pub id: i64,

    #[arg(long)]
    pub contract_number: Option<String>,

    #[arg(long)]
    pub contract_name: Option<String>,

    #[arg(long)]
    pub start_date: Option<String>,

    #[arg(long)]
    pub expiration_date: Option<String>,

    #[arg(long)]
    pub value: Option<f64>,

    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct RemoveArgs {
    #[arg(long, default_value = "contracts.db")]
    pub db_path: PathBuf,

    #[arg(long)]
    pub id: i64,
}

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    #[arg(long, default_value = "contracts.db")]
    pub db_path: PathBuf,

    #[arg(long)]
    pub pdf_path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[arg(long, default_value = "contracts.db")]
    pub db_path: PathBuf,

    #[arg(long, default_value = "contract_report.pdf")]
    pub output_path: PathBuf,

    #[arg(long, value_enum, default_value_t = SortField::ExpirationDate)]
    pub sort_by: SortField,

    #[arg(long, value_enum, default_value_t = SortOrder::Asc)]
    pub order: SortOrder,

    #[arg(long, default_value_t = false)]
    pub active_only: bool,

    #[arg(long, value_enum, default_value_t = ReportStyle::Full)]
    pub style: ReportStyle,
}
