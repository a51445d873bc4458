//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Environment;
use crate::models::ResourceKind;

/// Terminal admin client for the recruitment backend
#[derive(Parser, Debug)]
#[command(name = "recruit-admin")]
#[command(about = "Terminal admin client for the recruitment backend")]
#[command(long_about = "
recruit-admin lists, creates, updates and deletes the records of the
recruitment platform (vacancies, applications, candidates, companies, blogs,
blog categories and tags, commentaries, categories and users) through its
REST API.

RESOURCES:
    vacancies, applications, candidates, companies, blogs, blog-categories,
    blog-tags, commentaries, categories, users

EXAMPLES:
    # Show the second page of vacancies, 20 per page
    recruit-admin list vacancies --page 2 --size 20

    # Browse candidates interactively
    recruit-admin browse candidates

    # Create a company from a JSON file
    recruit-admin create companies --data @company.json

    # Rename a blog tag
    recruit-admin update blog-tags 7 --data '{\"name\": \"Remote\", \"slug\": \"remote\"}'

    # Delete a user without the confirmation prompt
    recruit-admin delete users 12 --yes

    # Check configuration against the production layer
    recruit-admin --env production check
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// Load exactly this TOML file instead of the layered files under
    /// `config/`. `RECRUIT_*` environment variables still apply on top.
    #[arg(short, long, global = true, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `config/{environment}.toml` layer is loaded.
    /// Available values: development (dev), test, production (prod)
    #[arg(short, long, global = true, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Shows debug output such as cache hits and backend requests.
    /// Cannot be used with --quiet.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Page position arguments shared by list screens
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PageArgs {
    /// Rows per page; must be one of `pagination.allowed_sizes`
    #[arg(short, long, value_name = "N", value_parser = super::validation::validate_page_size)]
    pub size: Option<u32>,

    /// Sort descriptor forwarded to the backend, e.g. `title,asc`
    #[arg(long, value_name = "FIELD,DIR")]
    pub sort: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print one page of a resource
    ///
    /// Examples:
    ///   recruit-admin list companies
    ///   recruit-admin list vacancies --page 3 --size 50 --sort title,asc
    List {
        #[arg(value_name = "KIND", value_parser = super::validation::parse_resource_kind)]
        kind: ResourceKind,

        /// Page number, starting at 1
        #[arg(short, long, value_name = "N", value_parser = super::validation::validate_page_number)]
        page: Option<u32>,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// Page through a resource interactively
    ///
    /// Commands: n (next), p (previous), g <page>, s <size>, o <sort>,
    /// r (refresh), d <id> (delete), h (help), q (quit)
    Browse {
        #[arg(value_name = "KIND", value_parser = super::validation::parse_resource_kind)]
        kind: ResourceKind,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// Create a record from a JSON object
    Create {
        #[arg(value_name = "KIND", value_parser = super::validation::parse_resource_kind)]
        kind: ResourceKind,

        /// JSON object, or `@path` to read it from a file
        #[arg(short, long, value_name = "JSON|@FILE")]
        data: String,
    },

    /// Replace the fields of an existing record
    Update {
        #[arg(value_name = "KIND", value_parser = super::validation::parse_resource_kind)]
        kind: ResourceKind,

        #[arg(value_name = "ID", value_parser = super::validation::validate_id)]
        id: String,

        /// JSON object, or `@path` to read it from a file
        #[arg(short, long, value_name = "JSON|@FILE")]
        data: String,
    },

    /// Delete a record after confirmation
    Delete {
        #[arg(value_name = "KIND", value_parser = super::validation::parse_resource_kind)]
        kind: ResourceKind,

        #[arg(value_name = "ID", value_parser = super::validation::validate_id)]
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Validate configuration and exit
    ///
    /// Loads every configuration layer, validates it and prints a summary
    /// without contacting the backend. Returns a non-zero exit code if the
    /// configuration is invalid.
    Check,
}

impl Commands {
    /// Page size requested on the command line, if any.
    pub fn requested_size(&self) -> Option<u32> {
        match self {
            Commands::List { paging, .. } | Commands::Browse { paging, .. } => paging.size,
            _ => None,
        }
    }
}
