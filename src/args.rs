use email_validation::{
    api::ApiClientError,
    config::{ClientConfig, Region, API_BASE_VAR, API_KEY_VAR, TIMEOUT_VAR},
    identifiers::{Address, Limit, ListId, PreviewId},
};
use std::time::Duration;
use url::Url;

#[derive(clap::Parser)]
#[command(name = "email-validate")]
#[command(version)]
#[command(about = "Validate email addresses with the Mailgun v4 validation API")]
#[command(long_about = "
A command-line client for the Mailgun v4 email validation API.

Validate single addresses, or upload whole lists as bulk jobs and previews.
Results are printed as JSON.

Examples:
  # Validate one address
  email-validate validate alice@example.com

  # Upload a list from disk and check on it later
  email-validate bulk create march --file ./addresses.csv
  email-validate bulk get march

  # Preview a list on the EU region, then promote it to a full job
  email-validate --region eu preview create sample --file @./addresses.csv
  email-validate --region eu preview promote sample
")]
pub struct Args {
    #[command(flatten)]
    pub connection: Connection,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args)]
pub struct Connection {
    /// Region of the account
    #[arg(long, value_enum, global = true, default_value_t = Region::Us)]
    pub region: Region,

    /// API base URL (overrides --region)
    #[arg(
        long,
        global = true,
        env = API_BASE_VAR,
        value_hint = clap::ValueHint::Url,
        value_parser = Url::parse
    )]
    pub url: Option<Url>,

    /// Private API key
    #[arg(long, global = true, env = API_KEY_VAR, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = TIMEOUT_VAR, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,
}

impl Connection {
    pub fn config(&self) -> Result<ClientConfig, ApiClientError> {
        let base = match &self.url {
            Some(url) => url.clone(),
            None => self.region.base_url()?,
        };

        let mut config = ClientConfig::new(base).with_timeout(Duration::from_secs(self.timeout));
        if let Some(key) = &self.api_key {
            config = config.with_api_key(key.clone());
        }
        Ok(config)
    }
}

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Validate a single address
    ///
    /// Examples:
    ///   email-validate validate alice@example.com
    ///   email-validate validate bob@example.com --no-provider-lookup
    Validate(ValidateArgs),

    /// Create, inspect and delete bulk validation jobs
    #[command(subcommand)]
    Bulk(BulkCommands),

    /// Create, inspect, promote and delete bulk previews
    #[command(subcommand)]
    Preview(PreviewCommands),
}

#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Address to validate
    #[arg(value_parser = Address::new)]
    pub address: Address,

    /// Skip the mailbox provider lookup
    #[arg(long, default_value_t = false)]
    pub no_provider_lookup: bool,
}

/// What to upload: a path, a path prefixed with '@', or the list itself.
#[derive(clap::Args)]
pub struct UploadArgs {
    /// CSV list to upload (path, @path, or inline content)
    #[arg(long, value_name = "PATH|CONTENT")]
    pub file: String,
}

#[derive(clap::Subcommand)]
pub enum BulkCommands {
    /// Upload a list and start a validation job
    Create {
        #[arg(value_name = "LIST_ID", value_parser = ListId::new)]
        list_id: ListId,

        #[command(flatten)]
        upload: UploadArgs,
    },

    /// Show a job
    Get {
        #[arg(value_name = "LIST_ID", value_parser = ListId::new)]
        list_id: ListId,
    },

    /// List jobs
    List {
        /// Maximum number of jobs to return
        #[arg(long, default_value_t = Limit::DEFAULT)]
        limit: Limit,
    },

    /// Delete a job
    Delete {
        #[arg(value_name = "LIST_ID", value_parser = ListId::new)]
        list_id: ListId,
    },
}

#[derive(clap::Subcommand)]
pub enum PreviewCommands {
    /// Upload a list and start a preview
    Create {
        #[arg(value_name = "PREVIEW_ID", value_parser = PreviewId::new)]
        preview_id: PreviewId,

        #[command(flatten)]
        upload: UploadArgs,
    },

    /// Show a preview
    Get {
        #[arg(value_name = "PREVIEW_ID", value_parser = PreviewId::new)]
        preview_id: PreviewId,
    },

    /// List previews
    List {
        /// Maximum number of previews to return
        #[arg(long, default_value_t = Limit::DEFAULT)]
        limit: Limit,
    },

    /// Delete a preview
    Delete {
        #[arg(value_name = "PREVIEW_ID", value_parser = PreviewId::new)]
        preview_id: PreviewId,
    },

    /// Promote a preview to a full validation job
    Promote {
        #[arg(value_name = "PREVIEW_ID", value_parser = PreviewId::new)]
        preview_id: PreviewId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_validate_args() {
        let args = Args::try_parse_from(["email-validate", "validate", "alice@example.com"]).unwrap();
        match args.command {
            Commands::Validate(validate) => {
                assert_eq!(validate.address.as_ref(), "alice@example.com");
                assert!(!validate.no_provider_lookup);
            }
            _ => panic!("Expected validate command"),
        }
    }

    #[test]
    fn test_empty_address_is_rejected() {
        assert!(Args::try_parse_from(["email-validate", "validate", ""]).is_err());
    }

    #[test]
    fn test_limit_must_be_positive_integer() {
        assert!(Args::try_parse_from(["email-validate", "bulk", "list", "--limit", "0"]).is_err());
        assert!(Args::try_parse_from(["email-validate", "bulk", "list", "--limit", "1.5"]).is_err());

        let args =
            Args::try_parse_from(["email-validate", "preview", "list", "--limit", "20"]).unwrap();
        match args.command {
            Commands::Preview(PreviewCommands::List { limit }) => assert_eq!(limit.get(), 20),
            _ => panic!("Expected preview list command"),
        }
    }

    #[test]
    fn test_default_limit() {
        let args = Args::try_parse_from(["email-validate", "bulk", "list"]).unwrap();
        match args.command {
            Commands::Bulk(BulkCommands::List { limit }) => assert_eq!(limit, Limit::DEFAULT),
            _ => panic!("Expected bulk list command"),
        }
    }

    #[test]
    fn test_url_overrides_region() {
        let args = Args::try_parse_from([
            "email-validate",
            "--region",
            "eu",
            "--url",
            "http://localhost:9000",
            "bulk",
            "get",
            "march",
        ])
        .unwrap();
        let config = args.connection.config().unwrap();
        assert_eq!(config.base.as_str(), "http://localhost:9000/");
    }

    #[test]
    fn test_region_selects_base() {
        let args =
            Args::try_parse_from(["email-validate", "--region", "eu", "preview", "get", "p1"])
                .unwrap();
        assert_eq!(args.connection.region, Region::Eu);

        let connection = Connection {
            region: args.connection.region,
            url: None,
            api_key: None,
            timeout: 30,
        };
        let config = connection.config().unwrap();
        assert_eq!(config.base.as_str(), "https://api.eu.mailgun.net/");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
