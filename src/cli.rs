use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;

use crate::config::Overrides;
use crate::writer::Format;

/// Get ALB information from a CloudFormation stack for Ansible.
#[derive(Debug, Parser)]
#[command(name = "get-alb-info", version)]
pub struct Cli {
    /// CloudFormation stack name [default: hashi-kerberos-test]
    #[arg(
        long = "stack",
        value_name = "NAME",
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub stack: Option<String>,

    /// AWS region [default: ap-northeast-1]
    #[arg(
        long,
        value_name = "REGION",
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub region: Option<String>,

    /// YAML file with stack_name, region, format and endpoint_url
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format [default: json]
    #[arg(long, value_enum)]
    pub format: Option<Format>,

    /// Write the document to this file instead of stdout
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Override the CloudFormation endpoint, e.g. for LocalStack
    #[arg(long, value_name = "URL", env = "CFN_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Verbose logging on stderr
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            stack_name: self.stack.clone(),
            region: self.region.clone(),
            format: self.format,
            endpoint_url: self.endpoint_url.clone(),
        }
    }
}
