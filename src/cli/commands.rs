use crate::classify::Policy;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Boilerplate content package detection and conversion for CI pipelines
#[derive(Parser, Debug)]
#[command(
    name = "packmorph",
    about = "Detects boilerplate content packages and converts them for a target repository",
    version,
    author,
    long_about = "packmorph inspects a content package's filter manifest to decide whether the \
                  package is a generic boilerplate template and, on request, rewrites its path \
                  references and content folders to a target repository name, repackaging the \
                  result as a fresh zip archive."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(
        short = 'v',
        long,
        global = true,
        help = "Increase verbosity (can be used multiple times)"
    )]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Detect whether a content package is a boilerplate template",
        long_about = "Locates the package zip or extracted tree in the contents directory, parses \
                      its filter manifest, and classifies it without modifying anything.\n\n\
                      Examples:\n  \
                      packmorph detect\n  \
                      packmorph detect /path/to/contents\n  \
                      packmorph detect --format github\n  \
                      packmorph detect --policy strict"
    )]
    Detect(DetectArgs),

    #[command(
        about = "Detect and convert a boilerplate package for a repository",
        long_about = "Runs detection and, when the package is a boilerplate template, rewrites the \
                      filter manifest, renames the content folders, and repackages the result as \
                      {repo-name}.zip in the contents directory. A non-boilerplate package is a \
                      successful no-op.\n\n\
                      Examples:\n  \
                      packmorph convert --repo-name acme\n  \
                      packmorph convert /path/to/contents --repo-name acme --format json"
    )]
    Convert(ConvertArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(
        value_name = "PATH",
        help = "Directory holding the package zip or extracted tree (defaults to current directory)"
    )]
    pub contents_dir: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        long,
        value_name = "PATHS",
        help = "Comma-separated path list from an upstream step, used instead of re-parsing the manifest"
    )]
    pub page_paths: Option<String>,

    #[arg(long, value_enum, help = "Classifier policy (default: permissive)")]
    pub policy: Option<PolicyArg>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ConvertArgs {
    #[arg(
        value_name = "PATH",
        help = "Directory holding the package zip or extracted tree (defaults to current directory)"
    )]
    pub contents_dir: Option<PathBuf>,

    #[arg(
        short = 'r',
        long,
        value_name = "NAME",
        help = "Target repository name used as the replacement token (falls back to PACKMORPH_REPO_NAME)"
    )]
    pub repo_name: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        long,
        value_name = "PATHS",
        help = "Comma-separated path list from an upstream step, used instead of re-parsing the manifest"
    )]
    pub page_paths: Option<String>,

    #[arg(long, value_enum, help = "Classifier policy (default: permissive)")]
    pub policy: Option<PolicyArg>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Human,
    Github,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
            OutputFormatArg::Github => super::output::OutputFormat::Github,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyArg {
    Strict,
    Permissive,
}

impl From<PolicyArg> for Policy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Strict => Policy::Strict,
            PolicyArg::Permissive => Policy::Permissive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        // Verify that CLI structure is valid
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_default_detect_args() {
        let args = CliArgs::parse_from(["packmorph", "detect"]);
        match args.command {
            Commands::Detect(detect_args) => {
                assert_eq!(detect_args.format, OutputFormatArg::Human);
                assert!(detect_args.contents_dir.is_none());
                assert!(detect_args.page_paths.is_none());
                assert!(detect_args.policy.is_none());
                assert!(detect_args.output.is_none());
            }
            _ => panic!("Expected Detect command"),
        }
    }

    #[test]
    fn test_detect_with_path() {
        let args = CliArgs::parse_from(["packmorph", "detect", "/tmp/contents"]);
        match args.command {
            Commands::Detect(detect_args) => {
                assert_eq!(
                    detect_args.contents_dir,
                    Some(PathBuf::from("/tmp/contents"))
                );
            }
            _ => panic!("Expected Detect command"),
        }
    }

    #[test]
    fn test_detect_with_options() {
        let args = CliArgs::parse_from([
            "packmorph",
            "detect",
            "--format",
            "github",
            "--policy",
            "strict",
            "--page-paths",
            "/content/a,/content/b",
        ]);

        match args.command {
            Commands::Detect(detect_args) => {
                assert_eq!(detect_args.format, OutputFormatArg::Github);
                assert_eq!(detect_args.policy, Some(PolicyArg::Strict));
                assert_eq!(
                    detect_args.page_paths,
                    Some("/content/a,/content/b".to_string())
                );
            }
            _ => panic!("Expected Detect command"),
        }
    }

    #[test]
    fn test_convert_command() {
        let args = CliArgs::parse_from(["packmorph", "convert", "--repo-name", "acme"]);
        match args.command {
            Commands::Convert(convert_args) => {
                assert_eq!(convert_args.repo_name, Some("acme".to_string()));
                assert_eq!(convert_args.format, OutputFormatArg::Human);
            }
            _ => panic!("Expected Convert command"),
        }
    }

    #[test]
    fn test_convert_repo_name_is_optional_at_parse_time() {
        // The name can come from the environment, so clap must not require it
        let args = CliArgs::parse_from(["packmorph", "convert"]);
        match args.command {
            Commands::Convert(convert_args) => assert!(convert_args.repo_name.is_none()),
            _ => panic!("Expected Convert command"),
        }
    }

    #[test]
    fn test_global_verbose_flag() {
        let args = CliArgs::parse_from(["packmorph", "-v", "detect"]);
        assert!(args.verbose);
        assert!(!args.quiet);
    }

    #[test]
    fn test_global_quiet_flag() {
        let args = CliArgs::parse_from(["packmorph", "-q", "detect"]);
        assert!(!args.verbose);
        assert!(args.quiet);
    }

    #[test]
    fn test_log_level_flag() {
        let args = CliArgs::parse_from(["packmorph", "--log-level", "debug", "detect"]);
        assert_eq!(args.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_policy_arg_conversion() {
        assert_eq!(Policy::from(PolicyArg::Strict), Policy::Strict);
        assert_eq!(Policy::from(PolicyArg::Permissive), Policy::Permissive);
    }
}
