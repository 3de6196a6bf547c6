use crate::commands::ScanCommandOptions;
use crate::common_types::{AllowedCharacters, RedirectDelay};
use crate::matching::MatchPolicy;
use crate::ocr::OcrOptions;
use clap::*;
use rvstruct::ValueStruct;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    #[command(about = "Capture a device label, recognise its model and open the registered page")]
    Scan {
        #[arg(
            help = "Capture source such as /tmp/label.png, file:///tmp/label.png or clipboard://"
        )]
        source: String,

        #[command(flatten)]
        scan_args: ScanArgs,
    },
    #[command(about = "Match text against the registered device models without OCR")]
    Match {
        #[arg(required = true, help = "Text to look for device model identifiers in")]
        text: Vec<String>,
        #[arg(
            long,
            value_enum,
            default_value = "first",
            help = "How to choose between several matched models"
        )]
        match_policy: MatchPolicy,
        #[arg(long, help = "Print the result as JSON", default_value = "false")]
        json: bool,
    },
    #[command(about = "List the registered device models")]
    Models {
        #[arg(long, help = "Print the registry as JSON", default_value = "false")]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    #[arg(
        long,
        help = "Print the matched URL instead of opening it in the browser",
        default_value = "false"
    )]
    pub no_open: bool,

    #[arg(
        long,
        help = "Seconds to show the matched model before redirecting",
        default_value = "2"
    )]
    pub redirect_delay: RedirectDelay,

    #[arg(
        long,
        value_enum,
        default_value = "first",
        help = "How to choose between several matched models"
    )]
    pub match_policy: MatchPolicy,

    #[arg(
        long,
        help = "Characters the OCR engine is allowed to recognise",
        default_value = AllowedCharacters::DEFAULT
    )]
    pub allowed_chars: String,

    #[arg(long, help = "Directory with text-detection.rten and text-recognition.rten")]
    pub models_dir: Option<PathBuf>,

    #[arg(
        short = 'i',
        long,
        help = "Offer another capture after an unmatched or failed recognition",
        default_value = "false"
    )]
    pub interactive: bool,
}

impl From<ScanArgs> for ScanCommandOptions {
    fn from(args: ScanArgs) -> Self {
        ScanCommandOptions {
            match_policy: args.match_policy,
            redirect_delay: args.redirect_delay,
            open_browser: !args.no_open,
            interactive: args.interactive,
            ocr_options: OcrOptions {
                allowed_characters: AllowedCharacters::new(args.allowed_chars),
                models_dir: args.models_dir,
            },
        }
    }
}
