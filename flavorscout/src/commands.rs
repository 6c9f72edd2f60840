use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("flavorscout")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("flavorscout")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("scrape")
                .about(
                    "Resolve a list of flavor names against one or more vendor storefronts, \
                extracting a description and keyword tags for each.",
                )
                .arg(
                    arg!(-s --"site" <URL>)
                        .required(false)
                        .help("A seed site URL to search (repeatable)")
                        .action(clap::ArgAction::Append)
                        .conflicts_with("sites-file"),
                )
                .arg(
                    arg!(-S --"sites-file" <PATH>)
                        .required(false)
                        .help("Path to a newline-delimited file of seed site URLs")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .conflicts_with("site"),
                )
                .arg(
                    arg!(-b --"brand" <NAME>)
                        .required(false)
                        .help("Brand label carried into the report header")
                        .default_value("(unspecified)"),
                )
                .arg(
                    arg!(-f --"flavor" <NAME>)
                        .required(false)
                        .help("A flavor name to resolve (repeatable)")
                        .action(clap::ArgAction::Append)
                        .conflicts_with("flavors-file"),
                )
                .arg(
                    arg!(-F --"flavors-file" <PATH>)
                        .required(false)
                        .help("Path to a newline-delimited file of flavor names")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .conflicts_with("flavor"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Write the result set as CSV to this path")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--"json")
                        .required(false)
                        .help("Print results as JSON instead of the text report")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-c --"concurrency" <NUM_TASKS>)
                        .required(false)
                        .help("How many flavors to resolve at the same time")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("4"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Per-request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("8"),
                )
                .arg(
                    arg!(--"max-pages" <NUM_PAGES>)
                        .required(false)
                        .help("Page-visit cap per flavor per site")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("64"),
                ),
        )
}
