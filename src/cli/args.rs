use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "factpager",
    version,
    about = "terminal pager for paginated fact APIs",
    long_about = "Factpager fetches paginated fact records from a REST API, renders them with a page counter and a pagination bar, and offers search with autocomplete suggestions.\n\nExamples:\n  factpager\n  factpager -q whiskers -n 20 -P 2\n  factpager -s cat\n  factpager -i\n  factpager -q tails -o facts.html\n\nTip: Use --config to persist the API endpoints and keep CLI invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv, -vvv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'c',
        long = "clr",
        visible_alias = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the rendered page to a file."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text, json, html)."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 'u',
        long = "u",
        visible_alias = "url",
        value_name = "URL",
        help_heading = "API",
        help = "Facts endpoint URL."
    )]
    pub url: Option<String>,

    #[arg(
        long = "acu",
        visible_alias = "autocomplete-url",
        value_name = "URL",
        help_heading = "API",
        help = "Autocomplete endpoint URL."
    )]
    pub autocomplete_url: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.factpager/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        short = 'P',
        long = "pg",
        visible_alias = "page",
        value_name = "N",
        help_heading = "Browse",
        help = "Page to fetch (1-based)."
    )]
    pub page: Option<u64>,

    #[arg(
        short = 'n',
        long = "pp",
        visible_alias = "per-page",
        value_name = "N",
        help_heading = "Browse",
        help = "Records per page."
    )]
    pub per_page: Option<u32>,

    #[arg(
        short = 'q',
        long = "qry",
        visible_alias = "query",
        value_name = "TEXT",
        help_heading = "Browse",
        help = "Search text."
    )]
    pub query: Option<String>,

    #[arg(
        short = 's',
        long = "sg",
        visible_alias = "suggest",
        value_name = "PREFIX",
        help_heading = "Browse",
        help = "Print autocomplete suggestions for a prefix and exit."
    )]
    pub suggest: Option<String>,

    #[arg(
        short = 'i',
        long = "it",
        visible_alias = "interactive",
        help_heading = "Browse",
        help = "Browse interactively (type 'help' at the prompt)."
    )]
    pub interactive: bool,

    #[arg(
        short = 'p',
        long = "px",
        visible_alias = "proxy",
        value_name = "URL",
        help_heading = "HTTP",
        help = "HTTP proxy URL (e.g. http://127.0.0.1:8080)."
    )]
    pub proxy: Option<String>,

    #[arg(
        short = 'T',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Per-request timeout in seconds."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'H',
        long = "hdr",
        visible_alias = "header",
        value_name = "HEADER",
        help_heading = "HTTP",
        help = "Add a header to all requests (format: 'Key: Value')."
    )]
    pub header: Option<String>,
}
