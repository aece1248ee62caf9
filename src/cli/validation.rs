use crate::cli::args::CliArgs;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(page) = args.page {
        if page == 0 {
            return Err("invalid page, expected positive integer".to_string());
        }
    }
    if let Some(per_page) = args.per_page {
        if per_page == 0 {
            return Err("invalid per-page, expected positive integer".to_string());
        }
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid timeout, expected positive number of seconds".to_string());
        }
    }
    if let Some(raw) = args.output_format.as_deref() {
        if crate::output::OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --output-format '{raw}', expected text, json or html"
            ));
        }
    }
    if let Some(raw) = args.header.as_deref() {
        crate::client::parse_header(raw).map_err(|e| e.to_string())?;
    }
    if let Some(prefix) = args.suggest.as_deref() {
        if prefix.trim().is_empty() {
            return Err("invalid --suggest, prefix must not be blank".to_string());
        }
    }
    if args.interactive && args.suggest.is_some() {
        return Err("use either --interactive or --suggest, not both".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn zero_page_is_rejected() {
        let args = CliArgs::parse_from(["factpager", "-P", "0"]);
        assert!(validate(&args).is_err());
    }

    #[test]
    fn unknown_output_format_is_rejected() {
        let args = CliArgs::parse_from(["factpager", "--output-format", "xml"]);
        assert!(validate(&args).unwrap_err().contains("xml"));
    }

    #[test]
    fn malformed_header_is_rejected() {
        let args = CliArgs::parse_from(["factpager", "-H", "NoColonHere"]);
        assert!(validate(&args).is_err());
    }

    #[test]
    fn interactive_and_suggest_conflict() {
        let args = CliArgs::parse_from(["factpager", "-i", "-s", "ca"]);
        assert!(validate(&args).is_err());
    }

    #[test]
    fn defaults_are_valid() {
        let args = CliArgs::parse_from(["factpager"]);
        assert!(validate(&args).is_ok());
    }
}
