pub mod document;
pub mod session;

/// Terminals and chat apps like to turn `--flag` into an em dash.
pub fn normalize_dashes(args: impl IntoIterator<Item = String>) -> Vec<String> {
    args.into_iter()
        .map(|arg| match arg.strip_prefix('\u{2014}') {
            Some(suffix) if suffix.chars().count() == 1 => format!("-{}", suffix),
            Some(suffix) => format!("--{}", suffix),
            None => arg,
        })
        .collect()
}
