use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "widgetbench",
    version,
    about = "Browse data table and input field examples in the terminal"
)]
pub struct Args {
    /// Story to open, as "group/title" or a unique title (e.g. "InputField/Variants")
    #[arg(short, long)]
    pub story: Option<String>,

    /// JSON file with an array of objects, shown in the "Custom Data" table story
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Theme name, overriding the saved one (e.g. "Catppuccin Latte")
    #[arg(short, long)]
    pub theme: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from(["widgetbench", "-s", "Demo/Components", "--data", "users.json"]);
        assert_eq!(args.story.as_deref(), Some("Demo/Components"));
        assert_eq!(args.data, Some(PathBuf::from("users.json")));
        assert!(args.theme.is_none());
    }
}
