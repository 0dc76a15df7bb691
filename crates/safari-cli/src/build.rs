use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, ValueEnum};
use colored::Colorize;
use safari::{
    ContentLocation, FallbackMode, NoMenu, SafariError, SiteOptions, SiteOutput, build_site,
};
use tracing::{info, warn};

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Directory holding the site's pages, fragments and static files
    #[arg(long = "site", default_value = "site")]
    pub site_dir: PathBuf,
    /// Directory the built site is written to
    #[arg(long = "out", default_value = "dist")]
    pub output_dir: PathBuf,
    /// Read fragments and content from a deployed copy of the site instead of the site directory
    #[arg(long)]
    pub content_url: Option<String>,
    /// Directory of the JSON content files, relative to the site
    #[arg(long, default_value = "data")]
    pub content_dir: String,
    /// What placeholders show when their content cannot be loaded
    #[arg(long, value_enum, default_value_t = FallbackArg::Table)]
    pub fallback: FallbackArg,
    /// Do not add the menu, cookie banner, contact form and scrolling scripts
    #[arg(long)]
    pub no_scripts: bool,
    /// Keep files already in the output directory
    #[arg(long)]
    pub no_clean: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackArg {
    /// A single error message
    Error,
    /// Static stand-in content for each section
    Table,
}

impl From<FallbackArg> for FallbackMode {
    fn from(value: FallbackArg) -> Self {
        match value {
            FallbackArg::Error => FallbackMode::ErrorMessage,
            FallbackArg::Table => FallbackMode::FallbackTable,
        }
    }
}

impl BuildArgs {
    pub fn site_options(&self) -> SiteOptions {
        let mut options = SiteOptions {
            site_dir: self.site_dir.clone(),
            output_dir: self.output_dir.clone(),
            content: match &self.content_url {
                Some(url) => ContentLocation::Remote(url.clone()),
                None => ContentLocation::SiteDir,
            },
            content_dir: self.content_dir.clone(),
            fallback: self.fallback.into(),
            clean_output_dir: !self.no_clean,
            ..Default::default()
        };

        if self.no_scripts {
            options.interactions.clear();
            options.menu = Arc::new(NoMenu);
        }

        options
    }
}

pub async fn start_build(args: &BuildArgs) -> Result<SiteOutput, SafariError> {
    let output = build_site(&args.site_options()).await?;

    let diagnostics = output.diagnostics().count();
    if diagnostics > 0 {
        warn!(name: "build", "{} pages built, {} sections fell back", output.pages.len(), diagnostics);
    } else {
        info!(name: "build", "{}", format!("{} pages built", output.pages.len()).green());
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        build: BuildArgs,
    }

    fn parse(args: &[&str]) -> BuildArgs {
        TestCli::parse_from(std::iter::once("safari").chain(args.iter().copied())).build
    }

    #[test]
    fn test_defaults() {
        let options = parse(&[]).site_options();

        assert_eq!(options.site_dir, PathBuf::from("site"));
        assert_eq!(options.output_dir, PathBuf::from("dist"));
        assert_eq!(options.content, ContentLocation::SiteDir);
        assert_eq!(options.fallback, FallbackMode::FallbackTable);
        assert!(options.clean_output_dir);
        assert!(!options.interactions.is_empty());
    }

    #[test]
    fn test_flags() {
        let options = parse(&[
            "--site",
            "www",
            "--out",
            "public",
            "--content-url",
            "https://safarimatch.com",
            "--fallback",
            "error",
            "--no-scripts",
        ])
        .site_options();

        assert_eq!(options.site_dir, PathBuf::from("www"));
        assert_eq!(options.output_dir, PathBuf::from("public"));
        assert_eq!(
            options.content,
            ContentLocation::Remote("https://safarimatch.com".into())
        );
        assert_eq!(options.fallback, FallbackMode::ErrorMessage);
        assert!(options.interactions.is_empty());
    }
}
