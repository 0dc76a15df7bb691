use std::path::PathBuf;
use std::sync::Arc;

use crate::content::{ContentFetcher, DirSource, SiteSource};
use crate::controller::SiteContext;
use crate::fallback::FallbackMode;
use crate::fragments::FragmentOptions;
use crate::interactions::{Interaction, MenuInitializer, ScriptedMenu};

/// Safari build options. Should be passed to [`embark()`](crate::embark()) or
/// [`build_site()`](crate::build_site()).
///
/// ## Examples
/// Default values:
/// ```rust,no_run
/// use safari::{embark, SiteOptions, SiteOutput};
///
/// fn main() -> Result<SiteOutput, Box<dyn std::error::Error>> {
///   embark(SiteOptions::default())
/// }
/// ```
/// Custom values:
/// ```rust,no_run
/// use std::sync::Arc;
/// use safari::{embark, FallbackMode, NoMenu, SiteOptions, SiteOutput};
///
/// fn main() -> Result<SiteOutput, Box<dyn std::error::Error>> {
///   embark(SiteOptions {
///     site_dir: "www".into(),
///     output_dir: "public".into(),
///     fallback: FallbackMode::ErrorMessage,
///     menu: Arc::new(NoMenu),
///     ..Default::default()
///   })
/// }
/// ```
pub struct SiteOptions {
    /// Directory holding the pages, fragments and static files of the site.
    pub site_dir: PathBuf,
    pub output_dir: PathBuf,

    /// Where fragments and content files are read from.
    pub content: ContentLocation,
    /// Directory of the content files, relative to the content location. Defaults to `data`.
    pub content_dir: String,
    pub fragments: FragmentOptions,

    /// What a placeholder shows when its content cannot be loaded.
    pub fallback: FallbackMode,
    /// Scripts added to every page.
    pub interactions: Vec<Interaction>,
    /// Runs on each page once its header is in place.
    pub menu: Arc<dyn MenuInitializer>,

    /// Whether to clean the output directory before building.
    pub clean_output_dir: bool,
    /// Whether files of the site that are not pages (stylesheets, images, content) are copied to the
    /// output directory.
    pub copy_site_files: bool,
}

/// Where a build reads fragments and content files from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ContentLocation {
    /// The site directory itself.
    #[default]
    SiteDir,
    Directory(PathBuf),
    /// A deployed copy of the site, e.g. `https://safarimatch.com/`.
    #[cfg(feature = "http")]
    Remote(String),
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            site_dir: "site".into(),
            output_dir: "dist".into(),
            content: ContentLocation::default(),
            content_dir: "data".into(),
            fragments: FragmentOptions::default(),
            fallback: FallbackMode::default(),
            interactions: Interaction::ALL.to_vec(),
            menu: Arc::new(ScriptedMenu),
            clean_output_dir: true,
            copy_site_files: true,
        }
    }
}

impl SiteOptions {
    pub fn source(&self) -> SiteSource {
        match &self.content {
            ContentLocation::SiteDir => SiteSource::Directory(DirSource::new(&self.site_dir)),
            ContentLocation::Directory(path) => SiteSource::Directory(DirSource::new(path)),
            #[cfg(feature = "http")]
            ContentLocation::Remote(base_url) => {
                SiteSource::Remote(crate::content::HttpSource::new(base_url.as_str()))
            }
        }
    }

    /// The context shared by every page of a build.
    pub fn site_context(&self) -> SiteContext<SiteSource> {
        SiteContext {
            fetcher: ContentFetcher::with_content_dir(self.source(), self.content_dir.as_str()),
            fragments: self.fragments.clone(),
            fallback: self.fallback,
            menu: Arc::clone(&self.menu),
            interactions: self.interactions.clone(),
        }
    }
}
