use std::{process::Termination, time::Instant};

use crate::controller::PageKind;
use crate::diagnostics::Diagnostic;

/// Metadata returned by [`build_site()`](crate::build_site) for a single page.
#[derive(Debug)]
pub struct PageOutput {
    pub url: String,
    pub file_path: String,
    pub kind: PageKind,
    /// Everything that fell back or was skipped while rendering the page.
    pub diagnostics: Vec<Diagnostic>,
}

/// A file of the site copied to the output directory as is.
#[derive(Debug)]
pub struct SiteFileOutput {
    pub file_path: String,
    pub original_path: String,
}

/// Metadata returned by [`build_site()`](crate::build_site) after a build.
#[derive(Debug)]
pub struct SiteOutput {
    pub start_time: Instant,
    pub pages: Vec<PageOutput>,
    pub site_files: Vec<SiteFileOutput>,
}

impl SiteOutput {
    pub fn new(start_time: Instant) -> Self {
        Self {
            start_time,
            pages: Vec::new(),
            site_files: Vec::new(),
        }
    }

    pub(crate) fn add_page(
        &mut self,
        url: String,
        file_path: String,
        kind: PageKind,
        diagnostics: Vec<Diagnostic>,
    ) {
        self.pages.push(PageOutput {
            url,
            file_path,
            kind,
            diagnostics,
        });
    }

    pub(crate) fn add_site_file(&mut self, file_path: String, original_path: String) {
        self.site_files.push(SiteFileOutput {
            file_path,
            original_path,
        });
    }

    pub fn page(&self, url: &str) -> Option<&PageOutput> {
        self.pages.iter().find(|page| page.url == url)
    }

    /// Every diagnostic of the build, page by page.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.pages.iter().flat_map(|page| page.diagnostics.iter())
    }
}

impl Default for SiteOutput {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl Termination for SiteOutput {
    fn report(self) -> std::process::ExitCode {
        0.into()
    }
}
