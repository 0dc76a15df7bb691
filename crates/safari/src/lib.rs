//! Pre-renders the Safari Match marketing site.
//!
//! The site is a handful of static HTML pages with empty placeholders (`<div id="features-content">`)
//! and a header and footer kept in separate fragment files. A build fills every placeholder from
//! the site's JSON content files, places the fragments, and adds the scripts for the interactive
//! parts (mobile menu, cookie banner, contact form, smooth scrolling). Placeholders whose content
//! cannot be loaded get fallback content instead, so a build always produces every page.
//!
//! ```rust,no_run
//! use safari::{embark, SiteOptions, SiteOutput};
//!
//! fn main() -> Result<SiteOutput, Box<dyn std::error::Error>> {
//!   embark(SiteOptions::default())
//! }
//! ```

// Modules the end-user will interact directly or indirectly with
pub mod content;
pub mod controller;
pub mod diagnostics;
pub mod errors;
pub mod fallback;
pub mod fragments;
pub mod interactions;
pub mod page;
pub mod render;

// Exports for end-users
pub use build::build_site;
pub use build::metadata::{PageOutput, SiteFileOutput, SiteOutput};
pub use build::options::{ContentLocation, SiteOptions};
pub use content::{ContentFetcher, load_content_from_json};
pub use controller::{PageKind, SiteContext, load_page_content};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use errors::SafariError;
pub use fallback::{FallbackMode, show_error_content};
pub use fragments::{FragmentOptions, load_templates};
pub use interactions::{Interaction, MenuInitializer, NoMenu, ScriptedMenu};
pub use logging::{FormatElapsedTimeOptions, format_elapsed_time, init_logging, print_title};
pub use render::render_content;

mod build;

// Internal modules
mod logging;

use build::execute_build;

/// Builds the site described by `options`, logging to the terminal.
///
/// Should be called from the main function of the binary crate. Use [`build_site()`] instead to run
/// a build inside an existing async runtime.
/// ```rust,no_run
/// use safari::{embark, SiteOptions, SiteOutput};
///
/// fn main() -> Result<SiteOutput, Box<dyn std::error::Error>> {
///   embark(SiteOptions {
///     output_dir: "public".into(),
///     ..Default::default()
///   })
/// }
/// ```
pub fn embark(options: SiteOptions) -> Result<SiteOutput, Box<dyn std::error::Error>> {
    init_logging();

    let async_runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    Ok(execute_build(&options, &async_runtime)?)
}
