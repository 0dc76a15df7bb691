use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Instant,
};

use colored::{ColoredString, Colorize};
use futures::future::join_all;
use log::{debug, info, trace};

use crate::{
    SiteOptions, SiteOutput,
    content::SiteSource,
    controller::{SiteContext, load_page_content},
    errors::{SafariError, SourceError},
    logging::{FormatElapsedTimeOptions, format_elapsed_time, print_title},
    page::Page,
};

pub mod metadata;
pub mod options;

use metadata::PageOutput;

pub fn execute_build(
    options: &SiteOptions,
    async_runtime: &tokio::runtime::Runtime,
) -> Result<SiteOutput, SafariError> {
    async_runtime.block_on(async { build_site(options).await })
}

/// Renders every page of the site into the output directory.
///
/// Pages are the `.html` files of [`SiteOptions::site_dir`], apart from the header and footer
/// fragments. Content problems never fail a build, they are reported in each page's
/// [`PageOutput::diagnostics`]. Only reading pages or writing the output can fail.
pub async fn build_site(options: &SiteOptions) -> Result<SiteOutput, SafariError> {
    let build_start = Instant::now();
    let mut build_metadata = SiteOutput::new(build_start);

    if contains_dir(&options.output_dir, &options.site_dir) {
        return Err(SafariError::OutputContainsSiteDir {
            path: options.output_dir.clone(),
        });
    }

    trace!(target: "build", "Setting up required directories...");
    if options.clean_output_dir && options.output_dir.exists() {
        fs::remove_dir_all(&options.output_dir)?;
    }
    fs::create_dir_all(&options.output_dir)?;

    info!(target: "build", "Output directory: {}", options.output_dir.display());

    let route_format_options = FormatElapsedTimeOptions {
        additional_fn: Some(&|msg: ColoredString| {
            let formatted_msg = format!("(+{})", msg);
            if msg.fgcolor.is_none() {
                formatted_msg.dimmed()
            } else {
                formatted_msg.into()
            }
        }),
        ..Default::default()
    };

    let section_format_options = FormatElapsedTimeOptions {
        sec_red_threshold: 5,
        sec_yellow_threshold: 1,
        millis_red_threshold: None,
        millis_yellow_threshold: None,
        ..Default::default()
    };

    print_title("generating pages");
    let pages_start = Instant::now();

    let pages = discover_pages(options)?;
    let context = options.site_context();

    let rendered = join_all(
        pages
            .iter()
            .map(|page| render_page(&context, options, page, &route_format_options)),
    )
    .await;

    for page in rendered {
        let page = page?;
        build_metadata.add_page(page.url, page.file_path, page.kind, page.diagnostics);
    }

    let diagnostic_count = build_metadata.diagnostics().count();
    info!(target: "pages", "{}", format!("generated {} pages in {}", build_metadata.pages.len(), format_elapsed_time(pages_start.elapsed(), &section_format_options)).bold());
    if diagnostic_count > 0 {
        info!(target: "pages", "{} placeholders or fragments fell back, see the warnings above", diagnostic_count);
    }

    if options.copy_site_files {
        let copy_start = Instant::now();
        print_title("copying site files");

        let output_dir = fs::canonicalize(&options.output_dir)?;
        copy_recursively(
            &options.site_dir,
            &options.output_dir,
            &|path: &Path| is_site_file(options, &output_dir, path),
            &mut build_metadata,
        )?;

        info!(target: "build", "{}", format!("{} files copied in {}", build_metadata.site_files.len(), format_elapsed_time(copy_start.elapsed(), &FormatElapsedTimeOptions::default())).bold());
    }

    info!(target: "SKIP_FORMAT", "{}", "");
    info!(target: "build", "{}", format!("Build completed in {}", format_elapsed_time(build_start.elapsed(), &section_format_options)).bold());

    Ok(build_metadata)
}

/// Lists the pages of the site, relative to the site directory, in a stable order.
fn discover_pages(options: &SiteOptions) -> Result<Vec<PathBuf>, SafariError> {
    let pattern = format!(
        "{}/**/*.html",
        glob::Pattern::escape(&options.site_dir.to_string_lossy())
    );
    let output_dir = fs::canonicalize(&options.output_dir)?;

    let mut pages = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry.map_err(glob::GlobError::into_error)?;
        let Ok(relative) = path.strip_prefix(&options.site_dir) else {
            continue;
        };

        if options.fragments.is_fragment(&url_path(relative)) {
            trace!(target: "build", "Skipping fragment {}", relative.display());
            continue;
        }
        if fs::canonicalize(&path).is_ok_and(|path| path.starts_with(&output_dir)) {
            continue;
        }

        pages.push(relative.to_path_buf());
    }

    pages.sort();
    debug!(target: "build", "Found {} pages in {}", pages.len(), options.site_dir.display());

    Ok(pages)
}

async fn render_page(
    context: &SiteContext<SiteSource>,
    options: &SiteOptions,
    relative: &Path,
    format_options: &FormatElapsedTimeOptions<'_>,
) -> Result<PageOutput, SafariError> {
    let page_start = Instant::now();
    let source_path = options.site_dir.join(relative);
    let html = tokio::fs::read_to_string(&source_path)
        .await
        .map_err(|source| SourceError::Io {
            path: source_path,
            source,
        })?;

    let url = format!("/{}", url_path(relative));
    let mut page = Page::new(url.as_str(), html);
    let (kind, diagnostics) = load_page_content(context, &mut page).await;

    let file_path = options.output_dir.join(relative);
    write_page_file(page.html().as_bytes(), &file_path).await?;

    info!(target: "pages", "{} -> {} {}", url, file_path.to_string_lossy().dimmed(), format_elapsed_time(page_start.elapsed(), format_options));

    Ok(PageOutput {
        url,
        file_path: file_path.to_string_lossy().to_string(),
        kind,
        diagnostics: diagnostics.into_vec(),
    })
}

/// A path relative to the site directory, as it appears in a URL.
fn url_path(relative: &Path) -> String {
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Whether a file of the site directory is copied as is: anything but pages, fragments and the
/// output directory itself.
fn is_site_file(options: &SiteOptions, output_dir: &Path, path: &Path) -> bool {
    if fs::canonicalize(path).is_ok_and(|path| path == output_dir) {
        return false;
    }

    if path.is_dir() {
        return true;
    }

    let is_page = path.extension().is_some_and(|extension| extension == "html");
    !is_page
        && !path
            .strip_prefix(&options.site_dir)
            .is_ok_and(|relative| options.fragments.is_fragment(&url_path(relative)))
}

/// Whether `dir` is `inner` or one of its ancestors. Cleaning such an output directory would
/// delete the site.
fn contains_dir(dir: &Path, inner: &Path) -> bool {
    match (fs::canonicalize(dir), fs::canonicalize(inner)) {
        (Ok(dir), Ok(inner)) => inner.starts_with(dir),
        _ => inner.starts_with(dir),
    }
}

fn copy_recursively(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    include: &dyn Fn(&Path) -> bool,
    build_metadata: &mut SiteOutput,
) -> io::Result<()> {
    fs::create_dir_all(&destination)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let path = entry.path();
        if !include(&path) {
            continue;
        }

        let filetype = entry.file_type()?;
        if filetype.is_dir() {
            copy_recursively(
                &path,
                destination.as_ref().join(entry.file_name()),
                include,
                build_metadata,
            )?;
        } else {
            let file_path = destination.as_ref().join(entry.file_name());
            fs::copy(&path, &file_path)?;

            build_metadata.add_site_file(
                file_path.to_string_lossy().to_string(),
                path.to_string_lossy().to_string(),
            );
        }
    }
    Ok(())
}

async fn write_page_file(content: &[u8], file_path: &Path) -> Result<(), io::Error> {
    if let Some(parent_dir) = file_path.parent() {
        tokio::fs::create_dir_all(parent_dir).await?
    }

    tokio::fs::write(file_path, content).await?;

    Ok(())
}
