//! Sieve CLI
//!
//! Extracts the plain text and metadata of an HTML document.
//!
//! Usage:
//!   sieve page.html                Print title, metadata and text
//!   sieve <https://...> --links    Also list resolved hyperlinks
//!   sieve page.html --json         Emit everything as JSON
//!   sieve --html '<p>Hi</p>'       Extract an inline string

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use serde::Serialize;
use sieve_common::net::{fetch_bytes, is_remote};
use sieve_common::url::UrlResolver;
use sieve_common::warning::warn_once;
use sieve_html::{
    ExtractOptions, ExtractedDocument, HtmlExtractor, HyperlinkParser, LinkKind, body_section,
    parse_charset, style_section,
};

/// Sieve: fault-tolerant HTML to plain text extraction
#[derive(Parser, Debug)]
#[command(name = "sieve")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Extract a local file
    sieve ./index.html

    # Fetch a page and list its links, resolved against the page URL
    sieve --links https://example.com

    # Include images and resolve against a different base
    sieve --links --images --base https://cdn.example.com/ ./index.html

    # Machine-readable output
    sieve --json ./index.html

    # Extract inline HTML and show what was repaired
    sieve --warnings --html '<p>Fish &amp chips'
"#)]
struct Cli {
    /// Path to HTML file or URL to extract
    #[arg(value_name = "FILE|URL")]
    path: Option<String>,

    /// Extract an HTML string directly instead of a file/URL
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Drop text before the first tag and after the last one
    #[arg(long)]
    no_outer_text: bool,

    /// Keep line endings everywhere, as inside <pre>
    #[arg(long)]
    preserve_newlines: bool,

    /// Only extract the content of <body>
    #[arg(long)]
    body_only: bool,

    /// List the document's hyperlinks
    #[arg(short, long)]
    links: bool,

    /// Include <img> sources in the link list
    #[arg(long, requires = "links")]
    images: bool,

    /// Resolve links against this URL instead of <base href> or the page URL
    #[arg(long, value_name = "URL")]
    base: Option<String>,

    /// Print the content of the first <style> element
    #[arg(long)]
    css: bool,

    /// Print everything as JSON
    #[arg(short, long)]
    json: bool,

    /// Print extraction diagnostics to stderr
    #[arg(short, long)]
    warnings: bool,
}

/// A link after resolution.
#[derive(Debug, Serialize)]
struct ResolvedLink {
    url: String,
    kind: LinkKind,
}

/// `--json` output.
#[derive(Debug, Serialize)]
struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    charset: Option<String>,
    #[serde(flatten)]
    document: ExtractedDocument,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    links: Vec<ResolvedLink>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (bytes, page_url) = load_source(&cli)?;
    let charset = parse_charset(&bytes);
    if let Some(label) = charset.as_deref()
        && !label.eq_ignore_ascii_case("utf-8")
    {
        warn_once(
            "charset",
            &format!("document declares charset '{label}'; decoding as UTF-8"),
        );
    }
    let decoded = String::from_utf8_lossy(&bytes);
    let html: &str = &decoded;

    let source = if cli.body_only {
        body_section(html)
    } else {
        html
    };
    let options = ExtractOptions {
        include_outer_text: !cli.no_outer_text,
        preserve_newlines: cli.preserve_newlines,
    };
    let extractor = extract_document(source, options).unwrap_or_else(|| {
        let what = if cli.body_only { "<body> is empty" } else { "document is empty" };
        warn_once("input", &format!("{what}; nothing to extract"));
        HtmlExtractor::new()
    });

    let links = if cli.links {
        resolve_links(html, cli.images, cli.base.as_deref(), page_url.as_deref())
    } else {
        Vec::new()
    };

    if cli.json {
        let report = Report {
            charset,
            document: extractor.document(),
            links,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_document(&extractor, charset.as_deref());
        if cli.links {
            print_links(&links);
        }
        if cli.css {
            println!("\n{}", "=== Style ===".bold());
            println!("{}", style_section(html));
        }
    }

    if cli.warnings {
        extractor.diagnostics().print();
    }
    Ok(())
}

/// Read the raw document bytes, and the URL they came from if fetched
fn load_source(cli: &Cli) -> Result<(Vec<u8>, Option<String>)> {
    if let Some(ref html) = cli.html {
        Ok((html.clone().into_bytes(), None))
    } else if let Some(ref path) = cli.path {
        if is_remote(path) {
            let bytes = fetch_bytes(path).with_context(|| format!("failed to fetch '{path}'"))?;
            Ok((bytes, Some(path.clone())))
        } else {
            let bytes = fs::read(path).with_context(|| format!("failed to read '{path}'"))?;
            Ok((bytes, None))
        }
    } else {
        anyhow::bail!("a file path, URL, or --html is required")
    }
}

/// Extract `source`, or `None` when it is empty.
fn extract_document(source: &str, options: ExtractOptions) -> Option<HtmlExtractor> {
    let mut extractor = HtmlExtractor::new();
    let found = extractor.extract(source, options).is_some();
    found.then_some(extractor)
}

/// Collect the document's links, resolved when a base URL is known.
///
/// `--base` wins over the document's `<base href>`, which wins over the URL
/// the page was fetched from.
fn resolve_links(
    html: &str,
    include_images: bool,
    explicit_base: Option<&str>,
    page_url: Option<&str>,
) -> Vec<ResolvedLink> {
    let parser = HyperlinkParser::new(html, include_images);
    let mut resolver = explicit_base
        .or_else(|| parser.base_url())
        .or(page_url)
        .map(UrlResolver::new);

    parser
        .map(|link| {
            let url = match resolver.as_mut() {
                Some(resolver) => resolver
                    .resolve(link.url, link.kind == LinkKind::Image)
                    .unwrap_or(link.url)
                    .to_string(),
                None => link.url.to_string(),
            };
            ResolvedLink {
                url,
                kind: link.kind,
            }
        })
        .collect()
}

/// Print metadata and text to stdout
fn print_document(extractor: &HtmlExtractor, charset: Option<&str>) {
    let fields = [
        ("Title", extractor.title()),
        ("Author", extractor.author()),
        ("Description", extractor.description()),
        ("Keywords", extractor.keywords()),
        ("Subject", extractor.subject()),
        ("Charset", charset.unwrap_or_default()),
    ];
    for (label, value) in fields.into_iter().filter(|(_, value)| !value.is_empty()) {
        println!("{} {value}", format!("{label}:").cyan());
    }

    println!("\n{}", "=== Text ===".bold());
    println!("{}", extractor.text());

    let count = extractor.diagnostics().len();
    if count > 0 {
        println!(
            "\n{}",
            format!("{count} diagnostic(s); rerun with --warnings to list them").dimmed()
        );
    }
}

/// Print the link list with each link's kind
fn print_links(links: &[ResolvedLink]) {
    println!("\n{}", "=== Links ===".bold());
    for link in links {
        let kind = match link.kind {
            LinkKind::Plain => link.kind.to_string().green().to_string(),
            LinkKind::Image => link.kind.to_string().magenta().to_string(),
            LinkKind::Script => link.kind.to_string().yellow().to_string(),
        };
        println!("  [{kind}] {}", link.url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_has_nothing_to_extract() {
        assert!(extract_document("", ExtractOptions::default()).is_none());
        let empty_body = body_section("<html><body></body></html>");
        assert!(extract_document(empty_body, ExtractOptions::default()).is_none());
    }

    #[test]
    fn test_extract_document_keeps_text_and_metadata() {
        let extractor = extract_document("<title>T</title><p>Hi</p>", ExtractOptions::default());
        assert_eq!(extractor.as_ref().map(HtmlExtractor::text), Some("\n\nHi\n\n"));
        assert_eq!(extractor.as_ref().map(HtmlExtractor::title), Some("T"));
    }

    #[test]
    fn test_links_are_resolved_against_explicit_base() {
        let links = resolve_links(
            r#"<a href="x.html">x</a>"#,
            false,
            Some("http://a.com/dir/"),
            Some("http://ignored.org/"),
        );
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "http://a.com/dir/x.html");
    }
}
