// src/config/options.rs

use std::path::PathBuf;

/// Which bundled demo page to open when none is given on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemoPage {
    Listings,
    Booking,
}

impl DemoPage {
    pub fn html(self) -> &'static str {
        match self {
            DemoPage::Listings => include_str!("../../demos/listings.html"),
            DemoPage::Booking => include_str!("../../demos/booking.html"),
        }
    }

    /// Pseudo-location the adapter registry matches against.
    pub fn url(self) -> &'static str {
        match self {
            DemoPage::Listings => "https://eats.example/feed",
            DemoPage::Booking => "https://travel.example/search",
        }
    }
}

/// How the tool was launched: a page to open plus the location string used
/// for adapter activation.
#[derive(Clone, Debug, Default)]
pub struct LaunchOptions {
    /// HTML file to load; falls back to a bundled demo page.
    pub page: Option<PathBuf>,
    /// Location for adapter matching; defaults to the demo's url or the
    /// page path itself.
    pub url: Option<String>,
    pub demo: Option<DemoPage>,
}

impl LaunchOptions {
    pub fn effective_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        if let Some(page) = &self.page {
            return page.to_string_lossy().into_owned();
        }
        s!(self.demo.unwrap_or(DemoPage::Listings).url())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

#[derive(Clone, Debug)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub out: Option<PathBuf>,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out: None,
            include_headers: true,
        }
    }
}

impl ExportOptions {
    pub fn out_path(&self) -> PathBuf {
        match &self.out {
            Some(p) => p.clone(),
            None => PathBuf::from(format!("table.{}", self.format.ext())),
        }
    }
}
