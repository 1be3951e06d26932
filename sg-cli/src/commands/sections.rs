//! Sections command - dump every announcement on the page

use std::path::PathBuf;

use clap::Args;
use sg_core::navigation::NO_ANNOUNCEMENT_TEXT;
use sg_core::{render_report, Config, Extractor};

use super::{load_page, page_source};

/// List every announcement section found on the page
#[derive(Args, Debug)]
pub struct SectionsArgs {
    /// Read a saved page instead of fetching the site
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Print sections as JSON
    #[arg(long)]
    json: bool,
}

impl SectionsArgs {
    /// Execute the sections command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let extractor = Extractor::new(&config.extract)?;
        let source = page_source(self.file.as_ref(), config)?;
        let markup = load_page(source.as_ref()).await;

        let sections = extractor.extract_sections(&markup);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&sections)?);
            return Ok(());
        }

        if sections.is_empty() {
            println!("{}", NO_ANNOUNCEMENT_TEXT);
            return Ok(());
        }

        print!("{}", render_report(&sections));
        Ok(())
    }
}
