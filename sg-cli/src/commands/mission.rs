//! Mission command - render one mission of the latest announcement

use std::path::PathBuf;

use clap::Args;
use sg_core::navigation::{
    buttons, parse_callback, render_selected, NavigationError, NO_ANNOUNCEMENT_TEXT,
    SITE_LINK_LABEL,
};
use sg_core::{Config, Extractor};

use super::{load_page, page_source};

/// Show one mission of the latest announcement
#[derive(Args, Debug)]
pub struct MissionArgs {
    /// Read a saved page instead of fetching the site
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Mission index, 0-based
    #[arg(short, long, default_value_t = 0, conflicts_with = "callback")]
    index: usize,

    /// Button payload as sent by a chat front-end, e.g. `mission:2`
    #[arg(long)]
    callback: Option<String>,

    /// Also print resolved description links
    #[arg(long)]
    links: bool,
}

impl MissionArgs {
    /// Execute the mission command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let index = match self.callback.as_deref().map(parse_callback) {
            Some(Ok(index)) => index,
            Some(Err(e)) => {
                eprintln!("{}", e.user_message());
                return Ok(());
            }
            None => self.index,
        };

        let extractor = Extractor::new(&config.extract)?;
        let source = page_source(self.file.as_ref(), config)?;
        let markup = load_page(source.as_ref()).await;

        let Some(latest) = extractor.latest(&markup) else {
            println!("{}", NO_ANNOUNCEMENT_TEXT);
            return Ok(());
        };

        let text = match render_selected(&latest, index, &config.glyphs) {
            Ok(text) => text,
            Err(e @ NavigationError::NoMissions) => {
                println!("{}", e.user_message());
                return Ok(());
            }
            Err(e) => {
                tracing::debug!(error = %e, "Rejected mission request");
                eprintln!("{}", e.user_message());
                return Ok(());
            }
        };

        println!("{}", text);
        println!();

        if self.links {
            let description = latest
                .missions
                .get(index)
                .and_then(|m| m.info.description.as_ref());
            if let Some(description) = description {
                let base = config.site_url()?;
                for link in description.resolved_links(&base) {
                    println!("🔗 {}", link);
                }
                println!();
            }
        }

        let nav: Vec<String> = buttons()
            .into_iter()
            .map(|(label, payload)| format!("[{}] {}", label, payload))
            .collect();
        println!("{}", nav.join("  "));
        println!("{}: {}", SITE_LINK_LABEL, config.site.url);

        Ok(())
    }
}
