//! Mission content block parsing

use scraper::ElementRef;
use tracing::{debug, warn};

use super::selectors::{Role, Selectors};
use super::text::{depth, extract_sides, has_class, is_unclassed, multiline_text, stripped_text};
use super::ExtractError;
use crate::config::ExtractConfig;
use crate::model::{Description, MissionInfo, ServerBlock, SideMap, DEFAULT_SERVER};

/// What one content element contributes to the mission
#[derive(Debug, PartialEq, Eq)]
enum Item {
    ServerLabel(String),
    Map(String),
    Time(String),
    Sides(SideMap),
    Equipment(SideMap),
}

pub(super) struct BlockParser<'a> {
    selectors: &'a Selectors,
    config: &'a ExtractConfig,
}

impl<'a> BlockParser<'a> {
    pub(super) fn new(selectors: &'a Selectors, config: &'a ExtractConfig) -> Self {
        Self { selectors, config }
    }

    /// Parse one content block into a [`MissionInfo`]
    pub(super) fn parse(&self, block: ElementRef<'_>) -> Result<MissionInfo, ExtractError> {
        let block_depth = depth(block);
        if block_depth > self.config.max_depth {
            return Err(ExtractError::TooDeep {
                depth: block_depth,
                limit: self.config.max_depth,
            });
        }

        let mut info = MissionInfo::default();
        let mut current: Option<usize> = None;

        let wrappers = block
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|w| !has_class(*w, &self.config.mobile_item_class))
            .filter(|w| w.value().name() == "div");

        for wrapper in wrappers {
            for (child_index, element) in wrapper.children().filter_map(ElementRef::wrap).enumerate() {
                match self.classify(element) {
                    Ok(Some(item)) => apply(&mut info, &mut current, item),
                    Ok(None) => {}
                    Err(e) => warn!(child_index, error = %e, "Skipping mission block element"),
                }
            }
        }

        info.description = self.description(block);
        info.equipment = info.flatten_equipment();

        Ok(info)
    }

    fn classify(&self, element: ElementRef<'_>) -> Result<Option<Item>, ExtractError> {
        let element_depth = depth(element);
        if element_depth > self.config.max_depth {
            return Err(ExtractError::TooDeep {
                depth: element_depth,
                limit: self.config.max_depth,
            });
        }

        if let Some(name) = self.server_label(element) {
            return Ok(Some(Item::ServerLabel(name)));
        }

        let item = self
            .selectors
            .roles
            .classify(element)
            .map(|role| match role {
                Role::Map => Item::Map(stripped_text(element)),
                Role::Time => Item::Time(stripped_text(element)),
                Role::Roster => Item::Sides(extract_sides(element, &self.config.side_suffix)),
                Role::Equipment => {
                    Item::Equipment(extract_sides(element, &self.config.side_suffix))
                }
            });
        Ok(item)
    }

    /// An unclassed element whose text starts with the server prefix
    fn server_label(&self, element: ElementRef<'_>) -> Option<String> {
        if !is_unclassed(element) {
            return None;
        }
        let text = stripped_text(element);
        text.starts_with(&self.config.server_label_prefix)
            .then_some(text)
    }

    fn description(&self, block: ElementRef<'_>) -> Option<Description> {
        let spoiler = block.select(&self.selectors.preview_spoiler).next()?;
        let links = spoiler
            .select(&self.selectors.link)
            .filter_map(|a| a.value().attr("href"))
            .map(str::to_string)
            .collect();
        Some(Description {
            text: multiline_text(spoiler),
            links,
        })
    }
}

/// Fold one item into the mission, tracking the current server
fn apply(info: &mut MissionInfo, current: &mut Option<usize>, item: Item) {
    match item {
        Item::ServerLabel(name) => {
            debug!(server = %name, "Server label");
            info.servers.push(ServerBlock::new(name));
            *current = Some(info.servers.len() - 1);
        }
        Item::Map(map) => info.map = Some(map),
        Item::Time(time) => info.time = Some(time),
        Item::Sides(sides) => current_server(info, current).sides.extend(sides),
        Item::Equipment(equipment) => current_server(info, current).equipment.extend(equipment),
    }
}

/// The server new sides belong to, creating the implicit default one if needed
fn current_server<'i>(info: &'i mut MissionInfo, current: &mut Option<usize>) -> &'i mut ServerBlock {
    let index = match *current {
        Some(index) => index,
        None => {
            info.servers.push(ServerBlock::new(DEFAULT_SERVER));
            let index = info.servers.len() - 1;
            *current = Some(index);
            index
        }
    };
    &mut info.servers[index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn parse(markup: &str) -> MissionInfo {
        parse_with(markup, &ExtractConfig::default()).unwrap()
    }

    fn parse_with(markup: &str, config: &ExtractConfig) -> Result<MissionInfo, ExtractError> {
        let selectors = Selectors::new(&config.selectors).unwrap();
        let html = Html::parse_document(markup);
        let block = Selector::parse(".feed-padding").unwrap();
        let block = html.select(&block).next().unwrap();
        BlockParser::new(&selectors, config).parse(block)
    }

    #[test]
    fn test_map_and_time() {
        let info = parse(
            r#"<div class="feed-padding"><div>
                <div class="mission-desc-item"><i class="sg-map"></i> Altis </div>
                <div class="mission-desc-item"><i class="sg-clock"></i> 06:00 </div>
            </div></div>"#,
        );
        assert_eq!(info.map.as_deref(), Some("Altis"));
        assert_eq!(info.time.as_deref(), Some("06:00"));
        assert!(info.servers.is_empty());
        assert!(info.equipment.is_none());
    }

    #[test]
    fn test_repeated_map_last_wins() {
        let info = parse(
            r#"<div class="feed-padding"><div>
                <div class="x"><i class="sg-map"></i>Altis</div>
                <div class="x"><i class="sg-map"></i>Stratis</div>
            </div></div>"#,
        );
        assert_eq!(info.map.as_deref(), Some("Stratis"));
    }

    #[test]
    fn test_implicit_default_server() {
        let info = parse(
            r#"<div class="feed-padding"><div>
                <div class="x"><i class="sg-users"></i><span class="red-side">Red</span></div>
                <div class="x"><i class="sg-car"></i><span class="blue-side">BTR</span></div>
            </div></div>"#,
        );
        assert_eq!(info.servers.len(), 1);
        assert_eq!(info.servers[0].name, DEFAULT_SERVER);
        assert_eq!(info.servers[0].sides.get("red-side"), Some("Red"));
        assert_eq!(info.servers[0].equipment.get("blue-side"), Some("BTR"));
    }

    #[test]
    fn test_server_labels_split_sides() {
        let info = parse(
            r#"<div class="feed-padding"><div>
                <div>Server 1</div>
                <div class="x"><i class="sg-users"></i><span class="red-side">Red 1</span></div>
                <div>Server 2</div>
                <div class="x"><i class="sg-users"></i><span class="red-side">Red 2</span></div>
                <div class="x"><i class="sg-users"></i><span class="red-side">Red 2b</span></div>
            </div></div>"#,
        );
        assert_eq!(info.servers.len(), 2);
        assert_eq!(info.servers[0].name, "Server 1");
        assert_eq!(info.servers[0].sides.get("red-side"), Some("Red 1"));
        assert_eq!(info.servers[1].name, "Server 2");
        // straight key update within one server
        assert_eq!(info.servers[1].sides.get("red-side"), Some("Red 2b"));
        // flattened view keeps the first occurrence
        assert_eq!(info.equipment.unwrap().get("red-side"), Some("Red 1"));
    }

    #[test]
    fn test_classed_server_text_is_not_a_label() {
        let info = parse(
            r#"<div class="feed-padding"><div>
                <div class="title">Server 1</div>
                <div class="x"><i class="sg-users"></i><span class="red-side">Red</span></div>
            </div></div>"#,
        );
        assert_eq!(info.servers.len(), 1);
        assert_eq!(info.servers[0].name, DEFAULT_SERVER);
    }

    #[test]
    fn test_mobile_variant_skipped() {
        let info = parse(
            r#"<div class="feed-padding">
                <div class="mobile-item">
                    <div>Server M</div>
                    <div class="x"><i class="sg-users"></i><span class="red-side">Mobile</span></div>
                </div>
                <div class="desktop-item">
                    <div class="x"><i class="sg-users"></i><span class="red-side">Desktop</span></div>
                </div>
            </div>"#,
        );
        assert_eq!(info.servers.len(), 1);
        assert_eq!(info.servers[0].name, DEFAULT_SERVER);
        assert_eq!(info.servers[0].sides.get("red-side"), Some("Desktop"));
    }

    #[test]
    fn test_non_div_wrapper_ignored() {
        let info = parse(
            r#"<div class="feed-padding">
                <section><div class="x"><i class="sg-map"></i>Altis</div></section>
            </div>"#,
        );
        assert!(info.map.is_none());
    }

    #[test]
    fn test_description_anywhere_in_block() {
        let info = parse(
            r#"<div class="feed-padding">
                <div class="mobile-item"><p>dup</p></div>
                <span><div class="preview-spoiler-body">
                    Line one
                    <p>Line two <a href="/a">first</a> <a>nolink</a> <a href="https://x.org/b">second</a></p>
                </div></span>
            </div>"#,
        );
        let description = info.description.unwrap();
        assert_eq!(description.text, "Line one\nLine two\nfirst\nnolink\nsecond");
        assert_eq!(description.links, vec!["/a", "https://x.org/b"]);
    }

    #[test]
    fn test_too_deep_block_rejected() {
        let config = ExtractConfig {
            max_depth: 2,
            ..ExtractConfig::default()
        };
        let err = parse_with(
            r#"<div><div class="feed-padding"><div></div></div></div>"#,
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, ExtractError::TooDeep { limit: 2, .. }));
    }
}
