//! Rendering of a single mission as HTML-decorated chat text

use tracing::warn;

use crate::config::SideGlyphs;
use crate::model::{Mission, SideMap};

/// Suffix shown after a side whose text spans several lines
const ATTACK_SUFFIX: &str = " — ⚔️ Атака";

/// Escape text for inclusion in HTML markup
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render `missions[index]`, optionally under a section banner.
///
/// Callers validate `index` first (see [`crate::navigation::select_mission`]);
/// an out-of-range index renders nothing.
pub fn format_mission(
    missions: &[Mission],
    index: usize,
    section_title: Option<&str>,
    glyphs: &SideGlyphs,
) -> String {
    let Some(mission) = missions.get(index) else {
        warn!(index, available = missions.len(), "Mission index out of range");
        return String::new();
    };
    let info = &mission.info;
    let mut lines: Vec<String> = Vec::new();

    if let Some(title) = section_title.filter(|t| !t.is_empty()) {
        lines.push(format!("📢 <b>{}</b>\n", escape_html(title)));
    }

    lines.push(format!("🎯 <b>Миссия:</b> {}\n", escape_html(&mission.name)));

    if let Some(map) = info.map.as_deref().filter(|m| !m.is_empty()) {
        lines.push(format!("🗺 <b>Карта:</b> {}", escape_html(map)));
    }
    if let Some(time) = info.time.as_deref().filter(|t| !t.is_empty()) {
        lines.push(format!("☁️ <b>Погода и время:</b> {}", escape_html(time)));
    }

    if let Some(description) = &info.description {
        lines.push("\n📝 <b>Описание:</b>".to_string());
        lines.push(escape_html(&description.text));
    }

    for server in &info.servers {
        lines.push(format!("\n🖥 <b>{}\n</b>", escape_html(&server.name)));
        push_sides(&mut lines, &server.sides, glyphs);
        push_equipment(&mut lines, &server.equipment, glyphs);
    }

    lines.join("\n")
}

/// One line per side: glyph and headline, marked as attack when more detail follows
fn push_sides(lines: &mut Vec<String>, sides: &SideMap, glyphs: &SideGlyphs) {
    for (side, text) in sides.iter() {
        let mut side_lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
        let Some(headline) = side_lines.next() else {
            continue;
        };
        let suffix = if side_lines.next().is_some() { ATTACK_SUFFIX } else { "" };
        lines.push(format!("{}{}{}", glyphs.side(side), escape_html(headline), suffix));
    }
}

fn push_equipment(lines: &mut Vec<String>, equipment: &SideMap, glyphs: &SideGlyphs) {
    for (side, text) in equipment.iter() {
        lines.push(format!("\n{} <b>Техника:</b>", glyphs.equipment(side)));
        lines.push(escape_html(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Description, MissionInfo, ServerBlock};

    fn mission() -> Mission {
        let mut server = ServerBlock::new("Server 1");
        server.sides.insert("red-side", "Red squad\nAssault group");
        server.sides.insert("blue-side", "Blue <guard>");
        server.sides.insert("purple-side", "  \n ");
        server.equipment.insert("blue-side", "2x BTR\n1x T-72");
        server.equipment.insert("odd-side", "Crates");

        Mission {
            name: "Operation \"Dawn\"".to_string(),
            info: MissionInfo {
                map: Some("Altis".to_string()),
                time: Some("06:00, clear".to_string()),
                description: Some(Description {
                    text: "Hold the line & wait".to_string(),
                    links: vec!["/briefing".to_string()],
                }),
                servers: vec![server],
                equipment: None,
            },
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom's & co</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom&#x27;s &amp; co&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_format_full_mission() {
        let text = format_mission(&[mission()], 0, Some("Games announcement"), &SideGlyphs::default());
        let expected = [
            "📢 <b>Games announcement</b>\n",
            "🎯 <b>Миссия:</b> Operation &quot;Dawn&quot;\n",
            "🗺 <b>Карта:</b> Altis",
            "☁️ <b>Погода и время:</b> 06:00, clear",
            "\n📝 <b>Описание:</b>",
            "Hold the line &amp; wait",
            "\n🖥 <b>Server 1\n</b>",
            "🔴Red squad — ⚔️ Атака",
            "🔵Blue &lt;guard&gt;",
            "\n🔵 <b>Техника:</b>",
            "2x BTR\n1x T-72",
            "\n📦 <b>Техника:</b>",
            "Crates",
        ]
        .join("\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn test_format_minimal_mission() {
        let missions = vec![Mission {
            name: "Alpha".to_string(),
            info: MissionInfo::default(),
        }];
        let text = format_mission(&missions, 0, None, &SideGlyphs::default());
        assert_eq!(text, "🎯 <b>Миссия:</b> Alpha\n");
    }

    #[test]
    fn test_links_not_rendered() {
        let text = format_mission(&[mission()], 0, None, &SideGlyphs::default());
        assert!(!text.contains("/briefing"));
    }

    #[test]
    fn test_out_of_range_index_renders_nothing() {
        assert_eq!(format_mission(&[mission()], 1, None, &SideGlyphs::default()), "");
        assert_eq!(format_mission(&[], 0, Some("t"), &SideGlyphs::default()), "");
    }
}
