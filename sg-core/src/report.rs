//! Plain-text dump of extracted sections

use std::fmt::Write;

use crate::model::{Section, SideMap};

fn push_block(out: &mut String, map: &SideMap, label: &str) {
    for (side, text) in map.iter() {
        let _ = writeln!(out, "{} {}:", side.to_uppercase(), label);
        let _ = writeln!(out, "{}", text);
    }
}

/// Render every section, mission, server and side as readable text
pub fn render_report(sections: &[Section]) -> String {
    let mut out = String::new();

    for section in sections {
        let _ = writeln!(out, "{}", "=".repeat(60));
        let _ = writeln!(out, "SECTION: {}", section.title);

        for mission in &section.missions {
            let _ = writeln!(out, "{}", "-".repeat(40));
            let _ = writeln!(out, "MISSION: {}", mission.name);
            let info = &mission.info;

            if let Some(map) = info.map.as_deref().filter(|m| !m.is_empty()) {
                let _ = writeln!(out, "Map: {}", map);
            }
            if let Some(time) = info.time.as_deref().filter(|t| !t.is_empty()) {
                let _ = writeln!(out, "Time: {}", time);
            }
            if let Some(description) = &info.description {
                let _ = writeln!(out, "Description:");
                let _ = writeln!(out, "{}", description.text);
                for link in &description.links {
                    let _ = writeln!(out, "Link: {}", link);
                }
            }

            if !info.servers.is_empty() {
                for server in &info.servers {
                    let _ = writeln!(out, "SERVER: {}", server.name);
                    push_block(&mut out, &server.sides, "SIDE");
                    push_block(&mut out, &server.equipment, "EQUIPMENT");
                }
            } else if let Some(equipment) = &info.equipment {
                push_block(&mut out, equipment, "SIDE");
            }
        }
    }

    out
}
