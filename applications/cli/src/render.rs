//! Text rendering for the catalog pages and the player bar

use podcastr_catalog::Homepage;
use podcastr_core::{format_duration, Episode};
use podcastr_playback::PlaybackState;
use scraper::{ElementRef, Html, Node};
use std::fmt::Write;
use std::time::Duration;

const PROGRESS_WIDTH: usize = 30;
const TITLE_WIDTH: usize = 48;
const MEMBERS_WIDTH: usize = 32;

/// Homepage: latest releases as cards, the rest as a table.
///
/// Numbers run across both sections and match the `play N` / `list N`
/// session commands.
pub fn homepage(page: &Homepage) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Últimos lançamentos");
    if page.latest.is_empty() {
        let _ = writeln!(out, "  (nenhum episódio)");
    }
    for (i, episode) in page.latest.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {}", i + 1, episode.title);
        let _ = writeln!(
            out,
            "      {} · {} · {}",
            episode.members, episode.published_at_display, episode.duration_display
        );
    }

    if !page.all.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Todos episódios");
        let _ = writeln!(
            out,
            "  {:>3}  {:<tw$}  {:<mw$}  {:<9}  {:>8}",
            "#",
            "Podcast",
            "Integrantes",
            "Data",
            "Duração",
            tw = TITLE_WIDTH,
            mw = MEMBERS_WIDTH
        );
        for (i, episode) in page.all.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {:>3}  {:<tw$}  {:<mw$}  {:<9}  {:>8}",
                page.latest.len() + i + 1,
                truncate(&episode.title, TITLE_WIDTH),
                truncate(&episode.members, MEMBERS_WIDTH),
                episode.published_at_display,
                episode.duration_display,
                tw = TITLE_WIDTH,
                mw = MEMBERS_WIDTH
            );
        }
    }

    out
}

/// Detail page for a single episode
pub fn episode_detail(episode: &Episode) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", episode.title);
    let _ = writeln!(out, "{}", episode.members);
    let _ = writeln!(
        out,
        "{} · {}",
        episode.published_at_display, episode.duration_display
    );

    if let Some(description) = &episode.description {
        let text = html_to_text(description);
        if !text.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", text);
        }
    }

    out
}

/// Persistent player bar
pub fn player_bar(state: &PlaybackState, position: Duration) -> String {
    let Some(episode) = state.current_episode() else {
        return "Selecione um podcast para ouvir".to_string();
    };

    let length = episode.duration_secs;
    let elapsed = position.as_secs().min(length);
    let filled = if length == 0 {
        0
    } else {
        (elapsed as usize * PROGRESS_WIDTH) / length as usize
    };

    let mut flags = Vec::new();
    if state.is_looping {
        flags.push("loop");
    }
    if state.is_shuffling {
        flags.push("shuffle");
    }

    format!(
        "Tocando agora: {}\n{} {} [{}{}] {}{}",
        episode.title,
        if state.is_playing { "▶" } else { "⏸" },
        format_duration(elapsed),
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled),
        episode.duration_display,
        if flags.is_empty() {
            String::new()
        } else {
            format!("  ({})", flags.join(", "))
        }
    )
}

/// Plain text of an HTML description, one line per block element
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut text = String::with_capacity(html.len());
    collect_text(fragment.root_element(), &mut text);

    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(tag) => {
                if matches!(tag.name(), "script" | "style") {
                    continue;
                }
                let block = matches!(
                    tag.name(),
                    "p" | "br" | "div" | "li" | "ul" | "ol" | "h1" | "h2" | "h3" | "h4" | "blockquote"
                );
                if block {
                    out.push('\n');
                }
                if let Some(child) = ElementRef::wrap(child) {
                    collect_text(child, out);
                }
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(id: &str, duration_secs: u64) -> Episode {
        let mut episode = Episode::new(id, format!("Episode {}", id), "https://cdn/x.mp3", duration_secs)
            .with_members("Diego e Richard");
        episode.published_at_display = "8 fev 21".to_string();
        episode
    }

    #[test]
    fn homepage_numbers_across_sections() {
        let page = Homepage::split((1..=3).map(|i| episode(&i.to_string(), 60)).collect(), 2);

        let text = homepage(&page);

        assert!(text.contains("Últimos lançamentos"));
        assert!(text.contains(" 1. Episode 1"));
        assert!(text.contains(" 2. Episode 2"));
        assert!(text.contains("Todos episódios"));
        assert!(text.contains("  3  Episode 3"));
        assert!(text.contains("Diego e Richard · 8 fev 21 · 01:00"));
    }

    #[test]
    fn homepage_without_rest_has_no_table() {
        let page = Homepage::split(vec![episode("1", 60)], 2);
        assert!(!homepage(&page).contains("Todos episódios"));
    }

    #[test]
    fn empty_player_bar() {
        assert_eq!(
            player_bar(&PlaybackState::default(), Duration::ZERO),
            "Selecione um podcast para ouvir"
        );
    }

    #[test]
    fn player_bar_shows_progress_and_modes() {
        let state = PlaybackState {
            episode_list: vec![episode("1", 60)],
            current_index: Some(0),
            is_playing: true,
            is_looping: true,
            is_shuffling: false,
        };

        let bar = player_bar(&state, Duration::from_secs(30));

        assert!(bar.starts_with("Tocando agora: Episode 1\n▶ 00:30 ["));
        assert!(bar.contains(&format!("{}{}", "#".repeat(15), "-".repeat(15))));
        assert!(bar.ends_with("01:00  (loop)"));
    }

    #[test]
    fn detail_strips_markup() {
        let mut ep = episode("1", 60);
        ep.description = Some("<p>Neste episódio &amp; mais</p><p>Segunda   linha</p>".to_string());

        let text = episode_detail(&ep);

        assert!(text.contains("Neste episódio & mais\nSegunda linha"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn decodes_entities_once() {
        assert_eq!(
            html_to_text("<p>Tom &amp; Jerry &lt;3 &quot;ok&quot; &#39;x&#39; &eacute;</p>"),
            "Tom & Jerry <3 \"ok\" 'x' é"
        );
        assert_eq!(
            html_to_text("<p>literal &amp;nbsp; text</p>"),
            "literal &nbsp; text"
        );
    }

    #[test]
    fn bare_angle_bracket_is_text() {
        assert_eq!(
            html_to_text("<p>if a < b then</p><p>done</p>"),
            "if a < b then\ndone"
        );
    }

    #[test]
    fn line_breaks_and_lists() {
        assert_eq!(
            html_to_text("<p>Links:<br>one</p><ul><li>Rocketseat</li><li><a href=\"#\">Faladev</a></li></ul>"),
            "Links:\none\nRocketseat\nFaladev"
        );
    }

    #[test]
    fn truncates_long_text() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
