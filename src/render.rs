// Status board rendering.
//
// The board is plain state: a grid of cards, the empty-state placeholder, a
// couple of labels and the refresh control. `render_status` rebuilds it from
// a report, and the cards are a small element tree that serializes to HTML.

use std::fmt::Write;

use crate::status_models::{LineStatus, Source, StatusReport};

pub const NO_UPDATES: &str = "No additional updates.";
pub const UPDATED_RECENTLY: &str = "Updated recently";
pub const JUST_NOW: &str = "Just now";
pub const SAMPLE_SOURCE_LABEL: &str = "Using sample data";
pub const LIVE_SOURCE_LABEL: &str = "Live MTA feed";
pub const REFRESH_IDLE_LABEL: &str = "Refresh now";
pub const REFRESH_BUSY_LABEL: &str = "Refreshing…";

// ============================================================================
// Lookup Tables
// ============================================================================

/// Bullet color class for a route identifier.
pub fn route_class(route: &str) -> &'static str {
    match route {
        "1" | "2" | "3" => "route-red",
        "4" | "5" | "6" => "route-green",
        "7" => "route-purple",
        "A" | "C" | "E" => "route-blue",
        "B" | "D" | "F" | "M" => "route-orange",
        "G" => "route-lime",
        "J" | "Z" => "route-brown",
        "L" => "route-gray",
        "N" | "Q" | "R" | "W" => "route-yellow",
        "S" => "route-gray-dark",
        _ => "route-default",
    }
}

/// Badge severity class. Anything unrecognized is styled as planned work.
pub fn status_class(status: &str) -> &'static str {
    match status {
        "GOOD SERVICE" => "good",
        "DELAYS" | "SERVICE CHANGE" => "delays",
        "PLANNED WORK" => "planned",
        "SUSPENDED" => "bad",
        _ => "planned",
    }
}

pub fn parse_routes(name: &str) -> Vec<String> {
    name.split(',')
        .map(|route| route.trim().to_uppercase())
        .filter(|route| !route.is_empty())
        .collect()
}

// ============================================================================
// Element Tree
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: &'static str, classes: &[&str]) -> Self {
        Element {
            tag,
            classes: classes.iter().map(|class| class.to_string()).collect(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Depth-first search for every element carrying `class`.
    pub fn find_all<'a>(&'a self, class: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect(class, &mut found);
        found
    }

    pub fn find(&self, class: &str) -> Option<&Element> {
        self.find_all(class).into_iter().next()
    }

    fn collect<'a>(&'a self, class: &str, found: &mut Vec<&'a Element>) {
        if self.has_class(class) {
            found.push(self);
        }
        for child in &self.children {
            child.collect(class, found);
        }
    }

    pub fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape_html(&self.classes.join(" ")));
        }
        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape_html(text));
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ============================================================================
// Board State
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshControl {
    pub disabled: bool,
    pub label: String,
}

impl Default for RefreshControl {
    fn default() -> Self {
        RefreshControl {
            disabled: false,
            label: REFRESH_IDLE_LABEL.to_string(),
        }
    }
}

impl RefreshControl {
    pub fn begin(&mut self) {
        self.disabled = true;
        self.label = REFRESH_BUSY_LABEL.to_string();
    }

    pub fn finish(&mut self) {
        self.disabled = false;
        self.label = REFRESH_IDLE_LABEL.to_string();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBoard {
    pub cards: Vec<Element>,
    pub empty_state_visible: bool,
    pub source_label: String,
    pub updated_at_label: String,
    pub refresh: RefreshControl,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_empty_state(&mut self) {
        self.empty_state_visible = true;
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push_str("<section id=\"status-grid\">");
        for card in &self.cards {
            card.write_html(&mut out);
        }
        out.push_str("</section>");
        out
    }

    /// Plain-text rendition for terminals.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Last updated: {}  ({})", self.updated_at_label, self.source_label);
        if self.empty_state_visible {
            let _ = writeln!(out, "\nNo service status available right now.");
            return out;
        }

        for card in &self.cards {
            let routes: Vec<_> = card
                .find_all("route-bullet")
                .iter()
                .filter_map(|bullet| bullet.text.as_deref())
                .map(|route| format!("[{}]", route))
                .collect();
            let name = card.find("line-name").and_then(|n| n.text.as_deref());
            let badge = card.find("badge").and_then(|b| b.text.as_deref()).unwrap_or_default();
            let text_of = |class: &str| card.find(class).and_then(|e| e.text.as_deref()).unwrap_or_default();

            let _ = writeln!(out);
            let _ = writeln!(out, "{} {}  {}", routes.join(""), name.unwrap_or_default(), badge);
            let _ = writeln!(out, "  {}", text_of("description"));
            let _ = writeln!(out, "  {}", text_of("timestamp"));
        }
        out
    }
}

// ============================================================================
// Rendering
// ============================================================================

pub fn render_status(board: &mut StatusBoard, status: Option<&StatusReport>) {
    board.cards.clear();

    let Some(status) = status.filter(|status| !status.lines.is_empty()) else {
        board.show_empty_state();
        return;
    };

    board.empty_state_visible = false;
    board.source_label = match status.source {
        Source::Sample => SAMPLE_SOURCE_LABEL,
        Source::Live => LIVE_SOURCE_LABEL,
    }
    .to_string();

    board.cards.extend(status.lines.iter().map(render_card));

    board.updated_at_label = if status.updated_at.is_empty() {
        JUST_NOW.to_string()
    } else {
        status.updated_at.clone()
    };
}

pub fn render_card(line: &LineStatus) -> Element {
    let routes = parse_routes(&line.name);

    let bullets = routes.iter().fold(Element::new("div", &["routes"]), |wrap, route| {
        wrap.with_child(
            Element::new("span", &["route-bullet", route_class(route)]).with_text(route.as_str()),
        )
    });

    let mut line_info = Element::new("div", &["line-info"]).with_child(bullets);
    // Names without any route token are shown as-is
    if routes.is_empty() {
        line_info = line_info.with_child(Element::new("div", &["line-name"]).with_text(&line.name));
    }

    let badge =
        Element::new("div", &["badge", status_class(&line.status)]).with_text(&line.status);

    let description = if line.description.is_empty() {
        NO_UPDATES.to_string()
    } else {
        line.description.clone()
    };

    let timestamp = if line.last_updated.is_empty() {
        UPDATED_RECENTLY.to_string()
    } else {
        format!("Updated {}", line.last_updated)
    };

    Element::new("article", &["card"])
        .with_child(
            Element::new("div", &["card-header"])
                .with_child(line_info)
                .with_child(badge),
        )
        .with_child(Element::new("div", &["description"]).with_text(description))
        .with_child(Element::new("p", &["timestamp"]).with_text(timestamp))
}
